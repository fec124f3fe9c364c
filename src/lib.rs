// Library interface for lapdelta
// This allows integration tests to access internal modules

pub mod comparison;
pub mod config;
pub mod errors;
pub mod loader;
pub mod openf1;
pub mod telemetry;

// Re-export commonly used types
pub use comparison::{
    ChannelSelection, ComparisonRequest, ComparisonSeries, OverlaySeries, SeriesColor, SyncMode,
    sectors::Sector, summary::summarize, synchronize,
};
pub use config::AnalysisConfig;
pub use errors::LapDeltaError;
pub use loader::LapFileEntry;
pub use telemetry::{Channel, DistancedPoint, LapData, TelemetryPoint};
