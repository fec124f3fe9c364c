// Error types for lapdelta

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LapDeltaError {
    // Errors while enumerating and loading lap files
    #[snafu(display("Lap folder not found: {path}"))]
    MissingLapFolder { path: String },
    #[snafu(display("Error reading lap file"))]
    LapFileIo { source: io::Error },
    #[snafu(display("Error parsing lap file: {path}"))]
    LapFileParse {
        path: String,
        source: serde_json::Error,
    },

    // Errors while decoding lap-timing service responses
    #[snafu(display("Error decoding {endpoint} response from timing service"))]
    TimingServiceDecode {
        endpoint: &'static str,
        source: serde_json::Error,
    },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}
