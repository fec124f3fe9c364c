pub mod distance;
pub mod resample;

use serde::{Deserialize, Serialize};

/// One raw telemetry sample as recorded by the lap source.
///
/// Samples carry no distance; the distance axis is derived by
/// [`distance::integrate_distance`]. Throttle and brake units are whatever the
/// source recorded (0-1 or 0-100) and are passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPoint {
    /// Seconds from the start of the lap, non-decreasing within a lap
    #[serde(alias = "Time")]
    pub time: f64,
    /// Speed in km/h
    #[serde(alias = "Speed")]
    pub speed: f64,
    /// Throttle input, unit defined by the source
    #[serde(alias = "Throttle")]
    pub throttle: f64,
    /// Brake input, same convention as throttle
    #[serde(alias = "Brake")]
    pub brake: f64,
    /// Current gear
    #[serde(alias = "Gear")]
    pub gear: i32,
}

impl Default for TelemetryPoint {
    fn default() -> Self {
        Self {
            time: 0.,
            speed: 0.,
            throttle: 0.,
            brake: 0.,
            gear: 0,
        }
    }
}

/// A complete recorded lap: driver, lap number, and the time-ordered samples.
///
/// Lap files spell the fields with varying capitalization, hence the aliases.
/// A lap is loaded whole and replaced whole; nothing mutates it afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LapData {
    #[serde(alias = "Driver")]
    pub driver: String,
    #[serde(alias = "lapNumber", alias = "LapNumber")]
    pub lap_number: i32,
    #[serde(alias = "Data")]
    pub data: Vec<TelemetryPoint>,
}

impl LapData {
    /// Timestamp of the final sample, if any. Used for end-alignment and as
    /// the lap time when the source carries no separate duration field.
    pub fn final_time(&self) -> Option<f64> {
        self.data.last().map(|p| p.time)
    }
}

/// A telemetry sample annotated with cumulative distance from the start line,
/// in meters. Produced by [`distance::integrate_distance`]; raw input samples
/// are never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistancedPoint {
    pub time: f64,
    pub speed: f64,
    pub throttle: f64,
    pub brake: f64,
    pub gear: i32,
    pub distance: f64,
}

/// The telemetry channels that can be overlaid on a comparison chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Speed,
    Throttle,
    Brake,
    Gear,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Speed,
        Channel::Throttle,
        Channel::Brake,
        Channel::Gear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Speed => "Speed",
            Channel::Throttle => "Throttle",
            Channel::Brake => "Brake",
            Channel::Gear => "Gear",
        }
    }

    pub fn value(&self, point: &TelemetryPoint) -> f64 {
        match self {
            Channel::Speed => point.speed,
            Channel::Throttle => point.throttle,
            Channel::Brake => point.brake,
            Channel::Gear => point.gear as f64,
        }
    }
}
