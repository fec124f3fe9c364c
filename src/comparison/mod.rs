pub mod sectors;
pub mod summary;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::telemetry::{
    Channel, DistancedPoint, LapData,
    distance::integrate_distance,
    resample::resample,
};

/// Distance grid step used for the cumulative time delta, in meters.
pub const DEFAULT_RESAMPLE_INTERVAL_M: f64 = 5.;

/// Policy for aligning two laps' time axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncMode {
    /// Both laps start at t=0; no shift applied.
    #[default]
    AlignStart,
    /// The comparison lap is shifted so both laps' final samples coincide.
    AlignEnd,
}

/// Plain RGB triple. The presentation layer decides what to do with it; the
/// core only picks which color goes with which series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const BLUE: SeriesColor = SeriesColor { r: 0, g: 0, b: 255 };
    pub const GREEN: SeriesColor = SeriesColor { r: 0, g: 128, b: 0 };
    pub const RED: SeriesColor = SeriesColor { r: 255, g: 0, b: 0 };
    pub const PURPLE: SeriesColor = SeriesColor { r: 128, g: 0, b: 128 };
    pub const LIGHT_BLUE: SeriesColor = SeriesColor { r: 173, g: 216, b: 230 };
    pub const LIGHT_GREEN: SeriesColor = SeriesColor { r: 144, g: 238, b: 144 };
    pub const ORANGE_RED: SeriesColor = SeriesColor { r: 255, g: 69, b: 0 };
    pub const MEDIUM_PURPLE: SeriesColor = SeriesColor { r: 147, g: 112, b: 219 };
    pub const DARK_GRAY: SeriesColor = SeriesColor { r: 64, g: 64, b: 64 };
}

/// Primary-lap palette per channel
fn primary_color(channel: Channel) -> SeriesColor {
    match channel {
        Channel::Speed => SeriesColor::BLUE,
        Channel::Throttle => SeriesColor::GREEN,
        Channel::Brake => SeriesColor::RED,
        Channel::Gear => SeriesColor::PURPLE,
    }
}

/// Comparison-lap palette per channel
fn secondary_color(channel: Channel) -> SeriesColor {
    match channel {
        Channel::Speed => SeriesColor::LIGHT_BLUE,
        Channel::Throttle => SeriesColor::LIGHT_GREEN,
        Channel::Brake => SeriesColor::ORANGE_RED,
        Channel::Gear => SeriesColor::MEDIUM_PURPLE,
    }
}

/// A named series of (x, y) pairs ready for any plotting surface.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySeries {
    pub name: String,
    pub color: SeriesColor,
    pub points: Vec<(f64, f64)>,
}

/// Which channels the overlays should include.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSelection {
    pub speed: bool,
    pub throttle: bool,
    pub brake: bool,
    pub gear: bool,
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self {
            speed: true,
            throttle: true,
            brake: true,
            gear: true,
        }
    }
}

impl ChannelSelection {
    fn includes(&self, channel: Channel) -> bool {
        match channel {
            Channel::Speed => self.speed,
            Channel::Throttle => self.throttle,
            Channel::Brake => self.brake,
            Channel::Gear => self.gear,
        }
    }
}

/// Everything `synchronize` needs to derive a comparison. Rebuilt by the
/// caller whenever the selected laps, sync mode, or channel toggles change;
/// the core holds no state between calls.
#[derive(Clone, Copy, Debug)]
pub struct ComparisonRequest<'a> {
    pub primary: &'a LapData,
    pub secondary: Option<&'a LapData>,
    pub sync_mode: SyncMode,
    pub channels: ChannelSelection,
    pub resample_interval: f64,
}

impl<'a> ComparisonRequest<'a> {
    pub fn new(primary: &'a LapData) -> Self {
        Self {
            primary,
            secondary: None,
            sync_mode: SyncMode::AlignStart,
            channels: ChannelSelection::default(),
            resample_interval: DEFAULT_RESAMPLE_INTERVAL_M,
        }
    }

    pub fn against(mut self, secondary: &'a LapData) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn with_sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }
}

/// Derived output bundle: per-channel overlays for each loaded lap, plus the
/// two delta signals when a distinct comparison lap is present. Never
/// persisted; recomputed wholesale on every call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComparisonSeries {
    pub overlays: Vec<OverlaySeries>,
    pub speed_delta: Option<OverlaySeries>,
    pub time_delta: Option<OverlaySeries>,
}

/// Aligns one or two laps and derives all comparison series.
///
/// A missing secondary lap, or one with the same identity as the primary
/// (same driver and lap number), degrades to primary-only overlays. Malformed
/// laps (non-monotonic times, zero distance) flow through as empty or
/// degenerate series; nothing here returns an error.
pub fn synchronize(request: &ComparisonRequest) -> ComparisonSeries {
    let primary = request.primary;
    let secondary = request.secondary.filter(|s| !same_lap(primary, s));

    let offset = match (request.sync_mode, secondary) {
        (SyncMode::AlignEnd, Some(secondary)) => {
            match (primary.final_time(), secondary.final_time()) {
                (Some(primary_end), Some(secondary_end)) => primary_end - secondary_end,
                _ => 0.,
            }
        }
        _ => 0.,
    };
    debug!(
        "synchronizing {} lap {} against {:?} (offset {:.3}s)",
        primary.driver,
        primary.lap_number,
        secondary.map(|s| (&s.driver, s.lap_number)),
        offset
    );

    let mut series = ComparisonSeries::default();
    overlay_channels(&mut series.overlays, primary, 0., request.channels, primary_color);
    let Some(secondary) = secondary else {
        return series;
    };
    overlay_channels(&mut series.overlays, secondary, offset, request.channels, secondary_color);

    // distance-domain work is offset-independent: each lap is integrated and
    // resampled on its own axis
    let primary_annotated = integrate_distance(primary);
    let secondary_annotated = integrate_distance(secondary);

    series.speed_delta = Some(speed_delta(primary, secondary, offset));
    series.time_delta = Some(cumulative_time_delta(
        &primary_annotated,
        &secondary_annotated,
        request.resample_interval,
    ));
    series
}

/// The core never sees file paths, so lap identity is the driver plus the
/// lap number.
fn same_lap(a: &LapData, b: &LapData) -> bool {
    a.driver == b.driver && a.lap_number == b.lap_number
}

fn overlay_channels(
    overlays: &mut Vec<OverlaySeries>,
    lap: &LapData,
    offset: f64,
    channels: ChannelSelection,
    palette: fn(Channel) -> SeriesColor,
) {
    if lap.data.is_empty() {
        return;
    }
    for channel in Channel::ALL {
        if !channels.includes(channel) {
            continue;
        }
        overlays.push(OverlaySeries {
            name: format!("{} ({})", channel.label(), lap.driver),
            color: palette(channel),
            points: lap
                .data
                .iter()
                .map(|p| (p.time + offset, channel.value(p)))
                .collect(),
        });
    }
}

/// Time-domain speed difference: for each primary sample, the secondary
/// sample with the nearest offset-adjusted timestamp, ties to the earlier
/// sample. Both sequences are time-sorted, so a two-pointer merge does this
/// in linear time.
fn speed_delta(primary: &LapData, secondary: &LapData, offset: f64) -> OverlaySeries {
    let mut points = Vec::new();
    if !secondary.data.is_empty() {
        points.reserve(primary.data.len());
        let mut nearest = 0usize;
        for point in &primary.data {
            while nearest + 1 < secondary.data.len() {
                let current = (secondary.data[nearest].time + offset - point.time).abs();
                let next = (secondary.data[nearest + 1].time + offset - point.time).abs();
                if next < current {
                    nearest += 1;
                } else {
                    break;
                }
            }
            points.push((point.time, point.speed - secondary.data[nearest].speed));
        }
    }
    OverlaySeries {
        name: format!("Speed Δ ({} - {})", primary.driver, secondary.driver),
        color: SeriesColor::DARK_GRAY,
        points,
    }
}

/// Distance-domain cumulative time delta between two laps, the headline
/// comparison signal: positive means the comparison lap is losing time.
///
/// Both laps are resampled onto the same fixed distance grid and the
/// per-segment time gain/loss is accumulated from zero. Accumulating segment
/// deltas rather than differencing absolute grid times keeps the signal
/// meaningful when the two laps' clocks carry a constant offset.
fn cumulative_time_delta(
    primary: &[DistancedPoint],
    secondary: &[DistancedPoint],
    interval: f64,
) -> OverlaySeries {
    let primary_grid = resample(primary, interval);
    let secondary_grid = resample(secondary, interval);
    let common = primary_grid.len().min(secondary_grid.len());

    let mut points = Vec::with_capacity(common);
    if common > 0 {
        points.push((primary_grid[0].distance, 0.));
        let mut delta = 0.;
        for (i, ((p_prev, p_cur), (s_prev, s_cur))) in primary_grid[..common]
            .iter()
            .tuple_windows()
            .zip(secondary_grid[..common].iter().tuple_windows())
            .enumerate()
        {
            delta += (s_cur.time - s_prev.time) - (p_cur.time - p_prev.time);
            points.push((primary_grid[i + 1].distance, delta));
        }
    }
    OverlaySeries {
        name: "Time Δ".to_string(),
        color: SeriesColor::DARK_GRAY,
        points,
    }
}
