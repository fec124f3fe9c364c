use crate::telemetry::{DistancedPoint, LapData};

/// km/h to m/s divisor
const KMH_PER_MPS: f64 = 3.6;

/// Derives the cumulative distance axis for a lap by forward-Euler
/// integration of speed: each interval contributes the *current* sample's
/// speed over the time elapsed since the previous sample. Deliberately not
/// trapezoidal, to stay sample-for-sample compatible with the files other
/// tools in this toolchain produce.
///
/// Returns a fresh sequence; the input lap is never modified. The first
/// sample sits at distance 0. A `dt <= 0` interval (duplicate or
/// out-of-order timestamps) contributes its zero or negative delta silently.
/// This function has no failure mode: empty input yields empty output, a
/// single-sample lap yields `[0]`.
pub fn integrate_distance(lap: &LapData) -> Vec<DistancedPoint> {
    let mut annotated = Vec::with_capacity(lap.data.len());
    let mut distance = 0.;
    for (i, point) in lap.data.iter().enumerate() {
        if i > 0 {
            let dt = point.time - lap.data[i - 1].time;
            distance += point.speed * dt / KMH_PER_MPS;
        }
        annotated.push(DistancedPoint {
            time: point.time,
            speed: point.speed,
            throttle: point.throttle,
            brake: point.brake,
            gear: point.gear,
            distance,
        });
    }
    annotated
}

/// Total distance covered by an annotated lap, 0 for an empty one.
pub fn total_distance(samples: &[DistancedPoint]) -> f64 {
    samples.last().map(|p| p.distance).unwrap_or(0.)
}
