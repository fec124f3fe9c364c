use crate::telemetry::DistancedPoint;

/// A synthetic sample on the uniform distance grid: how long the lap took to
/// reach `distance` meters from the start line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResampledPoint {
    pub distance: f64,
    pub time: f64,
}

/// Reprojects a distance-annotated lap onto a uniform distance grid.
///
/// Grid points are `0, interval, 2*interval, ...` up to and including the
/// lap's total distance. For each grid point the bracketing samples are
/// located and the time is linearly interpolated between them; an exact hit
/// emits the sample's own time, and a grid point with no bracketing pair is
/// skipped. Because two laps resampled at the same interval share their grid
/// distances, their times become directly comparable even though the source
/// laps were recorded on independent clocks.
///
/// Pure function over its inputs; callers may resample the same lap
/// repeatedly with different intervals. Empty input or a non-positive
/// interval yields an empty grid. Samples must already carry distances (see
/// [`super::distance::integrate_distance`]).
pub fn resample(samples: &[DistancedPoint], interval: f64) -> Vec<ResampledPoint> {
    let Some(last) = samples.last() else {
        return Vec::new();
    };
    if interval <= 0. {
        return Vec::new();
    }

    let max_distance = last.distance;
    let mut grid = Vec::with_capacity((max_distance / interval) as usize + 1);
    let mut step = 0usize;
    // the grid is rebuilt from the step count so interval rounding never
    // accumulates across a long lap
    while step as f64 * interval <= max_distance {
        let d = step as f64 * interval;
        step += 1;

        // first sample at or beyond the grid point
        let right_idx = samples.partition_point(|s| s.distance < d);
        let Some(right) = samples.get(right_idx) else {
            continue;
        };
        if right.distance == d {
            grid.push(ResampledPoint {
                distance: d,
                time: right.time,
            });
            continue;
        }
        // right is strictly beyond d, so the bracket needs a sample before it
        if right_idx == 0 {
            continue;
        }
        let left = &samples[right_idx - 1];
        let frac = (d - left.distance) / (right.distance - left.distance);
        grid.push(ResampledPoint {
            distance: d,
            time: left.time + frac * (right.time - left.time),
        });
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn annotated(points: &[(f64, f64)]) -> Vec<DistancedPoint> {
        points
            .iter()
            .map(|(time, distance)| DistancedPoint {
                time: *time,
                speed: 0.,
                throttle: 0.,
                brake: 0.,
                gear: 0,
                distance: *distance,
            })
            .collect()
    }

    #[test]
    fn test_interpolates_between_samples() {
        let samples = annotated(&[(0., 0.), (2., 20.)]);
        let grid = resample(&samples, 5.);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], ResampledPoint { distance: 0., time: 0. });
        assert_eq!(grid[1], ResampledPoint { distance: 5., time: 0.5 });
        assert_eq!(grid[4], ResampledPoint { distance: 20., time: 2. });
    }

    #[test]
    fn test_exact_hit_returns_sample_time() {
        let samples = annotated(&[(0., 0.), (1.37, 10.), (3., 25.)]);
        let grid = resample(&samples, 10.);
        assert_eq!(grid[1].time, 1.37);
    }

    #[test]
    fn test_empty_and_bad_interval() {
        assert!(resample(&[], 5.).is_empty());
        let samples = annotated(&[(0., 0.), (1., 10.)]);
        assert!(resample(&samples, 0.).is_empty());
        assert!(resample(&samples, -1.).is_empty());
    }

    #[test]
    fn test_grid_never_exceeds_max_distance() {
        let samples = annotated(&[(0., 0.), (9., 42.)]);
        let grid = resample(&samples, 5.);
        assert!(grid.iter().all(|p| p.distance <= 42.));
        assert_eq!(grid.last().unwrap().distance, 40.);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_grid_is_increasing_and_bounded(
                interval in 0.5f64..50.0,
                segment_lengths in prop::collection::vec(0.1f64..120.0, 1..60),
            ) {
                let mut samples = vec![(0.0f64, 0.0f64)];
                for (i, len) in segment_lengths.iter().enumerate() {
                    let (prev_t, prev_d) = samples[i];
                    samples.push((prev_t + 1.0, prev_d + len));
                }
                let samples = annotated(&samples);
                let grid = resample(&samples, interval);

                // Property: grid distances are strictly increasing multiples of
                // the interval, starting at 0, never beyond the lap's end
                prop_assert!(!grid.is_empty());
                prop_assert_eq!(grid[0].distance, 0.0);
                let max_distance = samples.last().unwrap().distance;
                for pair in grid.windows(2) {
                    prop_assert!(pair[1].distance > pair[0].distance);
                    prop_assert!(pair[1].time >= pair[0].time);
                }
                for point in &grid {
                    prop_assert!(point.distance <= max_distance);
                    let steps = point.distance / interval;
                    prop_assert!((steps - steps.round()).abs() < 1e-6);
                }
            }

            #[test]
            fn prop_resample_is_pure(
                interval in 0.5f64..25.0,
                segment_lengths in prop::collection::vec(0.1f64..80.0, 1..40),
            ) {
                let mut samples = vec![(0.0f64, 0.0f64)];
                for (i, len) in segment_lengths.iter().enumerate() {
                    let (prev_t, prev_d) = samples[i];
                    samples.push((prev_t + 0.5, prev_d + len));
                }
                let samples = annotated(&samples);
                let first = resample(&samples, interval);
                let second = resample(&samples, interval);
                prop_assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_round_trip_at_sample_distance() {
        // grid point landing exactly on a source sample returns its time
        let samples = annotated(&[(0., 0.), (4.21, 15.), (9., 30.)]);
        let grid = resample(&samples, 5.);
        let hit = grid.iter().find(|p| p.distance == 15.).unwrap();
        assert!((hit.time - 4.21).abs() < 1e-12);
    }

    #[test]
    fn test_restartable_identical_output() {
        let samples = annotated(&[(0., 0.), (1., 7.3), (2., 19.9), (3., 31.2)]);
        let runs = (0..3).map(|_| resample(&samples, 2.5)).collect_vec();
        assert_eq!(runs[0], runs[1]);
        assert_eq!(runs[1], runs[2]);
    }
}
