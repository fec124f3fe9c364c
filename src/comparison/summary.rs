/// Lap times closer than this are reported as identical.
const TIE_TOLERANCE_S: f64 = 0.001;

/// Renders the fastest-lap verdict for two drivers' lap times.
///
/// Either time may be missing (the timing service frequently returns null
/// durations for in/out laps); that case is reported, not raised.
pub fn summarize(
    lap_time_a: Option<f64>,
    lap_time_b: Option<f64>,
    name_a: &str,
    name_b: &str,
) -> String {
    let (Some(time_a), Some(time_b)) = (lap_time_a, lap_time_b) else {
        return "Lap time data not available for both drivers.".to_string();
    };
    let diff = time_a - time_b;
    if diff.abs() < TIE_TOLERANCE_S {
        format!("Both drivers set identical lap times of {time_a:.3} s.")
    } else if diff < 0. {
        format!("{name_a} was faster by {:.3} s.", diff.abs())
    } else {
        format!("{name_b} was faster by {:.3} s.", diff.abs())
    }
}
