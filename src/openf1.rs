//! Query shapes and response records for the OpenF1 lap-timing service.
//!
//! The HTTP transport itself lives with the caller; this module builds the
//! query URLs, decodes response bodies, and picks the lap-duration values the
//! comparison summary needs. Numeric fields are nullable because the service
//! routinely omits them for in/out laps and incomplete sessions.

use serde::Deserialize;

use crate::LapDeltaError;
use crate::comparison::summary::summarize;

pub const BASE_URL: &str = "https://api.openf1.org/v1/";

/// One session as returned by the `sessions` endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SessionRecord {
    pub session_key: Option<i64>,
    pub country_name: Option<String>,
    pub session_name: Option<String>,
    pub year: Option<i32>,
}

impl SessionRecord {
    pub fn display_name(&self) -> String {
        format!(
            "{} {} {}",
            self.year.unwrap_or(0),
            self.country_name.as_deref().unwrap_or("?"),
            self.session_name.as_deref().unwrap_or("?")
        )
    }
}

/// One lap summary as returned by the `laps` endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LapSummary {
    pub lap_number: Option<i32>,
    pub lap_duration: Option<f64>,
    pub driver_number: Option<i32>,
    pub session_key: Option<i64>,
}

/// One telemetry row for a specific lap, as returned by the `laps` endpoint
/// when filtered down to a single lap number.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TelemetryRow {
    pub session_key: Option<i64>,
    pub driver_number: Option<i32>,
    pub speed: Option<f64>,
    pub throttle: Option<f64>,
    pub brake: Option<f64>,
    pub drs: Option<f64>,
    pub time: Option<f64>,
    pub lap_number: Option<i32>,
}

/// One sector row as returned by the `sectors` endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SectorRow {
    pub session_key: Option<i64>,
    pub driver_number: Option<i32>,
    pub sector: Option<i32>,
    pub sector_time: Option<f64>,
    pub lap_number: Option<i32>,
}

/// Sessions filtered by country, session type, and year.
pub fn sessions_query(country: &str, session_type: &str, year: i32) -> String {
    format!(
        "{BASE_URL}sessions?country_name={}&session_name={}&year={year}",
        escape(country),
        escape(session_type)
    )
}

/// Lap summaries for one driver in one session.
pub fn laps_query(session_key: i64, driver_number: i32) -> String {
    format!("{BASE_URL}laps?session_key={session_key}&driver_number={driver_number}")
}

/// Telemetry rows for one driver's specific lap in one session.
pub fn telemetry_query(session_key: i64, driver_number: i32, lap_number: i32) -> String {
    format!(
        "{BASE_URL}laps?session_key={session_key}&driver_number={driver_number}&lap_number={lap_number}"
    )
}

/// Sector times for one driver in one session.
pub fn sectors_query(session_key: i64, driver_number: i32) -> String {
    format!("{BASE_URL}sectors?session_key={session_key}&driver_number={driver_number}")
}

// the only reserved character that shows up in country or session names
fn escape(value: &str) -> String {
    value.replace(' ', "%20")
}

pub fn parse_sessions(body: &str) -> Result<Vec<SessionRecord>, LapDeltaError> {
    serde_json::from_str(body).map_err(|e| LapDeltaError::TimingServiceDecode {
        endpoint: "sessions",
        source: e,
    })
}

pub fn parse_lap_summaries(body: &str) -> Result<Vec<LapSummary>, LapDeltaError> {
    serde_json::from_str(body).map_err(|e| LapDeltaError::TimingServiceDecode {
        endpoint: "laps",
        source: e,
    })
}

pub fn parse_telemetry_rows(body: &str) -> Result<Vec<TelemetryRow>, LapDeltaError> {
    serde_json::from_str(body).map_err(|e| LapDeltaError::TimingServiceDecode {
        endpoint: "telemetry",
        source: e,
    })
}

pub fn parse_sector_rows(body: &str) -> Result<Vec<SectorRow>, LapDeltaError> {
    serde_json::from_str(body).map_err(|e| LapDeltaError::TimingServiceDecode {
        endpoint: "sectors",
        source: e,
    })
}

/// Duration of a specific lap within a driver's summaries, if the service
/// reported one.
pub fn lap_duration(summaries: &[LapSummary], lap_number: i32) -> Option<f64> {
    summaries
        .iter()
        .find(|s| s.lap_number == Some(lap_number))
        .and_then(|s| s.lap_duration)
}

/// Fastest-lap verdict between two drivers' lap summaries for the same lap
/// number. Missing laps or null durations surface through the summary text,
/// never as an error.
pub fn fastest_driver(
    summaries_a: &[LapSummary],
    summaries_b: &[LapSummary],
    lap_number: i32,
    name_a: &str,
    name_b: &str,
) -> String {
    summarize(
        lap_duration(summaries_a, lap_number),
        lap_duration(summaries_b, lap_number),
        name_a,
        name_b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_urls() {
        assert_eq!(
            sessions_query("Great Britain", "Qualifying", 2024),
            "https://api.openf1.org/v1/sessions?country_name=Great%20Britain&session_name=Qualifying&year=2024"
        );
        assert_eq!(
            laps_query(9222, 44),
            "https://api.openf1.org/v1/laps?session_key=9222&driver_number=44"
        );
        assert_eq!(
            sectors_query(9222, 44),
            "https://api.openf1.org/v1/sectors?session_key=9222&driver_number=44"
        );
        assert_eq!(
            telemetry_query(9222, 44, 17),
            "https://api.openf1.org/v1/laps?session_key=9222&driver_number=44&lap_number=17"
        );
    }

    #[test]
    fn test_parse_telemetry_rows_with_nulls() {
        let body = r#"[
            {"session_key": 9222, "driver_number": 44, "speed": 287.0, "throttle": 99.0,
             "brake": null, "drs": 1.0, "time": 12.4, "lap_number": 17},
            {"session_key": 9222, "driver_number": 44, "speed": null, "throttle": null,
             "brake": null, "drs": null, "time": null, "lap_number": 17}
        ]"#;
        let rows = parse_telemetry_rows(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].speed, Some(287.0));
        assert_eq!(rows[0].brake, None);
        assert_eq!(rows[1].speed, None);
        assert_eq!(rows[1].lap_number, Some(17));
    }

    #[test]
    fn test_parse_lap_summaries_with_nulls() {
        let body = r#"[
            {"lap_number": 1, "lap_duration": null, "driver_number": 44, "session_key": 9222},
            {"lap_number": 2, "lap_duration": 91.233, "driver_number": 44, "session_key": 9222}
        ]"#;
        let summaries = parse_lap_summaries(body).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(lap_duration(&summaries, 1), None);
        assert_eq!(lap_duration(&summaries, 2), Some(91.233));
        assert_eq!(lap_duration(&summaries, 3), None);
    }

    #[test]
    fn test_parse_sessions_ignores_extra_fields() {
        let body = r#"[{"session_key": 9222, "country_name": "Italy", "year": 2024,
                        "session_name": "Race", "circuit_short_name": "Monza"}]"#;
        let sessions = parse_sessions(body).unwrap();
        assert_eq!(sessions[0].display_name(), "2024 Italy Race");
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        assert!(matches!(
            parse_sector_rows("{\"oops\": true}"),
            Err(LapDeltaError::TimingServiceDecode { endpoint: "sectors", .. })
        ));
    }

    #[test]
    fn test_fastest_driver_verdict() {
        let a = vec![LapSummary {
            lap_number: Some(7),
            lap_duration: Some(90.0),
            driver_number: Some(44),
            session_key: Some(9222),
        }];
        let b = vec![LapSummary {
            lap_number: Some(7),
            lap_duration: Some(91.5),
            driver_number: Some(1),
            session_key: Some(9222),
        }];
        assert_eq!(
            fastest_driver(&a, &b, 7, "HAM", "VER"),
            "HAM was faster by 1.500 s."
        );
        assert_eq!(
            fastest_driver(&a, &b, 8, "HAM", "VER"),
            "Lap time data not available for both drivers."
        );
    }
}
