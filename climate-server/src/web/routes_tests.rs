//! Router tests driving the full axum stack against in-memory data.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::config::QueryConfig;
use crate::domain::{
    DateRange, Measurement, PrecipitationReading, Station, TemperatureReading, TemperatureSummary,
};
use crate::store::{ClimateStore, InMemoryStore, StoreError};

use super::{AppState, create_router};

const START_MESSAGE: &str = "Start date not found. Please enter a date in the format 'YYYYMMDD' between 2010-01-01 and 2017-08-23";
const RANGE_MESSAGE: &str = "Dates not found. Please enter start and end dates in the format 'YYYYMMDD' between 2010-01-01 and 2017-08-23";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn station(id: &str, name: &str) -> Station {
    Station {
        station: id.into(),
        name: name.into(),
        latitude: 21.3,
        longitude: -157.8,
        elevation: 10.0,
    }
}

fn measurement(station: &str, date: NaiveDate, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        station: station.into(),
        date,
        prcp,
        tobs,
    }
}

/// A small dataset with two stations reporting on shared dates.
fn fixture_store() -> InMemoryStore {
    InMemoryStore::new(
        vec![
            station("USC00519397", "WAIKIKI 717.2, HI US"),
            station("USC00519281", "WAIHEE 837.5, HI US"),
            station("USC00513117", "KANEOHE 838.1, HI US"),
        ],
        vec![
            measurement("USC00519281", ymd(2015, 12, 31), Some(0.4), 50.0),
            measurement("USC00519281", ymd(2016, 1, 1), Some(0.1), 58.0),
            measurement("USC00519397", ymd(2016, 6, 1), Some(0.0), 74.0),
            measurement("USC00519281", ymd(2016, 8, 22), Some(0.5), 76.0),
            measurement("USC00519397", ymd(2016, 8, 23), Some(0.0), 81.0),
            measurement("USC00519281", ymd(2016, 8, 23), Some(1.79), 77.0),
            measurement("USC00513117", ymd(2016, 8, 24), Some(2.15), 76.0),
            measurement("USC00519281", ymd(2016, 8, 24), None, 77.0),
            measurement("USC00519281", ymd(2016, 12, 31), Some(0.2), 87.0),
            measurement("USC00519281", ymd(2017, 1, 1), Some(0.0), 62.0),
        ],
    )
}

fn app(store: impl ClimateStore + 'static) -> Router {
    create_router(
        AppState::new(store, QueryConfig::default()),
        Duration::from_secs(5),
    )
}

/// Issue a GET and return the status and parsed JSON body.
async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

/// A store whose every query fails, as if the database were unavailable.
struct UnavailableStore;

impl ClimateStore for UnavailableStore {
    fn precipitation_since(&self, _: NaiveDate) -> Result<Vec<PrecipitationReading>, StoreError> {
        Err(StoreError::NotFound("hawaii.sqlite".into()))
    }

    fn stations(&self) -> Result<Vec<Station>, StoreError> {
        Err(StoreError::NotFound("hawaii.sqlite".into()))
    }

    fn temperatures_since(
        &self,
        _: &str,
        _: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, StoreError> {
        Err(StoreError::NotFound("hawaii.sqlite".into()))
    }

    fn temperature_summary(&self, _: DateRange) -> Result<TemperatureSummary, StoreError> {
        Err(StoreError::NotFound("hawaii.sqlite".into()))
    }
}

/// A store returning fixed aggregates for any range.
struct FixedSummaryStore(TemperatureSummary);

impl ClimateStore for FixedSummaryStore {
    fn precipitation_since(&self, _: NaiveDate) -> Result<Vec<PrecipitationReading>, StoreError> {
        Ok(vec![])
    }

    fn stations(&self) -> Result<Vec<Station>, StoreError> {
        Ok(vec![])
    }

    fn temperatures_since(
        &self,
        _: &str,
        _: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, StoreError> {
        Ok(vec![])
    }

    fn temperature_summary(&self, _: DateRange) -> Result<TemperatureSummary, StoreError> {
        Ok(self.0)
    }
}

/// A store whose summary query outlasts any short request timeout.
struct SlowStore;

impl ClimateStore for SlowStore {
    fn precipitation_since(&self, _: NaiveDate) -> Result<Vec<PrecipitationReading>, StoreError> {
        Ok(vec![])
    }

    fn stations(&self) -> Result<Vec<Station>, StoreError> {
        Ok(vec![])
    }

    fn temperatures_since(
        &self,
        _: &str,
        _: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, StoreError> {
        Ok(vec![])
    }

    fn temperature_summary(&self, _: DateRange) -> Result<TemperatureSummary, StoreError> {
        std::thread::sleep(Duration::from_millis(50));
        Ok(TemperatureSummary::default())
    }
}

// ---------------------------------------------------------------------------
// Fixed routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn home_lists_routes() {
    let (status, body) = get_json(app(fixture_store()), "/").await;

    assert_eq!(status, StatusCode::OK);
    let routes = body["routes"].as_array().unwrap();
    assert!(routes.contains(&json!("/api/v1.0/precipitation")));
    assert!(routes.contains(&json!("/api/v1.0/<start>/<end>")));
}

#[tokio::test]
async fn health_is_ok() {
    let response = app(UnavailableStore)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn precipitation_collapses_shared_dates() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "2016-08-23": 1.79,
            "2016-08-24": null,
            "2016-12-31": 0.2,
            "2017-01-01": 0.0,
        })
    );
}

#[tokio::test]
async fn precipitation_keys_are_after_cutoff() {
    let (_, body) = get_json(app(fixture_store()), "/api/v1.0/precipitation").await;

    for key in body.as_object().unwrap().keys() {
        assert!(key.as_str() >= "2016-08-23", "unexpected date {key}");
    }
}

#[tokio::test]
async fn stations_lists_every_station() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let stations = body.as_array().unwrap();
    assert_eq!(stations.len(), 3);

    for s in stations {
        let obj = s.as_object().unwrap();
        for field in ["station", "name", "latitude", "longitude", "elevation"] {
            assert!(obj.contains_key(field), "missing {field}");
        }
    }

    let ids: Vec<_> = stations.iter().map(|s| s["station"].clone()).collect();
    assert_eq!(
        ids,
        vec![json!("USC00513117"), json!("USC00519281"), json!("USC00519397")]
    );
}

#[tokio::test]
async fn tobs_reports_only_active_station() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"Date": "2016-08-23", "Temp": 77.0},
            {"Date": "2016-08-24", "Temp": 77.0},
            {"Date": "2016-12-31", "Temp": 87.0},
            {"Date": "2017-01-01", "Temp": 62.0},
        ])
    );
}

#[tokio::test]
async fn tobs_uses_configured_station() {
    let query = QueryConfig {
        active_station: "USC00519397".into(),
        ..QueryConfig::default()
    };
    let app = create_router(
        AppState::new(fixture_store(), query),
        Duration::from_secs(5),
    );

    let (_, body) = get_json(app, "/api/v1.0/tobs").await;
    assert_eq!(body, json!([{"Date": "2016-08-23", "Temp": 81.0}]));
}

// ---------------------------------------------------------------------------
// Date summaries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_summary_aggregates_onwards() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/20161231").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"Minimum Temp": 62.0, "Maximum Temp": 87.0, "Average Temp": 74.5})
    );
}

#[tokio::test]
async fn start_end_summary_is_inclusive() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/20160101/20161231").await;

    assert_eq!(status, StatusCode::OK);
    // 58, 74, 76, 81, 77, 76, 77, 87
    assert_eq!(
        body,
        json!({"Minimum Temp": 58.0, "Maximum Temp": 87.0, "Average Temp": 75.75})
    );
}

#[tokio::test]
async fn summary_serializes_known_aggregates_exactly() {
    let store = FixedSummaryStore(TemperatureSummary {
        minimum: Some(58.0),
        maximum: Some(87.0),
        average: Some(73.138_461),
    });

    let response = app(store)
        .oneshot(
            Request::builder()
                .uri("/api/v1.0/20160101/20161231")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"{"Minimum Temp":58.0,"Maximum Temp":87.0,"Average Temp":73.14}"#
    );
}

#[tokio::test]
async fn future_start_gives_null_aggregates() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/20300101").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"Minimum Temp": null, "Maximum Temp": null, "Average Temp": null})
    );
}

#[tokio::test]
async fn reversed_range_gives_null_aggregates() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/20161231/20160101").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"Minimum Temp": null, "Maximum Temp": null, "Average Temp": null})
    );
}

#[tokio::test]
async fn malformed_start_date_is_404() {
    for uri in [
        "/api/v1.0/99999999",
        "/api/v1.0/2016-08-23",
        "/api/v1.0/201608",
        "/api/v1.0/abcdefgh",
        "/api/v1.0/20170229",
        "/api/v1.0/%FF",
        "/api/v1.0/%FF%FE",
    ] {
        let (status, body) = get_json(app(fixture_store()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"error": START_MESSAGE}), "{uri}");
    }
}

#[tokio::test]
async fn malformed_range_date_is_404() {
    for uri in [
        "/api/v1.0/20160101/2016123",
        "/api/v1.0/2016011/20161231",
        "/api/v1.0/20160101/20161332",
        "/api/v1.0/stations/tobs",
        "/api/v1.0/20160101/%FF",
        "/api/v1.0/%FF/20161231",
    ] {
        let (status, body) = get_json(app(fixture_store()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"error": RANGE_MESSAGE}), "{uri}");
    }
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (status, body) = get_json(app(fixture_store()), "/api/v1.0/a/b/c").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

// ---------------------------------------------------------------------------
// Data source failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_is_500() {
    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/20160101",
        "/api/v1.0/20160101/20161231",
    ] {
        let (status, body) = get_json(app(UnavailableStore), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(
            body,
            json!({"error": "database not found: hawaii.sqlite"}),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn bad_date_wins_over_store_failure() {
    let (status, body) = get_json(app(UnavailableStore), "/api/v1.0/not-a-date").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": START_MESSAGE}));
}

#[tokio::test]
async fn slow_query_times_out() {
    let app = create_router(
        AppState::new(SlowStore, QueryConfig::default()),
        Duration::from_millis(10),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1.0/20160101")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}
