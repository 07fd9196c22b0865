//! Integration tests for OpenMeteoService using wiremock.
//!
//! These tests verify request shape and response handling against a mock HTTP server.

use weatherism_core::{Endpoints, LookupError, OpenMeteoService, WeatherService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> OpenMeteoService {
    OpenMeteoService::new(&Endpoints { geocoding: server.uri(), forecast: server.uri() })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "timezone": "Europe/London",
        "current_units": { "temperature_2m": "°C" },
        "current": {
            "time": "2024-01-01T12:00",
            "interval": 900,
            "temperature_2m": 22.5,
            "relative_humidity_2m": 65,
            "apparent_temperature": 24.0,
            "wind_speed_10m": 10.5,
            "wind_direction_10m": 180.0,
            "weather_code": 0
        },
        "daily": {
            "time": ["2024-01-01", "2024-01-02", "2024-01-03"],
            "temperature_2m_max": [25.0, 24.1, 19.8],
            "temperature_2m_min": [18.0, 17.2, 12.5]
        },
        "hourly": {
            "time": ["2024-01-01T12:00", "2024-01-01T13:00"],
            "temperature_2m": [22.5, 23.1]
        }
    })
}

#[tokio::test]
async fn test_resolve_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "New York"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "id": 5128581,
                "name": "New York",
                "latitude": 40.71427,
                "longitude": -74.00597,
                "country": "United States",
                "country_code": "US",
                "timezone": "America/New_York"
            }],
            "generationtime_ms": 0.5
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let location = service_for(&mock_server).resolve("New York").await.unwrap();

    assert_eq!(location.name, "New York");
    assert_eq!(location.country, "United States");
    assert_eq!(location.country_code, "US");
    assert_eq!(location.latitude, 40.71427);
    assert_eq!(location.longitude, -74.00597);
}

#[tokio::test]
async fn test_resolve_empty_results_is_city_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
        )
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).resolve("ThisCityDoesNotExistXYZ123").await.unwrap_err();

    assert!(matches!(err, LookupError::CityNotFound));
}

#[tokio::test]
async fn test_resolve_absent_results_is_city_not_found() {
    let mock_server = MockServer::start().await;

    // Open-Meteo omits `results` entirely when nothing matches.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generationtime_ms": 0.3 })),
        )
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).resolve("Nowhere").await.unwrap_err();
    assert!(matches!(err, LookupError::CityNotFound));
}

#[tokio::test]
async fn test_resolve_null_results_is_city_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": null })),
        )
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).resolve("Nowhere").await.unwrap_err();
    assert!(matches!(err, LookupError::CityNotFound));
}

#[tokio::test]
async fn test_resolve_empty_body_is_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).resolve("London").await.unwrap_err();
    assert!(matches!(err, LookupError::NoData));
    assert_eq!(err.to_string(), "No data received");
}

#[tokio::test]
async fn test_resolve_garbage_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).resolve("London").await.unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn test_server_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).resolve("London").await.unwrap_err();

    match err {
        LookupError::Status { status, ref body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_sends_expected_query_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "51.5074"))
        .and(query_param("longitude", "-0.1278"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,wind_speed_10m,wind_direction_10m,weather_code",
        ))
        .and(query_param("daily", "temperature_2m_max,temperature_2m_min"))
        .and(query_param("hourly", "temperature_2m"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bundle = service_for(&mock_server).fetch(51.5074, -0.1278).await.unwrap();

    assert_eq!(bundle.current.temperature_c, 22.5);
    assert_eq!(bundle.current.relative_humidity_pct, 65);
    assert_eq!(bundle.current.weather_code, 0);
    assert_eq!(bundle.daily.time.len(), bundle.daily.max_temperature_c.len());
    assert_eq!(bundle.daily.time.len(), bundle.daily.min_temperature_c.len());
    assert_eq!(bundle.hourly.time.len(), bundle.hourly.temperature_c.len());
    assert_eq!(bundle.daily.today(), Some(("2024-01-01", 25.0, 18.0)));
}

#[tokio::test]
async fn test_fetch_missing_field_fails_atomically() {
    let mock_server = MockServer::start().await;

    let mut body = forecast_body();
    body.as_object_mut().unwrap().remove("hourly");

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).fetch(0.0, 0.0).await.unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
    assert!(err.to_string().contains("hourly"));
}

#[tokio::test]
async fn test_fetch_type_mismatch_fails() {
    let mock_server = MockServer::start().await;

    let mut body = forecast_body();
    body["current"]["weather_code"] = serde_json::json!("sunny");

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).fetch(0.0, 0.0).await.unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_misaligned_series_is_rejected() {
    let mock_server = MockServer::start().await;

    let mut body = forecast_body();
    body["daily"]["temperature_2m_min"] = serde_json::json!([18.0]);

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let err = service_for(&mock_server).fetch(0.0, 0.0).await.unwrap_err();
    assert!(matches!(err, LookupError::MalformedForecast(_)));
}
