//! Integration tests for the OpenWeather client against a mock HTTP server.

use widget_core::{FetchError, LocationSelector, OpenWeatherClient, UnitSystem, WeatherSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

fn sample_response() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "weather": [{ "main": "Clear", "id": 800 }],
        "main": { "temp": 21.9 }
    })
}

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url(server.uri())
}

#[tokio::test]
async fn success_maps_the_response_into_a_reading() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .mount(&server)
        .await;

    let reading = client_for(&server)
        .fetch_reading(
            &LocationSelector::ByName("Paris".to_string()),
            UnitSystem::Metric,
            "KEY",
        )
        .await
        .expect("fetch should succeed");

    assert_eq!(reading.city_display_name, "Paris");
    assert_eq!(reading.condition_main, "Clear");
    assert_eq!(reading.condition_code, 800);
    assert_eq!(reading.temperature, 21, "21.9 truncates to 21");
}

#[tokio::test]
async fn by_name_lookup_sends_q_and_never_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Rome"))
        .and(query_param_is_missing("id"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_reading(
            &LocationSelector::ByName("Rome".to_string()),
            UnitSystem::Metric,
            "KEY",
        )
        .await;

    assert!(result.is_ok(), "expected success, got: {result:?}");
}

#[tokio::test]
async fn by_id_lookup_sends_id_and_never_q() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("id", "3169070"))
        .and(query_param_is_missing("q"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_reading(
            &LocationSelector::ById("3169070".to_string()),
            UnitSystem::Imperial,
            "KEY",
        )
        .await;

    assert!(result.is_ok(), "expected success, got: {result:?}");
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_reading(
            &LocationSelector::ByName("Rome".to_string()),
            UnitSystem::Metric,
            "BAD",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { .. }), "got: {err:?}");
}

#[tokio::test]
async fn body_without_expected_fields_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": "200" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_reading(
            &LocationSelector::ByName("Rome".to_string()),
            UnitSystem::Metric,
            "KEY",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Malformed(_)), "got: {err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Nothing listens here.
    let client = OpenWeatherClient::with_base_url("http://127.0.0.1:1".to_string());

    let err = client
        .fetch_reading(
            &LocationSelector::ByName("Rome".to_string()),
            UnitSystem::Metric,
            "KEY",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)), "got: {err:?}");
}
