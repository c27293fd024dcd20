use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use stargazer_core::{ApodQuery, FeedRequest, MarsDate, MarsPhotosQuery, NeoFeedQuery};
use stargazer_engine::{FailureKind, Gateway, GatewaySettings, ReqwestGateway};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "TEST_KEY";

fn gateway(server: &MockServer) -> ReqwestGateway {
    ReqwestGateway::new(GatewaySettings {
        base_url: server.uri(),
        api_key: KEY.to_string(),
        ..GatewaySettings::default()
    })
    .expect("client builds")
}

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

async fn only_query(server: &MockServer) -> HashMap<String, String> {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].url.query_pairs().into_owned().collect()
}

#[tokio::test]
async fn apod_without_date_omits_parameter() {
    let server = MockServer::start().await;
    let body = json!({ "url": "https://apod.nasa.gov/a.jpg", "title": "T", "explanation": "E" });
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .and(query_param("api_key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let data = gateway(&server)
        .fetch_apod(&ApodQuery { date: None })
        .await
        .expect("fetch ok");

    assert_eq!(data, body);
    let query = only_query(&server).await;
    assert_eq!(query.get("api_key").map(String::as_str), Some(KEY));
    assert!(!query.contains_key("date"));
}

#[tokio::test]
async fn apod_with_date_sends_iso_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .and(query_param("date", "2024-01-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "date": "2024-01-05" })))
        .mount(&server)
        .await;

    let data = gateway(&server)
        .fetch(&FeedRequest::Apod(ApodQuery {
            date: Some(day("2024-01-05")),
        }))
        .await
        .expect("fetch ok");
    assert_eq!(data["date"], "2024-01-05");
}

#[tokio::test]
async fn neo_feed_sends_both_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-01-07"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "near_earth_objects": {} })),
        )
        .mount(&server)
        .await;

    gateway(&server)
        .fetch_neo_feed(&NeoFeedQuery {
            start_date: day("2024-01-01"),
            end_date: day("2024-01-07"),
        })
        .await
        .expect("fetch ok");

    let query = only_query(&server).await;
    assert_eq!(query.len(), 3);
}

#[tokio::test]
async fn mars_photos_by_sol_with_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/curiosity/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "photos": [] })))
        .mount(&server)
        .await;

    gateway(&server)
        .fetch_mars_photos(&MarsPhotosQuery {
            selector: MarsDate::Sol(1000),
            page: Some(2),
        })
        .await
        .expect("fetch ok");

    let query = only_query(&server).await;
    assert_eq!(query.get("sol").map(String::as_str), Some("1000"));
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert!(!query.contains_key("earth_date"));
}

#[tokio::test]
async fn mars_photos_by_earth_date_on_configured_rover() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/perseverance/photos"))
        .and(query_param("earth_date", "2021-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "photos": [] })))
        .mount(&server)
        .await;

    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url: server.uri(),
        rover: "perseverance".to_string(),
        ..GatewaySettings::default()
    })
    .unwrap();
    gateway
        .fetch_mars_photos(&MarsPhotosQuery {
            selector: MarsDate::EarthDate(day("2021-03-01")),
            page: None,
        })
        .await
        .expect("fetch ok");

    let query = only_query(&server).await;
    assert!(!query.contains_key("page"));
    assert!(!query.contains_key("sol"));
}

#[tokio::test]
async fn rate_limit_forwards_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": "OVER_RATE_LIMIT",
                "message": "You have exceeded your rate limit. Try again later."
            }
        })))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .fetch_apod(&ApodQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(429));
    assert_eq!(
        err.message,
        "You have exceeded your rate limit. Try again later."
    );
}

#[tokio::test]
async fn status_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .fetch_apod(&ApodQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.to_string(), "Request failed with status code 503");
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .fetch_apod(&ApodQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url: server.uri(),
        api_key: KEY.into(),
        request_timeout: Duration::from_millis(50),
        ..GatewaySettings::default()
    })
    .unwrap();
    let err = gateway.fetch_apod(&ApodQuery::default()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert!(!err.message.contains(KEY), "key leaked: {}", err.message);
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url: format!("http://127.0.0.1:{port}"),
        api_key: KEY.into(),
        ..GatewaySettings::default()
    })
    .unwrap();
    let err = gateway.fetch_apod(&ApodQuery::default()).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
    assert!(!err.message.contains(KEY), "key leaked: {}", err.message);
}
