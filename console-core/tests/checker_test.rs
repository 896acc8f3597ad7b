use console_core::{Availability, AvailabilityCheck, AvailabilityClient, config::ServerConfig};
use httpmock::prelude::*;
use std::time::Duration;

fn client_for(server: &MockServer, timeout_ms: Option<u64>) -> AvailabilityClient {
    AvailabilityClient::new(&ServerConfig {
        hostname: server.host(),
        port: server.port(),
        timeout_ms,
    })
    .unwrap()
}

#[tokio::test]
async fn test_available_console() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/availability/ps5");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"available": true, "console": "ps5"}));
    });

    let availability = client_for(&server, None).check("ps5").await;

    mock.assert();
    assert_eq!(availability, Availability::new(true, "ps5"));
    assert_eq!(availability.to_string(), "console: ps5, availability: true");
}

#[tokio::test]
async fn test_server_error_falls_back_to_unavailable() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/availability/xbox");
        then.status(500);
    });

    let availability = client_for(&server, None).check("xbox").await;

    mock.assert();
    assert_eq!(availability, Availability::unavailable("xbox"));
    assert_eq!(availability.to_string(), "console: xbox, availability: false");
}

#[tokio::test]
async fn test_result_keeps_queried_console_name() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/availability/ps5");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"available": true, "console": "xbox"}));
    });

    let client = client_for(&server, None);
    let availability = client.check("ps5").await;

    mock.assert();
    assert_eq!(availability, Availability::new(true, "ps5"));
    assert_eq!(availability.to_string(), "console: ps5, availability: true");
    assert_eq!(client.try_check("ps5").await.unwrap().console, "ps5");
}

#[tokio::test]
async fn test_error_status_ignores_response_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/availability/ps4");
        then.status(404)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"available": true, "console": "something-else"}));
    });

    let availability = client_for(&server, None).check("ps4").await;

    assert_eq!(availability, Availability::unavailable("ps4"));
}

#[tokio::test]
async fn test_malformed_body_falls_back_to_unavailable() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/availability/switch");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"available\": tru");
    });

    let availability = client_for(&server, None).check("switch").await;

    mock.assert();
    assert_eq!(availability, Availability::unavailable("switch"));
}

#[tokio::test]
async fn test_wrong_shape_falls_back_to_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/availability/switch");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"in_stock": true}));
    });

    let availability = client_for(&server, None).check("switch").await;

    assert_eq!(availability, Availability::unavailable("switch"));
}

#[tokio::test]
async fn test_connection_refused_falls_back_to_unavailable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = AvailabilityClient::new(&ServerConfig {
        hostname: "127.0.0.1".to_string(),
        port,
        timeout_ms: None,
    })
    .unwrap();

    let availability = client.check("ps5").await;

    assert_eq!(availability, Availability::unavailable("ps5"));
    assert!(client.try_check("ps5").await.is_err());
}

#[tokio::test]
async fn test_configured_timeout_falls_back_to_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/availability/ps5");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(serde_json::json!({"available": true, "console": "ps5"}));
    });

    let availability = client_for(&server, Some(50)).check("ps5").await;

    assert_eq!(availability, Availability::unavailable("ps5"));
}
