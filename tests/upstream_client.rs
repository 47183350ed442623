mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cinema_seating::models::{OrderRequest, SeatStatus};
use cinema_seating::services::{CircuitState, UpstreamClient, UpstreamError};
use common::{config_for, schedule_detail_json, seat_json};

fn client_for(server: &MockServer) -> UpstreamClient {
    let config = config_for(server);
    UpstreamClient::from_config(&config.upstream, &config.circuit_breaker).unwrap()
}

#[tokio::test]
async fn schedule_detail_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schedules/42/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_detail_json(
            "MEDIUM",
            1,
            vec![seat_json(5, "A", 1, "normal", "LOCKED", 35.0)],
        )))
        .mount(&server)
        .await;

    let detail = client_for(&server).get_schedule_detail(42).await.unwrap();
    assert_eq!(detail.movie.title, "Солярис");
    assert_eq!(detail.seats[0].status, SeatStatus::Locked);
    assert_eq!(detail.seats[0].seat_type.as_str(), "STANDARD");
}

#[tokio::test]
async fn server_errors_open_the_circuit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    let client = client_for(&server);
    let order = OrderRequest {
        user_id: 1,
        seat_showing_ids: vec![3],
        total_amount: 35.0,
    };

    for _ in 0..2 {
        assert!(matches!(
            client.create_order(&order).await,
            Err(UpstreamError::Status { status: 503, .. })
        ));
    }
    assert_eq!(client.circuit_state(), CircuitState::Open);
    assert!(matches!(
        client.create_order(&order).await,
        Err(UpstreamError::CircuitOpen)
    ));
}

#[tokio::test]
async fn client_errors_do_not_trip_the_circuit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schedules/movie/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such movie"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    for _ in 0..3 {
        match client.get_schedules_by_movie(7).await {
            Err(UpstreamError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such movie");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
    assert_eq!(client.circuit_state(), CircuitState::Closed);
}

#[tokio::test]
async fn empty_admin_response_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/hall/3/seats/bulk-set-type"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .bulk_set_seat_type(3, cinema_seating::models::TemplateSeatType::Vip)
        .await
        .unwrap();
    assert_eq!(result, json!(null));
}
