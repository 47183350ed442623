#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

use cinema_seating::{
    app, cache::CacheService, config::Config, services::UpstreamClient, AppState,
};

pub fn config_for(server: &MockServer) -> Config {
    let base_url = server.uri();
    Config::from_lookup(|name| match name {
        "CINEMA_API_URL" => Some(base_url.clone()),
        "CIRCUIT_BREAKER_FAILURE_THRESHOLD" => Some("2".into()),
        "UPSTREAM_TIMEOUT_SECONDS" => Some("2".into()),
        _ => None,
    })
    .expect("test config")
}

pub fn state_for(server: &MockServer) -> Arc<AppState> {
    let config = config_for(server);
    let upstream = UpstreamClient::from_config(&config.upstream, &config.circuit_breaker)
        .expect("http client");
    AppState::with_parts(config, upstream, CacheService::disabled())
}

pub struct TestApp {
    pub state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    pub fn new(server: &MockServer) -> Self {
        let state = state_for(server);
        let router = app(state.clone());
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header("x-user-id", id.to_string());
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }
}

pub fn seat_json(ss_id: i64, row: &str, col: u32, seat_type: &str, status: &str, price: f64) -> Value {
    json!({
        "ssId": ss_id,
        "rowLabel": row,
        "colNum": col,
        "seatType": seat_type,
        "status": status,
        "price": price,
        "userId": null,
        "lockTime": null
    })
}

pub fn schedule_detail_json(hall_type: &str, col_count: u32, seats: Vec<Value>) -> Value {
    json!({
        "schedule": {
            "scheduleId": 42,
            "movieId": 7,
            "hallId": 3,
            "startTime": "2025-03-14T19:30:00",
            "endTime": "2025-03-14T21:30:00",
            "basePrice": 35.0,
            "vipPrice": 50.0,
            "loverPrice": 80.0
        },
        "movie": {
            "movieId": 7,
            "title": "Солярис",
            "englishTitle": "Solaris",
            "duration": 167
        },
        "hall": {
            "hallId": 3,
            "name": "Зал 3",
            "type": hall_type,
            "rowCount": 1,
            "colCount": col_count,
            "rowLabels": "A",
            "cinemaId": 1
        },
        "seats": seats
    })
}
