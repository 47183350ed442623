//! Клиент бэкенда кинотеатра: сеансы, заказы и администрирование залов.
//!
//! Все вызовы идут через `CircuitBreaker`. Повторов нет: заказ не
//! идемпотентен, а на чтении клиент сам попросит обновить схему.

use std::future::Future;
use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, info, warn};

use super::circuit_breaker::{CircuitBreaker, CircuitState};
use crate::config::{CircuitBreakerConfig, UpstreamConfig};
use crate::editor::CreateHallRequest;
use crate::models::{CreatedOrder, OrderRequest, ScheduleDetail, ScheduleListing, TemplateSeatType};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("сервис кинотеатра временно недоступен")]
    CircuitOpen,
    #[error("ошибка связи с сервисом кинотеатра: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("сервис кинотеатра ответил {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Clone)]
pub struct UpstreamClient {
    base_url: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl UpstreamClient {
    pub fn from_config(
        upstream: &UpstreamConfig,
        breaker: &CircuitBreakerConfig,
    ) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .timeout(upstream.timeout())
            .build()?;

        Ok(Self {
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            http_client,
            circuit_breaker: Arc::new(CircuitBreaker::new(
                breaker.failure_threshold,
                breaker.timeout(),
            )),
        })
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Пропускает запрос через выключатель. Сбоем считаются ошибки сети
    /// и ответы 5xx; 4xx означают, что сервис жив.
    async fn execute<F, T>(&self, operation: F) -> Result<T, UpstreamError>
    where
        F: Future<Output = Result<T, UpstreamError>>,
    {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking cinema API request");
            return Err(UpstreamError::CircuitOpen);
        }

        match operation.await {
            Ok(result) => {
                self.circuit_breaker.record_success();
                Ok(result)
            }
            Err(UpstreamError::Status { status, body }) if status < 500 => {
                self.circuit_breaker.record_success();
                Err(UpstreamError::Status { status, body })
            }
            Err(e) => {
                error!("Cinema API request failed: {}", e);
                self.circuit_breaker.record_failure();
                Err(e)
            }
        }
    }

    async fn check(response: Response) -> Result<Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
        Ok(Self::check(response).await?.json::<T>().await?)
    }

    pub async fn get_schedule_detail(&self, schedule_id: i64) -> Result<ScheduleDetail, UpstreamError> {
        info!("Fetching schedule detail: schedule_id={}", schedule_id);
        self.execute(async {
            let response = self
                .http_client
                .get(self.url(&format!("/schedules/{}/detail", schedule_id)))
                .send()
                .await?;
            Self::decode(response).await
        })
        .await
    }

    pub async fn get_schedules_by_movie(&self, movie_id: i64) -> Result<ScheduleListing, UpstreamError> {
        info!("Fetching schedules: movie_id={}", movie_id);
        self.execute(async {
            let response = self
                .http_client
                .get(self.url(&format!("/schedules/movie/{}", movie_id)))
                .send()
                .await?;
            Self::decode(response).await
        })
        .await
    }

    pub async fn create_order(&self, order: &OrderRequest) -> Result<CreatedOrder, UpstreamError> {
        info!(
            "Creating order: user_id={}, seats={}, total={}",
            order.user_id,
            order.seat_showing_ids.len(),
            order.total_amount
        );
        self.execute(async {
            let response = self
                .http_client
                .post(self.url("/orders"))
                .json(order)
                .send()
                .await?;
            Self::decode(response).await
        })
        .await
    }

    /// Создаёт зал вместе с местами. Тело ответа бэкенд не документирует,
    /// поэтому оно возвращается как есть.
    pub async fn create_hall_with_seats(
        &self,
        request: &CreateHallRequest,
    ) -> Result<serde_json::Value, UpstreamError> {
        info!(
            "Creating hall '{}' ({}): {} seats",
            request.name,
            request.hall_type,
            request.seats.len()
        );
        self.execute(async {
            let response = self
                .http_client
                .post(self.url("/hall/with-seats"))
                .json(request)
                .send()
                .await?;
            Self::json_or_null(response).await
        })
        .await
    }

    /// Меняет тип всех мест уже созданного зала.
    pub async fn bulk_set_seat_type(
        &self,
        hall_id: i64,
        seat_type: TemplateSeatType,
    ) -> Result<serde_json::Value, UpstreamError> {
        info!("Bulk setting seat type {} for hall {}", seat_type.as_str(), hall_id);
        self.execute(async {
            let response = self
                .http_client
                .put(self.url(&format!("/hall/{}/seats/bulk-set-type", hall_id)))
                .query(&[("seatType", seat_type.as_str())])
                .send()
                .await?;
            Self::json_or_null(response).await
        })
        .await
    }

    async fn json_or_null(response: Response) -> Result<serde_json::Value, UpstreamError> {
        let response = Self::check(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(serde_json::Value::Null);
        }
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}
