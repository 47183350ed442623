use serde::{Deserialize, Serialize};

/// Заказ, который уходит в сервис заказов после подтверждения выбора.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: i64,
    // контракт сервиса заказов называет список идентификаторов `ssIds`
    #[serde(rename = "ssIds")]
    pub seat_showing_ids: Vec<i64>,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub schedule_id: Option<i64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}
