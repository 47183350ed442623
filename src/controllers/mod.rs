pub mod hall_templates;
pub mod halls;
pub mod schedules;
pub mod selections;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(schedules::routes())
        .merge(selections::routes())
        .merge(hall_templates::routes())
        .merge(halls::routes())
}
