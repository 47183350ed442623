use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Заголовок, в котором шлюз передаёт идентификатор вошедшего пользователя.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Пользователь, если он есть. Клики анонима обрабатываются на уровне
/// сессии выбора, поэтому здесь отсутствие заголовка не ошибка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeUser(pub Option<i64>);

// отсутствующий и битый заголовок одинаково означают анонима
fn user_id(parts: &Parts) -> Option<i64> {
    parts
        .headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(user_id(parts)))
    }
}
