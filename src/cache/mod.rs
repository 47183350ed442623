use crate::redis_client::RedisClient;
use redis::AsyncCommands;
use tracing::warn;

pub mod showtimes;

/// Кэш поверх Redis. Без Redis все чтения - промах, все записи - no-op:
/// кэш только ускоряет ответы и никогда не ломает их.
#[derive(Clone)]
pub struct CacheService {
    redis: Option<RedisClient>,
    ttl_seconds: u64,
}

impl CacheService {
    pub fn new(redis: Option<RedisClient>, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }

    pub fn disabled() -> Self {
        Self::new(None, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.redis.is_some() && self.ttl_seconds > 0
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        let redis = self.redis.as_ref()?;
        let mut conn = redis.conn.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str) {
        let Some(redis) = self.redis.as_ref() else {
            return;
        };
        if self.ttl_seconds == 0 {
            return;
        }
        let mut conn = redis.conn.clone();
        if let Err(e) = conn.set_ex::<_, _, ()>(key, value, self.ttl_seconds).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}
