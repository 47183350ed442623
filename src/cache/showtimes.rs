use crate::cache::CacheService;
use crate::models::ScheduleListing;
use tracing::{debug, warn};

pub fn showtimes_key(movie_id: i64) -> String {
    format!("showtimes:movie:{}", movie_id)
}

impl CacheService {
    /// Список сеансов фильма из кэша. Битые записи считаются промахом.
    pub async fn get_cached_showtimes(&self, movie_id: i64) -> Option<ScheduleListing> {
        let key = showtimes_key(movie_id);
        let raw = self.get_raw(&key).await?;
        match serde_json::from_str(&raw) {
            Ok(listing) => {
                debug!("Cache HIT {}", key);
                Some(listing)
            }
            Err(e) => {
                warn!("Dropping unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    pub async fn cache_showtimes(&self, movie_id: i64, listing: &ScheduleListing) {
        match serde_json::to_string(listing) {
            Ok(raw) => self.set_raw(&showtimes_key(movie_id), &raw).await,
            Err(e) => warn!("Failed to serialize showtimes for movie {}: {}", movie_id, e),
        }
    }
}
