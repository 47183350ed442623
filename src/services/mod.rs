pub mod circuit_breaker;
pub mod cleanup;
pub mod upstream;

pub use circuit_breaker::{CircuitBreaker, CircuitState};
pub use cleanup::{CleanupService, CleanupStats};
pub use upstream::{UpstreamClient, UpstreamError};
