use std::sync::Arc;
use tracing::{debug, info};

use crate::AppState;

/// Фоновая уборка простаивающих сессий выбора мест и редактора залов.
pub struct CleanupService {
    state: Arc<AppState>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupStats {
    pub selections: usize,
    pub templates: usize,
}

impl CleanupStats {
    pub fn total(&self) -> usize {
        self.selections + self.templates
    }
}

impl CleanupService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Один проход уборки.
    pub async fn run_once(&self) -> CleanupStats {
        let idle = self.state.config.sessions.idle_timeout();
        let stats = CleanupStats {
            selections: self.state.selections.sweep(idle).await,
            templates: self.state.templates.sweep(idle).await,
        };

        if stats.total() > 0 {
            info!(
                "🧹 Dropped {} idle selection sessions, {} idle hall templates",
                stats.selections, stats.templates
            );
        } else {
            debug!("🧹 No idle sessions to drop");
        }
        stats
    }

    /// Бесконечный цикл уборки; запускается из `main` через `tokio::spawn`.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.state.config.sessions.sweep_interval());
        // первый тик срабатывает сразу
        ticker.tick().await;
        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }
}
