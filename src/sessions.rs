use std::collections::HashMap;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("сессия не найдена")]
    NotFound,
    /// Сессию уже отправляют во внешний сервис.
    #[error("сессия занята: предыдущая операция ещё не завершена")]
    Busy,
}

struct Entry<T> {
    value: T,
    last_touched: Instant,
    claimed: bool,
}

/// Сессии в памяти процесса. Каждое обращение продлевает жизнь сессии,
/// `sweep` убирает те, что простаивали дольше `idle`.
///
/// `claim` помечает сессию как занятую на время внешнего вызова: до
/// `release_with` или `finish` её нельзя ни менять, ни удалить.
pub struct SessionStore<T> {
    entries: RwLock<HashMap<Uuid, Entry<T>>>,
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone> SessionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, id: Uuid, value: T) {
        self.entries.write().await.insert(
            id,
            Entry {
                value,
                last_touched: Instant::now(),
                claimed: false,
            },
        );
    }

    /// Копия сессии. Чтение разрешено и у занятой сессии.
    pub async fn get(&self, id: Uuid) -> Option<T> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id)?;
        entry.last_touched = Instant::now();
        Some(entry.value.clone())
    }

    /// Меняет сессию под блокировкой и возвращает результат `f`.
    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, SessionError> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(SessionError::NotFound)?;
        if entry.claimed {
            return Err(SessionError::Busy);
        }
        entry.last_touched = Instant::now();
        Ok(f(&mut entry.value))
    }

    /// Занимает сессию, если `f` вернул `Ok`. Проверка и захват идут под
    /// одной блокировкой, так что второй захват получит `Busy`.
    pub async fn claim<R, E>(
        &self,
        id: Uuid,
        f: impl FnOnce(&T) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<SessionError>,
    {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(SessionError::NotFound)?;
        if entry.claimed {
            return Err(SessionError::Busy.into());
        }
        entry.last_touched = Instant::now();
        let result = f(&entry.value)?;
        entry.claimed = true;
        Ok(result)
    }

    /// Снимает захват и сразу применяет `f`, не давая вклиниться чужой правке.
    pub async fn release_with<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, SessionError> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(SessionError::NotFound)?;
        entry.claimed = false;
        entry.last_touched = Instant::now();
        Ok(f(&mut entry.value))
    }

    pub async fn release(&self, id: Uuid) -> bool {
        self.release_with(id, |_| ()).await.is_ok()
    }

    /// Удаляет сессию после завершённой операции, даже занятую.
    pub async fn finish(&self, id: Uuid) -> Option<T> {
        self.entries.write().await.remove(&id).map(|e| e.value)
    }

    pub async fn remove(&self, id: Uuid) -> Result<T, SessionError> {
        let mut entries = self.entries.write().await;
        if entries.get(&id).ok_or(SessionError::NotFound)?.claimed {
            return Err(SessionError::Busy);
        }
        entries
            .remove(&id)
            .map(|e| e.value)
            .ok_or(SessionError::NotFound)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Удаляет простаивающие сессии, возвращает их число. Занятые не трогает.
    pub async fn sweep(&self, idle: Duration) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.claimed || e.last_touched.elapsed() < idle);
        before - entries.len()
    }
}
