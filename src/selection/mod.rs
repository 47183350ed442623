//! Выбор мест пользователем до оформления заказа.
//!
//! `SelectionSet` хранит выбранные места в порядке выбора, уникальные по
//! `ss_id`. Мутирует его только `toggle_seat`; итоговая сумма каждый раз
//! считается заново из набора.

pub mod seat_map;
pub mod session;

use thiserror::Error;

use crate::models::{HallType, OrderRequest, Seat, SeatStatus};

pub use seat_map::{SeatCell, SeatMap, SeatRow};
pub use session::SelectionSession;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// Клик без входа в систему: показываем окно входа, состояние не меняется.
    #[error("требуется вход в систему")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("место {0} не найдено в схеме сеанса")]
    UnknownSeat(i64),
    /// Сессию начал другой пользователь.
    #[error("сессия выбора принадлежит другому пользователю")]
    ForeignSession,
}

/// Что произошло с набором после клика.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Клик по проданному или заблокированному месту.
    Ignored,
    Selected(Vec<i64>),
    Deselected(Vec<i64>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    seats: Vec<Seat>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, ss_id: i64) -> bool {
        self.seats.iter().any(|s| s.ss_id == ss_id)
    }

    pub fn ss_ids(&self) -> Vec<i64> {
        self.seats.iter().map(|s| s.ss_id).collect()
    }

    pub fn total_price(&self) -> f64 {
        self.seats.iter().map(|s| s.price).sum()
    }

    fn insert(&mut self, seat: &Seat) -> bool {
        if self.contains(seat.ss_id) {
            return false;
        }
        self.seats.push(seat.clone());
        true
    }

    fn remove(&mut self, ss_id: i64) -> bool {
        let before = self.seats.len();
        self.seats.retain(|s| s.ss_id != ss_id);
        self.seats.len() != before
    }

    /// Оставляет только места, для которых `keep` вернул свежую копию.
    pub(crate) fn reconcile<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Seat) -> Option<Seat>,
    {
        self.seats = self.seats.iter().filter_map(|s| keep(s)).collect();
    }

    /// Переключает место в наборе.
    ///
    /// В обычном зале это простое добавление или удаление. В зале пар место
    /// выбирается вместе с соседним по паре (`Seat::paired_col`), если тот
    /// существует и не продан, а снятие выбора снимает оба места.
    /// `hall_seats` нужен, чтобы найти пару.
    pub fn toggle_seat(
        &mut self,
        seat: &Seat,
        hall_seats: &[Seat],
        hall_type: HallType,
    ) -> ToggleOutcome {
        if !seat.status.is_clickable() {
            return ToggleOutcome::Ignored;
        }

        if !hall_type.is_paired() {
            if self.remove(seat.ss_id) {
                return ToggleOutcome::Deselected(vec![seat.ss_id]);
            }
            self.insert(seat);
            return ToggleOutcome::Selected(vec![seat.ss_id]);
        }

        let pair = hall_seats.iter().find(|s| seat.is_pair_of(s));

        if self.contains(seat.ss_id) {
            let mut removed = Vec::with_capacity(2);
            if self.remove(seat.ss_id) {
                removed.push(seat.ss_id);
            }
            if let Some(pair) = pair {
                if self.remove(pair.ss_id) {
                    removed.push(pair.ss_id);
                }
            }
            return ToggleOutcome::Deselected(removed);
        }

        let mut added = vec![seat.ss_id];
        self.insert(seat);
        // проданная пара не мешает взять половину; заблокированная пара берётся
        if let Some(pair) = pair.filter(|p| p.status != SeatStatus::Occupied) {
            if self.insert(pair) {
                added.push(pair.ss_id);
            }
        }
        ToggleOutcome::Selected(added)
    }
}

/// Упаковывает выбор в заказ для сервиса заказов.
pub fn confirm_selection(
    selection: &SelectionSet,
    user_id: Option<i64>,
) -> Result<OrderRequest, SelectionError> {
    if selection.is_empty() {
        return Err(SelectionError::Validation("Выберите места".to_string()));
    }
    let user_id = user_id
        .ok_or_else(|| SelectionError::Validation("Сначала войдите в систему".to_string()))?;

    Ok(OrderRequest {
        user_id,
        seat_showing_ids: selection.ss_ids(),
        total_amount: selection.total_price(),
    })
}
