use uuid::Uuid;

use super::{confirm_selection, SeatMap, SelectionError, SelectionSet, ToggleOutcome};
use crate::models::{OrderRequest, ScheduleDetail, SeatStatus};

/// Одна сессия выбора мест: снимок сеанса и локальный набор выбора.
///
/// Снимок не обновляется сам: статусы `OCCUPIED`/`LOCKED` отражают последний
/// запрос к сервису мест, пока клиент явно не попросит `refresh`.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    pub id: Uuid,
    owner: Option<i64>,
    snapshot: ScheduleDetail,
    selection: SelectionSet,
}

impl SelectionSession {
    pub fn new(snapshot: ScheduleDetail) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: None,
            snapshot,
            selection: SelectionSet::new(),
        }
    }

    pub fn schedule_id(&self) -> i64 {
        self.snapshot.schedule.schedule_id
    }

    pub fn snapshot(&self) -> &ScheduleDetail {
        &self.snapshot
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn owner(&self) -> Option<i64> {
        self.owner
    }

    fn check_owner(&self, user_id: i64) -> Result<(), SelectionError> {
        match self.owner {
            Some(owner) if owner != user_id => Err(SelectionError::ForeignSession),
            _ => Ok(()),
        }
    }

    pub fn seat_map(&self) -> SeatMap {
        SeatMap::build(&self.snapshot, &self.selection)
    }

    /// Клик по месту. Без пользователя ничего не меняется.
    pub fn toggle(
        &mut self,
        ss_id: i64,
        user_id: Option<i64>,
    ) -> Result<ToggleOutcome, SelectionError> {
        let user_id = user_id.ok_or(SelectionError::Unauthorized)?;
        self.check_owner(user_id)?;
        let seat = self
            .snapshot
            .seat(ss_id)
            .ok_or(SelectionError::UnknownSeat(ss_id))?;

        let outcome = self
            .selection
            .toggle_seat(seat, &self.snapshot.seats, self.snapshot.hall.hall_type);
        self.owner = Some(user_id);
        Ok(outcome)
    }

    /// Заказ может оформить только владелец сессии.
    pub fn confirm(&self, user_id: Option<i64>) -> Result<OrderRequest, SelectionError> {
        let order = confirm_selection(&self.selection, user_id)?;
        self.check_owner(order.user_id)?;
        Ok(order)
    }

    /// Заменяет снимок свежим. Выбранные места, которые исчезли или перестали
    /// быть свободными, выпадают из выбора; цены берутся из нового снимка.
    /// Возвращает идентификаторы выпавших мест.
    pub fn refresh(&mut self, snapshot: ScheduleDetail) -> Vec<i64> {
        let mut dropped = Vec::new();
        self.selection.reconcile(|selected| {
            match snapshot.seat(selected.ss_id) {
                Some(fresh) if fresh.status == SeatStatus::Available => Some(fresh.clone()),
                _ => {
                    dropped.push(selected.ss_id);
                    None
                }
            }
        });
        self.snapshot = snapshot;
        dropped
    }
}
