use serde::Serialize;

use super::SelectionSet;
use crate::layout::{self, LegendEntry, SeatVisual};
use crate::models::{HallType, ScheduleDetail, SeatStatus, SeatType};

/// Схема зала для отрисовки: ряды, места, проходы, легенда и сумма выбора.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    pub schedule_id: i64,
    pub movie_title: String,
    pub hall_name: String,
    pub hall_type: HallType,
    pub col_count: u32,
    pub icon_size: u32,
    pub aisle_positions: Vec<u32>,
    pub rows: Vec<SeatRow>,
    pub legend: Vec<LegendEntry>,
    pub selected_ss_ids: Vec<i64>,
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRow {
    pub label: String,
    pub seats: Vec<SeatCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatCell {
    pub ss_id: i64,
    pub col_num: u32,
    pub seat_type: SeatType,
    /// Статус с учётом локального выбора (`SELECTED`).
    pub status: SeatStatus,
    pub price: f64,
    pub visual: SeatVisual,
    pub aisle_after: bool,
}

impl SeatMap {
    pub fn build(detail: &ScheduleDetail, selection: &SelectionSet) -> Self {
        let hall_type = detail.hall.hall_type;
        let aisles = layout::static_aisle_positions(hall_type, detail.hall.col_count);

        let mut labels: Vec<&str> = detail.seats.iter().map(|s| s.row_label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();

        let rows = labels
            .into_iter()
            .map(|label| {
                let mut row_seats: Vec<_> =
                    detail.seats.iter().filter(|s| s.row_label == label).collect();
                row_seats.sort_by_key(|s| s.col_num);

                let seats = row_seats
                    .into_iter()
                    .enumerate()
                    .map(|(index, seat)| {
                        let selected = selection.contains(seat.ss_id);
                        SeatCell {
                            ss_id: seat.ss_id,
                            col_num: seat.col_num,
                            seat_type: seat.seat_type.clone(),
                            status: if selected { SeatStatus::Selected } else { seat.status },
                            price: seat.price,
                            visual: layout::seat_visual(hall_type, seat, selected),
                            // проход считается по позиции в ряду, а не по номеру места
                            aisle_after: layout::has_aisle_after(aisles, index as u32 + 1),
                        }
                    })
                    .collect();

                SeatRow {
                    label: label.to_string(),
                    seats,
                }
            })
            .collect();

        SeatMap {
            schedule_id: detail.schedule.schedule_id,
            movie_title: detail.movie.title.clone(),
            hall_name: detail.hall.name.clone(),
            hall_type,
            col_count: detail.hall.col_count,
            icon_size: layout::icon_size(hall_type),
            aisle_positions: aisles.to_vec(),
            rows,
            legend: layout::legend(hall_type),
            selected_ss_ids: selection.ss_ids(),
            total_price: selection.total_price(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Hall, Movie, Schedule, Seat};
    use crate::selection::tests::seat;

    pub(crate) fn detail(hall_type: HallType, col_count: u32, seats: Vec<Seat>) -> ScheduleDetail {
        ScheduleDetail {
            schedule: Schedule {
                schedule_id: 42,
                movie_id: Some(7),
                hall_id: 3,
                start_time: "2025-03-14T19:30:00".into(),
                end_time: "2025-03-14T21:30:00".into(),
                base_price: 35.0,
                vip_price: 50.0,
                lover_price: 80.0,
                hall_name: None,
                hall_type: None,
            },
            movie: Movie {
                movie_id: 7,
                title: "Солярис".into(),
                english_title: Some("Solaris".into()),
                genres: None,
                duration: Some(167),
                poster_url: None,
            },
            hall: Hall {
                hall_id: 3,
                name: "Зал 3".into(),
                hall_type,
                row_count: 2,
                col_count,
                row_labels: "AB".into(),
                cinema_id: Some(1),
            },
            seats,
        }
    }

    #[test]
    fn rows_are_sorted_and_seats_ordered_by_column() {
        let seats = vec![
            seat(4, "B", 2, 35.0),
            seat(1, "A", 2, 35.0),
            seat(3, "B", 1, 35.0),
            seat(2, "A", 1, 35.0),
        ];
        let map = SeatMap::build(&detail(HallType::Small, 2, seats), &SelectionSet::new());

        let labels: Vec<_> = map.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        let cols: Vec<_> = map.rows[1].seats.iter().map(|c| c.col_num).collect();
        assert_eq!(cols, vec![1, 2]);
        assert!(map.aisle_positions.is_empty());
    }

    #[test]
    fn aisles_follow_position_in_row() {
        // в ряду нет места 3, поэтому проход после 5-го по счёту места (№6)
        let seats: Vec<_> = [1, 2, 4, 5, 6, 7, 8, 9, 10, 11]
            .into_iter()
            .map(|col| seat(col as i64, "A", col, 35.0))
            .collect();
        let map = SeatMap::build(&detail(HallType::Large, 25, seats), &SelectionSet::new());

        let after: Vec<_> = map.rows[0]
            .seats
            .iter()
            .filter(|c| c.aisle_after)
            .map(|c| c.col_num)
            .collect();
        assert_eq!(after, vec![6]);
        assert_eq!(map.aisle_positions, vec![5, 20]);
    }

    #[test]
    fn selected_seats_are_marked_and_summed() {
        let seats = vec![seat(1, "A", 1, 35.0), seat(2, "A", 2, 42.5)];
        let detail = detail(HallType::Medium, 2, seats);
        let mut selection = SelectionSet::new();
        selection.toggle_seat(&detail.seats[1], &detail.seats, HallType::Medium);

        let map = SeatMap::build(&detail, &selection);
        assert_eq!(map.rows[0].seats[1].status, SeatStatus::Selected);
        assert_eq!(map.rows[0].seats[0].status, SeatStatus::Available);
        assert_eq!(map.selected_ss_ids, vec![2]);
        assert_eq!(map.total_price, 42.5);
        assert_eq!(map.legend.len(), 4);
    }
}
