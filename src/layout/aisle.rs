use serde::Serialize;

use crate::models::HallType;

/// Минимальное число колонок по краям зала.
pub const DEFAULT_MIN_SIDE: i32 = 2;

/// Ниже этой ширины схема зала рисуется без проходов.
pub const STATIC_AISLE_MIN_COLUMNS: u32 = 8;

/// Две границы, после которых вставляются проходы.
///
/// Правая граница может оказаться меньше левой (или даже отрицательной)
/// на очень узких залах: края тогда остаются на `min_side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AislePartition {
    pub left_boundary: i32,
    pub right_boundary: i32,
}

impl AislePartition {
    pub fn as_array(&self) -> [i32; 2] {
        [self.left_boundary, self.right_boundary]
    }

    /// Ширина центральной зоны между проходами.
    pub fn center_width(&self) -> i32 {
        self.right_boundary - self.left_boundary
    }
}

/// Динамическое разбиение колонок, которым пользуется редактор шаблона зала.
///
/// Края занимают пятую часть колонок, но не меньше `min_side`. Для зала пар
/// (`force_even`) ширина края чётная, чтобы парные места не разрезались
/// проходом. Если центр получается уже двух колонок, края сужаются, пока
/// не упрутся в `min_side`.
pub fn compute_aisle_positions(col_count: u32, min_side: i32, force_even: bool) -> AislePartition {
    let col_count = col_count as i32;

    let mut side = (col_count / 5).max(min_side);
    if force_even && side % 2 != 0 {
        side += 1;
    }

    while col_count - side * 2 < 2 && side > min_side {
        side -= if force_even { 2 } else { 1 };
    }

    AislePartition {
        left_boundary: side,
        right_boundary: col_count - side,
    }
}

/// Статическая таблица проходов живой схемы зала.
///
/// Это отдельная от `compute_aisle_positions` стратегия: схема выбора мест
/// всегда брала фиксированные позиции по типу зала, и смена стратегии
/// сдвинула бы проходы в уже существующих залах.
pub fn static_aisle_positions(hall_type: HallType, col_count: u32) -> &'static [u32] {
    if col_count < STATIC_AISLE_MIN_COLUMNS {
        return &[];
    }
    match hall_type {
        HallType::Large => &[5, 20],
        HallType::Medium => &[4, 16],
        HallType::Small => &[3, 12],
        HallType::Lovers => &[2, 10],
    }
}

/// Есть ли проход после места с порядковым номером `position` (с 1) в ряду.
pub fn has_aisle_after(positions: &[u32], position: u32) -> bool {
    positions.contains(&position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wide_standard_hall() {
        assert_eq!(compute_aisle_positions(25, 2, false).as_array(), [5, 20]);
    }

    #[test]
    fn lovers_hall_keeps_even_sides() {
        assert_eq!(compute_aisle_positions(10, 2, true).as_array(), [2, 8]);
        assert_eq!(compute_aisle_positions(15, 2, true).as_array(), [4, 11]);
        assert_eq!(compute_aisle_positions(30, 2, true).as_array(), [6, 24]);
    }

    #[test]
    fn narrow_hall_stabilizes_at_min_side() {
        assert_eq!(compute_aisle_positions(4, 2, false).as_array(), [2, 2]);
        assert_eq!(compute_aisle_positions(1, 2, false).as_array(), [2, -1]);
        assert_eq!(compute_aisle_positions(6, 3, false).as_array(), [3, 3]);
    }

    #[test]
    fn static_table_per_hall_type() {
        assert_eq!(static_aisle_positions(HallType::Large, 25), &[5, 20]);
        assert_eq!(static_aisle_positions(HallType::Medium, 20), &[4, 16]);
        assert_eq!(static_aisle_positions(HallType::Small, 15), &[3, 12]);
        assert_eq!(static_aisle_positions(HallType::Lovers, 12), &[2, 10]);
    }

    #[test]
    fn static_table_skips_narrow_halls() {
        assert!(static_aisle_positions(HallType::Large, 7).is_empty());
        assert_eq!(static_aisle_positions(HallType::Large, 8), &[5, 20]);
    }

    #[test]
    fn static_and_dynamic_strategies_differ() {
        let dynamic = compute_aisle_positions(30, DEFAULT_MIN_SIDE, false);
        assert_eq!(dynamic.as_array(), [6, 24]);
        assert_eq!(static_aisle_positions(HallType::Large, 30), &[5, 20]);
    }

    proptest! {
        #[test]
        fn boundaries_sum_to_column_count(
            cols in 1u32..200,
            min_side in 1i32..6,
            force_even in any::<bool>(),
        ) {
            let p = compute_aisle_positions(cols, min_side, force_even);
            prop_assert_eq!(p.left_boundary + p.right_boundary, cols as i32);
        }

        #[test]
        fn center_is_wide_unless_side_hit_minimum(
            cols in 1u32..200,
            min_side in 1i32..6,
            force_even in any::<bool>(),
        ) {
            let p = compute_aisle_positions(cols, min_side, force_even);
            if p.left_boundary > min_side {
                prop_assert!(p.center_width() >= 2);
            }
        }

        #[test]
        fn standard_side_never_below_minimum(cols in 1u32..200, min_side in 1i32..6) {
            let p = compute_aisle_positions(cols, min_side, false);
            prop_assert!(p.left_boundary >= min_side);
        }

        #[test]
        fn even_minimum_keeps_lovers_side_even(cols in 1u32..200, half in 1i32..4) {
            let p = compute_aisle_positions(cols, half * 2, true);
            prop_assert_eq!(p.left_boundary % 2, 0);
            prop_assert!(p.left_boundary >= half * 2);
        }

        #[test]
        fn wide_halls_keep_side_positive_and_inside(cols in 10u32..200, force_even in any::<bool>()) {
            let p = compute_aisle_positions(cols, DEFAULT_MIN_SIDE, force_even);
            prop_assert!(p.left_boundary > 0);
            prop_assert!(p.left_boundary as u32 <= cols);
            prop_assert!(p.center_width() >= 2);
        }
    }
}
