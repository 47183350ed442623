//! Раскладка зала: где проходят проходы и как выглядит каждое место.
//!
//! Чистые функции без состояния. Схема выбора мест и редактор шаблона зала
//! берут отсюда разбиение колонок и палитру.

pub mod aisle;
pub mod visuals;

pub use aisle::{
    compute_aisle_positions, has_aisle_after, static_aisle_positions, AislePartition,
    DEFAULT_MIN_SIDE, STATIC_AISLE_MIN_COLUMNS,
};
pub use visuals::{
    icon_size, legend, resolve_seat_type_config, seat_visual, IconKind, LegendEntry, SeatVisual,
};
