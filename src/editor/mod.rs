//! Редактор шаблона зала: сетка мест строится до создания зала и уходит
//! в API администрирования одним запросом.

pub mod session;
pub mod template;

pub use session::{CellRef, CreateHallRequest, EditorUi, HallTemplateEditor};
pub use template::{
    HallLayout, HallTemplate, SeatTemplateCell, TemplateError, TemplateSeat, MAX_COLS, MAX_ROWS,
    ROW_ALPHABET,
};
