use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TemplateSeatType;

/// Алфавит меток рядов; его длина ограничивает число рядов.
pub const ROW_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const MAX_ROWS: usize = 26;
pub const MAX_COLS: usize = 30;
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("число рядов должно быть от 1 до 26, получено {0}")]
    RowsOutOfRange(usize),
    #[error("число колонок должно быть от 1 до 30, получено {0}")]
    ColsOutOfRange(usize),
    #[error("метка ряда '{0}' повторяется")]
    DuplicateRowLabel(char),
    #[error("ячейка ({row}, {col}) вне сетки")]
    CellOutOfRange { row: usize, col: usize },
    #[error("{0}")]
    Invalid(String),
}

/// Ячейка сетки шаблона. Живёт только до отправки шаблона.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatTemplateCell {
    pub exists: bool,
    pub seat_type: TemplateSeatType,
}

impl Default for SeatTemplateCell {
    fn default() -> Self {
        Self {
            exists: true,
            seat_type: TemplateSeatType::Normal,
        }
    }
}

/// Место, как его ждёт API создания зала.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSeat {
    pub row_label: String,
    pub col_num: u32,
    pub seat_type: TemplateSeatType,
}

/// Результат `HallTemplate::serialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallLayout {
    pub row_count: u32,
    pub col_count: u32,
    pub row_labels: String,
    pub seats: Vec<TemplateSeat>,
}

/// Сетка `rows × cols` с метками рядов.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallTemplate {
    row_labels: String,
    cols: usize,
    cells: Vec<Vec<SeatTemplateCell>>,
}

impl Default for HallTemplate {
    fn default() -> Self {
        Self {
            row_labels: ROW_ALPHABET[..DEFAULT_ROWS].to_string(),
            cols: DEFAULT_COLS,
            cells: vec![vec![SeatTemplateCell::default(); DEFAULT_COLS]; DEFAULT_ROWS],
        }
    }
}

impl HallTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_labels(&self) -> &str {
        &self.row_labels
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&SeatTemplateCell> {
        self.cells.get(row)?.get(col)
    }

    pub fn cells(&self) -> &[Vec<SeatTemplateCell>] {
        &self.cells
    }

    /// Пересобирает сетку под новые размеры, сохраняя пересекающиеся ячейки.
    ///
    /// Метки рядов остаются, если число рядов не изменилось, иначе берутся
    /// первые `rows` букв алфавита.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), TemplateError> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(TemplateError::RowsOutOfRange(rows));
        }
        if cols == 0 || cols > MAX_COLS {
            return Err(TemplateError::ColsOutOfRange(cols));
        }

        if self.row_labels.chars().count() != rows {
            self.row_labels = ROW_ALPHABET[..rows].to_string();
        }
        self.reshape(rows, cols);
        Ok(())
    }

    /// Задаёт метки рядов строкой вроде `"ABCDEF"`; число рядов следует за ней.
    ///
    /// Всё, кроме `A–Z`, отбрасывается.
    pub fn set_row_labels(&mut self, raw: &str) -> Result<(), TemplateError> {
        let labels: String = raw.chars().filter(|c| c.is_ascii_uppercase()).collect();
        if labels.is_empty() || labels.len() > MAX_ROWS {
            return Err(TemplateError::RowsOutOfRange(labels.len()));
        }
        let mut seen = [false; MAX_ROWS];
        for c in labels.chars() {
            let idx = (c as u8 - b'A') as usize;
            if seen[idx] {
                return Err(TemplateError::DuplicateRowLabel(c));
            }
            seen[idx] = true;
        }

        let rows = labels.len();
        self.row_labels = labels;
        self.reshape(rows, self.cols);
        Ok(())
    }

    fn reshape(&mut self, rows: usize, cols: usize) {
        let old = std::mem::take(&mut self.cells);
        self.cells = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        old.get(r)
                            .and_then(|row| row.get(c))
                            .copied()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        self.cols = cols;
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut SeatTemplateCell, TemplateError> {
        self.cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(TemplateError::CellOutOfRange { row, col })
    }

    /// Есть место / нет места. Тип места не трогается.
    pub fn toggle_existence(&mut self, row: usize, col: usize) -> Result<bool, TemplateError> {
        let cell = self.cell_mut(row, col)?;
        cell.exists = !cell.exists;
        Ok(cell.exists)
    }

    /// Тип одной ячейки. Открывать выбор типа только для существующих мест
    /// должен вызывающий код (см. `EditorUi`).
    pub fn set_seat_type(
        &mut self,
        row: usize,
        col: usize,
        seat_type: TemplateSeatType,
    ) -> Result<(), TemplateError> {
        self.cell_mut(row, col)?.seat_type = seat_type;
        Ok(())
    }

    /// Тип для всех ячеек сразу, включая несуществующие. Меняет только
    /// локальную сетку; массовая смена типа в уже созданном зале идёт через
    /// `UpstreamClient::bulk_set_seat_type`.
    pub fn bulk_set_seat_type(&mut self, seat_type: TemplateSeatType) {
        for cell in self.cells.iter_mut().flatten() {
            cell.seat_type = seat_type;
        }
    }

    /// Плоский список мест для API создания зала; ячейки без места пропускаются.
    pub fn serialize(&self) -> HallLayout {
        let seats = self
            .row_labels
            .chars()
            .zip(&self.cells)
            .flat_map(|(label, row)| {
                row.iter().enumerate().filter(|(_, cell)| cell.exists).map(
                    move |(c, cell)| TemplateSeat {
                        row_label: label.to_string(),
                        col_num: c as u32 + 1,
                        seat_type: cell.seat_type,
                    },
                )
            })
            .collect();

        HallLayout {
            row_count: self.rows() as u32,
            col_count: self.cols as u32,
            row_labels: self.row_labels.clone(),
            seats,
        }
    }
}
