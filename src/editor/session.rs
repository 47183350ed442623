use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::template::{HallTemplate, TemplateError, TemplateSeat};
use crate::layout::{compute_aisle_positions, AislePartition, DEFAULT_MIN_SIDE};
use crate::models::{HallType, TemplateSeatType};

/// Окна редактора. Раньше это были разрозненные флаги в компоненте,
/// теперь их держит сам редактор и отдаёт клиенту вместе с сеткой.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorUi {
    /// Ячейка, для которой открыт выбор типа места.
    pub seat_type_menu: Option<CellRef>,
    pub bulk_dialog_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// Запрос к API администрирования залов.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHallRequest {
    #[validate(length(min = 1, max = 64, message = "Введите название зала"))]
    pub name: String,
    #[serde(rename = "type")]
    pub hall_type: HallType,
    #[validate(range(min = 1, max = 26))]
    pub row_count: u32,
    #[validate(range(min = 1, max = 30))]
    pub col_count: u32,
    pub row_labels: String,
    #[validate(length(min = 1, message = "В зале нет ни одного места"))]
    pub seats: Vec<TemplateSeat>,
    #[validate(required(message = "Выберите кинотеатр"))]
    pub cinema_id: Option<i64>,
}

/// Сессия редактора шаблона зала: черновик метаданных, сетка и окна.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallTemplateEditor {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub hall_type: HallType,
    pub cinema_id: Option<i64>,
    pub template: HallTemplate,
    pub ui: EditorUi,
}

impl HallTemplateEditor {
    pub fn new(cinema_id: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            hall_type: HallType::Large,
            cinema_id,
            template: HallTemplate::new(),
            ui: EditorUi::default(),
        }
    }

    /// Превью проходов для текущей ширины (динамическая формула).
    pub fn aisle_preview(&self) -> AislePartition {
        compute_aisle_positions(
            self.template.cols() as u32,
            DEFAULT_MIN_SIDE,
            self.hall_type.is_paired(),
        )
    }

    /// Меню выбора типа открывается только для существующего места.
    pub fn open_seat_type_menu(&mut self, row: usize, col: usize) -> Result<bool, TemplateError> {
        let cell = self
            .template
            .cell(row, col)
            .ok_or(TemplateError::CellOutOfRange { row, col })?;
        if !cell.exists {
            return Ok(false);
        }
        self.ui.seat_type_menu = Some(CellRef { row, col });
        Ok(true)
    }

    pub fn close_seat_type_menu(&mut self) {
        self.ui.seat_type_menu = None;
    }

    /// Выбор в меню применяется к ячейке, для которой оно открыто, и закрывает меню.
    pub fn choose_seat_type(&mut self, seat_type: TemplateSeatType) -> Result<(), TemplateError> {
        let target = self
            .ui
            .seat_type_menu
            .ok_or_else(|| TemplateError::Invalid("меню выбора типа места не открыто".into()))?;
        self.template.set_seat_type(target.row, target.col, seat_type)?;
        self.ui.seat_type_menu = None;
        Ok(())
    }

    pub fn set_bulk_dialog(&mut self, open: bool) {
        self.ui.bulk_dialog_open = open;
    }

    /// Локальная массовая смена типа; закрывает диалог.
    pub fn bulk_set_seat_type(&mut self, seat_type: TemplateSeatType) {
        self.template.bulk_set_seat_type(seat_type);
        self.ui.bulk_dialog_open = false;
    }

    /// Любое изменение сетки закрывает меню типа: его ячейка могла исчезнуть.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), TemplateError> {
        self.template.resize(rows, cols)?;
        self.ui.seat_type_menu = None;
        Ok(())
    }

    pub fn set_row_labels(&mut self, raw: &str) -> Result<(), TemplateError> {
        self.template.set_row_labels(raw)?;
        self.ui.seat_type_menu = None;
        Ok(())
    }

    pub fn toggle_existence(&mut self, row: usize, col: usize) -> Result<bool, TemplateError> {
        let exists = self.template.toggle_existence(row, col)?;
        if !exists && self.ui.seat_type_menu == Some(CellRef { row, col }) {
            self.ui.seat_type_menu = None;
        }
        Ok(exists)
    }

    /// Собирает запрос на создание зала.
    pub fn to_create_request(&self) -> Result<CreateHallRequest, validator::ValidationErrors> {
        let layout = self.template.serialize();
        let request = CreateHallRequest {
            name: self.name.trim().to_string(),
            hall_type: self.hall_type,
            row_count: layout.row_count,
            col_count: layout.col_count,
            row_labels: layout.row_labels,
            seats: layout.seats,
            cinema_id: self.cinema_id,
        };
        request.validate()?;
        Ok(request)
    }

    /// После успешной отправки редактор возвращается к значениям по умолчанию.
    pub fn reset(&mut self) {
        let id = self.id;
        let cinema_id = self.cinema_id;
        *self = Self::new(cinema_id);
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_editor() -> HallTemplateEditor {
        let mut editor = HallTemplateEditor::new(Some(1));
        editor.name = "Зал 5".into();
        editor
    }

    #[test]
    fn menu_opens_only_on_existing_cells() {
        let mut editor = named_editor();
        editor.toggle_existence(0, 0).unwrap();

        assert!(!editor.open_seat_type_menu(0, 0).unwrap());
        assert_eq!(editor.ui.seat_type_menu, None);

        assert!(editor.open_seat_type_menu(0, 1).unwrap());
        editor.choose_seat_type(TemplateSeatType::Vip).unwrap();
        assert_eq!(editor.ui.seat_type_menu, None);
        assert_eq!(
            editor.template.cell(0, 1).unwrap().seat_type,
            TemplateSeatType::Vip
        );
    }

    #[test]
    fn choosing_without_menu_is_rejected() {
        let mut editor = named_editor();
        assert!(editor.choose_seat_type(TemplateSeatType::Vip).is_err());
    }

    #[test]
    fn removing_menu_target_closes_menu() {
        let mut editor = named_editor();
        editor.open_seat_type_menu(2, 2).unwrap();
        editor.toggle_existence(2, 2).unwrap();
        assert_eq!(editor.ui.seat_type_menu, None);
    }

    #[test]
    fn bulk_dialog_closes_after_apply() {
        let mut editor = named_editor();
        editor.set_bulk_dialog(true);
        editor.bulk_set_seat_type(TemplateSeatType::LoverRight);
        assert!(!editor.ui.bulk_dialog_open);
        assert!(editor
            .template
            .cells()
            .iter()
            .flatten()
            .all(|c| c.seat_type == TemplateSeatType::LoverRight));
    }

    #[test]
    fn aisle_preview_uses_even_sides_for_lovers() {
        let mut editor = named_editor();
        editor.resize(4, 10).unwrap();
        editor.hall_type = HallType::Lovers;
        assert_eq!(editor.aisle_preview().as_array(), [2, 8]);

        editor.resize(4, 25).unwrap();
        editor.hall_type = HallType::Large;
        assert_eq!(editor.aisle_preview().as_array(), [5, 20]);
    }

    #[test]
    fn create_request_requires_name_cinema_and_seats() {
        let mut editor = HallTemplateEditor::new(None);
        assert!(editor.to_create_request().is_err());

        editor.name = "  Зал 1 ".into();
        assert!(editor.to_create_request().is_err());

        editor.cinema_id = Some(3);
        let request = editor.to_create_request().unwrap();
        assert_eq!(request.name, "Зал 1");
        assert_eq!(request.seats.len(), 36);

        editor.resize(1, 1).unwrap();
        editor.toggle_existence(0, 0).unwrap();
        assert!(editor.to_create_request().is_err());
    }

    #[test]
    fn create_request_wire_shape() {
        let mut editor = named_editor();
        editor.resize(1, 2).unwrap();
        editor.hall_type = HallType::Small;
        let json = serde_json::to_value(editor.to_create_request().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Зал 5",
                "type": "SMALL",
                "rowCount": 1,
                "colCount": 2,
                "rowLabels": "A",
                "seats": [
                    {"rowLabel": "A", "colNum": 1, "seatType": "NORMAL"},
                    {"rowLabel": "A", "colNum": 2, "seatType": "NORMAL"}
                ],
                "cinemaId": 1
            })
        );
    }

    #[test]
    fn reset_restores_defaults_but_keeps_identity() {
        let mut editor = named_editor();
        let id = editor.id;
        editor.resize(3, 3).unwrap();
        editor.reset();
        assert_eq!(editor.id, id);
        assert_eq!(editor.cinema_id, Some(1));
        assert!(editor.name.is_empty());
        assert_eq!(editor.template, HallTemplate::new());
    }
}
