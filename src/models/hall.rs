use serde::{Deserialize, Serialize};
use std::fmt;

/// Тип зала. От него зависят проходы, палитра и правило выбора парных мест.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HallType {
    Large,
    Medium,
    Small,
    Lovers,
}

impl HallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HallType::Large => "LARGE",
            HallType::Medium => "MEDIUM",
            HallType::Small => "SMALL",
            HallType::Lovers => "LOVERS",
        }
    }

    /// В зале для пар места продаются и выбираются парами.
    pub fn is_paired(&self) -> bool {
        matches!(self, HallType::Lovers)
    }
}

impl fmt::Display for HallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub hall_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub hall_type: HallType,
    pub row_count: u32,
    pub col_count: u32,
    pub row_labels: String,
    #[serde(default)]
    pub cinema_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hall_deserializes_from_backend_shape() {
        let hall: Hall = serde_json::from_value(serde_json::json!({
            "hallId": 3,
            "name": "Зал 3",
            "type": "LOVERS",
            "rowCount": 2,
            "colCount": 10,
            "rowLabels": "AB",
            "cinemaId": 1
        }))
        .unwrap();

        assert_eq!(hall.hall_type, HallType::Lovers);
        assert!(hall.hall_type.is_paired());
        assert_eq!(hall.row_labels, "AB");
    }

    #[test]
    fn cinema_id_is_optional() {
        let hall: Hall = serde_json::from_value(serde_json::json!({
            "hallId": 1,
            "name": "IMAX",
            "type": "LARGE",
            "rowCount": 1,
            "colCount": 25,
            "rowLabels": "A"
        }))
        .unwrap();
        assert_eq!(hall.cinema_id, None);
    }
}
