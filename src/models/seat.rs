use serde::{Deserialize, Serialize};

/// Тип места, как его записал бэкенд.
///
/// Бэкенд не последователен в регистре и названиях (`STANDARD`/`NORMAL`/`standard`,
/// `COUPLE`/`LOVER`), поэтому разбор нечувствителен к регистру, а неизвестные
/// значения сохраняются в `Other` и не ломают десериализацию.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeatType {
    Standard,
    Vip,
    Couple,
    Other(String),
}

impl SeatType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "STANDARD" | "NORMAL" => SeatType::Standard,
            "VIP" => SeatType::Vip,
            "COUPLE" | "LOVER" => SeatType::Couple,
            _ => SeatType::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SeatType::Standard => "STANDARD",
            SeatType::Vip => "VIP",
            SeatType::Couple => "COUPLE",
            SeatType::Other(raw) => raw,
        }
    }
}

impl From<String> for SeatType {
    fn from(raw: String) -> Self {
        SeatType::parse(&raw)
    }
}

impl From<SeatType> for String {
    fn from(seat_type: SeatType) -> Self {
        seat_type.as_str().to_string()
    }
}

/// Тип места в шаблоне зала (словарь админки и редактора шаблона).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemplateSeatType {
    #[default]
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "VIP")]
    Vip,
    /// Левая половина парного места.
    #[serde(rename = "L_L")]
    LoverLeft,
    /// Правая половина парного места.
    #[serde(rename = "L_R")]
    LoverRight,
}

impl TemplateSeatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateSeatType::Normal => "NORMAL",
            TemplateSeatType::Vip => "VIP",
            TemplateSeatType::LoverLeft => "L_L",
            TemplateSeatType::LoverRight => "L_R",
        }
    }
}

/// Статус места. `SELECTED` существует только на клиенте,
/// `OCCUPIED` и `LOCKED` приходят только с сервера.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatStatus {
    Available,
    Selected,
    Occupied,
    Locked,
}

impl SeatStatus {
    /// Клики по проданным и заблокированным местам игнорируются.
    pub fn is_clickable(&self) -> bool {
        !matches!(self, SeatStatus::Occupied | SeatStatus::Locked)
    }
}

/// Место конкретного сеанса.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub ss_id: i64,
    pub row_label: String,
    pub col_num: u32,
    pub seat_type: SeatType,
    pub status: SeatStatus,
    pub price: f64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub lock_time: Option<String>,
}

impl Seat {
    /// Колонка парного места: нечётная колонка всегда в паре со следующей чётной.
    pub fn paired_col(&self) -> u32 {
        if self.col_num % 2 == 1 {
            self.col_num + 1
        } else {
            self.col_num.saturating_sub(1)
        }
    }

    pub fn is_pair_of(&self, other: &Seat) -> bool {
        other.row_label == self.row_label && other.col_num == self.paired_col()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(col_num: u32) -> Seat {
        Seat {
            ss_id: col_num as i64,
            row_label: "A".into(),
            col_num,
            seat_type: SeatType::Couple,
            status: SeatStatus::Available,
            price: 80.0,
            user_id: None,
            lock_time: None,
        }
    }

    #[test]
    fn seat_type_parse_is_case_insensitive() {
        assert_eq!(SeatType::parse("standard"), SeatType::Standard);
        assert_eq!(SeatType::parse("NORMAL"), SeatType::Standard);
        assert_eq!(SeatType::parse("vip"), SeatType::Vip);
        assert_eq!(SeatType::parse("Lover"), SeatType::Couple);
        assert_eq!(SeatType::parse("balcony"), SeatType::Other("balcony".into()));
    }

    #[test]
    fn unknown_seat_type_survives_deserialization() {
        let seat: Seat = serde_json::from_value(serde_json::json!({
            "ssId": 7,
            "rowLabel": "C",
            "colNum": 4,
            "seatType": "RECLINER",
            "status": "AVAILABLE",
            "price": 45.0,
            "userId": null,
            "lockTime": null
        }))
        .unwrap();

        assert_eq!(seat.seat_type, SeatType::Other("RECLINER".into()));
        assert_eq!(serde_json::to_value(&seat).unwrap()["seatType"], "RECLINER");
    }

    #[test]
    fn odd_column_pairs_with_next_even() {
        assert_eq!(seat(3).paired_col(), 4);
        assert_eq!(seat(4).paired_col(), 3);
        assert!(seat(1).is_pair_of(&seat(2)));
        assert!(!seat(2).is_pair_of(&seat(3)));
    }

    #[test]
    fn template_seat_type_wire_names() {
        assert_eq!(serde_json::to_value(TemplateSeatType::LoverLeft).unwrap(), "L_L");
        let t: TemplateSeatType = serde_json::from_value(serde_json::json!("VIP")).unwrap();
        assert_eq!(t, TemplateSeatType::Vip);
        assert_eq!(TemplateSeatType::default().as_str(), "NORMAL");
    }

    #[test]
    fn occupied_and_locked_are_not_clickable() {
        assert!(SeatStatus::Available.is_clickable());
        assert!(!SeatStatus::Occupied.is_clickable());
        assert!(!SeatStatus::Locked.is_clickable());
    }
}
