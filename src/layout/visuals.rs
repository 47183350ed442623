use serde::Serialize;

use crate::models::{HallType, Seat, SeatStatus};

/// Вид иконки места.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IconKind {
    Standard,
    Vip,
    Couple,
    Locked,
}

impl IconKind {
    /// Ключ таблицы типов мест. Регистр не важен: `standard` и `STANDARD` одно и то же.
    fn from_key(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "STANDARD" => Some(IconKind::Standard),
            "VIP" => Some(IconKind::Vip),
            "COUPLE" => Some(IconKind::Couple),
            "LOCKED" => Some(IconKind::Locked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatVisual {
    pub color: &'static str,
    pub icon: IconKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub status: SeatStatus,
    pub visual: SeatVisual,
}

struct Legend {
    available: &'static str,
    selected: &'static str,
    occupied: &'static str,
    locked: &'static str,
}

struct Palette {
    seat_types: &'static [(IconKind, &'static str)],
    default_kind: IconKind,
    legend: Legend,
}

const STANDARD_TYPES: &[(IconKind, &str)] = &[
    (IconKind::Standard, "#8c8c8c"),
    (IconKind::Vip, "#ffd700"),
    (IconKind::Locked, "#ff6b49"),
];

static LARGE: Palette = Palette {
    seat_types: STANDARD_TYPES,
    default_kind: IconKind::Standard,
    legend: Legend {
        available: "#8c8c8c",
        selected: "#83fc5c",
        occupied: "#fd0000",
        locked: "#ff6b49",
    },
};

// MEDIUM и SMALL отличаются от LARGE только оттенком проданного места
static MEDIUM_SMALL: Palette = Palette {
    seat_types: STANDARD_TYPES,
    default_kind: IconKind::Standard,
    legend: Legend {
        available: "#8c8c8c",
        selected: "#83fc5c",
        occupied: "#ff4545",
        locked: "#ff6b49",
    },
};

static LOVERS: Palette = Palette {
    seat_types: &[(IconKind::Couple, "#f6b2d6"), (IconKind::Locked, "#a891e5")],
    default_kind: IconKind::Couple,
    legend: Legend {
        available: "#f6b2d6",
        selected: "#0fffe7",
        occupied: "#f12b96",
        locked: "#a891e5",
    },
};

fn palette(hall_type: HallType) -> &'static Palette {
    match hall_type {
        HallType::Large => &LARGE,
        HallType::Medium | HallType::Small => &MEDIUM_SMALL,
        HallType::Lovers => &LOVERS,
    }
}

impl Palette {
    fn lookup(&self, kind: IconKind) -> Option<SeatVisual> {
        self.seat_types
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(icon, color)| SeatVisual { color, icon })
    }

    fn default_visual(&self) -> SeatVisual {
        // в таблице каждого зала есть запись для его типа по умолчанию
        self.lookup(self.default_kind).unwrap_or(SeatVisual {
            color: self.legend.available,
            icon: self.default_kind,
        })
    }

    fn legend_visual(&self, status: SeatStatus) -> SeatVisual {
        let (color, icon) = match status {
            SeatStatus::Available => (self.legend.available, self.default_kind),
            SeatStatus::Selected => (self.legend.selected, self.default_kind),
            SeatStatus::Occupied => (self.legend.occupied, self.default_kind),
            SeatStatus::Locked => (self.legend.locked, IconKind::Locked),
        };
        SeatVisual { color, icon }
    }
}

/// Вид места по его записанному типу.
///
/// Поиск нечувствителен к регистру. Если для типа нет записи, берётся тип
/// зала по умолчанию: `COUPLE` для зала пар, `STANDARD` для остальных.
/// Отсутствие записи не ошибка.
pub fn resolve_seat_type_config(hall_type: HallType, seat_type: &str) -> SeatVisual {
    let palette = palette(hall_type);
    IconKind::from_key(seat_type)
        .and_then(|kind| palette.lookup(kind))
        .unwrap_or_else(|| palette.default_visual())
}

/// Вид места на схеме с учётом статуса и текущего выбора.
pub fn seat_visual(hall_type: HallType, seat: &Seat, selected: bool) -> SeatVisual {
    let palette = palette(hall_type);
    if selected {
        return palette.legend_visual(SeatStatus::Selected);
    }
    match seat.status {
        SeatStatus::Occupied | SeatStatus::Locked | SeatStatus::Selected => {
            palette.legend_visual(seat.status)
        }
        SeatStatus::Available => resolve_seat_type_config(hall_type, seat.seat_type.as_str()),
    }
}

/// Легенда схемы в порядке: свободно, выбрано, продано, заблокировано.
pub fn legend(hall_type: HallType) -> Vec<LegendEntry> {
    let palette = palette(hall_type);
    [
        SeatStatus::Available,
        SeatStatus::Selected,
        SeatStatus::Occupied,
        SeatStatus::Locked,
    ]
    .into_iter()
    .map(|status| LegendEntry {
        status,
        visual: palette.legend_visual(status),
    })
    .collect()
}

/// Размер иконки места: большой зал рисуется мельче.
pub fn icon_size(hall_type: HallType) -> u32 {
    match hall_type {
        HallType::Large => 24,
        _ => 30,
    }
}
