use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Hall, HallType, Seat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub schedule_id: i64,
    #[serde(default)]
    pub movie_id: Option<i64>,
    pub hall_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub base_price: f64,
    pub vip_price: f64,
    pub lover_price: f64,
    #[serde(default)]
    pub hall_name: Option<String>,
    #[serde(default)]
    pub hall_type: Option<HallType>,
}

impl Schedule {
    /// Календарная дата начала сеанса (ключ группировки в списке сеансов).
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_start_date(&self.start_time)
    }
}

/// Бэкенд отдаёт время то с `T`, то с пробелом, иногда в RFC 3339.
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub english_title: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// Полный снимок сеанса, нужный для отрисовки схемы зала.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDetail {
    pub schedule: Schedule,
    pub movie: Movie,
    pub hall: Hall,
    pub seats: Vec<Seat>,
}

impl ScheduleDetail {
    pub fn seat(&self, ss_id: i64) -> Option<&Seat> {
        self.seats.iter().find(|s| s.ss_id == ss_id)
    }
}

/// Сеансы фильма, сгруппированные по дате (`yyyy-MM-dd`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleListing {
    pub schedules: BTreeMap<String, Vec<Schedule>>,
}

impl ScheduleListing {
    pub fn on_date(&self, date: NaiveDate) -> Vec<Schedule> {
        self.schedules
            .get(&date.format("%Y-%m-%d").to_string())
            .cloned()
            .unwrap_or_default()
    }
}
