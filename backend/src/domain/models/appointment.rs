use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use super::service::SalonService;

pub type AppointmentId = i64;

/// Layout of `appointment_datetime` in storage (MySQL DATETIME text form)
pub const STORAGE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout used when handing times to the presentation layer
pub const DTO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Years the store can hold; the four-digit text form keeps them in time order
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1000..=9999;

const ACCEPTED_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", STORAGE_DATETIME_FORMAT];

/// A stored appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer_name: String,
    pub phone_number: String,
    pub service: SalonService,
    pub scheduled_at: NaiveDateTime,
}

impl Appointment {
    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }
}

/// An appointment that has passed validation but has no id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub customer_name: String,
    pub phone_number: String,
    pub service: SalonService,
    pub scheduled_at: NaiveDateTime,
}

impl NewAppointment {
    pub fn with_id(self, id: AppointmentId) -> Appointment {
        Appointment {
            id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            service: self.service,
            scheduled_at: self.scheduled_at,
        }
    }
}

/// Parse a wall-clock time typed into the booking form.
/// Sub-second precision is dropped; years outside [`SUPPORTED_YEARS`] are rejected.
pub fn parse_wall_clock(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    ACCEPTED_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .filter(|dt| SUPPORTED_YEARS.contains(&dt.year()))
        .and_then(|dt| dt.with_nanosecond(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_parse_wall_clock_layouts() {
        assert_eq!(parse_wall_clock("2026-10-17T14:00"), Some(at(2026, 10, 17, 14, 0, 0)));
        assert_eq!(parse_wall_clock("2026-10-17T14:00:30"), Some(at(2026, 10, 17, 14, 0, 30)));
        assert_eq!(parse_wall_clock(" 2026-10-17 09:05:00 "), Some(at(2026, 10, 17, 9, 5, 0)));
    }

    #[test]
    fn test_parse_wall_clock_rejects_garbage() {
        for input in ["", "tomorrow", "2026-10-17", "17/10/2026 14:00", "2026-13-01T10:00"] {
            assert_eq!(parse_wall_clock(input), None, "'{}' should not parse", input);
        }
    }

    #[test]
    fn test_parse_wall_clock_year_range() {
        assert_eq!(parse_wall_clock("9999-12-31T23:59"), Some(at(9999, 12, 31, 23, 59, 0)));
        assert_eq!(parse_wall_clock("1000-01-01T00:00"), Some(at(1000, 1, 1, 0, 0, 0)));
        assert_eq!(parse_wall_clock("0999-12-31T10:00"), None);
        assert_eq!(parse_wall_clock("10000-01-01T10:00"), None);
        assert_eq!(parse_wall_clock("+10000-01-01T10:00"), None);
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let new = NewAppointment {
            customer_name: "Alice".to_string(),
            phone_number: "555-1111".to_string(),
            service: SalonService::Haircut,
            scheduled_at: at(2026, 10, 17, 14, 0, 0),
        };

        let stored = new.clone().with_id(7);
        assert_eq!(stored.id, 7);
        assert_eq!(stored.customer_name, new.customer_name);
        assert_eq!(stored.scheduled_date(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
    }
}
