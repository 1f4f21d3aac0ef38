//! Minimum-separation rule for appointments on the same calendar date.
//!
//! A candidate slot is bookable when every appointment sharing its calendar
//! date is at least the conflict window away. Appointments on other dates are
//! ignored entirely, so 23:50 and 00:10 on the next day never conflict.

use chrono::{Duration, NaiveDateTime};

use crate::domain::models::Appointment;

pub const DEFAULT_MIN_SEPARATION_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictChecker {
    min_separation: Duration,
}

impl ConflictChecker {
    pub fn new(min_separation: Duration) -> Self {
        Self { min_separation }
    }

    pub fn with_minutes(minutes: i64) -> Self {
        Self::new(Duration::minutes(minutes))
    }

    pub fn min_separation(&self) -> Duration {
        self.min_separation
    }

    pub fn is_available(&self, candidate: NaiveDateTime, existing: &[Appointment]) -> bool {
        self.find_conflict(candidate, existing).is_none()
    }

    /// First same-day appointment closer than the window, if any
    pub fn find_conflict<'a>(&self, candidate: NaiveDateTime, existing: &'a [Appointment]) -> Option<&'a Appointment> {
        let candidate_date = candidate.date();
        existing
            .iter()
            .filter(|appointment| appointment.scheduled_date() == candidate_date)
            .find(|appointment| (appointment.scheduled_at - candidate).abs() < self.min_separation)
    }
}

impl Default for ConflictChecker {
    fn default() -> Self {
        Self::with_minutes(DEFAULT_MIN_SEPARATION_MINUTES)
    }
}
