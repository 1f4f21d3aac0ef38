//! Per-date mutual exclusion for the booking read-check-write sequence.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of one async lock per calendar date
///
/// Holding the guard for a date keeps any other booking on that date from
/// reading the day's appointments until the holder has inserted (or given up).
#[derive(Clone, Default)]
pub struct DateLocks {
    locks: Arc<Mutex<HashMap<NaiveDate, Arc<AsyncMutex<()>>>>>,
}

impl DateLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, date: NaiveDate) -> OwnedMutexGuard<()> {
        let date_lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // Drop entries nobody holds or waits on
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(date).or_default())
        };

        date_lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked_dates(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[tokio::test]
    async fn test_same_date_waits_for_holder() {
        let locks = DateLocks::new();
        let guard = locks.lock(date(17)).await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.lock(date(17)).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_dates_do_not_block() {
        let locks = DateLocks::new();
        let _first = locks.lock(date(17)).await;

        let second = tokio::time::timeout(Duration::from_secs(1), locks.lock(date(18))).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_released_dates_are_forgotten() {
        let locks = DateLocks::new();
        for day in 1..=10 {
            let _guard = locks.lock(date(day)).await;
        }

        let _last = locks.lock(date(11)).await;
        assert_eq!(locks.tracked_dates(), 1);
    }
}
