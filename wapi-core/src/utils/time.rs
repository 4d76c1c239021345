use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Next record id: the current Unix time in milliseconds, bumped past the
/// last id handed out in this process so two calls in one millisecond differ.
pub fn next_timestamp_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = if now > prev { now } else { prev + 1 };
        match LAST_ID.compare_exchange_weak(prev, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(actual) => prev = actual,
        }
    }
}

/// Local calendar date, used for `createdAt` / `joinedDate` fields.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD HH:MM` in local time, the format of `lastSync`.
pub fn sync_stamp(now: DateTime<Utc>) -> String {
    Local.from_utc_datetime(&now.naive_utc()).format("%Y-%m-%d %H:%M").to_string()
}

/// Returns the current epoch seconds.
pub fn current_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Convert epoch seconds to a UTC timestamp, falling back to the epoch.
pub fn from_epoch(epoch: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_strictly_increase_within_a_millisecond() {
        let ids: Vec<i64> = (0..200)
            .map(|_| next_timestamp_id().parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn epoch_round_trip() {
        let t = from_epoch(1_736_850_600);
        assert_eq!(t.timestamp(), 1_736_850_600);
    }
}
