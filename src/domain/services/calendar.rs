use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Midnight of `date` in `tz`, as a UTC instant. A midnight skipped by a
/// DST transition falls back to treating the naive time as UTC.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

pub fn start_of_local_day(at: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    local_midnight(at.with_timezone(&tz).date_naive(), tz)
}
