//! Local wall-clock times to UTC.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Converts a wall-clock time in `tz` to UTC.
///
/// Ambiguous times (a DST fall-back) take the earlier offset. Times skipped
/// by a spring-forward transition move forward by an hour.
pub(crate) fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map_or_else(|| naive.and_utc(), |local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn regular_offset() {
        assert_eq!(
            local_to_utc(naive(2024, 1, 15, 9, 0), chrono_tz::America::New_York),
            Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn fall_back_takes_earlier_offset() {
        // 01:30 happens twice on 2024-11-03 in New York; the first is EDT.
        assert_eq!(
            local_to_utc(naive(2024, 11, 3, 1, 30), chrono_tz::America::New_York),
            Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn spring_forward_gap_moves_ahead() {
        // 02:30 does not exist on 2024-03-10 in New York; 03:30 EDT is used.
        assert_eq!(
            local_to_utc(naive(2024, 3, 10, 2, 30), chrono_tz::America::New_York),
            Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap()
        );
    }
}
