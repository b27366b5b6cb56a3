//! Mapping from [`RecurRule`] to the `rrule` crate's builder.
//!
//! Frequencies and weekdays go through fixed lookup tables. Every other part
//! is copied through when present and left unset otherwise. The resulting
//! rule is validated against the event start, which catches combinations the
//! token parser accepts but RFC 5545 forbids (e.g. `BYWEEKNO` on a monthly
//! rule).

use chrono::{DateTime, Utc, Weekday};
use rrule::{NWeekday, RRule, Validated};

use super::RecurrenceError;
use super::rule::{Frequency, RecurRule, WeekdayNum, WeekdayToken};

/// Maps the iCalendar frequency to the builder's frequency.
pub fn map_frequency(frequency: Frequency) -> rrule::Frequency {
    match frequency {
        Frequency::Secondly => rrule::Frequency::Secondly,
        Frequency::Minutely => rrule::Frequency::Minutely,
        Frequency::Hourly => rrule::Frequency::Hourly,
        Frequency::Daily => rrule::Frequency::Daily,
        Frequency::Weekly => rrule::Frequency::Weekly,
        Frequency::Monthly => rrule::Frequency::Monthly,
        Frequency::Yearly => rrule::Frequency::Yearly,
    }
}

/// Maps a weekday token to the builder's weekday.
pub fn map_weekday(token: WeekdayToken) -> Weekday {
    match token {
        WeekdayToken::Monday => Weekday::Mon,
        WeekdayToken::Tuesday => Weekday::Tue,
        WeekdayToken::Wednesday => Weekday::Wed,
        WeekdayToken::Thursday => Weekday::Thu,
        WeekdayToken::Friday => Weekday::Fri,
        WeekdayToken::Saturday => Weekday::Sat,
        WeekdayToken::Sunday => Weekday::Sun,
    }
}

fn map_weekday_num(day: WeekdayNum) -> NWeekday {
    let weekday = map_weekday(day.weekday);
    match day.ordinal {
        Some(n) => NWeekday::Nth(n, weekday),
        None => NWeekday::Every(weekday),
    }
}

/// Builds and validates the equivalent `rrule` rule.
pub fn to_rrule(
    rule: &RecurRule,
    start: DateTime<Utc>,
) -> Result<RRule<Validated>, RecurrenceError> {
    let tz: rrule::Tz = Utc.into();

    let mut builder = RRule::new(map_frequency(rule.frequency));

    if let Some(interval) = rule.interval {
        builder = builder.interval(interval);
    }
    if let Some(count) = rule.count {
        builder = builder.count(count);
    }
    if let Some(until) = rule.until {
        builder = builder.until(until.to_utc().with_timezone(&tz));
    }
    if let Some(week_start) = rule.week_start {
        builder = builder.week_start(map_weekday(week_start));
    }
    if !rule.by_day.is_empty() {
        builder = builder.by_weekday(rule.by_day.iter().copied().map(map_weekday_num).collect());
    }
    if !rule.by_month.is_empty() {
        builder = builder.by_month(&rule.by_month);
    }
    if !rule.by_month_day.is_empty() {
        builder = builder.by_month_day(rule.by_month_day.clone());
    }
    if !rule.by_year_day.is_empty() {
        builder = builder.by_year_day(rule.by_year_day.clone());
    }
    if !rule.by_week_no.is_empty() {
        builder = builder.by_week_no(rule.by_week_no.clone());
    }
    if !rule.by_hour.is_empty() {
        builder = builder.by_hour(rule.by_hour.clone());
    }
    if !rule.by_minute.is_empty() {
        builder = builder.by_minute(rule.by_minute.clone());
    }
    if !rule.by_second.is_empty() {
        builder = builder.by_second(rule.by_second.clone());
    }
    if !rule.by_set_pos.is_empty() {
        builder = builder.by_set_pos(rule.by_set_pos.clone());
    }

    builder
        .validate(start.with_timezone(&tz))
        .map_err(|e| RecurrenceError::Rejected(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn frequency_table_is_total() {
        for (ours, theirs) in [
            (Frequency::Secondly, rrule::Frequency::Secondly),
            (Frequency::Minutely, rrule::Frequency::Minutely),
            (Frequency::Hourly, rrule::Frequency::Hourly),
            (Frequency::Daily, rrule::Frequency::Daily),
            (Frequency::Weekly, rrule::Frequency::Weekly),
            (Frequency::Monthly, rrule::Frequency::Monthly),
            (Frequency::Yearly, rrule::Frequency::Yearly),
        ] {
            assert_eq!(map_frequency(ours), theirs);
        }
    }

    #[test]
    fn ordinal_weekdays_keep_position() {
        let day: WeekdayNum = "-1FR".parse().unwrap();
        assert_eq!(map_weekday_num(day), NWeekday::Nth(-1, Weekday::Fri));
        let day: WeekdayNum = "SU".parse().unwrap();
        assert_eq!(map_weekday_num(day), NWeekday::Every(Weekday::Sun));
    }

    #[test]
    fn builds_simple_weekly_rule() {
        let rule: RecurRule = "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO".parse().unwrap();
        assert!(to_rrule(&rule, start()).is_ok());
    }

    #[test]
    fn builds_bounded_monthly_rule() {
        let rule: RecurRule = "FREQ=MONTHLY;BYDAY=2TU;UNTIL=20241231T000000Z"
            .parse()
            .unwrap();
        assert!(to_rrule(&rule, start()).is_ok());
    }
}
