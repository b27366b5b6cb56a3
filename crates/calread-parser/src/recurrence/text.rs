//! Human-readable descriptions of recurrence rules.
//!
//! Produces phrases like "every 2 weeks on Monday and Thursday for 10 times".

use chrono::Month;

use super::rule::{Frequency, RecurRule, WeekdayNum};

/// Renders a phrase describing `rule`.
pub fn describe(rule: &RecurRule) -> String {
    let mut text = String::from("every ");
    let weekday_shorthand = rule.frequency == Frequency::Weekly
        && rule.interval.unwrap_or(1) == 1
        && rule.is_every_weekday();

    if weekday_shorthand {
        text.push_str("weekday");
    } else {
        match rule.interval.unwrap_or(1) {
            1 => text.push_str(rule.frequency.unit()),
            n => text.push_str(&format!("{n} {}s", rule.frequency.unit())),
        }
        if !rule.by_day.is_empty() {
            let days: Vec<String> = rule.by_day.iter().map(weekday_phrase).collect();
            text.push_str(" on ");
            text.push_str(&join_words(&days));
        }
    }

    if !rule.by_month.is_empty() {
        let months: Vec<String> = rule
            .by_month
            .iter()
            .map(|m| month_name(*m).to_string())
            .collect();
        text.push_str(" in ");
        text.push_str(&join_words(&months));
    }

    if !rule.by_month_day.is_empty() {
        let days: Vec<String> = rule.by_month_day.iter().map(|d| month_day(*d)).collect();
        text.push_str(" on the ");
        text.push_str(&join_words(&days));
    }

    if !rule.by_year_day.is_empty() {
        let days: Vec<String> = rule
            .by_year_day
            .iter()
            .map(|d| from_end(i32::from(*d), "day"))
            .collect();
        text.push_str(" on the ");
        text.push_str(&join_words(&days));
        text.push_str(" of the year");
    }

    if !rule.by_week_no.is_empty() {
        let weeks: Vec<String> = rule.by_week_no.iter().map(|w| w.to_string()).collect();
        text.push_str(if weeks.len() == 1 { " in week " } else { " in weeks " });
        text.push_str(&join_words(&weeks));
    }

    if !rule.by_hour.is_empty() {
        let minute = rule.by_minute.first().copied().unwrap_or(0);
        let times: Vec<String> = rule
            .by_hour
            .iter()
            .map(|h| format!("{h}:{minute:02}"))
            .collect();
        text.push_str(" at ");
        text.push_str(&join_words(&times));
    }

    if !rule.by_set_pos.is_empty() {
        let positions: Vec<String> = rule.by_set_pos.iter().map(|p| set_position(*p)).collect();
        text.push_str(", only the ");
        text.push_str(&join_words(&positions));
        text.push_str(" of these");
    }

    if let Some(count) = rule.count {
        if count == 1 {
            text.push_str(" for 1 time");
        } else {
            text.push_str(&format!(" for {count} times"));
        }
    }

    if let Some(until) = rule.until {
        text.push_str(" until ");
        text.push_str(&until.to_utc().format("%B %-d, %Y").to_string());
    }

    text
}

/// English ordinal for a positive number: 1st, 2nd, 3rd, 11th, 22nd.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn weekday_phrase(day: &WeekdayNum) -> String {
    match day.ordinal {
        None => day.weekday.name().to_string(),
        Some(n) => format!("the {}", from_end(i32::from(n), day.weekday.name())),
    }
}

fn month_day(day: i8) -> String {
    if day > 0 {
        ordinal(day.unsigned_abs().into())
    } else {
        from_end(i32::from(day), "day")
    }
}

fn set_position(pos: i32) -> String {
    match pos {
        -1 => "last".to_string(),
        p if p < 0 => format!("{} to last", ordinal(p.unsigned_abs())),
        p => ordinal(p.unsigned_abs()),
    }
}

/// "2nd Tuesday", "last Friday", "2nd to last day".
fn from_end(n: i32, noun: &str) -> String {
    match n {
        -1 => format!("last {noun}"),
        n if n < 0 => format!("{} to last {noun}", ordinal(n.unsigned_abs())),
        n => format!("{} {noun}", ordinal(n.unsigned_abs())),
    }
}

fn month_name(month: Month) -> &'static str {
    month.name()
}

/// Joins words as "a", "a and b", "a, b and c".
fn join_words(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(rule: &str) -> String {
        describe(&rule.parse::<RecurRule>().unwrap())
    }

    #[test]
    fn frequency_and_interval() {
        assert_eq!(text("FREQ=DAILY"), "every day");
        assert_eq!(text("FREQ=WEEKLY;INTERVAL=1;BYDAY=MO"), "every week on Monday");
        assert_eq!(text("FREQ=WEEKLY;INTERVAL=2"), "every 2 weeks");
        assert_eq!(text("FREQ=HOURLY;INTERVAL=6"), "every 6 hours");
        assert_eq!(text("FREQ=YEARLY"), "every year");
    }

    #[test]
    fn weekdays() {
        assert_eq!(text("FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR"), "every weekday");
        assert_eq!(
            text("FREQ=WEEKLY;BYDAY=MO,WE,FR"),
            "every week on Monday, Wednesday and Friday"
        );
        assert_eq!(
            text("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TU,WE,TH,FR"),
            "every 2 weeks on Monday, Tuesday, Wednesday, Thursday and Friday"
        );
    }

    #[test]
    fn monthly_positions() {
        assert_eq!(text("FREQ=MONTHLY;BYMONTHDAY=1"), "every month on the 1st");
        assert_eq!(text("FREQ=MONTHLY;BYMONTHDAY=-1"), "every month on the last day");
        assert_eq!(
            text("FREQ=MONTHLY;BYMONTHDAY=1,15"),
            "every month on the 1st and 15th"
        );
        assert_eq!(text("FREQ=MONTHLY;BYDAY=2TU"), "every month on the 2nd Tuesday");
        assert_eq!(text("FREQ=MONTHLY;BYDAY=-1FR"), "every month on the last Friday");
    }

    #[test]
    fn yearly_months() {
        assert_eq!(
            text("FREQ=YEARLY;BYMONTH=1,3"),
            "every year in January and March"
        );
        assert_eq!(
            text("FREQ=YEARLY;BYMONTH=11;BYDAY=4TH"),
            "every year on the 4th Thursday in November"
        );
    }

    #[test]
    fn time_of_day() {
        assert_eq!(
            text("FREQ=WEEKLY;BYDAY=MO,WE,FR;BYHOUR=9;BYMINUTE=30"),
            "every week on Monday, Wednesday and Friday at 9:30"
        );
        assert_eq!(text("FREQ=DAILY;BYHOUR=17"), "every day at 17:00");
    }

    #[test]
    fn bounds() {
        assert_eq!(text("FREQ=DAILY;COUNT=5"), "every day for 5 times");
        assert_eq!(text("FREQ=DAILY;COUNT=1"), "every day for 1 time");
        assert_eq!(
            text("FREQ=DAILY;INTERVAL=2;UNTIL=20250105T000000Z"),
            "every 2 days until January 5, 2025"
        );
        assert_eq!(
            text("FREQ=WEEKLY;UNTIL=20250105"),
            "every week until January 5, 2025"
        );
    }

    #[test]
    fn set_positions() {
        assert_eq!(
            text("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1"),
            "every month on Monday, Tuesday, Wednesday, Thursday and Friday, only the last of these"
        );
    }

    #[test]
    fn ordinals() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 101, 111]
            .into_iter()
            .map(ordinal)
            .collect();
        assert_eq!(
            rendered,
            [
                "1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd",
                "101st", "111th"
            ]
        );
    }
}
