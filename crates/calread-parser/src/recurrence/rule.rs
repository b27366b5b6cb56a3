//! The iCalendar recurrence rule vocabulary.
//!
//! [`RecurRule`] holds the parsed `RRULE` value tokens
//! (`FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE`). Parsing is strict: an unknown part
//! name or a malformed value is a [`RecurrenceError`].

use std::str::FromStr;

use chrono::{DateTime, Month, NaiveDate, NaiveDateTime, Utc};

use super::RecurrenceError;

/// The `FREQ` part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The unit name used in descriptions, e.g. "week".
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Secondly => "second",
            Self::Minutely => "minute",
            Self::Hourly => "hour",
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }
}

impl FromStr for Frequency {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Ok(Self::Secondly),
            "MINUTELY" => Ok(Self::Minutely),
            "HOURLY" => Ok(Self::Hourly),
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            _ => Err(RecurrenceError::UnknownFrequency(s.to_string())),
        }
    }
}

/// A two-letter weekday token (`MO` to `SU`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekdayToken {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayToken {
    pub const WORKWEEK: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl FromStr for WeekdayToken {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MO" => Ok(Self::Monday),
            "TU" => Ok(Self::Tuesday),
            "WE" => Ok(Self::Wednesday),
            "TH" => Ok(Self::Thursday),
            "FR" => Ok(Self::Friday),
            "SA" => Ok(Self::Saturday),
            "SU" => Ok(Self::Sunday),
            _ => Err(RecurrenceError::UnknownWeekday(s.to_string())),
        }
    }
}

/// One `BYDAY` entry, e.g. `MO`, `2TU` or `-1FR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Position within the month or year; `None` means every such day.
    pub ordinal: Option<i16>,
    pub weekday: WeekdayToken,
}

impl FromStr for WeekdayNum {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() < 2 || !s.is_char_boundary(s.len() - 2) {
            return Err(RecurrenceError::UnknownWeekday(s.to_string()));
        }
        let (ordinal, token) = s.split_at(s.len() - 2);
        let weekday = token.parse()?;
        let ordinal = match ordinal {
            "" => None,
            n => Some(parse_number::<i16>("BYDAY", n)?),
        };
        if ordinal == Some(0) {
            return Err(RecurrenceError::InvalidValue {
                part: "BYDAY",
                value: s.to_string(),
            });
        }
        Ok(Self { ordinal, weekday })
    }
}

/// The `UNTIL` bound, as written in the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Until {
    /// `UNTIL=20250105`
    Date(NaiveDate),
    /// `UNTIL=20250105T100000`, read as UTC.
    Floating(NaiveDateTime),
    /// `UNTIL=20250105T100000Z`
    Utc(DateTime<Utc>),
}

impl Until {
    /// The bound as a UTC instant. Date bounds are anchored at midnight.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Date(date) => date.and_time(chrono::NaiveTime::MIN).and_utc(),
            Self::Floating(naive) => naive.and_utc(),
            Self::Utc(instant) => *instant,
        }
    }
}

impl FromStr for Until {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || RecurrenceError::UnsupportedUntil(s.to_string());
        if let Some(stamp) = s.strip_suffix(['Z', 'z']) {
            return NaiveDateTime::parse_from_str(stamp, "%Y%m%dT%H%M%S")
                .map(|naive| Self::Utc(naive.and_utc()))
                .map_err(|_| unsupported());
        }
        if s.len() == 8 {
            return NaiveDate::parse_from_str(s, "%Y%m%d")
                .map(Self::Date)
                .map_err(|_| unsupported());
        }
        NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%S")
            .map(Self::Floating)
            .map_err(|_| unsupported())
    }
}

/// A parsed `RRULE` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurRule {
    pub frequency: Frequency,
    pub interval: Option<u16>,
    pub count: Option<u32>,
    pub until: Option<Until>,
    pub week_start: Option<WeekdayToken>,
    pub by_day: Vec<WeekdayNum>,
    pub by_month: Vec<Month>,
    pub by_month_day: Vec<i8>,
    pub by_year_day: Vec<i16>,
    pub by_week_no: Vec<i8>,
    pub by_hour: Vec<u8>,
    pub by_minute: Vec<u8>,
    pub by_second: Vec<u8>,
    pub by_set_pos: Vec<i32>,
}

impl RecurRule {
    /// Creates a rule with only a frequency set.
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: None,
            count: None,
            until: None,
            week_start: None,
            by_day: Vec::new(),
            by_month: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_hour: Vec::new(),
            by_minute: Vec::new(),
            by_second: Vec::new(),
            by_set_pos: Vec::new(),
        }
    }

    /// True when `BYDAY` is exactly Monday to Friday with no ordinals.
    pub fn is_every_weekday(&self) -> bool {
        if self.by_day.iter().any(|d| d.ordinal.is_some()) {
            return false;
        }
        let mut days: Vec<WeekdayToken> = self.by_day.iter().map(|d| d.weekday).collect();
        days.sort();
        days.dedup();
        days == WeekdayToken::WORKWEEK
    }
}

impl FromStr for RecurRule {
    type Err = RecurrenceError;

    /// Parses `FREQ=...;...` tokens. A leading `RRULE:` is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = strip_rrule_prefix(s.trim());

        let mut frequency = None;
        let mut rule = RecurRule::new(Frequency::Daily);

        for part in body.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = part
                .split_once('=')
                .ok_or_else(|| RecurrenceError::MalformedPart(part.to_string()))?;
            let value = value.trim();
            match name.trim().to_ascii_uppercase().as_str() {
                "FREQ" => frequency = Some(value.parse::<Frequency>()?),
                "INTERVAL" => {
                    let interval: u16 = parse_number("INTERVAL", value)?;
                    if interval == 0 {
                        return Err(RecurrenceError::InvalidValue {
                            part: "INTERVAL",
                            value: value.to_string(),
                        });
                    }
                    rule.interval = Some(interval);
                }
                "COUNT" => rule.count = Some(parse_number("COUNT", value)?),
                "UNTIL" => rule.until = Some(value.parse()?),
                "WKST" => rule.week_start = Some(value.parse()?),
                "BYDAY" => rule.by_day = parse_list(value, str::parse)?,
                "BYMONTH" => {
                    rule.by_month = parse_list(value, |v| {
                        let n: u8 = parse_number("BYMONTH", v)?;
                        Month::try_from(n).map_err(|_| RecurrenceError::InvalidValue {
                            part: "BYMONTH",
                            value: v.to_string(),
                        })
                    })?
                }
                "BYMONTHDAY" => {
                    rule.by_month_day = parse_list(value, |v| parse_number("BYMONTHDAY", v))?
                }
                "BYYEARDAY" => {
                    rule.by_year_day = parse_list(value, |v| parse_number("BYYEARDAY", v))?
                }
                "BYWEEKNO" => rule.by_week_no = parse_list(value, |v| parse_number("BYWEEKNO", v))?,
                "BYHOUR" => rule.by_hour = parse_list(value, |v| parse_number("BYHOUR", v))?,
                "BYMINUTE" => rule.by_minute = parse_list(value, |v| parse_number("BYMINUTE", v))?,
                "BYSECOND" => rule.by_second = parse_list(value, |v| parse_number("BYSECOND", v))?,
                "BYSETPOS" => rule.by_set_pos = parse_list(value, |v| parse_number("BYSETPOS", v))?,
                other => return Err(RecurrenceError::UnknownPart(other.to_string())),
            }
        }

        rule.frequency = frequency.ok_or(RecurrenceError::MissingFrequency)?;
        Ok(rule)
    }
}

/// Removes a leading `RRULE:` name, case-insensitively.
pub fn strip_rrule_prefix(value: &str) -> &str {
    match value.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("RRULE:") => &value[6..],
        _ => value,
    }
}

fn parse_number<T: FromStr>(part: &'static str, value: &str) -> Result<T, RecurrenceError> {
    value
        .trim()
        .trim_start_matches('+')
        .parse()
        .map_err(|_| RecurrenceError::InvalidValue {
            part,
            value: value.to_string(),
        })
}

fn parse_list<T>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, RecurrenceError>,
) -> Result<Vec<T>, RecurrenceError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    mod parsing {
        use super::*;

        #[test]
        fn weekly_rule() {
            let rule: RecurRule = "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE;WKST=SU".parse().unwrap();
            assert_eq!(rule.frequency, Frequency::Weekly);
            assert_eq!(rule.interval, Some(2));
            assert_eq!(rule.week_start, Some(WeekdayToken::Sunday));
            assert_eq!(
                rule.by_day,
                vec![
                    WeekdayNum {
                        ordinal: None,
                        weekday: WeekdayToken::Monday
                    },
                    WeekdayNum {
                        ordinal: None,
                        weekday: WeekdayToken::Wednesday
                    },
                ]
            );
        }

        #[test]
        fn accepts_prefix_and_lowercase() {
            let rule: RecurRule = "RRULE:freq=monthly;byday=-1fr;bymonth=1,3".parse().unwrap();
            assert_eq!(rule.frequency, Frequency::Monthly);
            assert_eq!(rule.by_day[0].ordinal, Some(-1));
            assert_eq!(rule.by_day[0].weekday, WeekdayToken::Friday);
            assert_eq!(rule.by_month, vec![Month::January, Month::March]);
        }

        #[test]
        fn ordinal_with_plus_sign() {
            let day: WeekdayNum = "+2TU".parse().unwrap();
            assert_eq!(day.ordinal, Some(2));
            assert_eq!(day.weekday, WeekdayToken::Tuesday);
        }

        #[test]
        fn until_forms() {
            assert_eq!(
                "20250105".parse::<Until>().unwrap(),
                Until::Date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
            );
            assert_eq!(
                "20250105T103000Z".parse::<Until>().unwrap().to_utc(),
                Utc.with_ymd_and_hms(2025, 1, 5, 10, 30, 0).unwrap()
            );
            assert!(matches!(
                "20250105T103000".parse::<Until>().unwrap(),
                Until::Floating(_)
            ));
        }
    }

    mod failures {
        use super::*;

        #[test]
        fn missing_frequency() {
            assert_eq!(
                "INTERVAL=2".parse::<RecurRule>().unwrap_err(),
                RecurrenceError::MissingFrequency
            );
        }

        #[test]
        fn unknown_frequency() {
            assert!(matches!(
                "FREQ=FORTNIGHTLY".parse::<RecurRule>(),
                Err(RecurrenceError::UnknownFrequency(_))
            ));
        }

        #[test]
        fn unknown_weekday() {
            assert!(matches!(
                "FREQ=WEEKLY;BYDAY=XX".parse::<RecurRule>(),
                Err(RecurrenceError::UnknownWeekday(_))
            ));
            assert!("FREQ=WEEKLY;BYDAY=0MO".parse::<RecurRule>().is_err());
        }

        #[test]
        fn unsupported_until() {
            assert!(matches!(
                "FREQ=DAILY;UNTIL=tomorrow".parse::<RecurRule>(),
                Err(RecurrenceError::UnsupportedUntil(_))
            ));
        }

        #[test]
        fn bad_numbers_and_parts() {
            assert!(matches!(
                "FREQ=DAILY;INTERVAL=0".parse::<RecurRule>(),
                Err(RecurrenceError::InvalidValue { part: "INTERVAL", .. })
            ));
            assert!(matches!(
                "FREQ=DAILY;COUNT=many".parse::<RecurRule>(),
                Err(RecurrenceError::InvalidValue { part: "COUNT", .. })
            ));
            assert!(matches!(
                "FREQ=YEARLY;BYMONTH=13".parse::<RecurRule>(),
                Err(RecurrenceError::InvalidValue { part: "BYMONTH", .. })
            ));
            assert!(matches!(
                "FREQ=DAILY;X-SKIP=1".parse::<RecurRule>(),
                Err(RecurrenceError::UnknownPart(_))
            ));
            assert!(matches!(
                "FREQ=DAILY;COUNT".parse::<RecurRule>(),
                Err(RecurrenceError::MalformedPart(_))
            ));
        }
    }

    #[test]
    fn every_weekday_detection() {
        let rule: RecurRule = "FREQ=WEEKLY;BYDAY=FR,TH,WE,TU,MO".parse().unwrap();
        assert!(rule.is_every_weekday());
        let rule: RecurRule = "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH".parse().unwrap();
        assert!(!rule.is_every_weekday());
        let rule: RecurRule = "FREQ=MONTHLY;BYDAY=1MO,TU,WE,TH,FR".parse().unwrap();
        assert!(!rule.is_every_weekday());
    }

    #[test]
    fn prefix_stripping() {
        assert_eq!(strip_rrule_prefix("RRULE:FREQ=DAILY"), "FREQ=DAILY");
        assert_eq!(strip_rrule_prefix("rrule:FREQ=DAILY"), "FREQ=DAILY");
        assert_eq!(strip_rrule_prefix("FREQ=DAILY"), "FREQ=DAILY");
    }
}
