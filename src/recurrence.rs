//! Recurrence rules and occurrence expansion.
//!
//! A recurring event arrives from the CMS as a single template entry carrying
//! a compact rule string (an iCalendar RRULE subset):
//!
//! ```text
//! FREQ=WEEKLY;INTERVAL=2;COUNT=3
//! FREQ=DAILY;UNTIL=20240612T110000Z
//! ```
//!
//! [`expand_occurrences`] turns one decoded template into the finite ordered
//! sequence of concrete occurrences the rest of the system works with. An
//! event without a rule expands to itself, unchanged.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::model::Event;

/// Hard cap on occurrences produced from a single template.
///
/// A rule without COUNT or UNTIL, or one whose bounds are absurdly wide,
/// stops here instead of filling memory. One year of daily occurrences.
pub const MAX_OCCURRENCES: usize = 366;

/// How often an occurrence repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    fn from_key(value: &str) -> Result<Self, DecodeError> {
        match value.trim().to_uppercase().as_str() {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            other => Err(DecodeError::InvalidRecurrence(format!(
                "unsupported FREQ '{other}'"
            ))),
        }
    }
}

/// A repeating schedule: pattern plus range bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    /// Number of `freq` units between occurrences; 0 is treated as 1.
    pub interval: u32,
    /// Maximum number of occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Last instant an occurrence may start at (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
}

impl RecurrenceRule {
    /// Parse a `KEY=VALUE;...` rule string.
    ///
    /// Unknown keys are ignored for forward compatibility; a missing FREQ or
    /// an unparseable value fails the rule (and with it the whole record).
    pub fn parse(rule: &str) -> Result<Self, DecodeError> {
        let rule = rule.trim();
        let rule = rule.strip_prefix("RRULE:").unwrap_or(rule);

        let mut freq = None;
        let mut interval = 1u32;
        let mut count = None;
        let mut until = None;

        for part in rule.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, value) = part.split_once('=').ok_or_else(|| {
                DecodeError::InvalidRecurrence(format!("expected KEY=VALUE, found '{part}'"))
            })?;

            match key.to_uppercase().as_str() {
                "FREQ" => freq = Some(Frequency::from_key(value)?),
                "INTERVAL" => {
                    interval = value.trim().parse().map_err(|_| {
                        DecodeError::InvalidRecurrence(format!("invalid INTERVAL '{value}'"))
                    })?;
                }
                "COUNT" => {
                    count = Some(value.trim().parse().map_err(|_| {
                        DecodeError::InvalidRecurrence(format!("invalid COUNT '{value}'"))
                    })?);
                }
                "UNTIL" => until = Some(parse_until(value.trim())?),
                _ => {}
            }
        }

        let freq = freq
            .ok_or_else(|| DecodeError::InvalidRecurrence("missing FREQ".to_string()))?;

        Ok(Self {
            freq,
            interval,
            count,
            until,
        })
    }
}

/// Parse an UNTIL bound: `YYYYMMDDTHHMMSSZ` or date-only `YYYYMMDD`.
fn parse_until(value: &str) -> Result<DateTime<Utc>, DecodeError> {
    if let Some(datetime) = value.strip_suffix('Z') {
        NaiveDateTime::parse_from_str(datetime, "%Y%m%dT%H%M%S")
            .map(|parsed| parsed.and_utc())
            .map_err(|_| DecodeError::InvalidRecurrence(format!("invalid UNTIL '{value}'")))
    } else if value.len() == 8 {
        NaiveDate::parse_from_str(value, "%Y%m%d")
            .map(|date| date.and_hms_opt(23, 59, 59).unwrap_or_default().and_utc())
            .map_err(|_| DecodeError::InvalidRecurrence(format!("invalid UNTIL '{value}'")))
    } else {
        Err(DecodeError::InvalidRecurrence(format!(
            "invalid UNTIL '{value}'"
        )))
    }
}

/// Expand one decoded event into its concrete occurrences.
///
/// Without a rule the event passes through as a one-element sequence.
/// With a rule, occurrences step forward from the template's start time,
/// preserving the event duration, until COUNT, UNTIL, or
/// [`MAX_OCCURRENCES`] stops them. Every occurrence carries
/// `recurrence: None`; the template itself is not kept.
pub fn expand_occurrences(event: Event) -> Vec<Event> {
    let rule = match event.recurrence.clone() {
        None => return vec![event],
        Some(rule) => rule,
    };

    let duration = event.end_time - event.start_time;
    let interval = rule.interval.max(1);
    let mut occurrences = Vec::new();
    let mut start = event.start_time;

    loop {
        if occurrences.len() >= MAX_OCCURRENCES {
            break;
        }
        if let Some(count) = rule.count {
            if occurrences.len() as u32 >= count {
                break;
            }
        }
        if let Some(until) = rule.until {
            if start > until {
                break;
            }
        }

        let mut occurrence = event.clone();
        occurrence.start_time = start;
        occurrence.end_time = start + duration;
        occurrence.recurrence = None;
        occurrences.push(occurrence);

        start = match step(start, rule.freq, interval) {
            Some(next) => next,
            None => break,
        };
    }

    occurrences
}

fn step(from: DateTime<Utc>, freq: Frequency, interval: u32) -> Option<DateTime<Utc>> {
    match freq {
        Frequency::Daily => from.checked_add_signed(Duration::days(i64::from(interval))),
        Frequency::Weekly => from.checked_add_signed(Duration::weeks(i64::from(interval))),
        Frequency::Monthly => from.checked_add_months(Months::new(interval)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;
    use chrono::TimeZone;

    fn template(recurrence: Option<RecurrenceRule>) -> Event {
        Event {
            id: "evt-1".into(),
            name: "Morning Run".into(),
            description: "A run in the park".into(),
            categories: vec!["Sport".into()],
            price_low: 0.0,
            price_high: 0.0,
            start_time: Utc.with_ymd_and_hms(2024, 6, 9, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, 9, 10, 0, 0).unwrap(),
            location: Location {
                lat: 51.5,
                lon: -0.14,
                name: "Hyde Park".into(),
            },
            accessibility_details: None,
            email: None,
            phone: None,
            ticketing_url: None,
            picture: None,
            recurrence,
        }
    }

    #[test]
    fn test_parse_basic_rule() {
        let rule = RecurrenceRule::parse("FREQ=WEEKLY;INTERVAL=2;COUNT=3").unwrap();
        assert_eq!(rule.freq, Frequency::Weekly);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.count, Some(3));
        assert_eq!(rule.until, None);
    }

    #[test]
    fn test_parse_until_datetime_and_date() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;UNTIL=20240612T110000Z").unwrap();
        assert_eq!(
            rule.until,
            Some(Utc.with_ymd_and_hms(2024, 6, 12, 11, 0, 0).unwrap())
        );

        let rule = RecurrenceRule::parse("FREQ=DAILY;UNTIL=20240612").unwrap();
        assert_eq!(
            rule.until,
            Some(Utc.with_ymd_and_hms(2024, 6, 12, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;WKST=MO;BYDAY=SA").unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
    }

    #[test]
    fn test_parse_rejects_missing_freq_and_bad_values() {
        assert!(RecurrenceRule::parse("INTERVAL=2").is_err());
        assert!(RecurrenceRule::parse("FREQ=FORTNIGHTLY").is_err());
        assert!(RecurrenceRule::parse("FREQ=DAILY;COUNT=three").is_err());
        assert!(RecurrenceRule::parse("FREQ=DAILY;garbage").is_err());
    }

    #[test]
    fn test_expand_without_rule_is_identity() {
        let event = template(None);
        let occurrences = expand_occurrences(event.clone());
        assert_eq!(occurrences, vec![event]);
    }

    #[test]
    fn test_expand_count_produces_distinct_starts() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;COUNT=3").unwrap();
        let occurrences = expand_occurrences(template(Some(rule)));

        assert_eq!(occurrences.len(), 3);
        for (i, occurrence) in occurrences.iter().enumerate() {
            assert_eq!(
                occurrence.start_time,
                Utc.with_ymd_and_hms(2024, 6, 9 + i as u32, 9, 0, 0).unwrap()
            );
            // Occurrences differ only in their resolved times.
            assert_eq!(occurrence.name, "Morning Run");
            assert_eq!(occurrence.location.name, "Hyde Park");
            assert_eq!(occurrence.recurrence, None);
            assert_eq!(occurrence.end_time - occurrence.start_time, Duration::hours(1));
        }
    }

    #[test]
    fn test_expand_until_is_inclusive() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;UNTIL=20240611T090000Z").unwrap();
        let occurrences = expand_occurrences(template(Some(rule)));
        assert_eq!(occurrences.len(), 3); // 9th, 10th, 11th
    }

    #[test]
    fn test_expand_unbounded_rule_hits_cap() {
        let rule = RecurrenceRule::parse("FREQ=DAILY").unwrap();
        let occurrences = expand_occurrences(template(Some(rule)));
        assert_eq!(occurrences.len(), MAX_OCCURRENCES);
    }

    #[test]
    fn test_expand_monthly_steps_by_month() {
        let rule = RecurrenceRule::parse("FREQ=MONTHLY;COUNT=2").unwrap();
        let occurrences = expand_occurrences(template(Some(rule)));
        assert_eq!(occurrences.len(), 2);
        assert_eq!(
            occurrences[1].start_time,
            Utc.with_ymd_and_hms(2024, 7, 9, 9, 0, 0).unwrap()
        );
    }
}
