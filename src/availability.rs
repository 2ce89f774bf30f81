//! Weekly availability parsing and booking-time checks.
//!
//! Lawyer profiles carry availability as free text like
//! `"Mon–Fri, 10:00–17:00"` or `"Sunday, Tuesday, 09:00-13:00"`. The
//! grammar is comma-separated tokens: a token is either a `HH:MM–HH:MM`
//! time window or a day name / day range. Unrecognized tokens are ignored
//! rather than failing the whole string.

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDateTime, Timelike};
use regex::Regex;

// Compile-once regex patterns via OnceLock.
fn re_time_window() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Accepts a hyphen or an en dash between the two times.
    RE.get_or_init(|| Regex::new(r"(\d{1,2}):(\d{2})\s*[–-]\s*(\d{1,2}):(\d{2})").unwrap())
}

fn re_day_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*[–-]\s*").unwrap())
}

/// Minutes-of-day window with inclusive ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_min: u32,
    pub end_min: u32,
}

/// Parsed weekly availability. Day indexes run Sunday = 0 .. Saturday = 6.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Availability {
    days: HashSet<u8>,
    hours: Option<TimeWindow>,
}

impl Availability {
    /// Parse an availability string. An empty or fully unrecognizable
    /// string yields an unconstrained availability.
    pub fn parse(details: &str) -> Availability {
        let mut availability = Availability::default();

        for token in details.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(caps) = re_time_window().captures(token) {
                let h1: u32 = caps[1].parse().unwrap_or(0);
                let m1: u32 = caps[2].parse().unwrap_or(0);
                let h2: u32 = caps[3].parse().unwrap_or(0);
                let m2: u32 = caps[4].parse().unwrap_or(0);
                // A later window in the string overwrites an earlier one.
                availability.hours = Some(TimeWindow {
                    start_min: h1 * 60 + m1,
                    end_min: h2 * 60 + m2,
                });
                continue;
            }

            let cleaned = token.replace('.', "");
            let parts: Vec<&str> = re_day_separator().split(&cleaned).collect();
            if parts.len() == 2 {
                if let (Some(start), Some(end)) = (day_index(parts[0]), day_index(parts[1])) {
                    availability.days.extend(expand_day_range(start, end));
                    continue;
                }
            }
            if let Some(day) = day_index(&cleaned) {
                availability.days.insert(day);
            }
        }

        availability
    }

    pub fn is_unconstrained(&self) -> bool {
        self.days.is_empty() && self.hours.is_none()
    }

    /// Whether a booking at `when` falls inside this availability.
    ///
    /// An unparseable booking time is never available. An unconstrained
    /// availability accepts any valid time. An empty day set with a time
    /// window applies the window on every day.
    pub fn allows(&self, when: Option<NaiveDateTime>) -> bool {
        let dt = match when {
            Some(dt) => dt,
            None => return false,
        };
        if self.is_unconstrained() {
            return true;
        }

        if !self.days.is_empty() {
            let day = dt.weekday().num_days_from_sunday() as u8;
            if !self.days.contains(&day) {
                return false;
            }
        }

        if let Some(window) = self.hours {
            let minutes = dt.hour() * 60 + dt.minute();
            if minutes < window.start_min || minutes > window.end_min {
                return false;
            }
        }

        true
    }
}

fn day_index(name: &str) -> Option<u8> {
    match name.trim().to_lowercase().as_str() {
        "sunday" | "sun" => Some(0),
        "monday" | "mon" => Some(1),
        "tuesday" | "tue" | "tues" => Some(2),
        "wednesday" | "wed" => Some(3),
        "thursday" | "thu" | "thur" | "thurs" => Some(4),
        "friday" | "fri" => Some(5),
        "saturday" | "sat" => Some(6),
        _ => None,
    }
}

/// Expand a day range circularly, so `Fri–Mon` covers Fri, Sat, Sun, Mon.
fn expand_day_range(start: u8, end: u8) -> Vec<u8> {
    let mut days = Vec::new();
    let mut i = start;
    for _ in 0..7 {
        days.push(i);
        if i == end {
            break;
        }
        i = (i + 1) % 7;
    }
    days
}

/// Join day names and a time window back into the canonical stored form,
/// e.g. `"Monday, Friday, 10:00–17:00"`. Used when registering a lawyer.
pub fn format_details(days: &[String], start: &str, end: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let day_list = days
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !day_list.is_empty() {
        parts.push(day_list);
    }
    if !start.trim().is_empty() && !end.trim().is_empty() {
        parts.push(format!("{}–{}", start.trim(), end.trim()));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_datetime;

    fn at(s: &str) -> Option<NaiveDateTime> {
        parse_datetime(s)
    }

    #[test]
    fn test_single_day_with_window() {
        let avail = Availability::parse("Monday, 10:00–14:00");
        // 2025-06-02 is a Monday.
        assert!(avail.allows(at("2025-06-02T12:00")));
        assert!(!avail.allows(at("2025-06-02T15:00")));
        // Tuesday is outside the day set.
        assert!(!avail.allows(at("2025-06-03T12:00")));
    }

    #[test]
    fn test_window_ends_are_inclusive() {
        let avail = Availability::parse("Monday, 10:00-14:00");
        assert!(avail.allows(at("2025-06-02T10:00")));
        assert!(avail.allows(at("2025-06-02T14:00")));
        assert!(!avail.allows(at("2025-06-02T14:01")));
        assert!(!avail.allows(at("2025-06-02T09:59")));
    }

    #[test]
    fn test_empty_availability_accepts_any_valid_time() {
        let avail = Availability::parse("");
        assert!(avail.is_unconstrained());
        assert!(avail.allows(at("2025-06-07T03:00")));
    }

    #[test]
    fn test_invalid_booking_time_is_never_available() {
        let avail = Availability::parse("");
        assert!(!avail.allows(None));
    }

    #[test]
    fn test_day_range_expands_forward() {
        let avail = Availability::parse("Mon–Fri");
        // Mon 2025-06-02 through Fri 2025-06-06.
        assert!(avail.allows(at("2025-06-02T09:00")));
        assert!(avail.allows(at("2025-06-04T09:00")));
        assert!(avail.allows(at("2025-06-06T09:00")));
        // Saturday and Sunday excluded.
        assert!(!avail.allows(at("2025-06-07T09:00")));
        assert!(!avail.allows(at("2025-06-08T09:00")));
    }

    #[test]
    fn test_day_range_wraps_around_the_week() {
        let avail = Availability::parse("Fri-Mon");
        assert!(avail.allows(at("2025-06-06T09:00"))); // Friday
        assert!(avail.allows(at("2025-06-07T09:00"))); // Saturday
        assert!(avail.allows(at("2025-06-08T09:00"))); // Sunday
        assert!(avail.allows(at("2025-06-09T09:00"))); // Monday
        assert!(!avail.allows(at("2025-06-10T09:00"))); // Tuesday
    }

    #[test]
    fn test_window_without_days_applies_every_day() {
        let avail = Availability::parse("09:00–12:00");
        assert!(avail.allows(at("2025-06-02T10:00"))); // Monday
        assert!(avail.allows(at("2025-06-08T10:00"))); // Sunday
        assert!(!avail.allows(at("2025-06-08T13:00")));
    }

    #[test]
    fn test_abbreviations_and_dots_are_accepted() {
        let avail = Availability::parse("Tues., Thur., 10:00-11:00");
        assert!(avail.allows(at("2025-06-03T10:30"))); // Tuesday
        assert!(avail.allows(at("2025-06-05T10:30"))); // Thursday
        assert!(!avail.allows(at("2025-06-04T10:30"))); // Wednesday
    }

    #[test]
    fn test_unrecognized_tokens_are_ignored() {
        let avail = Availability::parse("by appointment only");
        assert!(avail.is_unconstrained());

        let avail = Availability::parse("Monday, call first");
        assert!(avail.allows(at("2025-06-02T10:00")));
        assert!(!avail.allows(at("2025-06-03T10:00")));
    }

    #[test]
    fn test_later_time_window_overwrites_earlier() {
        let avail = Availability::parse("08:00-09:00, 14:00-16:00");
        assert!(!avail.allows(at("2025-06-02T08:30")));
        assert!(avail.allows(at("2025-06-02T15:00")));
    }

    #[test]
    fn test_format_details_round_trips_through_parse() {
        let details = format_details(
            &["Monday".to_string(), "Wednesday".to_string()],
            "10:00",
            "16:30",
        );
        assert_eq!(details, "Monday, Wednesday, 10:00–16:30");

        let avail = Availability::parse(&details);
        assert!(avail.allows(at("2025-06-02T10:00")));
        assert!(avail.allows(at("2025-06-04T16:30")));
        assert!(!avail.allows(at("2025-06-03T12:00")));
    }

    #[test]
    fn test_format_details_with_days_only() {
        assert_eq!(
            format_details(&["Sat".to_string(), "Sun".to_string()], "", ""),
            "Sat, Sun"
        );
        assert_eq!(format_details(&[], "09:00", "17:00"), "09:00–17:00");
        assert_eq!(format_details(&[], "", ""), "");
    }
}
