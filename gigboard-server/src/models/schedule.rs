//! Show times: the fixed display format and the past/upcoming split

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::Serialize;

/// Display and form format for show start times (UTC)
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a start time as `YYYY-MM-DD HH:MM:SS`.
pub fn format_start_time(at: DateTime<Utc>) -> String {
    at.format(START_TIME_FORMAT).to_string()
}

/// Parse a submitted start time.
///
/// Accepts the display format (read as UTC) or RFC 3339 with any offset.
pub fn parse_start_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, START_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

/// Earliest and latest years a PostgreSQL TIMESTAMPTZ can hold
/// (4713 BC is year -4712 in the proleptic calendar)
const MIN_STORABLE_YEAR: i32 = -4712;
const MAX_STORABLE_YEAR: i32 = 294_276;

/// Whether the database can store `at`.
pub fn is_storable(at: DateTime<Utc>) -> bool {
    (MIN_STORABLE_YEAR..=MAX_STORABLE_YEAR).contains(&at.year())
}

/// Shows split around a reference instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowPartition<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Split `shows` into past (`start < now`) and upcoming (`start >= now`).
///
/// Every show lands on exactly one side; input order is kept on both.
pub fn partition_shows<T, F>(shows: Vec<T>, now: DateTime<Utc>, start_time: F) -> ShowPartition<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let (past, upcoming): (Vec<T>, Vec<T>) = shows.into_iter().partition(|show| start_time(show) < now);
    ShowPartition { past, upcoming }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn formats_without_offset() {
        let t = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(format_start_time(t), "2035-04-01 20:00:00");
    }

    #[test]
    fn parses_display_format_and_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(parse_start_time("2019-05-21 21:30:00"), Some(expected));
        assert_eq!(parse_start_time("2019-05-21T21:30:00Z"), Some(expected));
        assert_eq!(parse_start_time("2019-05-21T23:30:00+02:00"), Some(expected));
        assert_eq!(parse_start_time("next tuesday"), None);
    }

    #[test]
    fn storable_range() {
        assert!(is_storable(Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap()));
        assert!(is_storable(Utc.with_ymd_and_hms(-4712, 1, 1, 0, 0, 0).unwrap()));
        assert!(!is_storable(Utc.with_ymd_and_hms(-4713, 12, 31, 0, 0, 0).unwrap()));
    }

    #[test]
    fn show_at_now_is_upcoming() {
        let now = at(1_000);
        let split = partition_shows(vec![at(999), at(1_000), at(1_001)], now, |t| *t);
        assert_eq!(split.past, vec![at(999)]);
        assert_eq!(split.upcoming, vec![at(1_000), at(1_001)]);
    }

    #[test]
    fn keeps_order() {
        let now = at(0) + Duration::days(10);
        let shows = vec![at(5), at(1), at(0) + Duration::days(20), at(3)];
        let split = partition_shows(shows, now, |t| *t);
        assert_eq!(split.past, vec![at(5), at(1), at(3)]);
    }

    proptest! {
        /// Property: each show appears on exactly one side, on the correct side
        #[test]
        fn prop_every_show_on_exactly_one_side(
            starts in prop::collection::vec(-1_000i64..1_000, 0..50),
            now in -1_000i64..1_000,
        ) {
            let shows: Vec<(usize, DateTime<Utc>)> =
                starts.iter().enumerate().map(|(i, s)| (i, at(*s))).collect();
            let split = partition_shows(shows.clone(), at(now), |(_, t)| *t);

            prop_assert_eq!(split.past.len() + split.upcoming.len(), shows.len());
            for (_, t) in &split.past {
                prop_assert!(*t < at(now));
            }
            for (_, t) in &split.upcoming {
                prop_assert!(*t >= at(now));
            }

            let mut seen: Vec<usize> = split
                .past
                .iter()
                .chain(split.upcoming.iter())
                .map(|(i, _)| *i)
                .collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..shows.len()).collect::<Vec<_>>());
        }
    }
}
