//! The journal list filter: title search, rating buckets and a date range.

use crate::dates::{DateKey, DayBoundary, parse_timestamp};
use crate::records::{JournalEntry, RatingMetric};
use chrono::NaiveDateTime;
use strum::IntoEnumIterator;

/// All set criteria must hold for an entry to pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive title substring. Empty matches every title.
    pub title: String,
    /// Inclusive first day.
    pub start: Option<DateKey>,
    /// Inclusive last day, covering the whole civil day.
    pub end: Option<DateKey>,
    pub sentiment: Option<u8>,
    pub sleep: Option<u8>,
    pub stress: Option<u8>,
    pub social: Option<u8>,
}

impl FilterCriteria {
    pub fn rating(&self, metric: RatingMetric) -> Option<u8> {
        match metric {
            RatingMetric::Sentiment => self.sentiment,
            RatingMetric::Sleep => self.sleep,
            RatingMetric::Stress => self.stress,
            RatingMetric::Social => self.social,
        }
    }

    pub fn with_rating(mut self, metric: RatingMetric, value: u8) -> Self {
        match metric {
            RatingMetric::Sentiment => self.sentiment = Some(value),
            RatingMetric::Sleep => self.sleep = Some(value),
            RatingMetric::Stress => self.stress = Some(value),
            RatingMetric::Social => self.social = Some(value),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn matches(&self, entry: &JournalEntry, title_needle: &str, day: Option<DateKey>) -> bool {
        if !title_needle.is_empty() && !entry.title.to_lowercase().contains(title_needle) {
            return false;
        }

        let ratings_match = RatingMetric::iter().all(|metric| match self.rating(metric) {
            Some(wanted) => entry.rating(metric) == Some(wanted),
            None => true,
        });
        if !ratings_match {
            return false;
        }

        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        match day {
            Some(day) => {
                self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
            }
            None => false,
        }
    }
}

/// Filters `entries` and returns them newest first.
///
/// Entries with equal timestamps keep their input order. Entries whose date
/// cannot be read never match a date range and sort after every dated entry.
pub fn filter_entries<'a>(
    entries: &'a [JournalEntry],
    criteria: &FilterCriteria,
    boundary: DayBoundary,
) -> Vec<&'a JournalEntry> {
    let needle = criteria.title.to_lowercase();

    let mut matched: Vec<(Option<NaiveDateTime>, &'a JournalEntry)> = entries
        .iter()
        .map(|entry| (parse_timestamp(&entry.date, boundary), entry))
        .filter(|(timestamp, entry)| {
            criteria.matches(entry, &needle, timestamp.map(DateKey::from))
        })
        .collect();

    matched.sort_by(|(a, _), (b, _)| b.cmp(a));
    matched.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::JournalEntry;
    use crate::tests::common::{entry, key};

    fn ids(found: &[&JournalEntry]) -> Vec<String> {
        found.iter().map(|e| e.id.to_string()).collect()
    }

    fn titled(id: &str, date: &str, title: &str) -> JournalEntry {
        JournalEntry::new(id, date, title)
    }

    #[test]
    fn empty_criteria_returns_everything_newest_first() {
        let entries = vec![
            entry("a", "2024-03-01T10:00:00"),
            entry("b", "2024-03-03T10:00:00"),
            entry("c", "not a date"),
            entry("d", "2024-03-02T10:00:00"),
        ];
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());

        let found = filter_entries(&entries, &criteria, DayBoundary::Utc);
        assert_eq!(ids(&found), ["b", "d", "a", "c"]);
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let entries = vec![
            entry("first", "2024-03-01"),
            entry("second", "2024-03-01"),
            entry("later", "2024-03-05"),
        ];
        let found = filter_entries(&entries, &FilterCriteria::default(), DayBoundary::Utc);
        assert_eq!(ids(&found), ["later", "first", "second"]);
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        let entries = vec![
            titled("1", "2024-03-01", "Morning Run"),
            titled("2", "2024-03-02", "Quiet evening"),
            titled("3", "2024-03-03", "RUNNING late"),
        ];
        let criteria = FilterCriteria {
            title: "run".to_string(),
            ..Default::default()
        };
        let found = filter_entries(&entries, &criteria, DayBoundary::Utc);
        assert_eq!(ids(&found), ["3", "1"]);
    }

    #[test]
    fn rating_filter_is_exact_and_skips_missing_ratings() {
        let entries = vec![
            entry("1", "2024-03-01").with_rating(RatingMetric::Sentiment, 5),
            entry("2", "2024-03-01").with_rating(RatingMetric::Sentiment, 2),
            entry("3", "2024-03-01"),
        ];
        let criteria = FilterCriteria::default().with_rating(RatingMetric::Sentiment, 5);

        let found = filter_entries(&entries, &criteria, DayBoundary::Utc);
        assert_eq!(ids(&found), ["1"]);
    }

    #[test]
    fn rating_criteria_combine_with_and() {
        let entries = vec![
            entry("1", "2024-03-01")
                .with_rating(RatingMetric::Sleep, 4)
                .with_rating(RatingMetric::Stress, 2),
            entry("2", "2024-03-01").with_rating(RatingMetric::Sleep, 4),
        ];
        let criteria = FilterCriteria::default()
            .with_rating(RatingMetric::Sleep, 4)
            .with_rating(RatingMetric::Stress, 2);

        let found = filter_entries(&entries, &criteria, DayBoundary::Utc);
        assert_eq!(ids(&found), ["1"]);
    }

    #[test]
    fn date_range_includes_the_whole_end_day() {
        let entries = vec![
            entry("before", "2024-02-29T23:59:59"),
            entry("start", "2024-03-01T00:00:00"),
            entry("end", "2024-03-03T23:59:59"),
            entry("after", "2024-03-04T00:00:00"),
            entry("broken", "soon"),
        ];
        let criteria = FilterCriteria {
            start: Some(key(2024, 3, 1)),
            end: Some(key(2024, 3, 3)),
            ..Default::default()
        };
        let found = filter_entries(&entries, &criteria, DayBoundary::Utc);
        assert_eq!(ids(&found), ["end", "start"]);
    }

    #[test]
    fn open_ended_ranges() {
        let entries = vec![entry("old", "2023-01-01"), entry("new", "2024-06-01")];
        let from = FilterCriteria {
            start: Some(key(2024, 1, 1)),
            ..Default::default()
        };
        let until = FilterCriteria {
            end: Some(key(2023, 12, 31)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &from, DayBoundary::Utc)), ["new"]);
        assert_eq!(ids(&filter_entries(&entries, &until, DayBoundary::Utc)), ["old"]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let entries = vec![entry("1", "2024-03-02")];
        let criteria = FilterCriteria {
            start: Some(key(2024, 3, 5)),
            end: Some(key(2024, 3, 1)),
            ..Default::default()
        };
        assert!(filter_entries(&entries, &criteria, DayBoundary::Utc).is_empty());
    }
}
