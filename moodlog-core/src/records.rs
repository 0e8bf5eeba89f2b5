//! Journal entries and goals as handed over by the external store.
//!
//! The core only reads these. Timestamps are kept as the raw strings the store
//! returned; turning them into days is the job of [`crate::dates`].

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::fmt;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Lowest and highest value of every wellbeing rating.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Opaque record identity. The store uses integers, other callers may not.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four self-reported wellbeing metrics attached to an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RatingMetric {
    Sentiment,
    Sleep,
    Stress,
    Social,
}

impl RatingMetric {
    /// Display labels for ratings 1 through 5.
    pub fn labels(self) -> [&'static str; 5] {
        match self {
            RatingMetric::Sentiment => ["Terrible", "Bad", "Okay", "Good", "Great"],
            RatingMetric::Sleep => ["Very Poor", "Poor", "Fair", "Good", "Excellent"],
            RatingMetric::Stress => ["Very High", "High", "Moderate", "Low", "Very Low"],
            RatingMetric::Social => [
                "Very Isolated",
                "Isolated",
                "Neutral",
                "Social",
                "Very Social",
            ],
        }
    }

    pub fn label(self, value: u8) -> Option<&'static str> {
        if !is_valid_rating(value) {
            return None;
        }
        Some(self.labels()[usize::from(value - RATING_MIN)])
    }
}

pub fn is_valid_rating(value: u8) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&value)
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct JournalEntry {
    pub id: RecordId,
    /// Raw timestamp from the store. Unparseable or null values mean "no date".
    #[serde(default, deserialize_with = "de_text")]
    pub date: String,
    #[serde(default, deserialize_with = "de_text")]
    pub title: String,
    #[serde(default, deserialize_with = "de_text")]
    pub content: String,
    #[serde(default, alias = "sentiment_level", deserialize_with = "de_rating")]
    pub sentiment: Option<u8>,
    #[serde(default, alias = "sleep_quality", deserialize_with = "de_rating")]
    pub sleep: Option<u8>,
    #[serde(default, alias = "stress_level", deserialize_with = "de_rating")]
    pub stress: Option<u8>,
    #[serde(default, alias = "social_engagement", deserialize_with = "de_rating")]
    pub social: Option<u8>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// A list, a comma-separated string or null in the store's export.
    #[serde(default, deserialize_with = "de_string_list")]
    pub activities: Vec<String>,
    #[serde(default, alias = "sentiments", deserialize_with = "de_string_list")]
    pub keywords: Vec<String>,
    /// Goals this entry counts towards.
    #[serde(default, deserialize_with = "de_linked_ids")]
    pub goals: Vec<RecordId>,
}

impl JournalEntry {
    pub fn new(id: impl Into<RecordId>, date: &str, title: &str) -> Self {
        Self {
            id: id.into(),
            date: date.to_string(),
            title: title.to_string(),
            content: String::new(),
            sentiment: None,
            sleep: None,
            stress: None,
            social: None,
            created_at: None,
            updated_at: None,
            activities: Vec::new(),
            keywords: Vec::new(),
            goals: Vec::new(),
        }
    }

    /// Sets a rating, ignoring values outside 1..=5.
    pub fn with_rating(mut self, metric: RatingMetric, value: u8) -> Self {
        let value = Some(value).filter(|v| is_valid_rating(*v));
        match metric {
            RatingMetric::Sentiment => self.sentiment = value,
            RatingMetric::Sleep => self.sleep = value,
            RatingMetric::Stress => self.stress = value,
            RatingMetric::Social => self.social = value,
        }
        self
    }

    pub fn rating(&self, metric: RatingMetric) -> Option<u8> {
        match metric {
            RatingMetric::Sentiment => self.sentiment,
            RatingMetric::Sleep => self.sleep,
            RatingMetric::Stress => self.stress,
            RatingMetric::Social => self.social,
        }
    }

    pub fn with_goal(mut self, goal: impl Into<RecordId>) -> Self {
        self.goals.push(goal.into());
        self
    }
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Listing position: high first, low last.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("unknown priority `{raw}`")))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Goal {
    pub id: RecordId,
    #[serde(default, deserialize_with = "de_text")]
    pub title: String,
    /// Absent for recurring goals, which never appear on the calendar.
    #[serde(default, alias = "targetDate")]
    pub target_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "de_progress")]
    pub progress: u8,
    #[serde(default, rename = "type")]
    pub goal_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Entries recorded against this goal, as ids or embedded records.
    #[serde(default, deserialize_with = "de_linked_ids")]
    pub journal_entries: Vec<RecordId>,
}

impl Goal {
    pub fn new(id: impl Into<RecordId>, title: &str, target_date: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            target_date: target_date.map(str::to_string),
            priority: Priority::default(),
            progress: 0,
            goal_type: None,
            category: None,
            description: None,
            journal_entries: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.target_date.is_none()
    }

    /// Whether `entry` was recorded against this goal, from either side of the link.
    pub fn is_linked_to(&self, entry: &JournalEntry) -> bool {
        self.journal_entries.contains(&entry.id) || entry.goals.contains(&self.id)
    }
}

fn de_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let raw: Option<i64> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|n| u8::try_from(n).ok())
        .filter(|n| is_valid_rating(*n)))
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Items(Vec<String>),
    Joined(String),
}

fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<RawList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RawList::Items(items)) => items,
        Some(RawList::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
    };
    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

/// Accepts `[1, "a", {"id": 2, ...}]` or null. Elements without an id are dropped.
fn de_linked_ids<'de, D>(deserializer: D) -> Result<Vec<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .iter()
        .filter_map(|value| match value {
            Value::Object(record) => record.get("id").and_then(link_id),
            other => link_id(other),
        })
        .collect())
}

fn link_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => Some(RecordId(n.to_string())),
        Value::String(s) => Some(RecordId(s.clone())),
        _ => None,
    }
}

fn de_progress<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw: Option<i64> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0).clamp(0, 100) as u8)
}
