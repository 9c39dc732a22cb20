//! Task domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::datetime::{self, parse_time_of_day};

const WEEKDAY_LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Returns the display label of a weekday index (0 = Sunday).
pub fn weekday_label(index: u8) -> Option<&'static str> {
    WEEKDAY_LABELS.get(index as usize).copied()
}

/// How often a task should be performed.
///
/// The service accepts exactly these three literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    #[serde(rename = "once a week")]
    OnceAWeek,
    #[serde(rename = "twice a day")]
    TwiceADay,
    #[serde(rename = "one day")]
    OneDay,
}

impl Frequency {
    /// All accepted frequencies, in display order.
    pub const ALL: [Frequency; 3] = [Frequency::OnceAWeek, Frequency::TwiceADay, Frequency::OneDay];

    /// The wire literal for this frequency.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OnceAWeek => "once a week",
            Frequency::TwiceADay => "twice a day",
            Frequency::OneDay => "one day",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| format!("unknown frequency '{}'", s))
    }
}

/// A weekly reminder on a set of weekdays at a fixed time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomReminder {
    /// Weekday indices, 0 = Sunday through 6 = Saturday, sorted and unique
    pub days: Vec<u8>,
    /// Time of day the reminder fires
    #[serde(with = "datetime::hms")]
    pub time: NaiveTime,
}

impl CustomReminder {
    /// Human readable day list, e.g. "Monday, Wednesday".
    pub fn day_labels(&self) -> String {
        self.days
            .iter()
            .filter_map(|d| weekday_label(*d))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A task as returned by the service.
///
/// The owning goal is fixed at creation; it is only readable through
/// [`Task::goal_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub completed: bool,
    /// Whether the server scheduled a reminder for this task
    #[serde(default)]
    pub reminder: bool,
    #[serde(default, with = "datetime::lenient_timestamp")]
    pub reminder_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_custom_reminder")]
    pub custom_reminder: Option<CustomReminder>,
    #[serde(
        default,
        rename = "goal",
        serialize_with = "serialize_goal_ref",
        deserialize_with = "deserialize_goal_ref"
    )]
    goal: Option<String>,
}

impl Task {
    /// Creates a task record owned by `goal_id`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        frequency: Frequency,
        goal_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            frequency,
            completed: false,
            reminder: false,
            reminder_time: None,
            custom_reminder: None,
            goal: Some(goal_id.into()),
        }
    }

    /// Sets the completion flag (builder style, for records from fixtures).
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// ID of the owning goal, if the server included it.
    pub fn goal_id(&self) -> Option<&str> {
        self.goal.as_deref()
    }
}

/// Payload for `POST tasks/{goalId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub quantity: u32,
    pub frequency: Frequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_reminder: Option<CustomReminder>,
}

/// Payload for `PUT tasks/update/{taskId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCompletion {
    pub completed: bool,
}

/// The `goal` back-reference arrives either as a bare id or as a populated
/// goal document.
#[derive(Deserialize)]
#[serde(untagged)]
enum GoalRef {
    Id(String),
    Document {
        #[serde(rename = "_id")]
        id: String,
    },
}

fn deserialize_goal_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw: Option<GoalRef> = Option::deserialize(deserializer)?;
    Ok(raw.map(|r| match r {
        GoalRef::Id(id) | GoalRef::Document { id } => id,
    }))
}

fn serialize_goal_ref<S: Serializer>(goal: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match goal {
        Some(id) => serializer.serialize_str(id),
        None => serializer.serialize_none(),
    }
}

/// Documents created without a custom reminder often carry an empty
/// `{ "days": [] }` subdocument; those map to `None`.
fn lenient_custom_reminder<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<CustomReminder>, D::Error> {
    #[derive(Deserialize)]
    struct Raw {
        #[serde(default)]
        days: Vec<u8>,
        #[serde(default)]
        time: Option<String>,
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|r| {
        let time = r.time.as_deref().and_then(parse_time_of_day)?;
        let mut days: Vec<u8> = r.days.into_iter().filter(|d| *d <= 6).collect();
        days.sort_unstable();
        days.dedup();
        if days.is_empty() {
            None
        } else {
            Some(CustomReminder { days, time })
        }
    }))
}
