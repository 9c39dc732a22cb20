//! Goal creation schema.

use chrono::{Days, NaiveDate};

use super::{ValidationErrors, check_name};
use crate::datetime::midnight_utc;
use crate::goal::NewGoal;

/// Goal creation form input.
///
/// Dates are calendar days; they are sent as UTC midnight timestamps.
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub name: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl GoalForm {
    pub fn new(name: impl Into<String>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Validates against the submission day `today`.
    ///
    /// The start date may not be earlier than yesterday, and the end date
    /// may not precede the start date.
    pub fn validate(&self, today: NaiveDate) -> Result<NewGoal, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "name", &self.name, "Please specify your goal.");

        let earliest = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        match (self.start, self.end) {
            (None, _) => errors.add("date", "Please choose a start date."),
            (Some(start), _) if start < earliest => {
                errors.add("date", "Start date cannot be earlier than yesterday.")
            }
            (Some(_), None) => errors.add("date", "Please choose an end date."),
            (Some(start), Some(end)) if end < start => {
                errors.add("date", "End date cannot be before the start date.")
            }
            _ => {}
        }

        match (self.start, self.end) {
            (Some(start), Some(end)) => errors.finish(|| NewGoal {
                name: self.name.trim().to_string(),
                min_time_line: midnight_utc(start),
                max_time_line: midnight_utc(end),
            }),
            _ => Err(errors),
        }
    }
}
