//! Task creation schema.

use super::{ValidationErrors, check_name};
use crate::datetime::{parse_time_of_day, parse_timestamp};
use crate::task::{CustomReminder, Frequency, NewTask};

/// Task creation form input, as raw text from the input fields.
///
/// Empty `reminder_time`, `custom_days` and `custom_time` mean "not set". A
/// custom reminder counts as specified as soon as any of its parts is given,
/// and then needs both days and a time.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub name: String,
    pub quantity: String,
    pub frequency: String,
    pub reminder_time: String,
    pub custom_days: Vec<u8>,
    pub custom_time: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: String::new(),
            frequency: Frequency::default().as_str().to_string(),
            reminder_time: String::new(),
            custom_days: Vec::new(),
            custom_time: String::new(),
        }
    }
}

impl TaskForm {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, frequency: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            frequency: frequency.into(),
            ..Self::default()
        }
    }

    pub fn with_reminder_time(mut self, reminder_time: impl Into<String>) -> Self {
        self.reminder_time = reminder_time.into();
        self
    }

    pub fn with_custom_reminder(mut self, days: Vec<u8>, time: impl Into<String>) -> Self {
        self.custom_days = days;
        self.custom_time = time.into();
        self
    }

    pub fn validate(&self) -> Result<NewTask, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "name", &self.name, "Please specify your task.");

        let quantity = match self.quantity.trim() {
            "" => {
                errors.add("quantity", "Please specify quantity.");
                None
            }
            raw => match raw.parse::<i64>() {
                Ok(q) if q < 0 => {
                    errors.add("quantity", "Quantity cannot be negative.");
                    None
                }
                Ok(q) => match u32::try_from(q) {
                    Ok(q) => Some(q),
                    Err(_) => {
                        errors.add("quantity", "Quantity is too large.");
                        None
                    }
                },
                Err(_) => {
                    errors.add("quantity", "Quantity must be a whole number.");
                    None
                }
            },
        };

        let frequency = match self.frequency.parse::<Frequency>() {
            Ok(f) => Some(f),
            Err(_) => {
                errors.add(
                    "frequency",
                    "Frequency must be one of: once a week, twice a day, one day.",
                );
                None
            }
        };

        let reminder_time = if self.reminder_time.trim().is_empty() {
            None
        } else {
            let parsed = parse_timestamp(&self.reminder_time);
            if parsed.is_none() {
                errors.add("reminderTime", "Reminder time must be a date and time.");
            }
            parsed
        };

        let custom_reminder = self.custom_reminder(&mut errors);

        match (quantity, frequency) {
            (Some(quantity), Some(frequency)) => errors.finish(|| NewTask {
                name: self.name.trim().to_string(),
                quantity,
                frequency,
                reminder_time,
                custom_reminder,
            }),
            _ => Err(errors),
        }
    }

    fn custom_reminder(&self, errors: &mut ValidationErrors) -> Option<CustomReminder> {
        let time_given = !self.custom_time.trim().is_empty();
        if self.custom_days.is_empty() && !time_given {
            return None;
        }

        if self.custom_days.is_empty() {
            errors.add("customReminder.days", "Please choose at least one day.");
        } else if self.custom_days.iter().any(|d| *d > 6) {
            errors.add("customReminder.days", "Days must be between 0 (Sunday) and 6 (Saturday).");
        }

        let time = if time_given {
            let parsed = parse_time_of_day(&self.custom_time);
            if parsed.is_none() {
                errors.add("customReminder.time", "Time must be in HH:MM:SS format.");
            }
            parsed
        } else {
            errors.add("customReminder.time", "Please choose a time.");
            None
        };

        let mut days = self.custom_days.clone();
        days.sort_unstable();
        days.dedup();
        time.map(|time| CustomReminder { days, time })
    }
}
