//! Core domain types for the WerkIt tracker.
//!
//! This module defines the entries held by the four lists:
//! - Exercises (named movements)
//! - Workouts (exercise + repetition count)
//! - Plans (named, ordered sequences of workouts)
//! - Days of the weekly schedule
//!
//! Cross-list references are stored as display indices into the target list.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Catalog Entries
// ============================================================================

/// A named physical movement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
}

/// An exercise paired with a target repetition count
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    pub exercise_index: usize,
    pub reps: u32,
}

/// A named, ordered sequence of workouts; repeats are allowed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    pub name: String,
    pub workout_indices: Vec<usize>,
}

/// Trim a user-supplied name, rejecting empty ones
pub fn normalize_name(raw: &str, what: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::InvalidValue(format!("{} name cannot be empty", what)));
    }
    Ok(name.to_string())
}

/// Validate a repetition count typed by the user
pub fn validate_reps(reps: i64) -> Result<u32> {
    if reps <= 0 {
        return Err(Error::InvalidValue(format!(
            "reps must be greater than 0, got {}",
            reps
        )));
    }
    u32::try_from(reps).map_err(|_| Error::InvalidValue(format!("reps {} is too large", reps)))
}

// ============================================================================
// Schedule Types
// ============================================================================

/// Number of slots in the weekly schedule
pub const DAYS_IN_WEEK: usize = 7;

/// Day of the week; day 1 is Monday
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; DAYS_IN_WEEK] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Resolve a user-facing day number (1 = Monday .. 7 = Sunday)
    pub fn from_number(number: usize) -> Result<Day> {
        number
            .checked_sub(1)
            .and_then(|slot| Day::ALL.get(slot).copied())
            .ok_or_else(|| {
                Error::InvalidDay(format!(
                    "day must be between 1 and {}, got {}",
                    DAYS_IN_WEEK, number
                ))
            })
    }

    /// User-facing day number
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
