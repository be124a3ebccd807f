//! Exercise catalog.

use crate::indexed::IndexedList;
use crate::types::{normalize_name, Exercise};
use crate::workout::WorkoutList;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Flat catalog of named exercises
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ExerciseList {
    entries: IndexedList<Exercise>,
}

impl ExerciseList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains(index)
    }

    /// Append an exercise; names are trimmed and must be unique (ignoring case)
    pub fn add(&mut self, name: &str) -> Result<usize> {
        let name = normalize_name(name, "Exercise")?;
        if let Some(existing) = self.position_of(&name) {
            return Err(Error::InvalidExercise(format!(
                "'{}' already exists as exercise {}",
                name, existing
            )));
        }

        let index = self.entries.push(Exercise { name });
        tracing::debug!("Added exercise {}", index);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Result<&Exercise> {
        self.entries
            .get(index)
            .ok_or_else(|| Error::InvalidExercise(format!("no exercise at index {}", index)))
    }

    /// Rename an exercise; workouts follow it since they hold its index
    pub fn edit(&mut self, index: usize, new_name: &str) -> Result<()> {
        let name = normalize_name(new_name, "Exercise")?;
        self.get(index)?;
        if let Some(existing) = self.position_of(&name).filter(|&i| i != index) {
            return Err(Error::InvalidExercise(format!(
                "'{}' already exists as exercise {}",
                name, existing
            )));
        }

        if let Some(exercise) = self.entries.get_mut(index) {
            exercise.name = name;
        }
        tracing::debug!("Renamed exercise {}", index);
        Ok(())
    }

    /// Delete an exercise no workout uses, re-pointing workouts at the shifted indices
    pub fn delete(&mut self, index: usize, workouts: &mut WorkoutList) -> Result<Exercise> {
        self.get(index)?;
        if let Some(workout) = workouts.first_using_exercise(index) {
            return Err(Error::ReferencedEntityInUse {
                entity: "Exercise",
                index,
                referrer: format!("workout {}", workout),
            });
        }

        let removed = self
            .entries
            .remove(index)
            .ok_or_else(|| Error::InvalidExercise(format!("no exercise at index {}", index)))?;
        workouts.reindex_exercises(index);
        tracing::debug!("Deleted exercise {} ({})", index, removed.name);
        Ok(removed)
    }

    /// Exercises in display order
    pub fn list(&self) -> impl Iterator<Item = (usize, &Exercise)> {
        self.entries.iter()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, e)| e.name.eq_ignore_ascii_case(name))
            .map(|(i, _)| i)
    }
}
