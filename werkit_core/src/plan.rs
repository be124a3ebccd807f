//! Plan catalog: named, ordered sequences of workouts.

use crate::indexed::{reindex_after_removal, IndexedList};
use crate::schedule::DayList;
use crate::types::{normalize_name, Plan};
use crate::workout::WorkoutList;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PlanList {
    entries: IndexedList<Plan>,
}

/// Every index must resolve in the workout list, and there must be at least one
fn check_sequence(workouts: &WorkoutList, workout_indices: &[usize]) -> Result<()> {
    if workout_indices.is_empty() {
        return Err(Error::InvalidPlan(
            "a plan needs at least one workout".into(),
        ));
    }
    if let Some(bad) = workout_indices.iter().find(|&&i| !workouts.contains(i)) {
        return Err(Error::InvalidWorkout(format!("no workout at index {}", bad)));
    }
    Ok(())
}

impl PlanList {
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

    /// Create a plan; nothing is stored unless every workout index resolves
    pub fn create(&mut self, workouts: &WorkoutList, name: &str, workout_indices: Vec<usize>) -> Result<usize> {
        let name = normalize_name(name, "Plan")?;
        if let Some((existing, _)) = self
            .entries
            .iter()
            .find(|(_, p)| p.name.eq_ignore_ascii_case(&name))
        {
            return Err(Error::InvalidPlan(format!(
                "'{}' already exists as plan {}",
                name, existing
            )));
        }
        check_sequence(workouts, &workout_indices)?;

        let index = self.entries.push(Plan {
            name,
            workout_indices,
        });
        tracing::debug!("Created plan {}", index);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Result<&Plan> {
        self.entries
            .get(index)
            .ok_or_else(|| Error::InvalidPlan(format!("no plan at index {}", index)))
    }

    /// Replace the workout sequence of a plan
    pub fn edit(&mut self, index: usize, workouts: &WorkoutList, workout_indices: Vec<usize>) -> Result<()> {
        self.get(index)?;
        check_sequence(workouts, &workout_indices)?;

        if let Some(plan) = self.entries.get_mut(index) {
            plan.workout_indices = workout_indices;
        }
        tracing::debug!("Edited plan {}", index);
        Ok(())
    }

    /// Delete a plan no day is scheduled with, re-pointing the schedule
    pub fn delete(&mut self, index: usize, schedule: &mut DayList) -> Result<Plan> {
        self.get(index)?;
        if let Some(day) = schedule.first_using_plan(index) {
            return Err(Error::ReferencedEntityInUse {
                entity: "Plan",
                index,
                referrer: format!("the schedule on {}", day),
            });
        }

        let removed = self
            .entries
            .remove(index)
            .ok_or_else(|| Error::InvalidPlan(format!("no plan at index {}", index)))?;
        schedule.reindex_plans(index);
        tracing::debug!("Deleted plan {} ({})", index, removed.name);
        Ok(removed)
    }

    pub fn list(&self) -> impl Iterator<Item = (usize, &Plan)> {
        self.entries.iter()
    }

    /// First plan that includes the given workout
    pub fn first_using_workout(&self, workout_index: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, p)| p.workout_indices.contains(&workout_index))
            .map(|(i, _)| i)
    }

    /// Follow the workout list after `removed` was deleted from it
    pub(crate) fn reindex_workouts(&mut self, removed: usize) {
        for (_, plan) in self.entries.iter_mut() {
            for workout_index in plan.workout_indices.iter_mut() {
                reindex_after_removal(workout_index, removed);
            }
        }
    }
}
