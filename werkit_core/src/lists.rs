//! The four lists a session works on, held together for loading and saving.

use crate::exercise::ExerciseList;
use crate::plan::PlanList;
use crate::schedule::DayList;
use crate::workout::WorkoutList;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lists {
    #[serde(default)]
    pub exercises: ExerciseList,
    #[serde(default)]
    pub workouts: WorkoutList,
    #[serde(default)]
    pub plans: PlanList,
    #[serde(default)]
    pub schedule: DayList,
}

impl Lists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every data-model rule: entry contents and cross-list references
    ///
    /// The list operations keep this true on their own; it matters for data
    /// that came from outside, such as a saved file edited by hand.
    pub fn validate(&self) -> Result<()> {
        self.validate_entries()?;
        self.validate_references()
    }

    /// Names are non-empty and unique ignoring case, reps are positive
    pub fn validate_entries(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, exercise) in self.exercises.list() {
            if exercise.name.trim().is_empty() {
                return Err(Error::InvalidExercise(format!("exercise {} has no name", index)));
            }
            if !seen.insert(exercise.name.to_ascii_lowercase()) {
                return Err(Error::InvalidExercise(format!(
                    "exercise {} repeats the name '{}'",
                    index, exercise.name
                )));
            }
        }

        for (index, workout) in self.workouts.list() {
            if workout.reps == 0 {
                return Err(Error::InvalidWorkout(format!("workout {} has 0 reps", index)));
            }
        }

        let mut seen = HashSet::new();
        for (index, plan) in self.plans.list() {
            if plan.name.trim().is_empty() {
                return Err(Error::InvalidPlan(format!("plan {} has no name", index)));
            }
            if !seen.insert(plan.name.to_ascii_lowercase()) {
                return Err(Error::InvalidPlan(format!(
                    "plan {} repeats the name '{}'",
                    index, plan.name
                )));
            }
        }

        Ok(())
    }

    /// Every workout, plan and schedule reference resolves
    pub fn validate_references(&self) -> Result<()> {
        for (index, workout) in self.workouts.list() {
            if !self.exercises.contains(workout.exercise_index) {
                return Err(Error::InvalidExercise(format!(
                    "workout {} uses missing exercise {}",
                    index, workout.exercise_index
                )));
            }
        }

        for (index, plan) in self.plans.list() {
            if plan.workout_indices.is_empty() {
                return Err(Error::InvalidPlan(format!("plan {} has no workouts", index)));
            }
            if let Some(missing) = plan
                .workout_indices
                .iter()
                .find(|&&w| !self.workouts.contains(w))
            {
                return Err(Error::InvalidWorkout(format!(
                    "plan {} uses missing workout {}",
                    index, missing
                )));
            }
        }

        for (day, plan) in self.schedule.days() {
            if let Some(plan) = plan.filter(|&p| !self.plans.contains(p)) {
                return Err(Error::InvalidPlan(format!(
                    "{} is scheduled with missing plan {}",
                    day, plan
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_are_valid() {
        assert!(Lists::new().validate().is_ok());
    }

    #[test]
    fn test_hand_edited_entries_rejected() {
        let cases = [
            r#"{"exercises": [{"name": "push up"}], "workouts": [{"exercise_index": 1, "reps": 0}]}"#,
            r#"{"exercises": [{"name": "  "}]}"#,
            r#"{"exercises": [{"name": "push up"}, {"name": "Push Up"}]}"#,
            r#"{
                "exercises": [{"name": "push up"}],
                "workouts": [{"exercise_index": 1, "reps": 10}],
                "plans": [{"name": "a", "workout_indices": [1]}, {"name": "A", "workout_indices": [1]}]
            }"#,
        ];
        for json in cases {
            let lists: Lists = serde_json::from_str(json).unwrap();
            assert!(lists.validate_references().is_ok(), "{}", json);
            assert!(lists.validate().is_err(), "{}", json);
        }
    }

    #[test]
    fn test_dangling_workout_reference_detected() {
        let json = r#"{
            "exercises": [{"name": "push up"}],
            "workouts": [{"exercise_index": 2, "reps": 10}]
        }"#;
        let lists: Lists = serde_json::from_str(json).unwrap();
        assert!(matches!(
            lists.validate_references(),
            Err(Error::InvalidExercise(_))
        ));
    }

    #[test]
    fn test_dangling_schedule_reference_detected() {
        let json = r#"{
            "exercises": [{"name": "push up"}],
            "workouts": [{"exercise_index": 1, "reps": 10}],
            "plans": [{"name": "a", "workout_indices": [1]}],
            "schedule": {"slots": [null, 2, null, null, null, null, null]}
        }"#;
        let lists: Lists = serde_json::from_str(json).unwrap();
        assert!(matches!(lists.validate_references(), Err(Error::InvalidPlan(_))));
    }
}
