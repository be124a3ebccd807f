//! Workout catalog: exercises paired with repetition counts.

use crate::exercise::ExerciseList;
use crate::indexed::{reindex_after_removal, IndexedList};
use crate::plan::PlanList;
use crate::types::{validate_reps, Workout};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WorkoutList {
    entries: IndexedList<Workout>,
}

impl WorkoutList {
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

    /// Create a workout for an existing exercise
    ///
    /// Fails with `InvalidExercise` if the exercise index does not resolve,
    /// `InvalidValue` if reps is not positive, and `InvalidWorkout` if an
    /// identical workout already exists.
    pub fn create(&mut self, exercises: &ExerciseList, exercise_index: usize, reps: i64) -> Result<usize> {
        exercises.get(exercise_index)?;
        let reps = validate_reps(reps)?;

        let workout = Workout {
            exercise_index,
            reps,
        };
        if let Some((existing, _)) = self.entries.iter().find(|(_, w)| **w == workout) {
            return Err(Error::InvalidWorkout(format!(
                "the same workout already exists as workout {}",
                existing
            )));
        }

        let index = self.entries.push(workout);
        tracing::debug!("Created workout {} (exercise {}, {} reps)", index, exercise_index, reps);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Result<&Workout> {
        self.entries
            .get(index)
            .ok_or_else(|| Error::InvalidWorkout(format!("no workout at index {}", index)))
    }

    /// Change the repetition count of a workout
    ///
    /// Fails with `InvalidWorkout` if another workout already pairs the same
    /// exercise with the new count.
    pub fn edit(&mut self, index: usize, new_reps: i64) -> Result<()> {
        let reps = validate_reps(new_reps)?;
        let exercise_index = self.get(index)?.exercise_index;
        if let Some((existing, _)) = self.entries.iter().find(|(i, w)| {
            *i != index && w.exercise_index == exercise_index && w.reps == reps
        }) {
            return Err(Error::InvalidWorkout(format!(
                "the same workout already exists as workout {}",
                existing
            )));
        }

        let workout = self
            .entries
            .get_mut(index)
            .ok_or_else(|| Error::InvalidWorkout(format!("no workout at index {}", index)))?;
        workout.reps = reps;
        tracing::debug!("Workout {} now has {} reps", index, reps);
        Ok(())
    }

    /// Delete a workout no plan uses, re-pointing plans at the shifted indices
    pub fn delete(&mut self, index: usize, plans: &mut PlanList) -> Result<Workout> {
        self.get(index)?;
        if let Some(plan) = plans.first_using_workout(index) {
            return Err(Error::ReferencedEntityInUse {
                entity: "Workout",
                index,
                referrer: format!("plan {}", plan),
            });
        }

        let removed = self
            .entries
            .remove(index)
            .ok_or_else(|| Error::InvalidWorkout(format!("no workout at index {}", index)))?;
        plans.reindex_workouts(index);
        tracing::debug!("Deleted workout {}", index);
        Ok(removed)
    }

    pub fn list(&self) -> impl Iterator<Item = (usize, &Workout)> {
        self.entries.iter()
    }

    /// Human-readable form, e.g. "push up (10 reps)"
    pub fn describe(&self, index: usize, exercises: &ExerciseList) -> Result<String> {
        let workout = self.get(index)?;
        let exercise = exercises.get(workout.exercise_index)?;
        Ok(format!("{} ({} reps)", exercise.name, workout.reps))
    }

    /// First workout built on the given exercise
    pub fn first_using_exercise(&self, exercise_index: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, w)| w.exercise_index == exercise_index)
            .map(|(i, _)| i)
    }

    /// Follow the exercise list after `removed` was deleted from it
    pub(crate) fn reindex_exercises(&mut self, removed: usize) {
        for (_, workout) in self.entries.iter_mut() {
            reindex_after_removal(&mut workout.exercise_index, removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercises() -> ExerciseList {
        let mut exercises = ExerciseList::new();
        for name in ["push up", "sit up", "pull up"] {
            exercises.add(name).unwrap();
        }
        exercises
    }

    #[test]
    fn test_create_validates_exercise_index() {
        let exercises = exercises();
        let mut workouts = WorkoutList::new();
        for bad in [0, 4, 100] {
            assert!(matches!(
                workouts.create(&exercises, bad, 10),
                Err(Error::InvalidExercise(_))
            ));
        }
        assert!(workouts.is_empty());
    }

    #[test]
    fn test_create_validates_reps() {
        let exercises = exercises();
        let mut workouts = WorkoutList::new();
        assert!(matches!(
            workouts.create(&exercises, 1, 0),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(
            workouts.create(&exercises, 1, -5),
            Err(Error::InvalidValue(_))
        ));
        assert_eq!(workouts.create(&exercises, 1, 10).unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_identical_workout() {
        let exercises = exercises();
        let mut workouts = WorkoutList::new();
        workouts.create(&exercises, 1, 10).unwrap();
        assert!(matches!(
            workouts.create(&exercises, 1, 10),
            Err(Error::InvalidWorkout(_))
        ));
        assert_eq!(workouts.create(&exercises, 1, 12).unwrap(), 2);
    }

    #[test]
    fn test_edit_changes_reps() {
        let exercises = exercises();
        let mut workouts = WorkoutList::new();
        workouts.create(&exercises, 2, 15).unwrap();
        workouts.edit(1, 25).unwrap();
        assert_eq!(workouts.get(1).unwrap().reps, 25);
        assert!(matches!(workouts.edit(2, 25), Err(Error::InvalidWorkout(_))));
        assert!(matches!(workouts.edit(1, 0), Err(Error::InvalidValue(_))));
        assert_eq!(workouts.describe(1, &exercises).unwrap(), "sit up (25 reps)");
    }

    #[test]
    fn test_edit_rejects_identical_workout() {
        let exercises = exercises();
        let mut workouts = WorkoutList::new();
        workouts.create(&exercises, 1, 10).unwrap();
        workouts.create(&exercises, 1, 12).unwrap();
        workouts.create(&exercises, 2, 20).unwrap();

        assert!(matches!(workouts.edit(2, 10), Err(Error::InvalidWorkout(_))));
        assert_eq!(workouts.get(2).unwrap().reps, 12);

        // Same count on another exercise, or unchanged on itself, is fine
        workouts.edit(3, 10).unwrap();
        workouts.edit(1, 10).unwrap();
        assert_eq!(workouts.get(3).unwrap().reps, 10);
    }

    #[test]
    fn test_delete_refused_while_planned() {
        let exercises = exercises();
        let mut workouts = WorkoutList::new();
        let mut plans = PlanList::new();
        workouts.create(&exercises, 1, 10).unwrap();
        workouts.create(&exercises, 2, 15).unwrap();
        plans.create(&workouts, "core", vec![2, 2]).unwrap();

        assert!(matches!(
            workouts.delete(2, &mut plans),
            Err(Error::ReferencedEntityInUse { .. })
        ));

        workouts.delete(1, &mut plans).unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(plans.get(1).unwrap().workout_indices, vec![1, 1]);
    }
}
