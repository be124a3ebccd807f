//! Executable commands.
//!
//! A command is built from one input line (see [`crate::parser`]) and is
//! fully validated at construction: the action token must belong to the
//! command's family and the arguments must have the right shape. Executing
//! it is a separate step that applies it to the lists it is handed and may
//! fail on references that do not resolve. A failed command leaves every
//! list as it was.

use crate::exercise::ExerciseList;
use crate::lists::Lists;
use crate::parser::{
    exact_tokens, expect_no_arguments, parse_index_sequence, parse_number, parse_reps, split_flag,
};
use crate::plan::PlanList;
use crate::schedule::DayList;
use crate::workout::WorkoutList;
use crate::{Error, Result};

/// Usage summary shown by `help`
pub const USAGE: &[&str] = &[
    "exercise /add <name>",
    "exercise /edit <index> <new name>",
    "exercise /delete <index>",
    "exercise /list",
    "workout /add <exercise index> /reps <count>",
    "workout /edit <index> <new count>",
    "workout /delete <index>",
    "workout /list",
    "plan /add <name> /workouts <i,j,...>",
    "plan /edit <index> /workouts <i,j,...>",
    "plan /delete <index>",
    "plan /list",
    "plan /details <index>",
    "schedule /update <day 1-7> <plan index>",
    "schedule /clear <day 1-7>",
    "schedule /clearall",
    "schedule /list",
    "search /exercise|/workout|/plan|/all <keyword>",
    "help",
    "exit",
];

/// What running a command did, beyond the lines it reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    ReadOnly,
    Mutated,
    Exit,
}

/// Outcome of a successful command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub effect: Effect,
}

impl Reply {
    fn read_only(lines: Vec<String>) -> Self {
        Self {
            lines,
            effect: Effect::ReadOnly,
        }
    }

    fn mutated(line: String) -> Self {
        Self {
            lines: vec![line],
            effect: Effect::Mutated,
        }
    }
}

/// Closed set of command kinds
#[derive(Clone, Debug)]
pub enum Command {
    Exercise(ExerciseCommand),
    Workout(WorkoutCommand),
    Plan(PlanCommand),
    Schedule(ScheduleCommand),
    Search(SearchCommand),
    Help,
    Exit,
}

impl Command {
    /// Apply the command, handing each family only the lists it needs
    pub fn execute(&self, lists: &mut Lists) -> Result<Reply> {
        match self {
            Command::Exercise(cmd) => cmd.execute(&mut lists.exercises, &mut lists.workouts),
            Command::Workout(cmd) => {
                cmd.execute(&mut lists.workouts, &lists.exercises, &mut lists.plans)
            }
            Command::Plan(cmd) => cmd.execute(
                &mut lists.plans,
                &lists.workouts,
                &lists.exercises,
                &mut lists.schedule,
            ),
            Command::Schedule(cmd) => cmd.execute(&mut lists.schedule, &lists.plans),
            Command::Search(cmd) => cmd.execute(lists),
            Command::Help => Ok(Reply::read_only(
                USAGE.iter().map(|line| line.to_string()).collect(),
            )),
            Command::Exit => Ok(Reply {
                lines: vec!["Goodbye!".into()],
                effect: Effect::Exit,
            }),
        }
    }
}

/// Raw pieces of the line a command was built from
#[derive(Clone, Debug, PartialEq, Eq)]
struct Input {
    user_input: String,
    user_action: String,
    user_arguments: String,
}

impl Input {
    fn new(user_input: &str, user_action: &str, user_arguments: &str) -> Self {
        Self {
            user_input: user_input.to_string(),
            user_action: user_action.to_string(),
            user_arguments: user_arguments.to_string(),
        }
    }
}

fn unknown_action(family: &str, action: &str, known: &[&str]) -> Error {
    let shown = if action.is_empty() { "<none>" } else { action };
    Error::InvalidCommand(format!(
        "unknown {} action '{}', expected one of: {}",
        family,
        shown,
        known.join(", ")
    ))
}

fn single_index(arguments: &str, usage: &str, what: &str) -> Result<usize> {
    let [token] = exact_tokens::<1>(arguments, usage)?;
    parse_number(token, what)
}

macro_rules! input_accessors {
    ($ty:ty) => {
        impl $ty {
            pub fn user_input(&self) -> &str {
                &self.input.user_input
            }

            pub fn user_action(&self) -> &str {
                &self.input.user_action
            }

            pub fn user_arguments(&self) -> &str {
                &self.input.user_arguments
            }
        }
    };
}

// ============================================================================
// Exercise Commands
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExerciseAction {
    Add { name: String },
    Edit { index: usize, name: String },
    Delete { index: usize },
    List,
}

#[derive(Clone, Debug)]
pub struct ExerciseCommand {
    input: Input,
    action: ExerciseAction,
}

input_accessors!(ExerciseCommand);

impl ExerciseCommand {
    const ACTIONS: [&'static str; 4] = ["/add", "/edit", "/delete", "/list"];

    pub fn new(user_input: &str, user_action: &str, user_arguments: &str) -> Result<Self> {
        let action = match user_action {
            "/add" => {
                if user_arguments.trim().is_empty() {
                    return Err(Error::InvalidCommand("expected: exercise /add <name>".into()));
                }
                ExerciseAction::Add {
                    name: user_arguments.trim().to_string(),
                }
            }
            "/edit" => {
                let usage = "exercise /edit <index> <new name>";
                let (index, name) = user_arguments
                    .trim()
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| Error::InvalidCommand(format!("expected: {}", usage)))?;
                ExerciseAction::Edit {
                    index: parse_number(index, "exercise index")?,
                    name: name.trim().to_string(),
                }
            }
            "/delete" => ExerciseAction::Delete {
                index: single_index(user_arguments, "exercise /delete <index>", "exercise index")?,
            },
            "/list" => {
                expect_no_arguments(user_action, user_arguments)?;
                ExerciseAction::List
            }
            other => return Err(unknown_action("exercise", other, &Self::ACTIONS)),
        };

        Ok(Self {
            input: Input::new(user_input, user_action, user_arguments),
            action,
        })
    }

    pub fn action(&self) -> &ExerciseAction {
        &self.action
    }

    pub fn execute(&self, exercises: &mut ExerciseList, workouts: &mut WorkoutList) -> Result<Reply> {
        match &self.action {
            ExerciseAction::Add { name } => {
                let index = exercises.add(name)?;
                let name = &exercises.get(index)?.name;
                Ok(Reply::mutated(format!("Added exercise {}: {}", index, name)))
            }
            ExerciseAction::Edit { index, name } => {
                let old = exercises.get(*index)?.name.clone();
                exercises.edit(*index, name)?;
                let new = &exercises.get(*index)?.name;
                Ok(Reply::mutated(format!(
                    "Renamed exercise {}: {} -> {}",
                    index, old, new
                )))
            }
            ExerciseAction::Delete { index } => {
                let removed = exercises.delete(*index, workouts)?;
                Ok(Reply::mutated(format!(
                    "Deleted exercise {}: {}",
                    index, removed.name
                )))
            }
            ExerciseAction::List => {
                if exercises.is_empty() {
                    return Ok(Reply::read_only(vec!["No exercises yet.".into()]));
                }
                Ok(Reply::read_only(
                    exercises
                        .list()
                        .map(|(i, e)| format!("{}. {}", i, e.name))
                        .collect(),
                ))
            }
        }
    }
}

// ============================================================================
// Workout Commands
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkoutAction {
    Add { exercise_index: usize, reps: i64 },
    Edit { index: usize, reps: i64 },
    Delete { index: usize },
    List,
}

#[derive(Clone, Debug)]
pub struct WorkoutCommand {
    input: Input,
    action: WorkoutAction,
}

input_accessors!(WorkoutCommand);

impl WorkoutCommand {
    const ACTIONS: [&'static str; 4] = ["/add", "/edit", "/delete", "/list"];

    pub fn new(user_input: &str, user_action: &str, user_arguments: &str) -> Result<Self> {
        let action = match user_action {
            "/add" => {
                let usage = "workout /add <exercise index> /reps <count>";
                let (exercise, reps) = split_flag(user_arguments, "/reps", usage)?;
                let [exercise] = exact_tokens::<1>(exercise, usage)?;
                let [reps] = exact_tokens::<1>(reps, usage)?;
                WorkoutAction::Add {
                    exercise_index: parse_number(exercise, "exercise index")?,
                    reps: parse_reps(reps)?,
                }
            }
            "/edit" => {
                let [index, reps] =
                    exact_tokens::<2>(user_arguments, "workout /edit <index> <new count>")?;
                WorkoutAction::Edit {
                    index: parse_number(index, "workout index")?,
                    reps: parse_reps(reps)?,
                }
            }
            "/delete" => WorkoutAction::Delete {
                index: single_index(user_arguments, "workout /delete <index>", "workout index")?,
            },
            "/list" => {
                expect_no_arguments(user_action, user_arguments)?;
                WorkoutAction::List
            }
            other => return Err(unknown_action("workout", other, &Self::ACTIONS)),
        };

        Ok(Self {
            input: Input::new(user_input, user_action, user_arguments),
            action,
        })
    }

    pub fn action(&self) -> &WorkoutAction {
        &self.action
    }

    pub fn execute(
        &self,
        workouts: &mut WorkoutList,
        exercises: &ExerciseList,
        plans: &mut PlanList,
    ) -> Result<Reply> {
        match &self.action {
            WorkoutAction::Add {
                exercise_index,
                reps,
            } => {
                let index = workouts.create(exercises, *exercise_index, *reps)?;
                Ok(Reply::mutated(format!(
                    "Added workout {}: {}",
                    index,
                    workouts.describe(index, exercises)?
                )))
            }
            WorkoutAction::Edit { index, reps } => {
                workouts.edit(*index, *reps)?;
                Ok(Reply::mutated(format!(
                    "Updated workout {}: {}",
                    index,
                    workouts.describe(*index, exercises)?
                )))
            }
            WorkoutAction::Delete { index } => {
                let description = workouts.describe(*index, exercises)?;
                workouts.delete(*index, plans)?;
                Ok(Reply::mutated(format!(
                    "Deleted workout {}: {}",
                    index, description
                )))
            }
            WorkoutAction::List => {
                if workouts.is_empty() {
                    return Ok(Reply::read_only(vec!["No workouts yet.".into()]));
                }
                let lines = workouts
                    .list()
                    .map(|(i, _)| {
                        workouts
                            .describe(i, exercises)
                            .map(|description| format!("{}. {}", i, description))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Reply::read_only(lines))
            }
        }
    }
}

// ============================================================================
// Plan Commands
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanAction {
    Add { name: String, workouts: Vec<usize> },
    Edit { index: usize, workouts: Vec<usize> },
    Delete { index: usize },
    List,
    Details { index: usize },
}

#[derive(Clone, Debug)]
pub struct PlanCommand {
    input: Input,
    action: PlanAction,
}

input_accessors!(PlanCommand);

impl PlanCommand {
    const ACTIONS: [&'static str; 5] = ["/add", "/edit", "/delete", "/list", "/details"];

    pub fn new(user_input: &str, user_action: &str, user_arguments: &str) -> Result<Self> {
        let action = match user_action {
            "/add" => {
                let usage = "plan /add <name> /workouts <i,j,...>";
                let (name, sequence) = split_flag(user_arguments, "/workouts", usage)?;
                if name.is_empty() {
                    return Err(Error::InvalidCommand(format!("expected: {}", usage)));
                }
                PlanAction::Add {
                    name: name.to_string(),
                    workouts: parse_index_sequence(sequence)?,
                }
            }
            "/edit" => {
                let usage = "plan /edit <index> /workouts <i,j,...>";
                let (index, sequence) = split_flag(user_arguments, "/workouts", usage)?;
                let [index] = exact_tokens::<1>(index, usage)?;
                PlanAction::Edit {
                    index: parse_number(index, "plan index")?,
                    workouts: parse_index_sequence(sequence)?,
                }
            }
            "/delete" => PlanAction::Delete {
                index: single_index(user_arguments, "plan /delete <index>", "plan index")?,
            },
            "/list" => {
                expect_no_arguments(user_action, user_arguments)?;
                PlanAction::List
            }
            "/details" => PlanAction::Details {
                index: single_index(user_arguments, "plan /details <index>", "plan index")?,
            },
            other => return Err(unknown_action("plan", other, &Self::ACTIONS)),
        };

        Ok(Self {
            input: Input::new(user_input, user_action, user_arguments),
            action,
        })
    }

    pub fn action(&self) -> &PlanAction {
        &self.action
    }

    pub fn execute(
        &self,
        plans: &mut PlanList,
        workouts: &WorkoutList,
        exercises: &ExerciseList,
        schedule: &mut DayList,
    ) -> Result<Reply> {
        match &self.action {
            PlanAction::Add {
                name,
                workouts: sequence,
            } => {
                let index = plans.create(workouts, name, sequence.clone())?;
                Ok(Reply::mutated(format!(
                    "Added plan {}: {} ({} workouts)",
                    index,
                    plans.get(index)?.name,
                    sequence.len()
                )))
            }
            PlanAction::Edit {
                index,
                workouts: sequence,
            } => {
                plans.edit(*index, workouts, sequence.clone())?;
                Ok(Reply::mutated(format!(
                    "Updated plan {}: {} ({} workouts)",
                    index,
                    plans.get(*index)?.name,
                    sequence.len()
                )))
            }
            PlanAction::Delete { index } => {
                let removed = plans.delete(*index, schedule)?;
                Ok(Reply::mutated(format!(
                    "Deleted plan {}: {}",
                    index, removed.name
                )))
            }
            PlanAction::List => {
                if plans.is_empty() {
                    return Ok(Reply::read_only(vec!["No plans yet.".into()]));
                }
                Ok(Reply::read_only(
                    plans
                        .list()
                        .map(|(i, p)| format!("{}. {}", i, p.name))
                        .collect(),
                ))
            }
            PlanAction::Details { index } => {
                let plan = plans.get(*index)?;
                let mut lines = vec![format!("Plan {}: {}", index, plan.name)];
                for (position, workout) in plan.workout_indices.iter().enumerate() {
                    lines.push(format!(
                        "  {}. {}",
                        position + 1,
                        workouts.describe(*workout, exercises)?
                    ));
                }
                Ok(Reply::read_only(lines))
            }
        }
    }
}

// ============================================================================
// Schedule Commands
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleAction {
    Update { day: usize, plan: usize },
    Clear { day: usize },
    ClearAll,
    List,
}

#[derive(Clone, Debug)]
pub struct ScheduleCommand {
    input: Input,
    action: ScheduleAction,
}

input_accessors!(ScheduleCommand);

impl ScheduleCommand {
    const ACTIONS: [&'static str; 4] = ["/update", "/clear", "/clearall", "/list"];

    pub fn new(user_input: &str, user_action: &str, user_arguments: &str) -> Result<Self> {
        let action = match user_action {
            "/update" => {
                let [day, plan] =
                    exact_tokens::<2>(user_arguments, "schedule /update <day 1-7> <plan index>")?;
                ScheduleAction::Update {
                    day: parse_number(day, "day")?,
                    plan: parse_number(plan, "plan index")?,
                }
            }
            "/clear" => ScheduleAction::Clear {
                day: single_index(user_arguments, "schedule /clear <day 1-7>", "day")?,
            },
            "/clearall" => {
                expect_no_arguments(user_action, user_arguments)?;
                ScheduleAction::ClearAll
            }
            "/list" => {
                expect_no_arguments(user_action, user_arguments)?;
                ScheduleAction::List
            }
            other => return Err(unknown_action("schedule", other, &Self::ACTIONS)),
        };

        Ok(Self {
            input: Input::new(user_input, user_action, user_arguments),
            action,
        })
    }

    pub fn action(&self) -> &ScheduleAction {
        &self.action
    }

    pub fn execute(&self, schedule: &mut DayList, plans: &PlanList) -> Result<Reply> {
        match &self.action {
            ScheduleAction::Update { day, plan } => {
                let day = schedule.update(*day, *plan, plans)?;
                Ok(Reply::mutated(format!(
                    "{} is now scheduled with plan {}: {}",
                    day,
                    plan,
                    plans.get(*plan)?.name
                )))
            }
            ScheduleAction::Clear { day } => {
                let day = schedule.clear(*day)?;
                Ok(Reply::mutated(format!("{} is now a rest day", day)))
            }
            ScheduleAction::ClearAll => {
                schedule.clear_all();
                Ok(Reply::mutated("All days are now rest days".into()))
            }
            ScheduleAction::List => Ok(Reply::read_only(
                schedule
                    .list(plans)
                    .into_iter()
                    .map(|(day, plan)| {
                        format!("{}. {}: {}", day.number(), day, plan.unwrap_or("rest day"))
                    })
                    .collect(),
            )),
        }
    }
}

// ============================================================================
// Search Commands
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchScope {
    Exercises,
    Workouts,
    Plans,
    All,
}

#[derive(Clone, Debug)]
pub struct SearchCommand {
    input: Input,
    scope: SearchScope,
    keyword: String,
}

input_accessors!(SearchCommand);

impl SearchCommand {
    const ACTIONS: [&'static str; 4] = ["/exercise", "/workout", "/plan", "/all"];

    pub fn new(user_input: &str, user_action: &str, user_arguments: &str) -> Result<Self> {
        let scope = match user_action {
            "/exercise" => SearchScope::Exercises,
            "/workout" => SearchScope::Workouts,
            "/plan" => SearchScope::Plans,
            "/all" => SearchScope::All,
            other => return Err(unknown_action("search", other, &Self::ACTIONS)),
        };
        let keyword = user_arguments.trim();
        if keyword.is_empty() {
            return Err(Error::InvalidCommand(format!(
                "expected: search {} <keyword>",
                user_action
            )));
        }

        Ok(Self {
            input: Input::new(user_input, user_action, user_arguments),
            scope,
            keyword: keyword.to_lowercase(),
        })
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.keyword)
    }

    pub fn execute(&self, lists: &Lists) -> Result<Reply> {
        let wants = |scope: SearchScope| self.scope == scope || self.scope == SearchScope::All;
        let mut lines = Vec::new();

        if wants(SearchScope::Exercises) {
            for (i, exercise) in lists.exercises.list() {
                if self.matches(&exercise.name) {
                    lines.push(format!("Exercise {}: {}", i, exercise.name));
                }
            }
        }

        if wants(SearchScope::Workouts) {
            for (i, _) in lists.workouts.list() {
                let description = lists.workouts.describe(i, &lists.exercises)?;
                if self.matches(&description) {
                    lines.push(format!("Workout {}: {}", i, description));
                }
            }
        }

        if wants(SearchScope::Plans) {
            for (i, plan) in lists.plans.list() {
                if self.matches(&plan.name) {
                    lines.push(format!("Plan {}: {}", i, plan.name));
                }
            }
        }

        if lines.is_empty() {
            lines.push(format!("Nothing matches '{}'", self.keyword));
        }
        Ok(Reply::read_only(lines))
    }
}
