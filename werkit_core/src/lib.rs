#![forbid(unsafe_code)]

//! Core domain model and command handling for the WerkIt fitness tracker.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, plans, days)
//! - The four list managers and their cross-list integrity rules
//! - Input parsing and the command family
//! - Persistence (JSON store), configuration and logging

pub mod types;
pub mod error;
pub mod indexed;
pub mod exercise;
pub mod workout;
pub mod plan;
pub mod schedule;
pub mod lists;
pub mod parser;
pub mod command;
pub mod reporter;
pub mod storage;
pub mod config;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use exercise::ExerciseList;
pub use workout::WorkoutList;
pub use plan::PlanList;
pub use schedule::DayList;
pub use lists::Lists;
pub use command::{Command, Effect, Reply};
pub use parser::parse;
pub use reporter::{BufferReporter, Reporter};
pub use storage::{JsonStore, MemoryStore, Store};
pub use config::Config;
pub use session::{Flow, Session};
