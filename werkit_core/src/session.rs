//! Read-parse-execute loop over the lists.
//!
//! One line is fully handled before the next is read. Lists are saved after
//! every mutating command and once more when the session ends.

use crate::command::Effect;
use crate::reporter::Reporter;
use crate::storage::Store;
use crate::{parser, Lists, Result};
use std::io::BufRead;

/// Whether the loop should keep reading input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<'a> {
    lists: Lists,
    store: &'a mut dyn Store,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Session<'a> {
    /// Start a session from whatever the store holds
    pub fn start(store: &'a mut dyn Store, reporter: &'a mut dyn Reporter) -> Result<Self> {
        let lists = store.load()?;
        Ok(Self {
            lists,
            store,
            reporter,
        })
    }

    pub fn lists(&self) -> &Lists {
        &self.lists
    }

    /// Handle one line of input; failures are reported, never returned
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }

        let reply = match parser::parse(line).and_then(|command| command.execute(&mut self.lists)) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!("Rejected '{}': {}", line.trim(), e);
                self.reporter.report_error(&e.to_string());
                return Flow::Continue;
            }
        };

        for message in &reply.lines {
            self.reporter.report(message);
        }

        match reply.effect {
            Effect::ReadOnly => Flow::Continue,
            Effect::Mutated => {
                self.save();
                Flow::Continue
            }
            Effect::Exit => Flow::Exit,
        }
    }

    /// Run until `exit` or end of input, then save
    ///
    /// Lines that are not valid UTF-8 are decoded lossily, so they fail to
    /// parse like any other bad input instead of ending the session.
    pub fn run<B: BufRead>(&mut self, mut input: B, mut prompt: impl FnMut()) -> Result<()> {
        let mut buf = Vec::new();
        prompt();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(|c| c == '\n' || c == '\r');
            if self.handle_line(line) == Flow::Exit {
                break;
            }
            prompt();
        }
        self.save();
        Ok(())
    }

    /// Save the lists; a failure is reported and in-memory state is kept
    fn save(&mut self) {
        if let Err(e) = self.store.save(&self.lists) {
            tracing::warn!("Save failed: {}", e);
            self.reporter
                .report_error(&format!("Could not save your data: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::BufferReporter;
    use crate::storage::MemoryStore;
    use crate::{Day, Error};

    struct FailingStore;

    impl Store for FailingStore {
        fn load(&self) -> Result<Lists> {
            Ok(Lists::default())
        }

        fn save(&mut self, _lists: &Lists) -> Result<()> {
            Err(Error::Persistence("disk full".into()))
        }
    }

    #[test]
    fn test_mutations_are_saved() {
        crate::logging::init_test();
        let mut store = MemoryStore::default();
        let mut reporter = BufferReporter::default();
        {
            let mut session = Session::start(&mut store, &mut reporter).unwrap();
            session.handle_line("exercise /add push up");
            session.handle_line("exercise /list");
            session.handle_line("workout /add 1 /reps 10");
        }
        assert_eq!(store.saves, 2);
        let saved = store.saved.unwrap();
        assert_eq!(saved.workouts.len(), 1);
        assert_eq!(
            reporter.messages,
            vec![
                "Added exercise 1: push up",
                "1. push up",
                "Added workout 1: push up (10 reps)",
            ]
        );
    }

    #[test]
    fn test_errors_are_reported_and_do_not_mutate() {
        let mut store = MemoryStore::default();
        let mut reporter = BufferReporter::default();
        let mut session = Session::start(&mut store, &mut reporter).unwrap();

        assert_eq!(session.handle_line("schedule /invalid command"), Flow::Continue);
        assert_eq!(session.handle_line("workout /add 1 /reps 10"), Flow::Continue);
        assert_eq!(session.lists(), &Lists::default());
        drop(session);

        assert_eq!(reporter.errors.len(), 2);
        assert!(reporter.errors[0].starts_with("Invalid command"));
        assert!(reporter.errors[1].starts_with("Invalid exercise"));
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn test_run_stops_at_exit_and_saves() {
        let mut store = MemoryStore::default();
        let mut reporter = BufferReporter::default();
        let input = "exercise /add push up\n\
                     workout /add 1 /reps 10\n\
                     plan /add quick /workouts 1\n\
                     schedule /update 3 1\n\
                     exit\n\
                     exercise /add never\n";
        let mut prompts = 0;
        {
            let mut session = Session::start(&mut store, &mut reporter).unwrap();
            session.run(input.as_bytes(), || prompts += 1).unwrap();
        }

        let saved = store.saved.unwrap();
        assert_eq!(saved.exercises.len(), 1);
        assert_eq!(saved.schedule.plan_on(Day::Wednesday), Some(1));
        // 4 mutations plus the final save
        assert_eq!(store.saves, 5);
        assert_eq!(prompts, 5);
        assert_eq!(reporter.messages.last().unwrap(), "Goodbye!");
    }

    #[test]
    fn test_undecodable_line_is_reported_and_skipped() {
        let mut store = MemoryStore::default();
        let mut reporter = BufferReporter::default();
        let input: &[u8] = b"exercise /add push up\n\xff\xfe\nexercise /add squat\r\nexit\n";
        {
            let mut session = Session::start(&mut store, &mut reporter).unwrap();
            session.run(input, || {}).unwrap();
            assert_eq!(session.lists().exercises.len(), 2);
        }

        assert_eq!(reporter.errors.len(), 1);
        assert!(reporter.errors[0].starts_with("Invalid command"));
        assert_eq!(reporter.messages[1], "Added exercise 2: squat");
        assert_eq!(store.saved.unwrap().exercises.len(), 2);
    }

    #[test]
    fn test_save_failure_keeps_state() {
        let mut store = FailingStore;
        let mut reporter = BufferReporter::default();
        let mut session = Session::start(&mut store, &mut reporter).unwrap();

        session.handle_line("exercise /add push up");
        assert_eq!(session.lists().exercises.len(), 1);
        drop(session);
        assert_eq!(reporter.errors.len(), 1);
        assert!(reporter.errors[0].contains("disk full"));
    }
}
