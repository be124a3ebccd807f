//! Input line parsing.
//!
//! A line has the shape `<keyword> <action> <arguments>`, e.g.
//! `plan /add more muscles /workouts 1,2,1,2`. The parser splits it, picks the
//! command family by keyword and lets that family validate the action and the
//! argument shape. No list is touched here.

use crate::command::{
    Command, ExerciseCommand, PlanCommand, ScheduleCommand, SearchCommand, WorkoutCommand,
};
use crate::{Error, Result};

/// Keywords understood by [`parse`]
pub const KEYWORDS: [&str; 7] = ["exercise", "workout", "plan", "schedule", "search", "help", "exit"];

/// Split a line into keyword, action token and the remaining arguments
///
/// The action is only recognized when the second token starts with `/`;
/// otherwise it is empty and everything after the keyword is arguments.
pub fn tokenize(line: &str) -> (&str, &str, &str) {
    let line = line.trim();
    let (keyword, rest) = split_first_token(line);
    if rest.starts_with('/') {
        let (action, arguments) = split_first_token(rest);
        (keyword, action, arguments)
    } else {
        (keyword, "", rest)
    }
}

/// Parse one line of user input into a command
pub fn parse(line: &str) -> Result<Command> {
    let (keyword, action, arguments) = tokenize(line);
    let user_input = line.trim();

    let command = match keyword {
        "exercise" => Command::Exercise(ExerciseCommand::new(user_input, action, arguments)?),
        "workout" => Command::Workout(WorkoutCommand::new(user_input, action, arguments)?),
        "plan" => Command::Plan(PlanCommand::new(user_input, action, arguments)?),
        "schedule" => Command::Schedule(ScheduleCommand::new(user_input, action, arguments)?),
        "search" => Command::Search(SearchCommand::new(user_input, action, arguments)?),
        "help" => {
            expect_bare(keyword, action, arguments)?;
            Command::Help
        }
        "exit" => {
            expect_bare(keyword, action, arguments)?;
            Command::Exit
        }
        "" => return Err(Error::InvalidCommand("empty input".into())),
        other => {
            return Err(Error::InvalidCommand(format!(
                "unknown keyword '{}', expected one of: {}",
                other,
                KEYWORDS.join(", ")
            )))
        }
    };

    tracing::debug!("Parsed '{}' as {} {}", user_input, keyword, action);
    Ok(command)
}

fn split_first_token(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim()),
        None => (text, ""),
    }
}

fn expect_bare(keyword: &str, action: &str, arguments: &str) -> Result<()> {
    if !action.is_empty() || !arguments.trim().is_empty() {
        return Err(Error::InvalidCommand(format!("'{}' takes no arguments", keyword)));
    }
    Ok(())
}

// ============================================================================
// Argument Shape Helpers
// ============================================================================

/// Whitespace-only arguments count as none
pub(crate) fn expect_no_arguments(action: &str, arguments: &str) -> Result<()> {
    if !arguments.trim().is_empty() {
        return Err(Error::InvalidCommand(format!(
            "{} takes no arguments, got '{}'",
            action,
            arguments.trim()
        )));
    }
    Ok(())
}

/// Parse a display index or day number
pub(crate) fn parse_number(token: &str, what: &str) -> Result<usize> {
    token
        .parse::<usize>()
        .map_err(|_| Error::InvalidValue(format!("{} must be a positive number, got '{}'", what, token)))
}

/// Parse a repetition count; sign is kept so range checks can report it
pub(crate) fn parse_reps(token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| Error::InvalidValue(format!("reps must be a number, got '{}'", token)))
}

/// Split arguments into exactly `N` whitespace-separated tokens
pub(crate) fn exact_tokens<'a, const N: usize>(arguments: &'a str, usage: &str) -> Result<[&'a str; N]> {
    let tokens: Vec<&str> = arguments.split_whitespace().collect();
    tokens
        .try_into()
        .map_err(|_| Error::InvalidCommand(format!("expected: {}", usage)))
}

/// Split `<before> <flag> <after>` around a standalone flag token such as `/reps`
pub(crate) fn split_flag<'a>(arguments: &'a str, flag: &str, usage: &str) -> Result<(&'a str, &'a str)> {
    let found = arguments.match_indices(flag).find(|&(pos, _)| {
        let before_ok = arguments[..pos]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let after_ok = arguments[pos + flag.len()..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        before_ok && after_ok
    });

    match found {
        Some((pos, _)) => Ok((
            arguments[..pos].trim(),
            arguments[pos + flag.len()..].trim(),
        )),
        None => Err(Error::InvalidCommand(format!(
            "missing {}, expected: {}",
            flag, usage
        ))),
    }
}

/// Parse a sequence such as `1,2,1,2` or `1 2 1 2`; an empty sequence is returned as-is
pub(crate) fn parse_index_sequence(text: &str) -> Result<Vec<usize>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_number(token, "workout index"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_full_line() {
        assert_eq!(
            tokenize("  plan /add more muscles /workouts 1,2,1,2 "),
            ("plan", "/add", "more muscles /workouts 1,2,1,2")
        );
        assert_eq!(tokenize("schedule /clearall"), ("schedule", "/clearall", ""));
        assert_eq!(tokenize("exit"), ("exit", "", ""));
        assert_eq!(tokenize("schedule 1 2"), ("schedule", "", "1 2"));
    }

    #[test]
    fn test_parse_schedule_update_keeps_fields() {
        match parse("schedule /update 1 2").unwrap() {
            Command::Schedule(cmd) => {
                assert_eq!(cmd.user_input(), "schedule /update 1 2");
                assert_eq!(cmd.user_action(), "/update");
                assert_eq!(cmd.user_arguments(), "1 2");
            }
            other => panic!("expected schedule command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_keyword() {
        assert!(matches!(parse("dance /add"), Err(Error::InvalidCommand(_))));
        assert!(matches!(parse("   "), Err(Error::InvalidCommand(_))));
    }

    #[test]
    fn test_parse_unknown_action() {
        assert!(matches!(
            parse("schedule /invalid command"),
            Err(Error::InvalidCommand(_))
        ));
        assert!(matches!(parse("exercise"), Err(Error::InvalidCommand(_))));
    }

    #[test]
    fn test_exit_and_help_take_no_arguments() {
        assert!(matches!(parse("exit").unwrap(), Command::Exit));
        assert!(matches!(parse("exit   ").unwrap(), Command::Exit));
        assert!(matches!(parse("help").unwrap(), Command::Help));
        assert!(matches!(parse("exit now"), Err(Error::InvalidCommand(_))));
    }

    #[test]
    fn test_split_flag_requires_standalone_token() {
        let usage = "<exercise> /reps <n>";
        assert_eq!(split_flag("1 /reps 10", "/reps", usage).unwrap(), ("1", "10"));
        assert!(split_flag("1 /reps10", "/reps", usage).is_err());
        assert!(split_flag("1 10", "/reps", usage).is_err());
    }

    #[test]
    fn test_parse_index_sequence_separators() {
        assert_eq!(parse_index_sequence("1,2, 1 2").unwrap(), vec![1, 2, 1, 2]);
        assert!(parse_index_sequence("  ").unwrap().is_empty());
        assert!(matches!(
            parse_index_sequence("1,x"),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_exact_tokens() {
        let [a, b] = exact_tokens::<2>(" 1   2 ", "<a> <b>").unwrap();
        assert_eq!((a, b), ("1", "2"));
        assert!(matches!(
            exact_tokens::<2>("1", "<a> <b>"),
            Err(Error::InvalidCommand(_))
        ));
    }
}
