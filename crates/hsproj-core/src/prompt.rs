//! The interactive-input capability used to settle unresolved fields
//!
//! Resolution never talks to the terminal directly. It asks a [`Prompter`],
//! which is a cliclack widget set in the CLI (see `tui`), a defaults-only
//! answerer in `--yes` mode, and a scripted fake in tests.

use anyhow::Result;

pub trait Prompter {
    /// Whether answers come from a person; non-interactive prompters cannot supply free text
    fn is_interactive(&self) -> bool;

    /// Yes/no question
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Free-text question with an optional suggested answer
    fn input(&mut self, question: &str, suggestion: Option<&str>) -> Result<String>;
}

/// Answers every yes/no question with its default and refuses free text
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn is_interactive(&self) -> bool {
        false
    }

    fn confirm(&mut self, _question: &str, default: bool) -> Result<bool> {
        Ok(default)
    }

    fn input(&mut self, question: &str, _suggestion: Option<&str>) -> Result<String> {
        anyhow::bail!("'{}' needs an answer but prompts are disabled", question)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records every question asked
    #[derive(Debug, Default)]
    pub struct Scripted {
        pub confirms: VecDeque<bool>,
        pub inputs: VecDeque<String>,
        pub asked: Vec<String>,
    }

    impl Scripted {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn confirming(mut self, answers: &[bool]) -> Self {
            self.confirms.extend(answers.iter().copied());
            self
        }

        pub fn typing(mut self, answers: &[&str]) -> Self {
            self.inputs.extend(answers.iter().map(|s| s.to_string()));
            self
        }

        pub fn was_asked(&self, fragment: &str) -> bool {
            self.asked.iter().any(|q| q.contains(fragment))
        }
    }

    impl Prompter for Scripted {
        fn is_interactive(&self) -> bool {
            true
        }

        fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
            self.asked.push(question.to_string());
            Ok(self.confirms.pop_front().unwrap_or(default))
        }

        fn input(&mut self, question: &str, _suggestion: Option<&str>) -> Result<String> {
            self.asked.push(question.to_string());
            self.inputs
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted answer for '{}'", question))
        }
    }

    /// A prompter whose terminal is gone: every question fails
    #[derive(Debug, Default)]
    pub struct Failing {
        pub calls: usize,
    }

    impl Prompter for Failing {
        fn is_interactive(&self) -> bool {
            true
        }

        fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
            self.calls += 1;
            anyhow::bail!("terminal closed while asking '{}'", question)
        }

        fn input(&mut self, question: &str, _suggestion: Option<&str>) -> Result<String> {
            self.calls += 1;
            anyhow::bail!("terminal closed while asking '{}'", question)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_takes_defaults() {
        let mut p = NonInteractive;
        assert!(p.confirm("Add tests?", true).unwrap());
        assert!(!p.confirm("Add benchmarks?", false).unwrap());
        assert!(p.input("Email", None).is_err());
        assert!(!p.is_interactive());
    }
}
