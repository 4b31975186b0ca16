//! Where release decisions come from: an operator at a terminal, or CLI flags

use super::pipeline::{Decisions, Step};
use std::io::{self, BufRead, Write};

/// Interactive decisions over a line-oriented reader and writer
pub struct Prompter<R, W> {
  input: R,
  output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
  pub fn stdio() -> Self {
    Self::new(io::stdin().lock(), io::stdout())
  }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output }
  }

  /// Print `question` and read one line; `None` on EOF or read failure
  fn ask(&mut self, question: &str) -> Option<String> {
    // A closed stdout still lets the answer be read
    let _ = write!(self.output, "{}", question);
    let _ = self.output.flush();

    let mut line = String::new();
    match self.input.read_line(&mut line) {
      Ok(0) => None,
      Ok(_) => Some(line.trim().to_string()),
      Err(e) => {
        tracing::warn!(error = %e, "failed to read answer");
        None
      }
    }
  }
}

impl<R: BufRead, W: Write> Decisions for Prompter<R, W> {
  fn version(&mut self) -> String {
    self.ask("Enter new version (e.g., 1.8.0): ").unwrap_or_default()
  }

  fn confirm(&mut self, step: Step) -> bool {
    let question = format!("{} (y/n): ", step.question());
    self.ask(&question).is_some_and(|answer| is_yes(&answer))
  }
}

/// `y` or `yes`, any case
pub fn is_yes(answer: &str) -> bool {
  let answer = answer.trim().to_lowercase();
  answer == "y" || answer == "yes"
}

/// Answers fixed up front
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
  version: String,
  clean: bool,
  publish: bool,
  archive: bool,
}

impl ScriptedDecisions {
  /// Every optional step declined
  pub fn new(version: impl Into<String>) -> Self {
    Self {
      version: version.into(),
      ..Self::default()
    }
  }

  pub fn clean(mut self, yes: bool) -> Self {
    self.clean = yes;
    self
  }

  pub fn publish(mut self, yes: bool) -> Self {
    self.publish = yes;
    self
  }

  pub fn archive(mut self, yes: bool) -> Self {
    self.archive = yes;
    self
  }
}

impl Decisions for ScriptedDecisions {
  fn version(&mut self) -> String {
    self.version.clone()
  }

  fn confirm(&mut self, step: Step) -> bool {
    match step {
      Step::Clean => self.clean,
      Step::Publish => self.publish,
      Step::Archive => self.archive,
    }
  }
}
