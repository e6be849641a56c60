//! Output abstraction for the chat client
//!
//! The REPL emits [`OutputEvent`]s and an [`OutputWriter`] decides how they
//! look: [`TerminalOutput`] adds ANSI colors, [`PlainOutput`] is for pipes.
//! Conversation text goes to stdout, status and errors to stderr.

use std::io::{self, IsTerminal, Write};

use crate::agent::{TurnOutcome, TurnStep};

mod plain;
mod terminal;

pub use plain::PlainOutput;
pub use terminal::TerminalOutput;

/// Events that can be displayed to the user
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// Conversation text (model answers, command listings)
    Text(String),

    /// The model asked for a tool
    ToolCall {
        name: String,
        arguments: serde_json::Value,
    },

    /// What the tool returned
    ToolResult { name: String, output: String },

    /// Input prompt, printed without a trailing newline
    Prompt(String),

    /// Status message (informational)
    Status(String),

    Error(String),

    Warning(String),

    /// System message (dimmed, for internal info)
    System(String),

    NewLine,
}

/// Which stream a rendered line goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
}

/// A rendered event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub target: Target,
    pub text: String,
    pub newline: bool,
}

impl Line {
    fn stdout(text: impl Into<String>) -> Self {
        Self {
            target: Target::Stdout,
            text: text.into(),
            newline: true,
        }
    }

    fn stderr(text: impl Into<String>) -> Self {
        Self {
            target: Target::Stderr,
            text: text.into(),
            newline: true,
        }
    }

    fn inline(text: impl Into<String>) -> Self {
        Self {
            target: Target::Stdout,
            text: text.into(),
            newline: false,
        }
    }

    /// Print to the target stream
    fn emit(&self) {
        match (self.target, self.newline) {
            (Target::Stdout, true) => println!("{}", self.text),
            (Target::Stdout, false) => {
                print!("{}", self.text);
                let _ = io::stdout().flush();
            }
            (Target::Stderr, _) => eprintln!("{}", self.text),
        }
    }
}

/// Trait for writing output events
pub trait OutputWriter: Send + Sync {
    /// Write an output event
    fn write(&self, event: OutputEvent);

    /// Flush any buffered output
    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }

    /// Whether this writer supports colors/formatting
    fn supports_colors(&self) -> bool {
        false
    }
}

/// Pick a writer for the current stdout: colors on a terminal, plain otherwise
pub fn default_output(verbose: bool) -> Box<dyn OutputWriter> {
    if io::stdout().is_terminal() {
        Box::new(TerminalOutput::auto().with_verbose(verbose))
    } else {
        Box::new(PlainOutput::new().with_verbose(verbose))
    }
}

/// Events for one finished turn: each step in order, then the answer
pub fn outcome_events(outcome: &TurnOutcome) -> Vec<OutputEvent> {
    let mut events: Vec<OutputEvent> = outcome
        .steps
        .iter()
        .map(|step| match step {
            TurnStep::Text(text) => OutputEvent::Text(text.clone()),
            TurnStep::ToolCall { name, arguments } => OutputEvent::ToolCall {
                name: name.clone(),
                arguments: arguments.clone(),
            },
            TurnStep::ToolResult { name, output } => OutputEvent::ToolResult {
                name: name.clone(),
                output: output.clone(),
            },
        })
        .collect();

    if outcome.hit_iteration_limit {
        events.push(OutputEvent::Warning(format!(
            "stopped after {} model calls",
            outcome.iterations
        )));
    }
    events.push(OutputEvent::Text(outcome.answer.clone()));
    events
}

/// At most `max` characters of `text`, with `...` appended when cut
pub(crate) fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Output writer that records events
    pub(crate) struct MockOutput {
        events: Arc<Mutex<Vec<OutputEvent>>>,
    }

    impl MockOutput {
        pub(crate) fn new() -> (Self, Arc<Mutex<Vec<OutputEvent>>>) {
            let events = Arc::new(Mutex::new(Vec::new()));
            (Self { events: events.clone() }, events)
        }
    }

    impl OutputWriter for MockOutput {
        fn write(&self, event: OutputEvent) {
            self.events.lock().unwrap().push(event);
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_mock_output() {
        let (mock, events) = MockOutput::new();

        mock.write(OutputEvent::Text("Hello".to_string()));
        mock.write(OutputEvent::Status("Working...".to_string()));

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0], OutputEvent::Text("Hello".to_string()));
    }

    #[test]
    fn test_outcome_events_order() {
        let outcome = TurnOutcome {
            answer: "Sunny.".into(),
            steps: vec![
                TurnStep::ToolCall {
                    name: "get_weather".into(),
                    arguments: serde_json::json!({"city": "Lima"}),
                },
                TurnStep::ToolResult {
                    name: "get_weather".into(),
                    output: "sun".into(),
                },
            ],
            iterations: 2,
            hit_iteration_limit: false,
        };

        let events = outcome_events(&outcome);
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], OutputEvent::ToolCall { name, .. } if name == "get_weather"));
        assert!(matches!(&events[1], OutputEvent::ToolResult { output, .. } if output == "sun"));
        assert_eq!(events[2], OutputEvent::Text("Sunny.".into()));
    }

    #[test]
    fn test_outcome_events_iteration_limit_warning() {
        let outcome = TurnOutcome {
            answer: "gave up".into(),
            steps: Vec::new(),
            iterations: 10,
            hit_iteration_limit: true,
        };
        let events = outcome_events(&outcome);
        assert_eq!(
            events[0],
            OutputEvent::Warning("stopped after 10 model calls".into())
        );
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdefghijkl", 8), "abcde...");
        // Multi-byte characters are never split
        assert_eq!(preview("ééééééé", 5), "éé...");
    }
}
