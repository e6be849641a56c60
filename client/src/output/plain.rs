//! Plain text output for pipes and scripts
//!
//! No colors. Tool calls and results are printed in full, in the same
//! bracketed form the model's transcript uses.

use super::{preview, Line, OutputEvent, OutputWriter};

/// Longest tool result shown when not verbose
const RESULT_PREVIEW: usize = 500;

/// Plain text output writer (no colors)
pub struct PlainOutput {
    verbose: bool,
}

impl Default for PlainOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainOutput {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Show tool results untruncated
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn render(&self, event: OutputEvent) -> Line {
        match event {
            OutputEvent::Text(text) => Line::stdout(text),
            OutputEvent::ToolCall { name, arguments } => {
                Line::stdout(format!("[Calling tool {} with args {}]", name, arguments))
            }
            OutputEvent::ToolResult { output, .. } => {
                let output = if self.verbose {
                    output
                } else {
                    preview(&output, RESULT_PREVIEW)
                };
                Line::stdout(format!("[Tool result: {}]", output))
            }
            OutputEvent::Prompt(prompt) => Line::inline(prompt),
            OutputEvent::Status(msg) => Line::stderr(format!("  {}", msg)),
            OutputEvent::Error(msg) => Line::stderr(format!("Error: {}", msg)),
            OutputEvent::Warning(msg) => Line::stderr(format!("Warning: {}", msg)),
            OutputEvent::System(msg) => Line::stdout(msg),
            OutputEvent::NewLine => Line::stdout(""),
        }
    }
}

impl OutputWriter for PlainOutput {
    fn write(&self, event: OutputEvent) {
        self.render(event).emit();
    }
}
