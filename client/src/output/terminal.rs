//! Terminal output with colors and formatting
//!
//! Uses ANSI escape codes for colors and styling.

use super::{preview, Line, OutputEvent, OutputWriter};

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";

/// Tool arguments longer than this are cut in the call line
const ARGS_PREVIEW: usize = 80;
/// Tool results longer than this are cut unless verbose
const RESULT_PREVIEW: usize = 300;

/// Terminal output writer with colors and formatting
pub struct TerminalOutput {
    use_colors: bool,
    verbose: bool,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Colors only when stdout is a TTY and `NO_COLOR` is unset
    pub fn auto() -> Self {
        use std::io::IsTerminal;
        Self {
            use_colors: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
            verbose: false,
        }
    }

    pub fn without_colors() -> Self {
        Self {
            use_colors: false,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Format with color if colors are enabled
    fn color(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn styled(&self, codes: &[&str], text: &str) -> String {
        if self.use_colors {
            let prefix: String = codes.iter().copied().collect();
            format!("{}{}{}", prefix, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Compact JSON, empty for `{}` and `null`
    fn format_args(&self, args: &serde_json::Value) -> String {
        match args {
            serde_json::Value::Object(map) if map.is_empty() => String::new(),
            serde_json::Value::Null => String::new(),
            _ => preview(&args.to_string(), ARGS_PREVIEW),
        }
    }

    fn render(&self, event: OutputEvent) -> Line {
        match event {
            OutputEvent::Text(text) => Line::stdout(text),

            OutputEvent::ToolCall { name, arguments } => {
                let tool_name = self.styled(&[BOLD, CYAN], &name);
                let args_str = self.format_args(&arguments);
                let arrow = self.color(GRAY, "→");

                if args_str.is_empty() {
                    Line::stdout(format!("  {} {}", arrow, tool_name))
                } else {
                    Line::stdout(format!(
                        "  {} {} {}",
                        arrow,
                        tool_name,
                        self.color(GRAY, &args_str)
                    ))
                }
            }

            OutputEvent::ToolResult { name, output } => {
                let output = if self.verbose {
                    output
                } else {
                    preview(&output, RESULT_PREVIEW)
                };
                // Placeholders start with "Error"
                let (mark, body) = if output.starts_with("Error") {
                    (self.color(RED, "✗"), self.color(RED, &output))
                } else {
                    (self.color(GREEN, "✓"), self.styled(&[DIM], &output))
                };
                Line::stdout(format!("  {} {} {}", mark, name, body))
            }

            OutputEvent::Prompt(prompt) => Line::inline(self.styled(&[BOLD], &prompt)),

            OutputEvent::Status(msg) => Line::stderr(self.color(GRAY, &format!("  {}", msg))),

            OutputEvent::Error(msg) => Line::stderr(format!(
                "{} {}",
                self.styled(&[BOLD, RED], "Error:"),
                self.color(RED, &msg)
            )),

            OutputEvent::Warning(msg) => Line::stderr(format!(
                "{} {}",
                self.styled(&[BOLD, YELLOW], "Warning:"),
                self.color(YELLOW, &msg)
            )),

            OutputEvent::System(msg) => Line::stdout(self.color(GRAY, &msg)),

            OutputEvent::NewLine => Line::stdout(""),
        }
    }
}

impl OutputWriter for TerminalOutput {
    fn write(&self, event: OutputEvent) {
        self.render(event).emit();
    }

    fn supports_colors(&self) -> bool {
        self.use_colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_output_creation() {
        let output = TerminalOutput::new();
        assert!(output.use_colors);
        assert!(!output.verbose);
        assert!(output.supports_colors());

        let output = TerminalOutput::without_colors();
        assert!(!output.use_colors);
    }

    #[test]
    fn test_color_formatting() {
        let output = TerminalOutput::new();
        let colored = output.color(RED, "test");
        assert_eq!(colored, "\x1b[31mtest\x1b[0m");

        let output = TerminalOutput::without_colors();
        assert_eq!(output.color(RED, "test"), "test");
    }

    #[test]
    fn test_format_args() {
        let output = TerminalOutput::new();

        assert_eq!(output.format_args(&serde_json::json!({})), "");
        assert_eq!(output.format_args(&serde_json::Value::Null), "");
        assert_eq!(
            output.format_args(&serde_json::json!({"symbol": "bitcoin"})),
            r#"{"symbol":"bitcoin"}"#
        );

        let long = serde_json::json!({"query": "q".repeat(200)});
        assert_eq!(output.format_args(&long).chars().count(), ARGS_PREVIEW);
    }

    #[test]
    fn test_tool_lines_without_colors() {
        let output = TerminalOutput::without_colors();

        let line = output.render(OutputEvent::ToolCall {
            name: "get_current_time".into(),
            arguments: serde_json::json!({}),
        });
        assert_eq!(line.text, "  → get_current_time");

        let line = output.render(OutputEvent::ToolResult {
            name: "get_weather".into(),
            output: "Error: OpenWeatherMap API key not configured.".into(),
        });
        assert_eq!(
            line.text,
            "  ✗ get_weather Error: OpenWeatherMap API key not configured."
        );

        let line = output.render(OutputEvent::ToolResult {
            name: "get_current_time".into(),
            output: "Current time: 2024-01-01 00:00:00 (UTC)".into(),
        });
        assert_eq!(
            line.text,
            "  ✓ get_current_time Current time: 2024-01-01 00:00:00 (UTC)"
        );
    }
}
