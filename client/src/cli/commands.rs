//! REPL command parsing
//!
//! Commands are plain words (`quit`, `use openai`, `tools`...). A leading
//! slash is accepted too, so `/help` works. Anything that is not a command
//! is a query for the model.

use crate::llm::{Provider, ProviderSession};

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Use(UseTarget),
    Tools,
    Clear,
    Help,
    Query(String),
}

/// Target of a `use <provider>[:<model>]` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseTarget {
    pub provider: Provider,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unsupported provider: {0}. Use 'openai' or 'anthropic'.")]
    UnsupportedProvider(String),

    #[error("Usage: use <provider>[:<model>], e.g. 'use openai' or 'use anthropic:claude-3-opus'")]
    MissingProvider,

    #[error("Unknown command: /{0}. Type help for available commands.")]
    Unknown(String),
}

/// (name, description) pairs shown by `help`
pub const COMMANDS: &[(&str, &str)] = &[
    ("use <provider>[:<model>]", "Switch provider and/or model, keeping the conversation"),
    ("tools", "List the tools the server provides"),
    ("clear", "Clear conversation history"),
    ("help", "Show available commands"),
    ("quit, exit", "Exit the client"),
];

impl ReplCommand {
    /// Parse one trimmed, non-empty input line
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let (slashed, body) = match input.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let mut parts = body.splitn(2, char::is_whitespace);
        let word = parts.next().unwrap_or_default().to_ascii_lowercase();
        let rest = parts.next().unwrap_or_default().trim();

        match (word.as_str(), rest.is_empty()) {
            ("quit" | "exit", true) => Ok(ReplCommand::Quit),
            ("tools", true) => Ok(ReplCommand::Tools),
            ("clear", true) => Ok(ReplCommand::Clear),
            ("help", true) => Ok(ReplCommand::Help),
            ("use", _) => UseTarget::parse(rest).map(ReplCommand::Use),
            _ if slashed => Err(CommandError::Unknown(word)),
            _ => Ok(ReplCommand::Query(input.to_string())),
        }
    }
}

impl UseTarget {
    /// Parse `<provider>[:<model>]`. The provider is case-insensitive;
    /// an empty model counts as none.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::MissingProvider);
        }

        let (provider, model) = match input.split_once(':') {
            Some((provider, model)) => (provider, Some(model.trim())),
            None => (input, None),
        };

        let provider = provider
            .parse::<Provider>()
            .map_err(|e| CommandError::UnsupportedProvider(e.0.to_ascii_lowercase()))?;
        let model = model.filter(|m| !m.is_empty()).map(str::to_string);

        Ok(Self { provider, model })
    }

    /// The session to switch to, or `None` when `current` already matches.
    ///
    /// A different provider always switches (to its default model unless one
    /// is named). The same provider switches only when a different model is
    /// named.
    pub fn switch_from(&self, current: &ProviderSession) -> Option<ProviderSession> {
        if self.provider != current.provider {
            return Some(ProviderSession::new(self.provider, self.model.clone()));
        }
        match &self.model {
            Some(model) if *model != current.model => {
                Some(ProviderSession::new(self.provider, Some(model.clone())))
            }
            _ => None,
        }
    }
}

/// Text printed by `help`
pub fn help_text() -> String {
    let mut text = String::from("Available commands:\n\n");
    for (name, description) in COMMANDS {
        text.push_str(&format!("  {:<26} {}\n", name, description));
    }
    text.push_str("\nAnything else is sent to the model as a query.");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(ReplCommand::parse("quit"), Ok(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("EXIT"), Ok(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("tools"), Ok(ReplCommand::Tools));
        assert_eq!(ReplCommand::parse("/clear"), Ok(ReplCommand::Clear));
        assert_eq!(ReplCommand::parse("help"), Ok(ReplCommand::Help));
    }

    #[test]
    fn test_queries() {
        assert_eq!(
            ReplCommand::parse("What's the weather in Paris?"),
            Ok(ReplCommand::Query("What's the weather in Paris?".into()))
        );
        // Command words followed by more text are queries
        assert_eq!(
            ReplCommand::parse("tools for weather?"),
            Ok(ReplCommand::Query("tools for weather?".into()))
        );
        assert_eq!(
            ReplCommand::parse("user experience"),
            Ok(ReplCommand::Query("user experience".into()))
        );
    }

    #[test]
    fn test_use_provider_case_insensitive() {
        assert_eq!(
            ReplCommand::parse("use OpenAI"),
            Ok(ReplCommand::Use(UseTarget {
                provider: Provider::OpenAi,
                model: None,
            }))
        );
        assert_eq!(
            ReplCommand::parse("USE anthropic:claude-3-opus"),
            Ok(ReplCommand::Use(UseTarget {
                provider: Provider::Anthropic,
                model: Some("claude-3-opus".into()),
            }))
        );
    }

    #[test]
    fn test_use_empty_model_is_none() {
        let target = UseTarget::parse("openai:").unwrap();
        assert_eq!(target.model, None);
    }

    #[test]
    fn test_use_invalid_provider() {
        let err = ReplCommand::parse("use Gemini").unwrap_err();
        assert_eq!(err, CommandError::UnsupportedProvider("gemini".into()));
        assert_eq!(
            err.to_string(),
            "Unsupported provider: gemini. Use 'openai' or 'anthropic'."
        );
        assert_eq!(ReplCommand::parse("use"), Err(CommandError::MissingProvider));
    }

    #[test]
    fn test_unknown_slash_command() {
        assert_eq!(
            ReplCommand::parse("/models"),
            Err(CommandError::Unknown("models".into()))
        );
    }

    #[test]
    fn test_switch_decision() {
        let current = ProviderSession::new(Provider::Anthropic, None);

        // Same provider, no model: nothing to do
        let target = UseTarget::parse("anthropic").unwrap();
        assert_eq!(target.switch_from(&current), None);

        // Same provider, same model: nothing to do
        let target = UseTarget::parse("anthropic:claude-3-sonnet").unwrap();
        assert_eq!(target.switch_from(&current), None);

        // Same provider, new model
        let target = UseTarget::parse("anthropic:claude-3-opus").unwrap();
        assert_eq!(
            target.switch_from(&current),
            Some(ProviderSession::new(Provider::Anthropic, Some("claude-3-opus".into())))
        );

        // New provider gets its default model
        let target = UseTarget::parse("openai").unwrap();
        let next = target.switch_from(&current).unwrap();
        assert_eq!(next.provider, Provider::OpenAi);
        assert_eq!(next.model, "gpt-4-turbo");
    }

    #[test]
    fn test_help_lists_commands() {
        let help = help_text();
        for (name, _) in COMMANDS {
            assert!(help.contains(name));
        }
    }
}
