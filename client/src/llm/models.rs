//! Short model names and their full identifiers

use super::Provider;

const ANTHROPIC_MODELS: &[(&str, &str)] = &[
    ("claude-3-opus", "claude-3-opus-latest"),
    ("claude-3-sonnet", "claude-3-7-sonnet-latest"),
    ("claude-3-haiku", "claude-3-5-haiku-latest"),
];

const OPENAI_MODELS: &[(&str, &str)] = &[
    ("gpt-4-turbo", "gpt-4-turbo"),
    ("gpt-4", "gpt-4o"),
    ("gpt-3.5-turbo", "gpt-3.5-turbo"),
];

fn aliases(provider: Provider) -> &'static [(&'static str, &'static str)] {
    match provider {
        Provider::OpenAi => OPENAI_MODELS,
        Provider::Anthropic => ANTHROPIC_MODELS,
    }
}

/// Short name used when no model is given
pub fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAi => "gpt-4-turbo",
        Provider::Anthropic => "claude-3-sonnet",
    }
}

/// Resolve a short name to the identifier sent on the wire.
/// Unknown names pass through unchanged.
pub fn resolve_model(provider: Provider, name: &str) -> String {
    aliases(provider)
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, full)| full.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Short names known for a provider, for help output
pub fn known_models(provider: Provider) -> impl Iterator<Item = &'static str> {
    aliases(provider).iter().map(|(alias, _)| *alias)
}
