//! Tool result helpers
//!
//! The universal tools always answer with text, including when the upstream
//! API fails: the failure is described in the text and the result is still a
//! success at the protocol level. The client flattens results back into a
//! single string with [`result_text`].

use rmcp::model::{CallToolResult, Content, RawContent};

/// Wrap plain text in a successful tool result
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Flatten a tool result into the text that is handed to the model.
///
/// Text items are joined with newlines in order. Non-text items are skipped;
/// none of the universal tools produce them.
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|content| match &content.raw {
            RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_success() {
        let result = text_success("Current time: 2024-01-01 00:00:00 (UTC)");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_result_text_joins_in_order() {
        let result = CallToolResult::success(vec![Content::text("first"), Content::text("second")]);
        assert_eq!(result_text(&result), "first\nsecond");
    }

    #[test]
    fn test_result_text_preserves_whitespace() {
        let text = "Weather in Oslo:\n- Conditions: snow\n";
        assert_eq!(result_text(&text_success(text)), text);
    }

    #[test]
    fn test_result_text_empty() {
        let result = CallToolResult::success(vec![]);
        assert_eq!(result_text(&result), "");
    }
}
