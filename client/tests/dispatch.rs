//! Dispatch loop against the real universal tool server, run in-process.
//!
//! Every API endpoint points at a closed local port and no API keys are
//! set, so tools answer with their placeholder text. The model is a
//! scripted provider, so nothing here needs the network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use universal_mcp::config::{Config, Endpoints};
use universal_mcp::UniversalMcpServer;
use universal_mcp_client::agent::{Agent, TurnStep};
use universal_mcp_client::llm::{
    AdapterSettings, AnthropicAdapter, ConversationMessage, OpenAiAdapter, Provider,
    ProviderAdapter, ProviderError, ProviderReply, ProviderSession, Role, ToolCall,
    ToolDescriptor,
};
use universal_mcp_client::mcp::{InProcessTools, ToolInvoker};

const WEATHER_NO_KEY: &str =
    "Error: OpenWeatherMap API key not configured. Please set OPENWEATHER_API_KEY environment variable.";

type Seen = Arc<Mutex<Vec<Vec<ConversationMessage>>>>;

/// Plays back scripted replies and records every history it is sent
struct ScriptedProvider {
    provider: Provider,
    replies: Mutex<VecDeque<ProviderReply>>,
    seen: Seen,
}

impl ScriptedProvider {
    fn new(provider: Provider, replies: Vec<ProviderReply>) -> (Self, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let mock = Self {
            provider,
            replies: Mutex::new(replies.into()),
            seen: seen.clone(),
        };
        (mock, seen)
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn send(
        &self,
        history: &[ConversationMessage],
        _tools: &[ToolDescriptor],
    ) -> Result<ProviderReply, ProviderError> {
        self.seen.lock().unwrap().push(history.to_vec());
        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| ProviderReply::Text("(no more replies)".into())))
    }
}

fn offline_server() -> UniversalMcpServer {
    let mut config = Config::default();
    config.endpoints = Endpoints::all("http://127.0.0.1:1");
    config.http.timeout_seconds = 5;
    UniversalMcpServer::new(config).unwrap()
}

fn tools() -> Box<dyn ToolInvoker> {
    Box::new(InProcessTools::new(offline_server()))
}

fn weather_call(id: &str) -> ToolCall {
    ToolCall::new(id, "get_weather", json!({"city": "Paris", "country_code": "FR"}))
}

fn tool_calls(calls: Vec<ToolCall>) -> ProviderReply {
    ProviderReply::ToolCalls {
        text: String::new(),
        calls,
    }
}

async fn agent_with(provider: ScriptedProvider) -> Agent {
    let session = ProviderSession::new(provider.provider, None);
    Agent::connect(session, Box::new(provider), tools())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_server_tools_advertised() {
    let (provider, _) = ScriptedProvider::new(Provider::Anthropic, vec![]);
    let agent = agent_with(provider).await;

    let mut names: Vec<&str> = agent.tools().iter().map(|t| t.name.as_str()).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "define_word",
            "get_crypto_price",
            "get_current_time",
            "get_news_headlines",
            "get_random_joke",
            "get_weather",
            "web_search",
        ]
    );

    let weather = agent.tools().iter().find(|t| t.name == "get_weather").unwrap();
    assert_eq!(weather.input_schema["type"], "object");
    assert!(weather.input_schema["properties"].get("city").is_some());
}

#[tokio::test]
async fn test_tool_result_fed_back_verbatim() {
    let (provider, seen) = ScriptedProvider::new(
        Provider::Anthropic,
        vec![
            tool_calls(vec![weather_call("toolu_1")]),
            ProviderReply::Text("The weather service is not configured.".into()),
        ],
    );
    let mut agent = agent_with(provider).await;

    let outcome = agent.chat("What's the weather in Paris?").await.unwrap();
    assert_eq!(outcome.answer, "The weather service is not configured.");
    assert_eq!(outcome.iterations, 2);
    assert_eq!(
        outcome.steps[1],
        TurnStep::ToolResult {
            name: "get_weather".into(),
            output: WEATHER_NO_KEY.into(),
        }
    );

    // Second model call saw: user, tool request, tool result
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].len(), 3);
    assert_eq!(seen[1][2].role, Role::Tool);
    assert_eq!(seen[1][2].content, WEATHER_NO_KEY);
}

#[tokio::test]
async fn test_tool_result_identical_in_both_wire_formats() {
    let (provider, _) = ScriptedProvider::new(
        Provider::OpenAi,
        vec![
            tool_calls(vec![weather_call("call_1")]),
            ProviderReply::Text("done".into()),
        ],
    );
    let mut agent = agent_with(provider).await;
    agent.chat("weather please").await.unwrap();

    let settings = AdapterSettings::default();
    let http = reqwest::Client::new();

    let openai = OpenAiAdapter::new(http.clone(), "test".into(), "gpt-4o".into(), &settings);
    let body = openai.request_body(agent.history(), agent.tools());
    let tool_msg = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["role"] == "tool")
        .unwrap();
    assert_eq!(tool_msg["tool_call_id"], "call_1");
    assert_eq!(tool_msg["content"], Value::String(WEATHER_NO_KEY.into()));

    let anthropic = AnthropicAdapter::new(
        http,
        "test".into(),
        "claude-3-7-sonnet-latest".into(),
        &settings,
    );
    let body = anthropic.request_body(agent.history(), agent.tools());
    let result_block = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|m| m["content"].as_array().cloned().unwrap_or_default())
        .find(|b| b["type"] == "tool_result")
        .unwrap();
    assert_eq!(result_block["tool_use_id"], "call_1");
    assert_eq!(result_block["content"], Value::String(WEATHER_NO_KEY.into()));
}

#[tokio::test]
async fn test_network_failure_becomes_placeholder() {
    let (provider, seen) = ScriptedProvider::new(
        Provider::Anthropic,
        vec![
            tool_calls(vec![ToolCall::new(
                "toolu_2",
                "get_crypto_price",
                json!({"symbol": "bitcoin"}),
            )]),
            ProviderReply::Text("CoinGecko is unreachable.".into()),
        ],
    );
    let mut agent = agent_with(provider).await;

    let outcome = agent.chat("bitcoin price?").await.unwrap();
    assert_eq!(outcome.answer, "CoinGecko is unreachable.");

    let seen = seen.lock().unwrap();
    let result = &seen[1][2].content;
    assert!(
        result.starts_with("Error fetching cryptocurrency data: "),
        "{}",
        result
    );
}

#[tokio::test]
async fn test_invalid_arguments_reported_to_model() {
    // `city` is required by the schema
    let (provider, seen) = ScriptedProvider::new(
        Provider::OpenAi,
        vec![
            tool_calls(vec![ToolCall::new("call_2", "get_weather", json!({}))]),
            ProviderReply::Text("I need a city.".into()),
        ],
    );
    let mut agent = agent_with(provider).await;

    agent.chat("weather?").await.unwrap();

    let seen = seen.lock().unwrap();
    let result = &seen[1][2].content;
    assert!(result.starts_with("Error calling tool get_weather: "), "{}", result);
}

#[tokio::test]
async fn test_unknown_tool_reported_to_model() {
    let (provider, seen) = ScriptedProvider::new(
        Provider::Anthropic,
        vec![
            tool_calls(vec![ToolCall::new("toolu_3", "get_horoscope", json!({}))]),
            ProviderReply::Text("No such tool.".into()),
        ],
    );
    let mut agent = agent_with(provider).await;

    agent.chat("horoscope").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[1][2].content,
        "Error calling tool get_horoscope: tool not found: get_horoscope"
    );
}

#[tokio::test]
async fn test_switch_provider_mid_conversation() {
    let (first, _) = ScriptedProvider::new(
        Provider::Anthropic,
        vec![
            tool_calls(vec![ToolCall::new("toolu_4", "get_current_time", json!({}))]),
            ProviderReply::Text("It is late.".into()),
        ],
    );
    let mut agent = agent_with(first).await;
    agent.chat("what time is it?").await.unwrap();
    let before = agent.history().to_vec();
    assert_eq!(before.len(), 4);

    let (second, seen) = ScriptedProvider::new(
        Provider::OpenAi,
        vec![ProviderReply::Text("Still late.".into())],
    );
    agent.switch_provider(ProviderSession::new(Provider::OpenAi, None), Box::new(second));
    agent.chat("and now?").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(&seen[0][..4], before.as_slice());
    assert!(seen[0][2].content.starts_with("Current time: "));
    assert_eq!(agent.history().len(), 6);
}
