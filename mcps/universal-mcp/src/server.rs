//! MCP server exposing the seven universal tools

use std::sync::Arc;

use mcp_common::{
    async_trait, decode_params, text_success, EmbeddableError, EmbeddableMcp, EmbeddableResult,
    McpError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::config::Config;
use crate::handlers::{self, ToolContext};
use crate::params::{
    CryptoPriceParams, CurrentTimeParams, DefineWordParams, JokeParams, NewsParams,
    WeatherParams, WebSearchParams,
};

const INSTRUCTIONS: &str = "Universal MCP Server - weather, cryptocurrency prices, news \
     headlines, jokes, web search, word definitions and the current time. Tools always \
     answer with text; failures are reported as an error message rather than a protocol error.";

#[derive(Clone)]
pub struct UniversalMcpServer {
    ctx: Arc<ToolContext>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl UniversalMcpServer {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            ctx: Arc::new(ToolContext::new(config)?),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(description = "Get current weather conditions for a city")]
    async fn get_weather(
        &self,
        Parameters(params): Parameters<WeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(city = %params.city, "get_weather");
        let text =
            handlers::weather::get_weather(&self.ctx, &params.city, params.country_code.as_deref())
                .await;
        Ok(text_success(text))
    }

    #[tool(description = "Get the current price of a cryptocurrency in USD and EUR with 24h change")]
    async fn get_crypto_price(
        &self,
        Parameters(params): Parameters<CryptoPriceParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(symbol = %params.symbol, "get_crypto_price");
        let text = handlers::crypto::get_crypto_price(&self.ctx, &params.symbol).await;
        Ok(text_success(text))
    }

    #[tool(description = "Get top news headlines, optionally filtered by topic and country")]
    async fn get_news_headlines(
        &self,
        Parameters(params): Parameters<NewsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(topic = ?params.topic, "get_news_headlines");
        let text = handlers::news::get_news_headlines(
            &self.ctx,
            params.topic.as_deref(),
            params.country.as_deref(),
            params.count,
        )
        .await;
        Ok(text_success(text))
    }

    #[tool(description = "Get a random safe-for-work joke, optionally from a specific category")]
    async fn get_random_joke(
        &self,
        Parameters(params): Parameters<JokeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(category = ?params.category, "get_random_joke");
        let text = handlers::joke::get_random_joke(&self.ctx, params.category.as_deref()).await;
        Ok(text_success(text))
    }

    #[tool(description = "Search the web for information")]
    async fn web_search(
        &self,
        Parameters(params): Parameters<WebSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(query = %params.query, "web_search");
        let text = handlers::search::web_search(&self.ctx, &params.query, params.count).await;
        Ok(text_success(text))
    }

    #[tool(description = "Get the definition, part of speech, examples and pronunciation of an English word")]
    async fn define_word(
        &self,
        Parameters(params): Parameters<DefineWordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(word = %params.word, "define_word");
        let text = handlers::dictionary::define_word(&self.ctx, &params.word).await;
        Ok(text_success(text))
    }

    #[tool(description = "Get the current date and time in UTC or local time")]
    async fn get_current_time(
        &self,
        Parameters(params): Parameters<CurrentTimeParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = handlers::time::get_current_time(params.timezone.as_deref());
        Ok(text_success(text))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for UniversalMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl EmbeddableMcp for UniversalMcpServer {
    fn server_name(&self) -> &str {
        "universal"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        let result = match name {
            "get_weather" => self.get_weather(Parameters(decode_params(params)?)).await,
            "get_crypto_price" => {
                self.get_crypto_price(Parameters(decode_params(params)?))
                    .await
            }
            "get_news_headlines" => {
                self.get_news_headlines(Parameters(decode_params(params)?))
                    .await
            }
            "get_random_joke" => {
                self.get_random_joke(Parameters(decode_params(params)?))
                    .await
            }
            "web_search" => self.web_search(Parameters(decode_params(params)?)).await,
            "define_word" => self.define_word(Parameters(decode_params(params)?)).await,
            "get_current_time" => {
                self.get_current_time(Parameters(decode_params(params)?))
                    .await
            }
            _ => return Err(EmbeddableError::ToolNotFound(name.to_string())),
        };

        result.map_err(Into::into)
    }
}
