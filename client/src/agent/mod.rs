//! Conversation dispatch loop
//!
//! One turn works like this:
//! 1. The user message is appended to the history
//! 2. The current provider receives the whole history plus the tools
//! 3. A text reply ends the turn
//! 4. Tool calls are run one by one through the tool bridge, their results
//!    are appended, and the provider is called again
//!
//! The history lives for the whole session and is shared by both
//! providers, so `use openai` halfway through a conversation keeps context.

mod types;

pub use types::{AgentError, DispatchState, TurnOutcome, TurnStep};

use crate::llm::{
    ConversationMessage, ProviderAdapter, ProviderReply, ProviderSession, ToolCall,
    ToolDescriptor,
};
use crate::mcp::{McpBridgeError, ToolInvoker};

/// Maximum number of model calls in one turn
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Chat session: provider, tool bridge and history
pub struct Agent {
    adapter: Box<dyn ProviderAdapter>,
    session: ProviderSession,
    tools: Box<dyn ToolInvoker>,
    tool_descriptors: Vec<ToolDescriptor>,
    history: Vec<ConversationMessage>,
    max_iterations: usize,
    state: DispatchState,
}

impl Agent {
    /// Create an agent and fetch the tool list once
    pub async fn connect(
        session: ProviderSession,
        adapter: Box<dyn ProviderAdapter>,
        tools: Box<dyn ToolInvoker>,
    ) -> Result<Self, AgentError> {
        let tool_descriptors = tools.list_tools().await?;
        tracing::info!("Agent has {} tools available", tool_descriptors.len());

        Ok(Self {
            adapter,
            session,
            tools,
            tool_descriptors,
            history: Vec::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            state: DispatchState::AwaitingUser,
        })
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn session(&self) -> &ProviderSession {
        &self.session
    }

    /// Full model identifier of the current adapter
    pub fn model(&self) -> &str {
        self.adapter.model()
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tool_descriptors
    }

    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    /// Replace the provider. The history is kept as is.
    pub fn switch_provider(&mut self, session: ProviderSession, adapter: Box<dyn ProviderAdapter>) {
        tracing::info!(from = %self.session, to = %session, "switching provider");
        self.session = session;
        self.adapter = adapter;
    }

    /// Close the tool bridge
    pub async fn shutdown(&self) -> Result<(), McpBridgeError> {
        self.tools.shutdown().await
    }

    /// Record the final answer and hand control back to the user
    fn finish_turn(
        &mut self,
        answer: String,
        steps: Vec<TurnStep>,
        iterations: usize,
        hit_iteration_limit: bool,
    ) -> TurnOutcome {
        self.history.push(ConversationMessage::assistant(answer.clone()));
        self.state = DispatchState::FinalAnswer;
        tracing::debug!(state = ?self.state, iterations, hit_iteration_limit, "turn finished");
        self.state = DispatchState::AwaitingUser;
        TurnOutcome {
            answer,
            steps,
            iterations,
            hit_iteration_limit,
        }
    }

    /// Run one user turn to a final answer.
    ///
    /// On provider failure the messages added during this turn are removed
    /// again, so the history never ends with a dangling tool request.
    pub async fn chat(&mut self, user_input: &str) -> Result<TurnOutcome, AgentError> {
        let checkpoint = self.history.len();
        self.history.push(ConversationMessage::user(user_input));

        let mut steps = Vec::new();
        let mut iteration = 0;

        loop {
            if iteration >= self.max_iterations {
                tracing::warn!("Agent reached max iterations ({}), stopping", self.max_iterations);
                let answer = format!(
                    "Stopped after {} model calls without a final answer (iteration limit reached).",
                    self.max_iterations
                );
                return Ok(self.finish_turn(answer, steps, iteration, true));
            }

            iteration += 1;
            self.state = DispatchState::CallingModel { iteration };
            tracing::debug!(
                iteration,
                provider = %self.adapter.provider(),
                messages = self.history.len(),
                "calling model"
            );

            let reply = match self.adapter.send(&self.history, &self.tool_descriptors).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!("provider call failed: {}", e);
                    self.history.truncate(checkpoint);
                    self.state = DispatchState::AwaitingUser;
                    return Err(e.into());
                }
            };

            match reply {
                ProviderReply::Text(answer) => {
                    tracing::info!("Agent responding without tool calls");
                    return Ok(self.finish_turn(answer, steps, iteration, false));
                }
                ProviderReply::ToolCalls { text, calls } => {
                    tracing::info!("Agent making {} tool call(s)", calls.len());

                    if !text.is_empty() {
                        steps.push(TurnStep::Text(text.clone()));
                    }

                    // One assistant message per call; the first carries the text
                    for (i, call) in calls.iter().enumerate() {
                        let content = if i == 0 { text.as_str() } else { "" };
                        self.history
                            .push(ConversationMessage::assistant_tool_call(content, call.clone()));
                    }

                    for call in calls {
                        self.state = DispatchState::InvokingTool {
                            name: call.name.clone(),
                        };
                        steps.push(TurnStep::ToolCall {
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        });

                        let output = self.invoke(&call).await;

                        steps.push(TurnStep::ToolResult {
                            name: call.name.clone(),
                            output: output.clone(),
                        });
                        self.history.push(ConversationMessage::tool_result(call, output));
                    }
                }
            }
        }
    }

    /// Run one tool call. Never fails: problems become placeholder text
    /// that is handed to the model as the tool's result.
    async fn invoke(&self, call: &ToolCall) -> String {
        let Some(arguments) = call.object_arguments() else {
            tracing::warn!(tool = %call.name, "tool call arguments are not a JSON object");
            return format!("Error: Could not parse arguments for {}", call.name);
        };

        tracing::info!("Executing tool: {} with args: {}", call.name, call.arguments);

        match self.tools.call_tool(&call.name, arguments.clone()).await {
            Ok(output) => {
                tracing::debug!(tool = %call.name, bytes = output.len(), "tool returned");
                output
            }
            Err(e) => {
                tracing::warn!(tool = %call.name, "tool call failed: {}", e);
                format!("Error calling tool {}: {}", call.name, e)
            }
        }
    }
}
