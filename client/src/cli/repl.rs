//! REPL (Read-Eval-Print Loop) for the chat client

use std::io::{self, BufRead};

use anyhow::Result;

use super::commands::{help_text, ReplCommand, UseTarget};
use crate::agent::Agent;
use crate::llm::ProviderFactory;
use crate::output::{outcome_events, OutputEvent, OutputWriter};

/// Interactive REPL
pub struct Repl<'a> {
    agent: &'a mut Agent,
    factory: &'a ProviderFactory,
    output: &'a dyn OutputWriter,
}

impl<'a> Repl<'a> {
    pub fn new(
        agent: &'a mut Agent,
        factory: &'a ProviderFactory,
        output: &'a dyn OutputWriter,
    ) -> Self {
        Self {
            agent,
            factory,
            output,
        }
    }

    /// Run the REPL on stdin until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock()).await
    }

    /// Run the REPL reading lines from `input`
    pub async fn run_with<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        self.print_banner();

        loop {
            self.output.write(OutputEvent::NewLine);
            self.output.write(OutputEvent::Prompt("Query: ".to_string()));
            self.output.flush();

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // End of input
                self.output.write(OutputEvent::NewLine);
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match ReplCommand::parse(line) {
                Ok(ReplCommand::Quit) => break,
                Ok(ReplCommand::Use(target)) => self.handle_use(&target),
                Ok(ReplCommand::Tools) => self.handle_tools(),
                Ok(ReplCommand::Clear) => {
                    self.agent.clear_history();
                    self.output
                        .write(OutputEvent::Status("Conversation history cleared".to_string()));
                }
                Ok(ReplCommand::Help) => self.output.write(OutputEvent::Text(help_text())),
                Ok(ReplCommand::Query(query)) => self.handle_query(&query).await,
                Err(e) => self.output.write(OutputEvent::Warning(e.to_string())),
            }
        }

        self.output.flush();
        Ok(())
    }

    fn print_banner(&self) {
        let session = self.agent.session();
        self.output.write(OutputEvent::System(
            "Universal MCP Client Started!".to_string(),
        ));
        self.output.write(OutputEvent::System(format!(
            "Using {} with model {}",
            session.provider,
            self.agent.model()
        )));
        self.output.write(OutputEvent::System(format!(
            "{} tools available. Type your queries, 'help' for commands or 'quit' to exit.",
            self.agent.tools().len()
        )));
        self.output.write(OutputEvent::System(
            "Switch models with 'use openai' or 'use anthropic:claude-3-opus'.".to_string(),
        ));
    }

    /// Switch provider/model. A failed build keeps the current adapter.
    fn handle_use(&mut self, target: &UseTarget) {
        let Some(next) = target.switch_from(self.agent.session()) else {
            self.output.write(OutputEvent::Status(format!(
                "Already using {} with model {}",
                self.agent.session().provider,
                self.agent.model()
            )));
            return;
        };

        match self.factory.build(&next) {
            Ok(adapter) => {
                self.agent.switch_provider(next, adapter);
                self.output.write(OutputEvent::System(format!(
                    "Switched to {} with model {}",
                    self.agent.session().provider,
                    self.agent.model()
                )));
            }
            Err(e) => {
                self.output
                    .write(OutputEvent::Error(format!("Error switching model: {}", e)));
            }
        }
    }

    fn handle_tools(&self) {
        let tools = self.agent.tools();
        let mut text = format!("Available tools ({}):\n", tools.len());
        for tool in tools {
            text.push_str(&format!("\n  {}\n", tool.name));
            // First line of the description only
            if let Some(first_line) = tool.description.lines().next() {
                text.push_str(&format!("    {}\n", first_line));
            }
        }
        self.output.write(OutputEvent::Text(text.trim_end().to_string()));
    }

    async fn handle_query(&mut self, query: &str) {
        match self.agent.chat(query).await {
            Ok(outcome) => {
                self.output.write(OutputEvent::NewLine);
                for event in outcome_events(&outcome) {
                    self.output.write(event);
                }
            }
            Err(e) => {
                self.output.write(OutputEvent::NewLine);
                self.output.write(OutputEvent::Error(e.to_string()));
            }
        }
    }
}
