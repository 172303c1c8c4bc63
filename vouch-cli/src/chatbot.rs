//! Chat loop and stdin reviewer.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use vouch::prelude::*;
use vouch::tools::todo::format_plan;

/// Configuration for the chat loop.
#[derive(Debug, Clone)]
pub struct ChatBotConfig {
    /// Session id to load and persist.
    pub session_id: String,
    /// Directory for session JSON files.
    pub state_dir: PathBuf,
    /// Workspace directory for the file-write tool.
    pub workspace: PathBuf,
    /// Reasoning-turn budget per request.
    pub max_turns: usize,
    /// Skip the approval prompts entirely.
    pub auto_approve: bool,
}

impl Default for ChatBotConfig {
    fn default() -> Self {
        Self {
            session_id: "default".to_owned(),
            state_dir: PathBuf::from(".vouch/sessions"),
            workspace: PathBuf::from(".vouch/workspace"),
            max_turns: 10,
            auto_approve: false,
        }
    }
}

/// The documents the demo knowledge base is built from.
#[must_use]
pub fn demo_corpus() -> Vec<String> {
    vec![
        "The user is a software engineer moving to Texas.".to_owned(),
        "The device ID is XJ-900. It requires a restart.".to_owned(),
        "Austin summers regularly exceed 35°C; hydration is recommended.".to_owned(),
        "Company policy: generated files belong in the workspace directory.".to_owned(),
    ]
}

/// Interactive chat session over a configured agent.
pub struct ChatBot {
    agent: Agent,
    runner: Runner,
    config: ChatBotConfig,
}

impl std::fmt::Debug for ChatBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatBot")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatBot {
    /// Build the demo agent: planning, weather, math, knowledge-base search,
    /// and a gated file writer.
    pub fn new(provider: Arc<dyn ModelProvider>, config: ChatBotConfig) -> Result<Self> {
        let index = Arc::new(CorpusIndex::build(demo_corpus()));

        let policy = ApprovalPolicy::new(PolicyDefault::AutoApprove)
            .require("write_todos")
            .require("write_file")
            .description_prefix("⚠️  REVIEW REQUIRED");

        let agent = Agent::builder("vouch")
            .instructions(
                "You are a helpful AI assistant. You have access to a 'write_todos' tool. \
                 ALWAYS start by creating a todo list plan using 'write_todos' before taking \
                 any other actions.",
            )
            .tool(WriteTodosTool::new())
            .tool(WeatherTool::new())
            .tool(CalculatorTool::new())
            .tool(SearchTool::new(index, 3))
            .tool(WriteFileTool::new(&config.workspace))
            .policy(policy)
            .provider(provider)
            .max_turns(config.max_turns)
            .build()
            .context("failed to build agent")?;

        let runner = Runner::new(Arc::new(FileStore::new(&config.state_dir)));

        Ok(Self {
            agent,
            runner,
            config,
        })
    }

    /// Run the REPL until EOF or an exit command.
    pub async fn run(&self) -> Result<()> {
        println!("vouch — approval-gated agent REPL");
        println!("session '{}' — type 'exit' to quit\n", self.config.session_id);

        loop {
            let Some(line) = read_line("you> ").await? else {
                break;
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if matches!(input, "exit" | "quit") {
                break;
            }

            match self.process(input).await {
                Ok(answer) => println!("\nagent> {answer}\n"),
                Err(e) => eprintln!("\nerror: {e}\n"),
            }
        }

        println!("bye");
        Ok(())
    }

    /// Drive one user request to completion, prompting on each suspension.
    pub async fn process(&self, input: &str) -> Result<String> {
        debug!(session = %self.config.session_id, "processing input");
        if self.config.auto_approve {
            let answer = self
                .runner
                .run_to_completion(&self.agent, &self.config.session_id, input, &AutoApprove)
                .await?;
            return Ok(answer);
        }

        let reviewer = StdinReviewer;
        let answer = self
            .runner
            .run_to_completion(&self.agent, &self.config.session_id, input, &reviewer)
            .await?;
        Ok(answer)
    }
}

/// Reviewer that prompts on stdin.
///
/// Plans from `write_todos` are shown as a numbered task list; everything
/// else gets the generic tool-and-arguments rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinReviewer;

#[async_trait]
impl Reviewer for StdinReviewer {
    async fn review(&self, action: &PendingAction) -> Decision {
        println!("\n{}", "=".repeat(60));
        if action.tool_name == "write_todos" {
            if let Some(plan) = format_plan(&action.arguments) {
                println!("🛑 The agent wants to lock in this plan.\n{plan}");
            } else {
                println!("{}", action.render("🛑 REVIEW REQUIRED"));
            }
        } else {
            println!("{}", action.render("🛑 REVIEW REQUIRED"));
        }
        println!("{}", "-".repeat(60));

        let answer = read_line("Approve? (y/n): ").await.ok().flatten();
        match answer.as_deref().map(str::trim) {
            Some("y" | "yes" | "Y") => {
                println!("✅ Approved. Resuming...");
                Decision::Approve
            }
            _ => {
                println!("❌ Rejected.");
                let feedback = read_line("Provide feedback for rejection: ")
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or_default();
                Decision::reject(feedback.trim().to_owned())
            }
        }
    }
}

/// Print a prompt and read one line from stdin without blocking the runtime.
///
/// Returns `None` on EOF.
async fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush().ok();

    let line = tokio::task::spawn_blocking(|| {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input),
            Err(_) => None,
        }
    })
    .await
    .context("stdin task failed")?;

    Ok(line)
}
