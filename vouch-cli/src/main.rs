//! vouch CLI — interactive approval-gated agent REPL.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vouch::provider::openai::OPENAI_API_BASE_URL;
use vouch::provider::OpenAiProvider;
use vouch_cli::{ChatBot, ChatBotConfig};

/// Interactive agent with a human approval gate on sensitive tools.
#[derive(Parser, Debug)]
#[command(name = "vouch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model name.
    #[arg(short, long, env = "VOUCH_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Chat-completions base URL (compatible gateways work too).
    #[arg(long, env = "OPENAI_BASE_URL", default_value = OPENAI_API_BASE_URL)]
    base_url: String,

    /// API key for the provider.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Session id (conversations persist per id across restarts).
    #[arg(short, long, default_value = "default")]
    session: String,

    /// Directory for persisted session state.
    #[arg(long, default_value = ".vouch/sessions")]
    state_dir: PathBuf,

    /// Workspace directory the file-write tool is confined to.
    #[arg(long, default_value = ".vouch/workspace")]
    workspace: PathBuf,

    /// Maximum reasoning turns per request.
    #[arg(long, default_value_t = 10)]
    max_turns: usize,

    /// Approve every gated action without prompting.
    #[arg(long)]
    auto_approve: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "vouch=debug" } else { "vouch=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let provider =
        Arc::new(OpenAiProvider::new(args.api_key, args.model).with_base_url(args.base_url));

    let config = ChatBotConfig {
        session_id: args.session,
        state_dir: args.state_dir,
        workspace: args.workspace,
        max_turns: args.max_turns,
        auto_approve: args.auto_approve,
    };

    let bot = ChatBot::new(provider, config)?;
    bot.run().await
}
