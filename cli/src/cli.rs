use clap::Parser;
use std::path::PathBuf;

/// Terminal client for the Funland entertainment-center assistant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The question to send to the assistant
    #[arg(index = 1)] // Positional argument
    pub prompt: Option<String>,

    /// Enter interactive chat mode
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Base URL of the assistant backend
    #[arg(long, env = "FUNLAND_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory for the persisted chat and calculator history
    #[arg(long)]
    pub history_dir: Option<PathBuf>,

    /// Start with a cleared chat history
    #[arg(long, default_value_t = false)]
    pub new_chat: bool,

    /// Write the effective configuration to the default config file
    #[arg(long, default_value_t = false)]
    pub save_config: bool,
}
