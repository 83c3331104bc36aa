use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporlctx::{cli, config, error, history::ContextKind, types::PkceToken, utils};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Merge recently played tracks into the context history
    Update(UpdateOptions),

    /// List the last played track of every album, artist and playlist
    History(HistoryOptions),

    /// Resume a context at its last played track
    Play(PlayOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateOptions {
    /// Start after this cursor (unix timestamp in milliseconds) instead of the stored one
    #[clap(long)]
    pub after: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryOptions {
    /// Only show one kind of context (album, artist, playlist)
    #[clap(long, value_parser = utils::parse_context_kind)]
    pub kind: Option<ContextKind>,

    /// Search context and track names
    #[clap(long)]
    pub search: Option<String>,

    /// Maximum number of rows
    #[clap(long)]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Context URI (spotify:playlist:...) or open.spotify.com link
    pub context: String,

    /// Update the history before resolving the track
    #[clap(long)]
    pub update: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Update(opt) => cli::update(opt.after).await,
        Command::History(opt) => cli::history(opt.kind, opt.search, opt.limit).await,
        Command::Play(opt) => cli::play(opt.context, opt.update).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
