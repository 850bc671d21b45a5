use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use migratify::{
    cli::{self, ManualSection, ServiceRole},
    config, error,
};

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
    /// Authorize with Deezer (source) or Spotify (destination)
    Auth(AuthOptions),

    /// Read the Deezer favourites and playlists
    Enumerate,

    /// Search Spotify for every enumerated entity
    Search,

    /// Match search results and build the work set
    Resolve,

    /// Follow, save and fill playlists on Spotify
    Apply,

    /// List items that need manual review
    Manual(ManualOptions),

    /// Show pipeline progress
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    #[clap(value_enum)]
    service: ServiceRole,

    /// Discard the cached token and run the consent flow again
    #[clap(long)]
    force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ManualOptions {
    #[clap(value_enum)]
    section: ManualSection,

    /// Only show the unresolved tracks of this playlist
    #[clap(long)]
    name: Option<String>,
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

    let result = match cli.command {
        Command::Auth(opt) => cli::auth(opt.service, opt.force).await,
        Command::Enumerate => cli::enumerate().await,
        Command::Search => cli::search().await,
        Command::Resolve => cli::resolve().await,
        Command::Apply => cli::apply().await,
        Command::Manual(opt) => cli::manual(opt.section, opt.name).await,
        Command::Status => cli::status().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
