use api_key_dashboard::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Generate => cli::key::generate(),
        Command::Validate { key } => cli::session::validate(&key).await,
        Command::Protected => cli::session::protected().await,
        Command::Logout => cli::session::logout().await,
    }
}
