use ask_router::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Ask { question } => cli::ask::run(&question).await,
        Command::Classify { question } => cli::ask::classify(&question),
    }
}
