//! Command-line interface
//!
//! - `serve`: HTTP server
//! - `ask`: answer one question and print the JSON response
//! - `classify`: print the route a question would take

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Routes questions to a database, web search, RAG or a local LLM
#[derive(Parser)]
#[command(name = "ask-router")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Answer a single question
    Ask {
        /// The question, e.g. "How many students are enrolled?"
        question: String,
    },

    /// Show which source a question would be routed to
    Classify {
        question: String,
    },
}

/// Loads `.env` and layered configuration, then installs logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["ask-router", "ask", "What is the weather today?"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Ask { ref question } if question == "What is the weather today?"
        ));
    }

    #[test]
    fn test_parse_serve_and_classify() {
        assert!(matches!(
            Cli::try_parse_from(["ask-router", "serve"]).unwrap().command,
            Command::Serve
        ));
        assert!(matches!(
            Cli::try_parse_from(["ask-router", "classify", "crimes in LA"]).unwrap().command,
            Command::Classify { .. }
        ));
    }

    #[test]
    fn test_question_is_required() {
        assert!(Cli::try_parse_from(["ask-router", "ask"]).is_err());
    }
}
