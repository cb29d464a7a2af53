//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Business Economics tutor chat relay.
#[derive(Debug, Parser)]
#[command(name = "econtutor")]
#[command(about = "Relay tutor chats to Groq, as a server or as serverless functions")]
#[command(version)]
pub struct Cli {
    /// Override the model for this invocation (defaults to GROQ_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use econtutor_functions::Function;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_port_flag() {
        let cli = Cli::parse_from(["econtutor", "serve", "--port", "9100"]);
        assert!(matches!(cli.command, Commands::Serve { port: 9100 }));
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "econtutor",
            "--verbose",
            "--model",
            "llama-3.1-8b-instant",
            "invoke",
            "chat-stream",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert!(matches!(
            cli.command,
            Commands::Invoke {
                function: Function::ChatStream,
                event: None
            }
        ));
    }

    #[test]
    fn test_unknown_function_is_rejected() {
        assert!(Cli::try_parse_from(["econtutor", "invoke", "nope"]).is_err());
    }
}
