//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;
use econtutor_axum::bootstrap::DEFAULT_PORT;
use econtutor_functions::Function;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the persistent server with streaming chat
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Run one serverless function invocation and print the response JSON
    Invoke {
        /// Function to invoke: chat, chat-stream or health
        function: Function,
        /// Read the event JSON from this file instead of stdin
        #[arg(long)]
        event: Option<PathBuf>,
    },

    /// Probe the provider and list the models the credential can reach
    Health,
}
