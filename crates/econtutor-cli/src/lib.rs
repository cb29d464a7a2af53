//! Command-line front end for the econtutor relay.
//!
//! `econtutor serve` runs the persistent streaming server;
//! `econtutor invoke <function>` runs one serverless invocation with an
//! event read from a file or stdin.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;

pub use bootstrap::{init_logging, load_config, load_env, relay_endpoint};
pub use commands::Commands;
pub use parser::Cli;
