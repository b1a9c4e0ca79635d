//! Runtime configuration resolved from command-line flags and the
//! environment.
//!
//! Every setting has a flag and an environment fallback:
//! - `--data` / `SOCIALTRACK_DATA`: DOT file describing the network
//! - `--endpoints` / `SOCIALTRACK_ENDPOINTS`: `auto-create` (default) or
//!   `reject`, the policy for edges naming undeclared users
//! - `RUST_LOG`: tracing filter, `warn` when unset

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use socialtrack_core::EndpointPolicy;
use tracing_subscriber::EnvFilter;

/// Default tracing filter when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Endpoint policy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointArg {
    AutoCreate,
    Reject,
}

impl From<EndpointArg> for EndpointPolicy {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::AutoCreate => EndpointPolicy::AutoCreate,
            EndpointArg::Reject => EndpointPolicy::Reject,
        }
    }
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// DOT file describing the social network.
    #[arg(short, long, global = true, env = "SOCIALTRACK_DATA")]
    pub data: Option<PathBuf>,

    /// How edges naming undeclared users are handled.
    #[arg(long, global = true, env = "SOCIALTRACK_ENDPOINTS", value_enum, default_value_t = EndpointArg::AutoCreate)]
    pub endpoints: EndpointArg,
}

/// Resolved settings handed to the subcommands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data: Option<PathBuf>,
    pub endpoints: EndpointPolicy,
}

impl From<GlobalArgs> for Config {
    fn from(args: GlobalArgs) -> Self {
        Config {
            data: args.data,
            endpoints: args.endpoints.into(),
        }
    }
}

/// Installs the stderr tracing subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
