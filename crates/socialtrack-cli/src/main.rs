//! SocialTrack command-line tool.
//!
//! Provides the `socialtrack` binary for exploring a friendship network
//! described in a DOT file:
//! - `stats` prints user, friendship and average-friend counts
//! - `connect` prints the closest connection between two users
//! - `menu` starts the interactive text menu
//!
//! Exit codes: 0 = success, 1 = no connection or bad argument,
//! 2 = unknown user, 3 = data file could not be loaded.

mod config;
mod menu;

use std::io::{self, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;

use socialtrack_core::CoreError;
use socialtrack_network::SocialNetwork;

use crate::config::{Config, GlobalArgs};
use crate::menu::Menu;

/// Shortest connections in a social network.
#[derive(Parser)]
#[command(name = "socialtrack", about = "Shortest connections in a social network")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print dataset statistics.
    Stats {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Find the closest connection between two users.
    Connect {
        /// User the connection starts from.
        from: String,

        /// User the connection ends at.
        to: String,

        /// Print the path result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive menu.
    Menu,
}

fn main() {
    config::init_logging();
    let cli = Cli::parse();
    let config = Config::from(cli.global);

    let mut out = io::stdout();
    let mut err = io::stderr();
    let result = match cli.command {
        Commands::Stats { json } => run_stats(&config, json, &mut out, &mut err),
        Commands::Connect { from, to, json } => run_connect(&config, &from, &to, json, &mut out, &mut err),
        Commands::Menu => run_menu(&config, &mut err),
    };
    let exit_code = result.unwrap_or_else(|e| {
        eprintln!("I/O error: {}", e);
        3
    });
    process::exit(exit_code);
}

/// Loads the configured data file. On failure the reason is written to
/// `err` and the load-error exit code is returned.
fn load_network(config: &Config, err: &mut impl Write) -> io::Result<Result<SocialNetwork, i32>> {
    let Some(path) = &config.data else {
        writeln!(err, "Error: no data file given (use --data or SOCIALTRACK_DATA)")?;
        return Ok(Err(3));
    };
    let mut network = SocialNetwork::with_policy(config.endpoints);
    match network.load_dot_file(path) {
        Ok(_) => Ok(Ok(network)),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to load data file");
            writeln!(err, "Error: {}", e)?;
            Ok(Err(3))
        }
    }
}

/// Execute the stats subcommand.
fn run_stats(config: &Config, json: bool, out: &mut impl Write, err: &mut impl Write) -> io::Result<i32> {
    let network = match load_network(config, err)? {
        Ok(n) => n,
        Err(code) => return Ok(code),
    };
    let stats = network.stats();
    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", stats)?;
    }
    Ok(0)
}

/// Execute the connect subcommand.
fn run_connect(
    config: &Config,
    from: &str,
    to: &str,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<i32> {
    let network = match load_network(config, err)? {
        Ok(n) => n,
        Err(code) => return Ok(code),
    };

    match network.closest_connection(from, to) {
        Ok(result) if json => {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
            Ok(0)
        }
        Ok(result) => {
            let count = result.intermediary_count();
            writeln!(
                out,
                "Closest connection: {} (cost {}, {} {})",
                result.path().join(" -> "),
                result.cost(),
                count,
                if count == 1 { "intermediary" } else { "intermediaries" }
            )?;
            Ok(0)
        }
        Err(CoreError::NotFound { .. }) => {
            for user in [from, to] {
                if !network.contains_user(user) {
                    writeln!(err, "Error: {} is not in the dataset", user)?;
                }
            }
            Ok(2)
        }
        Err(CoreError::NoPath { .. }) => {
            writeln!(err, "No connection found between {} and {}", from, to)?;
            Ok(1)
        }
        Err(e) => {
            writeln!(err, "Error: {}", e)?;
            Ok(1)
        }
    }
}

/// Execute the menu subcommand, preloading the data file if one is set.
fn run_menu(config: &Config, err: &mut impl Write) -> io::Result<i32> {
    let network = if config.data.is_some() {
        match load_network(config, err)? {
            Ok(n) => n,
            Err(code) => return Ok(code),
        }
    } else {
        SocialNetwork::with_policy(config.endpoints)
    };

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout(), network);
    menu.run()?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use socialtrack_core::EndpointPolicy;
    use tempfile::NamedTempFile;

    use super::*;

    const NETWORK: &str = "graph {\n  ann -- bo;\n  bo -- cy;\n  cy -- dee [weight=2];\n  \"eve\";\n}\n";

    fn dot_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".dot").tempfile().unwrap();
        file.write_all(NETWORK.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn config_for(path: Option<&Path>) -> Config {
        Config {
            data: path.map(Path::to_path_buf),
            endpoints: EndpointPolicy::AutoCreate,
        }
    }

    fn connect(config: &Config, from: &str, to: &str, json: bool) -> (i32, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_connect(config, from, to, json, &mut out, &mut err).unwrap();
        (code, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn connect_prints_path_with_plural_intermediaries() {
        let file = dot_file();
        let (code, out, err) = connect(&config_for(Some(file.path())), "ann", "dee", false);
        assert_eq!(code, 0);
        assert_eq!(out, "Closest connection: ann -> bo -> cy -> dee (cost 4, 2 intermediaries)\n");
        assert!(err.is_empty());

        let (_, out, _) = connect(&config_for(Some(file.path())), "ann", "bo", false);
        assert_eq!(out, "Closest connection: ann -> bo (cost 1, 0 intermediaries)\n");
    }

    #[test]
    fn connect_uses_singular_for_one_intermediary() {
        let file = dot_file();
        let (code, out, _) = connect(&config_for(Some(file.path())), "ann", "cy", false);
        assert_eq!(code, 0);
        assert_eq!(out, "Closest connection: ann -> bo -> cy (cost 2, 1 intermediary)\n");
    }

    #[test]
    fn connect_json_is_the_path_result() {
        let file = dot_file();
        let (code, out, _) = connect(&config_for(Some(file.path())), "ann", "cy", true);
        assert_eq!(code, 0);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!({ "path": ["ann", "bo", "cy"], "cost": 2.0 }));
    }

    #[test]
    fn unknown_users_exit_with_two() {
        let file = dot_file();
        let (code, out, err) = connect(&config_for(Some(file.path())), "zed", "ann", false);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert_eq!(err, "Error: zed is not in the dataset\n");
    }

    #[test]
    fn missing_path_and_blank_names_exit_with_one() {
        let file = dot_file();
        let (code, _, err) = connect(&config_for(Some(file.path())), "ann", "eve", false);
        assert_eq!(code, 1);
        assert_eq!(err, "No connection found between ann and eve\n");

        let (code, _, err) = connect(&config_for(Some(file.path())), "", "eve", false);
        assert_eq!(code, 1);
        assert!(err.contains("invalid argument"));
    }

    #[test]
    fn load_failures_exit_with_three() {
        let (code, _, err) = connect(&config_for(None), "ann", "bo", false);
        assert_eq!(code, 3);
        assert!(err.contains("no data file given"));

        let (code, _, err) = connect(&config_for(Some(Path::new("network.txt"))), "ann", "bo", false);
        assert_eq!(code, 3);
        assert!(err.starts_with("Error: "));

        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(run_stats(&config_for(None), false, &mut out, &mut err).unwrap(), 3);
        assert!(out.is_empty());
    }

    #[test]
    fn stats_prints_text_and_json() {
        let file = dot_file();
        let config = config_for(Some(file.path()));

        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(run_stats(&config, false, &mut out, &mut err).unwrap(), 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Total Users: 5\nTotal Friendships: 3\n"));

        let mut out = Vec::new();
        assert_eq!(run_stats(&config, true, &mut out, &mut err).unwrap(), 0);
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["users"], 5);
        assert_eq!(value["friendships"], 3);
    }
}
