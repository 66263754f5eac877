// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dormhub - hostel operations portal services.
//!
//! This is the binary entry point for the portal gateway and its
//! companion commands.

mod chat;
mod serve;

use clap::{Parser, Subcommand};

/// Dormhub - hostel operations portal services.
#[derive(Parser, Debug)]
#[command(name = "dormhub", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the portal gateway server.
    Serve,
    /// Print the resolved configuration as TOML.
    Config,
    /// Send one message to the chatbot and print the reply.
    Chat {
        /// The message to send.
        message: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match dormhub_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            dormhub_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("dormhub serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("dormhub config: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Chat { message }) => {
            chat::run_chat(&config, &message).await;
        }
        None => {
            println!("dormhub: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = dormhub_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.portal.name, "dormhub");
    }
}
