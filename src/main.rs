//! passcheck - Entry Point
//!
//! Interactive menu over the credential store.

use log::{error, info, warn};
use std::io;

use passcheck::error::handlers::{handle_error, user_message};
use passcheck::menu::{self, prompt::TerminalPrompt};
use passcheck::{CredentialStore, StoreConfig};

fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    passcheck::utils::logging::setup_logging();

    let config = match StoreConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Using user table {} ({:?} policy)",
        config.users_file, config.policy
    );

    let store = CredentialStore::new(config.users_file_path(), config.policy);
    if let Err(e) = store.initialize() {
        handle_error(&e);
        println!("{}", user_message(&e));
    }

    let mut prompt = TerminalPrompt;
    match menu::run(&store, &mut prompt) {
        Ok(()) => info!("Session finished"),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
            println!("\nProgram interrupted by user");
        }
        Err(e) => warn!("Input error: {}", e),
    }
}
