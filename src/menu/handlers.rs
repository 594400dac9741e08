//! Menu handlers
//!
//! Each handler calls one store operation and turns its outcome into a
//! [`MenuResult`]. Handlers never validate or hash anything themselves.

use log::info;

use crate::error::handlers::{handle_error, user_message};
use crate::error::{ErrorKind, StoreError};
use crate::menu::commands::{MenuChoice, MenuResult, MenuStatus, parse_choice};
use crate::menu::prompt::Prompt;
use crate::menu::responses;
use crate::store::CredentialStore;

/// Dispatches a menu choice to its handler, collecting input from `prompt`.
pub fn handle_choice(
    store: &CredentialStore,
    choice: MenuChoice,
    prompt: &mut dyn Prompt,
) -> dialoguer::Result<MenuResult> {
    let result = match choice {
        MenuChoice::Register => {
            let (username, password) = prompt.new_credentials(store.policy())?;
            handle_register(store, &username, &password)
        }
        MenuChoice::Login => {
            let (username, password) = prompt.login()?;
            handle_login(store, &username, &password)
        }
        MenuChoice::ListUsers => handle_list(store),
        MenuChoice::Exit => MenuResult {
            status: MenuStatus::Exit,
            message: Some(responses::GOODBYE.into()),
        },
        MenuChoice::Unknown => {
            MenuResult::failure("Unknown menu choice", responses::INVALID_CHOICE)
        }
    };
    Ok(result)
}

/// Handles registration: the username is trimmed, the password is passed as typed.
pub fn handle_register(store: &CredentialStore, username: &str, password: &str) -> MenuResult {
    match store.register(username.trim(), password) {
        Ok(account) => {
            info!("Registered user {}", account.username);
            MenuResult::success(format!(
                "User '{}' registered successfully!",
                account.username
            ))
        }
        Err(e) => {
            let message = match e.kind() {
                ErrorKind::InvalidUsername => format!(
                    "{} Use {}.",
                    user_message(&e),
                    store.policy().username_hint()
                ),
                ErrorKind::WeakPassword => format!(
                    "{} Need {}.",
                    user_message(&e),
                    store.policy().password_hint()
                ),
                _ => user_message(&e),
            };
            failure(&e, message)
        }
    }
}

/// Handles a login attempt and reports the recorded login time.
pub fn handle_login(store: &CredentialStore, username: &str, password: &str) -> MenuResult {
    match store.authenticate(username.trim(), password) {
        Ok(account) => {
            info!("User {} logged in", account.username);
            MenuResult::success(format!(
                "Welcome back, {}!\nLast login updated: {}",
                account.username, account.last_login
            ))
        }
        Err(e) => failure(&e, user_message(&e)),
    }
}

/// Handles the account listing.
pub fn handle_list(store: &CredentialStore) -> MenuResult {
    match store.list() {
        Ok(accounts) => MenuResult::success(responses::format_account_table(&accounts)),
        Err(e) => failure(&e, user_message(&e)),
    }
}

fn failure(err: &StoreError, message: String) -> MenuResult {
    handle_error(err);
    MenuResult::failure(err.to_string(), message)
}

/// Runs the menu until the exit choice is made or input fails.
pub fn run(store: &CredentialStore, prompt: &mut dyn Prompt) -> dialoguer::Result<()> {
    prompt.show(responses::BANNER);

    loop {
        prompt.show(responses::MENU);
        let choice = parse_choice(&prompt.choice()?);
        let result = handle_choice(store, choice, prompt)?;

        if let Some(message) = &result.message {
            prompt.show(message);
        }
        if result.status == MenuStatus::Exit {
            return Ok(());
        }
    }
}
