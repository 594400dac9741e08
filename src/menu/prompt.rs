//! Terminal input
//!
//! The [`Prompt`] trait is what the menu loop reads from; [`TerminalPrompt`]
//! implements it with `dialoguer`, masking password input.

use dialoguer::{Input, Password};

use crate::auth::Policy;

/// Source of menu input and sink of menu output.
pub trait Prompt {
    /// Raw text typed at the main menu.
    fn choice(&mut self) -> dialoguer::Result<String>;

    /// Username and confirmed password for a new account.
    fn new_credentials(&mut self, policy: Policy) -> dialoguer::Result<(String, String)>;

    /// Username and password for a login attempt.
    fn login(&mut self) -> dialoguer::Result<(String, String)>;

    fn show(&mut self, text: &str);
}

/// Interactive prompt on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn choice(&mut self) -> dialoguer::Result<String> {
        Input::<String>::new()
            .with_prompt("Enter choice (1-4)")
            .allow_empty(true)
            .interact_text()
    }

    fn new_credentials(&mut self, policy: Policy) -> dialoguer::Result<(String, String)> {
        let username = Input::<String>::new()
            .with_prompt(format!("Enter username ({})", policy.username_hint()))
            .allow_empty(true)
            .interact_text()?;
        let password = Password::new()
            .with_prompt(format!("Enter password ({})", policy.password_hint()))
            .with_confirmation("Confirm password", "Passwords don't match!")
            .allow_empty_password(true)
            .interact()?;
        Ok((username, password))
    }

    fn login(&mut self) -> dialoguer::Result<(String, String)> {
        let username = Input::<String>::new()
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?;
        let password = Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?;
        Ok((username, password))
    }

    fn show(&mut self, text: &str) {
        println!("{}", text);
    }
}
