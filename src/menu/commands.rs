//! Menu choices
//!
//! Parsing of the main-menu selection and the result type every handler returns.

/// An entry of the main menu.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MenuChoice {
    Register,
    Login,
    ListUsers,
    Exit,
    Unknown,
}

/// Outcome status of a handled menu choice.
#[derive(Debug, PartialEq, Eq)]
pub enum MenuStatus {
    Success,
    Failure(String),
    Exit,
}

/// Full result of a handled menu choice.
#[derive(Debug)]
pub struct MenuResult {
    pub status: MenuStatus,
    pub message: Option<String>,
}

impl MenuResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: MenuStatus::Success,
            message: Some(message.into()),
        }
    }

    pub fn failure(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: MenuStatus::Failure(reason.into()),
            message: Some(message.into()),
        }
    }
}

/// Parses the raw text typed at the menu prompt.
pub fn parse_choice(raw: &str) -> MenuChoice {
    match raw.trim() {
        "1" => MenuChoice::Register,
        "2" => MenuChoice::Login,
        "3" => MenuChoice::ListUsers,
        "4" => MenuChoice::Exit,
        _ => MenuChoice::Unknown,
    }
}
