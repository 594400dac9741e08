//! Interactive menu
//!
//! Prompts, masked password input and outcome formatting. All business rules
//! live in the credential store; this layer only collects input and reports.

pub mod commands;
pub mod handlers;
pub mod prompt;
pub mod responses;

pub use commands::{MenuChoice, MenuResult, MenuStatus, parse_choice};
pub use handlers::{handle_choice, handle_list, handle_login, handle_register, run};
