//! Menu output
//!
//! Fixed texts and the account listing layout.

use crate::store::AccountSummary;

pub const BANNER: &str = "USERNAME PASSWORD CHECKER SYSTEM";
pub const MENU: &str = "MAIN MENU\n1. Register New User\n2. Login\n3. View All Users (Admin)\n4. Exit";
pub const GOODBYE: &str = "Thank you for using the system!";
pub const INVALID_CHOICE: &str = "Invalid choice! Please select 1-4.";
pub const NO_USERS: &str = "No users registered!";

/// Render the account listing: one row per account followed by the total.
pub fn format_account_table(accounts: &[AccountSummary]) -> String {
    if accounts.is_empty() {
        return NO_USERS.to_string();
    }

    let mut out = format!("{:<15} {:<20} {:<20}\n", "Username", "Created", "Last Login");
    out.push_str(&"=".repeat(55));
    out.push('\n');

    for account in accounts {
        out.push_str(&format!(
            "{:<15} {:<20} {:<20}\n",
            account.username,
            account.created_at.format(crate::store::TIMESTAMP_FORMAT).to_string(),
            account.last_login.to_string()
        ));
    }

    out.push_str(&format!("\nTotal Users: {}", accounts.len()));
    out
}
