//! `linkward delete-account` command.

use crate::account::{delete_account, AccountDeletion};
use crate::context::ServiceContext;
use crate::error::Result;

/// Execute the `delete-account` command.
///
/// # Errors
///
/// Returns an error if the password is missing or the server refuses.
pub async fn run(
    ctx: &ServiceContext,
    user_id: i64,
    password: &str,
    comment: Option<String>,
    feedback: Option<String>,
) -> Result<()> {
    match delete_account(ctx, user_id, password, comment, feedback).await? {
        AccountDeletion::SignedOut => {
            println!("Account {user_id} deleted. Discard your API token.");
        }
    }
    Ok(())
}
