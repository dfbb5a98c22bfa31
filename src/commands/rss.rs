//! `linkward rss-delete` command.

use crate::context::ServiceContext;
use crate::error::Result;
use crate::rss::delete_subscription;

/// Execute the `rss-delete` command.
///
/// # Errors
///
/// Returns an error if the server refuses the deletion.
pub async fn run(ctx: &ServiceContext, id: i64) -> Result<()> {
    delete_subscription(ctx, id).await?;
    Ok(())
}
