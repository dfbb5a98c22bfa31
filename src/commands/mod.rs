//! Command dispatch and handlers.

pub mod delete_account;
pub mod edit;
pub mod rss;
pub mod search;
pub mod watch;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;

/// Dispatch a parsed command to its handler.
///
/// When `config.record_dir` is set (`LINKWARDEN_RECORD`), every port
/// interaction is recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error if the context cannot be built or the handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<()> {
    let (ctx, session) = if let Some(root) = &config.record_dir {
        let (ctx, session) = ServiceContext::recording_at(config, root)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(config)?, None)
    };

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let result = runtime.block_on(dispatch_with_context(command, &ctx));

    // Aborted poll tasks still hold adapters until the runtime goes away.
    drop(runtime);
    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<()> {
    match command {
        Command::Watch { id } => watch::run(ctx, *id).await,
        Command::Edit(args) => edit::run(ctx, args).await,
        Command::Search { query, sort } => search::run(ctx, query, *sort).await,
        Command::DeleteAccount { user_id, password, comment, feedback } => {
            delete_account::run(ctx, *user_id, password, comment.clone(), feedback.clone()).await
        }
        Command::RssDelete { id } => rss::run(ctx, *id).await,
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<()> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
