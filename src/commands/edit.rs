//! `linkward edit` command.

use crate::cli::EditArgs;
use crate::context::ServiceContext;
use crate::draft::{LinkPatch, SubmitOutcome};
use crate::error::Result;
use crate::store::Directory;
use crate::view::{LinkView, Mode};

/// Execute the `edit` command.
///
/// # Errors
///
/// Returns an error if the link cannot be fetched or the update is rejected.
pub async fn run(ctx: &ServiceContext, args: &EditArgs) -> Result<()> {
    let mut view = LinkView::open(ctx, args.id, Mode::Edit).await?;
    view.update_field(patch(args, &ctx.directory));

    let outcome = view.submit().await;
    view.unmount();
    match outcome? {
        SubmitOutcome::Unchanged(_) => println!("No changes to link {}.", args.id),
        SubmitOutcome::Updated(link) => println!("Link {}: {}", link.id, link.name),
    }
    Ok(())
}

/// Builds the patch for the given flags. Tag names the directory knows
/// become ids; the rest are created on submit.
fn patch(args: &EditArgs, directory: &Directory) -> LinkPatch {
    let mut patch = LinkPatch {
        name: args.name.clone(),
        url: args.url.clone().map(Some),
        description: args.description.clone(),
        collection_id: args.collection,
        ..LinkPatch::default()
    };
    if !args.tags.is_empty() {
        let mut tag_ids = Vec::new();
        let mut new_tags = Vec::new();
        for name in &args.tags {
            match directory.tag_by_name(name) {
                Some(tag) if !tag_ids.contains(&tag.id) => tag_ids.push(tag.id),
                Some(_) => {}
                None if !new_tags.contains(name) => new_tags.push(name.clone()),
                None => {}
            }
        }
        patch.tag_ids = Some(tag_ids);
        patch.new_tags = Some(new_tags);
    }
    patch
}
