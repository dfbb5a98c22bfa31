//! `linkward watch` command.

use std::fmt::Write as _;

use crate::context::ServiceContext;
use crate::error::Result;
use crate::model::{ArchivalPolicy, ArchivedFormat, Link};
use crate::readiness::{format_available, is_ready};
use crate::view::{LinkView, Mode};

/// Execute the `watch` command.
///
/// Prints a status block for every polled snapshot until the link is
/// ready or polling gives up.
///
/// # Errors
///
/// Returns an error if the initial fetch fails.
pub async fn run(ctx: &ServiceContext, id: i64) -> Result<()> {
    let mut view = LinkView::open(ctx, id, Mode::View).await?;
    print!("{}", header(ctx, view.displayed()));
    while let Some(link) = view.next_snapshot().await {
        print!("{}", render(&link, &view.policy()));
    }

    if view.is_ready() {
        println!("Link {id} is ready.");
    } else {
        println!("Stopped polling before link {id} was ready.");
    }
    view.unmount();
    Ok(())
}

fn header(ctx: &ServiceContext, link: &Link) -> String {
    let collection = ctx
        .directory
        .collection(link.collection_id)
        .map_or_else(|| format!("#{}", link.collection_id), |c| c.name);
    let tags: Vec<String> = link
        .tag_ids
        .iter()
        .map(|id| ctx.directory.tag(*id).map_or_else(|| format!("#{id}"), |t| t.name))
        .collect();
    let mut out = format!("Collection: {collection}\n");
    if !tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", tags.join(", "));
    }
    out
}

/// One status block for a snapshot.
fn render(link: &Link, policy: &ArchivalPolicy) -> String {
    let mut out = format!("Link {}: {}\n", link.id, link.name);
    let required = [
        (ArchivedFormat::Image, policy.archive_as_screenshot),
        (ArchivedFormat::Monolith, policy.archive_as_monolith),
        (ArchivedFormat::Pdf, policy.archive_as_pdf),
        (ArchivedFormat::Readable, true),
        (ArchivedFormat::Preview, false),
    ];
    for (format, mandatory) in required {
        let marker = if mandatory { "*" } else { " " };
        let _ = writeln!(out, "  {marker}{:<9} {}", label(format), status(link, format));
    }
    let _ = writeln!(out, "  ready: {}", if is_ready(link, policy) { "yes" } else { "no" });
    out
}

fn label(format: ArchivedFormat) -> &'static str {
    match format {
        ArchivedFormat::Pdf => "pdf",
        ArchivedFormat::Monolith => "monolith",
        ArchivedFormat::Image => "image",
        ArchivedFormat::Preview => "preview",
        ArchivedFormat::Readable => "readable",
    }
}

fn status(link: &Link, format: ArchivedFormat) -> &'static str {
    match link.format(format) {
        _ if format_available(link, format) => "available",
        Some(value) if !value.is_empty() => "unavailable",
        _ => "pending",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::adapters::memory::MemoryNotifier;
    use crate::adapters::replaying::testing::replayer;
    use crate::adapters::replaying::ReplayingLinkApi;
    use crate::cassette::config::CassetteConfig;
    use crate::model::fixtures::sample_link;
    use crate::model::{Tag, UNAVAILABLE};

    #[test]
    fn render_marks_required_formats() {
        let mut link = sample_link();
        link.image = Some(UNAVAILABLE.into());
        let policy = ArchivalPolicy { archive_as_pdf: true, ..ArchivalPolicy::default() };

        let out = render(&link, &policy);

        assert!(out.starts_with("Link 1: A\n"));
        assert!(out.contains("*pdf       pending"));
        assert!(out.contains(" image     unavailable"));
        assert!(out.contains("*readable  available"));
        assert!(out.ends_with("ready: no\n"));
    }

    #[test]
    fn header_resolves_names_through_directory() {
        let ctx = ServiceContext::replaying_from(
            &CassetteConfig::default(),
            Arc::new(MemoryNotifier::new()),
        )
        .unwrap();
        ctx.directory.upsert_tag(Tag { id: 3, name: "rust".into() });
        let mut link = sample_link();
        link.tag_ids = vec![3, 9];

        assert_eq!(header(&ctx, &link), "Collection: #10\nTags: rust, #9\n");
    }

    #[tokio::test]
    async fn watch_returns_once_ready() {
        let replayer = replayer(&[
            ("links", "fetch_link", json!({"Ok": sample_link()})),
            ("links", "fetch_link", json!({"Ok": sample_link()})),
        ]);
        let mut ctx = ServiceContext::replaying_from(
            &CassetteConfig::default(),
            Arc::new(MemoryNotifier::new()),
        )
        .unwrap();
        ctx.links = Arc::new(ReplayingLinkApi::new(Arc::clone(&replayer)));

        run(&ctx, 1).await.unwrap();
        assert_eq!(replayer.lock().unwrap().remaining("links", "fetch_link"), 0);
    }
}
