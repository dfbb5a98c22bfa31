//! Artifact readiness evaluation.
//!
//! A link is ready once every format its collection mandates has been
//! processed, and the readability extraction (always required) is done.
//! A field holding [`UNAVAILABLE`] counts as processed: the archiver
//! finished with it even though it produced nothing.

use crate::model::{ArchivalPolicy, ArchivedFormat, Link, UNAVAILABLE};

/// Returns `true` when all formats required by `policy` are processed.
#[must_use]
pub fn is_ready(link: &Link, policy: &ArchivalPolicy) -> bool {
    let gated = [
        (policy.archive_as_screenshot, ArchivedFormat::Image),
        (policy.archive_as_monolith, ArchivedFormat::Monolith),
        (policy.archive_as_pdf, ArchivedFormat::Pdf),
    ];

    gated.iter().all(|&(mandatory, format)| !mandatory || processed(link, format))
        && processed(link, ArchivedFormat::Readable)
}

/// Whether a format was produced and can be displayed.
#[must_use]
pub fn format_available(link: &Link, format: ArchivedFormat) -> bool {
    link.format(format).is_some_and(|value| !value.is_empty() && value != UNAVAILABLE)
}

/// Whether any viewable format exists; drives the two-pane layout.
#[must_use]
pub fn at_least_one_format_available(link: &Link) -> bool {
    [ArchivedFormat::Monolith, ArchivedFormat::Image, ArchivedFormat::Pdf, ArchivedFormat::Readable]
        .into_iter()
        .any(|format| format_available(link, format))
}

fn processed(link: &Link, format: ArchivedFormat) -> bool {
    link.format(format).is_some_and(|value| !value.is_empty())
}
