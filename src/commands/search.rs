//! `linkward search` command.

use std::fmt::Write as _;

use crate::context::ServiceContext;
use crate::error::Result;
use crate::model::Link;
use crate::ports::LinkSort;
use crate::store::Directory;

/// Execute the `search` command.
///
/// # Errors
///
/// Returns an error if the server refuses the search.
pub async fn run(ctx: &ServiceContext, query: &str, sort: LinkSort) -> Result<()> {
    let links = ctx.links.search_links(query, sort).await?;
    print!("{}", render(&ctx.directory, &links));
    Ok(())
}

/// One line per hit: id, name, collection, and URL when there is one.
fn render(directory: &Directory, links: &[Link]) -> String {
    if links.is_empty() {
        return "Nothing found.\n".to_string();
    }
    let mut out = String::new();
    for link in links {
        let collection = directory
            .collection(link.collection_id)
            .map_or_else(|| format!("#{}", link.collection_id), |c| c.name);
        let _ = write!(out, "{:>6}  {}  [{collection}]", link.id, link.name);
        if let Some(url) = &link.url {
            let _ = write!(out, "  {url}");
        }
        out.push('\n');
    }
    out
}
