//! Inline references between notes: parsing, resolution, backlinks

mod backlinks;
mod parser;

pub use backlinks::{find_backlinks, forward_links};
pub use parser::{
    LinkTarget, Reference, References, ResolvedReference, Segment, TitleLookup, link_titles,
    references, resolve_references, segments,
};
