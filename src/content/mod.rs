//! Content loading helpers: front matter, entries, reports.
//!
//! | Module        | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | `frontmatter` | Split YAML/TOML front matter from the body     |
//! | `entry`       | `CollectionRegistry::load_entry`               |
//! | `report`      | Aggregate outcomes over many entries           |

mod entry;
mod frontmatter;
mod report;

pub use entry::{ContentEntry, entry_id};
pub use frontmatter::{FrontmatterFormat, extract_frontmatter, parse_data};
pub use report::{ReportedError, ValidationReport};
