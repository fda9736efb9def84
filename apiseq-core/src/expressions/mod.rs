mod path;
mod template;

pub use path::{extract, PathError, ValuePath};
pub use template::{parse_template, Placeholder, PlaceholderKind, Segment, Template};
