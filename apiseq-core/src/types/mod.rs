mod common;
mod condition;
mod document;
mod node;
mod validation;

pub use common::{AnyValue, Headers, Variables};
pub use condition::ConditionSpec;
pub use document::{ConfigDocument, DefaultsSpec};
pub use node::NodeSpec;
pub use validation::ValidationSpec;
