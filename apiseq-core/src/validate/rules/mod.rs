pub(crate) mod common;
pub(crate) mod condition;
pub(crate) mod document;
pub(crate) mod node;
pub(crate) mod validation;
