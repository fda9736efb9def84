pub mod config;
pub mod nodes;
pub mod progress;
pub mod run;
pub mod validate;
