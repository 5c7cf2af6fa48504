pub mod error;
pub mod registry;
pub mod rule;

pub use registry::RuleRegistry;
pub use rule::Rule;
