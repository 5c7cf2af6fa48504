use serde::{Deserialize, Serialize};

/// The persisted side of a rule - only its name, as the predicate
/// itself lives in the local registry.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct RuleEntry {
    pub name: String,
}

impl From<&str> for RuleEntry {
    fn from(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl From<String> for RuleEntry {
    fn from(name: String) -> Self {
        Self { name }
    }
}

pub mod traits;
