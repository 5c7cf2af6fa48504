use serde::{Deserialize, Serialize};

/// Whether an item is a role or a permission.  Both share a single
/// namespace, so a role and a permission can never have the same name.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Role,
    Permission,
}

/// A node in the hierarchy.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Name of the rule gating this item; resolved against the rule
    /// registry at check time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A directed edge; `parent` grants everything `child` grants.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct ItemChild {
    pub parent: String,
    pub child: String,
}

mod impls;
pub mod traits;
