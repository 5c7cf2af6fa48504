//! Bulk form of the complete persisted state, for loading a hierarchy
//! in one go or dumping it back out.

use serde::{Deserialize, Serialize};
use crate::{
    assignment::Assignment,
    item::{
        Item,
        ItemChild,
    },
    rule::RuleEntry,
};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub item_children: Vec<ItemChild>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}
