use std::sync::Arc;
use tokio::sync::RwLock;
use wardencore::{
    assignment::Assignment,
    item::ItemChild,
    platform::RbacPlatform,
};
use wardenrule::RuleRegistry;

/// Which rules along a granting path must pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PathPolicy {
    /// Every item on the path that declares a rule, from the assigned
    /// role down to the queried item, must pass its rule.
    #[default]
    AllRuled,
    /// Only the rule of the queried item is evaluated.
    TargetOnly,
}

/// How a check treats an item whose rule has no registered predicate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MissingRule {
    /// The path is abandoned and, unless another path grants access,
    /// the check fails with the `NotFound` rule error.
    #[default]
    Error,
    /// The rule is taken to deny.
    Deny,
}

/// The edges and assignments that go along with the removal of an item.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemovalReport {
    pub item_children: Vec<ItemChild>,
    pub assignments: Vec<Assignment>,
}

impl RemovalReport {
    /// Number of records removed in addition to the item itself.
    pub fn affected(&self) -> usize {
        self.item_children.len() + self.assignments.len()
    }
}

#[derive(Default)]
pub struct Builder {
    platform: Option<Arc<dyn RbacPlatform>>,
    rules: RuleRegistry,
    path_policy: PathPolicy,
    missing_rule: MissingRule,
}

/// The authorization engine.
///
/// Holds no authorization state of its own beyond the registered rule
/// predicates; items, edges and assignments are always read from the
/// platform.  Share it behind an `Arc` to serve concurrent callers.
pub struct Platform {
    platform: Arc<dyn RbacPlatform>,
    rules: RuleRegistry,
    path_policy: PathPolicy,
    missing_rule: MissingRule,
    // writers are the mutations; readers are the checks and queries
    mutation: RwLock<()>,
}

mod impls;
