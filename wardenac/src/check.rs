use std::collections::{
    HashMap,
    HashSet,
};
use tokio_util::sync::CancellationToken;
use wardencore::{
    assignment::traits::AssignmentBackend as _,
    item::{
        Item,
        traits::ItemBackend as _,
    },
    params::Params,
    platform::RbacPlatform,
};
use wardenrule::{
    error::Error as RuleError,
    RuleRegistry,
};

use crate::{
    error::Error,
    graph::{
        guarded,
        Hierarchy,
    },
    platform::{
        MissingRule,
        PathPolicy,
    },
};

/// The state of a single authorization query.
///
/// Whether an item admits passage depends only on the item, the user
/// and the parameters, never on the path taken to reach it, so verdicts
/// are memoized and each item is entered at most once per check.  Only
/// items from which the target can be reached are entered at all, so a
/// rule on a branch leading elsewhere is never evaluated.
pub(crate) struct Check<'a> {
    platform: &'a dyn RbacPlatform,
    rules: &'a RuleRegistry,
    path_policy: PathPolicy,
    missing_rule: MissingRule,
    cancel: &'a CancellationToken,
    user_id: &'a str,
    params: &'a Params,
    hierarchy: Hierarchy<'a>,
    items: HashMap<String, Option<Item>>,
    verdicts: HashMap<String, bool>,
    // first rule fault encountered; reported only if no path grants
    fault: Option<Error>,
}

impl<'a> Check<'a> {
    pub(crate) fn new(
        platform: &'a dyn RbacPlatform,
        rules: &'a RuleRegistry,
        path_policy: PathPolicy,
        missing_rule: MissingRule,
        cancel: &'a CancellationToken,
        user_id: &'a str,
        params: &'a Params,
    ) -> Self {
        Self {
            platform,
            rules,
            path_policy,
            missing_rule,
            cancel,
            user_id,
            params,
            hierarchy: Hierarchy::new(platform, cancel),
            items: HashMap::new(),
            verdicts: HashMap::new(),
            fault: None,
        }
    }

    async fn item(&mut self, name: &str) -> Result<Option<Item>, Error> {
        if let Some(item) = self.items.get(name) {
            return Ok(item.clone());
        }
        let item = guarded(self.cancel, self.platform.get_item(name)).await?;
        self.items.insert(name.to_string(), item.clone());
        Ok(item)
    }

    fn evaluate(&mut self, rule: &str, item: &Item) -> bool {
        match self.rules.evaluate(rule, self.user_id, item, self.params) {
            Ok(result) => {
                log::trace!("rule {rule} on {item} for user {} yielded {result}", self.user_id);
                result
            }
            Err(RuleError::NotFound(_)) if self.missing_rule == MissingRule::Deny => {
                log::debug!("rule {rule} on {item} is not registered; denying passage");
                false
            }
            Err(e) => {
                log::warn!("abandoning path through {item} for user {}: {e}", self.user_id);
                self.fault.get_or_insert(e.into());
                false
            }
        }
    }

    async fn admits(&mut self, name: &str, target: &str) -> Result<bool, Error> {
        if let Some(verdict) = self.verdicts.get(name) {
            return Ok(*verdict);
        }
        let verdict = match self.item(name).await? {
            None => {
                log::warn!("hierarchy references missing item {name}");
                false
            }
            Some(item) => match (&item.rule, self.path_policy) {
                (None, _) => true,
                (Some(_), PathPolicy::TargetOnly) if name != target => true,
                (Some(rule), _) => self.evaluate(rule, &item),
            },
        };
        self.verdicts.insert(name.to_string(), verdict);
        Ok(verdict)
    }

    pub(crate) async fn run(mut self, target: &str) -> Result<bool, Error> {
        if self.item(target).await?.is_none() {
            return Err(Error::UnknownItem(target.to_string()));
        }
        let roles = guarded(
            self.cancel,
            self.platform.list_roles_for_user(self.user_id),
        ).await?;
        if roles.is_empty() {
            log::debug!("user {} holds no roles; {target} denied", self.user_id);
            return Ok(false);
        }

        let mut relevant = self.hierarchy.ancestors(target).await?
            .into_iter()
            .collect::<HashSet<_>>();
        relevant.insert(target.to_string());

        let mut visited = HashSet::new();
        for role in roles.into_iter() {
            let mut stack = vec![role];
            while let Some(node) = stack.pop() {
                if self.cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                if !relevant.contains(&node) || !visited.insert(node.clone()) {
                    continue;
                }
                if !self.admits(&node, target).await? {
                    continue;
                }
                if node == target {
                    if let Some(fault) = &self.fault {
                        log::warn!(
                            "{target} granted to user {} despite a faulted path: {fault}",
                            self.user_id,
                        );
                    }
                    log::debug!("{target} granted to user {}", self.user_id);
                    return Ok(true);
                }
                stack.extend(self.hierarchy.children(&node).await?.iter().rev().cloned());
            }
        }

        match self.fault {
            Some(fault) => Err(fault),
            None => {
                log::debug!("{target} denied to user {}", self.user_id);
                Ok(false)
            }
        }
    }
}
