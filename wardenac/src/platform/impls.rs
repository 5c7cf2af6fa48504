use std::time::Duration;
use tokio::sync::RwLockReadGuard;
use tokio_util::sync::CancellationToken;
use wardencore::{
    assignment::traits::AssignmentBackend as _,
    item::{
        Item,
        ItemKind,
        traits::{
            ItemBackend as _,
            ItemChildBackend as _,
        },
    },
    params::Params,
    platform::{
        Isolation as _,
        PlatformUrl as _,
    },
    rule::{
        RuleEntry,
        traits::RuleBackend as _,
    },
    snapshot::Snapshot,
};
use wardenrule::Rule;

use crate::{
    check::Check,
    error::Error,
    graph::Hierarchy,
};

use super::*;

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, val: impl RbacPlatform + 'static) -> Self {
        self.platform = Some(Arc::new(val));
        self
    }

    pub fn shared_platform(mut self, val: Arc<dyn RbacPlatform>) -> Self {
        self.platform = Some(val);
        self
    }

    pub fn rule(self, name: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.rules.register(name, rule);
        self
    }

    pub fn rule_registry(mut self, val: RuleRegistry) -> Self {
        self.rules = val;
        self
    }

    pub fn path_policy(mut self, val: PathPolicy) -> Self {
        self.path_policy = val;
        self
    }

    pub fn missing_rule(mut self, val: MissingRule) -> Self {
        self.missing_rule = val;
        self
    }

    pub fn build(self) -> Result<Platform, Error> {
        let platform = self.platform
            .ok_or(Error::Builder("missing required argument platform"))?;
        log::debug!(
            "building platform for {} with {} rule(s), {:?}, {:?}",
            platform.url(),
            self.rules.len(),
            self.path_policy,
            self.missing_rule,
        );
        Ok(Platform {
            platform,
            rules: self.rules,
            path_policy: self.path_policy,
            missing_rule: self.missing_rule,
            mutation: RwLock::new(()),
        })
    }
}

impl Platform {
    pub fn rbac_platform(&self) -> &dyn RbacPlatform {
        self.platform.as_ref()
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn path_policy(&self) -> PathPolicy {
        self.path_policy
    }

    pub fn missing_rule(&self) -> MissingRule {
        self.missing_rule
    }

    // Holds back reads for the duration of any mutation, unless the
    // backend already gives each read a consistent snapshot.
    async fn read_guard(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<RwLockReadGuard<'_, ()>>, Error> {
        if self.platform.snapshot_reads() {
            return Ok(None);
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            guard = self.mutation.read() => Ok(Some(guard)),
        }
    }

    async fn require_item(&self, name: &str) -> Result<Item, Error> {
        self.platform.get_item(name).await?
            .ok_or_else(|| Error::InvalidReference(name.to_string()))
    }
}

// Item management.
impl Platform {
    pub async fn add_item(
        &self,
        name: &str,
        kind: ItemKind,
        rule: Option<&str>,
    ) -> Result<(), Error> {
        let mut item = Item::new(name, kind);
        item.rule = rule.map(str::to_string);
        self.insert_item(item).await
    }

    /// Adds the item as given, including its description.
    pub async fn insert_item(&self, item: Item) -> Result<(), Error> {
        let _guard = self.mutation.write().await;
        if self.platform.get_item(&item.name).await?.is_some() {
            return Err(Error::DuplicateItem(item.name));
        }
        if let Some(rule) = item.rule.as_deref() {
            if !self.rules.contains(rule) {
                log::warn!("{item} references rule {rule} which has no registered predicate");
            }
        }
        self.platform.put_item(&item).await?;
        log::debug!("added {item}");
        Ok(())
    }

    pub async fn get_item(&self, name: &str) -> Result<Option<Item>, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        Ok(self.platform.get_item(name).await?)
    }

    pub async fn list_items(&self, kind: Option<ItemKind>) -> Result<Vec<Item>, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        Ok(match kind {
            Some(kind) => self.platform.list_items_by_kind(kind).await?,
            None => self.platform.list_items().await?,
        })
    }

    async fn removal_report(&self, name: &str) -> Result<RemovalReport, Error> {
        self.require_item(name).await?;
        let item_children = self.platform.list_item_children().await?
            .into_iter()
            .filter(|edge| edge.parent == name || edge.child == name)
            .collect();
        let assignments = self.platform.list_assignments().await?
            .into_iter()
            .filter(|assignment| assignment.role == name)
            .collect();
        Ok(RemovalReport { item_children, assignments })
    }

    /// Reports what `remove_item` would delete along with the item,
    /// without deleting anything.
    pub async fn preview_remove_item(&self, name: &str) -> Result<RemovalReport, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        self.removal_report(name).await
    }

    /// Removes the item together with every edge it takes part in and
    /// every assignment of it.  The returned report lists what was
    /// removed alongside the item.
    ///
    /// Edges go first, then assignments, then the item itself.  Should
    /// the backend fail partway, whatever was deleted before the failure
    /// stays deleted and the item remains; calling this again completes
    /// the removal.
    pub async fn remove_item(&self, name: &str) -> Result<RemovalReport, Error> {
        let _guard = self.mutation.write().await;
        let report = self.removal_report(name).await?;
        if report.affected() > 0 {
            log::warn!(
                "removing item {name} cascades to {} item child(ren) and {} assignment(s)",
                report.item_children.len(),
                report.assignments.len(),
            );
        }
        for edge in report.item_children.iter() {
            self.platform.delete_item_child(&edge.parent, &edge.child).await?;
        }
        for assignment in report.assignments.iter() {
            self.platform.delete_assignment(&assignment.user_id, &assignment.role).await?;
        }
        self.platform.delete_item(name).await?;
        log::debug!("removed item {name}");
        Ok(report)
    }
}

// Hierarchy management.
impl Platform {
    /// Makes `child` granted by `parent`.
    pub async fn add_child(&self, parent: &str, child: &str) -> Result<(), Error> {
        let _guard = self.mutation.write().await;
        self.require_item(parent).await?;
        self.require_item(child).await?;
        if parent == child {
            return Err(Error::CycleDetected(parent.to_string(), child.to_string()));
        }
        if self.platform.list_children(parent).await?
            .iter()
            .any(|name| name == child)
        {
            return Err(Error::DuplicateEdge(parent.to_string(), child.to_string()));
        }
        let cancel = CancellationToken::new();
        if Hierarchy::new(self.rbac_platform(), &cancel)
            .reaches(child, parent)
            .await?
        {
            log::debug!("rejecting {parent} -> {child}: {child} already grants {parent}");
            return Err(Error::CycleDetected(parent.to_string(), child.to_string()));
        }
        self.platform.put_item_child(parent, child).await?;
        log::debug!("added item child {parent} -> {child}");
        Ok(())
    }

    /// Removes the single edge; other paths between the two items are
    /// left intact.
    pub async fn remove_child(&self, parent: &str, child: &str) -> Result<(), Error> {
        let _guard = self.mutation.write().await;
        if !self.platform.delete_item_child(parent, child).await? {
            return Err(Error::EdgeNotFound(parent.to_string(), child.to_string()));
        }
        log::debug!("removed item child {parent} -> {child}");
        Ok(())
    }

    async fn traverse<'a>(
        &'a self,
        name: &str,
        cancel: &'a CancellationToken,
    ) -> Result<Hierarchy<'a>, Error> {
        if self.platform.get_item(name).await?.is_none() {
            return Err(Error::UnknownItem(name.to_string()));
        }
        Ok(Hierarchy::new(self.rbac_platform(), cancel))
    }

    /// The items directly granted by `name`, in insertion order.
    pub async fn children(&self, name: &str) -> Result<Vec<String>, Error> {
        let cancel = CancellationToken::new();
        let _guard = self.read_guard(&cancel).await?;
        Ok(self.traverse(name, &cancel).await?
            .children(name).await?
            .to_vec())
    }

    /// Every item `name` grants, directly or transitively.
    pub async fn descendants(&self, name: &str) -> Result<Vec<String>, Error> {
        let cancel = CancellationToken::new();
        let _guard = self.read_guard(&cancel).await?;
        self.traverse(name, &cancel).await?
            .descendants(name).await
    }

    /// Every item that grants `name`, directly or transitively.
    pub async fn ancestors(&self, name: &str) -> Result<Vec<String>, Error> {
        let cancel = CancellationToken::new();
        let _guard = self.read_guard(&cancel).await?;
        self.traverse(name, &cancel).await?
            .ancestors(name).await
    }
}

// Assignments.
impl Platform {
    /// Assigns the item, usually a role though a permission may be held
    /// directly, to the user.  Returns `false` if the user already held
    /// it, in which case nothing changes.
    pub async fn assign(&self, user_id: &str, role: &str) -> Result<bool, Error> {
        let _guard = self.mutation.write().await;
        let item = self.require_item(role).await?;
        let added = self.platform.put_assignment(user_id, role).await?;
        if added {
            log::debug!("assigned {item} to user {user_id}");
        } else {
            log::debug!("user {user_id} already holds {item}");
        }
        Ok(added)
    }

    pub async fn revoke(&self, user_id: &str, role: &str) -> Result<(), Error> {
        let _guard = self.mutation.write().await;
        self.platform.delete_assignment(user_id, role).await?;
        log::debug!("revoked role {role} from user {user_id}");
        Ok(())
    }

    /// Revokes every role held by the user, returning how many were held.
    pub async fn revoke_all(&self, user_id: &str) -> Result<u64, Error> {
        let _guard = self.mutation.write().await;
        let count = self.platform.delete_assignments_for_user(user_id).await?;
        log::debug!("revoked {count} role(s) from user {user_id}");
        Ok(count)
    }

    pub async fn roles_for_user(&self, user_id: &str) -> Result<Vec<String>, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        Ok(self.platform.list_roles_for_user(user_id).await?)
    }

    pub async fn list_assignments(&self) -> Result<Vec<Assignment>, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        Ok(self.platform.list_assignments().await?)
    }
}

// Rules.
impl Platform {
    /// Registers the predicate locally and records the rule name with
    /// the backend.  Returns `true` if a predicate was replaced.
    pub async fn register_rule(
        &self,
        name: &str,
        rule: impl Rule + 'static,
    ) -> Result<bool, Error> {
        let _guard = self.mutation.write().await;
        self.platform.put_rule(name).await?;
        Ok(self.rules.register(name, rule))
    }

    /// Removes the rule, both the predicate and the stored name.  A rule
    /// still referenced by any item is left in place and `RuleInUse`
    /// names the items.
    pub async fn remove_rule(&self, name: &str) -> Result<bool, Error> {
        let _guard = self.mutation.write().await;
        let users = self.platform.list_items().await?
            .into_iter()
            .filter(|item| item.rule.as_deref() == Some(name))
            .map(|item| item.name)
            .collect::<Vec<_>>();
        if !users.is_empty() {
            return Err(Error::RuleInUse(name.to_string(), users));
        }
        let deleted = self.platform.delete_rule(name).await?;
        let unregistered = self.rules.unregister(name);
        log::debug!("removed rule {name}");
        Ok(unregistered || deleted)
    }

    pub async fn rule_names(&self) -> Result<Vec<String>, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        Ok(self.platform.list_rule_names().await?)
    }

    /// Rule names known to the backend, either stored directly or
    /// referenced by an item, that have no registered predicate.
    pub async fn unregistered_rules(&self) -> Result<Vec<String>, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        let mut result = self.platform.list_rule_names().await?
            .into_iter()
            .chain(self.platform.list_items().await?
                .into_iter()
                .filter_map(|item| item.rule))
            .filter(|name| !self.rules.contains(name))
            .collect::<Vec<_>>();
        result.sort();
        result.dedup();
        Ok(result)
    }
}

// Authorization checks.
impl Platform {
    /// Whether the user is granted the item under the given parameters.
    ///
    /// `Ok(false)` is a denial.  An error means the question could not
    /// be decided, e.g. a rule on every candidate path faulted or the
    /// backend failed mid-check.
    pub async fn can_user(
        &self,
        user_id: &str,
        item: &str,
        params: &Params,
    ) -> Result<bool, Error> {
        self.can_user_with(user_id, item, params, &CancellationToken::new()).await
    }

    /// As [`Platform::can_user`], abandoning the check with
    /// `Error::Cancelled` once the token is cancelled.
    pub async fn can_user_with(
        &self,
        user_id: &str,
        item: &str,
        params: &Params,
        cancel: &CancellationToken,
    ) -> Result<bool, Error> {
        let _guard = self.read_guard(cancel).await?;
        log::trace!("checking {item} for user {user_id}");
        Check::new(
            self.rbac_platform(),
            &self.rules,
            self.path_policy,
            self.missing_rule,
            cancel,
            user_id,
            params,
        ).run(item).await
    }

    /// As [`Platform::can_user`], with `Error::Cancelled` if no decision
    /// is reached within the duration.
    pub async fn can_user_within(
        &self,
        user_id: &str,
        item: &str,
        params: &Params,
        timeout: Duration,
    ) -> Result<bool, Error> {
        let cancel = CancellationToken::new();
        match tokio::time::timeout(
            timeout,
            self.can_user_with(user_id, item, params, &cancel),
        ).await {
            Ok(result) => result,
            Err(_) => {
                cancel.cancel();
                log::warn!("check of {item} for user {user_id} timed out after {timeout:?}");
                Err(Error::Cancelled)
            }
        }
    }
}

// Bulk transfer.
impl Platform {
    /// Loads the snapshot through the regular mutations, so it is
    /// subject to the same checks; a snapshot that would introduce a
    /// cycle or a duplicate fails at the offending record.  Records
    /// applied before the failure are kept.
    pub async fn import(&self, snapshot: Snapshot) -> Result<(), Error> {
        log::debug!(
            "importing {} rule(s), {} item(s), {} item child(ren), {} assignment(s)",
            snapshot.rules.len(),
            snapshot.items.len(),
            snapshot.item_children.len(),
            snapshot.assignments.len(),
        );
        {
            let _guard = self.mutation.write().await;
            for rule in snapshot.rules.iter() {
                self.platform.put_rule(&rule.name).await?;
            }
        }
        for item in snapshot.items.into_iter() {
            self.insert_item(item).await?;
        }
        for edge in snapshot.item_children.iter() {
            self.add_child(&edge.parent, &edge.child).await?;
        }
        for assignment in snapshot.assignments.iter() {
            self.assign(&assignment.user_id, &assignment.role).await?;
        }
        Ok(())
    }

    pub async fn export(&self) -> Result<Snapshot, Error> {
        let _guard = self.read_guard(&CancellationToken::new()).await?;
        Ok(Snapshot {
            rules: self.platform.list_rule_names().await?
                .into_iter()
                .map(RuleEntry::from)
                .collect(),
            items: self.platform.list_items().await?,
            item_children: self.platform.list_item_children().await?,
            assignments: self.platform.list_assignments().await?,
        })
    }
}
