use parking_lot::RwLock;
use std::{
    any::Any,
    collections::HashMap,
    panic::{
        catch_unwind,
        AssertUnwindSafe,
    },
    sync::Arc,
};
use wardencore::{
    item::Item,
    params::Params,
};

use crate::{
    error::Error,
    rule::Rule,
};

/// Maps rule names to their executable predicates.
///
/// Registration may happen at any time, including while checks are in
/// progress; a check evaluating a rule holds its own reference to the
/// predicate, so replacing it never disturbs an evaluation under way.
#[derive(Default)]
pub struct RuleRegistry {
    rules: RwLock<HashMap<String, Arc<dyn Rule>>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chained form of [`RuleRegistry::register`] for setting up a
    /// registry in one expression.
    pub fn with(self, name: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.register(name, rule);
        self
    }

    /// Registers the rule under the name, replacing any rule previously
    /// registered under it.  Returns `true` if a rule was replaced.
    pub fn register(&self, name: impl Into<String>, rule: impl Rule + 'static) -> bool {
        self.register_arc(name, Arc::new(rule))
    }

    pub fn register_arc(&self, name: impl Into<String>, rule: Arc<dyn Rule>) -> bool {
        let name = name.into();
        let replaced = self.rules.write()
            .insert(name.clone(), rule)
            .is_some();
        if replaced {
            log::debug!("rule {name} re-registered");
        } else {
            log::debug!("rule {name} registered");
        }
        replaced
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.rules.write()
            .remove(name)
            .is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut result = self.rules.read()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        result.sort();
        result
    }

    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    /// Evaluates the named rule.  A rule that returns an error or panics
    /// yields `Error::Evaluation`; it is never read as a denial.
    pub fn evaluate(
        &self,
        name: &str,
        user_id: &str,
        item: &Item,
        params: &Params,
    ) -> Result<bool, Error> {
        let rule = self.rules.read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        log::trace!("evaluating rule {name} for user {user_id} on {item}");
        match catch_unwind(AssertUnwindSafe(|| rule.evaluate(user_id, item, params))) {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(Error::Evaluation(name.to_string(), e.to_string())),
            Err(panic) => Err(Error::Evaluation(name.to_string(), panic_message(panic))),
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(s) => *s,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(s) => s.to_string(),
            Err(_) => "rule panicked".to_string(),
        },
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use crate::rule::{
        BoxError,
        Constant,
        ParamMatchesUser,
    };
    use super::*;

    #[test]
    fn register_replace() -> anyhow::Result<()> {
        let registry = RuleRegistry::new();
        let item = Item::permission("updateOwnProfile").rule("IsOwnProfile");
        assert!(!registry.register("IsOwnProfile", Constant(false)));
        assert!(!registry.evaluate("IsOwnProfile", "bob", &item, &Params::new())?);
        // re-registration replaces rather than duplicates
        assert!(registry.register("IsOwnProfile", Constant(true)));
        assert!(registry.evaluate("IsOwnProfile", "bob", &item, &Params::new())?);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), ["IsOwnProfile"]);

        assert!(registry.unregister("IsOwnProfile"));
        assert!(!registry.unregister("IsOwnProfile"));
        assert!(registry.is_empty());
        Ok(())
    }

    #[test]
    fn not_found() {
        let registry = RuleRegistry::new()
            .with("IsOwnProfile", ParamMatchesUser::new("targetUserId"));
        assert_eq!(
            registry.evaluate("IsAuthor", "bob", &Item::permission("edit"), &Params::new()),
            Err(Error::NotFound("IsAuthor".to_string())),
        );
    }

    #[test]
    fn closure_rule() -> anyhow::Result<()> {
        let registry = RuleRegistry::new()
            .with("IsAdminItem", |_: &str, item: &Item, _: &Params| -> Result<bool, BoxError> {
                Ok(item.name.starts_with("admin"))
            });
        assert!(registry.evaluate("IsAdminItem", "alice", &Item::role("adminPanel"), &Params::new())?);
        assert!(!registry.evaluate("IsAdminItem", "alice", &Item::role("reader"), &Params::new())?);
        Ok(())
    }

    #[test]
    fn faults() {
        let registry = RuleRegistry::new()
            .with("Broken", |_: &str, _: &Item, _: &Params| -> Result<bool, BoxError> {
                Err("no such document".into())
            })
            .with("Panics", |_: &str, _: &Item, params: &Params| -> Result<bool, BoxError> {
                let owner = params.get_str("owner").expect("owner must be provided");
                Ok(owner == "bob")
            });
        let item = Item::permission("edit");
        assert_eq!(
            registry.evaluate("Broken", "bob", &item, &Params::new()),
            Err(Error::Evaluation("Broken".to_string(), "no such document".to_string())),
        );
        assert_eq!(
            registry.evaluate("Panics", "bob", &item, &Params::new()),
            Err(Error::Evaluation("Panics".to_string(), "owner must be provided".to_string())),
        );
        assert_eq!(
            registry.evaluate("Panics", "bob", &item, &Params::new().with("owner", "bob")),
            Ok(true),
        );
    }
}
