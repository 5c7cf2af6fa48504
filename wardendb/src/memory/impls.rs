use async_trait::async_trait;
use wardencore::{
    assignment::{
        Assignment,
        traits::AssignmentBackend,
    },
    error::BackendError,
    item::{
        Item,
        ItemChild,
        ItemKind,
        traits::{
            ItemBackend,
            ItemChildBackend,
        },
    },
    rule::traits::RuleBackend,
};

use crate::MemoryBackend;

fn put_item_memory(
    backend: &MemoryBackend,
    item: &Item,
) -> Result<(), BackendError> {
    let mut state = backend.write()?;
    if state.items.iter().any(|i| i.name == item.name) {
        return Err(BackendError::DuplicateItem(item.name.clone()));
    }
    state.items.push(item.clone());
    Ok(())
}

fn delete_item_memory(
    backend: &MemoryBackend,
    name: &str,
) -> Result<bool, BackendError> {
    let mut state = backend.write()?;
    let len = state.items.len();
    state.items.retain(|i| i.name != name);
    Ok(state.items.len() < len)
}

fn put_item_child_memory(
    backend: &MemoryBackend,
    parent: &str,
    child: &str,
) -> Result<(), BackendError> {
    let mut state = backend.write()?;
    for name in [parent, child] {
        if !state.items.iter().any(|i| i.name == name) {
            return Err(BackendError::InvalidReference(name.to_string()));
        }
    }
    if state.item_children.iter().any(|e| e.parent == parent && e.child == child) {
        return Err(BackendError::DuplicateEdge(parent.to_string(), child.to_string()));
    }
    state.item_children.push((parent, child).into());
    Ok(())
}

fn delete_item_child_memory(
    backend: &MemoryBackend,
    parent: &str,
    child: &str,
) -> Result<bool, BackendError> {
    let mut state = backend.write()?;
    let len = state.item_children.len();
    state.item_children.retain(|e| !(e.parent == parent && e.child == child));
    Ok(state.item_children.len() < len)
}

fn put_assignment_memory(
    backend: &MemoryBackend,
    user_id: &str,
    role: &str,
) -> Result<bool, BackendError> {
    let mut state = backend.write()?;
    if !state.items.iter().any(|i| i.name == role) {
        return Err(BackendError::InvalidReference(role.to_string()));
    }
    if state.assignments.iter().any(|a| a.user_id == user_id && a.role == role) {
        return Ok(false);
    }
    state.assignments.push((user_id, role).into());
    Ok(true)
}

fn delete_assignment_memory(
    backend: &MemoryBackend,
    user_id: &str,
    role: &str,
) -> Result<(), BackendError> {
    let mut state = backend.write()?;
    let len = state.assignments.len();
    state.assignments.retain(|a| !(a.user_id == user_id && a.role == role));
    (state.assignments.len() < len)
        .then_some(())
        .ok_or_else(|| BackendError::AssignmentNotFound(user_id.to_string(), role.to_string()))
}

fn delete_assignments_for_user_memory(
    backend: &MemoryBackend,
    user_id: &str,
) -> Result<u64, BackendError> {
    let mut state = backend.write()?;
    let len = state.assignments.len();
    state.assignments.retain(|a| a.user_id != user_id);
    Ok((len - state.assignments.len()) as u64)
}

fn put_rule_memory(
    backend: &MemoryBackend,
    name: &str,
) -> Result<bool, BackendError> {
    let mut state = backend.write()?;
    if state.rules.iter().any(|r| r == name) {
        return Ok(false);
    }
    state.rules.push(name.to_string());
    Ok(true)
}

fn delete_rule_memory(
    backend: &MemoryBackend,
    name: &str,
) -> Result<bool, BackendError> {
    let mut state = backend.write()?;
    let len = state.rules.len();
    state.rules.retain(|r| r != name);
    Ok(state.rules.len() < len)
}

#[async_trait]
impl ItemBackend for MemoryBackend {
    async fn list_items(
        &self,
    ) -> Result<Vec<Item>, BackendError> {
        Ok(self.read()?.items.clone())
    }

    async fn list_items_by_kind(
        &self,
        kind: ItemKind,
    ) -> Result<Vec<Item>, BackendError> {
        Ok(self.read()?.items.iter()
            .filter(|i| i.kind == kind)
            .cloned()
            .collect())
    }

    async fn get_item(
        &self,
        name: &str,
    ) -> Result<Option<Item>, BackendError> {
        Ok(self.read()?.items.iter()
            .find(|i| i.name == name)
            .cloned())
    }

    async fn put_item(
        &self,
        item: &Item,
    ) -> Result<(), BackendError> {
        put_item_memory(self, item)
    }

    async fn delete_item(
        &self,
        name: &str,
    ) -> Result<bool, BackendError> {
        delete_item_memory(self, name)
    }
}

#[async_trait]
impl ItemChildBackend for MemoryBackend {
    async fn list_item_children(
        &self,
    ) -> Result<Vec<ItemChild>, BackendError> {
        Ok(self.read()?.item_children.clone())
    }

    async fn list_children(
        &self,
        parent: &str,
    ) -> Result<Vec<String>, BackendError> {
        Ok(self.read()?.item_children.iter()
            .filter(|e| e.parent == parent)
            .map(|e| e.child.clone())
            .collect())
    }

    async fn put_item_child(
        &self,
        parent: &str,
        child: &str,
    ) -> Result<(), BackendError> {
        put_item_child_memory(self, parent, child)
    }

    async fn delete_item_child(
        &self,
        parent: &str,
        child: &str,
    ) -> Result<bool, BackendError> {
        delete_item_child_memory(self, parent, child)
    }
}

#[async_trait]
impl AssignmentBackend for MemoryBackend {
    async fn list_assignments(
        &self,
    ) -> Result<Vec<Assignment>, BackendError> {
        Ok(self.read()?.assignments.clone())
    }

    async fn list_roles_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<String>, BackendError> {
        Ok(self.read()?.assignments.iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.role.clone())
            .collect())
    }

    async fn get_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<Option<Assignment>, BackendError> {
        Ok(self.read()?.assignments.iter()
            .find(|a| a.user_id == user_id && a.role == role)
            .cloned())
    }

    async fn put_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<bool, BackendError> {
        put_assignment_memory(self, user_id, role)
    }

    async fn delete_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<(), BackendError> {
        delete_assignment_memory(self, user_id, role)
    }

    async fn delete_assignments_for_user(
        &self,
        user_id: &str,
    ) -> Result<u64, BackendError> {
        delete_assignments_for_user_memory(self, user_id)
    }
}

#[async_trait]
impl RuleBackend for MemoryBackend {
    async fn list_rule_names(
        &self,
    ) -> Result<Vec<String>, BackendError> {
        Ok(self.read()?.rules.clone())
    }

    async fn put_rule(
        &self,
        name: &str,
    ) -> Result<bool, BackendError> {
        put_rule_memory(self, name)
    }

    async fn delete_rule(
        &self,
        name: &str,
    ) -> Result<bool, BackendError> {
        delete_rule_memory(self, name)
    }
}
