use async_trait::async_trait;
use crate::{
    error::BackendError,
    item::{
        Item,
        ItemChild,
        ItemKind,
    },
};

#[async_trait]
pub trait ItemBackend {
    async fn list_items(
        &self,
    ) -> Result<Vec<Item>, BackendError>;
    async fn list_items_by_kind(
        &self,
        kind: ItemKind,
    ) -> Result<Vec<Item>, BackendError>;
    async fn get_item(
        &self,
        name: &str,
    ) -> Result<Option<Item>, BackendError>;
    /// Fails with `DuplicateItem` if the name is taken by any item.
    async fn put_item(
        &self,
        item: &Item,
    ) -> Result<(), BackendError>;
    async fn delete_item(
        &self,
        name: &str,
    ) -> Result<bool, BackendError>;
}

/// Storage of the parent to child edges.  Listings must preserve the
/// order in which the edges were inserted.
#[async_trait]
pub trait ItemChildBackend {
    async fn list_item_children(
        &self,
    ) -> Result<Vec<ItemChild>, BackendError>;
    async fn list_children(
        &self,
        parent: &str,
    ) -> Result<Vec<String>, BackendError>;
    /// Fails with `InvalidReference` if either end is unknown, or with
    /// `DuplicateEdge` if the pair is already present.
    async fn put_item_child(
        &self,
        parent: &str,
        child: &str,
    ) -> Result<(), BackendError>;
    async fn delete_item_child(
        &self,
        parent: &str,
        child: &str,
    ) -> Result<bool, BackendError>;
}
