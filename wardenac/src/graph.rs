//! Traversal over the item hierarchy as stored by the backend.
//!
//! A `Hierarchy` lives for a single operation.  Child and parent lists
//! are fetched at most once per item during that operation, so every
//! traversal within it sees one consistent view of the edges.

use std::{
    collections::{
        HashMap,
        HashSet,
    },
    future::Future,
};
use tokio_util::sync::CancellationToken;
use wardencore::{
    error::BackendError,
    item::traits::ItemChildBackend as _,
    platform::RbacPlatform,
};

use crate::error::Error;

/// Awaits a backend call unless the token is cancelled first.
pub(crate) async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, BackendError>>,
) -> Result<T, Error> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => Ok(result?),
    }
}

pub(crate) struct Hierarchy<'a> {
    platform: &'a dyn RbacPlatform,
    cancel: &'a CancellationToken,
    children: HashMap<String, Vec<String>>,
    parents: Option<HashMap<String, Vec<String>>>,
}

impl<'a> Hierarchy<'a> {
    pub(crate) fn new(
        platform: &'a dyn RbacPlatform,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            platform,
            cancel,
            children: HashMap::new(),
            parents: None,
        }
    }

    /// Direct children of the item, in edge insertion order.
    pub(crate) async fn children(&mut self, name: &str) -> Result<&[String], Error> {
        if !self.children.contains_key(name) {
            let children = guarded(
                self.cancel,
                self.platform.list_children(name),
            ).await?;
            log::trace!("loaded {} child(ren) of {name}", children.len());
            self.children.insert(name.to_string(), children);
        }
        Ok(self.children
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Direct parents of the item, in edge insertion order.  The first
    /// call loads the complete edge list.
    pub(crate) async fn parents(&mut self, name: &str) -> Result<&[String], Error> {
        if self.parents.is_none() {
            let edges = guarded(
                self.cancel,
                self.platform.list_item_children(),
            ).await?;
            log::trace!("loaded {} item children for parent lookup", edges.len());
            self.parents = Some(edges.into_iter()
                .fold(HashMap::new(), |mut m: HashMap<String, Vec<String>>, edge| {
                    m.entry(edge.child)
                        .or_default()
                        .push(edge.parent);
                    m
                })
            );
        }
        Ok(self.parents
            .as_ref()
            .and_then(|parents| parents.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Every item reachable from `name` through child edges, excluding
    /// `name` itself unless it lies on a cycle.  Depth-first, each item
    /// reported once no matter how many paths reach it.
    pub(crate) async fn descendants(&mut self, name: &str) -> Result<Vec<String>, Error> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = self.children(name).await?
            .iter()
            .rev()
            .cloned()
            .collect::<Vec<_>>();
        while let Some(node) = stack.pop() {
            if !visited.insert(node.clone()) {
                continue;
            }
            stack.extend(self.children(&node).await?.iter().rev().cloned());
            result.push(node);
        }
        Ok(result)
    }

    /// Every item from which `name` is reachable, i.e. everything that
    /// grants `name`.
    pub(crate) async fn ancestors(&mut self, name: &str) -> Result<Vec<String>, Error> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = self.parents(name).await?
            .iter()
            .rev()
            .cloned()
            .collect::<Vec<_>>();
        while let Some(node) = stack.pop() {
            if !visited.insert(node.clone()) {
                continue;
            }
            stack.extend(self.parents(&node).await?.iter().rev().cloned());
            result.push(node);
        }
        Ok(result)
    }

    /// Whether a path `from -> ... -> to` exists; an item always reaches
    /// itself.
    pub(crate) async fn reaches(&mut self, from: &str, to: &str) -> Result<bool, Error> {
        let mut visited = HashSet::new();
        let mut stack = vec![from.to_string()];
        while let Some(node) = stack.pop() {
            if node == to {
                return Ok(true);
            }
            if !visited.insert(node.clone()) {
                continue;
            }
            stack.extend(self.children(&node).await?.iter().cloned());
        }
        Ok(false)
    }
}
