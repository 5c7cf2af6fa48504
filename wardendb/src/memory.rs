//! A backend that keeps everything in process memory.
//!
//! It honours the full adapter contract, including the error kinds and
//! insertion ordering, and models an explicit connection lifecycle: a
//! disconnected backend fails every operation with `Unavailable` until
//! it is connected again.

use async_trait::async_trait;
use parking_lot::{
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};
use wardencore::{
    assignment::Assignment,
    error::BackendError,
    item::{
        Item,
        ItemChild,
    },
    platform::{
        ConnectorOption,
        Isolation,
        PlatformConnector,
        PlatformUrl,
    },
};

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) items: Vec<Item>,
    pub(crate) item_children: Vec<ItemChild>,
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) rules: Vec<String>,
}

pub struct MemoryBackend {
    state: RwLock<State>,
    connected: AtomicBool,
    url: String,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_url("memory:")
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(State::default()),
            connected: AtomicBool::new(true),
            url: url.into(),
        }
    }

    pub fn connect(&self) {
        log::debug!("memory backend {} connected", self.url);
        self.connected.store(true, Ordering::SeqCst);
    }

    /// Closes the connection; the stored data is retained for a later
    /// `connect`.
    pub fn disconnect(&self) {
        log::debug!("memory backend {} disconnected", self.url);
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn ensure_connected(&self) -> Result<(), BackendError> {
        self.is_connected()
            .then_some(())
            .ok_or_else(|| BackendError::Unavailable(
                format!("{} is disconnected", self.url)
            ))
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, State>, BackendError> {
        self.ensure_connected()?;
        Ok(self.state.read())
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, State>, BackendError> {
        self.ensure_connected()?;
        Ok(self.state.write())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformUrl for MemoryBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

// Reads go through the same lock as writes but a check spans many
// reads, so the engine still has to serialize checks against mutations.
impl Isolation for MemoryBackend {}

#[async_trait]
impl PlatformConnector for MemoryBackend {
    async fn rbac(opts: ConnectorOption) -> Result<Self, Box<dyn std::error::Error + Send + Sync + 'static>> {
        Ok(MemoryBackend::with_url(opts.url))
    }
}

mod impls;

mod default_impl {
    use wardencore::platform::DefaultRbacPlatform;
    use crate::MemoryBackend;

    impl DefaultRbacPlatform for MemoryBackend {}
}
