use crate::{
    assignment::traits::AssignmentBackend,
    item::traits::{
        ItemBackend,
        ItemChildBackend,
    },
    rule::traits::RuleBackend,
};

mod connector;
pub use connector::{ConnectorOption, PlatformConnector};

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

/// Read consistency offered by a backend.
pub trait Isolation {
    /// Whether every read observes a consistent snapshot even while a
    /// mutation is in flight.  When this is `false` (the default) the
    /// engine holds checks back for the duration of any mutation.
    fn snapshot_reads(&self) -> bool {
        false
    }
}

/// RbacPlatform - the persistence contract consumed by the engine.
///
/// This trait is applicable to everything that correctly implements the
/// relevant backends that compose this trait.
pub trait RbacPlatform: ItemBackend
    + ItemChildBackend
    + AssignmentBackend
    + RuleBackend

    + PlatformUrl
    + Isolation

    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn RbacPlatform;
}

pub trait DefaultRbacPlatform: RbacPlatform {}

impl<P: ItemBackend
    + ItemChildBackend
    + AssignmentBackend
    + RuleBackend

    + PlatformUrl
    + Isolation

    + DefaultRbacPlatform

    + Send
    + Sync
> RbacPlatform for P {
    fn as_dyn(&self) -> &(dyn RbacPlatform) {
        self
    }
}
