use std::sync::Arc;
use wardencore::platform::{
    ConnectorOption,
    PlatformConnector,
    RbacPlatform,
};

pub mod memory;
pub use memory::MemoryBackend;

pub struct Backend;

#[derive(Clone, Debug, PartialEq)]
pub struct Error(String);

#[derive(Debug)]
enum BackendKind {
    Memory,
}

mod display {
    use super::{BackendKind, Error};
    use std::fmt::{Display, Formatter, Result};

    impl Display for BackendKind {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match self {
                Self::Memory => "memory".fmt(f),
            }
        }
    }

    impl Display for Error {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            self.0.fmt(f)
        }
    }

    impl std::error::Error for Error {}
}

impl TryFrom<&str> for BackendKind {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.split(':').next() {
            Some("memory") => Ok(BackendKind::Memory),
            _ => Err(Error(format!("The connection string {s:?} is unsupported.")))
        }
    }
}

impl Backend {
    /// Opens the backend identified by the scheme of the url.
    pub async fn rbac(
        opts: impl Into<ConnectorOption> + Send,
    ) -> Result<Arc<dyn RbacPlatform>, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let opts = opts.into();
        match BackendKind::try_from(opts.url.as_str()) {
            Ok(kind @ BackendKind::Memory) => {
                log::debug!("connecting to {kind} backend at {:?}", opts.url);
                Ok(Arc::new(MemoryBackend::rbac(opts).await?))
            }
            Err(e) => Err(Box::new(e)),
        }
    }
}
