use async_trait::async_trait;
use std::error::Error;

/// Options for explicitly opening a connection to a backend.
#[derive(Clone, Debug, Default)]
pub struct ConnectorOption {
    pub url: String,
}

impl ConnectorOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: String) -> Self {
        self.url = url;
        self
    }
}

impl<T> From<T> for ConnectorOption
where
    T: ToString
{
    fn from(v: T) -> Self {
        Self::new().url(v.to_string())
    }
}

#[async_trait]
pub trait PlatformConnector: Sized {
    async fn rbac(opts: ConnectorOption) -> Result<Self, Box<dyn Error + Send + Sync + 'static>>;
}
