use async_trait::async_trait;
use crate::error::BackendError;

#[async_trait]
pub trait RuleBackend {
    async fn list_rule_names(
        &self,
    ) -> Result<Vec<String>, BackendError>;
    async fn put_rule(
        &self,
        name: &str,
    ) -> Result<bool, BackendError>;
    async fn delete_rule(
        &self,
        name: &str,
    ) -> Result<bool, BackendError>;
}
