use async_trait::async_trait;
use crate::{
    assignment::Assignment,
    error::BackendError,
};

#[async_trait]
pub trait AssignmentBackend {
    async fn list_assignments(
        &self,
    ) -> Result<Vec<Assignment>, BackendError>;
    /// The roles held by the user, in the order they were assigned.
    async fn list_roles_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<String>, BackendError>;
    async fn get_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<Option<Assignment>, BackendError>;
    /// Returns `false` if the assignment was already present; fails with
    /// `InvalidReference` if the role is not a known item.
    async fn put_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<bool, BackendError>;
    /// Fails with `AssignmentNotFound` if absent.
    async fn delete_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<(), BackendError>;
    async fn delete_assignments_for_user(
        &self,
        user_id: &str,
    ) -> Result<u64, BackendError>;
}
