use async_trait::async_trait;
use mockall::mock;
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
    platform::{
        DefaultRbacPlatform,
        Isolation,
        PlatformUrl,
    },
    rule::traits::RuleBackend,
};

mock! {
    pub Platform {
        pub async fn item_list(
            &self,
        ) -> Result<Vec<Item>, BackendError>;
        pub async fn item_list_by_kind(
            &self,
            kind: ItemKind,
        ) -> Result<Vec<Item>, BackendError>;
        pub async fn item_get(
            &self,
            name: &str,
        ) -> Result<Option<Item>, BackendError>;
        pub async fn item_put(
            &self,
            item: &Item,
        ) -> Result<(), BackendError>;
        pub async fn item_delete(
            &self,
            name: &str,
        ) -> Result<bool, BackendError>;

        pub async fn item_child_list(
            &self,
        ) -> Result<Vec<ItemChild>, BackendError>;
        pub async fn item_child_list_children(
            &self,
            parent: &str,
        ) -> Result<Vec<String>, BackendError>;
        pub async fn item_child_put(
            &self,
            parent: &str,
            child: &str,
        ) -> Result<(), BackendError>;
        pub async fn item_child_delete(
            &self,
            parent: &str,
            child: &str,
        ) -> Result<bool, BackendError>;

        pub async fn assignment_list(
            &self,
        ) -> Result<Vec<Assignment>, BackendError>;
        pub async fn assignment_list_roles_for_user(
            &self,
            user_id: &str,
        ) -> Result<Vec<String>, BackendError>;
        pub async fn assignment_get(
            &self,
            user_id: &str,
            role: &str,
        ) -> Result<Option<Assignment>, BackendError>;
        pub async fn assignment_put(
            &self,
            user_id: &str,
            role: &str,
        ) -> Result<bool, BackendError>;
        pub async fn assignment_delete(
            &self,
            user_id: &str,
            role: &str,
        ) -> Result<(), BackendError>;
        pub async fn assignment_delete_for_user(
            &self,
            user_id: &str,
        ) -> Result<u64, BackendError>;

        pub async fn rule_list_names(
            &self,
        ) -> Result<Vec<String>, BackendError>;
        pub async fn rule_put(
            &self,
            name: &str,
        ) -> Result<bool, BackendError>;
        pub async fn rule_delete(
            &self,
            name: &str,
        ) -> Result<bool, BackendError>;
    }
}

#[async_trait]
impl ItemBackend for MockPlatform {
    async fn list_items(
        &self,
    ) -> Result<Vec<Item>, BackendError> {
        self.item_list().await
    }
    async fn list_items_by_kind(
        &self,
        kind: ItemKind,
    ) -> Result<Vec<Item>, BackendError> {
        self.item_list_by_kind(kind).await
    }
    async fn get_item(
        &self,
        name: &str,
    ) -> Result<Option<Item>, BackendError> {
        self.item_get(name).await
    }
    async fn put_item(
        &self,
        item: &Item,
    ) -> Result<(), BackendError> {
        self.item_put(item).await
    }
    async fn delete_item(
        &self,
        name: &str,
    ) -> Result<bool, BackendError> {
        self.item_delete(name).await
    }
}

#[async_trait]
impl ItemChildBackend for MockPlatform {
    async fn list_item_children(
        &self,
    ) -> Result<Vec<ItemChild>, BackendError> {
        self.item_child_list().await
    }
    async fn list_children(
        &self,
        parent: &str,
    ) -> Result<Vec<String>, BackendError> {
        self.item_child_list_children(parent).await
    }
    async fn put_item_child(
        &self,
        parent: &str,
        child: &str,
    ) -> Result<(), BackendError> {
        self.item_child_put(parent, child).await
    }
    async fn delete_item_child(
        &self,
        parent: &str,
        child: &str,
    ) -> Result<bool, BackendError> {
        self.item_child_delete(parent, child).await
    }
}

#[async_trait]
impl AssignmentBackend for MockPlatform {
    async fn list_assignments(
        &self,
    ) -> Result<Vec<Assignment>, BackendError> {
        self.assignment_list().await
    }
    async fn list_roles_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<String>, BackendError> {
        self.assignment_list_roles_for_user(user_id).await
    }
    async fn get_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<Option<Assignment>, BackendError> {
        self.assignment_get(user_id, role).await
    }
    async fn put_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<bool, BackendError> {
        self.assignment_put(user_id, role).await
    }
    async fn delete_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> Result<(), BackendError> {
        self.assignment_delete(user_id, role).await
    }
    async fn delete_assignments_for_user(
        &self,
        user_id: &str,
    ) -> Result<u64, BackendError> {
        self.assignment_delete_for_user(user_id).await
    }
}

#[async_trait]
impl RuleBackend for MockPlatform {
    async fn list_rule_names(
        &self,
    ) -> Result<Vec<String>, BackendError> {
        self.rule_list_names().await
    }
    async fn put_rule(
        &self,
        name: &str,
    ) -> Result<bool, BackendError> {
        self.rule_put(name).await
    }
    async fn delete_rule(
        &self,
        name: &str,
    ) -> Result<bool, BackendError> {
        self.rule_delete(name).await
    }
}

impl PlatformUrl for MockPlatform {
    fn url(&self) -> &str {
        "mock:"
    }
}

impl Isolation for MockPlatform {}

impl DefaultRbacPlatform for MockPlatform {}
