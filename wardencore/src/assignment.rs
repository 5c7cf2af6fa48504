use serde::{Deserialize, Serialize};

/// A user directly holding an item, usually a role.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Assignment {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: String,
    pub role: String,
}

impl<U: Into<String>, R: Into<String>> From<(U, R)> for Assignment {
    fn from((user_id, role): (U, R)) -> Self {
        Self {
            user_id: user_id.into(),
            role: role.into(),
        }
    }
}

pub mod traits;
