use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::{
    Item,
    ItemChild,
    ItemKind,
};

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(<&'static str>::from(*self))
    }
}

impl From<ItemKind> for &'static str {
    fn from(kind: ItemKind) -> &'static str {
        match kind {
            ItemKind::Role => "role",
            ItemKind::Permission => "permission",
        }
    }
}

impl FromStr for ItemKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "role" => Ok(ItemKind::Role),
            "permission" => Ok(ItemKind::Permission),
            s => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rule: None,
            description: None,
        }
    }

    pub fn role(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Role)
    }

    pub fn permission(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Permission)
    }

    pub fn rule(mut self, val: impl Into<String>) -> Self {
        self.rule = Some(val.into());
        self
    }

    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.description = Some(val.into());
        self
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.rule {
            Some(rule) => write!(f, "<{}:{} rule={rule}>", self.kind, self.name),
            None => write!(f, "<{}:{}>", self.kind, self.name),
        }
    }
}

impl<P: Into<String>, C: Into<String>> From<(P, C)> for ItemChild {
    fn from((parent, child): (P, C)) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::*;

    #[test]
    fn kind_smoke() -> anyhow::Result<()> {
        assert_eq!(ItemKind::Role.to_string(), "role");
        assert_eq!(ItemKind::Role, ItemKind::from_str("role")?);
        assert_eq!(ItemKind::Permission.to_string(), "permission");
        assert_eq!(ItemKind::Permission, ItemKind::from_str("permission")?);
        assert!(matches!(
            ItemKind::from_str("Role").expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "Role",
        ));
        Ok(())
    }

    #[test]
    fn item_serde() -> anyhow::Result<()> {
        let item: Item = serde_json::from_str(r#"{
            "name": "updateOwnProfile",
            "type": "permission",
            "rule": "IsOwnProfile"
        }"#)?;
        assert_eq!(item, Item::permission("updateOwnProfile").rule("IsOwnProfile"));
        assert_eq!(item.to_string(), "<permission:updateOwnProfile rule=IsOwnProfile>");

        let item = Item::role("admin");
        assert_eq!(
            serde_json::to_string(&item)?,
            r#"{"name":"admin","type":"role"}"#,
        );
        Ok(())
    }
}
