use std::sync::Arc;
use wardenac::platform::{
    Builder,
    Platform,
};
use wardencore::item::ItemKind;
use wardendb::MemoryBackend;
use wardenrule::rule::ParamMatchesUser;

pub async fn create_memory_platform() -> anyhow::Result<Platform> {
    let platform = Builder::new()
        .platform(MemoryBackend::new())
        .build()?;
    Ok(platform)
}

/// Builds the platform from the builder over a fresh memory backend,
/// which is returned alongside so tests may disconnect it, then loads
/// the profile hierarchy:
///
/// ```text
/// admin -> manager -> user -> updateOwnProfile -> updateProfile
/// admin -> updateProfile
/// ```
///
/// with `updateOwnProfile` gated by `IsOwnProfile`, which passes when
/// the `targetUserId` parameter is the user being checked.  `alice`
/// holds `admin` and `bob` holds `user`.
pub async fn create_profile_platform(
    builder: Builder,
) -> anyhow::Result<(Arc<MemoryBackend>, Platform)> {
    let backend = Arc::new(MemoryBackend::new());
    let platform = builder
        .shared_platform(backend.clone())
        .build()?;
    platform.register_rule("IsOwnProfile", ParamMatchesUser::new("targetUserId")).await?;
    for (name, kind, rule) in [
        ("admin", ItemKind::Role, None),
        ("manager", ItemKind::Role, None),
        ("user", ItemKind::Role, None),
        ("updateProfile", ItemKind::Permission, None),
        ("updateOwnProfile", ItemKind::Permission, Some("IsOwnProfile")),
    ] {
        platform.add_item(name, kind, rule).await?;
    }
    for (parent, child) in [
        ("admin", "manager"),
        ("manager", "user"),
        ("user", "updateOwnProfile"),
        ("updateOwnProfile", "updateProfile"),
        ("admin", "updateProfile"),
    ] {
        platform.add_child(parent, child).await?;
    }
    platform.assign("alice", "admin").await?;
    platform.assign("bob", "user").await?;
    Ok((backend, platform))
}
