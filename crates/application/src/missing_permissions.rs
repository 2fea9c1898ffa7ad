//! Accumulator for privilege gaps found during collection.

use orgscope_core::AppResult;
use orgscope_domain::{MissingPermission, Namespace, Permission};
use tokio::sync::Mutex;

/// Append-only, concurrency safe list of missing permission facts.
///
/// Duplicates are kept; reporting them twice is harmless.
#[derive(Debug, Default)]
pub struct MissingPermissionTracker {
    facts: Mutex<Vec<MissingPermission>>,
}

impl MissingPermissionTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and registers one fact.
    pub async fn register(
        &self,
        permission: Permission,
        entity_name: impl Into<String>,
        effect: impl Into<String>,
        namespace: Namespace,
    ) -> AppResult<()> {
        let fact = MissingPermission::new(permission, entity_name, effect, namespace)?;
        self.issue([fact]).await;
        Ok(())
    }

    /// Registers already built facts.
    pub async fn issue(&self, facts: impl IntoIterator<Item = MissingPermission>) {
        self.facts.lock().await.extend(facts);
    }

    /// Returns a copy of every fact registered so far.
    pub async fn snapshot(&self) -> Vec<MissingPermission> {
        self.facts.lock().await.clone()
    }

    /// Returns the number of facts registered so far.
    pub async fn len(&self) -> usize {
        self.facts.lock().await.len()
    }

    /// Returns true when no fact was registered.
    pub async fn is_empty(&self) -> bool {
        self.facts.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use orgscope_domain::{Namespace, Permission};

    use super::MissingPermissionTracker;

    #[tokio::test]
    async fn concurrent_registrations_are_all_kept() {
        let tracker = Arc::new(MissingPermissionTracker::new());
        let mut handles = Vec::new();

        for index in 0..16 {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                tracker
                    .register(
                        Permission::OrgAdmin,
                        format!("member-{index} (acme)"),
                        "Cannot read organization member last active time",
                        Namespace::Member,
                    )
                    .await
            }));
        }

        for handle in handles {
            let registered = handle.await;
            assert!(matches!(registered, Ok(Ok(()))));
        }

        assert_eq!(tracker.len().await, 16);
    }

    #[tokio::test]
    async fn duplicates_are_not_collapsed() {
        let tracker = MissingPermissionTracker::new();
        for _ in 0..2 {
            let registered = tracker
                .register(
                    Permission::OrgRead,
                    "acme",
                    "Cannot read organization information",
                    Namespace::Organization,
                )
                .await;
            assert!(registered.is_ok());
        }

        assert_eq!(tracker.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn empty_entity_name_is_rejected() {
        let tracker = MissingPermissionTracker::new();
        let registered = tracker
            .register(Permission::OrgRead, "", "effect", Namespace::Organization)
            .await;

        assert!(registered.is_err());
        assert!(tracker.is_empty().await);
    }
}
