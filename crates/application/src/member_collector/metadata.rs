use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use orgscope_domain::CollectionMetadata;

use super::MemberCollector;
use crate::collector_ports::DiagnosticEvent;

impl MemberCollector {
    /// Estimates the number of members across all organizations.
    ///
    /// Only meant for progress display. Organizations whose count query fails
    /// contribute zero.
    pub async fn collect_metadata(&self) -> CollectionMetadata {
        let organizations = match self.organizations.list_organizations().await {
            Ok(organizations) => organizations,
            Err(error) => {
                self.diagnostics
                    .record(DiagnosticEvent::OrganizationsUnavailable { error });
                return CollectionMetadata::default();
            }
        };

        let total_count = Arc::new(AtomicU64::new(0));
        let mut waiter = self.group_waiter();

        for organization in organizations {
            let members = Arc::clone(&self.members);
            let diagnostics = Arc::clone(&self.diagnostics);
            let total_count = Arc::clone(&total_count);
            waiter.spawn(async move {
                match members.count_members(organization.login()).await {
                    Ok(count) => {
                        total_count.fetch_add(count, Ordering::Relaxed);
                    }
                    Err(error) => diagnostics.record(DiagnosticEvent::MemberCountFailed {
                        organization: organization.login().to_owned(),
                        error,
                    }),
                }
            });
        }

        waiter.wait().await;

        CollectionMetadata {
            total_entities: total_count.load(Ordering::Relaxed),
        }
    }
}
