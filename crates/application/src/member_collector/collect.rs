use orgscope_domain::{
    CollectedRecord, LastActive, Member, MemberRole, Organization, OrganizationMember,
    OrganizationMembers,
};
use tokio::sync::mpsc;

use super::{MemberCollector, RECORD_BUFFER};
use crate::collector_ports::DiagnosticEvent;
use crate::pagination::paginate_results;

impl MemberCollector {
    /// Starts a collection run and streams one record per organization.
    ///
    /// Records are sent as soon as an organization is complete. The stream
    /// ends after the last organization, or right away when organizations
    /// cannot be listed.
    #[must_use]
    pub fn collect(&self) -> mpsc::Receiver<CollectedRecord> {
        let (sender, receiver) = mpsc::channel(RECORD_BUFFER);
        let collector = self.clone();
        tokio::spawn(async move {
            collector.run_collection(sender).await;
        });

        receiver
    }

    async fn run_collection(&self, sender: mpsc::Sender<CollectedRecord>) {
        let organizations = match self.organizations.list_organizations().await {
            Ok(organizations) => organizations,
            Err(error) => {
                self.diagnostics
                    .record(DiagnosticEvent::OrganizationsUnavailable { error });
                return;
            }
        };

        for organization in organizations {
            let record = self.collect_organization(&organization).await;
            if sender.send(record).await.is_err() {
                self.diagnostics.record(DiagnosticEvent::RecordReceiverClosed {
                    organization: organization.login().to_owned(),
                });
                return;
            }
        }
    }

    /// Collects every member category of one organization.
    pub(super) async fn collect_organization(
        &self,
        organization: &Organization,
    ) -> CollectedRecord {
        let has_last_active = organization.is_enterprise();
        self.issue_organization_missing_permissions(organization)
            .await;

        let mut members = Vec::new();
        for role in MemberRole::all().iter().copied() {
            let listed = self.collect_members(organization.login(), role).await;
            self.progress
                .collection_change(u64::try_from(listed.len()).unwrap_or(u64::MAX));

            if has_last_active {
                members.extend(self.enrich_members(organization, listed, role).await);
            } else {
                members.extend(listed.into_iter().map(|member| {
                    OrganizationMember::new(member, role, LastActive::NotComputed)
                }));
            }
        }

        CollectedRecord {
            canonical_url: organization.html_url().to_owned(),
            roles: vec![organization.role()],
            data: OrganizationMembers {
                organization: organization.clone(),
                members,
                has_last_active,
            },
        }
    }

    /// Lists all members of one category, keeping pages fetched before a failure.
    async fn collect_members(&self, organization: &str, role: MemberRole) -> Vec<Member> {
        let results =
            paginate_results(|page| self.members.list_members(organization, role, page)).await;

        if let Some(error) = results.error {
            self.diagnostics.record(DiagnosticEvent::MemberPageFailed {
                organization: organization.to_owned(),
                role,
                collected: results.items.len(),
                error,
            });
        }

        results.items
    }
}
