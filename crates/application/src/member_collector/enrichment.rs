use std::sync::Arc;

use orgscope_domain::{LastActive, Member, MemberRole, Organization, OrganizationMember};
use tokio::sync::mpsc;

use super::MemberCollector;
use crate::collector_ports::DiagnosticEvent;

impl MemberCollector {
    /// Looks up the last active time of every member concurrently.
    ///
    /// Members whose lookup fails are reported as a missing permission and
    /// left out. Members without any audit event are left out unless
    /// `retain_inactive_members` is set. Output order is unspecified.
    pub(super) async fn enrich_members(
        &self,
        organization: &Organization,
        members: Vec<Member>,
        role: MemberRole,
    ) -> Vec<OrganizationMember> {
        let (sender, mut receiver) = mpsc::channel(members.len().max(1));
        let organization: Arc<str> = Arc::from(organization.login());
        let mut waiter = self.group_waiter();

        for member in members {
            let collector = self.clone();
            let organization = Arc::clone(&organization);
            let sender = sender.clone();
            waiter.spawn(async move {
                if let Some(enriched) = collector
                    .enrich_member(organization.as_ref(), member, role)
                    .await
                {
                    // Capacity matches the member count, so this never waits.
                    let _ = sender.send(enriched).await;
                }
            });
        }

        drop(sender);
        waiter.wait().await;

        let mut enriched = Vec::new();
        while let Some(member) = receiver.recv().await {
            enriched.push(member);
        }

        enriched
    }

    async fn enrich_member(
        &self,
        organization: &str,
        member: Member,
        role: MemberRole,
    ) -> Option<OrganizationMember> {
        match self.audit_log.last_active(organization, member.login()).await {
            Ok(latest_event) => {
                let last_active = LastActive::from_latest_event(latest_event);
                if last_active.is_active() || self.options.retain_inactive_members {
                    Some(OrganizationMember::new(member, role, last_active))
                } else {
                    None
                }
            }
            Err(error) => {
                self.diagnostics.record(DiagnosticEvent::LastActiveFailed {
                    organization: organization.to_owned(),
                    member: member.login().to_owned(),
                    error,
                });
                self.issue_member_missing_permission(organization, &member)
                    .await;
                None
            }
        }
    }
}
