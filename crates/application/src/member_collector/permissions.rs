use orgscope_domain::{Member, Namespace, Organization, Permission};

use super::MemberCollector;
use crate::collector_ports::DiagnosticEvent;

pub(super) const ORG_MEMBER_LAST_ACTIVE_EFFECT: &str =
    "Cannot read organization member last active time";
pub(super) const ORG_INFO_EFFECT: &str = "Cannot read organization information";
pub(super) const ORG_NOT_ENTERPRISE_EFFECT: &str =
    "Some information cannot be collected because the organization is not part of an enterprise";

impl MemberCollector {
    /// Registers the gaps visible from the organization record itself.
    pub(super) async fn issue_organization_missing_permissions(&self, organization: &Organization) {
        let effect = match organization.plan() {
            None => ORG_INFO_EFFECT,
            Some(plan) if !plan.is_enterprise() => ORG_NOT_ENTERPRISE_EFFECT,
            Some(_) => return,
        };

        self.issue_missing_permission(
            Permission::OrgRead,
            organization.login().to_owned(),
            effect,
            Namespace::Organization,
        )
        .await;
    }

    /// Registers a failed last active lookup.
    pub(super) async fn issue_member_missing_permission(
        &self,
        organization: &str,
        member: &Member,
    ) {
        self.issue_missing_permission(
            Permission::OrgAdmin,
            format!("{} ({organization})", member.login()),
            ORG_MEMBER_LAST_ACTIVE_EFFECT,
            Namespace::Member,
        )
        .await;
    }

    async fn issue_missing_permission(
        &self,
        permission: Permission,
        entity_name: String,
        effect: &str,
        namespace: Namespace,
    ) {
        if let Err(error) = self
            .missing_permissions
            .register(permission, entity_name.clone(), effect, namespace)
            .await
        {
            self.diagnostics
                .record(DiagnosticEvent::MissingPermissionRejected { entity_name, error });
        }
    }
}
