//! Organizations scanned by the collectors.

use std::str::FromStr;

use orgscope_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

const ENTERPRISE_PLAN: &str = "enterprise";

/// Role the collecting credential holds in an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    /// Organization owner.
    Admin,
    /// Regular organization member.
    Member,
}

impl OrgRole {
    /// Returns the transport value of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl FromStr for OrgRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(AppError::Validation(format!(
                "unknown organization role '{value}'"
            ))),
        }
    }
}

/// Billing plan of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationPlan {
    name: String,
}

impl OrganizationPlan {
    /// Creates a plan descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the plan name as reported by the service.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns true for the enterprise plan, which unlocks the audit log.
    #[must_use]
    pub fn is_enterprise(&self) -> bool {
        self.name.eq_ignore_ascii_case(ENTERPRISE_PLAN)
    }
}

/// One organization visible to the collecting credential.
///
/// The plan is only returned to callers allowed to read organization
/// settings, so a missing plan doubles as a privilege signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    login: NonEmptyString,
    html_url: String,
    role: OrgRole,
    plan: Option<OrganizationPlan>,
}

impl Organization {
    /// Creates an organization without plan information.
    pub fn new(
        login: impl Into<String>,
        html_url: impl Into<String>,
        role: OrgRole,
    ) -> AppResult<Self> {
        Ok(Self {
            login: NonEmptyString::new(login)?,
            html_url: html_url.into(),
            role,
            plan: None,
        })
    }

    /// Attaches the billing plan.
    #[must_use]
    pub fn with_plan(mut self, plan: OrganizationPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Returns the organization login.
    #[must_use]
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Returns the canonical web URL of the organization.
    #[must_use]
    pub fn html_url(&self) -> &str {
        self.html_url.as_str()
    }

    /// Returns the role of the collecting credential.
    #[must_use]
    pub fn role(&self) -> OrgRole {
        self.role
    }

    /// Returns the billing plan, if it was readable.
    #[must_use]
    pub fn plan(&self) -> Option<&OrganizationPlan> {
        self.plan.as_ref()
    }

    /// Returns true when the organization belongs to an enterprise account.
    #[must_use]
    pub fn is_enterprise(&self) -> bool {
        self.plan.as_ref().is_some_and(OrganizationPlan::is_enterprise)
    }
}

#[cfg(test)]
mod tests {
    use super::{OrgRole, Organization, OrganizationPlan};

    #[test]
    fn organization_requires_login() {
        let organization = Organization::new(" ", "https://github.com/acme", OrgRole::Admin);
        assert!(organization.is_err());
    }

    #[test]
    fn enterprise_requires_enterprise_plan() {
        let organization = Organization::new("acme", "https://github.com/acme", OrgRole::Admin)
            .unwrap_or_else(|_| unreachable!());
        assert!(!organization.is_enterprise());

        let free = organization.clone().with_plan(OrganizationPlan::new("free"));
        assert!(!free.is_enterprise());

        let enterprise = organization.with_plan(OrganizationPlan::new("enterprise"));
        assert!(enterprise.is_enterprise());
    }
}
