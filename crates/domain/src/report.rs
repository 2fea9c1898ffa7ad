//! Values produced by a collection run.

use orgscope_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{Namespace, OrgRole, Organization, OrganizationMember, Permission};

/// A privilege gap that degraded collection without aborting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPermission {
    permission: Permission,
    entity_name: NonEmptyString,
    effect: NonEmptyString,
    namespace: Namespace,
}

impl MissingPermission {
    /// Creates a missing permission fact.
    pub fn new(
        permission: Permission,
        entity_name: impl Into<String>,
        effect: impl Into<String>,
        namespace: Namespace,
    ) -> AppResult<Self> {
        Ok(Self {
            permission,
            entity_name: NonEmptyString::new(entity_name)?,
            effect: NonEmptyString::new(effect)?,
            namespace,
        })
    }

    /// Returns the privilege that was missing.
    #[must_use]
    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Returns the name of the affected entity.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        self.entity_name.as_str()
    }

    /// Returns a human readable description of the impact.
    #[must_use]
    pub fn effect(&self) -> &str {
        self.effect.as_str()
    }

    /// Returns the functional area affected.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }
}

/// Members collected for one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMembers {
    /// Organization the members belong to.
    pub organization: Organization,
    /// Members of every category, grouped by category in collection order.
    pub members: Vec<OrganizationMember>,
    /// Whether last active times were looked up for this organization.
    pub has_last_active: bool,
}

/// One emitted record along with its reference URL and the collector roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedRecord {
    /// Collected data.
    pub data: OrganizationMembers,
    /// Canonical web URL of the organization.
    pub canonical_url: String,
    /// Roles of the collecting credential on the organization.
    pub roles: Vec<OrgRole>,
}

/// Approximate totals used for progress display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Sum of member counts across organizations.
    pub total_entities: u64,
}
