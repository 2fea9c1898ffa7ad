//! Token privileges and the functional areas they gate.

use serde::{Deserialize, Serialize};

/// Token privileges the collectors may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Allows reading organization settings and plan details.
    #[serde(rename = "read:org")]
    OrgRead,
    /// Allows administering the organization, including its audit log.
    #[serde(rename = "admin:org")]
    OrgAdmin,
}

impl Permission {
    /// Returns the token scope name for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrgRead => "read:org",
            Self::OrgAdmin => "admin:org",
        }
    }
}

/// Functional area a collected entity or a permission gap belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Organization-level settings.
    Organization,
    /// Organization members.
    Member,
}

impl Namespace {
    /// Returns a stable report value for this namespace.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Member => "member",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Namespace, Permission};

    #[test]
    fn serialized_scopes_match_scope_names() {
        for permission in [Permission::OrgRead, Permission::OrgAdmin] {
            let value = serde_json::to_value(permission).unwrap_or_else(|_| unreachable!());
            assert_eq!(value, serde_json::json!(permission.as_str()));
        }
    }

    #[test]
    fn serialized_namespaces_match_report_values() {
        for namespace in [Namespace::Organization, Namespace::Member] {
            let value = serde_json::to_value(namespace).unwrap_or_else(|_| unreachable!());
            assert_eq!(value, serde_json::json!(namespace.as_str()));
        }
    }
}
