use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgscope_core::AppResult;
use orgscope_domain::{Member, MemberRole, Organization};

/// Opaque continuation state handed back to the next page request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    /// Wraps a service provided continuation value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the continuation value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records in service order.
    pub items: Vec<T>,
    /// Continuation for the following page, absent on the last page.
    pub next_page: Option<PageToken>,
}

impl<T> Page<T> {
    /// Creates the final page of a listing.
    #[must_use]
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page: None,
        }
    }

    /// Creates a page followed by another one.
    #[must_use]
    pub fn with_next(items: Vec<T>, next_page: PageToken) -> Self {
        Self {
            items,
            next_page: Some(next_page),
        }
    }
}

/// One page of organization members.
pub type MemberPage = Page<Member>;

/// Port listing the organizations visible to the collecting credential.
#[async_trait]
pub trait OrganizationSource: Send + Sync {
    /// Returns every organization to scan.
    async fn list_organizations(&self) -> AppResult<Vec<Organization>>;
}

/// Port over the member listing of an organization.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Fetches one page of members holding the given role.
    async fn list_members(
        &self,
        organization: &str,
        role: MemberRole,
        page: Option<PageToken>,
    ) -> AppResult<MemberPage>;

    /// Returns the service reported member count using a single lightweight query.
    async fn count_members(&self, organization: &str) -> AppResult<u64>;
}

/// Port over the organization audit log.
#[async_trait]
pub trait AuditLogReader: Send + Sync {
    /// Returns the timestamp of the most recent event whose actor is `actor`.
    ///
    /// `Ok(None)` means the query succeeded and matched nothing.
    async fn last_active(
        &self,
        organization: &str,
        actor: &str,
    ) -> AppResult<Option<DateTime<Utc>>>;
}
