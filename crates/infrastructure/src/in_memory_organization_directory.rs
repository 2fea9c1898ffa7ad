//! Fixture backed organization directory for offline runs and tests.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgscope_application::{
    AuditLogReader, MemberDirectory, MemberPage, OrganizationSource, Page, PageToken,
};
use orgscope_core::{AppError, AppResult};
use orgscope_domain::{Member, MemberRole, OrgRole, Organization, OrganizationPlan};
use serde::Deserialize;

const DEFAULT_PAGE_SIZE: usize = 30;

/// Serialized form of a fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryFixture {
    /// Members returned per page; defaults to 30.
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Organizations in listing order.
    pub organizations: Vec<OrganizationFixture>,
}

/// One organization in a fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationFixture {
    /// Organization login.
    pub login: String,
    /// Organization web URL; derived from the login when absent.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Role of the collecting credential.
    pub role: OrgRole,
    /// Plan name; absent when the plan is not readable.
    #[serde(default)]
    pub plan: Option<String>,
    /// Regular member logins.
    #[serde(default)]
    pub members: Vec<String>,
    /// Owner logins.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Reported member count; `None` makes the count query fail.
    #[serde(default)]
    pub member_count: Option<u64>,
    /// Most recent audit event per member login.
    #[serde(default)]
    pub last_active: HashMap<String, DateTime<Utc>>,
    /// Makes every audit log query fail with a privilege error.
    #[serde(default)]
    pub audit_denied: bool,
}

struct OrganizationEntry {
    organization: Organization,
    members: HashMap<MemberRole, Vec<Member>>,
    member_count: Option<u64>,
    last_active: HashMap<String, DateTime<Utc>>,
    audit_denied: bool,
}

/// In-memory implementation of the collector source ports.
pub struct InMemoryOrganizationDirectory {
    page_size: usize,
    order: Vec<String>,
    entries: HashMap<String, OrganizationEntry>,
}

impl InMemoryOrganizationDirectory {
    /// Builds a directory from a parsed fixture.
    pub fn from_fixture(fixture: DirectoryFixture) -> AppResult<Self> {
        let page_size = fixture.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(AppError::Validation(
                "fixture page_size must be greater than zero".to_owned(),
            ));
        }

        let mut order = Vec::with_capacity(fixture.organizations.len());
        let mut entries = HashMap::with_capacity(fixture.organizations.len());
        for organization_fixture in fixture.organizations {
            let html_url = organization_fixture
                .html_url
                .clone()
                .unwrap_or_else(|| format!("https://github.com/{}", organization_fixture.login));
            let mut organization = Organization::new(
                organization_fixture.login.as_str(),
                html_url,
                organization_fixture.role,
            )?;
            if let Some(plan) = organization_fixture.plan {
                organization = organization.with_plan(OrganizationPlan::new(plan));
            }

            let members = HashMap::from([
                (MemberRole::Member, to_members(organization_fixture.members)?),
                (MemberRole::Admin, to_members(organization_fixture.admins)?),
            ]);

            let login = organization.login().to_owned();
            if entries.contains_key(&login) {
                return Err(AppError::Validation(format!(
                    "organization '{login}' appears twice in fixture"
                )));
            }

            order.push(login.clone());
            entries.insert(
                login,
                OrganizationEntry {
                    organization,
                    members,
                    member_count: organization_fixture.member_count,
                    last_active: organization_fixture.last_active,
                    audit_denied: organization_fixture.audit_denied,
                },
            );
        }

        Ok(Self {
            page_size,
            order,
            entries,
        })
    }

    /// Reads and parses a JSON fixture file.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Validation(format!(
                "failed to read fixture '{}': {error}",
                path.display()
            ))
        })?;
        let fixture = serde_json::from_str::<DirectoryFixture>(content.as_str()).map_err(|error| {
            AppError::Validation(format!(
                "failed to parse fixture '{}': {error}",
                path.display()
            ))
        })?;

        Self::from_fixture(fixture)
    }

    /// Keeps only the listed organizations; an empty selection keeps all of them.
    #[must_use]
    pub fn retain_organizations(mut self, selected: &[String]) -> Self {
        if !selected.is_empty() {
            self.order.retain(|login| {
                selected
                    .iter()
                    .any(|selected| selected.eq_ignore_ascii_case(login))
            });
        }
        self
    }

    fn entry(&self, organization: &str) -> AppResult<&OrganizationEntry> {
        self.entries
            .get(organization)
            .ok_or_else(|| AppError::NotFound(format!("organization '{organization}'")))
    }
}

fn to_members(logins: Vec<String>) -> AppResult<Vec<Member>> {
    logins.into_iter().map(Member::new).collect()
}

#[async_trait]
impl OrganizationSource for InMemoryOrganizationDirectory {
    async fn list_organizations(&self) -> AppResult<Vec<Organization>> {
        self.order
            .iter()
            .map(|login| self.entry(login).map(|entry| entry.organization.clone()))
            .collect()
    }
}

#[async_trait]
impl MemberDirectory for InMemoryOrganizationDirectory {
    async fn list_members(
        &self,
        organization: &str,
        role: MemberRole,
        page: Option<PageToken>,
    ) -> AppResult<MemberPage> {
        let entry = self.entry(organization)?;
        let offset = match page {
            Some(token) => token.as_str().parse::<usize>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid page token '{}': {error}",
                    token.as_str()
                ))
            })?,
            None => 0,
        };

        let members = entry.members.get(&role).map(Vec::as_slice).unwrap_or(&[]);
        let end = offset.saturating_add(self.page_size).min(members.len());
        let items = members.get(offset..end).unwrap_or(&[]).to_vec();

        if end < members.len() {
            Ok(Page::with_next(items, PageToken::new(end.to_string())))
        } else {
            Ok(Page::last(items))
        }
    }

    async fn count_members(&self, organization: &str) -> AppResult<u64> {
        self.entry(organization)?.member_count.ok_or_else(|| {
            AppError::Forbidden(format!(
                "member count of organization '{organization}' is not readable"
            ))
        })
    }
}

#[async_trait]
impl AuditLogReader for InMemoryOrganizationDirectory {
    async fn last_active(
        &self,
        organization: &str,
        actor: &str,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let entry = self.entry(organization)?;
        if entry.audit_denied {
            return Err(AppError::Forbidden(format!(
                "audit log of organization '{organization}' requires admin:org"
            )));
        }

        Ok(entry.last_active.get(actor).copied())
    }
}

#[cfg(test)]
mod tests;
