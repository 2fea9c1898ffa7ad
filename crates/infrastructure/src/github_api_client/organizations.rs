use std::str::FromStr;

use async_trait::async_trait;
use orgscope_application::{OrganizationSource, Page, PageToken, paginate_results};
use orgscope_core::AppResult;
use orgscope_domain::{OrgRole, Organization, OrganizationPlan};
use tracing::warn;

use super::GithubApiClient;
use super::responses::{MembershipResponse, OrganizationResponse};

impl GithubApiClient {
    async fn fetch_memberships(
        &self,
        page: Option<PageToken>,
    ) -> AppResult<Page<MembershipResponse>> {
        let mut url = self.endpoint(&["user", "memberships", "orgs"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("state", "active")
                .append_pair("per_page", self.page_size.to_string().as_str());
            if let Some(page) = page.as_ref() {
                query.append_pair("page", page.as_str());
            }
        }

        let (items, next_page) = self
            .fetch_json::<Vec<MembershipResponse>>(
                self.http_client.get(url),
                "organization memberships endpoint",
            )
            .await?;

        Ok(Page { items, next_page })
    }

    async fn fetch_organization(&self, login: &str) -> AppResult<OrganizationResponse> {
        let url = self.endpoint(&["orgs", login])?;
        let (organization, _) = self
            .fetch_json::<OrganizationResponse>(self.http_client.get(url), "organization endpoint")
            .await?;
        Ok(organization)
    }

    fn is_selected(&self, login: &str) -> bool {
        self.organizations.is_empty()
            || self
                .organizations
                .iter()
                .any(|selected| selected.eq_ignore_ascii_case(login))
    }
}

#[async_trait]
impl OrganizationSource for GithubApiClient {
    async fn list_organizations(&self) -> AppResult<Vec<Organization>> {
        let memberships = paginate_results(|page| self.fetch_memberships(page)).await;
        if let Some(error) = memberships.error {
            return Err(error);
        }

        let mut organizations = Vec::new();
        for membership in memberships.items {
            let login = membership.organization.login;
            if !self.is_selected(login.as_str()) {
                continue;
            }

            // Billing managers are not members and cannot list members.
            let role = match OrgRole::from_str(membership.role.as_str()) {
                Ok(role) => role,
                Err(error) => {
                    warn!(
                        organization = %login,
                        role = %membership.role,
                        error = %error,
                        "skipping organization with unsupported membership role"
                    );
                    continue;
                }
            };

            // The plan is only visible to owners; a missing plan is reported downstream.
            let organization = match self.fetch_organization(login.as_str()).await {
                Ok(details) => {
                    let organization = Organization::new(login.as_str(), details.html_url, role)?;
                    match details.plan {
                        Some(plan) => organization.with_plan(OrganizationPlan::new(plan.name)),
                        None => organization,
                    }
                }
                Err(error) => {
                    warn!(
                        organization = %login,
                        error = %error,
                        "failed to read organization details"
                    );
                    Organization::new(login.as_str(), self.web_url(login.as_str()), role)?
                }
            };

            organizations.push(organization);
        }

        Ok(organizations)
    }
}
