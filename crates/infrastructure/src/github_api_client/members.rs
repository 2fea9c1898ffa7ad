use async_trait::async_trait;
use orgscope_application::{MemberDirectory, MemberPage, PageToken};
use orgscope_core::{AppError, AppResult};
use orgscope_domain::{Member, MemberRole};

use super::GithubApiClient;
use super::responses::{GraphqlResponse, MemberCountData, UserResponse};

const MEMBER_COUNT_QUERY: &str = "query($login: String!) { \
    organization(login: $login) { membersWithRole(first: 1) { totalCount } } }";

impl GithubApiClient {
    fn to_member(user: UserResponse) -> AppResult<Member> {
        let member = Member::new(user.login)?;
        Ok(match user.html_url {
            Some(html_url) => member.with_html_url(html_url),
            None => member,
        })
    }
}

#[async_trait]
impl MemberDirectory for GithubApiClient {
    async fn list_members(
        &self,
        organization: &str,
        role: MemberRole,
        page: Option<PageToken>,
    ) -> AppResult<MemberPage> {
        let mut url = self.endpoint(&["orgs", organization, "members"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("role", role.as_str())
                .append_pair("per_page", self.page_size.to_string().as_str());
            if let Some(page) = page.as_ref() {
                query.append_pair("page", page.as_str());
            }
        }

        let (users, next_page) = self
            .fetch_json::<Vec<UserResponse>>(
                self.http_client.get(url),
                "organization members endpoint",
            )
            .await?;

        let items = users
            .into_iter()
            .map(Self::to_member)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(MemberPage { items, next_page })
    }

    async fn count_members(&self, organization: &str) -> AppResult<u64> {
        let request = self.http_client.post(self.graphql_url.clone()).json(&serde_json::json!({
            "query": MEMBER_COUNT_QUERY,
            "variables": { "login": organization },
        }));

        let (response, _) = self
            .fetch_json::<GraphqlResponse<MemberCountData>>(request, "GraphQL member count query")
            .await?;

        if let Some(error) = response.errors.first() {
            let message = format!(
                "member count query for '{organization}' failed: {}",
                error.message
            );
            return Err(match error.error_type.as_deref() {
                Some("FORBIDDEN") => AppError::Forbidden(message),
                Some("NOT_FOUND") => AppError::NotFound(message),
                _ => AppError::Unavailable(message),
            });
        }

        response
            .data
            .and_then(|data| data.organization)
            .map(|organization| organization.members_with_role.total_count)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "member count query returned no organization '{organization}'"
                ))
            })
    }
}
