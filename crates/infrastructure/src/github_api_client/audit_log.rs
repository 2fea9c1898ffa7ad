use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use orgscope_application::AuditLogReader;
use orgscope_core::AppResult;

use super::GithubApiClient;
use super::responses::AuditEntryResponse;

impl GithubApiClient {
    pub(super) fn entry_timestamp(entry: &AuditEntryResponse) -> Option<DateTime<Utc>> {
        entry
            .timestamp
            .or(entry.created_at)
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }
}

#[async_trait]
impl AuditLogReader for GithubApiClient {
    /// Reads the newest web or git event of `actor`. Requires an enterprise organization.
    async fn last_active(
        &self,
        organization: &str,
        actor: &str,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let mut url = self.endpoint(&["orgs", organization, "audit-log"])?;
        url.query_pairs_mut()
            .append_pair("phrase", format!("actor:{actor}").as_str())
            .append_pair("include", "all")
            .append_pair("order", "desc")
            .append_pair("per_page", "1");

        let (entries, _) = self
            .fetch_json::<Vec<AuditEntryResponse>>(
                self.http_client.get(url),
                "organization audit log endpoint",
            )
            .await?;

        Ok(entries.first().and_then(Self::entry_timestamp))
    }
}
