use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct MembershipResponse {
    pub(super) role: String,
    pub(super) organization: OrganizationSummaryResponse,
}

#[derive(Debug, Deserialize)]
pub(super) struct OrganizationSummaryResponse {
    pub(super) login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct OrganizationResponse {
    pub(super) html_url: String,
    #[serde(default)]
    pub(super) plan: Option<PlanResponse>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlanResponse {
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserResponse {
    pub(super) login: String,
    #[serde(default)]
    pub(super) html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuditEntryResponse {
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "@timestamp", default)]
    pub(super) timestamp: Option<i64>,
    #[serde(default)]
    pub(super) created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlResponse<T> {
    pub(super) data: Option<T>,
    #[serde(default)]
    pub(super) errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlError {
    pub(super) message: String,
    #[serde(default, rename = "type")]
    pub(super) error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MemberCountData {
    pub(super) organization: Option<MemberCountOrganization>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MemberCountOrganization {
    pub(super) members_with_role: TotalCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TotalCount {
    pub(super) total_count: u64,
}
