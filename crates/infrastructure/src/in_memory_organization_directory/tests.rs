use std::sync::Arc;

use orgscope_application::{
    AuditLogReader, CollectionDiagnostics, DiagnosticEvent, MemberCollector, MemberDirectory,
    OrganizationSource, PageToken, paginate_results,
};
use orgscope_core::AppError;
use orgscope_domain::{LastActive, MemberRole};

use super::{DirectoryFixture, InMemoryOrganizationDirectory};

struct SilentDiagnostics;

impl CollectionDiagnostics for SilentDiagnostics {
    fn record(&self, _event: DiagnosticEvent) {}
}

fn directory(json: serde_json::Value) -> InMemoryOrganizationDirectory {
    let fixture = serde_json::from_value::<DirectoryFixture>(json);
    assert!(fixture.is_ok());
    let directory =
        InMemoryOrganizationDirectory::from_fixture(fixture.unwrap_or_else(|_| unreachable!()));
    assert!(directory.is_ok());
    directory.unwrap_or_else(|_| unreachable!())
}

fn sample_directory() -> InMemoryOrganizationDirectory {
    directory(serde_json::json!({
        "page_size": 2,
        "organizations": [
            {
                "login": "acme",
                "role": "admin",
                "plan": "enterprise",
                "members": ["alice", "bob", "carol"],
                "admins": ["root"],
                "member_count": 4,
                "last_active": { "alice": "2024-05-01T10:00:00Z" }
            },
            {
                "login": "globex",
                "html_url": "https://github.example.com/globex",
                "role": "member",
                "members": ["erin"],
                "audit_denied": true
            }
        ]
    }))
}

#[tokio::test]
async fn organizations_keep_fixture_order() {
    let directory = sample_directory();

    let organizations = directory.list_organizations().await;
    assert!(organizations.is_ok());
    let organizations = organizations.unwrap_or_default();

    assert_eq!(organizations.len(), 2);
    assert_eq!(organizations[0].login(), "acme");
    assert!(organizations[0].is_enterprise());
    assert_eq!(organizations[0].html_url(), "https://github.com/acme");
    assert!(organizations[1].plan().is_none());
    assert_eq!(organizations[1].html_url(), "https://github.example.com/globex");
}

#[tokio::test]
async fn members_are_paged_by_offset_tokens() {
    let directory = sample_directory();

    let first = directory.list_members("acme", MemberRole::Member, None).await;
    assert!(first.is_ok());
    let first = first.unwrap_or_else(|_| unreachable!());
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.next_page, Some(PageToken::new("2")));

    let results =
        paginate_results(|page| directory.list_members("acme", MemberRole::Member, page)).await;
    let logins: Vec<&str> = results.items.iter().map(|member| member.login()).collect();
    assert_eq!(logins, vec!["alice", "bob", "carol"]);
    assert_eq!(results.pages, 2);
}

#[tokio::test]
async fn missing_count_and_denied_audit_are_errors() {
    let directory = sample_directory();

    assert_eq!(directory.count_members("acme").await, Ok(4));
    assert!(matches!(
        directory.count_members("globex").await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        directory.last_active("globex", "erin").await,
        Err(AppError::Forbidden(_))
    ));
    assert_eq!(directory.last_active("acme", "bob").await, Ok(None));
}

#[tokio::test]
async fn duplicate_organizations_are_rejected() {
    let fixture = serde_json::from_value::<DirectoryFixture>(serde_json::json!({
        "organizations": [
            { "login": "acme", "role": "admin" },
            { "login": "acme", "role": "member" }
        ]
    }));
    assert!(fixture.is_ok());

    let directory =
        InMemoryOrganizationDirectory::from_fixture(fixture.unwrap_or_else(|_| unreachable!()));
    assert!(directory.is_err());
}

#[tokio::test]
async fn fixture_drives_a_full_collection() {
    let directory = Arc::new(sample_directory());
    let collector = MemberCollector::new(
        directory.clone(),
        directory.clone(),
        directory,
        Arc::new(SilentDiagnostics),
    );

    let metadata = collector.collect_metadata().await;
    let mut receiver = collector.collect();
    let mut records = Vec::new();
    while let Some(record) = receiver.recv().await {
        records.push(record);
    }

    assert_eq!(metadata.total_entities, 4);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].data.members.len(), 1);
    assert!(matches!(
        records[0].data.members[0].last_active(),
        LastActive::At(_)
    ));
    assert_eq!(records[1].data.members.len(), 1);
    assert_eq!(
        records[1].data.members[0].last_active(),
        LastActive::NotComputed
    );
    assert_eq!(collector.missing_permissions().len().await, 1);
}

#[tokio::test]
async fn organization_selection_ignores_case() {
    let directory = sample_directory().retain_organizations(&["GLOBEX".to_owned()]);

    let organizations = directory.list_organizations().await.unwrap_or_default();

    assert_eq!(organizations.len(), 1);
    assert_eq!(organizations[0].login(), "globex");
}
