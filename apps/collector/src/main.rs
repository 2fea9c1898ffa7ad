//! Orgscope organization member collector.

#![forbid(unsafe_code)]

mod config;

use std::sync::Arc;

use orgscope_application::{
    AuditLogReader, MemberCollector, MemberCollectorOptions, MemberDirectory, OrganizationSource,
};
use orgscope_core::{AppError, AppResult, RunId};
use orgscope_domain::{CollectedRecord, CollectionMetadata, MissingPermission, OrganizationPlan};
use orgscope_infrastructure::{
    GithubApiClient, GithubApiConfig, InMemoryOrganizationDirectory, TracingCollectionDiagnostics,
};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{CollectorConfig, CollectorSource};

#[derive(Debug, Serialize)]
struct CollectionReport {
    run_id: RunId,
    metadata: CollectionMetadata,
    records: Vec<CollectedRecord>,
    missing_permissions: Vec<MissingPermission>,
    progress: ProgressReport,
}

#[derive(Debug, Serialize)]
struct ProgressReport {
    total: u64,
    collected: u64,
}

struct Sources {
    organizations: Arc<dyn OrganizationSource>,
    members: Arc<dyn MemberDirectory>,
    audit_log: Arc<dyn AuditLogReader>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = CollectorConfig::load()?;
    let run_id = RunId::new();
    let sources = build_sources(&config).await?;

    let collector = MemberCollector::new(
        sources.organizations,
        sources.members,
        sources.audit_log,
        Arc::new(TracingCollectionDiagnostics::new()),
    )
    .with_options(MemberCollectorOptions {
        retain_inactive_members: config.retain_inactive_members,
        max_concurrency: config.max_concurrency,
    });

    info!(
        run_id = %run_id,
        namespace = collector.namespace().as_str(),
        organizations = config.organizations.len(),
        max_concurrency = ?config.max_concurrency,
        retain_inactive_members = config.retain_inactive_members,
        "orgscope-collector started"
    );

    let metadata = collector.collect_metadata().await;
    collector.progress().total_change(metadata.total_entities);

    let mut receiver = collector.collect();
    let mut records = Vec::new();
    while let Some(record) = receiver.recv().await {
        info!(
            run_id = %run_id,
            organization = %record.data.organization.login(),
            role = record.data.organization.role().as_str(),
            plan = record
                .data
                .organization
                .plan()
                .map_or("unknown", OrganizationPlan::name),
            members = record.data.members.len(),
            has_last_active = record.data.has_last_active,
            "organization members collected"
        );
        records.push(record);
    }

    let missing_permissions = collector.missing_permissions().snapshot().await;
    let progress = collector.progress().snapshot();

    for fact in &missing_permissions {
        warn!(
            run_id = %run_id,
            permission = fact.permission().as_str(),
            namespace = fact.namespace().as_str(),
            entity = %fact.entity_name(),
            effect = %fact.effect(),
            "missing permission"
        );
    }

    info!(
        run_id = %run_id,
        records = records.len(),
        missing_permissions = missing_permissions.len(),
        total = progress.total,
        collected = progress.collected,
        "orgscope-collector finished"
    );

    let report = CollectionReport {
        run_id,
        metadata,
        records,
        missing_permissions,
        progress: ProgressReport {
            total: progress.total,
            collected: progress.collected,
        },
    };
    let output = serde_json::to_string_pretty(&report).map_err(|error| {
        AppError::Internal(format!("failed to serialize collection report: {error}"))
    })?;
    println!("{output}");

    Ok(())
}

async fn build_sources(config: &CollectorConfig) -> AppResult<Sources> {
    match &config.source {
        CollectorSource::Fixture { path } => {
            let directory = Arc::new(
                InMemoryOrganizationDirectory::from_path(path)
                    .await?
                    .retain_organizations(config.organizations.as_slice()),
            );
            info!(fixture = %path.display(), "using fixture organization directory");
            Ok(Sources {
                organizations: directory.clone(),
                members: directory.clone(),
                audit_log: directory,
            })
        }
        CollectorSource::Github {
            api_url,
            token,
            page_size,
            http_timeout,
        } => {
            let http_client = reqwest::Client::builder()
                .timeout(*http_timeout)
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build HTTP client: {error}"))
                })?;
            let client = Arc::new(GithubApiClient::new(
                http_client,
                GithubApiConfig {
                    api_url: api_url.clone(),
                    token: token.clone(),
                    page_size: *page_size,
                    organizations: config.organizations.clone(),
                },
            )?);
            info!(api_url = %api_url, "using GitHub organization directory");
            Ok(Sources {
                organizations: client.clone(),
                members: client.clone(),
                audit_log: client,
            })
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
