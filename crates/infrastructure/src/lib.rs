//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod github_api_client;
mod in_memory_organization_directory;
mod tracing_collection_diagnostics;

pub use github_api_client::{GithubApiClient, GithubApiConfig};
pub use in_memory_organization_directory::{
    DirectoryFixture, InMemoryOrganizationDirectory, OrganizationFixture,
};
pub use tracing_collection_diagnostics::TracingCollectionDiagnostics;
