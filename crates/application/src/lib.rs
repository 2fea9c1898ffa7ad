//! Application services and ports.

#![forbid(unsafe_code)]

mod collector_ports;
mod group_waiter;
mod member_collector;
mod missing_permissions;
mod pagination;
mod progress;

pub use collector_ports::{
    AuditLogReader, CollectionDiagnostics, DiagnosticEvent, MemberDirectory,
    MemberPage, OrganizationSource, Page, PageToken,
};
pub use group_waiter::GroupWaiter;
pub use member_collector::{MemberCollector, MemberCollectorOptions};
pub use missing_permissions::MissingPermissionTracker;
pub use pagination::{PaginatedResults, paginate_results};
pub use progress::{CollectionProgress, ProgressSnapshot};
