//! Organization member collection.
//!
//! Lists the members of every organization, looks up when each of them was
//! last active when the organization exposes an audit log, and reports the
//! privileges that prevented a complete picture.

use std::sync::Arc;

use orgscope_domain::Namespace;

use crate::collector_ports::{
    AuditLogReader, CollectionDiagnostics, MemberDirectory, OrganizationSource,
};
use crate::group_waiter::GroupWaiter;
use crate::missing_permissions::MissingPermissionTracker;
use crate::progress::CollectionProgress;

mod collect;
mod enrichment;
mod metadata;
mod permissions;

/// Capacity of the collected record stream.
const RECORD_BUFFER: usize = 16;

/// Tunables for [`MemberCollector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberCollectorOptions {
    /// Keep enterprise members without any audit event, tagged as never active.
    ///
    /// When disabled only members with observed activity are reported for
    /// organizations that support last active lookups.
    pub retain_inactive_members: bool,
    /// Upper bound on concurrent lookups; `None` runs one task per unit.
    pub max_concurrency: Option<usize>,
}

/// Collector for organization members.
#[derive(Clone)]
pub struct MemberCollector {
    organizations: Arc<dyn OrganizationSource>,
    members: Arc<dyn MemberDirectory>,
    audit_log: Arc<dyn AuditLogReader>,
    diagnostics: Arc<dyn CollectionDiagnostics>,
    missing_permissions: Arc<MissingPermissionTracker>,
    progress: Arc<CollectionProgress>,
    options: MemberCollectorOptions,
}

impl MemberCollector {
    /// Creates a member collector.
    #[must_use]
    pub fn new(
        organizations: Arc<dyn OrganizationSource>,
        members: Arc<dyn MemberDirectory>,
        audit_log: Arc<dyn AuditLogReader>,
        diagnostics: Arc<dyn CollectionDiagnostics>,
    ) -> Self {
        Self {
            organizations,
            members,
            audit_log,
            diagnostics,
            missing_permissions: Arc::new(MissingPermissionTracker::new()),
            progress: Arc::new(CollectionProgress::new()),
            options: MemberCollectorOptions::default(),
        }
    }

    /// Replaces the default options.
    #[must_use]
    pub fn with_options(mut self, options: MemberCollectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the namespace of the collected entities.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        Namespace::Member
    }

    /// Returns the tracker receiving privilege gaps.
    #[must_use]
    pub fn missing_permissions(&self) -> Arc<MissingPermissionTracker> {
        Arc::clone(&self.missing_permissions)
    }

    /// Returns the progress counters of this collector.
    #[must_use]
    pub fn progress(&self) -> Arc<CollectionProgress> {
        Arc::clone(&self.progress)
    }

    fn group_waiter(&self) -> GroupWaiter {
        GroupWaiter::new(Arc::clone(&self.diagnostics)).with_limit(self.options.max_concurrency)
    }
}
