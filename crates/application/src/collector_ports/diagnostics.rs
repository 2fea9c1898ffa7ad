use orgscope_core::AppError;
use orgscope_domain::MemberRole;

/// Structured diagnostics emitted while collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Listing organizations failed and the run was abandoned.
    OrganizationsUnavailable {
        /// Listing error.
        error: AppError,
    },
    /// A member page failed; earlier pages were kept.
    MemberPageFailed {
        /// Organization login.
        organization: String,
        /// Category being listed.
        role: MemberRole,
        /// Members collected before the failure.
        collected: usize,
        /// Page error.
        error: AppError,
    },
    /// The member count query failed and the organization counted as zero.
    MemberCountFailed {
        /// Organization login.
        organization: String,
        /// Query error.
        error: AppError,
    },
    /// The last active lookup of a member failed.
    LastActiveFailed {
        /// Organization login.
        organization: String,
        /// Member login.
        member: String,
        /// Lookup error.
        error: AppError,
    },
    /// A missing permission fact could not be built.
    MissingPermissionRejected {
        /// Entity the fact was about.
        entity_name: String,
        /// Validation error.
        error: AppError,
    },
    /// Nobody is listening for collected records anymore.
    RecordReceiverClosed {
        /// Organization whose record was not delivered.
        organization: String,
    },
    /// A concurrent unit of work aborted.
    UnitAborted {
        /// Join error description.
        message: String,
    },
}

/// Sink for collection diagnostics, injected into every collector.
pub trait CollectionDiagnostics: Send + Sync {
    /// Records one event.
    fn record(&self, event: DiagnosticEvent);
}
