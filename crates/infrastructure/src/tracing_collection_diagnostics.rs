//! Collection diagnostics forwarded to tracing output.

use orgscope_application::{CollectionDiagnostics, DiagnosticEvent};
use tracing::{debug, warn};

/// Diagnostics adapter emitting structured tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCollectionDiagnostics;

impl TracingCollectionDiagnostics {
    /// Creates a new tracing diagnostics adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CollectionDiagnostics for TracingCollectionDiagnostics {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::OrganizationsUnavailable { error } => {
                warn!(error = %error, "failed to collect organizations");
            }
            DiagnosticEvent::MemberPageFailed {
                organization,
                role,
                collected,
                error,
            } => {
                warn!(
                    organization = %organization,
                    role = role.as_str(),
                    collected,
                    error = %error,
                    "error collecting members, keeping earlier pages"
                );
            }
            DiagnosticEvent::MemberCountFailed {
                organization,
                error,
            } => {
                debug!(
                    organization = %organization,
                    error = %error,
                    "member count unavailable, counting as zero"
                );
            }
            DiagnosticEvent::LastActiveFailed {
                organization,
                member,
                error,
            } => {
                debug!(
                    organization = %organization,
                    member = %member,
                    error = %error,
                    "failed to collect member last active time"
                );
            }
            DiagnosticEvent::MissingPermissionRejected { entity_name, error } => {
                warn!(
                    entity_name = %entity_name,
                    error = %error,
                    "discarded invalid missing permission"
                );
            }
            DiagnosticEvent::RecordReceiverClosed { organization } => {
                warn!(
                    organization = %organization,
                    "record receiver closed, stopping collection"
                );
            }
            DiagnosticEvent::UnitAborted { message } => {
                warn!(error = %message, "collection unit aborted");
            }
        }
    }
}
