mod diagnostics;
mod sources;

pub use diagnostics::{CollectionDiagnostics, DiagnosticEvent};
pub use sources::{AuditLogReader, MemberDirectory, MemberPage, OrganizationSource, Page, PageToken};
