//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod member;
mod organization;
mod report;
mod security;

pub use member::{LastActive, Member, MemberRole, OrganizationMember};
pub use organization::{OrgRole, Organization, OrganizationPlan};
pub use report::{CollectedRecord, CollectionMetadata, MissingPermission, OrganizationMembers};
pub use security::{Namespace, Permission};
