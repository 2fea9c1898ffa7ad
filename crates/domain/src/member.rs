//! Organization members and their derived activity.

use chrono::{DateTime, Utc};
use orgscope_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Category a member is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Regular member.
    Member,
    /// Organization owner.
    Admin,
}

impl MemberRole {
    /// Returns the listing filter value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    /// Returns every role in the order members are collected.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[MemberRole] = &[MemberRole::Member, MemberRole::Admin];

        ALL
    }
}

/// A user record as returned by the member listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    login: NonEmptyString,
    html_url: Option<String>,
}

impl Member {
    /// Creates a member from its login.
    pub fn new(login: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            login: NonEmptyString::new(login)?,
            html_url: None,
        })
    }

    /// Attaches the member profile URL.
    #[must_use]
    pub fn with_html_url(mut self, html_url: impl Into<String>) -> Self {
        self.html_url = Some(html_url.into());
        self
    }

    /// Returns the member login.
    #[must_use]
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Returns the member profile URL, if known.
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        self.html_url.as_deref()
    }
}

/// Last time a member was seen in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "at", rename_all = "snake_case")]
pub enum LastActive {
    /// The organization cannot provide audit data, nothing was looked up.
    NotComputed,
    /// The lookup succeeded and found no activity.
    Never,
    /// Timestamp of the most recent audit event for the member.
    At(DateTime<Utc>),
}

impl LastActive {
    /// Builds the value from the most recent audit event timestamp.
    ///
    /// A missing event and an epoch timestamp both mean no observed activity.
    #[must_use]
    pub fn from_latest_event(timestamp: Option<DateTime<Utc>>) -> Self {
        match timestamp {
            Some(timestamp) if timestamp != DateTime::<Utc>::UNIX_EPOCH => Self::At(timestamp),
            _ => Self::Never,
        }
    }

    /// Returns true when activity was observed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Returns the legacy numeric encoding: `-1` not computed, `0` never, nanos otherwise.
    #[must_use]
    pub fn as_unix_nanos(&self) -> i64 {
        match self {
            Self::NotComputed => -1,
            Self::Never => 0,
            Self::At(timestamp) => timestamp.timestamp_nanos_opt().unwrap_or(i64::MAX),
        }
    }
}

/// A member after enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMember {
    member: Member,
    role: MemberRole,
    last_active: LastActive,
}

impl OrganizationMember {
    /// Creates an enriched member.
    #[must_use]
    pub fn new(member: Member, role: MemberRole, last_active: LastActive) -> Self {
        Self {
            member,
            role,
            last_active,
        }
    }

    /// Returns the listed member.
    #[must_use]
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Returns the category the member was listed under.
    #[must_use]
    pub fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns the derived activity.
    #[must_use]
    pub fn last_active(&self) -> LastActive {
        self.last_active
    }
}
