//! GleSys wire types (private).
//!
//! Shapes match the GleSys JSON envelope: every response is
//! `{"response": {"status": {...}, <payload>...}}` with the payload key
//! varying per action.

use serde::Deserialize;

/// The GleSys response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GlesysResponse<T> {
    pub response: GlesysResponseBody<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysResponseBody<T> {
    pub status: GlesysStatus,
    #[serde(flatten)]
    pub content: T,
}

/// Per-response status block. `code` mirrors HTTP status semantics.
#[derive(Debug, Deserialize)]
pub(crate) struct GlesysStatus {
    pub code: u32,
    #[serde(default)]
    pub text: String,
}

// ---- email/overview ----

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysOverviewContent {
    pub overview: GlesysOverview,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysOverview {
    pub summary: GlesysOverviewSummary,
    #[serde(default)]
    pub domains: Vec<GlesysOverviewDomain>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysOverviewSummary {
    pub accounts: u32,
    pub maxaccounts: u32,
    pub aliases: u32,
    pub maxaliases: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysOverviewDomain {
    pub domain: String,
    pub accounts: u32,
    pub aliases: u32,
}

// ---- email/list ----

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysEmailListContent {
    pub list: GlesysEmailList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysEmailList {
    #[serde(default)]
    pub emailaccounts: Vec<GlesysEmailAccount>,
}

/// One mailbox as GleSys reports it. Booleans come as `"yes"`/`"no"`.
#[derive(Debug, Deserialize)]
pub(crate) struct GlesysEmailAccount {
    pub emailaccount: String,
    #[serde(default)]
    pub quota: Option<GlesysQuota>,
    #[serde(default)]
    pub usedquota: Option<GlesysQuota>,
    #[serde(default)]
    pub antispamlevel: Option<u8>,
    #[serde(default)]
    pub antivirus: Option<String>,
    #[serde(default)]
    pub autorespond: Option<String>,
    #[serde(default)]
    pub autorespondmessage: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlesysQuota {
    pub amount: u32,
    pub unit: String,
}
