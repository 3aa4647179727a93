//! GleSys e-mail provider.

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;

pub(crate) use types::{GlesysEmailListContent, GlesysOverviewContent, GlesysResponse};

pub(crate) const GLESYS_API_BASE: &str = "https://api.glesys.com";
/// Retries applied to every GleSys call (transient errors only).
pub(crate) const MAX_RETRIES: u32 = 2;

/// GleSys e-mail provider.
///
/// Speaks the GleSys REST API: form-encoded `POST` requests
/// authenticated with HTTP Basic auth (account username + API key),
/// JSON responses wrapped in the GleSys status envelope.
pub struct GlesysProvider {
    pub(crate) client: Client,
    pub(crate) username: String,
    pub(crate) api_key: String,
}

impl GlesysProvider {
    pub fn new(username: String, api_key: String) -> Self {
        Self {
            client: create_http_client(),
            username,
            api_key,
        }
    }
}
