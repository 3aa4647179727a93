//! VMware vCloud task client.

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::providers::common::create_http_client;

pub(crate) use types::{VcloudError, VcloudReference, VcloudTask};

/// Media type of a vCloud task representation.
pub(crate) const TASK_MEDIA_TYPE: &str = "application/vnd.vmware.vcloud.task+xml";
/// Session token header, set by the login response and echoed on every
/// subsequent request.
pub(crate) const AUTH_HEADER: &str = "x-vcloud-authorization";
/// Retries applied to read-only task fetches (transient errors only).
pub(crate) const MAX_RETRIES: u32 = 2;

/// VMware vCloud task client.
///
/// Speaks the vCloud REST API: a session is opened by POSTing to
/// `/login` with HTTP Basic auth (`user@organization` identity), after
/// which the server-issued token authenticates each request. When the
/// server rejects a cached token (session expiry), the client logs in
/// again once before surfacing the error. Task representations are XML.
pub struct VcloudTaskClient {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) identity: String,
    pub(crate) credential: String,
    /// Session token, established lazily on first use and dropped when
    /// the server rejects it.
    pub(crate) token: Mutex<Option<String>>,
}

impl VcloudTaskClient {
    pub fn new(endpoint: String, identity: String, credential: String) -> Self {
        Self {
            client: create_http_client(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            identity,
            credential,
            token: Mutex::new(None),
        }
    }
}
