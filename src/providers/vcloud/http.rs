//! vCloud HTTP request methods.

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{VcloudTaskClient, AUTH_HEADER, MAX_RETRIES, TASK_MEDIA_TYPE};

impl VcloudTaskClient {
    /// The session token, logging in on first use.
    ///
    /// The token is cached until the server rejects it; the login lock
    /// is held across the request so concurrent first calls share a
    /// single login.
    pub(crate) async fn session_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if let Some(cached) = token.as_ref() {
            return Ok(cached.clone());
        }
        let fresh = self.login().await?;
        *token = Some(fresh.clone());
        Ok(fresh)
    }

    /// Drop the cached session token so the next call logs in again.
    pub(crate) async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    /// Open a vCloud session.
    ///
    /// `POST /login` under HTTP Basic auth; the server answers with the
    /// session token in the `x-vcloud-authorization` response header.
    /// Handled outside [`HttpUtils`] because the token lives in a
    /// header, not the body.
    async fn login(&self) -> Result<String> {
        let url = format!("{}/login", self.endpoint);
        log::debug!("[{}] POST {url}", self.provider_name());

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.identity, Some(&self.credential))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        provider: self.provider_name().to_string(),
                        detail: e.to_string(),
                    }
                } else {
                    ProviderError::NetworkError {
                        provider: self.provider_name().to_string(),
                        detail: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(self.map_error(
                RawApiError::with_code(status.to_string(), body),
                ErrorContext::default(),
            ));
        }

        let token = response
            .headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                self.parse_error(format!("Login response missing {AUTH_HEADER} header"))
            })?;

        log::info!("[{}] Session established for {}", self.provider_name(), self.identity);
        Ok(token)
    }

    /// `GET` an XML representation under the active session.
    ///
    /// A 401 on a previously valid token means the session expired; the
    /// token is dropped and the request repeated once under a fresh
    /// login before the error is surfaced.
    pub(crate) async fn get_xml<T: DeserializeOwned>(
        &self,
        url: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let mut relogin_attempted = false;
        loop {
            let token = self.session_token().await?;
            let builder = self
                .client
                .get(url)
                .header(AUTH_HEADER, token)
                .header(ACCEPT, TASK_MEDIA_TYPE);

            let (status, text) = HttpUtils::execute_request_with_retry(
                builder,
                self.provider_name(),
                "GET",
                url,
                MAX_RETRIES,
            )
            .await?;

            if status == 401 && !relogin_attempted {
                log::info!("[{}] Session rejected, logging in again", self.provider_name());
                self.invalidate_token().await;
                relogin_attempted = true;
                continue;
            }

            if status != 200 {
                return Err(
                    self.map_error(RawApiError::with_code(status.to_string(), text), context)
                );
            }

            return HttpUtils::parse_xml(&text, self.provider_name());
        }
    }

    /// `POST` to an action URL under the active session, expecting no
    /// usable payload. Not retried on transient errors; actions are not
    /// idempotent. An expired session is renewed once, as in
    /// [`Self::get_xml`].
    pub(crate) async fn post_action(&self, url: &str, context: ErrorContext) -> Result<()> {
        let mut relogin_attempted = false;
        loop {
            let token = self.session_token().await?;
            let builder = self.client.post(url).header(AUTH_HEADER, token);

            let (status, text) =
                HttpUtils::execute_request(builder, self.provider_name(), "POST", url).await?;

            if status == 401 && !relogin_attempted {
                log::info!("[{}] Session rejected, logging in again", self.provider_name());
                self.invalidate_token().await;
                relogin_attempted = true;
                continue;
            }

            if !(200..300).contains(&status) {
                return Err(
                    self.map_error(RawApiError::with_code(status.to_string(), text), context)
                );
            }

            return Ok(());
        }
    }
}
