use std::collections::HashSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateAccountOptions, EditAccountOptions, EmailAccount, EmailOverview, ProviderMetadata, Task,
};

/// Raw API error (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per provider).
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Context carried into error mapping (internal).
///
/// Providers fill in whichever fields the failing operation knows about
/// so mapped errors can name the affected resource.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// E-mail address (for `AccountExists`/`AccountNotFound` errors).
    pub address: Option<String>,
    /// Forwarding target of an alias operation. A missing target is an
    /// `InvalidParameter` on `goto`, not a missing account.
    pub target: Option<String>,
    /// Domain name (for `DomainNotFound` errors).
    pub domain: Option<String>,
    /// Task identifier or href (for `TaskNotFound` errors).
    pub task_id: Option<String>,
}

/// Provider error mapping trait (internal).
///
/// Each adapter implements this to map raw API errors to the unified
/// error type.
pub(crate) trait ProviderErrorMapper {
    /// Returns the provider identifier.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// E-mail management capability.
///
/// Six remote operations against one provider's email subsystem. Each
/// method is a single blocking (from the caller's viewpoint) remote
/// call executed under the shared runtime's fixed 30-second timeout;
/// there is no client-side state or caching, only server-owned
/// snapshots.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Type-level provider metadata (name, credential fields, capabilities).
    ///
    /// Does not require an instance; callable before construction.
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Verify that the configured credentials are accepted by the remote API.
    async fn validate_credentials(&self) -> Result<bool>;

    /// Get a summary of the e-mail accounts and aliases associated with
    /// this account.
    ///
    /// Fails with [`ProviderError::InvalidCredentials`] if the session
    /// is invalid.
    async fn email_overview(&self) -> Result<EmailOverview>;

    /// List the mail accounts configured for `domain`.
    ///
    /// The domain must already be registered with the account. Returns
    /// an empty set — never an error — when the domain has no
    /// configured mailboxes.
    async fn list_accounts(&self, domain: &str) -> Result<HashSet<EmailAccount>>;

    /// Provision a new mailbox.
    ///
    /// Fails with [`ProviderError::AccountExists`] if the address is
    /// taken, or [`ProviderError::DomainNotFound`] if the domain is not
    /// owned by the caller.
    async fn create_account(
        &self,
        address: &str,
        password: &str,
        options: &CreateAccountOptions,
    ) -> Result<()>;

    /// Create an alias forwarding `alias_address` to `to_address`.
    ///
    /// The target must resolve to a real account. Fails with
    /// [`ProviderError::AccountExists`] if the alias is taken.
    async fn create_alias(&self, alias_address: &str, to_address: &str) -> Result<()>;

    /// Apply a partial patch to an existing mailbox.
    ///
    /// Unset option fields leave the corresponding setting unchanged.
    /// Empty options are a client-side no-op: no request is issued and
    /// no observable change occurs. Fails with
    /// [`ProviderError::AccountNotFound`] if the account is absent.
    async fn edit_account(&self, address: &str, options: &EditAccountOptions) -> Result<()>;

    /// Repoint an existing alias to `to_address`.
    ///
    /// Fails with [`ProviderError::AccountNotFound`] if the alias is
    /// absent (including previously deleted aliases).
    async fn edit_alias(&self, alias_address: &str, to_address: &str) -> Result<()>;

    /// Remove a mail account or alias.
    ///
    /// Fails with [`ProviderError::AccountNotFound`] — never silent
    /// success — if no account or alias has that address.
    async fn delete(&self, address: &str) -> Result<()>;
}

/// Asynchronous task tracking capability.
///
/// Tasks are server-side handles for long-running operations; callers
/// poll them for completion. Task snapshots are read-only.
#[async_trait]
pub trait TaskClient: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Type-level provider metadata (name, credential fields, capabilities).
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Verify that the configured credentials are accepted by the remote API.
    async fn validate_credentials(&self) -> Result<bool>;

    /// Fetch the current snapshot of a task.
    ///
    /// Fails with [`ProviderError::TaskNotFound`] for unknown tasks and
    /// for tasks past their server-side expiry time.
    async fn get_task(&self, task_href: &str) -> Result<Task>;

    /// Request cancellation of a queued or running task.
    async fn cancel_task(&self, task_href: &str) -> Result<()>;

    /// Poll a task until it reaches a terminal status.
    ///
    /// Default implementation re-fetches the task every `poll_interval`
    /// until [`Task::is_terminal()`] holds, returning
    /// [`ProviderError::Timeout`] once `timeout` has elapsed without
    /// completion. Adapters may override this with a native wait API.
    async fn wait_for_task(
        &self,
        task_href: &str,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Task> {
        let deadline = Instant::now() + timeout;

        loop {
            let task = self.get_task(task_href).await?;
            if task.is_terminal() {
                return Ok(task);
            }

            if Instant::now() >= deadline {
                return Err(ProviderError::Timeout {
                    provider: self.id().to_string(),
                    detail: format!(
                        "task '{}' still {:?} after {:.1}s",
                        task_href,
                        task.status,
                        timeout.as_secs_f32()
                    ),
                });
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}
