//! # mailhost-provider
//!
//! A unified hosting provider abstraction library for managing e-mail
//! accounts and tracking long-running server tasks across cloud platforms.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Capability | Auth Method |
//! |----------|-------------|------------|-------------|
//! | [GleSys](https://glesys.com/) | `glesys` | E-mail management | HTTP Basic (username + API key) |
//! | [VMware vCloud](https://www.vmware.com/) | `vcloud` | Task tracking | Session token (`/login`) |
//!
//! ## Feature Flags
//!
//! ### Provider Selection
//!
//! - **`all-providers`** *(default)* — Enable all providers listed above.
//! - **`glesys`** — Enable only the GleSys provider.
//! - **`vcloud`** — Enable only the vCloud task client.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mailhost-provider = { version = "0.1", features = ["all-providers"] }
//! ```
//!
//! Or enable only the providers you need:
//!
//! ```toml
//! [dependencies]
//! mailhost-provider = { version = "0.1", default-features = false, features = ["glesys", "rustls"] }
//! ```
//!
//! ## Managing E-mail Accounts
//!
//! ```rust,no_run
//! use mailhost_provider::{
//!     create_email_provider, CreateAccountOptions, EmailProvider, ProviderCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider from credentials
//!     let credentials = ProviderCredentials::Glesys {
//!         username: "CL12345".to_string(),
//!         api_key: "your-key".to_string(),
//!     };
//!     let provider = create_email_provider(credentials)?;
//!
//!     // 2. Validate credentials against the remote API
//!     provider.validate_credentials().await?;
//!
//!     // 3. Inspect the account-wide overview
//!     let overview = provider.email_overview().await?;
//!     println!(
//!         "{}/{} accounts in use",
//!         overview.summary.accounts, overview.summary.max_accounts
//!     );
//!
//!     // 4. Provision a mailbox and an alias pointing at it
//!     let options = CreateAccountOptions {
//!         antispam_level: Some(3),
//!         quota_gib: Some(2),
//!         ..Default::default()
//!     };
//!     provider.create_account("bob@example.com", "s3cret", &options).await?;
//!     provider.create_alias("sales@example.com", "bob@example.com").await?;
//!
//!     // 5. List what the domain now holds
//!     for account in provider.list_accounts("example.com").await? {
//!         println!("{}", account.address);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Tracking Tasks
//!
//! ```rust,no_run
//! # use mailhost_provider::*;
//! # use std::time::Duration;
//! # async fn example(client: std::sync::Arc<dyn TaskClient>) -> Result<()> {
//! let task = client
//!     .wait_for_task(
//!         "https://vcloud.example.com/api/v1.0/task/3cc08ir8",
//!         Duration::from_secs(2),
//!         Duration::from_secs(300),
//!     )
//!     .await?;
//! match task.status {
//!     TaskStatus::Success => println!("done: {:?}", task.operation),
//!     TaskStatus::Error => {
//!         // A failed task always carries an error with a message
//!         if let Some(error) = &task.error {
//!             eprintln!("failed ({}): {}", error.major_error_code, error.message);
//!         }
//!     }
//!     other => println!("finished as {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! The error enum provides structured variants for common failure modes:
//!
//! - [`ProviderError::InvalidCredentials`] — authentication failed
//! - [`ProviderError::AccountExists`] — address already taken
//! - [`ProviderError::AccountNotFound`] — no such account or alias
//! - [`ProviderError::TaskNotFound`] — unknown or expired task
//! - [`ProviderError::RateLimited`] — API rate limit exceeded (retryable)
//! - [`ProviderError::NetworkError`] — network connectivity issue (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff. See [`ProviderError`] for the full list.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::{create_email_provider, create_task_client, get_all_provider_metadata};

// Re-export capability traits only (internal traits are not exported)
pub use traits::{EmailProvider, TaskClient};

// Re-export types
pub use types::{
    CreateAccountOptions, CredentialValidationError, DomainOverview, EditAccountOptions,
    EmailAccount, EmailOverview, EmailQuota, FieldType, OverviewSummary, ProviderCredentialField,
    ProviderCredentials, ProviderFeatures, ProviderLimits, ProviderMetadata, ProviderType,
    ResourceRef, Task, TaskError, TaskStatus,
};

// Re-export utils module
pub use utils::datetime;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "glesys")]
pub use providers::GlesysProvider;

#[cfg(feature = "vcloud")]
pub use providers::VcloudTaskClient;
