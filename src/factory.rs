//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::traits::{EmailProvider, TaskClient};
use crate::types::{ProviderCredentials, ProviderMetadata};

#[cfg(feature = "glesys")]
use crate::providers::GlesysProvider;
#[cfg(feature = "vcloud")]
use crate::providers::VcloudTaskClient;

/// Creates an [`EmailProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`]
/// variant. The returned provider is wrapped in `Arc<dyn EmailProvider>`
/// for easy sharing across async tasks.
///
/// # Errors
///
/// Returns [`ProviderError::UnsupportedCapability`] if the credential
/// variant belongs to a provider without e-mail management.
///
/// # Examples
///
/// ```rust,no_run
/// use mailhost_provider::{create_email_provider, ProviderCredentials};
///
/// let provider = create_email_provider(ProviderCredentials::Glesys {
///     username: "CL12345".to_string(),
///     api_key: "your-key".to_string(),
/// }).unwrap();
/// ```
pub fn create_email_provider(credentials: ProviderCredentials) -> Result<Arc<dyn EmailProvider>> {
    match credentials {
        #[cfg(feature = "glesys")]
        ProviderCredentials::Glesys { username, api_key } => {
            Ok(Arc::new(GlesysProvider::new(username, api_key)))
        }
        #[allow(unreachable_patterns)]
        other => Err(ProviderError::UnsupportedCapability {
            provider: other.provider_type().to_string(),
            capability: "email-management".to_string(),
        }),
    }
}

/// Creates a [`TaskClient`] instance from the given credentials.
///
/// # Errors
///
/// Returns [`ProviderError::UnsupportedCapability`] if the credential
/// variant belongs to a provider without task tracking.
///
/// # Examples
///
/// ```rust,no_run
/// use mailhost_provider::{create_task_client, ProviderCredentials};
///
/// let client = create_task_client(ProviderCredentials::Vcloud {
///     endpoint: "https://vcloud.example.com/api/v1.0".to_string(),
///     identity: "user@organization".to_string(),
///     credential: "password".to_string(),
/// }).unwrap();
/// ```
pub fn create_task_client(credentials: ProviderCredentials) -> Result<Arc<dyn TaskClient>> {
    match credentials {
        #[cfg(feature = "vcloud")]
        ProviderCredentials::Vcloud {
            endpoint,
            identity,
            credential,
        } => Ok(Arc::new(VcloudTaskClient::new(
            endpoint, identity, credential,
        ))),
        #[allow(unreachable_patterns)]
        other => Err(ProviderError::UnsupportedCapability {
            provider: other.provider_type().to_string(),
            capability: "task-tracking".to_string(),
        }),
    }
}

/// Returns metadata for all providers enabled via feature flags.
///
/// Useful for building dynamic UIs that enumerate available providers
/// and their required credential fields.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "glesys")]
        GlesysProvider::metadata(),
        #[cfg(feature = "vcloud")]
        VcloudTaskClient::metadata(),
    ]
}
