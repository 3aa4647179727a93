use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Email Domain Types ============

/// Aggregate summary of the e-mail accounts and aliases configured for
/// an account, distinct from the per-item list.
///
/// This is an immutable snapshot returned by
/// [`EmailProvider::email_overview()`](crate::EmailProvider::email_overview);
/// the server owns the underlying state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailOverview {
    /// Account-wide totals and limits.
    pub summary: OverviewSummary,
    /// Per-domain account/alias counts.
    pub domains: Vec<DomainOverview>,
}

/// Account-wide mail totals and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    /// Number of configured mail accounts.
    pub accounts: u32,
    /// Maximum number of mail accounts allowed.
    pub max_accounts: u32,
    /// Number of configured aliases.
    pub aliases: u32,
    /// Maximum number of aliases allowed.
    pub max_aliases: u32,
}

/// Mail account/alias counts for a single domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainOverview {
    /// Domain name (e.g., `"example.com"`).
    pub domain: String,
    /// Number of mail accounts configured for this domain.
    pub accounts: u32,
    /// Number of aliases configured for this domain.
    pub aliases: u32,
}

/// Storage quota for a mailbox, in MiB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailQuota {
    /// Total quota available.
    pub total_mib: u32,
    /// Quota currently in use.
    pub used_mib: u32,
}

/// A single mailbox as reported by a provider.
///
/// Value object: **equality and hashing consider only
/// [`address`](Self::address)**, so a
/// `HashSet<EmailAccount>` is unordered and unique by address —
/// the set semantics of
/// [`EmailProvider::list_accounts()`](crate::EmailProvider::list_accounts).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAccount {
    /// Full e-mail address (e.g., `"bob@example.com"`).
    pub address: String,
    /// Storage quota, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<EmailQuota>,
    /// Antispam aggressiveness level, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antispam_level: Option<u8>,
    /// Whether antivirus scanning is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antivirus: Option<bool>,
    /// Whether the autoresponder is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond: Option<bool>,
    /// Autoresponder message text, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond_message: Option<String>,
    /// When the mailbox was created, if known.
    #[serde(with = "crate::utils::datetime", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the mailbox was last modified, if known.
    #[serde(with = "crate::utils::datetime", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl PartialEq for EmailAccount {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for EmailAccount {}

impl Hash for EmailAccount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

/// Optional settings applied when creating a mail account.
///
/// All fields are optional; unset fields take the provider's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountOptions {
    /// Antispam aggressiveness level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antispam_level: Option<u8>,
    /// Enable antivirus scanning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antivirus: Option<bool>,
    /// Enable the autoresponder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond: Option<bool>,
    /// Keep a copy of auto-answered mail in the mailbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond_save_email: Option<bool>,
    /// Autoresponder message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond_message: Option<String>,
    /// Mailbox quota in GiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_gib: Option<u32>,
}

impl CreateAccountOptions {
    /// Returns `true` if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.antispam_level.is_none()
            && self.antivirus.is_none()
            && self.autorespond.is_none()
            && self.autorespond_save_email.is_none()
            && self.autorespond_message.is_none()
            && self.quota_gib.is_none()
    }
}

/// Optional settings applied when editing an existing mail account.
///
/// Applied as a partial patch: unset fields leave the corresponding
/// server-side setting unchanged. Editing with all fields unset is a
/// client-side no-op — no request is issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAccountOptions {
    /// New account password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Antispam aggressiveness level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antispam_level: Option<u8>,
    /// Enable antivirus scanning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antivirus: Option<bool>,
    /// Enable the autoresponder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond: Option<bool>,
    /// Keep a copy of auto-answered mail in the mailbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond_save_email: Option<bool>,
    /// Autoresponder message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorespond_message: Option<String>,
    /// Mailbox quota in GiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_gib: Option<u32>,
}

impl EditAccountOptions {
    /// Returns `true` if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.antispam_level.is_none()
            && self.antivirus.is_none()
            && self.autorespond.is_none()
            && self.autorespond_save_email.is_none()
            && self.autorespond_message.is_none()
            && self.quota_gib.is_none()
    }
}

// ============ Task Domain Types ============

/// Status of a long-running server-side task.
///
/// The exact set is provider-defined; unrecognized wire values map to
/// [`Unknown`](Self::Unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// The task has been queued for execution.
    Queued,
    /// The task is running.
    Running,
    /// The task completed successfully.
    Success,
    /// The task failed; [`Task::error`] carries the detail.
    Error,
    /// The task was cancelled before completion.
    Cancelled,
    /// Status could not be determined.
    Unknown,
}

impl TaskStatus {
    /// Whether this status is terminal (the task will not progress further).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Cancelled)
    }
}

/// A typed reference to another server-side resource (href plus
/// optional name and media type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    /// URI of the referenced resource.
    pub href: String,
    /// Name of the referenced resource, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Media type of the referenced resource, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

/// Error information attached to a failed [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskError {
    /// Message describing the error. Non-empty for failed tasks.
    pub message: String,
    /// Major error code; matches the equivalent HTTP status code.
    pub major_error_code: u16,
    /// Error code specific to the failed operation. Absent on older
    /// API versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_error_code: Option<String>,
    /// Additional vendor-specific information about the error source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_specific_error_code: Option<String>,
    /// Stack trace of the error. Returned only when the request was
    /// made by a system administrator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

/// A server-side handle for a long-running operation.
///
/// Whenever the result of a request cannot be returned immediately, the
/// server creates a task that callers poll for completion. Tasks are
/// read-only snapshots; the client never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// URI identifying this task.
    pub href: String,
    /// Task name.
    pub name: String,
    /// Human-readable description of the operation, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Current task status.
    pub status: TaskStatus,
    /// When the task was started.
    pub start_time: DateTime<Utc>,
    /// When the task completed. Unset while the task is queued or running.
    #[serde(with = "crate::utils::datetime", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// When the task expires. Servers default this to 24 hours after the
    /// start time; expired tasks can no longer be queried (the server
    /// answers with not-found). Expiry is enforced server-side only.
    #[serde(with = "crate::utils::datetime", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<Utc>>,
    /// Reference to the object that owns the task.
    ///
    /// Deliberately irregular field presence: for copy operations the
    /// owner is the copy being created; for **delete operations the
    /// owner is the deleted object and this field is absent**; for all
    /// other operations it is the object the request was made to.
    /// Callers must check before relying on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceRef>,
    /// Error detail. Present only when [`status`](Self::status) is
    /// [`TaskStatus::Error`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TaskError>,
}

impl Task {
    /// Whether the task has reached a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the task had expired at the given instant.
    ///
    /// Expiry is enforced by the server; this is only a local hint for
    /// deciding whether a poll is still worth issuing.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_time.is_some_and(|expiry| now >= expiry)
    }
}

// ============ Provider Types ============

/// Identifies which provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// GleSys hosting. Requires feature `glesys`.
    #[cfg(feature = "glesys")]
    Glesys,
    /// VMware vCloud. Requires feature `vcloud`.
    #[cfg(feature = "vcloud")]
    Vcloud,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "glesys")]
            Self::Glesys => write!(f, "glesys"),
            #[cfg(feature = "vcloud")]
            Self::Vcloud => write!(f, "vcloud"),
        }
    }
}

// ============ Provider Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single credential field required by a provider.
///
/// Used to dynamically build credential forms in UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"apiKey"`).
    pub key: String,
    /// Human-readable label (e.g., `"API Key"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Capability support flags for a provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFeatures {
    /// Whether the provider implements the e-mail management facade.
    pub email_management: bool,
    /// Whether the provider implements asynchronous task tracking.
    pub task_tracking: bool,
}

/// Operational limits of a provider's API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLimits {
    /// Fixed per-call timeout applied by the shared HTTP runtime, in seconds.
    pub operation_timeout_secs: u64,
}

/// Static metadata describing a provider.
///
/// Contains the provider's identity, required credential fields,
/// supported capabilities, and API limits.
///
/// Obtain via the capability traits' `metadata()` or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Credential fields required to authenticate with this provider.
    pub required_fields: Vec<ProviderCredentialField>,
    /// Capability flags for this provider.
    pub features: ProviderFeatures,
    /// API limits for this provider.
    pub limits: ProviderLimits,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field has an invalid format.
    InvalidFormat {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for all supported providers.
///
/// Each variant holds the authentication fields required by that provider.
/// Pass this to [`create_email_provider()`](crate::create_email_provider)
/// or [`create_task_client()`](crate::create_task_client).
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and
/// `"credentials"` as the content:
///
/// ```json
/// { "provider": "glesys", "credentials": { "username": "CL12345", "api_key": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// GleSys credentials. Requires feature `glesys`.
    #[cfg(feature = "glesys")]
    #[serde(rename = "glesys")]
    Glesys {
        /// GleSys account username (e.g., `"CL12345"`).
        username: String,
        /// GleSys API key.
        api_key: String,
    },

    /// vCloud credentials. Requires feature `vcloud`.
    #[cfg(feature = "vcloud")]
    #[serde(rename = "vcloud")]
    Vcloud {
        /// API endpoint base URL (e.g., `"https://vcloud.example.com/api/v1.0"`).
        endpoint: String,
        /// Identity in `user@organization` form.
        identity: String,
        /// Account password.
        credential: String,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a `HashMap`, validating required fields.
    ///
    /// Useful for deserializing credentials stored in a flat key-value format.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(
        provider: &ProviderType,
        map: &HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            #[cfg(feature = "glesys")]
            ProviderType::Glesys => Ok(Self::Glesys {
                username: Self::get_required_field(provider, map, "username", "Username")?,
                api_key: Self::get_required_field(provider, map, "apiKey", "API Key")?,
            }),
            #[cfg(feature = "vcloud")]
            ProviderType::Vcloud => Ok(Self::Vcloud {
                endpoint: Self::get_required_field(provider, map, "endpoint", "Endpoint")?,
                identity: Self::get_required_field(provider, map, "identity", "Identity")?,
                credential: Self::get_required_field(provider, map, "credential", "Password")?,
            }),
            #[allow(unreachable_patterns)]
            _ => Err(CredentialValidationError::InvalidFormat {
                provider: provider.clone(),
                field: "provider".to_string(),
                label: "Provider".to_string(),
                reason: format!(
                    "Provider '{provider}' is not supported or its feature is not enabled."
                ),
            }),
        }
    }

    /// Look up a required field in the map, rejecting missing or blank values.
    fn get_required_field(
        provider: &ProviderType,
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            #[cfg(feature = "glesys")]
            Self::Glesys { username, api_key } => [
                ("username".to_string(), username.clone()),
                ("apiKey".to_string(), api_key.clone()),
            ]
            .into(),
            #[cfg(feature = "vcloud")]
            Self::Vcloud {
                endpoint,
                identity,
                credential,
            } => [
                ("endpoint".to_string(), endpoint.clone()),
                ("identity".to_string(), identity.clone()),
                ("credential".to_string(), credential.clone()),
            ]
            .into(),
        }
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "glesys")]
            Self::Glesys { .. } => ProviderType::Glesys,
            #[cfg(feature = "vcloud")]
            Self::Vcloud { .. } => ProviderType::Vcloud,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ============ EmailAccount set semantics ============

    fn account(address: &str, antispam: Option<u8>) -> EmailAccount {
        EmailAccount {
            address: address.to_string(),
            quota: None,
            antispam_level: antispam,
            antivirus: None,
            autorespond: None,
            autorespond_message: None,
            created_at: None,
            modified_at: None,
        }
    }

    #[test]
    fn email_account_equality_is_by_address_only() {
        let a = account("bob@example.com", Some(3));
        let b = account("bob@example.com", Some(7));
        let c = account("alice@example.com", Some(3));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn email_account_set_unique_by_address() {
        let mut set = HashSet::new();
        set.insert(account("bob@example.com", Some(3)));
        set.insert(account("bob@example.com", None));
        set.insert(account("alice@example.com", None));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&account("bob@example.com", Some(99))));
    }

    // ============ Option structs ============

    #[test]
    fn create_options_default_is_empty() {
        assert!(CreateAccountOptions::default().is_empty());
    }

    #[test]
    fn create_options_with_field_not_empty() {
        let opts = CreateAccountOptions {
            antispam_level: Some(3),
            ..Default::default()
        };
        assert!(!opts.is_empty());
    }

    #[test]
    fn edit_options_default_is_empty() {
        assert!(EditAccountOptions::default().is_empty());
    }

    #[test]
    fn edit_options_password_counts() {
        let opts = EditAccountOptions {
            password: Some("s3cret".to_string()),
            ..Default::default()
        };
        assert!(!opts.is_empty());
    }

    #[test]
    fn options_serialize_skips_unset_fields() {
        let opts = CreateAccountOptions {
            quota_gib: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(json, r#"{"quotaGib":2}"#);
    }

    // ============ Task ============

    fn running_task() -> Task {
        Task {
            href: "https://vcloud.example.com/api/v1.0/task/1".to_string(),
            name: "task".to_string(),
            operation: Some("Copying vApp".to_string()),
            status: TaskStatus::Running,
            start_time: "2026-01-10T08:00:00Z".parse().unwrap(),
            end_time: None,
            expiry_time: Some("2026-01-11T08:00:00Z".parse().unwrap()),
            owner: Some(ResourceRef {
                href: "https://vcloud.example.com/api/v1.0/vapp/7".to_string(),
                name: Some("my-vapp".to_string()),
                resource_type: Some("application/vnd.vmware.vcloud.vApp+xml".to_string()),
            }),
            error: None,
        }
    }

    #[test]
    fn task_status_terminal_set() {
        assert!(TaskStatus::Success.is_terminal());
        assert!(TaskStatus::Error.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(!TaskStatus::Queued.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
        assert!(!TaskStatus::Unknown.is_terminal());
    }

    #[test]
    fn task_expiry_hint() {
        let task = running_task();
        assert!(!task.is_expired_at("2026-01-10T12:00:00Z".parse().unwrap()));
        assert!(task.is_expired_at("2026-01-12T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn task_without_expiry_never_locally_expired() {
        let mut task = running_task();
        task.expiry_time = None;
        assert!(!task.is_expired_at("2030-01-01T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn task_serde_round_trip_preserves_owner_absence() {
        let mut task = running_task();
        task.owner = None; // delete operations carry no owner
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("owner"));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert!(back.owner.is_none());
        assert_eq!(back.status, TaskStatus::Running);
    }

    // ============ Credentials ============

    #[test]
    fn credentials_glesys_roundtrip() {
        let map: HashMap<String, String> = [
            ("username".to_string(), "CL12345".to_string()),
            ("apiKey".to_string(), "my-key".to_string()),
        ]
        .into();
        let cred = ProviderCredentials::from_map(&ProviderType::Glesys, &map).unwrap();
        assert_eq!(cred.provider_type(), ProviderType::Glesys);
        let back = cred.to_map();
        assert_eq!(back.get("username").map(String::as_str), Some("CL12345"));
        assert_eq!(back.get("apiKey").map(String::as_str), Some("my-key"));
    }

    #[test]
    fn credentials_vcloud_roundtrip() {
        let map: HashMap<String, String> = [
            (
                "endpoint".to_string(),
                "https://vcloud.example.com/api/v1.0".to_string(),
            ),
            ("identity".to_string(), "admin@org1".to_string()),
            ("credential".to_string(), "pw".to_string()),
        ]
        .into();
        let cred = ProviderCredentials::from_map(&ProviderType::Vcloud, &map).unwrap();
        assert_eq!(cred.provider_type(), ProviderType::Vcloud);
        let back = cred.to_map();
        assert_eq!(back.get("identity").map(String::as_str), Some("admin@org1"));
    }

    #[test]
    fn credentials_missing_field() {
        let map: HashMap<String, String> =
            [("username".to_string(), "CL12345".to_string())].into();
        let res = ProviderCredentials::from_map(&ProviderType::Glesys, &map);
        assert!(
            matches!(&res, Err(CredentialValidationError::MissingField { field, .. }) if field == "apiKey"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_empty_field() {
        let map: HashMap<String, String> = [
            ("username".to_string(), "CL12345".to_string()),
            ("apiKey".to_string(), "   ".to_string()),
        ]
        .into();
        let res = ProviderCredentials::from_map(&ProviderType::Glesys, &map);
        assert!(
            matches!(&res, Err(CredentialValidationError::EmptyField { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_serde_tagged_form() {
        let cred = ProviderCredentials::Glesys {
            username: "CL12345".to_string(),
            api_key: "k".to_string(),
        };
        let json = serde_json::to_string(&cred).unwrap();
        assert!(json.contains("\"provider\":\"glesys\""));
        assert!(json.contains("\"credentials\""));
        let back: ProviderCredentials = serde_json::from_str(&json).unwrap();
        assert_eq!(back.provider_type(), ProviderType::Glesys);
    }

    // ============ TaskStatus serde ============

    #[test]
    fn task_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
