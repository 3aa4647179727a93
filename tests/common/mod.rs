//! Shared test utilities and helpers.

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use mailhost_provider::{
    create_email_provider, create_task_client, EmailProvider, ProviderCredentials, TaskClient,
};

/// Skip the test when required environment variables are missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert an `Option` is `Some` and unwrap it (failing the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert a `Result` is `Ok` and unwrap it (failing the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Generate a unique mailbox local part for test accounts.
pub fn generate_test_local_part() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("test-{}", &uuid.to_string()[..8])
}

/// Test context wrapping an e-mail provider and the test domain.
pub struct EmailTestContext {
    pub provider: Arc<dyn EmailProvider>,
    pub domain: String,
}

impl EmailTestContext {
    /// Create a GleSys test context.
    pub fn glesys() -> Option<Self> {
        let username = env::var("GLESYS_USERNAME").ok()?;
        let api_key = env::var("GLESYS_API_KEY").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let credentials = ProviderCredentials::Glesys { username, api_key };
        let provider = create_email_provider(credentials).ok()?;

        Some(Self { provider, domain })
    }

    /// A unique address under the test domain.
    pub fn test_address(&self) -> String {
        format!("{}@{}", generate_test_local_part(), self.domain)
    }

    /// Remove a test account or alias, ignoring failures.
    pub async fn cleanup_address(&self, address: &str) {
        let _ = self.provider.delete(address).await;
    }

    /// Find and remove every leftover test account (addresses starting
    /// with `test-`).
    pub async fn cleanup_all_test_accounts(&self) {
        if let Ok(accounts) = self.provider.list_accounts(&self.domain).await {
            for account in accounts {
                if account.address.starts_with("test-") {
                    let _ = self.provider.delete(&account.address).await;
                }
            }
        }
    }
}

/// Test context wrapping a task client.
pub struct TaskTestContext {
    pub client: Arc<dyn TaskClient>,
    /// Href of a known task, when the environment provides one.
    pub task_href: Option<String>,
}

impl TaskTestContext {
    /// Create a vCloud test context.
    pub fn vcloud() -> Option<Self> {
        let endpoint = env::var("VCLOUD_ENDPOINT").ok()?;
        let identity = env::var("VCLOUD_IDENTITY").ok()?;
        let credential = env::var("VCLOUD_CREDENTIAL").ok()?;

        let credentials = ProviderCredentials::Vcloud {
            endpoint,
            identity,
            credential,
        };
        let client = create_task_client(credentials).ok()?;

        Some(Self {
            client,
            task_href: env::var("VCLOUD_TASK_HREF").ok(),
        })
    }
}
