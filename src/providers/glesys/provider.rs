//! `EmailProvider` implementation for GleSys.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{parse_yes_no, quota_to_mib, yes_no, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::traits::{EmailProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{
    CreateAccountOptions, DomainOverview, EditAccountOptions, EmailAccount, EmailOverview,
    EmailQuota, FieldType, OverviewSummary, ProviderCredentialField, ProviderFeatures,
    ProviderLimits, ProviderMetadata, ProviderType,
};
use crate::utils::datetime::parse_timestamp;

use super::types::GlesysEmailAccount;
use super::{GlesysEmailListContent, GlesysOverviewContent, GlesysProvider, GlesysResponse};

/// The domain part of an address, for error context.
fn domain_of(address: &str) -> Option<String> {
    address.split_once('@').map(|(_, d)| d.to_string())
}

/// Convert a GleSys mailbox record into the provider-neutral form.
fn convert_account(raw: GlesysEmailAccount) -> EmailAccount {
    let quota = raw.quota.as_ref().and_then(|q| {
        let total_mib = quota_to_mib(q.amount, &q.unit)?;
        let used_mib = raw
            .usedquota
            .as_ref()
            .and_then(|u| quota_to_mib(u.amount, &u.unit))
            .unwrap_or(0);
        Some(EmailQuota {
            total_mib,
            used_mib,
        })
    });

    EmailAccount {
        address: raw.emailaccount,
        quota,
        antispam_level: raw.antispamlevel,
        antivirus: raw.antivirus.as_deref().and_then(parse_yes_no),
        autorespond: raw.autorespond.as_deref().and_then(parse_yes_no),
        autorespond_message: raw.autorespondmessage,
        created_at: raw.created.as_deref().and_then(parse_timestamp),
        modified_at: raw.modified.as_deref().and_then(parse_timestamp),
    }
}

/// Render creation options as GleSys form parameters.
fn create_option_params(options: &CreateAccountOptions) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(level) = options.antispam_level {
        params.push(("antispamlevel", level.to_string()));
    }
    if let Some(enabled) = options.antivirus {
        params.push(("antivirus", yes_no(enabled).to_string()));
    }
    if let Some(enabled) = options.autorespond {
        params.push(("autorespond", yes_no(enabled).to_string()));
    }
    if let Some(save) = options.autorespond_save_email {
        params.push(("autorespondsaveemail", yes_no(save).to_string()));
    }
    if let Some(message) = &options.autorespond_message {
        params.push(("autorespondmessage", message.clone()));
    }
    if let Some(gib) = options.quota_gib {
        params.push(("quota", gib.to_string()));
    }
    params
}

/// Render edit options as GleSys form parameters.
fn edit_option_params(options: &EditAccountOptions) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(password) = &options.password {
        params.push(("password", password.clone()));
    }
    if let Some(level) = options.antispam_level {
        params.push(("antispamlevel", level.to_string()));
    }
    if let Some(enabled) = options.antivirus {
        params.push(("antivirus", yes_no(enabled).to_string()));
    }
    if let Some(enabled) = options.autorespond {
        params.push(("autorespond", yes_no(enabled).to_string()));
    }
    if let Some(save) = options.autorespond_save_email {
        params.push(("autorespondsaveemail", yes_no(save).to_string()));
    }
    if let Some(message) = &options.autorespond_message {
        params.push(("autorespondmessage", message.clone()));
    }
    if let Some(gib) = options.quota_gib {
        params.push(("quota", gib.to_string()));
    }
    params
}

#[async_trait]
impl EmailProvider for GlesysProvider {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Glesys,
            name: "GleSys".to_string(),
            description: "GleSys hosting e-mail management".to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "username".to_string(),
                    label: "Username".to_string(),
                    field_type: FieldType::Text,
                    placeholder: Some("CL12345".to_string()),
                    help_text: Some("GleSys account number".to_string()),
                },
                ProviderCredentialField {
                    key: "apiKey".to_string(),
                    label: "API Key".to_string(),
                    field_type: FieldType::Password,
                    placeholder: None,
                    help_text: Some(
                        "Created under Account > API Access in the GleSys control panel"
                            .to_string(),
                    ),
                },
            ],
            features: ProviderFeatures {
                email_management: true,
                task_tracking: false,
            },
            limits: ProviderLimits {
                operation_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self.email_overview().await {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn email_overview(&self) -> Result<EmailOverview> {
        let response: GlesysResponse<GlesysOverviewContent> = self
            .call("email/overview", &[], ErrorContext::default())
            .await?;
        let overview = response.response.content.overview;

        Ok(EmailOverview {
            summary: OverviewSummary {
                accounts: overview.summary.accounts,
                max_accounts: overview.summary.maxaccounts,
                aliases: overview.summary.aliases,
                max_aliases: overview.summary.maxaliases,
            },
            domains: overview
                .domains
                .into_iter()
                .map(|d| DomainOverview {
                    domain: d.domain,
                    accounts: d.accounts,
                    aliases: d.aliases,
                })
                .collect(),
        })
    }

    async fn list_accounts(&self, domain: &str) -> Result<HashSet<EmailAccount>> {
        let context = ErrorContext {
            domain: Some(domain.to_string()),
            ..Default::default()
        };
        let response: GlesysResponse<GlesysEmailListContent> = self
            .call(
                "email/list",
                &[("domainname", domain.to_string())],
                context,
            )
            .await?;

        Ok(response
            .response
            .content
            .list
            .emailaccounts
            .into_iter()
            .map(convert_account)
            .collect())
    }

    async fn create_account(
        &self,
        address: &str,
        password: &str,
        options: &CreateAccountOptions,
    ) -> Result<()> {
        let context = ErrorContext {
            address: Some(address.to_string()),
            domain: domain_of(address),
            ..Default::default()
        };
        let mut params = vec![
            ("emailaccount", address.to_string()),
            ("password", password.to_string()),
        ];
        params.extend(create_option_params(options));
        self.call_ok("email/createaccount", &params, context).await
    }

    async fn create_alias(&self, alias_address: &str, to_address: &str) -> Result<()> {
        let context = ErrorContext {
            address: Some(alias_address.to_string()),
            target: Some(to_address.to_string()),
            domain: domain_of(alias_address),
            ..Default::default()
        };
        self.call_ok(
            "email/createalias",
            &[
                ("emailalias", alias_address.to_string()),
                ("goto", to_address.to_string()),
            ],
            context,
        )
        .await
    }

    async fn edit_account(&self, address: &str, options: &EditAccountOptions) -> Result<()> {
        // Nothing to change: skip the round trip entirely
        if options.is_empty() {
            log::debug!("[{}] edit_account with no options, skipping", self.id());
            return Ok(());
        }

        let context = ErrorContext {
            address: Some(address.to_string()),
            ..Default::default()
        };
        let mut params = vec![("emailaccount", address.to_string())];
        params.extend(edit_option_params(options));
        self.call_ok("email/editaccount", &params, context).await
    }

    async fn edit_alias(&self, alias_address: &str, to_address: &str) -> Result<()> {
        let context = ErrorContext {
            address: Some(alias_address.to_string()),
            target: Some(to_address.to_string()),
            ..Default::default()
        };
        self.call_ok(
            "email/editalias",
            &[
                ("emailalias", alias_address.to_string()),
                ("goto", to_address.to_string()),
            ],
            context,
        )
        .await
    }

    async fn delete(&self, address: &str) -> Result<()> {
        let context = ErrorContext {
            address: Some(address.to_string()),
            ..Default::default()
        };
        self.call_ok("email/delete", &[("email", address.to_string())], context)
            .await
    }
}
