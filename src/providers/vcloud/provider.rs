//! `TaskClient` implementation for vCloud.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::traits::{ErrorContext, ProviderErrorMapper, TaskClient};
use crate::types::{
    FieldType, ProviderCredentialField, ProviderFeatures, ProviderLimits, ProviderMetadata,
    ProviderType, ResourceRef, Task, TaskError, TaskStatus,
};
use crate::utils::datetime::parse_timestamp;

use super::{VcloudError, VcloudReference, VcloudTask, VcloudTaskClient};

/// Map a vCloud status string to the provider-neutral status.
///
/// `preRunning` precedes scheduling and maps to `Queued`; `aborted`
/// (administrative stop) folds into `Cancelled`.
fn parse_status(raw: &str) -> TaskStatus {
    match raw {
        "queued" | "preRunning" => TaskStatus::Queued,
        "running" => TaskStatus::Running,
        "success" => TaskStatus::Success,
        "error" => TaskStatus::Error,
        "canceled" | "cancelled" | "aborted" => TaskStatus::Cancelled,
        _ => TaskStatus::Unknown,
    }
}

fn convert_reference(raw: VcloudReference) -> ResourceRef {
    ResourceRef {
        href: raw.href,
        name: raw.name,
        resource_type: raw.resource_type,
    }
}

fn convert_error(raw: VcloudError) -> TaskError {
    TaskError {
        message: raw.message,
        major_error_code: raw.major_error_code,
        minor_error_code: raw.minor_error_code,
        vendor_specific_error_code: raw.vendor_specific_error_code,
        stack_trace: raw.stack_trace,
    }
}

impl VcloudTaskClient {
    /// Convert a wire task into the provider-neutral form, rejecting
    /// representations that violate the task contract:
    /// - a non-terminal task must not carry an end time
    /// - a failed task must carry an error with a non-empty message
    fn convert_task(&self, raw: VcloudTask) -> Result<Task> {
        let status = parse_status(&raw.status);

        let start_time = parse_timestamp(&raw.start_time)
            .ok_or_else(|| self.parse_error(format!("Invalid startTime: {}", raw.start_time)))?;

        let end_time = match raw.end_time.as_deref() {
            Some(s) => Some(
                parse_timestamp(s)
                    .ok_or_else(|| self.parse_error(format!("Invalid endTime: {s}")))?,
            ),
            None => None,
        };
        if end_time.is_some() && !status.is_terminal() {
            return Err(self.parse_error(format!(
                "Task '{}' has status '{}' but an end time",
                raw.href, raw.status
            )));
        }

        let expiry_time = match raw.expiry_time.as_deref() {
            Some(s) => Some(
                parse_timestamp(s)
                    .ok_or_else(|| self.parse_error(format!("Invalid expiryTime: {s}")))?,
            ),
            None => None,
        };

        let error = raw.error.map(convert_error);
        if status == TaskStatus::Error
            && !error.as_ref().is_some_and(|e| !e.message.is_empty())
        {
            return Err(self.parse_error(format!(
                "Failed task '{}' carries no error message",
                raw.href
            )));
        }

        Ok(Task {
            href: raw.href,
            name: raw.name,
            operation: raw.operation,
            status,
            start_time,
            end_time,
            expiry_time,
            owner: raw.owner.map(convert_reference),
            error,
        })
    }
}

#[async_trait]
impl TaskClient for VcloudTaskClient {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Vcloud,
            name: "VMware vCloud".to_string(),
            description: "VMware vCloud Director task tracking".to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "endpoint".to_string(),
                    label: "Endpoint".to_string(),
                    field_type: FieldType::Text,
                    placeholder: Some("https://vcloud.example.com/api/v1.0".to_string()),
                    help_text: None,
                },
                ProviderCredentialField {
                    key: "identity".to_string(),
                    label: "Identity".to_string(),
                    field_type: FieldType::Text,
                    placeholder: Some("user@organization".to_string()),
                    help_text: Some("User name qualified with the organization".to_string()),
                },
                ProviderCredentialField {
                    key: "credential".to_string(),
                    label: "Password".to_string(),
                    field_type: FieldType::Password,
                    placeholder: None,
                    help_text: None,
                },
            ],
            features: ProviderFeatures {
                email_management: false,
                task_tracking: true,
            },
            limits: ProviderLimits {
                operation_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self.session_token().await {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn get_task(&self, task_href: &str) -> Result<Task> {
        let context = ErrorContext {
            task_id: Some(task_href.to_string()),
            ..Default::default()
        };
        let raw: VcloudTask = self.get_xml(task_href, context).await?;
        self.convert_task(raw)
    }

    async fn cancel_task(&self, task_href: &str) -> Result<()> {
        let context = ErrorContext {
            task_id: Some(task_href.to_string()),
            ..Default::default()
        };
        let url = format!("{}/action/cancel", task_href.trim_end_matches('/'));
        self.post_action(&url, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> VcloudTaskClient {
        VcloudTaskClient::new(
            "https://vcloud.example.com/api/v1.0".to_string(),
            "admin@org1".to_string(),
            "pw".to_string(),
        )
    }

    fn parse(xml: &str) -> VcloudTask {
        quick_xml::de::from_str(xml).unwrap()
    }

    #[test]
    fn status_mapping() {
        assert_eq!(parse_status("queued"), TaskStatus::Queued);
        assert_eq!(parse_status("preRunning"), TaskStatus::Queued);
        assert_eq!(parse_status("running"), TaskStatus::Running);
        assert_eq!(parse_status("success"), TaskStatus::Success);
        assert_eq!(parse_status("error"), TaskStatus::Error);
        assert_eq!(parse_status("canceled"), TaskStatus::Cancelled);
        assert_eq!(parse_status("aborted"), TaskStatus::Cancelled);
        assert_eq!(parse_status("somethingNew"), TaskStatus::Unknown);
    }

    #[test]
    fn convert_running_task() {
        let raw = parse(
            r#"<Task href="https://vcloud.example.com/api/v1.0/task/1"
                name="task" operation="Copying vApp" status="running"
                startTime="2026-01-10T08:00:00Z"
                expiryTime="2026-01-11T08:00:00Z">
                <Owner href="https://vcloud.example.com/api/v1.0/vapp/7"
                    name="my-vapp" type="application/vnd.vmware.vcloud.vApp+xml"/>
            </Task>"#,
        );
        let task = client().convert_task(raw).unwrap();
        assert_eq!(task.status, TaskStatus::Running);
        assert!(task.end_time.is_none());
        assert!(!task.is_terminal());
        let owner = task.owner.unwrap();
        assert_eq!(owner.name.as_deref(), Some("my-vapp"));
        // default server expiry is 24h after start
        let delta = task.expiry_time.unwrap() - task.start_time;
        assert_eq!(delta.num_hours(), 24);
    }

    #[test]
    fn convert_delete_task_has_no_owner() {
        let raw = parse(
            r#"<Task href="https://vcloud.example.com/api/v1.0/task/9"
                name="task" operation="Deleting vApp" status="success"
                startTime="2026-01-10T08:00:00Z"
                endTime="2026-01-10T08:01:30Z"/>"#,
        );
        let task = client().convert_task(raw).unwrap();
        assert_eq!(task.status, TaskStatus::Success);
        assert!(task.owner.is_none());
        assert!(task.is_terminal());
    }

    #[test]
    fn convert_failed_task_keeps_error_detail() {
        let raw = parse(
            r#"<Task href="https://vcloud.example.com/api/v1.0/task/11"
                name="task" status="error"
                startTime="2026-01-10T08:00:00Z"
                endTime="2026-01-10T08:00:05Z">
                <Error message="The requested operation failed"
                    majorErrorCode="500"
                    minorErrorCode="INTERNAL_SERVER_ERROR"/>
            </Task>"#,
        );
        let task = client().convert_task(raw).unwrap();
        assert_eq!(task.status, TaskStatus::Error);
        let error = task.error.unwrap();
        assert_eq!(error.message, "The requested operation failed");
        assert_eq!(error.major_error_code, 500);
        assert!(error.stack_trace.is_none());
    }

    #[test]
    fn reject_running_task_with_end_time() {
        let raw = parse(
            r#"<Task href="https://vcloud.example.com/api/v1.0/task/1"
                name="task" status="running"
                startTime="2026-01-10T08:00:00Z"
                endTime="2026-01-10T08:01:00Z"/>"#,
        );
        let res = client().convert_task(raw);
        assert!(
            matches!(&res, Err(ProviderError::ParseError { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn reject_failed_task_without_error() {
        let raw = parse(
            r#"<Task href="https://vcloud.example.com/api/v1.0/task/1"
                name="task" status="error"
                startTime="2026-01-10T08:00:00Z"
                endTime="2026-01-10T08:00:05Z"/>"#,
        );
        let res = client().convert_task(raw);
        assert!(
            matches!(&res, Err(ProviderError::ParseError { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn reject_bad_start_time() {
        let raw = parse(
            r#"<Task href="https://vcloud.example.com/api/v1.0/task/1"
                name="task" status="running" startTime="yesterday"/>"#,
        );
        let res = client().convert_task(raw);
        assert!(
            matches!(&res, Err(ProviderError::ParseError { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let raw = parse(
            r#"<Task href="https://vcloud.example.com/api/v1.0/task/1"
                name="task" status="futureStatus"
                startTime="2026-01-10T08:00:00Z"/>"#,
        );
        let task = client().convert_task(raw).unwrap();
        assert_eq!(task.status, TaskStatus::Unknown);
    }

    #[test]
    fn metadata_shape() {
        let meta = <VcloudTaskClient as TaskClient>::metadata();
        assert_eq!(meta.id, ProviderType::Vcloud);
        assert!(meta.features.task_tracking);
        assert!(!meta.features.email_management);
        let keys: Vec<&str> = meta.required_fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["endpoint", "identity", "credential"]);
    }

    #[test]
    fn endpoint_trailing_slash_trimmed() {
        let c = VcloudTaskClient::new(
            "https://vcloud.example.com/api/v1.0/".to_string(),
            "admin@org1".to_string(),
            "pw".to_string(),
        );
        assert_eq!(c.endpoint, "https://vcloud.example.com/api/v1.0");
    }
}
