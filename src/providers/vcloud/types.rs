//! vCloud wire types (private).
//!
//! Task representations are XML with the payload carried in attributes
//! and nested `Owner`/`Error` elements.

use serde::Deserialize;

/// A vCloud `<Task>` element.
#[derive(Debug, Deserialize)]
pub(crate) struct VcloudTask {
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@operation", default)]
    pub operation: Option<String>,
    #[serde(rename = "@status")]
    pub status: String,
    #[serde(rename = "@startTime")]
    pub start_time: String,
    #[serde(rename = "@endTime", default)]
    pub end_time: Option<String>,
    #[serde(rename = "@expiryTime", default)]
    pub expiry_time: Option<String>,
    /// Absent for delete operations, where the owner no longer exists.
    #[serde(rename = "Owner", default)]
    pub owner: Option<VcloudReference>,
    #[serde(rename = "Error", default)]
    pub error: Option<VcloudError>,
}

/// A typed `href` reference element (`Owner`, `Result` etc.).
#[derive(Debug, Deserialize)]
pub(crate) struct VcloudReference {
    #[serde(rename = "@href")]
    pub href: String,
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "@type", default)]
    pub resource_type: Option<String>,
}

/// A vCloud `<Error>` element.
#[derive(Debug, Deserialize)]
pub(crate) struct VcloudError {
    #[serde(rename = "@message")]
    pub message: String,
    #[serde(rename = "@majorErrorCode")]
    pub major_error_code: u16,
    /// Absent on API versions before 0.9.
    #[serde(rename = "@minorErrorCode", default)]
    pub minor_error_code: Option<String>,
    #[serde(rename = "@vendorSpecificErrorCode", default)]
    pub vendor_specific_error_code: Option<String>,
    /// Only present when the session belongs to a system administrator.
    #[serde(rename = "@stackTrace", default)]
    pub stack_trace: Option<String>,
}
