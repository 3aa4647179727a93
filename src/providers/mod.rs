//! Provider adapter implementations.

/// Shared utilities used by provider adapters.
pub mod common;

#[cfg(feature = "glesys")]
mod glesys;
#[cfg(feature = "vcloud")]
mod vcloud;

#[cfg(feature = "glesys")]
pub use glesys::GlesysProvider;
#[cfg(feature = "vcloud")]
pub use vcloud::VcloudTaskClient;
