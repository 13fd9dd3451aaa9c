//! Notification dispatcher contract.

use std::future::Future;

use serde::Serialize;

use crate::attendance::MarkCategory;

/// Result of one provider call that reached the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    /// Raw provider response, kept for diagnostics.
    pub raw: String,
}

impl DispatchOutcome {
    pub fn delivered(raw: impl Into<String>) -> Self {
        Self {
            success: true,
            raw: raw.into(),
        }
    }

    pub fn rejected(raw: impl Into<String>) -> Self {
        Self {
            success: false,
            raw: raw.into(),
        }
    }
}

/// Transport-level failure: the provider could not be reached at all.
#[derive(Debug, thiserror::Error)]
#[error("SMS transport failed: {0}")]
pub struct DispatchError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl DispatchError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(source.into())
    }
}

/// Sends one parent notification. One attempt per call, no retry.
///
/// Provider-level rejections (bad number, quota, downtime reported by the
/// provider) are `Ok` with `success == false`. Only transport failures are
/// `Err`.
pub trait Notifier: Send + Sync {
    fn send(
        &self,
        mobile: &str,
        category: MarkCategory,
        student_name: &str,
    ) -> impl Future<Output = Result<DispatchOutcome, DispatchError>> + Send;
}
