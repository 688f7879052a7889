use std::sync::atomic::{AtomicU64, Ordering};

use crate::service::{ServiceError, ServiceResult};

static CORRELATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Result of a wrapped operation, safe to surface to an end user.
#[derive(Debug)]
pub struct Outcome<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Outcome<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Converts operation failures into user-safe results.
///
/// Expected input/state problems keep their descriptive message. Anything
/// else is logged in full server-side under an opaque correlation id, and
/// the caller only ever sees a generic message carrying that id.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn wrap<T>(
        &self,
        context: &str,
        operation: impl FnOnce() -> ServiceResult<T>,
    ) -> Outcome<T> {
        match operation() {
            Ok(data) => {
                tracing::info!(context, "operation completed");
                Outcome::ok(data)
            }
            Err(error) => self.report(context, error),
        }
    }

    fn report<T>(&self, context: &str, error: ServiceError) -> Outcome<T> {
        if let Some(message) = error.user_message() {
            tracing::warn!(context, %error, "operation rejected");
            return Outcome::failed(message);
        }

        let id = correlation_id();
        tracing::error!(
            context,
            correlation = %id,
            error = ?error,
            "operation failed"
        );
        Outcome::failed(format!(
            "The operation could not be completed. Reference: {id}"
        ))
    }
}

/// Opaque token tying a user-visible failure to its server-side log entry.
fn correlation_id() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64);
    let seq = CORRELATION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}-{:x}", std::process::id(), nanos, seq)
}
