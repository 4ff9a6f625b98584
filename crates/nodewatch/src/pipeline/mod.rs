//! Check pipelines: fixed sequences of checks sharing one [`CheckStatus`].

mod release;
mod validator;

pub use release::ReleaseCheck;
pub use validator::ValidatorCheck;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::error;

use crate::error::CheckError;
use crate::status::{CheckStatus, Severity};

/// Final plugin output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub line: String,
    pub severity: Severity,
}

impl Report {
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

/// Turn a pipeline result into the status line.
///
/// `Ok` carries the sentence printed when no check raised a message. An
/// error is appended to whatever the run accumulated so far, with the
/// severity its kind maps to.
pub fn finish(mut status: CheckStatus, result: Result<String, CheckError>) -> Report {
    let default_message = match result {
        Ok(message) => message,
        Err(err) => {
            error!("check aborted: {err}");
            status.raise(err.to_string(), err.severity());
            String::new()
        }
    };

    Report { line: status.status_line(&default_message), severity: status.severity() }
}

/// Run `f`, turning a panic into an UNKNOWN report so the plugin still
/// prints one status line and exits with code 3.
pub fn guard(f: impl FnOnce() -> Report) -> Report {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| Report {
        line: format!("{}: internal error: {}", Severity::Unknown, panic_message(payload.as_ref())),
        severity: Severity::Unknown,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unexpected panic"
    }
}
