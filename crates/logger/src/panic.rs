use std::backtrace::Backtrace;
use std::panic;

use tracing::error;

/// Replace the default panic hook with one that logs the panic and a
/// backtrace through the subscriber, keeping stdout for the status line.
pub fn log_panics() {
    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        error!("internal error: {info}\n{backtrace}");
    }));
}
