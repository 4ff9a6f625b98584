mod panic;
mod subscriber;

pub use panic::log_panics;
pub use subscriber::{init, init_verbose};
