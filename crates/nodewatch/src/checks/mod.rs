//! Individual checks run by the validator pipeline.
//!
//! Every check takes the run's [`CheckStatus`](crate::CheckStatus), raises
//! it when something is wrong, and records its own metric label. Transport
//! failures are returned as errors and abort the run.

pub mod compare;
pub mod distance;
pub mod health;
pub mod increase;

pub use compare::check_compare_to_node;
pub use distance::{BEST_FINALIZED_DISTANCE_LABEL, check_distance, check_best_finalized_distance};
pub use health::{PEERS_LABEL, check_peers, check_syncing};
pub use increase::{IncreaseOutcome, TimeoutReport, wait_for_increase};
