pub mod client;
mod leave;
mod notifications;
mod overtime;
pub mod types;

pub use client::*;
pub use leave::{Attachment, LeaveSubmission};
pub use overtime::{
    classify_submit_body, OvertimeSubmission, OvertimeSubmitOutcome, DEFAULT_OVER_LIMIT_MESSAGE,
};
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
