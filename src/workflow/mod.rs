pub mod poll_ctx;
pub mod poll_flow;

pub use poll_ctx::PollCtx;
pub use poll_flow::{GroupOutcome, PollFlow};
