//! Utility functions

pub mod canonical;
pub mod debug_log;
pub mod time;

pub use canonical::{convert_request_body_to_string, encode_signable};
pub use debug_log::{DebugEvent, DebugSink, NoopSink, TracingSink};
pub use time::{now_ms, Clock, FixedClock, SystemClock};
