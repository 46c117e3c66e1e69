//! Search layer facade.
//!
//! - **[`debounce`]**: trailing-edge debounce turning keystrokes into committed queries.
//! - **[`gateway`]**: the single GET against the user search endpoint, with
//!   rate-limit vs. generic failure classification.
//! - **[`worker`]**: runs gateway calls off the UI thread and reports
//!   sequence-tagged outcomes back over a channel.

pub mod debounce;
pub mod gateway;
pub mod worker;
