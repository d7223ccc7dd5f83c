//! Agent client contract for pagetrace.
//!
//! An [`Agent`] is the in-process handle of an application-performance
//! monitoring agent. pagetrace only ever talks to the agent through this
//! trait, so any backend can be plugged in behind it.
use std::error::Error as StdError;

mod config;
mod recording;
mod tracing_agent;

pub use config::AgentConfig;
pub use recording::{AgentCall, RecordingAgent};
pub use tracing_agent::TracingAgent;

/// Field names of the per-request `transaction` span.
///
/// The span is opened by whoever drives the request lifecycle, with every
/// field declared `Empty`; [`TracingAgent`] fills them in.
pub mod fields {
    pub const USER_NAME: &str = "user.name";
    pub const ACCOUNT_NAME: &str = "account.name";
    pub const TRANSACTION_NAME: &str = "transaction.name";
    pub const TRANSACTION_CATEGORY: &str = "transaction.category";
    pub const TRANSACTION_IGNORED: &str = "transaction.ignored";
}

pub trait Agent: Send + Sync {
    /// Markup to place in the page `<head>`, after any `<meta>` elements.
    fn browser_timing_header(&self) -> String;

    /// Markup to place just before the closing `</body>` tag.
    fn browser_timing_footer(&self) -> String;

    fn set_user_name(&self, name: &str);

    fn set_account_name(&self, name: &str);

    /// Names the current transaction. `category` groups the name; `None`
    /// leaves the agent's default grouping.
    fn set_transaction_name(&self, category: Option<&str>, name: &str);

    fn notice_error(&self, error: &(dyn StdError + 'static));

    /// Excludes the current transaction from reporting.
    fn ignore_transaction(&self);
}
