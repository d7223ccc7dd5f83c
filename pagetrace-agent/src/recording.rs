use std::error::Error as StdError;

use parking_lot::Mutex;

use crate::Agent;

/// One call observed by a [`RecordingAgent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCall {
    BrowserTimingHeader,
    BrowserTimingFooter,
    SetUserName(String),
    SetAccountName(String),
    SetTransactionName {
        category: Option<String>,
        name: String,
    },
    /// The `Display` form of the noticed error.
    NoticeError(String),
    IgnoreTransaction,
}

/// An [`Agent`] that keeps every call in memory.
#[derive(Debug, Default)]
pub struct RecordingAgent {
    header: Mutex<String>,
    footer: Mutex<String>,
    calls: Mutex<Vec<AgentCall>>,
}

impl RecordingAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_browser_timing_header(&self, header: impl Into<String>) {
        *self.header.lock() = header.into();
    }

    pub fn set_browser_timing_footer(&self, footer: impl Into<String>) {
        *self.footer.lock() = footer.into();
    }

    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls.lock().clone()
    }

    /// Names passed to `set_transaction_name`, in call order.
    pub fn transaction_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                AgentCall::SetTransactionName { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_ignored(&self) -> bool {
        self.calls.lock().contains(&AgentCall::IgnoreTransaction)
    }

    #[inline]
    fn push(&self, call: AgentCall) {
        self.calls.lock().push(call);
    }
}

impl Agent for RecordingAgent {
    fn browser_timing_header(&self) -> String {
        self.push(AgentCall::BrowserTimingHeader);
        self.header.lock().clone()
    }

    fn browser_timing_footer(&self) -> String {
        self.push(AgentCall::BrowserTimingFooter);
        self.footer.lock().clone()
    }

    fn set_user_name(&self, name: &str) {
        self.push(AgentCall::SetUserName(name.to_owned()));
    }

    fn set_account_name(&self, name: &str) {
        self.push(AgentCall::SetAccountName(name.to_owned()));
    }

    fn set_transaction_name(&self, category: Option<&str>, name: &str) {
        self.push(AgentCall::SetTransactionName {
            category: category.map(str::to_owned),
            name: name.to_owned(),
        });
    }

    fn notice_error(&self, error: &(dyn StdError + 'static)) {
        self.push(AgentCall::NoticeError(error.to_string()));
    }

    fn ignore_transaction(&self) {
        self.push(AgentCall::IgnoreTransaction);
    }
}
