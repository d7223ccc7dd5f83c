use std::error::Error as StdError;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::Span;

use crate::{fields, Agent, AgentConfig};

// Marks navigation start as early as possible in the page; the footer
// script reads it back when the beacon fires.
static HEADER_SCRIPT: &str =
    r#"<script type="text/javascript">window.__pagetrace={start:Date.now()};</script>"#;

/// An [`Agent`] that reports through `tracing`.
///
/// Identity and naming calls are recorded on the current span, so the
/// caller is expected to run each request inside a span declaring the
/// [`fields`] names. Calls made outside such a span are dropped by
/// `tracing` itself.
#[derive(Debug, Clone, Default)]
pub struct TracingAgent {
    config: AgentConfig,
}

impl TracingAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }
}

impl Agent for TracingAgent {
    fn browser_timing_header(&self) -> String {
        String::from(HEADER_SCRIPT)
    }

    fn browser_timing_footer(&self) -> String {
        let token: u64 = ThreadRng::default().gen();
        let payload = serde_json::json!({
            "app": self.config.app_name,
            "beacon": self.config.beacon,
            "token": format!("{token:016x}"),
        });
        // Keep `</script>` in a config value from closing the tag.
        let payload = payload.to_string().replace('<', "\\u003c");
        format!(
            r#"<script type="text/javascript">window.__pagetrace&&(window.__pagetrace.info={payload});</script>"#
        )
    }

    fn set_user_name(&self, name: &str) {
        tracing::debug!(user = name, "set user name");
        Span::current().record(fields::USER_NAME, name);
    }

    fn set_account_name(&self, name: &str) {
        tracing::debug!(account = name, "set account name");
        Span::current().record(fields::ACCOUNT_NAME, name);
    }

    fn set_transaction_name(&self, category: Option<&str>, name: &str) {
        tracing::debug!(transaction = name, ?category, "set transaction name");
        let span = Span::current();
        span.record(fields::TRANSACTION_NAME, name);
        if let Some(category) = category {
            span.record(fields::TRANSACTION_CATEGORY, category);
        }
    }

    fn notice_error(&self, error: &(dyn StdError + 'static)) {
        let mut causes = vec![];
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        tracing::error!(error = %error, ?causes, "noticed error");
    }

    fn ignore_transaction(&self) {
        tracing::debug!("ignore transaction");
        Span::current().record(fields::TRANSACTION_IGNORED, true);
    }
}
