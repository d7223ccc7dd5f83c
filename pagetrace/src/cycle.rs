use std::{error::Error as StdError, sync::Arc};

use axum::response::Response;
use pagetrace_agent::Agent;

use crate::{naming::TransactionNamer, session::Session, target::RequestTarget};

/// Creates one [`RequestCycle`] per request, all sharing the agent and the
/// package prefix given here.
#[derive(Clone)]
pub struct RequestCycleFactory {
    namer: Arc<TransactionNamer>,
    agent: Arc<dyn Agent>,
}

impl RequestCycleFactory {
    /// `package_prefix` is the dot separated (or `::` separated) prefix of
    /// the application's page classes.
    pub fn new(package_prefix: impl Into<String>, agent: Arc<dyn Agent>) -> Self {
        Self {
            namer: Arc::new(TransactionNamer::new(package_prefix)),
            agent,
        }
    }

    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    pub fn new_request_cycle(&self) -> RequestCycle {
        RequestCycle {
            namer: Arc::clone(&self.namer),
            agent: Arc::clone(&self.agent),
            first_target: true,
        }
    }
}

/// Lifecycle hooks of a single request.
pub struct RequestCycle {
    namer: Arc<TransactionNamer>,
    agent: Arc<dyn Agent>,
    first_target: bool,
}

impl RequestCycle {
    pub fn on_begin_request(&mut self, session: Option<&Session>) {
        self.first_target = true;
        if let Some(identity) = session.and_then(|session| session.identity.as_ref()) {
            self.agent.set_user_name(&identity.user_name);
            self.agent.set_account_name(&identity.account_name);
        }
    }

    /// Names the transaction after the first target of the request. Targets
    /// set later, e.g. by an internal redirect, are not looked at.
    pub fn on_request_target_set(&mut self, target: &RequestTarget) {
        if !self.first_target {
            return;
        }
        self.first_target = false;

        match self.namer.name(target) {
            Some(name) => {
                tracing::debug!(transaction = %name, "named transaction");
                self.agent.set_transaction_name(None, &name);
            }
            None => {
                tracing::debug!(?target, "ignoring transaction");
                self.agent.ignore_transaction();
            }
        }
    }

    /// Notices `error` and returns no replacement page, so the response
    /// produced so far stands.
    pub fn on_runtime_exception(&mut self, error: &(dyn StdError + 'static)) -> Option<Response> {
        self.agent.notice_error(error);
        None
    }

    /// Whether no target has been set since the request began.
    pub fn is_awaiting_target(&self) -> bool {
        self.first_target
    }
}

#[cfg(test)]
mod tests {
    use std::{fmt, sync::Arc};

    use pagetrace_agent::{AgentCall, RecordingAgent};

    use super::*;
    use crate::{ListenerInvocation, SessionIdentity};

    fn cycle() -> (Arc<RecordingAgent>, RequestCycle) {
        let agent = Arc::new(RecordingAgent::new());
        let factory = RequestCycleFactory::new("com.app.pages", agent.clone());
        let mut cycle = factory.new_request_cycle();
        cycle.on_begin_request(None);
        (agent, cycle)
    }

    #[derive(Debug)]
    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("boom")
        }
    }

    impl StdError for Boom {}

    #[test]
    fn forwards_session_identity() {
        let agent = Arc::new(RecordingAgent::new());
        let mut cycle = RequestCycleFactory::new("", agent.clone()).new_request_cycle();
        let session = Session::identified(SessionIdentity::new("alice", "acme"));
        cycle.on_begin_request(Some(&session));
        assert_eq!(
            agent.calls(),
            vec![
                AgentCall::SetUserName("alice".into()),
                AgentCall::SetAccountName("acme".into()),
            ]
        );
    }

    #[test]
    fn missing_or_anonymous_session_forwards_nothing() {
        let agent = Arc::new(RecordingAgent::new());
        let mut cycle = RequestCycleFactory::new("", agent.clone()).new_request_cycle();
        cycle.on_begin_request(None);
        cycle.on_begin_request(Some(&Session::anonymous()));
        assert!(agent.calls().is_empty());
    }

    #[test]
    fn names_first_target() {
        let (agent, mut cycle) = cycle();
        cycle.on_request_target_set(&RequestTarget::listener(
            "com.app.pages.Edit",
            ListenerInvocation::new("submitBtn", "IFormSubmitListener"),
        ));
        assert_eq!(
            agent.calls(),
            vec![AgentCall::SetTransactionName {
                category: None,
                name: "/Edit/submitBtn/IFormSubmitListener".into(),
            }]
        );
        assert!(!cycle.is_awaiting_target());
    }

    #[test]
    fn ignores_other_targets() {
        let (agent, mut cycle) = cycle();
        cycle.on_request_target_set(&RequestTarget::Other);
        assert!(agent.is_ignored());
        assert!(agent.transaction_names().is_empty());
    }

    #[test]
    fn later_targets_are_no_ops() {
        let (agent, mut cycle) = cycle();
        cycle.on_request_target_set(&RequestTarget::bookmarkable_page("com.app.pages.Home"));
        cycle.on_request_target_set(&RequestTarget::component("com.app.pages.List", "row-3"));
        cycle.on_request_target_set(&RequestTarget::Other);
        assert_eq!(agent.transaction_names(), vec!["/Home".to_owned()]);
        assert!(!agent.is_ignored());
    }

    #[test]
    fn ignored_transaction_stays_ignored() {
        let (agent, mut cycle) = cycle();
        cycle.on_request_target_set(&RequestTarget::Other);
        cycle.on_request_target_set(&RequestTarget::page("com.app.pages.Home"));
        assert_eq!(agent.calls(), vec![AgentCall::IgnoreTransaction]);
    }

    #[test]
    fn begin_request_rearms_first_target() {
        let (agent, mut cycle) = cycle();
        cycle.on_request_target_set(&RequestTarget::page("com.app.pages.Home"));
        cycle.on_begin_request(None);
        cycle.on_request_target_set(&RequestTarget::page("com.app.pages.About"));
        assert_eq!(
            agent.transaction_names(),
            vec!["/Home".to_owned(), "/About".to_owned()]
        );
    }

    #[test]
    fn runtime_exception_is_noticed_without_replacement() {
        let (agent, mut cycle) = cycle();
        assert!(cycle.on_runtime_exception(&Boom).is_none());
        assert_eq!(agent.calls(), vec![AgentCall::NoticeError("boom".into())]);
    }
}
