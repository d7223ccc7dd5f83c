/// User and account names of a signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_name: String,
    pub account_name: String,
}

impl SessionIdentity {
    pub fn new(user_name: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            account_name: account_name.into(),
        }
    }
}

/// The session of the current request.
///
/// Put it in the request extensions before the request cycle middleware runs
/// to have its identity forwarded to the agent. A session without identity
/// is forwarded as nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<SessionIdentity>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn identified(identity: SessionIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }
}
