//! Transaction naming and browser timing for server-rendered pages.
//!
//! Two touchpoints bridge a page-oriented request lifecycle with an
//! [`Agent`]:
//!
//! - [`labels`] builds the browser timing header and footer fragments;
//! - [`RequestCycle`] names the transaction after the first dispatched
//!   [`RequestTarget`], forwards the session identity and notices uncaught
//!   errors.
//!
//! [`PagetraceRouter`] mounts the request cycle on an axum router.
mod config;
mod cycle;
pub mod labels;
mod naming;
mod session;
mod target;
mod web;

pub use config::PagetraceConfig;
pub use cycle::{RequestCycle, RequestCycleFactory};
pub use labels::{browser_timing_footer_label, browser_timing_header_label, Label};
pub use naming::TransactionNamer;
pub use pagetrace_agent::{Agent, AgentCall, AgentConfig, RecordingAgent, TracingAgent};
pub use session::{Session, SessionIdentity};
pub use target::{ListenerInvocation, PageClass, RequestTarget};
pub use web::{CycleHandle, PagetraceRouter, RuntimeException};
