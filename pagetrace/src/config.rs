use std::{fs, path::Path, str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use pagetrace_agent::{Agent, AgentConfig};
use serde::Deserialize;

use crate::cycle::RequestCycleFactory;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagetraceConfig {
    /// Prefix stripped from page classes before they become transaction
    /// names, e.g. `com.app.pages` or `shop::pages`.
    pub package_prefix: String,
    #[serde(default)]
    pub agent: AgentConfig,
}

impl PagetraceConfig {
    pub fn parse_from_toml<P: AsRef<Path>>(source: P) -> Result<Self> {
        let source = source.as_ref();
        let content = fs::read_to_string(source)
            .with_context(|| format!("Read `{}` failed", source.display()))?;

        content
            .parse::<Self>()
            .with_context(|| format!("Parse `{}` failed", source.display()))
    }

    pub fn request_cycle_factory(&self, agent: Arc<dyn Agent>) -> RequestCycleFactory {
        RequestCycleFactory::new(self.package_prefix.clone(), agent)
    }
}

impl FromStr for PagetraceConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
