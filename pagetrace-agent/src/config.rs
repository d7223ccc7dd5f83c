use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Application name reported with every browser beacon.
    pub app_name: String,
    /// Host the browser script sends its timings to.
    pub beacon: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("pagetrace"),
            beacon: String::from("localhost"),
        }
    }
}
