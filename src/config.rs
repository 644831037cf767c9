//! Renderer configuration.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Environment variable overriding the layout executable.
pub const ENV_PROGRAM: &str = "TECHGRAPH_DOT";
/// Environment variable overriding the render timeout, in whole seconds.
pub const ENV_TIMEOUT: &str = "TECHGRAPH_RENDER_TIMEOUT_SECS";

/// How to invoke the external layout tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Executable to run; looked up on `PATH` when not absolute.
    pub program: PathBuf,
    /// Output format passed as `-T<format>`.
    pub format: String,
    /// The child is killed once this elapses.
    pub timeout: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("dot"),
            format: "svg".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RenderConfig {
    /// Defaults, overridden by `TECHGRAPH_DOT` and
    /// `TECHGRAPH_RENDER_TIMEOUT_SECS` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(program) = std::env::var_os(ENV_PROGRAM) {
            config.program = PathBuf::from(program);
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => warn!(value = %raw, "ignoring unparseable {ENV_TIMEOUT}"),
            }
        }
        config
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
