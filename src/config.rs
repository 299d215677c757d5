//! Environment-driven configuration.
//!
//! Every structural parameter of this machine (cache geometry, pipeline
//! depth, bus latency) is fixed by the architecture itself, so unlike the
//! teacher's TOML-backed `Config` there is nothing here to deserialize —
//! the only tunables are two environment variables, read once at startup.

use std::env;

/// Simulation-wide configuration sourced from the environment.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// Optional hard cap on the number of cycles to run, from
    /// `SIM_MAX_CYCLES`. `None` means run to quiescence.
    pub max_cycles: Option<u64>,
    /// Whether `SIM_DEBUG_BRANCH` was set, enabling `debug!`-level
    /// logging of every branch and JAL resolution.
    pub debug_branch: bool,
}

impl SimConfig {
    /// Reads `SIM_MAX_CYCLES` and `SIM_DEBUG_BRANCH` from the process
    /// environment. A malformed `SIM_MAX_CYCLES` is treated as absent.
    pub fn from_env() -> Self {
        let max_cycles = env::var("SIM_MAX_CYCLES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());
        let debug_branch = env::var("SIM_DEBUG_BRANCH").is_ok();
        Self {
            max_cycles,
            debug_branch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_cap_and_no_debug() {
        let config = SimConfig::default();
        assert_eq!(config.max_cycles, None);
        assert!(!config.debug_branch);
    }
}
