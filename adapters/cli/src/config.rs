use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use gridworld_system_reward::RewardConfig;
use gridworld_world::{Scenario, PRESET_NAMES};
use serde::Deserialize;

/// TOML document describing a scenario and its reward constants.
///
/// ```toml
/// [scenario]
/// shape = [10, 10]
/// player = [1, 4]
/// key = [7, 5]
/// lock = [1, 1]
///
/// [rewards]
/// player_moved_into_pit = -500
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct ScenarioFile {
    /// Starting configuration of the task.
    pub(crate) scenario: Scenario,
    /// Reward overrides; omitted constants keep their defaults.
    #[serde(default)]
    pub(crate) rewards: RewardConfig,
}

impl ScenarioFile {
    /// Reads and parses the document stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("failed to load scenario file {}", path.display()))
    }

    /// Parses a document from its TOML text.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("scenario document is not valid TOML")
    }

    /// Wraps a built-in curriculum preset with default rewards.
    pub(crate) fn preset(name: &str) -> Result<Self> {
        let Some(scenario) = Scenario::preset(name) else {
            bail!(
                "unknown preset `{name}`, expected one of: {}",
                PRESET_NAMES.join(", ")
            );
        };
        Ok(Self {
            scenario,
            rewards: RewardConfig::default(),
        })
    }
}
