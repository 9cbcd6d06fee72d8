use std::path::PathBuf;

use serde::Deserialize;

/// Default directory for documentation files, relative to the working directory.
pub const DEFAULT_DOCS_PATH: &str = "doc/api";

/// Default environment variable enabling on-demand capture.
pub const DEFAULT_ACTIVATION_VAR: &str = "API_DOCS";

/// Recorder configuration.
///
/// Fields are public and the type derives [`Deserialize`], so it can be built in code
/// or loaded from any serde format; missing fields take their default value.
///
/// # Example
///
/// ```rust
/// use apidocs_core::{ActivationSignal, DocsConfig};
///
/// let config = DocsConfig::default()
///     .with_docs_path("target/api-docs")
///     .with_generate_on_demand(true)
///     .with_activation(ActivationSignal::EnvVar("RECORD_DOCS".to_string()));
///
/// assert!(config.automatic_write);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Directory holding one documentation file per controller.
    pub docs_path: PathBuf,
    /// Only capture when the activation signal is present.
    pub generate_on_demand: bool,
    /// Write the controller file after every capture instead of once per session.
    pub automatic_write: bool,
    /// Signal checked when `generate_on_demand` is set.
    pub activation: ActivationSignal,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            docs_path: PathBuf::from(DEFAULT_DOCS_PATH),
            generate_on_demand: false,
            automatic_write: true,
            activation: ActivationSignal::default(),
        }
    }
}

impl DocsConfig {
    /// Sets the documentation directory.
    pub fn with_docs_path(mut self, docs_path: impl Into<PathBuf>) -> Self {
        self.docs_path = docs_path.into();
        self
    }

    /// Enables or disables on-demand capture.
    pub fn with_generate_on_demand(mut self, generate_on_demand: bool) -> Self {
        self.generate_on_demand = generate_on_demand;
        self
    }

    /// Chooses between per-call writes (`true`) and session writes (`false`).
    pub fn with_automatic_write(mut self, automatic_write: bool) -> Self {
        self.automatic_write = automatic_write;
        self
    }

    /// Sets the activation signal.
    pub fn with_activation(mut self, activation: ActivationSignal) -> Self {
        self.activation = activation;
        self
    }

    /// Returns `true` if calls should be captured right now.
    ///
    /// The activation signal is only consulted in on-demand mode.
    pub fn should_capture(&self) -> bool {
        !self.generate_on_demand || self.activation.is_active()
    }
}

/// Tells whether on-demand capture is currently requested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationSignal {
    /// Active when the environment variable is set, whatever its value.
    EnvVar(String),
    /// Always active.
    Always,
    /// Never active.
    Never,
}

impl Default for ActivationSignal {
    fn default() -> Self {
        Self::EnvVar(DEFAULT_ACTIVATION_VAR.to_string())
    }
}

impl ActivationSignal {
    /// Returns `true` if the signal is present.
    pub fn is_active(&self) -> bool {
        match self {
            Self::EnvVar(name) => std::env::var_os(name).is_some(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::yaml::from_yaml;

    #[test]
    fn should_have_sensible_defaults() {
        let config = DocsConfig::default();

        assert_eq!(config.docs_path, PathBuf::from("doc/api"));
        assert!(!config.generate_on_demand);
        assert!(config.automatic_write);
        assert_eq!(
            config.activation,
            ActivationSignal::EnvVar("API_DOCS".to_string())
        );
    }

    #[rstest]
    #[case::always_capturing(false, ActivationSignal::Never, true)]
    #[case::on_demand_active(true, ActivationSignal::Always, true)]
    #[case::on_demand_inactive(true, ActivationSignal::Never, false)]
    fn should_gate_capture(
        #[case] generate_on_demand: bool,
        #[case] activation: ActivationSignal,
        #[case] expected: bool,
    ) {
        let config = DocsConfig::default()
            .with_generate_on_demand(generate_on_demand)
            .with_activation(activation);

        assert_eq!(config.should_capture(), expected);
    }

    #[test]
    fn should_detect_env_var_presence() {
        assert!(ActivationSignal::EnvVar("PATH".to_string()).is_active());
        assert!(!ActivationSignal::EnvVar("APIDOCS_SURELY_UNSET_VARIABLE".to_string()).is_active());
    }

    #[test]
    fn should_deserialize_partial_config() {
        let yaml = "docs_path: target/docs\nautomatic_write: false\n";

        let config: DocsConfig = match from_yaml(yaml) {
            Ok(config) => config,
            Err(err) => panic!("should parse config: {err}"),
        };

        assert_eq!(
            config,
            DocsConfig::default()
                .with_docs_path("target/docs")
                .with_automatic_write(false)
        );
    }

    #[test]
    fn should_deserialize_activation_signal() {
        let config: DocsConfig = match from_yaml("generate_on_demand: true\nactivation: always\n") {
            Ok(config) => config,
            Err(err) => panic!("should parse config: {err}"),
        };

        assert!(config.should_capture());
    }
}
