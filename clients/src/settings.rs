//! Configuration file for `lockcube-unlock`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lockcube_solver::SolverConfig;
use lockcube_world::WorldConfig;
use serde::{Deserialize, Serialize};

/// Contents of a configuration file. Missing sections and keys take their
/// defaults; unknown keys are rejected.
///
/// ```toml
/// [world]
/// min_axis = 4
/// max_axis = 12
/// seed = 7
///
/// [solver]
/// threads = 4
/// verify = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// How the cube is generated.
    pub world: WorldConfig,
    /// How the cube is solved.
    pub solver: SolverConfig,
}

impl Settings {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not valid TOML or names unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse configuration")
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns the first section error, labelled with its section.
    pub fn validate(&self) -> Result<()> {
        self.world.validate().context("Invalid [world] section")?;
        self.solver.validate().context("Invalid [solver] section")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn sections_fill_their_configs() {
        let s = Settings::from_toml_str(
            r#"
            [world]
            min_axis = 2
            max_axis = 5
            seed = 9

            [solver]
            threads = 3
            verify = false
            "#,
        )
        .unwrap();
        assert_eq!(s.world.min_axis, 2);
        assert_eq!(s.world.max_axis, 5);
        assert_eq!(s.world.seed, Some(9));
        assert_eq!(s.world.lock_frequency, WorldConfig::default().lock_frequency);
        assert_eq!(s.solver.threads, Some(3));
        assert!(!s.solver.verify);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml_str("[world]\nsize = 4\n").is_err());
        assert!(Settings::from_toml_str("[network]\n").is_err());
    }

    #[test]
    fn validation_names_the_section() {
        let s = Settings::from_toml_str("[solver]\nthreads = 0\n").unwrap();
        let err = s.validate().unwrap_err();
        assert!(format!("{err:#}").contains("[solver]"));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = Settings::load(Path::new("/nonexistent/lockcube.toml")).unwrap_err();
        assert!(err.to_string().contains("lockcube.toml"));
    }
}
