//! Leg configuration – reads/writes a TOML leg description.
//!
//! ```toml
//! validate = true
//! singularity_tolerance = 1e-9
//!
//! [lengths]
//! l1 = 0.05
//! l2 = 0.20
//! l3 = 0.20
//!
//! [pose]
//! theta1_deg = 20.0
//! theta2_deg = -10.0
//! theta3_deg = 30.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use hexaleg_types::{JointAngles, KinematicsError, LinkLengths};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::forward::{KinematicChain, compute_chain};
use crate::jacobian::{Jacobian, compute_jacobian};

/// Environment variable naming the config file to load.
pub const CONFIG_ENV: &str = "HEXALEG_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "hexaleg.toml";

/// Joint angles in degrees, as written by hand in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseDegrees {
    #[serde(default)]
    pub theta1_deg: f64,
    #[serde(default)]
    pub theta2_deg: f64,
    #[serde(default)]
    pub theta3_deg: f64,
}

impl PoseDegrees {
    /// Pose of the reference hexapod leg: (20°, -10°, 30°).
    pub fn reference() -> Self {
        Self {
            theta1_deg: 20.0,
            theta2_deg: -10.0,
            theta3_deg: 30.0,
        }
    }
}

/// Persisted description of a leg and the pose to evaluate it at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegConfig {
    /// Reject negative or non-finite link lengths on load.
    #[serde(default = "default_validate")]
    pub validate: bool,

    /// Column-norm / determinant threshold for singularity detection.
    #[serde(default = "default_singularity_tolerance")]
    pub singularity_tolerance: f64,

    pub lengths: LinkLengths,

    /// Defaults to the all-zero pose when absent.
    #[serde(default)]
    pub pose: PoseDegrees,
}

fn default_validate() -> bool {
    true
}
fn default_singularity_tolerance() -> f64 {
    1e-9
}

impl Default for LegConfig {
    fn default() -> Self {
        Self {
            validate: default_validate(),
            singularity_tolerance: default_singularity_tolerance(),
            lengths: LinkLengths::new(0.05, 0.20, 0.20),
            pose: PoseDegrees::reference(),
        }
    }
}

impl LegConfig {
    pub fn lengths(&self) -> LinkLengths {
        self.lengths
    }

    /// Configured pose converted to radians.
    pub fn angles(&self) -> JointAngles {
        JointAngles::from_degrees(
            self.pose.theta1_deg,
            self.pose.theta2_deg,
            self.pose.theta3_deg,
        )
    }

    /// Forward kinematics at the configured pose.
    pub fn chain(&self) -> KinematicChain {
        compute_chain(self.lengths, self.angles())
    }

    /// Velocity Jacobian at the configured pose.
    pub fn jacobian(&self) -> Jacobian {
        compute_jacobian(&self.chain())
    }

    /// Check link lengths and the singularity tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] for a negative or
    /// non-finite length or tolerance.
    pub fn validate(&self) -> Result<(), KinematicsError> {
        self.lengths.validated()?;
        let tol = self.singularity_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(KinematicsError::InvalidParameter {
                name: "singularity_tolerance".to_string(),
                value: tol,
                reason: "tolerance must be finite and non-negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Path of the config file: `$HEXALEG_CONFIG`, or `./hexaleg.toml`.
pub fn config_path() -> PathBuf {
    config_path_from(std::env::var(CONFIG_ENV).ok())
}

/// Resolve the config path from an optional override.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_from(value: Option<String>) -> PathBuf {
    match value {
        Some(v) if !v.is_empty() => PathBuf::from(v),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Load the config from [`config_path`].  Returns `None` if the file does not
/// exist.
pub fn load() -> Result<Option<LegConfig>, KinematicsError> {
    load_from(&config_path())
}

/// Load the config from a specific path.
///
/// Environment overrides are applied before validation.
pub fn load_from(path: &Path) -> Result<Option<LegConfig>, KinematicsError> {
    if !path.exists() {
        debug!(path = %path.display(), "no leg config file");
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        KinematicsError::Config(format!("Failed to read config at {}: {}", path.display(), e))
    })?;
    let mut cfg: LegConfig = toml::from_str(&raw)
        .map_err(|e| KinematicsError::Config(format!("Failed to parse config: {}", e)))?;
    apply_env_overrides(&mut cfg);
    if cfg.validate {
        cfg.validate()?;
    }
    debug!(path = %path.display(), lengths = ?cfg.lengths, "loaded leg config");
    Ok(Some(cfg))
}

/// Apply `HEXALEG_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `HEXALEG_L1` | `lengths.l1` |
/// | `HEXALEG_L2` | `lengths.l2` |
/// | `HEXALEG_L3` | `lengths.l3` |
pub fn apply_env_overrides(cfg: &mut LegConfig) {
    apply_overrides(cfg, |key| std::env::var(key).ok());
}

/// Apply overrides read through `lookup`.  Values that do not parse as a
/// number are ignored.
pub(crate) fn apply_overrides(cfg: &mut LegConfig, lookup: impl Fn(&str) -> Option<String>) {
    let fields: [(&str, &mut f64); 3] = [
        ("HEXALEG_L1", &mut cfg.lengths.l1),
        ("HEXALEG_L2", &mut cfg.lengths.l2),
        ("HEXALEG_L3", &mut cfg.lengths.l3),
    ];
    for (key, field) in fields {
        if let Some(v) = lookup(key) {
            match v.trim().parse::<f64>() {
                Ok(value) => *field = value,
                Err(e) => warn!(key, value = %v, error = %e, "ignoring unparseable override"),
            }
        }
    }
}

/// Save the config to a specific path, creating parent directories.
pub fn save_to(cfg: &LegConfig, path: &Path) -> Result<(), KinematicsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            KinematicsError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| KinematicsError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, raw).map_err(|e| {
        KinematicsError::Config(format!("Failed to write config at {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn roundtrip_default_config() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("legs").join("front_left.toml");

        save_to(&LegConfig::default(), &path).expect("save");

        let loaded = load_from(&path).expect("load ok").expect("some");
        assert_eq!(loaded, LegConfig::default());
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let result = load_from(&dir.path().join("hexaleg.toml")).expect("no error");
        assert!(result.is_none());
    }

    #[test]
    fn missing_pose_defaults_to_zero() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("hexaleg.toml");
        fs::write(&path, "[lengths]\nl1 = 0.1\nl2 = 0.2\nl3 = 0.3\n").unwrap();

        let cfg = load_from(&path).unwrap().unwrap();
        assert!(cfg.validate);
        assert!((cfg.singularity_tolerance - 1e-9).abs() < f64::EPSILON);
        assert_eq!(cfg.angles(), JointAngles::zero());
        assert!((cfg.chain().toe().x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("hexaleg.toml");
        fs::write(&path, "[lengths]\nl1 = \"long\"\n").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, KinematicsError::Config(_)), "got {err:?}");
    }

    #[test]
    fn negative_length_fails_validation_on_load() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("hexaleg.toml");
        fs::write(&path, "[lengths]\nl1 = 0.05\nl2 = -0.2\nl3 = 0.2\n").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, KinematicsError::InvalidParameter { .. }), "got {err:?}");
    }

    #[test]
    fn validation_can_be_disabled() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("hexaleg.toml");
        fs::write(&path, "validate = false\n[lengths]\nl1 = -0.05\nl2 = 0.2\nl3 = 0.2\n").unwrap();

        let cfg = load_from(&path).unwrap().unwrap();
        assert!((cfg.lengths.l1 + 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let cfg = LegConfig {
            singularity_tolerance: -1.0,
            ..LegConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn overrides_replace_lengths() {
        let mut cfg = LegConfig::default();
        apply_overrides(&mut cfg, lookup_from(&[("HEXALEG_L2", "0.35"), ("HEXALEG_L3", " 0.4 ")]));
        assert!((cfg.lengths.l1 - 0.05).abs() < f64::EPSILON);
        assert!((cfg.lengths.l2 - 0.35).abs() < f64::EPSILON);
        assert!((cfg.lengths.l3 - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn overrides_ignore_invalid_numbers() {
        let mut cfg = LegConfig::default();
        apply_overrides(&mut cfg, lookup_from(&[("HEXALEG_L1", "not-a-length")]));
        assert_eq!(cfg.lengths, LegConfig::default().lengths);
    }

    #[test]
    fn config_path_falls_back_to_default_file() {
        assert_eq!(config_path_from(None), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(config_path_from(Some(String::new())), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(
            config_path_from(Some("/etc/hexaleg/rear.toml".to_string())),
            PathBuf::from("/etc/hexaleg/rear.toml")
        );
    }

    #[test]
    fn default_config_evaluates_reference_leg() {
        let cfg = LegConfig::default();
        let j = cfg.jacobian();
        assert!((cfg.chain().toe().x - 0.40867239103085795).abs() < 1e-12);
        assert!(!j.is_singular(cfg.singularity_tolerance));
    }
}
