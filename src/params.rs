//! Operator-facing shell parameters and editor configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::math::UNIT_SCALE;

/// Operator range for [`MeshParameters::heel_thickness`].
pub const HEEL_THICKNESS_RANGE: (f64, f64) = (15.0, 40.0);
/// Operator range for [`MeshParameters::toe_thickness`].
pub const TOE_THICKNESS_RANGE: (f64, f64) = (1.0, 10.0);
/// Operator range for [`MeshParameters::arch_height`].
pub const ARCH_HEIGHT_RANGE: (f64, f64) = (0.0, 80.0);

/// Parameters controlling the shell's thickness profile and display.
///
/// Thicknesses are in contour units (millimetres). The setters clamp to the
/// operator ranges; fields may also be assigned directly, in which case the
/// thickness field trusts the values as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeshParameters {
    pub heel_thickness: f64,
    pub toe_thickness: f64,
    pub arch_height: f64,
    pub wireframe_enabled: bool,
    pub contours_visible: bool,
    /// Surface colour as a `#rrggbb` string.
    pub surface_color: String,
}

impl Default for MeshParameters {
    fn default() -> Self {
        Self {
            heel_thickness: 25.0,
            toe_thickness: 3.0,
            arch_height: 20.0,
            wireframe_enabled: false,
            contours_visible: true,
            surface_color: "#E67E22".into(),
        }
    }
}

impl MeshParameters {
    pub fn set_heel_thickness(&mut self, value: f64) {
        self.heel_thickness = clamp_range(value, HEEL_THICKNESS_RANGE);
    }

    pub fn set_toe_thickness(&mut self, value: f64) {
        self.toe_thickness = clamp_range(value, TOE_THICKNESS_RANGE);
    }

    pub fn set_arch_height(&mut self, value: f64) {
        self.arch_height = clamp_range(value, ARCH_HEIGHT_RANGE);
    }

    /// Parses the surface colour into a packed `0xRRGGBB` value.
    ///
    /// Returns `None` for anything other than `#` followed by six hex digits.
    #[must_use]
    pub fn surface_rgb(&self) -> Option<u32> {
        let hex = self.surface_color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok()
    }
}

fn clamp_range(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Fixed constants of the editor: unit scale, handle placement and camera
/// motion tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Contour units to scene units.
    pub unit_scale: f64,
    /// Scene-space height at which handles float above the shell.
    pub handle_elevation: f64,
    /// Radius of each handle's pick sphere, in scene units.
    pub handle_radius: f64,
    /// Height of the contour overlay lines above the build plane, in scene units.
    pub contour_overlay_elevation: f64,
    /// Keyboard camera acceleration.
    pub move_speed: f64,
    /// Keyboard camera velocity damping per second.
    pub move_damping: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            unit_scale: UNIT_SCALE,
            handle_elevation: 0.15,
            handle_radius: 0.03,
            contour_overlay_elevation: 0.02,
            move_speed: 30.0,
            move_damping: 10.0,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a configuration from JSON. Missing fields take
    /// their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that scale and radius are strictly positive and the motion
    /// tuning is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [("unitScale", self.unit_scale), ("handleRadius", self.handle_radius)];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")).into());
            }
        }
        let non_negative = [("moveSpeed", self.move_speed), ("moveDamping", self.move_damping)];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(
                    ConfigError::Invalid(format!("{name} must be non-negative, got {value}")).into(),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_operator_panel() {
        let p = MeshParameters::default();
        assert!((p.heel_thickness - 25.0).abs() < f64::EPSILON);
        assert!((p.toe_thickness - 3.0).abs() < f64::EPSILON);
        assert!((p.arch_height - 20.0).abs() < f64::EPSILON);
        assert!(!p.wireframe_enabled);
        assert!(p.contours_visible);
        assert_eq!(p.surface_rgb(), Some(0xE6_7E_22));
    }

    #[test]
    fn setters_clamp_to_operator_ranges() {
        let mut p = MeshParameters::default();
        p.set_heel_thickness(100.0);
        p.set_toe_thickness(0.0);
        p.set_arch_height(-5.0);
        assert!((p.heel_thickness - 40.0).abs() < f64::EPSILON);
        assert!((p.toe_thickness - 1.0).abs() < f64::EPSILON);
        assert!(p.arch_height.abs() < f64::EPSILON);

        p.set_arch_height(f64::NAN);
        assert!(p.arch_height.abs() < f64::EPSILON);
    }

    #[test]
    fn bad_colour_has_no_rgb() {
        let p = MeshParameters {
            surface_color: "orange".into(),
            ..MeshParameters::default()
        };
        assert!(p.surface_rgb().is_none());
    }

    #[test]
    fn parameters_deserialize_partial() {
        let p: MeshParameters = serde_json::from_str(r#"{"heelThickness": 30}"#).unwrap();
        assert!((p.heel_thickness - 30.0).abs() < f64::EPSILON);
        assert!((p.toe_thickness - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn config_from_json_fills_defaults() {
        let c = EditorConfig::from_json(r#"{"handleRadius": 0.05}"#).unwrap();
        assert!((c.handle_radius - 0.05).abs() < f64::EPSILON);
        assert!((c.unit_scale - UNIT_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn config_rejects_zero_scale() {
        assert!(EditorConfig::from_json(r#"{"unitScale": 0}"#).is_err());
        assert!(EditorConfig::from_json("not json").is_err());
    }
}
