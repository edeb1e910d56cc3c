//! Conversion settings
//!
//! Settings can come from a JSON file; command line arguments override them.

use anyhow::{bail, Context};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::curves::{ConvertOptions, LodOptions};

/// Everything a conversion run needs besides input and output paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Values <= 0 disable LOD merging
    pub lod_level: i32,
    /// Convert only the first N strands; `None` converts all
    pub max_strands: Option<usize>,
    /// Thickness override; `None` or non-positive keeps file thickness
    pub thickness: Option<f32>,
    pub scale: [f32; 3],
    pub translate: [f32; 3],
    pub lod: LodOptions,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            lod_level: -1,
            max_strands: None,
            thickness: None,
            scale: [1.0; 3],
            translate: [0.0; 3],
            lod: LodOptions::default(),
        }
    }
}

impl ConversionConfig {
    /// Read a JSON config; missing fields take their defaults
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would emit negative or non-finite widths
    pub fn validate(&self) -> anyhow::Result<()> {
        let max_radius = self.lod.max_radius;
        if !max_radius.is_finite() || max_radius <= 0.0 {
            bail!("LOD max radius must be a positive number, got {}", max_radius);
        }
        Ok(())
    }

    pub fn lod_enabled(&self) -> bool {
        self.lod_level > 0
    }

    /// Thickness as reported in output headers (-1 when unset)
    pub fn reported_thickness(&self) -> f32 {
        self.thickness.unwrap_or(-1.0)
    }

    pub fn to_convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            scale: Vec3::from_array(self.scale),
            translate: Vec3::from_array(self.translate),
            max_strands: self.max_strands,
            user_thickness: self.thickness.filter(|&t| t > 0.0),
            lod: self.lod_enabled().then(|| self.lod.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::SortMetric;

    #[test]
    fn test_defaults_disable_lod() {
        let config = ConversionConfig::default();
        let options = config.to_convert_options();
        assert!(options.lod.is_none());
        assert!(options.user_thickness.is_none());
        assert_eq!(options.scale, Vec3::ONE);
        assert_eq!(config.reported_thickness(), -1.0);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "lod_level": 1, "thickness": 0.5, "lod": { "max_radius": 0.3, "sort_metric": "root_point" } }"#;
        let config: ConversionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_strands, None);
        assert_eq!(config.lod.samples, 2);
        let options = config.to_convert_options();
        let lod = options.lod.unwrap();
        assert_eq!(lod.max_radius, 0.3);
        assert_eq!(lod.sort_metric, SortMetric::RootPoint);
        assert_eq!(options.user_thickness, Some(0.5));
    }

    #[test]
    fn test_non_positive_thickness_ignored() {
        let config = ConversionConfig { thickness: Some(0.0), ..Default::default() };
        assert!(config.to_convert_options().user_thickness.is_none());
    }

    #[test]
    fn test_max_radius_must_be_positive() {
        assert!(ConversionConfig::default().validate().is_ok());
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut config = ConversionConfig::default();
            config.lod.max_radius = bad;
            assert!(config.validate().is_err(), "{}", bad);
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{ "lod": { "max_radius": -0.5 } }"#).unwrap();
        assert!(ConversionConfig::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{ "max_strands": 10, "scale": [2.0, 2.0, 2.0] }"#).unwrap();
        let config = ConversionConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.max_strands, Some(10));
        assert_eq!(config.scale, [2.0; 3]);

        assert!(ConversionConfig::load_from_file(Path::new("missing/config.json")).is_err());
    }
}
