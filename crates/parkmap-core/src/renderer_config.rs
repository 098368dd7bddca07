use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Coordinate};

/// Highest zoom level accepted by the slippy-map tile scheme.
pub const MAX_ZOOM: u8 = 22;

/// Stroke and fill used when drawing parking lot polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonStyle {
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: u32,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#088".to_string(),
            stroke_opacity: 0.8,
            stroke_weight: 2,
            fill_color: "#088".to_string(),
            fill_opacity: 0.5,
        }
    }
}

/// Stroke used when drawing parking zone polylines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: String,
    pub opacity: f64,
    pub weight: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#FF8527".to_string(),
            opacity: 1.0,
            weight: 6,
        }
    }
}

/// Marker appearance, passed to each renderer explicitly instead of being
/// patched into a map library's global defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub icon_url: String,
    pub shadow_url: String,
    pub location_title: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon_url: "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png".to_string(),
            shadow_url: "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png"
                .to_string(),
            location_title: "Your Location".to_string(),
        }
    }
}

/// Everything a renderer backend needs at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Map center before geolocation resolves (downtown Calgary).
    pub default_center: Coordinate,
    pub default_zoom: u8,
    /// Zoom used when recentering on the user's location.
    pub locate_zoom: u8,
    /// Zoom used when focusing a selected search result.
    pub focus_zoom: u8,
    pub lot_style: PolygonStyle,
    pub zone_style: LineStyle,
    pub marker: MarkerStyle,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinate {
                latitude: 51.0447,
                longitude: -114.0719,
            },
            default_zoom: 12,
            locate_zoom: 15,
            focus_zoom: 15,
            lot_style: PolygonStyle::default(),
            zone_style: LineStyle::default(),
            marker: MarkerStyle::default(),
        }
    }
}

/// Load and validate a renderer configuration from a YAML file.
///
/// Fields absent from the file keep their defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_renderer_config(path: &Path) -> Result<RendererConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RendererConfigIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_renderer_config(&content)
}

/// Parse and validate a renderer configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_renderer_config(content: &str) -> Result<RendererConfig, ConfigError> {
    let config: RendererConfig = serde_yaml::from_str(content)?;
    validate_renderer_config(&config)?;
    Ok(config)
}

fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    Coordinate::new(
        config.default_center.latitude,
        config.default_center.longitude,
    )
    .map_err(|e| ConfigError::Validation(format!("default_center: {e}")))?;

    for (field, zoom) in [
        ("default_zoom", config.default_zoom),
        ("locate_zoom", config.locate_zoom),
        ("focus_zoom", config.focus_zoom),
    ] {
        if zoom > MAX_ZOOM {
            return Err(ConfigError::Validation(format!(
                "{field} {zoom} exceeds maximum zoom {MAX_ZOOM}"
            )));
        }
    }

    for (field, opacity) in [
        ("lot_style.stroke_opacity", config.lot_style.stroke_opacity),
        ("lot_style.fill_opacity", config.lot_style.fill_opacity),
        ("zone_style.opacity", config.zone_style.opacity),
    ] {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ConfigError::Validation(format!(
                "{field} {opacity} must be within [0, 1]"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_renderer_config("{}").unwrap();
        assert_eq!(config, RendererConfig::default());
        assert_eq!(config.default_zoom, 12);
        assert_eq!(config.zone_style.color, "#FF8527");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let yaml = "focus_zoom: 17\nzone_style:\n  weight: 4\n";
        let config = parse_renderer_config(yaml).unwrap();
        assert_eq!(config.focus_zoom, 17);
        assert_eq!(config.zone_style.weight, 4);
        assert_eq!(config.zone_style.color, "#FF8527");
        assert_eq!(config.lot_style, PolygonStyle::default());
    }

    #[test]
    fn zoom_above_maximum_is_rejected() {
        let err = parse_renderer_config("locate_zoom: 30").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("locate_zoom")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn opacity_outside_unit_interval_is_rejected() {
        let err = parse_renderer_config("lot_style:\n  fill_opacity: 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("fill_opacity")));
    }

    #[test]
    fn default_center_out_of_range_is_rejected() {
        let yaml = "default_center:\n  latitude: 120.0\n  longitude: 0.0\n";
        let err = parse_renderer_config(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("default_center")));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_renderer_config(Path::new("/nonexistent/parkmap/renderer.yaml"))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::RendererConfigIo { ref path, .. } if path.ends_with("renderer.yaml"))
        );
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse_renderer_config("default_zoom: [not, a, number]").unwrap_err();
        assert!(matches!(err, ConfigError::RendererConfigParse(_)));
    }
}
