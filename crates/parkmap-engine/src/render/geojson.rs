//! GeoJSON scene builder for browser map libraries.
//!
//! Positions are written back in GeoJSON order, `[longitude, latitude]`.
//! Style properties use the simplestyle names (`stroke`, `fill-opacity`, ...)
//! understood by most web map viewers.

use parkmap_core::{Coordinate, RendererConfig};
use serde_json::{json, Value};

use super::{RendererAdapter, View};
use crate::overlay::{Detail, LineSetOverlay, Overlay, PolygonOverlay};

/// Accumulates drawn overlays, markers, the current view and the open
/// popup into a single `FeatureCollection`.
#[derive(Debug, Clone)]
pub struct GeoJsonRenderer {
    config: RendererConfig,
    overlays: Vec<Value>,
    markers: Vec<Value>,
    view: View,
    popup: Option<Value>,
}

impl GeoJsonRenderer {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        let view = View {
            center: config.default_center,
            zoom: config.default_zoom,
        };
        Self {
            config,
            overlays: Vec::new(),
            markers: Vec::new(),
            view,
            popup: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Overlay and marker features drawn so far.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.overlays.len() + self.markers.len()
    }

    /// The scene as a GeoJSON `FeatureCollection`. The view and popup are
    /// carried as foreign members.
    #[must_use]
    pub fn to_feature_collection(&self) -> Value {
        let features: Vec<Value> = self
            .overlays
            .iter()
            .chain(&self.markers)
            .cloned()
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
            "view": {
                "center": self.view.center.to_lng_lat(),
                "zoom": self.view.zoom,
            },
            "popup": self.popup,
        })
    }

    fn polygon_feature(&self, polygon: &PolygonOverlay) -> Value {
        let style = &self.config.lot_style;
        json!({
            "type": "Feature",
            "id": polygon.source_id,
            "geometry": {
                "type": "Polygon",
                "coordinates": [closed_ring(&polygon.ring)],
            },
            "properties": {
                "kind": "lot",
                "label": polygon.label,
                "anchor": polygon.anchor.to_lng_lat(),
                "detail": polygon.detail,
                "stroke": style.stroke_color,
                "stroke-opacity": style.stroke_opacity,
                "stroke-width": style.stroke_weight,
                "fill": style.fill_color,
                "fill-opacity": style.fill_opacity,
            },
        })
    }

    fn line_feature(&self, line_set: &LineSetOverlay) -> Value {
        let style = &self.config.zone_style;
        let lines: Vec<Vec<[f64; 2]>> = line_set.lines.iter().map(|l| positions(l)).collect();
        json!({
            "type": "Feature",
            "id": format!("{}/{}", line_set.source_id, line_set.part),
            "geometry": {
                "type": "MultiLineString",
                "coordinates": lines,
            },
            "properties": {
                "kind": "zone",
                "label": line_set.label,
                "anchor": line_set.anchor.to_lng_lat(),
                "detail": line_set.detail,
                "stroke": style.color,
                "stroke-opacity": style.opacity,
                "stroke-width": style.weight,
            },
        })
    }
}

impl RendererAdapter for GeoJsonRenderer {
    fn draw_overlay(&mut self, overlay: &Overlay) {
        let feature = match overlay {
            Overlay::Polygon(polygon) => self.polygon_feature(polygon),
            Overlay::LineSet(line_set) => self.line_feature(line_set),
        };
        self.overlays.push(feature);
    }

    fn place_marker(&mut self, at: Coordinate, title: &str) {
        let marker = &self.config.marker;
        self.markers.push(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": at.to_lng_lat() },
            "properties": {
                "kind": "marker",
                "title": title,
                "icon_url": marker.icon_url,
                "shadow_url": marker.shadow_url,
            },
        }));
    }

    fn focus(&mut self, at: Coordinate, zoom: u8) {
        self.view = View { center: at, zoom };
    }

    fn present_detail(&mut self, at: Coordinate, title: &str, detail: &Detail) {
        let fields: Vec<Value> = detail
            .fields()
            .into_iter()
            .map(|(label, value)| json!({ "label": label, "value": value }))
            .collect();
        self.popup = Some(json!({
            "position": at.to_lng_lat(),
            "title": title,
            "fields": fields,
        }));
    }

    fn teardown(&mut self) {
        tracing::debug!(
            overlays = self.overlays.len(),
            markers = self.markers.len(),
            "releasing geojson scene"
        );
        self.overlays.clear();
        self.markers.clear();
        self.popup = None;
    }
}

fn positions(path: &[Coordinate]) -> Vec<[f64; 2]> {
    path.iter().map(|c| c.to_lng_lat()).collect()
}

/// GeoJSON linear rings repeat their first position at the end.
fn closed_ring(ring: &[Coordinate]) -> Vec<[f64; 2]> {
    let mut out = positions(ring);
    if let (Some(first), Some(last)) = (out.first().copied(), out.last().copied()) {
        if first != last {
            out.push(first);
        }
    }
    out
}
