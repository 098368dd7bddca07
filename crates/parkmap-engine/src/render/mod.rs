//! Renderer boundary and the bundled backends.
//!
//! Every backend is built from an explicit [`RendererConfig`]; nothing is
//! read from process-wide state.
//!
//! [`RendererConfig`]: parkmap_core::RendererConfig

mod console;
mod geojson;

pub use console::ConsoleRenderer;
pub use geojson::GeoJsonRenderer;

use parkmap_core::Coordinate;
use serde::Serialize;

use crate::overlay::{Detail, Overlay};

/// Drawing surface driven by the session.
///
/// Calls arrive from a single owner, in order. `draw_overlay` is called once
/// per overlay per load; `teardown` is called exactly once, last.
pub trait RendererAdapter {
    fn draw_overlay(&mut self, overlay: &Overlay);

    fn place_marker(&mut self, at: Coordinate, title: &str);

    fn focus(&mut self, at: Coordinate, zoom: u8);

    fn present_detail(&mut self, at: Coordinate, title: &str, detail: &Detail);

    fn teardown(&mut self);
}

/// Current map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct View {
    pub center: Coordinate,
    pub zoom: u8,
}
