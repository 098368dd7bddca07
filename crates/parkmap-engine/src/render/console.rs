//! Plain-text renderer for terminals.

use std::io::Write;
use std::sync::LazyLock;

use parkmap_core::{Coordinate, RendererConfig};
use regex::Regex;

use super::{RendererAdapter, View};
use crate::overlay::{Detail, Overlay};

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Writes one line per drawing call. Overlay lines are only written when
/// `verbose` is set; they are always counted.
///
/// Write failures are logged and otherwise ignored: a broken terminal must
/// not take the session down.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    verbose: bool,
    drawn: usize,
    view: View,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, config: &RendererConfig, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            drawn: 0,
            view: View {
                center: config.default_center,
                zoom: config.default_zoom,
            },
        }
    }

    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "console renderer write failed");
        }
    }
}

impl<W: Write> RendererAdapter for ConsoleRenderer<W> {
    fn draw_overlay(&mut self, overlay: &Overlay) {
        self.drawn += 1;
        if !self.verbose {
            return;
        }
        let kind = match overlay {
            Overlay::Polygon(_) => "lot ",
            Overlay::LineSet(_) => "zone",
        };
        let text = format!("{kind} {} {}", overlay.anchor(), overlay.label());
        self.line(&text);
    }

    fn place_marker(&mut self, at: Coordinate, title: &str) {
        self.line(&format!("* {title} {at}"));
    }

    fn focus(&mut self, at: Coordinate, zoom: u8) {
        self.view = View { center: at, zoom };
        self.line(&format!("> view {at} zoom {zoom}"));
    }

    fn present_detail(&mut self, at: Coordinate, title: &str, detail: &Detail) {
        self.line(&format!("{title} {at}"));
        for (label, value) in detail.fields() {
            let value = if label == "Rate" {
                strip_markup(&value)
            } else {
                value
            };
            self.line(&format!("  {label}: {value}"));
        }
    }

    fn teardown(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "console renderer flush failed");
        }
        tracing::debug!(drawn = self.drawn, "console renderer closed");
    }
}

/// Rate descriptions arrive as HTML fragments. Tags become spaces so
/// `$1<br>$2` stays readable, then whitespace is collapsed.
fn strip_markup(html: &str) -> String {
    let text = MARKUP.replace_all(html, " ");
    let text = text.replace("&amp;", "&").replace("&nbsp;", " ");
    SPACES.replace_all(text.trim(), " ").into_owned()
}
