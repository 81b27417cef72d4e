//! Factory map scene: glyph layout and SVG generation.
//!
//! Each anomaly becomes a triangular glyph on a horizontal axis with a
//! multi-line label beneath it. Scenes are rebuilt whole on every update;
//! nothing is diffed against the previous render.

use crate::model::Anomaly;

/// Flash color used when a render carries at least one anomaly.
const FLASH_COLOR: &str = "#ffe08a";
const SURFACE_COLOR: &str = "#ffffff";
const LABEL_COLOR: &str = "#646cff";

/// Evenly spaced x positions across `[padding, width - padding]`.
/// Zero glyphs yields no positions; a single glyph sits at the center.
pub fn glyph_positions(count: usize, width: f64, padding: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![width / 2.0],
        n => {
            let span = width - 2.0 * padding;
            let step = span / (n as f64 - 1.0);
            (0..n).map(|i| padding + step * i as f64).collect()
        }
    }
}

/// Label lines under a glyph: the anomaly type split on underscores.
pub fn label_lines(kind: &str) -> Vec<String> {
    kind.split('_').map(str::to_string).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub x: f64,
    pub color: &'static str,
    pub label: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub width: f64,
    pub height: f64,
    pub glyphs: Vec<Glyph>,
    pub flash: bool,
}

impl MapScene {
    pub fn empty(width: f64, height: f64) -> Self {
        Self { width, height, glyphs: Vec::new(), flash: false }
    }

    pub fn from_anomalies(anomalies: &[Anomaly], width: f64, height: f64, padding: f64) -> Self {
        let xs = glyph_positions(anomalies.len(), width, padding);
        let glyphs = anomalies
            .iter()
            .zip(xs)
            .map(|(a, x)| Glyph {
                x,
                color: a.severity.color(),
                label: label_lines(&a.kind),
            })
            .collect();
        Self { width, height, glyphs, flash: !anomalies.is_empty() }
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{surface}">"#,
            w = self.width,
            h = self.height,
            surface = SURFACE_COLOR,
        ));
        if self.flash {
            // One-shot flash to the warning color, then back to the surface.
            svg.push_str(&format!(
                r#"<animate attributeName="fill" values="{flash};{surface}" dur="0.6s" begin="0s" fill="freeze"/>"#,
                flash = FLASH_COLOR,
                surface = SURFACE_COLOR,
            ));
        }
        svg.push_str("</rect>");

        let baseline = self.height / 2.0;
        for glyph in &self.glyphs {
            svg.push_str(r#"<g opacity="0">"#);
            svg.push_str(
                r#"<animate attributeName="opacity" from="0" to="1" dur="0.4s" begin="0s" fill="freeze"/>"#,
            );
            svg.push_str(&format!(
                r#"<polygon points="{apex_x},{apex_y} {left_x},{base_y} {right_x},{base_y}" fill="{color}"/>"#,
                apex_x = glyph.x,
                apex_y = baseline - 18.0,
                left_x = glyph.x - 15.0,
                right_x = glyph.x + 15.0,
                base_y = baseline + 12.0,
                color = glyph.color,
            ));
            svg.push_str(&format!(
                r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="12" fill="{color}">"#,
                x = glyph.x,
                y = baseline + 30.0,
                color = LABEL_COLOR,
            ));
            for line in &glyph.label {
                svg.push_str(&format!(
                    r#"<tspan x="{x}" dy="14">{line}</tspan>"#,
                    x = glyph.x,
                    line = xml_escape(line),
                ));
            }
            svg.push_str("</text></g>");
        }
        svg.push_str("</svg>");
        svg
    }
}

fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
