use std::fmt::Write as _;

use crate::core::to_svg_path_data;
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer, Stroke, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes frames into standalone SVG documents.
///
/// The document uses the viewport as its `viewBox` and wraps every primitive
/// in a group translated by the viewport padding.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    /// Document produced by the last successful render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(frame: &RenderFrame, out: &mut String) -> std::fmt::Result {
        let viewport = frame.viewport;
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%" class="chart">"#,
            viewport.width, viewport.height
        )?;
        write!(
            out,
            r#"<g transform="translate({},{})">"#,
            viewport.padding, viewport.padding
        )?;

        for rect in &frame.rects {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                rect.x, rect.y, rect.width, rect.height
            )?;
            if rect.corner_radius > 0.0 {
                write!(out, r#" rx="{r}" ry="{r}""#, r = rect.corner_radius)?;
            }
            write!(out, r#" fill="{}""#, rect.fill_color.to_css())?;
            if let Some(border) = rect.border {
                write_stroke(out, border)?;
            }
            out.push_str("/>");
        }

        for path in &frame.paths {
            write!(out, r#"<path d="{}""#, to_svg_path_data(&path.commands))?;
            match path.fill {
                Some(fill) => write!(out, r#" fill="{}""#, fill.to_css())?,
                None => out.push_str(r#" fill="none""#),
            }
            if let Some(stroke) = path.stroke {
                write_stroke(out, stroke)?;
            }
            out.push_str("/>");
        }

        for line in &frame.lines {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                line.x1, line.y1, line.x2, line.y2
            )?;
            write_stroke(out, line.stroke)?;
            out.push_str("/>");
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}">{}</text>"#,
                text.x,
                text.y,
                text.font_size_px,
                text.color.to_css(),
                anchor,
                escape_text(&text.text)
            )?;
        }

        out.push_str("</g></svg>");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut document = String::with_capacity(256 + frame.paths.len() * 128);
        Self::write_document(frame, &mut document)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;

        self.document = document;
        self.last_stats = SvgRenderStats {
            rects_drawn: frame.rects.len(),
            paths_drawn: frame.paths.len(),
            lines_drawn: frame.lines.len(),
            texts_drawn: frame.texts.len(),
        };
        Ok(())
    }
}

fn write_stroke(out: &mut String, stroke: Stroke) -> std::fmt::Result {
    write!(
        out,
        r#" stroke="{}" stroke-width="{}""#,
        stroke.color.to_css(),
        stroke.width
    )?;
    if let Some((dash, gap)) = stroke.dash {
        write!(out, r#" stroke-dasharray="{dash} {gap}""#)?;
    }
    Ok(())
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
