use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::path::Path;
use tracing::debug;

use super::font;
use crate::application::ports::AnnotatorPort;
use crate::domain::{
    detection::Detection,
    errors::{DomainError, DomainResult},
    palette::{self, Rgb},
};

/// Grosor del contorno de la caja.
pub const STROKE_WIDTH: i64 = 2;
/// Distancia vertical entre la esquina superior de la caja y el texto.
pub const LABEL_OFFSET: i64 = 10;
/// Margen del fondo de la etiqueta alrededor del texto.
pub const LABEL_PADDING: i64 = 2;

const TEXT_COLOR: Rgb = palette::WHITE;

/// Cota de las coordenadas en píxeles; las sumas posteriores no desbordan `i64`.
const COORD_LIMIT: i64 = 1 << 31;

pub struct ImageAnnotator;

impl ImageAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotatorPort for ImageAnnotator {
    fn render(&self, source: &Path, detections: &[Detection], output: &Path) -> DomainResult<()> {
        let bytes = std::fs::read(source)
            .map_err(|e| DomainError::Storage(format!("{}: {}", source.display(), e)))?;
        let img = image::load_from_memory(&bytes).map_err(|e| DomainError::Image(e.to_string()))?;

        let annotated = annotate(&img, detections);
        annotated
            .save_with_format(output, ImageFormat::Png)
            .map_err(|e| DomainError::Storage(format!("{}: {}", output.display(), e)))?;

        debug!("Annotated {} boxes -> {}", detections.len(), output.display());
        Ok(())
    }
}

/// Copia la imagen y dibuja encima cada detección, en orden.
pub fn annotate(source: &DynamicImage, detections: &[Detection]) -> RgbaImage {
    let mut canvas = source.to_rgba8();
    for det in detections {
        draw_detection(&mut canvas, det);
    }
    canvas
}

fn draw_detection(canvas: &mut RgbaImage, det: &Detection) {
    let color = rgba(palette::color_for(&det.class_label));
    let c = det.corners();
    let (x1, y1) = (to_pixel(c.x1), to_pixel(c.y1));
    let (x2, y2) = (to_pixel(c.x2), to_pixel(c.y2));

    stroke_rect(canvas, x1, y1, x2, y2, STROKE_WIDTH, color);

    let caption = det.caption();
    let (tw, th) = font::text_size(&caption);
    let (ox, oy) = (x1, y1 - LABEL_OFFSET);
    fill_rect(
        canvas,
        ox - LABEL_PADDING,
        oy - LABEL_PADDING,
        ox + tw as i64 - 1 + LABEL_PADDING,
        oy + th as i64 - 1 + LABEL_PADDING,
        color,
    );
    draw_text(canvas, ox, oy, &caption, rgba(TEXT_COLOR));
}

/// `NaN` queda en 0 y los infinitos en la cota.
fn to_pixel(v: f32) -> i64 {
    (v.round() as i64).clamp(-COORD_LIMIT, COORD_LIMIT)
}

fn rgba(c: Rgb) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

/// Rellena el rectángulo [x0, x1] x [y0, y1] (inclusivo), recortado a la imagen.
fn fill_rect(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let (xs, xe) = (x0.min(x1).max(0), x0.max(x1).min(w - 1));
    let (ys, ye) = (y0.min(y1).max(0), y0.max(y1).min(h - 1));
    if xs > xe || ys > ye {
        return;
    }
    for y in ys..=ye {
        for x in xs..=xe {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn stroke_rect(
    canvas: &mut RgbaImage,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    width: i64,
    color: Rgba<u8>,
) {
    let t = width.max(1) - 1;
    fill_rect(canvas, x0, y0, x1, y0 + t, color);
    fill_rect(canvas, x0, y1 - t, x1, y1, color);
    fill_rect(canvas, x0, y0, x0 + t, y1, color);
    fill_rect(canvas, x1 - t, y0, x1, y1, color);
}

fn draw_text(canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    for (dx, dy) in font::lit_pixels(text) {
        let (px, py) = (x + dx as i64, y + dy as i64);
        if (0..w).contains(&px) && (0..h).contains(&py) {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}
