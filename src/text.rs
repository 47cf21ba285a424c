use std::{fs, path::Path};

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, Point, PxScale, ScaleFont};
use image::{Pixel, Rgba, RgbaImage};

use crate::{
    error::{Error, Result},
    layout::{Rect, TextMeasure},
};

#[derive(Clone, Debug)]
pub struct GlyphData {
    pub glyphs: Vec<Glyph>,
    pub width: u32,
    pub height: u32,
}

pub fn load_font(path: impl AsRef<Path>) -> Result<FontVec> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| Error::io(err, path))?;

    FontVec::try_from_vec(bytes).map_err(|err| Error::Font {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Lays a single line of text out at `scale`, with the caret starting at the
/// top-left corner.
pub fn text_to_glyphs(text: &str, font: &FontVec, scale: PxScale) -> GlyphData {
    let scaled_font = font.as_scaled(scale);

    let mut glyphs: Vec<Glyph> = vec![];
    layout_line(&scaled_font, point(0.0, 0.0), text, &mut glyphs);

    let height = scaled_font.height().ceil() as u32;
    let width = match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            let max_x = last.position.x + scaled_font.h_advance(last.id);
            (max_x - first.position.x).ceil() as u32
        }
        _ => 0,
    };

    GlyphData {
        glyphs,
        width,
        height,
    }
}

fn layout_line<F, SF>(font: &SF, position: Point, text: &str, target: &mut Vec<Glyph>)
where
    F: Font,
    SF: ScaleFont<F>,
{
    let mut caret = position + point(0.0, font.ascent());
    let mut last_glyph: Option<GlyphId> = None;

    for c in text.chars().filter(|c| !c.is_control()) {
        let mut glyph = font.scaled_glyph(c);
        if let Some(previous) = last_glyph.take() {
            caret.x += font.kern(previous, glyph.id);
        }
        glyph.position = caret;
        last_glyph = Some(glyph.id);
        caret.x += font.h_advance(glyph.id);

        target.push(glyph);
    }
}

/// Blends the glyphs into `buffer` with their top-left corner at `origin`.
///
/// Pixels falling outside the buffer are skipped.
pub fn draw_glyphs_to_rgba_buffer(
    buffer: &mut RgbaImage,
    glyph_data: GlyphData,
    font: &FontVec,
    origin: Point,
    pixel: Rgba<u8>,
) {
    let (width, height) = buffer.dimensions();

    for glyph in glyph_data.glyphs {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();

        outlined.draw(|x, y, coverage| {
            let final_x = (origin.x + bounds.min.x) as i64 + x as i64;
            let final_y = (origin.y + bounds.min.y) as i64 + y as i64;
            if final_x < 0 || final_y < 0 || final_x >= width as i64 || final_y >= height as i64 {
                return;
            }

            let px = buffer.get_pixel_mut(final_x as u32, final_y as u32);
            px.apply2(&pixel, |old, new| {
                ((coverage * new as f32) + (1.0 - coverage) * old as f32) as u8
            });
        })
    }
}

/// Exact box sizes taken from a font's metrics, padded by `margin` on the
/// right and bottom.
pub struct GlyphMeasure<'f> {
    pub font: &'f FontVec,
    pub margin: f32,
}

impl<'f> TextMeasure for GlyphMeasure<'f> {
    fn dimensions(&self, text: &str, font_size: f32) -> Rect {
        let glyphs = text_to_glyphs(text, self.font, PxScale::from(font_size));

        Rect {
            width: glyphs.width as f32 + self.margin,
            height: glyphs.height as f32 + self.margin,
        }
    }
}
