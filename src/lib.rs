//! Word clouds from plain text.
//!
//! A document is lower-cased, split into words, stripped of stopwords, merged
//! by root and ranked. The most frequent words are sized by frequency and
//! placed around the origin so that no two boxes overlap.

use std::path::Path;

use ab_glyph::{point, FontVec, PxScale};
use image::{Rgba, RgbaImage};
use nanorand::{Rng, WyRand};
use palette::{Hsl, IntoColor, Pixel, Srgb};

pub use error::{Error, Result};
pub use frequency::{rank, FrequencyAggregator, WordStat};
pub use layout::{
    collides_with_any, BoundingBox, EstimatedMeasure, PlacedLabel, Point, Rect, SpiralPlacer,
    TextMeasure,
};
pub use scale::{FontScaler, ScaledWord};
pub use stem::{NoStemmer, SnowballStemmer, Stemmer};
pub use stopwords::StopwordFilter;
pub use text::{load_font, GlyphMeasure};
pub use tokenizer::{Tokenizer, WordTokenizer, DEFAULT_DELIMITERS};

mod error;
mod frequency;
mod layout;
mod scale;
mod stem;
mod stopwords;
mod text;
mod tokenizer;

pub struct WordCloud {
    tokenizer: WordTokenizer,
    background_color: Rgba<u8>,
    font: Option<FontVec>,
    min_font_size: f32,
    max_font_size: f32,
    word_margin: f32,
    rng_seed: Option<u64>,
    max_attempts: usize,
}

impl Default for WordCloud {
    fn default() -> Self {
        WordCloud {
            tokenizer: WordTokenizer::default(),
            background_color: Rgba([0, 0, 0, 255]),
            font: None,
            min_font_size: scale::DEFAULT_MIN_FONT_SIZE,
            max_font_size: scale::DEFAULT_MAX_FONT_SIZE,
            word_margin: 2.0,
            rng_seed: None,
            max_attempts: layout::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl WordCloud {
    pub fn with_tokenizer(mut self, value: WordTokenizer) -> Self {
        self.tokenizer = value;
        self
    }

    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_font_from_path(self, path: impl AsRef<Path>) -> Result<Self> {
        Ok(self.with_font(load_font(path)?))
    }

    pub fn with_font_sizes(mut self, min: f32, max: f32) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    pub fn with_word_margin(mut self, value: f32) -> Self {
        self.word_margin = value;
        self
    }

    pub fn with_rng_seed(mut self, value: u64) -> Self {
        self.rng_seed = Some(value);
        self
    }

    pub fn with_max_attempts(mut self, value: usize) -> Self {
        self.max_attempts = value;
        self
    }

    pub fn with_background_color(mut self, value: Rgba<u8>) -> Self {
        self.background_color = value;
        self
    }

    pub fn tokenizer(&self) -> &WordTokenizer {
        &self.tokenizer
    }

    /// Ranks and sizes the words of `text` without placing them.
    pub fn scaled_words(&self, text: &str) -> Result<Vec<ScaledWord>> {
        let scaler = FontScaler::new(self.min_font_size, self.max_font_size)?;
        let ranked = self.tokenizer.get_ranked_words(text)?;

        Ok(scaler.scale(&ranked))
    }

    /// Places the most frequent words of `text`, most frequent first.
    ///
    /// Boxes come from the loaded font, or from a character-count estimate
    /// when there is none.
    pub fn layout_from_text(&self, text: &str) -> Result<Vec<PlacedLabel>> {
        let words = self.scaled_words(text)?;
        let mut placer = SpiralPlacer::new(self.rng_seed).with_max_attempts(self.max_attempts);

        match &self.font {
            Some(font) => placer.place(
                &words,
                &GlyphMeasure {
                    font,
                    margin: self.word_margin,
                },
            ),
            None => placer.place(&words, &EstimatedMeasure::default()),
        }
    }

    pub fn generate_from_text(&self, text: &str, scale: f32) -> Result<RgbaImage> {
        self.generate_from_text_with_color_func(text, scale, random_color_rgba)
    }

    pub fn generate_from_text_with_color_func(
        &self,
        text: &str,
        scale: f32,
        color_func: fn(&PlacedLabel, &mut WyRand) -> Rgba<u8>,
    ) -> Result<RgbaImage> {
        if self.font.is_none() {
            return Err(Error::MissingFont);
        }

        let labels = self.layout_from_text(text)?;
        self.render_with_color_func(&labels, scale, color_func)
    }

    pub fn render(&self, labels: &[PlacedLabel], scale: f32) -> Result<RgbaImage> {
        self.render_with_color_func(labels, scale, random_color_rgba)
    }

    /// Draws `labels` onto a canvas just large enough to hold all of them.
    ///
    /// Layout coordinates may be negative; the canvas is shifted so that the
    /// top-left-most box sits one margin away from the corner.
    pub fn render_with_color_func(
        &self,
        labels: &[PlacedLabel],
        scale: f32,
        color_func: fn(&PlacedLabel, &mut WyRand) -> Rgba<u8>,
    ) -> Result<RgbaImage> {
        let font = self.font.as_ref().ok_or(Error::MissingFont)?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::invalid_parameter(
                "scale",
                &scale,
                &"must be a positive number",
            ));
        }

        let (min_x, min_y, max_x, max_y) = if labels.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            labels.iter().fold(
                (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
                |(min_x, min_y, max_x, max_y), label| {
                    let bb = &label.bounding_box;
                    (min_x.min(bb.x0), min_y.min(bb.y0), max_x.max(bb.x1), max_y.max(bb.y1))
                },
            )
        };
        let pad = self.word_margin;

        let width = ((max_x - min_x + 2.0 * pad) * scale).ceil().max(1.0) as u32;
        let height = ((max_y - min_y + 2.0 * pad) * scale).ceil().max(1.0) as u32;
        let mut buffer = RgbaImage::from_pixel(width, height, self.background_color);

        let mut rng = match self.rng_seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        for label in labels {
            let col = color_func(label, &mut rng);
            let glyphs =
                text::text_to_glyphs(&label.text, font, PxScale::from(label.font_size * scale));
            let origin = point(
                (label.bounding_box.x0 - min_x + pad) * scale,
                (label.bounding_box.y0 - min_y + pad) * scale,
            );

            text::draw_glyphs_to_rgba_buffer(&mut buffer, glyphs, font, origin, col);
        }

        tracing::debug!("Rendered {} words on a {width}x{height} canvas", labels.len());
        Ok(buffer)
    }
}

fn random_color_rgba(_: &PlacedLabel, rng: &mut WyRand) -> Rgba<u8> {
    let hue: u16 = rng.generate_range(0..360);

    let col = Hsl::new(hue as f32, 1.0, 0.5);
    let rgb: Srgb = col.into_color();

    let raw: [u8; 3] = rgb.into_format().into_raw();

    Rgba([raw[0], raw[1], raw[2], 255])
}

#[cfg(test)]
mod tests {
    use crate::{layout::EstimatedMeasure, NoStemmer, StopwordFilter, TextMeasure, WordTokenizer};

    use super::{Error, WordCloud};

    fn cloud(stopwords: &[&str], limit: usize) -> WordCloud {
        WordCloud::default()
            .with_tokenizer(
                WordTokenizer::default()
                    .with_filter(StopwordFilter::from_words(stopwords.iter().copied()))
                    .with_stemmer(NoStemmer)
                    .with_max_words(limit),
            )
            .with_rng_seed(42)
    }

    #[test]
    fn single_word_gets_the_largest_size() {
        let labels = cloud(&[], 1).layout_from_text("apple apple apple").unwrap();

        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "apple");
        assert_eq!(labels[0].font_size, 80.0);

        let expected = EstimatedMeasure::default().dimensions("apple", 80.0);
        let bb = labels[0].bounding_box;
        assert!(bb.x0 >= 0.0 && bb.x0 < 20.0 && bb.y0 >= 0.0 && bb.y0 < 20.0);
        assert!((bb.x1 - bb.x0 - expected.width).abs() < 1e-3);
    }

    #[test]
    fn layout_follows_rank_order_without_overlap() {
        let text = "the cat sat on the mat. the cat ran.";

        let labels = cloud(&["the", "on"], 2).layout_from_text(text).unwrap();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "cat");
        assert!(labels[0].font_size >= labels[1].font_size);
        assert!(!labels[0].bounding_box.overlaps(&labels[1].bounding_box));
    }

    #[test]
    fn stemming_merges_word_forms() {
        let cloud = WordCloud::default()
            .with_tokenizer(WordTokenizer::default().with_max_words(usize::MAX));

        let words = cloud
            .scaled_words("The kings ruled. A king rules; kings will rule! Kings.")
            .unwrap();

        assert_eq!(words[0].text, "kings");
        assert_eq!(words[0].count, 4);
        assert_eq!(words[0].font_size, 80.0);
        assert_eq!(words.iter().map(|w| w.count).sum::<usize>(), 7);
    }

    #[test]
    fn nothing_to_say_yields_nothing() {
        let cloud = cloud(&["the"], 15);

        assert!(cloud.layout_from_text("").unwrap().is_empty());
        assert!(cloud.layout_from_text("the 1 2 3 a . ,").unwrap().is_empty());
    }

    #[test]
    fn invalid_font_range_is_rejected() {
        let result = cloud(&[], 15)
            .with_font_sizes(50.0, 20.0)
            .layout_from_text("words words");

        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn rendering_needs_a_font() {
        let cloud = cloud(&[], 15);

        assert!(matches!(cloud.generate_from_text("hello", 1.0), Err(Error::MissingFont)));
        assert!(matches!(cloud.render(&[], 1.0), Err(Error::MissingFont)));
    }
}
