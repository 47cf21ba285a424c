use crate::{
    error::{Error, Result},
    frequency::WordStat,
};

pub const DEFAULT_MIN_FONT_SIZE: f32 = 10.0;
pub const DEFAULT_MAX_FONT_SIZE: f32 = 80.0;

/// The lowest count a ranked word can have.
const BASE_MIN: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ScaledWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
}

/// Maps counts in `[1, max count]` linearly onto `[min_font_size, max_font_size]`.
#[derive(Clone, Copy, Debug)]
pub struct FontScaler {
    min_font_size: f32,
    max_font_size: f32,
}

impl Default for FontScaler {
    fn default() -> Self {
        FontScaler {
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_font_size: DEFAULT_MAX_FONT_SIZE,
        }
    }
}

impl FontScaler {
    pub fn new(min_font_size: f32, max_font_size: f32) -> Result<Self> {
        if !min_font_size.is_finite() || min_font_size <= 0.0 {
            return Err(Error::invalid_parameter(
                "min_font_size",
                &min_font_size,
                &"must be a positive number",
            ));
        }
        if !max_font_size.is_finite() || max_font_size < min_font_size {
            return Err(Error::invalid_parameter(
                "max_font_size",
                &max_font_size,
                &format!("must be a number no smaller than {min_font_size}"),
            ));
        }

        Ok(FontScaler {
            min_font_size,
            max_font_size,
        })
    }

    /// When every word is as common as the least common possible word the
    /// range collapses, and everything gets the minimum size.
    pub fn font_size(&self, count: usize, max_count: usize) -> f32 {
        let base_max = max_count as f32;
        if base_max <= BASE_MIN {
            return self.min_font_size;
        }

        let size = self.min_font_size
            + (self.max_font_size - self.min_font_size) * (count as f32 - BASE_MIN)
                / (base_max - BASE_MIN);

        size.clamp(self.min_font_size, self.max_font_size)
    }

    pub fn scale(&self, ranked: &[WordStat]) -> Vec<ScaledWord> {
        let max_count = ranked.iter().map(|stat| stat.count).max().unwrap_or(0);

        ranked
            .iter()
            .map(|stat| ScaledWord {
                text: stat.word.clone(),
                count: stat.count,
                font_size: self.font_size(stat.count, max_count),
            })
            .collect()
    }
}
