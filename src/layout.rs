use std::f32::consts::TAU;

use nanorand::{Rng, WyRand};

use crate::{
    error::{Error, Result},
    scale::ScaledWord,
};

/// Side of the square every word's first position is drawn from.
pub const SEED_EXTENT: f32 = 20.0;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned box, `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(origin: Point, size: Rect) -> Self {
        BoundingBox {
            x0: origin.x,
            y0: origin.y,
            x1: origin.x + size.width,
            y1: origin.y + size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point {
            x: self.x0,
            y: self.y0,
        }
    }

    pub fn size(&self) -> Rect {
        Rect {
            width: self.x1 - self.x0,
            height: self.y1 - self.y0,
        }
    }

    /// Strict on every side, boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        other.x1 > self.x0 && other.y1 > self.y0 && self.x1 > other.x0 && self.y1 > other.y0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub font_size: f32,
    pub bounding_box: BoundingBox,
}

/// Size of a word's box when drawn at a given font size.
pub trait TextMeasure {
    fn dimensions(&self, text: &str, font_size: f32) -> Rect;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32) -> Rect,
{
    fn dimensions(&self, text: &str, font_size: f32) -> Rect {
        self(text, font_size)
    }
}

/// Guesses a box from the character count when no font is at hand.
#[derive(Clone, Copy, Debug)]
pub struct EstimatedMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for EstimatedMeasure {
    fn default() -> Self {
        EstimatedMeasure {
            char_width: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for EstimatedMeasure {
    fn dimensions(&self, text: &str, font_size: f32) -> Rect {
        Rect {
            width: text.chars().count() as f32 * font_size * self.char_width,
            height: font_size * self.line_height,
        }
    }
}

pub fn collides_with_any(bounding_box: &BoundingBox, placed: &[PlacedLabel]) -> bool {
    placed
        .iter()
        .any(|label| bounding_box.overlaps(&label.bounding_box))
}

fn unit(rng: &mut WyRand) -> f32 {
    (rng.generate::<u32>() >> 8) as f32 / (1u32 << 24) as f32
}

/// Places words one after another around the origin.
///
/// Each word starts at a random point of a small square. While it overlaps a
/// word placed before it, it jumps `radius` units in a random direction and
/// the radius grows by one.
pub struct SpiralPlacer {
    rng: WyRand,
    seed_extent: f32,
    max_attempts: usize,
}

impl SpiralPlacer {
    pub fn new(rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        SpiralPlacer {
            rng,
            seed_extent: SEED_EXTENT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// A zero extent starts every word at the origin.
    pub fn with_seed_extent(mut self, extent: f32) -> Self {
        self.seed_extent = extent;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    fn random_point(&mut self, extent: f32) -> Point {
        Point {
            x: unit(&mut self.rng) * extent,
            y: unit(&mut self.rng) * extent,
        }
    }

    /// Moves a box of `size` outwards from `origin` until it overlaps nothing
    /// in `placed`.
    fn spiral_out(
        &mut self,
        text: &str,
        origin: Point,
        size: Rect,
        placed: &[PlacedLabel],
    ) -> Result<BoundingBox> {
        let mut bounding_box = BoundingBox::new(origin, size);
        let mut radius = 1.0;
        let mut attempts = 0;

        while collides_with_any(&bounding_box, placed) {
            if attempts == self.max_attempts {
                return Err(Error::PlacementExhausted {
                    text: text.to_string(),
                    attempts,
                });
            }

            let theta = unit(&mut self.rng) * TAU;
            let current = bounding_box.origin();
            bounding_box = BoundingBox::new(
                Point {
                    x: current.x + radius * theta.cos(),
                    y: current.y + radius * theta.sin(),
                },
                size,
            );

            radius += 1.0;
            attempts += 1;
        }

        tracing::trace!("Placed '{text}' after {attempts} moves");
        Ok(bounding_box)
    }

    /// Either every word gets a box or none does.
    pub fn place(
        &mut self,
        words: &[ScaledWord],
        measure: &impl TextMeasure,
    ) -> Result<Vec<PlacedLabel>> {
        let mut placed: Vec<PlacedLabel> = Vec::with_capacity(words.len());

        for word in words {
            let size = measure.dimensions(&word.text, word.font_size);
            if !(size.width.is_finite() && size.height.is_finite())
                || size.width < 0.0
                || size.height < 0.0
            {
                return Err(Error::InvalidDimensions {
                    text: word.text.clone(),
                    width: size.width,
                    height: size.height,
                });
            }

            let seed = self.random_point(self.seed_extent);
            let bounding_box = self.spiral_out(&word.text, seed, size, &placed)?;

            placed.push(PlacedLabel {
                text: word.text.clone(),
                font_size: word.font_size,
                bounding_box,
            });
        }

        tracing::debug!("Placed {} words", placed.len());
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, scale::ScaledWord};

    use super::{BoundingBox, EstimatedMeasure, Point, Rect, SpiralPlacer};

    fn word(text: &str, font_size: f32) -> ScaledWord {
        ScaledWord {
            text: text.to_string(),
            count: 1,
            font_size,
        }
    }

    fn square(x0: f32, y0: f32, side: f32) -> BoundingBox {
        BoundingBox::new(Point { x: x0, y: y0 }, Rect { width: side, height: side })
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = square(0.0, 0.0, 10.0);

        assert!(!a.overlaps(&square(10.0, 0.0, 10.0)));
        assert!(!a.overlaps(&square(0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&square(-10.0, -10.0, 10.0)));
        assert!(a.overlaps(&square(9.9, 9.9, 10.0)));
        assert!(a.overlaps(&square(2.0, 2.0, 1.0)));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn placed_boxes_never_overlap() {
        let words: Vec<_> = (0..40)
            .map(|i| word(&"w".repeat(1 + i % 7), 80.0 - i as f32))
            .collect();

        let placed = SpiralPlacer::new(Some(7))
            .place(&words, &EstimatedMeasure::default())
            .unwrap();

        assert_eq!(placed.len(), words.len());
        for (i, a) in placed.iter().enumerate() {
            assert_eq!(a.text, words[i].text);
            for b in &placed[i + 1..] {
                assert!(!a.bounding_box.overlaps(&b.bounding_box));
            }
        }
    }

    #[test]
    fn identical_seed_positions_are_separated() {
        let same_box = |_: &str, _: f32| Rect {
            width: 30.0,
            height: 30.0,
        };
        let words = [word("left", 10.0), word("right", 10.0)];

        let placed = SpiralPlacer::new(Some(3))
            .with_seed_extent(0.0)
            .place(&words, &same_box)
            .unwrap();

        assert_eq!(placed[0].bounding_box, square(0.0, 0.0, 30.0));
        assert_ne!(placed[1].bounding_box.origin(), Point { x: 0.0, y: 0.0 });
        assert!(!placed[0].bounding_box.overlaps(&placed[1].bounding_box));
        let size = placed[1].bounding_box.size();
        assert!((size.width - 30.0).abs() < 1e-3);
        assert!((size.height - 30.0).abs() < 1e-3);
    }

    #[test]
    fn same_seed_same_layout() {
        let words = [word("apple", 80.0), word("pear", 45.0), word("fig", 10.0)];
        let measure = EstimatedMeasure::default();

        let first = SpiralPlacer::new(Some(11)).place(&words, &measure).unwrap();
        let second = SpiralPlacer::new(Some(11)).place(&words, &measure).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_places_nothing() {
        let placed = SpiralPlacer::new(None)
            .place(&[], &EstimatedMeasure::default())
            .unwrap();

        assert!(placed.is_empty());
    }

    #[test]
    fn exhausted_attempts_fail_the_whole_layout() {
        let words = [word("one", 40.0), word("two", 40.0)];

        let result = SpiralPlacer::new(Some(1))
            .with_max_attempts(0)
            .place(&words, &|_: &str, _: f32| Rect {
                width: 50.0,
                height: 50.0,
            });

        assert!(matches!(result, Err(Error::PlacementExhausted { attempts: 0, .. })));
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        let result = SpiralPlacer::new(Some(1)).place(&[word("bad", 10.0)], &|_: &str, _: f32| {
            Rect {
                width: -1.0,
                height: 5.0,
            }
        });

        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }
}
