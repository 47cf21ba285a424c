use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error at {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Font file {path:?} may be invalid: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: String,
    },

    /// The stemmer mapped a non-empty word onto an empty root.
    #[error("Stemmer produced an empty root for '{word}'")]
    InvalidStem { word: String },

    /// The box-dimension function returned a size that cannot be placed.
    #[error("Invalid dimensions {width}x{height} for '{text}'")]
    InvalidDimensions {
        text: String,
        width: f32,
        height: f32,
    },

    #[error("Unable to place '{text}' after {attempts} attempts")]
    PlacementExhausted { text: String, attempts: usize },

    #[error("Rendering requires a font, none was loaded")]
    MissingFont,

    #[error("Unable to save image to {path:?}: {source}")]
    ImageExport {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl Error {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub fn invalid_parameter(
        parameter: &'static str,
        value: &impl ToString,
        reason: &impl ToString,
    ) -> Self {
        Self::InvalidParameter {
            parameter,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
