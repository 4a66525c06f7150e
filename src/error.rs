//! Error types for widget construction and image loading

use thiserror::Error;

/// Problems detected when a widget is built or its inputs are loaded
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("quiz has no options")]
    NoOptions,

    #[error("correct answer index {index} is out of range for {len} options")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error("failed to load image {reference}: {source}")]
    ImageLoad {
        reference: String,
        #[source]
        source: image::ImageError,
    },
}
