pub type WavegramResult<T> = Result<T, WavegramError>;

#[derive(thiserror::Error, Debug)]
pub enum WavegramError {
    #[error("unreadable audio: {0}")]
    UnreadableAudio(String),

    #[error("image load error: {0}")]
    ImageLoad(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavegramError {
    pub fn unreadable_audio(msg: impl Into<String>) -> Self {
        Self::UnreadableAudio(msg.into())
    }

    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub fn invalid_resolution(msg: impl Into<String>) -> Self {
        Self::InvalidResolution(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
