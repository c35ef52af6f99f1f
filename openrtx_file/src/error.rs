//! Error type for WAV file I/O.

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("wav file is not mono: {0} channels")]
    NotMono(u16),
    #[error("wav i/o error: {0}")]
    Hound(#[from] hound::Error),
}
