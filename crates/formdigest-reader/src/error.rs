use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("pdf file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("pdf is encrypted and could not be opened with an empty password")]
    Encrypted,

    #[error("pdf has no AcroForm dictionary")]
    NoForm,

    #[error("lopdf error: {0}")]
    Pdf(#[from] lopdf::Error),
}
