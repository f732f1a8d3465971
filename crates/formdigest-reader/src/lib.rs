//! Reader layer: form fields and text from ADT-1 PDFs via lopdf.

mod error;
mod pdf;

pub use error::ReaderError;
pub use pdf::{PdfDocument, read_input};
