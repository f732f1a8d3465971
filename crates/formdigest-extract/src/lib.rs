//! Extraction pipeline: raw form fields and text in, canonical ADT-1 record out.
//!
//! Stages run left to right and each returns a new value:
//! [`map_fields`] → [`consolidate`] → [`infer_context`] → [`assemble`] →
//! [`render_prompts`]. [`extract`] runs them all for one document.

pub mod assemble;
pub mod consolidate;
pub mod inference;
pub mod mapper;
pub mod prompts;
pub mod record;

pub use assemble::{assemble, build_address, parse_attachments};
pub use consolidate::consolidate;
pub use inference::infer_context;
pub use mapper::map_fields;
pub use prompts::{LlmPrompts, render_prompts};
pub use record::{ExtractionMetadata, ExtractionRecord, extract};
