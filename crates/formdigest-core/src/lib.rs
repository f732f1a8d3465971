//! Shared types for formdigest: field bags, inferred context, the canonical
//! ADT-1 document, and the raw-identifier mapping table.

pub mod context;
pub mod document;
pub mod field_key;
pub mod fields;
pub mod mapping;

pub use context::{AppointmentType, AuditorQualification, CompanyType, ContextFacts, RegulatorySection};
pub use document::{CanonicalDocument, FieldValue, NOT_SPECIFIED, SignatureStatus};
pub use fields::{CanonicalFieldSet, DocumentInput, RawFieldSet};
pub use mapping::{FieldMappingTable, MappingError};
