//! lopdf-backed form-field and text reader.
//!
//! Two passes feed the raw field set, mirroring how ADT-1 PDFs carry data:
//!
//! 1. The AcroForm field tree: text fields (`/FT /Tx`, inherited from
//!    parents) keyed by fully-qualified dotted name.
//! 2. Every page's `/Widget` annotations: partial name `/T` → value `/V`.
//!
//! Later entries replace earlier ones in place, so the field set keeps the
//! order in which identifiers were first seen. Any single field, annotation
//! or page that fails to decode is skipped.

use std::path::Path;

use formdigest_core::{DocumentInput, RawFieldSet};
use lopdf::{Dictionary, Document, Object};
use tracing::{debug, info, warn};

use crate::ReaderError;

/// Guard against reference cycles in malformed field trees.
const MAX_FIELD_DEPTH: usize = 32;

/// A loaded (and, if needed, decrypted) PDF.
pub struct PdfDocument {
    doc: Document,
}

impl PdfDocument {
    /// Load a PDF. Encrypted files get one attempt with an empty password.
    pub fn load(path: &Path) -> Result<Self, ReaderError> {
        if !path.exists() {
            return Err(ReaderError::NotFound(path.to_path_buf()));
        }
        let mut doc = Document::load(path)?;

        if doc.is_encrypted() {
            info!(path = %path.display(), "pdf is encrypted, trying empty password");
            if let Err(e) = doc.decrypt("") {
                warn!(path = %path.display(), error = %e, "failed to decrypt pdf");
                return Err(ReaderError::Encrypted);
            }
        }

        Ok(Self { doc })
    }

    /// All form field values: AcroForm text fields, then widget annotations.
    pub fn form_fields(&self) -> RawFieldSet {
        let mut fields = RawFieldSet::new();

        match self.acroform_fields(&mut fields) {
            Ok(()) => {}
            Err(ReaderError::NoForm) => debug!("no AcroForm dictionary"),
            Err(e) => debug!(error = %e, "AcroForm field tree unreadable"),
        }
        let from_form = fields.len();

        for (page_no, page_id) in self.doc.get_pages() {
            if let Err(e) = self.widget_fields(page_id, &mut fields) {
                debug!(page = page_no, error = %e, "skipping page annotations");
            }
        }

        debug!(
            from_form,
            total = fields.len(),
            "read form fields"
        );
        fields
    }

    /// Concatenated page text, one trailing newline per non-empty page.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for page_no in self.doc.get_pages().keys() {
            match self.doc.extract_text(&[*page_no]) {
                Ok(page_text) if !page_text.is_empty() => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Ok(_) => {}
                Err(e) => debug!(page = page_no, error = %e, "skipping page text"),
            }
        }
        text
    }

    // ── AcroForm pass ──

    fn acroform_fields(&self, out: &mut RawFieldSet) -> Result<(), ReaderError> {
        let root = self.resolve(self.doc.trailer.get(b"Root")?)?.as_dict()?;
        let acroform = match root.get(b"AcroForm") {
            Ok(obj) => self.resolve(obj)?.as_dict()?,
            Err(_) => return Err(ReaderError::NoForm),
        };
        let fields = self.resolve(acroform.get(b"Fields")?)?.as_array()?;

        for field in fields {
            if let Err(e) = self.walk_field(field, None, None, out, 0) {
                debug!(error = %e, "skipping form field");
            }
        }
        Ok(())
    }

    fn walk_field(
        &self,
        obj: &Object,
        parent_name: Option<&str>,
        inherited_type: Option<&[u8]>,
        out: &mut RawFieldSet,
        depth: usize,
    ) -> Result<(), ReaderError> {
        if depth > MAX_FIELD_DEPTH {
            return Ok(());
        }
        let dict = self.resolve(obj)?.as_dict()?;

        let partial = dict.get(b"T").ok().and_then(|t| self.text_value(t));
        let name = match (parent_name, partial) {
            (Some(parent), Some(partial)) => Some(format!("{parent}.{partial}")),
            (None, Some(partial)) => Some(partial),
            (Some(parent), None) => Some(parent.to_string()),
            (None, None) => None,
        };
        let field_type = match dict.get(b"FT") {
            Ok(Object::Name(ft)) => Some(ft.as_slice()),
            _ => inherited_type,
        };

        if let Some(name) = name.as_deref()
            && field_type == Some(b"Tx".as_slice())
            && let Some(value) = self.field_value(dict)
        {
            out.insert(name, value);
        }

        if let Ok(kids) = dict.get(b"Kids") {
            for kid in self.resolve(kids)?.as_array()? {
                if let Err(e) = self.walk_field(kid, name.as_deref(), field_type, out, depth + 1) {
                    debug!(error = %e, "skipping child field");
                }
            }
        }
        Ok(())
    }

    // ── Widget annotation pass ──

    fn widget_fields(&self, page_id: lopdf::ObjectId, out: &mut RawFieldSet) -> Result<(), ReaderError> {
        let page = self.doc.get_dictionary(page_id)?;
        let Ok(annots) = page.get(b"Annots") else {
            return Ok(());
        };

        for annot in self.resolve(annots)?.as_array()? {
            let Ok(dict) = self.resolve(annot).and_then(|a| Ok(a.as_dict()?)) else {
                continue;
            };
            if !matches!(dict.get(b"Subtype"), Ok(Object::Name(s)) if s == b"Widget") {
                continue;
            }
            let name = dict.get(b"T").ok().and_then(|t| self.text_value(t));
            let value = self.field_value(dict);
            if let (Some(name), Some(value)) = (name, value)
                && !name.is_empty()
                && !value.is_empty()
            {
                out.insert(name, value);
            }
        }
        Ok(())
    }

    // ── Object helpers ──

    fn resolve<'a>(&'a self, obj: &'a Object) -> Result<&'a Object, ReaderError> {
        match obj {
            Object::Reference(id) => Ok(self.doc.get_object(*id)?),
            other => Ok(other),
        }
    }

    /// `/V` rendered as a string: text strings decoded, names as `/Name`.
    fn field_value(&self, dict: &Dictionary) -> Option<String> {
        let value = self.resolve(dict.get(b"V").ok()?).ok()?;
        match value {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            Object::Name(name) => Some(format!("/{}", String::from_utf8_lossy(name))),
            Object::Integer(i) => Some(i.to_string()),
            Object::Real(r) => Some(r.to_string()),
            _ => None,
        }
    }

    fn text_value(&self, obj: &Object) -> Option<String> {
        match self.resolve(obj).ok()? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            _ => None,
        }
    }
}

/// Decode a PDF text string: UTF-16BE or UTF-8 with BOM, else PDFDocEncoding
/// (treated as Latin-1).
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Read one PDF into a [`DocumentInput`]. Never fails: an unreadable file
/// yields an input with no fields and no text.
pub fn read_input(path: &Path) -> DocumentInput {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match PdfDocument::load(path) {
        Ok(pdf) => DocumentInput {
            name,
            raw_fields: pdf.form_fields(),
            raw_text: pdf.text(),
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable pdf, continuing with empty input");
            DocumentInput::empty(name)
        }
    }
}
