use bytes::Bytes;

use crate::error::ValidationError;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A file as handed over by the file picker, before any validation.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub content: Bytes,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            content: content.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Only the declared type counts; the bytes are never sniffed.
    pub fn is_pdf(&self) -> bool {
        self.mime_type.as_deref() == Some(PDF_MIME_TYPE)
    }
}

/// A file that passed selection-time validation. The only way to get one is
/// through `TryFrom<PickedFile>`, so holding it means the type was PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content: Bytes,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn mime_type(&self) -> &'static str {
        PDF_MIME_TYPE
    }
}

impl TryFrom<PickedFile> for SelectedFile {
    type Error = ValidationError;

    fn try_from(file: PickedFile) -> Result<Self, Self::Error> {
        if !file.is_pdf() {
            return Err(ValidationError::NotPdf);
        }

        Ok(Self {
            name: file.name,
            content: file.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_mime_type_is_accepted() {
        let picked = PickedFile::new("cv.pdf", b"%PDF-1.7".to_vec()).with_mime_type("application/pdf");
        let selected = SelectedFile::try_from(picked).unwrap();
        assert_eq!(selected.name(), "cv.pdf");
        assert_eq!(selected.size(), 8);
    }

    #[test]
    fn test_pdf_extension_without_mime_type_is_rejected() {
        let picked = PickedFile::new("cv.pdf", b"%PDF-1.7".to_vec());
        assert_eq!(SelectedFile::try_from(picked), Err(ValidationError::NotPdf));
    }

    #[test]
    fn test_mime_type_must_match_exactly() {
        let picked = PickedFile::new("cv.pdf", b"%PDF".to_vec())
            .with_mime_type("application/pdf; charset=binary");
        assert!(!picked.is_pdf());
    }
}
