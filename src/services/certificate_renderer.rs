//! Renders certificate PDFs.
//!
//! The page is a single A4 landscape sheet with centered text lines set in the
//! built-in Helvetica faces, so no font files have to ship with the binary.

use crate::models::CertificateDetails;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
// Helvetica averages roughly half an em per glyph
const GLYPH_WIDTH_EM: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not write certificate file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not build certificate pdf: {0}")]
    Pdf(String),
}

impl From<printpdf::Error> for RenderError {
    fn from(err: printpdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// What gets printed on the certificate.
#[derive(Debug, Clone)]
pub struct CertificateContent {
    pub issuer: String,
    pub recipient: String,
    pub course: String,
    pub issued_on: String,
    pub certificate_id: String,
}

impl CertificateContent {
    pub fn new(issuer: &str, details: &CertificateDetails) -> Self {
        Self {
            issuer: issuer.to_string(),
            recipient: details.recipient_name.clone(),
            course: details.course_title.clone(),
            issued_on: details
                .certificate
                .issued_at
                .format("%B %-d, %Y")
                .to_string(),
            certificate_id: details.certificate.id.to_string(),
        }
    }

    /// (text, font size in pt, bold, baseline in mm from the bottom)
    fn lines(&self) -> Vec<(String, f32, bool, f32)> {
        vec![
            (self.issuer.clone(), 20.0, true, 175.0),
            ("Certificate of Completion".to_string(), 34.0, true, 150.0),
            ("This certifies that".to_string(), 14.0, false, 128.0),
            (self.recipient.clone(), 28.0, true, 112.0),
            ("has successfully completed the course".to_string(), 14.0, false, 95.0),
            (self.course.clone(), 22.0, true, 80.0),
            (format!("Issued on {}", self.issued_on), 12.0, false, 55.0),
            (
                format!("Certificate ID: {}", self.certificate_id),
                10.0,
                false,
                25.0,
            ),
        ]
    }
}

fn centered_x(text: &str, font_size: f32) -> f32 {
    let width = text.chars().count() as f32 * font_size * GLYPH_WIDTH_EM * PT_TO_MM;
    ((PAGE_WIDTH - width) / 2.0).max(10.0)
}

fn write_line(
    layer: &PdfLayerReference,
    text: &str,
    font_size: f32,
    y: f32,
    font: &IndirectFontRef,
) {
    layer.use_text(text, font_size, Mm(centered_x(text, font_size)), Mm(y), font);
}

/// Writes the PDF to `path`, creating the parent directory when needed. The
/// document is written to a sibling temp file first and then renamed so that
/// a reader never sees a half-written certificate.
pub fn render_to_file(path: &Path, content: &CertificateContent) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let (doc, page, layer) = PdfDocument::new(
        format!("Certificate {}", content.certificate_id),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1".to_string(),
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let layer = doc.get_page(page).get_layer(layer);

    for (text, size, is_bold, y) in content.lines() {
        let font = if is_bold { &bold } else { &regular };
        write_line(&layer, &text, size, y, font);
    }

    let tmp_path = path.with_extension("pdf.tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        doc.save(&mut writer)?;
    }
    fs::rename(&tmp_path, path)?;

    tracing::info!("Certificate rendered to {}", path.display());
    Ok(())
}
