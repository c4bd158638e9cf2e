//! Renders a study plan into a downloadable PDF.
//!
//! The document embeds a Unicode TTF font (the hosted frontend ships
//! DejaVu Sans); without a readable font file the export is unavailable.
//! Rendering happens fully in memory and the file is written in one
//! step, so a failure never leaves a partial document behind.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use printpdf::{Mm, PdfDocument};

use crate::error::ExportError;
use crate::model::{StudyPlan, SubjectDetail};

pub mod layout;

use layout::{MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PageLayout};

pub struct PlanExporter {
    font_path: PathBuf,
    output_dir: PathBuf,
}

/// Deterministic download name, derived from subject and grade.
pub fn file_name(subject: &SubjectDetail) -> String {
    format!(
        "study-plan-{}-g{}.pdf",
        subject.name.to_lowercase(),
        subject.grade
    )
}

/// Title line naming subject and grade, in the product language.
pub fn document_title(subject: &SubjectDetail) -> String {
    format!("Oqıw rejesi: {} {}-klass", subject.name, subject.grade)
}

impl PlanExporter {
    pub fn new(font_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            font_path,
            output_dir,
        }
    }

    /// Writes the plan as a PDF into the output directory and returns
    /// the written path.
    pub fn export(
        &self,
        subject: &SubjectDetail,
        plan: &StudyPlan,
    ) -> Result<PathBuf, ExportError> {
        if plan.topics.is_empty() {
            return Err(ExportError::EmptyPlan);
        }

        let font_bytes = fs::read(&self.font_path)
            .map_err(|_| ExportError::FontUnavailable(self.font_path.clone()))?;

        let title = document_title(subject);
        let pages = layout::paginate(&title, &plan.topics);
        let bytes = render(&title, &font_bytes, &pages)?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name(subject));
        fs::write(&path, bytes)?;
        log::info!("exported study plan to {}", path.display());
        Ok(path)
    }
}

fn render(title: &str, font_bytes: &[u8], pages: &[PageLayout]) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "text");
    let font = doc
        .add_external_font(Cursor::new(font_bytes.to_vec()))
        .map_err(|err| ExportError::Render(err.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "text");
            layer = doc.get_page(page_index).get_layer(layer_index);
        }
        for line in &page.lines {
            // Layout measures from the top edge, PDF space from the bottom.
            layer.use_text(
                line.text.clone(),
                line.size as f32,
                Mm(MARGIN_MM as f32),
                Mm((PAGE_HEIGHT_MM - line.y) as f32),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|err| ExportError::Render(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudyTopic;

    fn subject() -> SubjectDetail {
        SubjectDetail {
            id: 3,
            name: "Math".to_string(),
            grade: 5,
            topics: String::new(),
        }
    }

    fn plan() -> StudyPlan {
        StudyPlan {
            topics: vec![StudyTopic {
                name: "Fractions".to_string(),
                desc: "Parts of a whole.".to_string(),
            }],
        }
    }

    #[test]
    fn download_name_is_derived_from_subject_and_grade() {
        assert_eq!(file_name(&subject()), "study-plan-math-g5.pdf");
    }

    #[test]
    fn empty_plan_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PlanExporter::new(
            dir.path().join("font.ttf"),
            dir.path().to_path_buf(),
        );

        let err = exporter.export(&subject(), &StudyPlan::default()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyPlan));
    }

    #[test]
    fn missing_font_aborts_without_writing_anything() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PlanExporter::new(
            dir.path().join("nowhere.ttf"),
            dir.path().to_path_buf(),
        );

        let err = exporter.export(&subject(), &plan()).unwrap_err();
        assert!(matches!(err, ExportError::FontUnavailable(_)));
        assert!(!dir.path().join(file_name(&subject())).exists());
    }
}
