use std::path::PathBuf;
use std::str::FromStr;

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::Result;
use crate::models::transcript::{AttemptTranscript, QuizSummary};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => XLSX_CONTENT_TYPE,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unsupported export format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders transcript summaries for download and optionally keeps a copy on disk.
#[derive(Clone)]
pub struct ExportService {
    export_dir: Option<PathBuf>,
}

const COLUMNS: [(&str, f64); 8] = [
    ("Quiz ID", 10.0),
    ("Title", 30.0),
    ("Description", 40.0),
    ("Company ID", 12.0),
    ("User ID", 10.0),
    ("Correct", 10.0),
    ("Total", 10.0),
    ("Score (%)", 12.0),
];

impl ExportService {
    pub fn new(export_dir: Option<PathBuf>) -> Self {
        Self { export_dir }
    }

    pub async fn export(
        &self,
        transcripts: &[AttemptTranscript],
        format: ExportFormat,
        stem: &str,
    ) -> Result<ExportFile> {
        let summaries: Vec<&QuizSummary> = transcripts.iter().map(|t| &t.summary).collect();
        let bytes = match format {
            ExportFormat::Json => serde_json::to_vec_pretty(&summaries)?,
            ExportFormat::Xlsx => Self::summaries_xlsx(&summaries)?,
        };
        let file_name = format!(
            "{}_{}.{}",
            stem,
            chrono::Utc::now().format("%Y%m%d_%H%M%S"),
            format.extension()
        );

        if let Some(dir) = &self.export_dir {
            tokio::fs::create_dir_all(dir).await?;
            let path = dir.join(&file_name);
            tokio::fs::write(&path, &bytes).await?;
            tracing::info!(path = %path.display(), rows = summaries.len(), "export written");
        }

        Ok(ExportFile {
            file_name,
            content_type: format.content_type(),
            bytes,
        })
    }

    /// One header row, then one row per summary.
    pub fn summaries_xlsx(summaries: &[&QuizSummary]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Quiz results")?;

        let border = Color::RGB(0xE2E8F0);
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x0F172A))
            .set_border(FormatBorder::Thin)
            .set_border_color(border);
        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(border);
        let percent = cell.clone().set_num_format("0.00");

        for (col, (title, width)) in COLUMNS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (i, s) in summaries.iter().enumerate() {
            let row = (i + 1) as u32;
            let score = if s.total_questions > 0 {
                s.correct_answers as f64 / s.total_questions as f64 * 100.0
            } else {
                0.0
            };
            worksheet.write_number_with_format(row, 0, s.quiz_id as f64, &cell)?;
            worksheet.write_string_with_format(row, 1, &s.title, &cell)?;
            worksheet.write_string_with_format(row, 2, &s.description, &cell)?;
            worksheet.write_number_with_format(row, 3, s.company_id as f64, &cell)?;
            worksheet.write_number_with_format(row, 4, s.user_id as f64, &cell)?;
            worksheet.write_number_with_format(row, 5, s.correct_answers as f64, &cell)?;
            worksheet.write_number_with_format(row, 6, s.total_questions as f64, &cell)?;
            worksheet.write_number_with_format(row, 7, score, &percent)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(user_id: i64) -> AttemptTranscript {
        AttemptTranscript {
            questions: vec![],
            summary: QuizSummary {
                quiz_id: 4,
                title: "Hygiene".into(),
                description: "Kitchen rules".into(),
                company_id: 2,
                user_id,
                correct_answers: 3,
                total_questions: 4,
            },
        }
    }

    #[test]
    fn format_parses_aliases() {
        assert_eq!("XLSX".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert_eq!("excel".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[tokio::test]
    async fn json_export_is_the_summary_list() {
        let file = ExportService::new(None)
            .export(&[transcript(1), transcript(2)], ExportFormat::Json, "quiz_4")
            .await
            .unwrap();
        let parsed: Vec<QuizSummary> = serde_json::from_slice(&file.bytes).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].user_id, 2);
        assert!(file.file_name.starts_with("quiz_4_") && file.file_name.ends_with(".json"));
    }

    #[tokio::test]
    async fn xlsx_export_is_a_zip_container() {
        let file = ExportService::new(None)
            .export(&[transcript(1)], ExportFormat::Xlsx, "quiz_4")
            .await
            .unwrap();
        assert_eq!(file.content_type, XLSX_CONTENT_TYPE);
        assert_eq!(&file.bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn export_dir_receives_a_copy() {
        let dir = std::env::temp_dir().join(format!("quiz-export-{}", std::process::id()));
        let file = ExportService::new(Some(dir.clone()))
            .export(&[transcript(1)], ExportFormat::Json, "user_1")
            .await
            .unwrap();
        let on_disk = tokio::fs::read(dir.join(&file.file_name)).await.unwrap();
        assert_eq!(on_disk, file.bytes);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
