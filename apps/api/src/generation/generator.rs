//! Resume generation: orchestrates the CV → resume pipeline.
//!
//! Flow: validate upload → extract source text → LLM generate →
//!       locate JSON span → sanitize → `ResumeDocument` + report.
//!
//! The backend call sits behind the `ResumeGenerator` trait so the pipeline
//! can run against a stub.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use crate::generation::source_text::extract_source_text;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::resume::ResumeDocument;
use crate::normalize::{normalize_response, SanitizeReport};

pub const MIN_PAGE_COUNT: u8 = 1;
pub const MAX_PAGE_COUNT: u8 = 3;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    UnreadableDocument(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Upload formats accepted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
}

impl MediaType {
    /// Prefix match, so parameters such as `; charset=binary` are tolerated.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim();
        if mime.starts_with(PDF_MIME) {
            Some(MediaType::Pdf)
        } else if mime.starts_with(DOCX_MIME) {
            Some(MediaType::Docx)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Pdf => "PDF",
            MediaType::Docx => "DOCX",
        }
    }
}

/// A validated upload: non-empty bytes of a supported media type.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub bytes: Bytes,
    pub media_type: MediaType,
}

impl SourceDocument {
    pub fn new(bytes: Bytes, mime: &str) -> Result<Self, AppError> {
        if bytes.is_empty() {
            return Err(AppError::Validation("CV file content is empty.".to_string()));
        }
        let media_type = MediaType::from_mime(mime).ok_or_else(|| {
            AppError::UnsupportedMediaType(format!(
                "Invalid file type '{mime}'. Please upload a PDF or DOCX file."
            ))
        })?;
        Ok(Self { bytes, media_type })
    }
}

pub fn validate_page_count(page_count: u8) -> Result<u8, AppError> {
    if (MIN_PAGE_COUNT..=MAX_PAGE_COUNT).contains(&page_count) {
        Ok(page_count)
    } else {
        Err(AppError::Validation(format!(
            "page_count must be between {MIN_PAGE_COUNT} and {MAX_PAGE_COUNT}, got {page_count}"
        )))
    }
}

/// Output of the full pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    pub document: ResumeDocument,
    pub warnings: SanitizeReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Generator seam
// ────────────────────────────────────────────────────────────────────────────

/// Turns a source document into raw backend text. The text is untrusted and
/// is always run through the normalizer.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(
        &self,
        source: &SourceDocument,
        page_count: u8,
    ) -> Result<String, GenerationError>;
}

/// Default generator: extracts the CV text locally and asks Claude to rewrite
/// it as a resume.
pub struct LlmResumeGenerator {
    llm: LlmClient,
}

impl LlmResumeGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeGenerator for LlmResumeGenerator {
    async fn generate(
        &self,
        source: &SourceDocument,
        page_count: u8,
    ) -> Result<String, GenerationError> {
        let cv_text = extract_source_text(source).await?;
        let prompt = build_generation_prompt(&cv_text, page_count);
        let raw = self
            .llm
            .call_text(&prompt, &build_system_prompt())
            .await?;
        info!("LLM returned {} chars of resume text", raw.len());
        Ok(raw)
    }
}

fn build_system_prompt() -> String {
    format!("{RESUME_SYSTEM} {JSON_ONLY_SYSTEM}")
}

fn build_generation_prompt(cv_text: &str, page_count: u8) -> String {
    RESUME_PROMPT_TEMPLATE
        .replace("{page_count}", &page_count.to_string())
        .replace("{no_invention}", NO_INVENTION_INSTRUCTION)
        .replace("{cv_text}", cv_text)
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the generator and normalizes its reply into a document.
pub async fn generate_resume(
    generator: &dyn ResumeGenerator,
    source: &SourceDocument,
    page_count: u8,
) -> Result<GeneratedResume, AppError> {
    let page_count = validate_page_count(page_count)?;

    info!(
        "Generating resume from {} upload ({} bytes, {} page(s))",
        source.media_type.label(),
        source.bytes.len(),
        page_count
    );

    let raw = generator.generate(source, page_count).await?;
    let sanitized = normalize_response(&raw)?;

    if !sanitized.report.is_clean() {
        warn!(
            "Generated resume needed repair: {} work item(s) dropped, missing {:?}",
            sanitized.report.dropped_work_items, sanitized.report.missing_fields
        );
    }

    Ok(GeneratedResume {
        document: sanitized.document,
        warnings: sanitized.report,
    })
}
