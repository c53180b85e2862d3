//! Resume document schema: the canonical shape every other module trusts.
//!
//! `qualifications` and `portfolio_projects` are present-or-absent sections:
//! `None` means the section does not exist, `Some(vec![])` means it exists but
//! is empty. `skills` is required and is never absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Bullet lines, in display order.
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub project_name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub contact_info: ContactInfo,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    pub work_experience: Vec<WorkItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_projects: Option<Vec<ProjectItem>>,
}

/// Top-level sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Qualifications,
    WorkExperience,
    Education,
    Skills,
    PortfolioProjects,
}

impl Section {
    /// JSON key of the section inside a `ResumeDocument`.
    pub fn key(self) -> &'static str {
        match self {
            Section::Qualifications => "qualifications",
            Section::WorkExperience => "workExperience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::PortfolioProjects => "portfolioProjects",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Qualifications => "Qualifications",
            Section::WorkExperience => "Work Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::PortfolioProjects => "Portfolio Projects",
        }
    }

    /// Optional sections may be absent; the others are always a sequence.
    pub fn is_optional(self) -> bool {
        matches!(self, Section::Qualifications | Section::PortfolioProjects)
    }
}

/// Sections whose elements are records rather than plain text lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemSection {
    WorkExperience,
    Education,
    PortfolioProjects,
}

impl From<ItemSection> for Section {
    fn from(section: ItemSection) -> Self {
        match section {
            ItemSection::WorkExperience => Section::WorkExperience,
            ItemSection::Education => Section::Education,
            ItemSection::PortfolioProjects => Section::PortfolioProjects,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Work item shape check
// ────────────────────────────────────────────────────────────────────────────

/// Read-only view of the fields the work item shape check looks at.
///
/// Implemented for raw JSON (normalization) and for typed items (rendering),
/// so both paths share `is_valid_work_item`.
pub trait WorkItemShape {
    fn job_title(&self) -> Option<&str>;
    fn company(&self) -> Option<&str>;
    fn has_description_list(&self) -> bool;
}

/// A work item is trusted only with a non-blank job title, a non-blank
/// company, and a description that is a sequence.
pub fn is_valid_work_item<T: WorkItemShape + ?Sized>(item: &T) -> bool {
    let present = |field: Option<&str>| field.is_some_and(|s| !s.trim().is_empty());
    present(item.job_title()) && present(item.company()) && item.has_description_list()
}

impl WorkItemShape for WorkItem {
    fn job_title(&self) -> Option<&str> {
        Some(&self.job_title)
    }

    fn company(&self) -> Option<&str> {
        Some(&self.company)
    }

    fn has_description_list(&self) -> bool {
        true
    }
}

impl WorkItemShape for Value {
    fn job_title(&self) -> Option<&str> {
        scalar_text(self.get("jobTitle")?)
    }

    fn company(&self) -> Option<&str> {
        scalar_text(self.get("company")?)
    }

    fn has_description_list(&self) -> bool {
        self.get("description").is_some_and(Value::is_array)
    }
}

/// Numbers and booleans count as present text; only strings can be blank.
fn scalar_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Number(_) => Some("0"),
        Value::Bool(_) => Some("true"),
        _ => None,
    }
}
