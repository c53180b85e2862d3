//! Edit session: an isolated working copy of a resume.
//!
//! `begin` deep-clones the canonical document; every mutation touches only the
//! working copy. `commit` hands the working copy back as the new canonical
//! document, `cancel` drops it. Both consume the session, so a finished
//! session cannot be mutated again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::editing::templates::{
    placeholder_education_item, placeholder_project_item, placeholder_work_item,
};
use crate::models::resume::{ItemSection, ResumeDocument, Section};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("an edit session is already open")]
    AlreadyEditing,

    #[error("no edit session is open")]
    NotEditing,

    #[error("field '{field:?}' does not exist in section '{section:?}'")]
    FieldNotInSection { field: ItemField, section: ItemSection },

    #[error("export is blocked while an edit session is open; save or cancel first")]
    ExportWhileEditing,
}

/// Single-valued text fields outside the item sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    Name,
    Email,
    Phone,
    Location,
    Linkedin,
    Portfolio,
    Summary,
}

/// Whole-sequence text fields edited as delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    /// Comma separated.
    Skills,
    /// One entry per line.
    Qualifications,
}

/// Fields of the records held by item sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    JobTitle,
    Company,
    Location,
    StartDate,
    EndDate,
    /// Newline separated bullets for work items, plain text for projects.
    Description,
    Degree,
    Institution,
    GraduationDate,
    ProjectName,
    /// Comma separated.
    Technologies,
    Link,
}

impl ItemField {
    pub fn belongs_to(self, section: ItemSection) -> bool {
        match section {
            ItemSection::WorkExperience => matches!(
                self,
                ItemField::JobTitle
                    | ItemField::Company
                    | ItemField::Location
                    | ItemField::StartDate
                    | ItemField::EndDate
                    | ItemField::Description
            ),
            ItemSection::Education => matches!(
                self,
                ItemField::Degree
                    | ItemField::Institution
                    | ItemField::Location
                    | ItemField::GraduationDate
            ),
            ItemSection::PortfolioProjects => matches!(
                self,
                ItemField::ProjectName
                    | ItemField::Description
                    | ItemField::Technologies
                    | ItemField::Link
            ),
        }
    }
}

/// One mutation of the working copy, as accepted over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    SetScalarField {
        field: ScalarField,
        value: String,
    },
    SetListField {
        field: ListField,
        value: String,
    },
    SetItemField {
        section: ItemSection,
        index: usize,
        field: ItemField,
        value: String,
    },
    AddItem {
        section: ItemSection,
    },
    DeleteItem {
        section: ItemSection,
        index: usize,
    },
    DeleteSection {
        section: Section,
    },
}

#[derive(Debug, Clone)]
pub struct EditSession {
    working: ResumeDocument,
    started_at: DateTime<Utc>,
}

impl EditSession {
    pub fn begin(document: &ResumeDocument) -> Self {
        Self {
            working: document.clone(),
            started_at: Utc::now(),
        }
    }

    pub fn working_copy(&self) -> &ResumeDocument {
        &self.working
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn set_scalar_field(&mut self, field: ScalarField, value: impl Into<String>) {
        let value = value.into();
        let contact = &mut self.working.contact_info;
        match field {
            ScalarField::Name => contact.name = value,
            ScalarField::Email => contact.email = value,
            ScalarField::Phone => contact.phone = value,
            ScalarField::Location => contact.location = value,
            ScalarField::Linkedin => contact.linkedin = non_blank(value),
            ScalarField::Portfolio => contact.portfolio = non_blank(value),
            ScalarField::Summary => self.working.summary = value,
        }
    }

    pub fn set_list_field(&mut self, field: ListField, raw: &str) {
        match field {
            ListField::Skills => self.working.skills = split_commas(raw),
            ListField::Qualifications => self.working.qualifications = Some(split_lines(raw)),
        }
    }

    /// Sets one field of one item. Returns `Ok(false)` when `index` is out of
    /// range for the section's current length.
    pub fn set_item_field(
        &mut self,
        section: ItemSection,
        index: usize,
        field: ItemField,
        raw: &str,
    ) -> Result<bool, EditError> {
        let mismatch = EditError::FieldNotInSection { field, section };
        if !field.belongs_to(section) {
            return Err(mismatch);
        }
        match section {
            ItemSection::WorkExperience => {
                let Some(item) = self.working.work_experience.get_mut(index) else {
                    return Ok(false);
                };
                match field {
                    ItemField::JobTitle => item.job_title = raw.to_string(),
                    ItemField::Company => item.company = raw.to_string(),
                    ItemField::Location => item.location = raw.to_string(),
                    ItemField::StartDate => item.start_date = raw.to_string(),
                    ItemField::EndDate => item.end_date = raw.to_string(),
                    ItemField::Description => item.description = split_lines(raw),
                    _ => return Err(mismatch),
                }
            }
            ItemSection::Education => {
                let Some(item) = self.working.education.get_mut(index) else {
                    return Ok(false);
                };
                match field {
                    ItemField::Degree => item.degree = raw.to_string(),
                    ItemField::Institution => item.institution = raw.to_string(),
                    ItemField::Location => item.location = raw.to_string(),
                    ItemField::GraduationDate => item.graduation_date = raw.to_string(),
                    _ => return Err(mismatch),
                }
            }
            ItemSection::PortfolioProjects => {
                let Some(item) = self
                    .working
                    .portfolio_projects
                    .as_mut()
                    .and_then(|projects| projects.get_mut(index))
                else {
                    return Ok(false);
                };
                match field {
                    ItemField::ProjectName => item.project_name = raw.to_string(),
                    ItemField::Description => item.description = raw.to_string(),
                    ItemField::Technologies => item.technologies = split_commas(raw),
                    ItemField::Link => item.link = non_blank(raw.to_string()),
                    _ => return Err(mismatch),
                }
            }
        }
        Ok(true)
    }

    /// Appends the section's placeholder item and returns its index.
    pub fn add_item(&mut self, section: ItemSection) -> usize {
        let len = match section {
            ItemSection::WorkExperience => {
                self.working.work_experience.push(placeholder_work_item());
                self.working.work_experience.len()
            }
            ItemSection::Education => {
                self.working.education.push(placeholder_education_item());
                self.working.education.len()
            }
            ItemSection::PortfolioProjects => {
                let projects = self.working.portfolio_projects.get_or_insert_with(Vec::new);
                projects.push(placeholder_project_item());
                projects.len()
            }
        };
        len - 1
    }

    /// Removes the item at `index`. Returns `false` when out of range.
    pub fn delete_item(&mut self, section: ItemSection, index: usize) -> bool {
        match section {
            ItemSection::WorkExperience => remove_at(&mut self.working.work_experience, index),
            ItemSection::Education => remove_at(&mut self.working.education, index),
            ItemSection::PortfolioProjects => self
                .working
                .portfolio_projects
                .as_mut()
                .is_some_and(|projects| remove_at(projects, index)),
        }
    }

    /// Optional sections become absent; required ones become empty.
    pub fn delete_section(&mut self, section: Section) {
        debug!(
            "{} section {}",
            if section.is_optional() { "Removing" } else { "Clearing" },
            section.key()
        );
        match section {
            Section::Qualifications => self.working.qualifications = None,
            Section::PortfolioProjects => self.working.portfolio_projects = None,
            Section::Skills => self.working.skills.clear(),
            Section::WorkExperience => self.working.work_experience.clear(),
            Section::Education => self.working.education.clear(),
        }
    }

    /// Applies a wire-level operation. Returns whether the working copy changed.
    pub fn apply(&mut self, op: EditOp) -> Result<bool, EditError> {
        debug!("Applying edit op: {:?}", op);
        match op {
            EditOp::SetScalarField { field, value } => {
                self.set_scalar_field(field, value);
                Ok(true)
            }
            EditOp::SetListField { field, value } => {
                self.set_list_field(field, &value);
                Ok(true)
            }
            EditOp::SetItemField {
                section,
                index,
                field,
                value,
            } => self.set_item_field(section, index, field, &value),
            EditOp::AddItem { section } => {
                self.add_item(section);
                Ok(true)
            }
            EditOp::DeleteItem { section, index } => Ok(self.delete_item(section, index)),
            EditOp::DeleteSection { section } => {
                self.delete_section(section);
                Ok(true)
            }
        }
    }

    pub fn commit(self) -> ResumeDocument {
        self.working
    }

    pub fn cancel(self) {
        debug!(
            "Discarding working copy started at {}",
            self.started_at.to_rfc3339()
        );
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn split_commas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.lines().map(String::from).collect()
}
