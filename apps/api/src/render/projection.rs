//! Render projection: a pure mapping from a resume to displayable sections.
//!
//! Tolerates documents that never went through the sanitizing parser: work
//! items failing the shape check are skipped in viewing mode and blank bullet
//! lines are never displayed. The source document is not modified.

use serde::{Deserialize, Serialize};

use crate::models::resume::{is_valid_work_item, ResumeDocument, Section};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Viewing,
    /// Optional sections are shown even when absent or empty, and every item is
    /// kept so it can be corrected.
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResume {
    pub header: RenderedHeader,
    pub summary: String,
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedHeader {
    pub name: String,
    /// Location, phone, email, then links, skipping blanks.
    pub contact_line: Vec<ContactPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPart {
    pub label: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub section: Section,
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum SectionBody {
    Bullets(Vec<String>),
    Inline(Vec<String>),
    Jobs(Vec<RenderedJob>),
    Schools(Vec<RenderedSchool>),
    Projects(Vec<RenderedProject>),
}

impl SectionBody {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionBody::Bullets(items) | SectionBody::Inline(items) => items.is_empty(),
            SectionBody::Jobs(items) => items.is_empty(),
            SectionBody::Schools(items) => items.is_empty(),
            SectionBody::Projects(items) => items.is_empty(),
        }
    }
}

/// `index` is the item's position in the document, for edit operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedJob {
    pub index: usize,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSchool {
    pub index: usize,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedProject {
    pub index: usize,
    pub project_name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

pub fn project(doc: &ResumeDocument, mode: RenderMode) -> RenderedResume {
    let editing = mode == RenderMode::Editing;
    let mut sections = Vec::new();

    let qualifications = doc
        .qualifications
        .as_deref()
        .map(|lines| SectionBody::Bullets(visible_lines(lines)));
    if let Some(body) = optional_body(qualifications, SectionBody::Bullets, editing) {
        sections.push(section(Section::Qualifications, body));
    }

    let jobs = doc
        .work_experience
        .iter()
        .enumerate()
        .filter(|(_, job)| editing || is_valid_work_item(*job))
        .map(|(index, job)| RenderedJob {
            index,
            job_title: job.job_title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            dates: date_range(&job.start_date, &job.end_date),
            bullets: visible_lines(&job.description),
        })
        .collect();
    sections.push(section(Section::WorkExperience, SectionBody::Jobs(jobs)));

    let schools = doc
        .education
        .iter()
        .enumerate()
        .map(|(index, edu)| RenderedSchool {
            index,
            degree: edu.degree.clone(),
            institution: edu.institution.clone(),
            location: edu.location.clone(),
            graduation_date: edu.graduation_date.clone(),
        })
        .collect();
    sections.push(section(Section::Education, SectionBody::Schools(schools)));

    sections.push(section(
        Section::Skills,
        SectionBody::Inline(visible_lines(&doc.skills)),
    ));

    let projects = doc.portfolio_projects.as_deref().map(|projects| {
        SectionBody::Projects(
            projects
                .iter()
                .enumerate()
                .map(|(index, p)| RenderedProject {
                    index,
                    project_name: p.project_name.clone(),
                    description: p.description.clone(),
                    technologies: visible_lines(&p.technologies),
                    link: p.link.clone().filter(|l| !l.trim().is_empty()),
                })
                .collect(),
        )
    });
    if let Some(body) = optional_body(projects, SectionBody::Projects, editing) {
        sections.push(section(Section::PortfolioProjects, body));
    }

    RenderedResume {
        header: header(doc),
        summary: doc.summary.clone(),
        sections,
    }
}

fn section(section: Section, body: SectionBody) -> RenderedSection {
    RenderedSection {
        section,
        title: section.title(),
        body,
    }
}

/// Optional sections show only when present and non-empty, unless editing.
fn optional_body<T>(
    body: Option<SectionBody>,
    empty: fn(Vec<T>) -> SectionBody,
    editing: bool,
) -> Option<SectionBody> {
    match body {
        Some(body) if editing || !body.is_empty() => Some(body),
        Some(_) => None,
        None if editing => Some(empty(Vec::new())),
        None => None,
    }
}

fn visible_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect()
}

fn date_range(start: &str, end: &str) -> String {
    match (start.trim().is_empty(), end.trim().is_empty()) {
        (false, false) => format!("{start} – {end}"),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

fn header(doc: &ResumeDocument) -> RenderedHeader {
    let contact = &doc.contact_info;
    let mut parts = Vec::new();
    let mut push = |label: &'static str, text: &str, href: Option<String>| {
        if !text.trim().is_empty() {
            parts.push(ContactPart {
                label,
                text: text.to_string(),
                href,
            });
        }
    };

    push("location", &contact.location, None);
    push("phone", &contact.phone, None);
    push(
        "email",
        &contact.email,
        Some(format!("mailto:{}", contact.email)),
    );
    if let Some(url) = contact.linkedin.as_ref().filter(|u| !u.trim().is_empty()) {
        push("linkedin", "LinkedIn", Some(url.clone()));
    }
    if let Some(url) = contact.portfolio.as_ref().filter(|u| !u.trim().is_empty()) {
        push("portfolio", "Portfolio", Some(url.clone()));
    }

    RenderedHeader {
        name: contact.name.clone(),
        contact_line: parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_resume;
    use crate::models::resume::{ProjectItem, WorkItem};

    fn section_of(rendered: &RenderedResume, kind: Section) -> Option<&RenderedSection> {
        rendered.sections.iter().find(|s| s.section == kind)
    }

    fn bare_resume() -> ResumeDocument {
        ResumeDocument {
            summary: "Engineer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sections_render_in_display_order() {
        let rendered = project(&sample_resume(), RenderMode::Viewing);
        let order: Vec<_> = rendered.sections.iter().map(|s| s.section).collect();
        assert_eq!(
            order,
            vec![
                Section::Qualifications,
                Section::WorkExperience,
                Section::Education,
                Section::Skills,
                Section::PortfolioProjects
            ]
        );
    }

    #[test]
    fn test_absent_optional_sections_are_hidden_when_viewing() {
        let rendered = project(&bare_resume(), RenderMode::Viewing);
        assert!(section_of(&rendered, Section::Qualifications).is_none());
        assert!(section_of(&rendered, Section::PortfolioProjects).is_none());
        assert!(section_of(&rendered, Section::Skills).is_some());
    }

    #[test]
    fn test_empty_optional_sections_are_hidden_when_viewing() {
        let doc = ResumeDocument {
            qualifications: Some(vec!["  ".to_string()]),
            portfolio_projects: Some(vec![]),
            ..bare_resume()
        };
        let rendered = project(&doc, RenderMode::Viewing);
        assert!(section_of(&rendered, Section::Qualifications).is_none());
        assert!(section_of(&rendered, Section::PortfolioProjects).is_none());
    }

    #[test]
    fn test_optional_sections_render_when_editing() {
        let rendered = project(&bare_resume(), RenderMode::Editing);
        let quals = section_of(&rendered, Section::Qualifications).unwrap();
        assert!(quals.body.is_empty());
        assert!(section_of(&rendered, Section::PortfolioProjects).is_some());
    }

    #[test]
    fn test_malformed_work_items_are_skipped_when_viewing() {
        let doc = ResumeDocument {
            work_experience: vec![
                WorkItem {
                    job_title: String::new(),
                    company: "Ghost Corp".to_string(),
                    ..Default::default()
                },
                WorkItem {
                    job_title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    description: vec!["Built things".to_string()],
                    ..Default::default()
                },
            ],
            ..bare_resume()
        };
        let rendered = project(&doc, RenderMode::Viewing);
        let SectionBody::Jobs(jobs) = &section_of(&rendered, Section::WorkExperience).unwrap().body
        else {
            panic!("work experience should render as jobs");
        };
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].index, 1);

        let editing = project(&doc, RenderMode::Editing);
        let SectionBody::Jobs(jobs) = &section_of(&editing, Section::WorkExperience).unwrap().body
        else {
            panic!("work experience should render as jobs");
        };
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_blank_bullets_are_hidden_without_mutating_document() {
        let mut doc = sample_resume();
        doc.work_experience[0].description = vec![
            "Shipped".to_string(),
            "   ".to_string(),
            String::new(),
            "Mentored".to_string(),
        ];
        let before = doc.clone();
        let rendered = project(&doc, RenderMode::Viewing);
        let SectionBody::Jobs(jobs) = &section_of(&rendered, Section::WorkExperience).unwrap().body
        else {
            panic!("work experience should render as jobs");
        };
        assert_eq!(jobs[0].bullets, vec!["Shipped", "Mentored"]);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_header_skips_blank_contact_parts() {
        let mut doc = sample_resume();
        doc.contact_info.phone = String::new();
        doc.contact_info.linkedin = None;
        let rendered = project(&doc, RenderMode::Viewing);
        let labels: Vec<_> = rendered
            .header
            .contact_line
            .iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["location", "email", "portfolio"]);
        assert_eq!(
            rendered.header.contact_line[1].href.as_deref(),
            Some("mailto:jane.doe@example.com")
        );
    }

    #[test]
    fn test_date_range_formats() {
        assert_eq!(date_range("Jan 2020", "Present"), "Jan 2020 – Present");
        assert_eq!(date_range("Jan 2020", ""), "Jan 2020");
        assert_eq!(date_range("", ""), "");
    }

    #[test]
    fn test_project_blank_link_is_dropped() {
        let doc = ResumeDocument {
            portfolio_projects: Some(vec![ProjectItem {
                project_name: "Site".to_string(),
                link: Some(" ".to_string()),
                ..Default::default()
            }]),
            ..bare_resume()
        };
        let rendered = project(&doc, RenderMode::Viewing);
        let SectionBody::Projects(projects) =
            &section_of(&rendered, Section::PortfolioProjects).unwrap().body
        else {
            panic!("projects should render as projects");
        };
        assert_eq!(projects[0].link, None);
    }
}
