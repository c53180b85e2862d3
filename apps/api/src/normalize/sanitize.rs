//! Sanitizing parser: the boundary where untrusted backend JSON becomes a
//! `ResumeDocument`.
//!
//! Cleaning is recursive: text leaves lose structural noise at both ends,
//! collections lose `null` and empty-text elements, and the `workExperience`
//! collection additionally drops anything that is not shaped like a work item.
//! Reassembly is lenient: a missing required field becomes an empty value and
//! is reported, never rejected.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::resume::{
    is_valid_work_item, ContactInfo, EducationItem, ProjectItem, ResumeDocument, Section, WorkItem,
};
use crate::normalize::NormalizeError;

/// Characters stripped from both ends of every text leaf.
const NOISE_CHARS: &[char] = &[':', '{', '}', '[', ']', '`', '"', '\'', '.', ',', ';', '*'];

const REQUIRED_FIELDS: &[&str] = &["contactInfo", "summary", "workExperience", "education", "skills"];
const REQUIRED_CONTACT_FIELDS: &[&str] = &["name", "email", "phone", "location"];

/// What the parser had to work around while producing the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    /// `workExperience` elements discarded by the shape check.
    pub dropped_work_items: usize,
    /// Required fields that were absent or blank, as dotted paths.
    pub missing_fields: Vec<String>,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_work_items == 0 && self.missing_fields.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Sanitized {
    pub document: ResumeDocument,
    pub report: SanitizeReport,
}

/// Parses an extracted JSON span and sanitizes it into a `ResumeDocument`.
pub fn sanitize_resume(span: &str) -> Result<Sanitized, NormalizeError> {
    let parsed: Value =
        serde_json::from_str(span).map_err(|source| NormalizeError::MalformedJson {
            text: span.to_string(),
            source,
        })?;

    if !parsed.is_object() {
        let source = <serde_json::Error as serde::de::Error>::custom(
            "top-level value is not an object",
        );
        return Err(NormalizeError::MalformedJson {
            text: span.to_string(),
            source,
        });
    }

    let mut report = SanitizeReport {
        dropped_work_items: count_invalid_work_items(&parsed),
        ..Default::default()
    };

    let cleaned = clean_value(None, parsed);
    let document = assemble_document(&cleaned);
    report.missing_fields = missing_required_fields(&cleaned);

    if report.dropped_work_items > 0 {
        debug!(
            "Dropped {} malformed workExperience entries",
            report.dropped_work_items
        );
    }
    if !report.missing_fields.is_empty() {
        warn!(
            "Resume is missing required fields, defaulting to empty: {}",
            report.missing_fields.join(", ")
        );
    }

    Ok(Sanitized { document, report })
}

// ────────────────────────────────────────────────────────────────────────────
// Recursive cleaning
// ────────────────────────────────────────────────────────────────────────────

/// Strips structural punctuation and whitespace from both ends of `text`.
pub fn clean_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || NOISE_CHARS.contains(&c))
}

/// Cleans a value. `key` is the field name the value sits under, if any.
pub fn clean_value(key: Option<&str>, value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(clean_text(&s).to_string()),
        Value::Array(items) => Value::Array(clean_array(key, items)),
        Value::Object(fields) => Value::Object(clean_object(fields)),
        other => other,
    }
}

fn clean_array(key: Option<&str>, items: Vec<Value>) -> Vec<Value> {
    let strict_work_items = key == Some(Section::WorkExperience.key());
    items
        .into_iter()
        .map(|item| clean_value(None, item))
        .filter(|item| !is_empty_element(item))
        .filter(|item| !strict_work_items || is_valid_work_item(item))
        .collect()
}

fn clean_object(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| {
            let cleaned = clean_value(Some(&key), value);
            (key, cleaned)
        })
        .collect()
}

fn is_empty_element(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn count_invalid_work_items(raw: &Value) -> usize {
    raw.get(Section::WorkExperience.key())
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| clean_value(None, item.clone()))
                .filter(|item| !is_empty_element(item) && !is_valid_work_item(item))
                .count()
        })
        .unwrap_or(0)
}

// ────────────────────────────────────────────────────────────────────────────
// Reassembly
// ────────────────────────────────────────────────────────────────────────────

fn assemble_document(root: &Value) -> ResumeDocument {
    let contact = root.get("contactInfo").unwrap_or(&Value::Null);

    ResumeDocument {
        contact_info: ContactInfo {
            name: text_field(contact, "name"),
            email: text_field(contact, "email"),
            phone: text_field(contact, "phone"),
            location: text_field(contact, "location"),
            linkedin: optional_text_field(contact, "linkedin"),
            portfolio: optional_text_field(contact, "portfolio"),
        },
        summary: text_field(root, "summary"),
        qualifications: root
            .get(Section::Qualifications.key())
            .and_then(Value::as_array)
            .map(|items| text_items(items)),
        work_experience: records(root, Section::WorkExperience.key())
            .map(|item| WorkItem {
                job_title: text_field(item, "jobTitle"),
                company: text_field(item, "company"),
                location: text_field(item, "location"),
                start_date: text_field(item, "startDate"),
                end_date: text_field(item, "endDate"),
                description: text_list_field(item, "description"),
            })
            .collect(),
        education: records(root, Section::Education.key())
            .map(|item| EducationItem {
                degree: text_field(item, "degree"),
                institution: text_field(item, "institution"),
                location: text_field(item, "location"),
                graduation_date: text_field(item, "graduationDate"),
            })
            .collect(),
        skills: text_list_field(root, Section::Skills.key()),
        portfolio_projects: root
            .get(Section::PortfolioProjects.key())
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(|item| ProjectItem {
                        project_name: text_field(item, "projectName"),
                        description: text_field(item, "description"),
                        technologies: text_list_field(item, "technologies"),
                        link: optional_text_field(item, "link"),
                    })
                    .collect()
            }),
    }
}

/// Object elements of the array under `key`; anything else is skipped.
fn records<'a>(root: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    root.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|item| item.is_object())
}

fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(scalar_to_text)
        .unwrap_or_default()
}

fn optional_text_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(scalar_to_text)
        .filter(|s| !s.is_empty())
}

fn text_items(items: &[Value]) -> Vec<String> {
    items.iter().filter_map(scalar_to_text).collect()
}

fn text_list_field(record: &Value, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| text_items(items))
        .unwrap_or_default()
}

/// Required fields that are absent, blank, or of a shape the reassembly
/// cannot use (and therefore defaulted).
fn missing_required_fields(root: &Value) -> Vec<String> {
    let mut missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|key| !has_required_shape(key, root.get(**key)))
        .map(|key| key.to_string())
        .collect();

    if let Some(contact) = root.get("contactInfo").filter(|c| c.is_object()) {
        missing.extend(
            REQUIRED_CONTACT_FIELDS
                .iter()
                .filter(|key| !is_present_scalar(contact.get(**key)))
                .map(|key| format!("contactInfo.{key}")),
        );
    }

    missing
}

fn has_required_shape(key: &str, value: Option<&Value>) -> bool {
    match key {
        "contactInfo" => value.is_some_and(Value::is_object),
        "workExperience" | "education" | "skills" => value.is_some_and(Value::is_array),
        _ => is_present_scalar(value),
    }
}

fn is_present_scalar(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(_) | Value::Bool(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_resume;
    use serde_json::json;

    fn sanitize_value(value: Value) -> Sanitized {
        sanitize_resume(&value.to_string()).unwrap()
    }

    #[test]
    fn test_clean_text_strips_structural_noise() {
        assert_eq!(clean_text("  \"Senior Engineer\",  "), "Senior Engineer");
        assert_eq!(clean_text("**Rust**"), "Rust");
        assert_eq!(clean_text("`{name: Jane}`"), "name: Jane");
        assert_eq!(clean_text("Built APIs."), "Built APIs");
    }

    #[test]
    fn test_clean_text_keeps_inner_punctuation() {
        assert_eq!(clean_text("Node.js, React"), "Node.js, React");
        assert_eq!(clean_text("jane.doe@example.com"), "jane.doe@example.com");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        for input in [" \"**Go**\", ", "Plain text", "::{[x]}::", "", "a.b.c."] {
            let once = clean_text(input);
            assert_eq!(clean_text(once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_clean_text_of_pure_noise_is_empty() {
        assert_eq!(clean_text(" ``` ; ., "), "");
    }

    #[test]
    fn test_clean_array_drops_null_and_empty_and_keeps_order() {
        let cleaned = clean_value(None, json!(["a", null, " ", "b", "\"\"", "c"]));
        assert_eq!(cleaned, json!(["a", "b", "c"]));
    }

    #[test]
    fn test_non_text_leaves_pass_through() {
        let cleaned = clean_value(None, json!({"n": 3, "flag": true, "nested": {"x": " y. "}}));
        assert_eq!(cleaned, json!({"n": 3, "flag": true, "nested": {"x": "y"}}));
    }

    #[test]
    fn test_work_experience_filters_malformed_entries() {
        let sanitized = sanitize_value(json!({
            "workExperience": [
                {"jobTitle": "Eng", "company": "X", "description": ["did stuff"]},
                "stray string",
                {"jobTitle": "Bad"}
            ]
        }));
        let jobs = &sanitized.document.work_experience;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].job_title, "Eng");
        assert_eq!(jobs[0].company, "X");
        assert_eq!(jobs[0].description, vec!["did stuff"]);
        assert_eq!(sanitized.report.dropped_work_items, 2);
    }

    #[test]
    fn test_work_experience_order_is_preserved_around_invalid_entry() {
        let sanitized = sanitize_value(json!({
            "workExperience": [
                {"jobTitle": "A", "company": "X", "description": []},
                {"jobTitle": "B", "company": "Y", "description": "not a list"},
                {"jobTitle": "C", "company": "Z", "description": ["c"]}
            ]
        }));
        let titles: Vec<_> = sanitized
            .document
            .work_experience
            .iter()
            .map(|j| j.job_title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_shape_filter_applies_after_cleaning() {
        // A title made only of fencing noise is blank once cleaned.
        let sanitized = sanitize_value(json!({
            "workExperience": [{"jobTitle": "**", "company": "X", "description": []}]
        }));
        assert!(sanitized.document.work_experience.is_empty());
    }

    #[test]
    fn test_shape_filter_only_applies_to_work_experience() {
        let sanitized = sanitize_value(json!({
            "education": [{"degree": "BSc"}],
            "portfolioProjects": [{"projectName": "Site"}]
        }));
        assert_eq!(sanitized.document.education.len(), 1);
        assert_eq!(sanitized.document.education[0].degree, "BSc");
        assert_eq!(sanitized.document.education[0].institution, "");
        let projects = sanitized.document.portfolio_projects.unwrap();
        assert_eq!(projects[0].project_name, "Site");
        assert!(projects[0].technologies.is_empty());
    }

    #[test]
    fn test_description_bullets_are_cleaned() {
        let sanitized = sanitize_value(json!({
            "workExperience": [{
                "jobTitle": "Eng",
                "company": "X",
                "description": ["* Shipped v2.", "", null, "  Cut costs 10%;  "]
            }]
        }));
        assert_eq!(
            sanitized.document.work_experience[0].description,
            vec!["Shipped v2", "Cut costs 10%"]
        );
    }

    #[test]
    fn test_optional_sections_absent_stay_absent() {
        let sanitized = sanitize_value(json!({"summary": "Engineer"}));
        assert_eq!(sanitized.document.qualifications, None);
        assert_eq!(sanitized.document.portfolio_projects, None);
        assert!(sanitized.document.skills.is_empty());
    }

    #[test]
    fn test_optional_section_present_but_empty_after_cleaning() {
        let sanitized = sanitize_value(json!({"qualifications": ["", null, " . "]}));
        assert_eq!(sanitized.document.qualifications, Some(vec![]));
    }

    #[test]
    fn test_blank_optional_contact_links_become_absent() {
        let sanitized = sanitize_value(json!({
            "contactInfo": {"name": "Jane", "linkedin": " ", "portfolio": "https://jane.dev"}
        }));
        let contact = sanitized.document.contact_info;
        assert_eq!(contact.linkedin, None);
        assert_eq!(contact.portfolio.as_deref(), Some("https://jane.dev"));
    }

    #[test]
    fn test_scalar_numbers_become_text() {
        let sanitized = sanitize_value(json!({
            "contactInfo": {"phone": 5551234567u64},
            "skills": ["Rust", 2024]
        }));
        assert_eq!(sanitized.document.contact_info.phone, "5551234567");
        assert_eq!(sanitized.document.skills, vec!["Rust", "2024"]);
    }

    #[test]
    fn test_mistyped_required_fields_are_reported() {
        let sanitized = sanitize_value(json!({
            "contactInfo": "Jane",
            "summary": ["not", "a", "string"],
            "workExperience": {},
            "education": [],
            "skills": "Rust, Go"
        }));
        assert!(sanitized.document.skills.is_empty());
        assert!(sanitized.document.work_experience.is_empty());
        assert_eq!(
            sanitized.report.missing_fields,
            vec!["contactInfo", "summary", "workExperience", "skills"]
        );
    }

    #[test]
    fn test_mistyped_contact_field_is_reported() {
        let sanitized = sanitize_value(json!({
            "contactInfo": {"name": {"first": "Jane"}, "email": "j@x.io", "phone": 5551234, "location": "NYC"},
            "summary": "Builder",
            "workExperience": [],
            "education": [],
            "skills": []
        }));
        assert_eq!(sanitized.report.missing_fields, vec!["contactInfo.name"]);
    }

    #[test]
    fn test_missing_required_fields_default_and_are_reported() {
        let sanitized = sanitize_value(json!({
            "contactInfo": {"name": "Jane", "email": "j@x.io", "phone": "1"},
            "skills": []
        }));
        assert_eq!(sanitized.document.summary, "");
        assert!(sanitized.document.work_experience.is_empty());
        assert_eq!(
            sanitized.report.missing_fields,
            vec![
                "summary",
                "workExperience",
                "education",
                "contactInfo.location"
            ]
        );
        assert!(!sanitized.report.is_clean());
    }

    #[test]
    fn test_clean_sample_resume_round_trips_unchanged() {
        let sample = sample_resume();
        let sanitized = sanitize_value(serde_json::to_value(&sample).unwrap());
        assert_eq!(sanitized.document, sample);
        assert!(sanitized.report.is_clean());
    }

    #[test]
    fn test_invalid_json_is_malformed_error() {
        let result = sanitize_resume("{\"summary\": }");
        assert!(matches!(result, Err(NormalizeError::MalformedJson { .. })));
    }

    #[test]
    fn test_top_level_array_is_malformed_error() {
        let result = sanitize_resume("[1, 2]");
        assert!(matches!(result, Err(NormalizeError::MalformedJson { .. })));
    }
}
