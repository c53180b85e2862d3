// Placeholder items appended by `add_item`. Each section has its own template.

use crate::models::resume::{EducationItem, ProjectItem, WorkItem};

pub fn placeholder_work_item() -> WorkItem {
    WorkItem {
        job_title: "Job Title".to_string(),
        company: "Company".to_string(),
        location: "Location".to_string(),
        start_date: "Start Date".to_string(),
        end_date: "End Date".to_string(),
        description: vec!["Describe an accomplishment".to_string()],
    }
}

pub fn placeholder_education_item() -> EducationItem {
    EducationItem {
        degree: "Degree".to_string(),
        institution: "Institution".to_string(),
        location: "Location".to_string(),
        graduation_date: "Graduation Date".to_string(),
    }
}

pub fn placeholder_project_item() -> ProjectItem {
    ProjectItem {
        project_name: "Project Name".to_string(),
        description: "Describe the project".to_string(),
        technologies: vec!["Technology".to_string()],
        link: None,
    }
}
