//! Renders a projected resume as a markdown document for download.

use crate::render::projection::{RenderedResume, SectionBody};

pub fn to_markdown(resume: &RenderedResume) -> String {
    let mut md = format!("# {}\n\n", resume.header.name);

    let contact = resume
        .header
        .contact_line
        .iter()
        .map(|part| match &part.href {
            Some(href) if part.label != "email" => format!("[{}]({})", part.text, href),
            _ => part.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" • ");
    if !contact.is_empty() {
        md.push_str(&contact);
        md.push_str("\n\n");
    }

    if !resume.summary.trim().is_empty() {
        md.push_str("## Summary\n\n");
        md.push_str(&resume.summary);
        md.push_str("\n\n");
    }

    for section in &resume.sections {
        md.push_str(&format!("## {}\n\n", section.title));
        match &section.body {
            SectionBody::Bullets(lines) => {
                for line in lines {
                    md.push_str(&format!("- {line}\n"));
                }
            }
            SectionBody::Inline(items) => {
                md.push_str(&items.join(" • "));
                md.push('\n');
            }
            SectionBody::Jobs(jobs) => {
                for job in jobs {
                    md.push_str(&format!("### {} — {}\n", job.job_title, job.company));
                    let meta = [job.location.as_str(), job.dates.as_str()]
                        .into_iter()
                        .filter(|s| !s.trim().is_empty())
                        .collect::<Vec<_>>()
                        .join(" | ");
                    if !meta.is_empty() {
                        md.push_str(&format!("*{meta}*\n"));
                    }
                    for bullet in &job.bullets {
                        md.push_str(&format!("- {bullet}\n"));
                    }
                    md.push('\n');
                }
            }
            SectionBody::Schools(schools) => {
                for school in schools {
                    md.push_str(&format!("### {}\n", school.degree));
                    md.push_str(&format!(
                        "{}, {} | {}\n\n",
                        school.institution, school.location, school.graduation_date
                    ));
                }
            }
            SectionBody::Projects(projects) => {
                for project in projects {
                    match &project.link {
                        Some(link) => md.push_str(&format!(
                            "### [{}]({})\n",
                            project.project_name, link
                        )),
                        None => md.push_str(&format!("### {}\n", project.project_name)),
                    }
                    md.push_str(&format!("{}\n", project.description));
                    if !project.technologies.is_empty() {
                        md.push_str(&format!(
                            "**Technologies:** {}\n",
                            project.technologies.join(", ")
                        ));
                    }
                    md.push('\n');
                }
            }
        }
        md.push('\n');
    }

    md
}
