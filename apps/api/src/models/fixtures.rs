//! Bundled sample resume. Loaded directly, without the sanitizing parser.

use crate::models::resume::{ContactInfo, EducationItem, ProjectItem, ResumeDocument, WorkItem};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_resume() -> ResumeDocument {
    ResumeDocument {
        contact_info: ContactInfo {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            linkedin: Some("https://linkedin.com/in/janedoe".to_string()),
            portfolio: Some("https://janedoe.dev".to_string()),
        },
        summary: "Software engineer focused on scalable, user-friendly web applications. \
            Proficient in TypeScript, React and Node.js"
            .to_string(),
        qualifications: Some(lines(&[
            "Expert in modern frontend frameworks (React, Vue)",
            "Proficient in backend development with Node.js and Express",
            "Experienced with AWS and Google Cloud",
            "Strong understanding of SQL and NoSQL database design",
        ])),
        work_experience: vec![
            WorkItem {
                job_title: "Senior Frontend Engineer".to_string(),
                company: "Tech Solutions Inc".to_string(),
                location: "Palo Alto, CA".to_string(),
                start_date: "Jan 2022".to_string(),
                end_date: "Present".to_string(),
                description: lines(&[
                    "Led a new customer-facing dashboard in React and TypeScript, lifting engagement 20%",
                    "Mentored junior engineers and ran code reviews",
                    "Implemented responsive interfaces with the UX team",
                ]),
            },
            WorkItem {
                job_title: "Software Engineer".to_string(),
                company: "Innovate Co".to_string(),
                location: "San Jose, CA".to_string(),
                start_date: "Jun 2019".to_string(),
                end_date: "Dec 2021".to_string(),
                description: lines(&[
                    "Built features for a large-scale e-commerce platform",
                    "Wrote unit and integration tests for checkout services",
                ]),
            },
        ],
        education: vec![EducationItem {
            degree: "Bachelor of Science in Computer Science".to_string(),
            institution: "State University".to_string(),
            location: "San Francisco, CA".to_string(),
            graduation_date: "May 2019".to_string(),
        }],
        skills: lines(&[
            "TypeScript",
            "React",
            "Node.js",
            "PostgreSQL",
            "Docker",
            "AWS",
            "Git",
        ]),
        portfolio_projects: Some(vec![ProjectItem {
            project_name: "Personal Portfolio Website".to_string(),
            description: "Responsive portfolio site built with Next.js and deployed on Vercel"
                .to_string(),
            technologies: lines(&["Next.js", "React", "Tailwind CSS"]),
            link: Some("https://janedoe.dev".to_string()),
        }]),
    }
}
