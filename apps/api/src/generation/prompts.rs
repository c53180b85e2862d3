// LLM prompt constants for resume generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role half of the generation system prompt; `JSON_ONLY_SYSTEM` is
/// appended when the call is made.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer. \
    You turn raw CV text into a concise, professional, US-style resume.";

/// Generation prompt template. Replace `{page_count}`, `{cv_text}` and
/// `{no_invention}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Analyze the CV text below. Extract all relevant information, including contact details, professional summary, key qualifications, work experience, education, skills and portfolio projects. Then rewrite and format it into a concise, professional, US-style resume.

The final resume must not exceed {page_count} page(s) when printed. Paraphrase and summarize as needed to meet this length, focusing on impact and achievements.

{no_invention}

Return a JSON object with this EXACT schema:
{
  "contactInfo": {
    "name": "Full name",
    "email": "Email address",
    "phone": "Phone number",
    "location": "City and State, e.g. San Francisco, CA",
    "linkedin": "LinkedIn profile URL (omit if none)",
    "portfolio": "Portfolio or personal website URL (omit if none)"
  },
  "summary": "A 2-4 sentence professional summary.",
  "qualifications": ["Key qualification (omit the field if none)"],
  "workExperience": [
    {
      "jobTitle": "Senior Engineer",
      "company": "Company name",
      "location": "City, ST",
      "startDate": "June 2020",
      "endDate": "Present",
      "description": ["Accomplishment or responsibility as a bullet point"]
    }
  ],
  "education": [
    {
      "degree": "Bachelor of Science in Computer Science",
      "institution": "University name",
      "location": "City, ST",
      "graduationDate": "May 2020"
    }
  ],
  "skills": ["Relevant technical or soft skill"],
  "portfolioProjects": [
    {
      "projectName": "Project name",
      "description": "One or two sentences",
      "technologies": ["Technology"],
      "link": "URL (omit if none)"
    }
  ]
}

CV TEXT:
{cv_text}"#;
