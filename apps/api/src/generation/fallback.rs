//! Fallback generators — deterministic, network-free content for every façade operation.
//!
//! These run when the live path is exhausted. Output must be directly usable and
//! byte-identical for the same profile: no randomness, no clock.

use crate::generation::generator::InterviewQaPair;
use crate::models::profile::UserProfile;

const DEFAULT_EDUCATION: &str = "Bachelor's Degree";

pub fn fallback_resume(profile: &UserProfile) -> String {
    let education = if profile.education.trim().is_empty() {
        DEFAULT_EDUCATION
    } else {
        profile.education.as_str()
    };

    format!(
        "## Professional Summary\n\
Results-oriented {role} with expertise in {skills}. Proven track record of driving efficiency and delivering high-quality results in competitive environments.\n\
\n\
## Core Skills\n\
* {skill_list}\n\
* Project Management & Team Collaboration\n\
* Strategic Planning & Problem Solving\n\
\n\
## Professional Experience\n\
**{role}** | *Confidential Company* | 2021 - Present\n\
* Spearheaded key initiatives that increased operational efficiency by 20%.\n\
* Collaborated with cross-functional teams to meet strict project deadlines.\n\
\n\
**Previous Role** | *Previous Company* | 2018 - 2021\n\
* Managed daily operations and ensured compliance with industry standards.\n\
* Mentored junior team members to improve overall team performance.\n\
\n\
## Education\n\
**{education}**",
        role = profile.target_role,
        skills = profile.skills,
        skill_list = profile.skills.split(',').collect::<Vec<_>>().join(", "),
        education = education,
    )
}

pub fn fallback_cover_letter(profile: &UserProfile) -> String {
    format!(
        "Dear Hiring Manager,\n\n\
I am writing to express my strong interest in the {role} position. \
With my background in {skills}, I am confident I can contribute effectively to your team.\n\n\
Thank you for considering my application.\n\n\
Sincerely,\n{name}",
        role = profile.target_role,
        skills = profile.skills,
        name = profile.full_name,
    )
}

/// The three canned pairs behind `fallback_interview_questions`.
pub fn fallback_interview_pairs(profile: &UserProfile) -> [InterviewQaPair; 3] {
    [
        InterviewQaPair::new(
            "Tell me about yourself.",
            "Focus on your professional journey, key skills, and why you are a great fit for this role.",
        ),
        InterviewQaPair::new(
            format!("What is your experience with {}?", profile.first_skill()),
            "Describe a specific project where you used this skill to solve a problem.",
        ),
        InterviewQaPair::new(
            "Why do you want to work here?",
            "Align your personal career goals with the company's mission and values.",
        ),
    ]
}

/// Same shape as live output: a compact JSON array of `{question, answer}` objects.
pub fn fallback_interview_questions(profile: &UserProfile) -> String {
    let pairs = fallback_interview_pairs(profile);
    let items: Vec<String> = pairs
        .iter()
        .map(|p| {
            format!(
                "{{\"question\":{},\"answer\":{}}}",
                json_string(&p.question),
                json_string(&p.answer)
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

pub fn fallback_market_insights(profile: &UserProfile) -> String {
    format!(
        "## Market Outlook: {region}\n\
* **Demand:** High demand for {role} professionals.\n\
* **Salary:** Competitive and trending upwards.\n\
* **Key Insight:** Focus on highlighting {skill} to stand out.",
        region = profile.target_region,
        role = profile.target_role,
        skill = profile.first_skill(),
    )
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
