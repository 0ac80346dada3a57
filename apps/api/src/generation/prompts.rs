// All LLM prompt constants for the content-generation façade.
// The upstream model is small and free; short, blunt instructions work best.

use crate::models::profile::UserProfile;

pub const RESUME_SYSTEM: &str =
    "Resume Writer. Markdown. One Page. Structure: Summary, Skills, Experience, Education.";

pub const COVER_LETTER_SYSTEM: &str = "Cover Letter. Short. Professional. No placeholders.";

/// JSON mode is also requested on the wire, but the model ignores it often enough
/// that the output still goes through `parse_json_array`.
pub const INTERVIEW_SYSTEM: &str =
    "Output JSON Array ONLY: [{\"question\":\"...\",\"answer\":\"...\"}]. Max 3 items.";

pub const MARKET_INSIGHTS_SYSTEM: &str =
    "Career Analyst. Markdown. Max 50 words. Bullet points.";

pub fn resume_prompt(profile: &UserProfile) -> String {
    format!(
        "Resume for {}. Skills: {}. Edu: {}.",
        profile.target_role, profile.skills, profile.education
    )
}

pub fn cover_letter_prompt(profile: &UserProfile, job_description: &str) -> String {
    format!(
        "Role: {}. Job: {}. User: {}.",
        profile.target_role, job_description, profile.full_name
    )
}

pub fn interview_prompt(profile: &UserProfile) -> String {
    format!("Interview questions for {}.", profile.target_role)
}

pub fn market_insights_prompt(profile: &UserProfile) -> String {
    format!(
        "Job market for {} in {}.",
        profile.target_role, profile.target_region
    )
}
