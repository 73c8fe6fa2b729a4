// All LLM prompt constants for the two resume pipelines.
// Templates use {placeholder} markers replaced before sending.

/// System prompt for the analyze pipeline.
pub const CRITIQUE_SYSTEM: &str =
    "You are an expert resume reviewer with years of experience in HR and recruitment.";

/// Critique prompt template. Replace `{target_role}` and `{resume_text}`.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"Please analyze this resume and provide constructive feedback.
Focus on the following aspects:
1. Content clarity and impact
2. Skills presentation
3. Experience descriptions
4. Specific improvements for {target_role}

Resume content:
{resume_text}

Please provide your analysis in a clear, structured format with specific recommendations."#;

/// System prompt for the generate pipeline.
pub const REWRITE_SYSTEM: &str =
    "You are an expert resume writer with years of experience in HR and recruitment. \
    You rewrite resumes to be clear, impactful, and honest — never invent experience \
    that is not present in the original.";

/// Rewrite prompt template. Replace `{target_role}` and `{resume_text}`.
///
/// The output convention here is what the Document Formatter consumes: name on
/// the first line, contact lines next, `## ` sections, `### ` subsections,
/// `- ` bullets.
pub const REWRITE_PROMPT_TEMPLATE: &str = r####"Rewrite and improve the following resume, tailored for {target_role}.

Format the result as markdown following EXACTLY this structure:
- The first line is the candidate's full name, with no heading marker
- The next one or two lines are contact information (email, phone, links as plain text)
- Use "## " for section headers (Experience, Education, Skills, ...)
- Use "### " for job titles or degree names
- Use "- " for bullet points describing accomplishments
- Do NOT wrap the output in code fences
- Do NOT add commentary before or after the resume

Strengthen weak phrasing, quantify impact where the original supports it, and
keep every fact grounded in the original resume.

Original resume:
{resume_text}"####;

/// The role text substituted into both templates.
pub fn target_role(job_role: Option<&str>) -> &str {
    match job_role {
        Some(role) if !role.trim().is_empty() => role,
        _ => "general job applications",
    }
}

pub fn build_critique_prompt(resume_text: &str, job_role: Option<&str>) -> String {
    CRITIQUE_PROMPT_TEMPLATE
        .replace("{target_role}", target_role(job_role))
        .replace("{resume_text}", resume_text)
}

pub fn build_rewrite_prompt(resume_text: &str, job_role: Option<&str>) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{target_role}", target_role(job_role))
        .replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critique_prompt_substitutes_both_placeholders() {
        let prompt = build_critique_prompt("RESUME BODY", Some("Backend Engineer"));
        assert!(prompt.contains("Specific improvements for Backend Engineer"));
        assert!(prompt.contains("RESUME BODY"));
        assert!(!prompt.contains("{target_role}"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_missing_role_falls_back_to_general() {
        assert_eq!(target_role(None), "general job applications");
        assert_eq!(target_role(Some("   ")), "general job applications");
        assert_eq!(target_role(Some("SRE")), "SRE");
    }

    #[test]
    fn test_rewrite_prompt_describes_formatter_convention() {
        let prompt = build_rewrite_prompt("RESUME BODY", None);
        assert!(prompt.contains("Use \"## \" for section headers"));
        assert!(prompt.contains("Use \"### \" for job titles"));
        assert!(prompt.contains("Do NOT wrap the output in code fences"));
        assert!(prompt.contains("general job applications"));
        assert!(prompt.contains("RESUME BODY"));
    }
}
