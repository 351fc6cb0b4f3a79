// Prompt constants for the screening assistant.
// Templates use `{placeholder}` markers replaced with `str::replace` before sending.

pub const SYSTEM_NAME: &str = "TalentScout Hiring Assistant";

/// System prompt shared by every call. Keeps the model on the hiring task.
pub const SYSTEM_PROMPT: &str = "You are TalentScout Hiring Assistant. \
    You assist with initial candidate screening for technology roles.\n\
    Follow rules:\n\
    - Stay on hiring context.\n\
    - Be concise and professional.\n\
    - Never provide answers to the technical questions yourself.\n\
    - If asked for topics outside hiring, refuse and redirect.";

pub const GREETING_INSTRUCTION: &str =
    "Greet the candidate and explain your purpose in two short sentences.";

/// Screening question prompt. Replace: {tech_csv}, {cap_total}
pub const QUESTION_JSON_PROMPT_TEMPLATE: &str = r#"Given a list of technologies: {tech_csv}
Return JSON mapping each technology to exactly 3 concise interview questions assessing practical skill.
Total questions across all techs must be <= {cap_total}.
Only return JSON. No commentary."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_assistant() {
        assert!(SYSTEM_PROMPT.starts_with(&format!("You are {SYSTEM_NAME}.")));
    }

    #[test]
    fn test_question_template_has_placeholders() {
        assert!(QUESTION_JSON_PROMPT_TEMPLATE.contains("{tech_csv}"));
        assert!(QUESTION_JSON_PROMPT_TEMPLATE.contains("{cap_total}"));
    }
}
