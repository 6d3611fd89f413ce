//! Prompt construction — maps an artifact kind plus its inputs onto a filled template.

use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::prompts::{
    ATS_ANALYSIS_PROMPT_TEMPLATE, CAREER_INSIGHTS_PROMPT_TEMPLATE, COVER_LETTER_PROMPT_TEMPLATE,
    FINAL_ROUND_QUESTIONS_PROMPT_TEMPLATE, INTERVIEW_FEEDBACK_PROMPT_TEMPLATE,
    RESUME_PROMPT_TEMPLATE, SCREENING_QUESTIONS_PROMPT_TEMPLATE,
    TECHNICAL_QUESTIONS_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{HUMAN_TONE_RULE, PLAIN_TEXT_RULES};
use crate::models::artifact::ArtifactKind;

/// Everything a template may interpolate. Resume and job text are opaque.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptInputs {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    pub question: Option<String>,
    pub answer: Option<String>,
}

fn template_for(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Resume => RESUME_PROMPT_TEMPLATE,
        ArtifactKind::CoverLetter => COVER_LETTER_PROMPT_TEMPLATE,
        ArtifactKind::AtsAnalysis => ATS_ANALYSIS_PROMPT_TEMPLATE,
        ArtifactKind::ScreeningQuestions => SCREENING_QUESTIONS_PROMPT_TEMPLATE,
        ArtifactKind::TechnicalQuestions => TECHNICAL_QUESTIONS_PROMPT_TEMPLATE,
        ArtifactKind::FinalRoundQuestions => FINAL_ROUND_QUESTIONS_PROMPT_TEMPLATE,
        ArtifactKind::CareerInsights => CAREER_INSIGHTS_PROMPT_TEMPLATE,
        ArtifactKind::InterviewFeedback => INTERVIEW_FEEDBACK_PROMPT_TEMPLATE,
    }
}

/// Builds the prompt for `kind`, rejecting missing inputs before any provider call.
pub fn build_prompt(kind: ArtifactKind, inputs: &PromptInputs) -> Result<String, AppError> {
    require(&inputs.job_description, "Please provide a job description.")?;

    let (question, answer) = if kind == ArtifactKind::InterviewFeedback {
        let question = inputs.question.as_deref().unwrap_or_default();
        let answer = inputs.answer.as_deref().unwrap_or_default();
        require(question, "Please provide the interview question.")?;
        require(answer, "Please provide your answer to the question.")?;
        (question, answer)
    } else {
        require(&inputs.resume_text, "Please upload or paste a resume.")?;
        ("", "")
    };

    Ok(fill_template(
        template_for(kind),
        &[
            ("plain_text_rules", PLAIN_TEXT_RULES),
            ("human_tone_rule", HUMAN_TONE_RULE),
            ("job_description", inputs.job_description.trim()),
            ("resume_text", inputs.resume_text.trim()),
            ("question", question.trim()),
            ("answer", answer.trim()),
        ],
    ))
}

fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

/// Single-pass `{name}` substitution. Only placeholders in the template itself are
/// expanded, so braces inside user-supplied text are copied verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find_map(|(name, value)| {
            tail.strip_prefix(name)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
