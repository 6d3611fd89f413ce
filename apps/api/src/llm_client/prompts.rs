// Shared prompt fragments.
// Each artifact template lives in generation::prompts; this file holds the
// cross-cutting output rules every template embeds.

/// Output rules appended to every template.
/// The sanitizer enforces the same rules mechanically afterwards.
pub const PLAIN_TEXT_RULES: &str = "\
1. Output in plain text. Do NOT use any markdown formatting: no bold (**), no italics (*), no headers (#).
2. Do NOT use double dashes (--).";

/// Tone rule for prose artifacts (resume, cover letter).
pub const HUMAN_TONE_RULE: &str = "\
Write in a purely human, professional tone. Avoid robotic transitions and overused AI phrases.";
