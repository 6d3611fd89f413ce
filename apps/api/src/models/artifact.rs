use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm_client::Provider;

/// Every kind of text the generator can produce. One session slot per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Resume,
    CoverLetter,
    AtsAnalysis,
    ScreeningQuestions,
    TechnicalQuestions,
    FinalRoundQuestions,
    CareerInsights,
    InterviewFeedback,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 8] = [
        ArtifactKind::Resume,
        ArtifactKind::CoverLetter,
        ArtifactKind::AtsAnalysis,
        ArtifactKind::ScreeningQuestions,
        ArtifactKind::TechnicalQuestions,
        ArtifactKind::FinalRoundQuestions,
        ArtifactKind::CareerInsights,
        ArtifactKind::InterviewFeedback,
    ];

    /// The path/serde name, e.g. `cover_letter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Resume => "resume",
            ArtifactKind::CoverLetter => "cover_letter",
            ArtifactKind::AtsAnalysis => "ats_analysis",
            ArtifactKind::ScreeningQuestions => "screening_questions",
            ArtifactKind::TechnicalQuestions => "technical_questions",
            ArtifactKind::FinalRoundQuestions => "final_round_questions",
            ArtifactKind::CareerInsights => "career_insights",
            ArtifactKind::InterviewFeedback => "interview_feedback",
        }
    }

    /// Download file name without extension.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ArtifactKind::Resume => "Optimized_Resume",
            ArtifactKind::CoverLetter => "Cover_Letter",
            ArtifactKind::AtsAnalysis => "ATS_Analysis",
            ArtifactKind::ScreeningQuestions => "Screening_Questions",
            ArtifactKind::TechnicalQuestions => "Technical_Questions",
            ArtifactKind::FinalRoundQuestions => "Final_Round_Questions",
            ArtifactKind::CareerInsights => "Career_Insights",
            ArtifactKind::InterviewFeedback => "Interview_Feedback",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtifactKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown artifact kind '{s}'"))
    }
}

/// Sanitized generation output, as returned to callers and kept in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub text: String,
    /// None once the user has edited the text by hand.
    pub provider: Option<Provider>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ArtifactKind::ALL {
            assert_eq!(kind.as_str().parse::<ArtifactKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_serde_matches_as_str() {
        let json = serde_json::to_string(&ArtifactKind::FinalRoundQuestions).unwrap();
        assert_eq!(json, r#""final_round_questions""#);
    }

    #[test]
    fn test_download_names_for_primary_documents() {
        assert_eq!(ArtifactKind::Resume.file_stem(), "Optimized_Resume");
        assert_eq!(ArtifactKind::CoverLetter.file_stem(), "Cover_Letter");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!("summary".parse::<ArtifactKind>().is_err());
    }
}
