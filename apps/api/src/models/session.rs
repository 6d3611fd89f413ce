use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::artifact::{ArtifactKind, GeneratedArtifact};

/// Per-browser working state: inputs plus the latest text of each artifact kind.
/// Lives in memory only; dropped on explicit end or after the idle TTL.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub resume_text: String,
    pub job_description: String,
    pub artifacts: HashMap<ArtifactKind, GeneratedArtifact>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            resume_text: String::new(),
            job_description: String::new(),
            artifacts: HashMap::new(),
            created_at: now,
            last_active: now,
        }
    }

    /// Overwrites the slot for `artifact.kind`.
    pub fn set_artifact(&mut self, artifact: GeneratedArtifact) {
        self.artifacts.insert(artifact.kind, artifact);
    }

    pub fn artifact_text(&self, kind: ArtifactKind) -> Option<&str> {
        self.artifacts.get(&kind).map(|a| a.text.as_str())
    }
}
