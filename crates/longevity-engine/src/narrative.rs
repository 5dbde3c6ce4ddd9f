//! Seam to the narrative-generation collaborator (a third-party language
//! model). The engine hands it a JSON payload of raw inputs plus computed
//! results and consumes prose back. Anything categorical in the response is
//! untrusted: the metabolic category it proposes is re-derived from counts
//! and rewritten on disagreement before the response is used.

use crate::scoring::metabolic::{enforce_category, GradeCounts};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativePayload {
    pub inputs: Value,
    pub computed: Value,
}

/// A collaborator response: either free text or a schema-shaped object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NarrativeOutput {
    Text(String),
    Structured(Value),
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative collaborator failed: {0}")]
    Collaborator(String),
    #[error("narrative response did not match the expected schema: {0}")]
    Schema(String),
}

pub trait NarrativeGenerator {
    fn generate(&self, payload: &NarrativePayload) -> Result<NarrativeOutput, NarrativeError>;
}

/// Outcome of reconciling a structured collaborator response against the
/// authoritative rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledNarrative {
    pub output: NarrativeOutput,
    /// Audit notes for every categorical field that was corrected.
    pub corrections: Vec<String>,
}

/// Rewrite any `metabolic_category` the collaborator proposed so the prose
/// ships with the category the engine derived, never the model's guess.
pub fn reconcile(output: NarrativeOutput, counts: &GradeCounts) -> ReconciledNarrative {
    match output {
        NarrativeOutput::Text(text) => ReconciledNarrative {
            output: NarrativeOutput::Text(text),
            corrections: Vec::new(),
        },
        NarrativeOutput::Structured(mut value) => {
            let mut corrections = Vec::new();
            if let Some(candidate) = value
                .get("metabolic_category")
                .and_then(Value::as_str)
                .map(str::to_owned)
            {
                let (category, note) = enforce_category(Some(&candidate), counts);
                if let Some(note) = note {
                    debug!(candidate, "rewriting collaborator metabolic category");
                    value["metabolic_category"] = Value::String(category.label().to_string());
                    corrections.push(note);
                }
            }
            ReconciledNarrative {
                output: NarrativeOutput::Structured(value),
                corrections,
            }
        }
    }
}
