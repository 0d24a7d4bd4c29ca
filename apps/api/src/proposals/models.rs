//! Request, response and pipeline value types for proposal generation.

use serde::{Deserialize, Serialize};

/// Which prompt and parsing contract a request uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateMode {
    /// Rewrite the three fixed templates for the project.
    #[default]
    Fixed,
    /// Have the model originate three proposals from an outline.
    Freeform,
}

impl TemplateMode {
    /// `"default"` selects the fixed templates; any other value selects freeform.
    pub fn from_template_type(template_type: &str) -> Self {
        if template_type == "default" {
            TemplateMode::Fixed
        } else {
            TemplateMode::Freeform
        }
    }
}

/// Client name and project label pulled from the raw description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContext {
    pub client_name: String,
    pub project_type: String,
}

/// One generated proposal, ready to send to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proposal {
    /// 1-based position in the response.
    pub id: u32,
    pub title: String,
    pub content: String,
}

/// Body of `POST /api/generate-proposals`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateProposalsRequest {
    #[serde(default)]
    pub project_description: Option<String>,
    #[serde(default)]
    pub template_type: Option<String>,
}

impl GenerateProposalsRequest {
    pub const DEFAULT_TEMPLATE_TYPE: &'static str = "default";

    pub fn template_type(&self) -> &str {
        self.template_type
            .as_deref()
            .unwrap_or(Self::DEFAULT_TEMPLATE_TYPE)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateProposalsResponse {
    pub success: bool,
    pub proposals: Vec<Proposal>,
    pub message: String,
}
