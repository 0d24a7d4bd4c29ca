//! Proposal Generation: orchestrates the full pipeline for one request.
//!
//! Flow: credential check → validate description → extract context →
//!       build prompt → completion call → parse sections → assemble proposals.
//!
//! Any failing step short-circuits; a partial proposal list is never returned.

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::CredentialProvider;
use crate::errors::AppError;
use crate::llm_client::CompletionClient;
use crate::proposals::assembler::{assemble_fixed, assemble_freeform};
use crate::proposals::models::{ExtractedContext, Proposal, TemplateMode};
use crate::proposals::parser::{proposal_parser, template_parser};
use crate::proposals::prompts::build_prompt;

/// Runs the generation pipeline for one project description.
///
/// The credential is looked up on every call so keys injected after startup are picked
/// up. It is checked before the description, so a missing key reports a configuration
/// error even for an empty request.
pub async fn generate_proposals(
    completion: &dyn CompletionClient,
    credentials: &dyn CredentialProvider,
    project_description: &str,
    mode: TemplateMode,
) -> Result<Vec<Proposal>, AppError> {
    let request_id = Uuid::new_v4();

    let api_key = credentials.api_key().ok_or_else(|| {
        AppError::Configuration("OpenRouter API key not configured".to_string())
    })?;

    if project_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Project description is required".to_string(),
        ));
    }

    let ctx = ExtractedContext::from_description(project_description);
    info!(
        "[{request_id}] Generating {mode:?} proposals (client={}, project_type={})",
        ctx.client_name, ctx.project_type
    );

    let prompt = build_prompt(project_description, mode);
    let raw = completion.complete(&api_key, &prompt).await?;
    info!("[{request_id}] Completion received ({} chars)", raw.len());

    let proposals = match mode {
        TemplateMode::Fixed => {
            let (sections, used_fallback) = template_parser().parse(&raw);
            if used_fallback {
                warn!("[{request_id}] No template markers in response, using line chunking");
            }
            assemble_fixed(&sections, &ctx)?
        }
        TemplateMode::Freeform => {
            let (sections, used_fallback) = proposal_parser().parse(&raw);
            if used_fallback {
                warn!("[{request_id}] No proposal markers in response, using line chunking");
            }
            assemble_freeform(sections)
        }
    };

    info!("[{request_id}] Assembled {} proposals", proposals.len());
    Ok(proposals)
}
