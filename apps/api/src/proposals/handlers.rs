//! Axum route handlers for the Proposal API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::proposals::generator::generate_proposals;
use crate::proposals::models::{GenerateProposalsRequest, GenerateProposalsResponse, TemplateMode};
use crate::state::AppState;

/// POST /api/generate-proposals
///
/// Generates three proposals for a project description. `templateType: "default"`
/// customizes the fixed templates; anything else asks for freeform proposals.
///
/// A body that is missing or not a valid request object carries no description, so it
/// is treated as an empty request and reported by the generator (500 without a key,
/// 400 otherwise).
pub async fn handle_generate_proposals(
    State(state): State<AppState>,
    body: Result<Json<GenerateProposalsRequest>, JsonRejection>,
) -> Result<Json<GenerateProposalsResponse>, AppError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable request body: {rejection}");
            GenerateProposalsRequest::default()
        }
    };
    let template_type = request.template_type();
    let mode = TemplateMode::from_template_type(template_type);

    let proposals = generate_proposals(
        state.completion.as_ref(),
        state.credentials.as_ref(),
        request.project_description.as_deref().unwrap_or_default(),
        mode,
    )
    .await?;

    Ok(Json(GenerateProposalsResponse {
        success: true,
        proposals,
        message: format!("Templates generated successfully using {template_type} mode!"),
    }))
}
