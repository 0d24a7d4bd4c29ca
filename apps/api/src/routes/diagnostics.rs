//! Deployment diagnostics. Reports whether the credential is visible to the process
//! without ever returning its value.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::API_KEY_VAR;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvDiagnostics {
    pub has_api_key: bool,
    pub environment: &'static str,
    pub api_key_length: usize,
    pub vercel: bool,
    pub vercel_url: String,
    /// Names only.
    pub all_api_env_vars: Vec<String>,
    pub openrouter_key_found: bool,
}

/// GET /api/test-env
pub async fn env_diagnostics_handler(State(state): State<AppState>) -> Json<EnvDiagnostics> {
    let api_key = state.credentials.api_key();

    Json(EnvDiagnostics {
        has_api_key: api_key.is_some(),
        environment: state.config.environment.as_str(),
        api_key_length: api_key.map(|k| k.len()).unwrap_or(0),
        vercel: std::env::var_os("VERCEL").is_some(),
        vercel_url: std::env::var("VERCEL_URL").unwrap_or_else(|_| "Not set".to_string()),
        all_api_env_vars: api_env_var_names(
            std::env::vars_os().map(|(k, _)| k.to_string_lossy().into_owned()),
        ),
        openrouter_key_found: std::env::var_os(API_KEY_VAR).is_some(),
    })
}

/// Sorted names of variables that look like API credentials.
fn api_env_var_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names
        .filter(|name| name.contains("API") || name.contains("KEY"))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_env_var_names_filters_and_sorts() {
        let names = vec![
            "PATH".to_string(),
            "OPENROUTER_API_KEY".to_string(),
            "HOME".to_string(),
            "AWS_ACCESS_KEY_ID".to_string(),
            "API_BASE".to_string(),
        ];
        assert_eq!(
            api_env_var_names(names.into_iter()),
            vec!["API_BASE", "AWS_ACCESS_KEY_ID", "OPENROUTER_API_KEY"]
        );
    }
}
