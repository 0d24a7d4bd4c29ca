//! Proposal Assembler: turns parsed sections into titled `Proposal` records.

use tracing::warn;

use crate::errors::AppError;
use crate::proposals::models::{ExtractedContext, Proposal};
use crate::proposals::templates::{
    CLIENT_NAME_PLACEHOLDER, FIXED_TEMPLATES, PROJECT_TYPE_PLACEHOLDER, YOUR_NAME,
    YOUR_NAME_PLACEHOLDER,
};

/// Replaces every occurrence of each placeholder. Substituted values are inserted verbatim.
pub fn substitute_placeholders(body: &str, ctx: &ExtractedContext, your_name: &str) -> String {
    body.replace(CLIENT_NAME_PLACEHOLDER, &ctx.client_name)
        .replace(PROJECT_TYPE_PLACEHOLDER, &ctx.project_type)
        .replace(YOUR_NAME_PLACEHOLDER, your_name)
}

/// Pairs section `i` with fixed template `i` and fills its placeholders.
///
/// Requires one section per fixed template; a shortfall is a `ParseShape` error,
/// never a truncated list. Sections beyond the template count are ignored.
pub fn assemble_fixed(
    sections: &[String],
    ctx: &ExtractedContext,
) -> Result<Vec<Proposal>, AppError> {
    let expected = FIXED_TEMPLATES.len();
    if sections.len() < expected {
        return Err(AppError::ParseShape {
            expected,
            found: sections.len(),
        });
    }
    if sections.len() > expected {
        warn!(
            "Model returned {} customized templates, keeping the first {}",
            sections.len(),
            expected
        );
    }

    Ok(FIXED_TEMPLATES
        .iter()
        .zip(sections)
        .map(|(template, section)| Proposal {
            id: template.id,
            title: template.title.to_string(),
            content: substitute_placeholders(section, ctx, YOUR_NAME),
        })
        .collect())
}

/// Titles each section `Proposal <n>` in order. No substitution.
pub fn assemble_freeform(sections: Vec<String>) -> Vec<Proposal> {
    sections
        .into_iter()
        .zip(1u32..)
        .map(|(content, id)| Proposal {
            id,
            title: format!("Proposal {id}"),
            content,
        })
        .collect()
}
