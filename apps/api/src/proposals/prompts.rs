// All LLM prompt constants for proposal generation.
// Reuses the response-format fragment from llm_client::prompts.

use crate::llm_client::prompts::{response_format_instruction, RESPONSE_FORMAT_SLOT};
use crate::llm_client::ChatPrompt;
use crate::proposals::models::TemplateMode;
use crate::proposals::templates::FIXED_TEMPLATES;

/// Number of sections every prompt asks for.
pub const SECTION_COUNT: usize = 3;

/// Marker labels the model is told to emit. The parser splits on `<label> <n>:`.
pub const CUSTOMIZED_TEMPLATE_MARKER: &str = "CUSTOMIZED TEMPLATE";
pub const PROPOSAL_MARKER: &str = "PROPOSAL";

pub const CUSTOMIZE_TEMPERATURE: f32 = 0.7;
/// Higher than the customize pass so the three originals differ more.
pub const FREEFORM_TEMPERATURE: f32 = 0.8;

/// System prompt for rewriting the fixed templates.
pub const CUSTOMIZE_SYSTEM: &str = "You are an expert freelancer who creates compelling, \
    customized Upwork proposals. Always tailor your proposals to the specific project \
    requirements while maintaining professionalism and demonstrating relevant expertise.";

/// System prompt for originating freeform proposals.
pub const FREEFORM_SYSTEM: &str = "You are an expert freelancer who creates compelling \
    Upwork proposals. Always be professional, specific, and demonstrate clear understanding \
    of client needs.";

/// Template customization prompt.
/// Replace: {project_description}, {templates}, {response_format}
pub const CUSTOMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert freelancer on Upwork. I have 3 predefined proposal templates, and I need you to customize each one based on the specific project description provided.

Project Description:
{project_description}

Here are the 3 templates to customize:

{templates}

Please customize each template to specifically address the project description provided. Make the proposals more relevant, specific, and tailored to the client's actual needs. Keep the same structure and tone but adapt the content to match the project requirements.

{response_format}"#;

/// Freeform generation prompt.
/// Replace: {project_description}, {response_format}
pub const FREEFORM_PROMPT_TEMPLATE: &str = r#"You are an expert freelancer on Upwork. Based on the following project description, create 3 different proposal variations. Each proposal should be unique in approach, tone, and strategy while being professional and compelling.

Project Description:
{project_description}

Please generate 3 proposals with the following structure for each:
1. Opening statement (2-3 sentences)
2. Understanding of the project (2-3 sentences)
3. Your approach/methodology (3-4 sentences)
4. Relevant experience/examples (2-3 sentences)
5. Timeline and deliverables (2-3 sentences)
6. Closing statement (1-2 sentences)

Make each proposal different in:
- Tone (professional, friendly, confident, etc.)
- Approach (technical focus, creative focus, process focus, etc.)
- Experience highlighted (different relevant examples)
- Timeline (different delivery approaches)

{response_format}"#;

/// Builds the system/user prompt pair for a request.
///
/// The description is interpolated last so braces in user text are never re-expanded.
pub fn build_prompt(project_description: &str, mode: TemplateMode) -> ChatPrompt {
    match mode {
        TemplateMode::Fixed => ChatPrompt {
            system: CUSTOMIZE_SYSTEM,
            user: CUSTOMIZE_PROMPT_TEMPLATE
                .replace("{templates}", &render_fixed_templates())
                .replace(
                    RESPONSE_FORMAT_SLOT,
                    &response_format_instruction(
                        "Format your response as:",
                        CUSTOMIZED_TEMPLATE_MARKER,
                        SECTION_COUNT,
                    ),
                )
                .replace("{project_description}", project_description),
            temperature: CUSTOMIZE_TEMPERATURE,
        },
        TemplateMode::Freeform => ChatPrompt {
            system: FREEFORM_SYSTEM,
            user: FREEFORM_PROMPT_TEMPLATE
                .replace(
                    RESPONSE_FORMAT_SLOT,
                    &response_format_instruction(
                        "Format the response as:",
                        PROPOSAL_MARKER,
                        SECTION_COUNT,
                    ),
                )
                .replace("{project_description}", project_description),
            temperature: FREEFORM_TEMPERATURE,
        },
    }
}

/// Renders every fixed template as `<title>:` followed by its quoted body, placeholders intact.
fn render_fixed_templates() -> String {
    FIXED_TEMPLATES
        .iter()
        .map(|t| format!("{}:\n\"{}\"", t.title, t.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}
