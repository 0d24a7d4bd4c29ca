// Shared prompt fragments and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Placeholder the response-format block is interpolated into.
pub const RESPONSE_FORMAT_SLOT: &str = "{response_format}";

/// Renders the closing instruction telling the model how to delimit its sections,
/// e.g. `PROPOSAL 1:` / `[content]` repeated `sections` times.
///
/// The section parser splits on exactly these labels, so the wording of the label
/// must stay in sync with the parser's marker pattern.
pub fn response_format_instruction(lead_in: &str, marker_label: &str, sections: usize) -> String {
    let blocks = (1..=sections)
        .map(|n| format!("{marker_label} {n}:\n[content]"))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{lead_in}\n{blocks}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_format_lists_every_marker_in_order() {
        let block = response_format_instruction("Format the response as:", "PROPOSAL", 3);
        assert_eq!(
            block,
            "Format the response as:\nPROPOSAL 1:\n[content]\n\nPROPOSAL 2:\n[content]\n\nPROPOSAL 3:\n[content]"
        );
    }
}
