//! Extractor: pulls a client name and a project-type label out of a raw project description.
//!
//! Both lookups are pure and total: when nothing matches they fall back to
//! `"Client"` / `"project"`.

use std::sync::OnceLock;

use regex::Regex;

use crate::proposals::models::ExtractedContext;

pub const DEFAULT_CLIENT_NAME: &str = "Client";
pub const DEFAULT_PROJECT_TYPE: &str = "project";

/// Name patterns in priority order. Keywords match in any case; the captured
/// name must start with an uppercase letter.
const CLIENT_NAME_PATTERNS: &[&str] = &[
    r"(?i:hi|hello|dear|hey)\s+([A-Z][a-z]+)",
    r"(?i:client)[:\s]+([A-Z][a-z]+)",
    r"(?i:name)[:\s]+([A-Z][a-z]+)",
];

/// Project-type rules, first match wins. Keywords are matched as substrings of the
/// lower-cased description.
///
/// Landing-page and WordPress rules sit ahead of the generic website rule so that
/// "WordPress ... site" and "landing page" descriptions keep their specific label.
const PROJECT_TYPE_RULES: &[(&[&str], &str)] = &[
    (&["landing page", "landing"], "landing page"),
    (&["wordpress", "wp"], "WordPress site"),
    (&["website", "web", "site"], "website"),
    (&["ssl", "certificate"], "SSL setup"),
    (&["google", "suite", "gmail"], "Google Suite setup"),
    (&["elementor", "page builder"], "Elementor page"),
    (&["design", "redesign"], "design project"),
    (&["ecommerce", "shop", "store"], "ecommerce site"),
];

fn client_name_regexes() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        CLIENT_NAME_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid client name regex"))
            .collect()
    })
}

/// Returns the first capture of the first matching name pattern, or `"Client"`.
pub fn extract_client_name(text: &str) -> String {
    client_name_regexes()
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string())
}

/// Returns the label of the first rule with a keyword contained in the description, or `"project"`.
pub fn extract_project_type(text: &str) -> String {
    let lower = text.to_lowercase();
    PROJECT_TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| DEFAULT_PROJECT_TYPE.to_string())
}

impl ExtractedContext {
    pub fn from_description(text: &str) -> Self {
        Self {
            client_name: extract_client_name(text),
            project_type: extract_project_type(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_captures_name() {
        assert_eq!(extract_client_name("Hi John, I need a new site"), "John");
        assert_eq!(extract_client_name("hello   Maria - quick job"), "Maria");
        assert_eq!(extract_client_name("DEAR Priya,"), "Priya");
    }

    #[test]
    fn test_no_pattern_falls_back_to_client() {
        assert_eq!(extract_client_name("no greeting here"), "Client");
        assert_eq!(extract_client_name(""), "Client");
    }

    #[test]
    fn test_captured_name_must_be_capitalized() {
        // Keyword matches but the following word is lowercase
        assert_eq!(extract_client_name("hey there, need help"), "Client");
    }

    #[test]
    fn test_client_label_pattern() {
        assert_eq!(extract_client_name("Client: Ahmed\nBudget: $200"), "Ahmed");
        assert_eq!(extract_client_name("posted by client Olga"), "Olga");
    }

    #[test]
    fn test_name_label_pattern() {
        assert_eq!(extract_client_name("Contact name: Tomas"), "Tomas");
    }

    #[test]
    fn test_greeting_has_priority_over_labels() {
        assert_eq!(
            extract_client_name("Client: Ahmed. Hi Beth, please read this"),
            "Beth"
        );
    }

    #[test]
    fn test_project_type_is_case_insensitive() {
        assert_eq!(extract_project_type("Need an SSL CERTIFICATE installed"), "SSL setup");
        assert_eq!(extract_project_type("set up GMAIL for my team"), "Google Suite setup");
    }

    #[test]
    fn test_wordpress_precedes_ecommerce() {
        assert_eq!(
            extract_project_type("I need a WordPress ecommerce site"),
            "WordPress site"
        );
    }

    #[test]
    fn test_landing_page_precedes_wordpress_and_design() {
        assert_eq!(
            extract_project_type("Hi Sarah, I need my WordPress landing page redesigned"),
            "landing page"
        );
    }

    #[test]
    fn test_generic_site_is_website() {
        assert_eq!(extract_project_type("Fix the layout of our website"), "website");
    }

    #[test]
    fn test_remaining_rules() {
        assert_eq!(extract_project_type("Build it with Elementor"), "Elementor page");
        assert_eq!(extract_project_type("Logo redesign needed"), "design project");
        assert_eq!(extract_project_type("Need an online shop"), "ecommerce site");
    }

    #[test]
    fn test_no_rule_falls_back_to_project() {
        assert_eq!(extract_project_type("Translate my novel into French"), "project");
    }

    #[test]
    fn test_context_from_description() {
        let ctx = ExtractedContext::from_description("Hello Dana, need an SSL cert");
        assert_eq!(ctx.client_name, "Dana");
        assert_eq!(ctx.project_type, "SSL setup");
    }
}
