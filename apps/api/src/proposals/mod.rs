// Proposal generation pipeline.
// extractor → prompts → llm_client → parser → assembler, wired together by generator.
// All LLM calls go through llm_client; no direct provider calls here.

pub mod assembler;
pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod templates;
