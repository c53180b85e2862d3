// Resume generation: upload validation, source text extraction and the
// LLM-backed generator. All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod source_text;
