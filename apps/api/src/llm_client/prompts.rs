// Shared prompt fragments. Each module that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

/// Instruction appended to extraction prompts so the model does not pad
/// missing data with invented details.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Only use facts present in the source document. \
    Do NOT invent employers, dates, degrees or contact details. \
    If a required value is absent from the source, return an empty string for it.";
