// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt that enforces a bare JSON list as the whole answer.
pub const JSON_LIST_ONLY_SYSTEM: &str = "You are a precise, structured assistant \
    for paid search marketing. \
    You MUST respond with a valid JSON list only. \
    Do NOT include any text before or after the JSON list. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
