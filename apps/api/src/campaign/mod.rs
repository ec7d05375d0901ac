// Campaign planning: keyword generation, PPC plans, and SEO review.
// All model calls go through llm_client::CompletionModel.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod response_parser;
