//! Campaign generator: prompt → model → parsed result for each campaign task.
//!
//! Stateless: the keyword list a user is working with is passed in by the
//! caller on every call and returned to it, never held here.

use tracing::{info, warn};

use crate::campaign::prompts::{build_prompt, system_prompt, PromptInput};
use crate::campaign::response_parser::{parse_keyword_records, KeywordRecord, ParseFailure};
use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::site::page::SeoPage;

/// A PPC plan is built from exactly this many keywords.
pub const PPC_KEYWORD_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedKeywords {
    pub records: Vec<KeywordRecord>,
    /// Non-fatal problems, e.g. records dropped under `allow_partial`.
    pub warnings: Vec<String>,
}

impl GeneratedKeywords {
    pub fn keywords(&self) -> Vec<String> {
        self.records.iter().map(|r| r.keyword.clone()).collect()
    }
}

/// Asks the model for grouped paid-search keywords for a business.
///
/// With `allow_partial`, records missing a field are dropped with a warning
/// instead of failing the whole response. Extraction and decode failures
/// always fail.
pub async fn generate_keywords(
    model: &dyn CompletionModel,
    business_description: &str,
    allow_partial: bool,
) -> Result<GeneratedKeywords, AppError> {
    let input = PromptInput::KeywordGeneration {
        business_description,
    };
    let raw = model
        .complete(&build_prompt(&input), system_prompt(input.kind()))
        .await?;

    match parse_keyword_records(&raw) {
        Ok(records) => {
            info!("Generated {} keyword records", records.len());
            Ok(GeneratedKeywords {
                records,
                warnings: vec![],
            })
        }
        Err(ParseFailure::Schema {
            first_index,
            field,
            rejected,
            accepted,
        }) if allow_partial => {
            let warning = format!(
                "Dropped {rejected} record(s) missing a required field (first: record {first_index}, \"{field}\")"
            );
            warn!("{warning}");
            Ok(GeneratedKeywords {
                records: accepted,
                warnings: vec![warning],
            })
        }
        Err(failure) => Err(failure.into()),
    }
}

/// A generated plan and the trimmed keywords it was written for.
#[derive(Debug, Clone, PartialEq)]
pub struct PpcPlan {
    pub keywords: Vec<String>,
    pub plan: String,
}

/// Writes a small-budget PPC plan for exactly `PPC_KEYWORD_COUNT` keywords.
pub async fn generate_ppc_plan(
    model: &dyn CompletionModel,
    keywords: &[String],
) -> Result<PpcPlan, AppError> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.trim().to_string()).collect();
    if keywords.len() != PPC_KEYWORD_COUNT || keywords.iter().any(|k| k.is_empty()) {
        return Err(AppError::Validation(format!(
            "Please enter all {PPC_KEYWORD_COUNT} keywords before submitting."
        )));
    }

    let plan = {
        let input = PromptInput::PpcPlan {
            keywords: &keywords,
        };
        model
            .complete(&build_prompt(&input), system_prompt(input.kind()))
            .await?
    };
    Ok(PpcPlan { keywords, plan })
}

/// Reviews a page's on-page SEO against the keywords the business cares about.
pub async fn analyze_seo(
    model: &dyn CompletionModel,
    page: &SeoPage,
    keywords: &[String],
) -> Result<String, AppError> {
    let input = PromptInput::SeoAnalysis { page, keywords };
    let analysis = model
        .complete(&build_prompt(&input), system_prompt(input.kind()))
        .await?;
    Ok(analysis)
}
