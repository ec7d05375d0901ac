// All LLM prompt templates for campaign planning and SEO review.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde::{Deserialize, Serialize};

use crate::campaign::response_parser::{AD_GROUP_FIELD, KEYWORD_FIELD};
use crate::llm_client::prompts::JSON_LIST_ONLY_SYSTEM;
use crate::site::page::SeoPage;

/// The task a prompt is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    PpcPlan,
    KeywordGeneration,
    SeoAnalysis,
}

/// Structured inputs for each prompt kind.
#[derive(Debug, Clone)]
pub enum PromptInput<'a> {
    PpcPlan {
        keywords: &'a [String],
    },
    KeywordGeneration {
        business_description: &'a str,
    },
    SeoAnalysis {
        page: &'a SeoPage,
        keywords: &'a [String],
    },
}

impl PromptInput<'_> {
    pub fn kind(&self) -> PromptKind {
        match self {
            PromptInput::PpcPlan { .. } => PromptKind::PpcPlan,
            PromptInput::KeywordGeneration { .. } => PromptKind::KeywordGeneration,
            PromptInput::SeoAnalysis { .. } => PromptKind::SeoAnalysis,
        }
    }
}

/// System prompt paired with each prompt kind.
pub fn system_prompt(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::PpcPlan => PPC_PLAN_SYSTEM,
        PromptKind::KeywordGeneration => JSON_LIST_ONLY_SYSTEM,
        PromptKind::SeoAnalysis => SEO_ANALYSIS_SYSTEM,
    }
}

/// Builds the user prompt for `input`. Field values are embedded as given.
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    match input {
        PromptInput::PpcPlan { keywords } => build_ppc_plan_prompt(keywords),
        PromptInput::KeywordGeneration {
            business_description,
        } => build_keyword_generation_prompt(business_description),
        PromptInput::SeoAnalysis { page, keywords } => build_seo_analysis_prompt(page, keywords),
    }
}

pub const PPC_PLAN_SYSTEM: &str = "You are an expert PPC marketer who plans small-budget \
    Google Ads campaigns. Write clear, practical plans a small business owner can act on.";

pub const SEO_ANALYSIS_SYSTEM: &str = "You are an experienced SEO consultant. \
    Base every suggestion on the page content you are given and quote the exact text \
    you propose to change.";

/// PPC plan prompt. Replace: {keyword_count}, {keywords}
pub const PPC_PLAN_PROMPT_TEMPLATE: &str = "You are an expert PPC marketer tasked with creating a PPC plan using the following {keyword_count} keywords. \
The budget for this campaign is small, and all keywords will be managed within a single campaign to maximize efficiency. \
Provide a detailed plan that includes:
- Match type recommendations for balancing reach and cost control.
- Conversion types that align with the business goals.
- Business context to ensure the campaign targets the right audience and objectives.
- Example ad copy tailored to each keyword, designed to maximize engagement and drive conversions.
Keep the plan cost-effective, and focus on strategies to maximize ROI within a limited budget.

Keywords: {keywords}";

/// Keyword generation prompt. Replace: {keyword_field}, {ad_group_field}, {business_description}
///
/// The output-format lines are load-bearing: the response goes straight to
/// `parse_keyword_records`.
pub const KEYWORD_GENERATION_PROMPT_TEMPLATE: &str = r#"Generate a list of exactly 15 paid search keywords grouped into 3 ad groups based on the following business description. Each ad group should contain 5 keywords.

Return the response as a JSON-formatted list of dictionaries, where each dictionary has the following structure:
{"{keyword_field}": "Keyword 1", "{ad_group_field}": "Ad Group 1"}

Ensure that the only output is the JSON list of dictionaries with no additional text before or after.

BUSINESS DESCRIPTION:
{business_description}"#;

/// SEO analysis prompt.
/// Replace: {title}, {meta_description}, {meta_keywords}, {page_copy}, {keywords}
pub const SEO_ANALYSIS_PROMPT_TEMPLATE: &str = "Here is the SEO information and page copy from a webpage:

Title: {title}
Meta Description: {meta_description}
Meta Keywords: {meta_keywords}
Page Copy: {page_copy}

Based on this SEO information, please suggest possible improvements. \
Have one section that talks about overall SEO strategy. \
Below that, identify actual pieces of text that could be tweaked. \
Use the following context to guide your suggestions: {keywords}. \
This is an analysis from an initial look at the search query report from this website.";

pub fn build_ppc_plan_prompt(keywords: &[String]) -> String {
    let count = keywords.len().to_string();
    let joined = keywords.join(", ");
    fill_template(
        PPC_PLAN_PROMPT_TEMPLATE,
        &[("keyword_count", &count), ("keywords", &joined)],
    )
}

pub fn build_keyword_generation_prompt(business_description: &str) -> String {
    fill_template(
        KEYWORD_GENERATION_PROMPT_TEMPLATE,
        &[
            ("keyword_field", KEYWORD_FIELD),
            ("ad_group_field", AD_GROUP_FIELD),
            ("business_description", business_description),
        ],
    )
}

pub fn build_seo_analysis_prompt(page: &SeoPage, keywords: &[String]) -> String {
    let joined = keywords.join(", ");
    fill_template(
        SEO_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("title", &page.title),
            ("meta_description", &page.meta_description),
            ("meta_keywords", &page.meta_keywords),
            ("page_copy", &page.page_copy),
            ("keywords", &joined),
        ],
    )
}

/// Substitutes `{name}` placeholders in one pass over the template, so text
/// inserted from a value is never re-scanned for placeholders.
/// Unknown `{...}` sequences are copied through unchanged.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample_page() -> SeoPage {
        SeoPage {
            title: "Chelsea W Nutrition".to_string(),
            meta_description: "Registered dietitian in Seattle".to_string(),
            meta_keywords: "No meta keywords found".to_string(),
            page_copy: "Meal plans\n\nSports nutrition {not a placeholder}".to_string(),
        }
    }

    #[test]
    fn test_ppc_prompt_lists_every_keyword() {
        let kws = keywords(&["dietitian", "meal plans", "sports nutrition", "weight loss", "nutritionist near me"]);
        let prompt = build_ppc_plan_prompt(&kws);
        assert!(prompt.contains("using the following 5 keywords"));
        assert!(prompt.ends_with(
            "Keywords: dietitian, meal plans, sports nutrition, weight loss, nutritionist near me"
        ));
        assert!(prompt.contains("Match type recommendations"));
    }

    #[test]
    fn test_keyword_generation_prompt_carries_format_contract() {
        let prompt = build_keyword_generation_prompt("A sports psychologist in Boise, Idaho.");
        assert!(prompt.contains("JSON-formatted list of dictionaries"));
        assert!(prompt.contains(r#"{"Keyword": "Keyword 1", "Ad Group": "Ad Group 1"}"#));
        assert!(prompt.contains("no additional text before or after"));
        assert!(prompt.ends_with("A sports psychologist in Boise, Idaho."));
    }

    #[test]
    fn test_seo_prompt_embeds_page_fields_verbatim() {
        let page = sample_page();
        let prompt = build_seo_analysis_prompt(&page, &keywords(&["dietitian", "meal plans"]));
        assert!(prompt.contains("Title: Chelsea W Nutrition\n"));
        assert!(prompt.contains("Meta Description: Registered dietitian in Seattle\n"));
        assert!(prompt.contains("Meta Keywords: No meta keywords found\n"));
        assert!(prompt.contains("Page Copy: Meal plans\n\nSports nutrition {not a placeholder}"));
        assert!(prompt.contains("guide your suggestions: dietitian, meal plans."));
    }

    #[test]
    fn test_values_containing_placeholders_are_not_expanded() {
        let prompt = build_keyword_generation_prompt("We sell {business_description} mugs and {keyword_field}");
        assert!(prompt.ends_with("We sell {business_description} mugs and {keyword_field}"));
    }

    #[test]
    fn test_empty_fields_are_embedded_as_is() {
        let prompt = build_ppc_plan_prompt(&[]);
        assert!(prompt.contains("using the following 0 keywords"));
        assert!(prompt.ends_with("Keywords: "));
    }

    #[test]
    fn test_build_prompt_dispatches_by_kind() {
        let kws = keywords(&["seo"]);
        let page = sample_page();
        let inputs = [
            PromptInput::PpcPlan { keywords: &kws },
            PromptInput::KeywordGeneration {
                business_description: "bakery",
            },
            PromptInput::SeoAnalysis {
                page: &page,
                keywords: &kws,
            },
        ];
        assert_eq!(build_prompt(&inputs[0]), build_ppc_plan_prompt(&kws));
        assert_eq!(build_prompt(&inputs[1]), build_keyword_generation_prompt("bakery"));
        assert_eq!(build_prompt(&inputs[2]), build_seo_analysis_prompt(&page, &kws));
        assert_eq!(inputs[1].kind(), PromptKind::KeywordGeneration);
        assert_eq!(system_prompt(PromptKind::KeywordGeneration), JSON_LIST_ONLY_SYSTEM);
    }

    #[test]
    fn test_fill_template_handles_unmatched_braces() {
        assert_eq!(fill_template("a {x} b { c", &[("x", "1")]), "a 1 b { c");
        assert_eq!(fill_template("{unknown}", &[]), "{unknown}");
    }
}
