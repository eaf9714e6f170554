use std::collections::HashMap;

use crate::trends::{Period, TrendingItem};

pub const COMMENTARY_MAX_TOKENS: u32 = 2000;
pub const SUMMARY_MAX_CHARS: usize = 3000;

const ITEM_DESCRIPTION_CHARS: usize = 1500;
const ITEM_COMMENT_COUNT: usize = 3;

/// Map a config language code to the language name used in prompts
pub fn ai_language(code: &str) -> &'static str {
    match code {
        "zh" => "Chinese",
        _ => "English",
    }
}

pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

fn period_name(period: Period) -> &'static str {
    match period {
        Period::Daily => "today's",
        Period::Weekly => "this week's",
        Period::Monthly => "this month's",
    }
}

/// One prompt covering every item; the response carries one
/// `[ITEM_ID]: commentary` line per item.
pub fn build_commentary_prompt(items: &[TrendingItem], period: Period, language: &str) -> String {
    let mut prompt = format!(
        "Below are {} trending Product Hunt products. For EACH product, write a \
2-3 sentence commentary in {language} covering what it does, what makes it stand out, \
and who it is for.\n\
Format your response EXACTLY as follows, one product per line:\n\
[PRODUCT_ID]: commentary text here\n\n",
        period_name(period)
    );

    for item in items {
        let description = truncate_chars(&item.description, ITEM_DESCRIPTION_CHARS);
        prompt.push_str(&format!(
            "---PRODUCT [{}]: {}---\nTagline: {}\nDescription: {}\nTopics: {}\nVotes: {}\n",
            item.id,
            item.name,
            item.tagline,
            description,
            item.topics.join(", "),
            item.votes_count
        ));

        if !item.comments.is_empty() {
            prompt.push_str("User comments:\n");
            for (i, comment) in item.comments.iter().take(ITEM_COMMENT_COUNT).enumerate() {
                let author = if comment.author.trim().is_empty() {
                    "Anonymous"
                } else {
                    comment.author.trim()
                };
                prompt.push_str(&format!("  {}. {}: {}\n", i + 1, author, comment.body.trim()));
            }
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "Now provide the commentary in {language} using the format [PRODUCT_ID]: commentary\n"
    ));
    prompt
}

/// Prompt for the overall period trend summary
pub fn build_summary_prompt(items: &[TrendingItem], period: Period, language: &str) -> String {
    let mut prompt = format!(
        "You are a professional product analyst. Based on {} trending Product Hunt \
products below, write a concise trend summary in {language}: the overall direction, \
the dominant categories, and the 2-3 products most worth attention. \
Keep it under 500 characters, suitable for a Telegram channel.\n\n",
        period_name(period)
    );

    for (i, item) in items.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} — {} ({} votes)\n",
            i + 1,
            item.name,
            item.tagline,
            item.votes_count
        ));
    }

    prompt
}

/// Parse `[ITEM_ID]: text` lines out of a backend response. Lines that do
/// not match the format are ignored; items the response skipped simply
/// have no commentary.
pub fn parse_commentary(response: &str) -> HashMap<String, String> {
    let mut commentary = HashMap::new();

    for line in response.lines() {
        let line = line.trim();
        if !line.starts_with('[') {
            continue;
        }
        if let Some(end_bracket) = line.find("]:") {
            let id = &line[1..end_bracket];
            let text = line[end_bracket + 2..].trim();
            if !id.is_empty() && !text.is_empty() {
                commentary.insert(id.to_string(), text.to_string());
            }
        }
    }

    commentary
}
