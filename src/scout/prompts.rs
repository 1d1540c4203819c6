//! Prompts sent to the search-grounded model.
//!
//! The digest prompt is assembled from [`DIGEST_CATEGORIES`] so the category
//! list, its guidance, and the example output stay in one place.

/// A fixed news category scanned by the digest variant.
#[derive(Debug, Clone)]
pub struct DigestCategory {
    /// Category label; the model is asked to echo it in the `category` field.
    pub name: &'static str,
    /// What counts as a signal for this category.
    pub guidance: &'static str,
}

/// The five categories of the daily digest, in output order.
pub static DIGEST_CATEGORIES: &[DigestCategory] = &[
    DigestCategory {
        name: "Automated Driving Tech",
        guidance: "Technical L4/L5 milestones, sensor fusion, or AI architecture shifts. No stock fluff.",
    },
    DigestCategory {
        name: "Longevity Lab",
        guidance: "Human-centric research on healthspan/longevity. Focus on actionable protocols (nutrition, sleep, supplements) based on latest human studies.",
    },
    DigestCategory {
        name: "Finance & Business",
        guidance: "Top trending startup/business ideas OR significant macro stock market shifts with a brief analysis of the 'why'.",
    },
    DigestCategory {
        name: "AI & Robotics",
        guidance: "Breakthroughs in model behavior (LLMs) or robotics features (human-robot interaction, dexterity, deployment).",
    },
    DigestCategory {
        name: "Global Progress",
        guidance: "High-impact 'good news' regarding climate, poverty, or geopolitical de-escalation.",
    },
];

/// Prompt for the single-headline variant.
pub const HEADLINE_PROMPT: &str = r#"
Perform a deep-scan of the web for the last 24 hours and identify the single most impactful headline across technology, science, business, and world affairs.
Provide a 'headline', 'url', and a 'reason' (summary of why it matters).

Prefer primary sources over aggregators. No stock fluff, no celebrity news.

Return the result ONLY as a JSON object. Example format:
{"headline": "...", "url": "...", "reason": "..."}
"#;

/// Builds the digest prompt from [`DIGEST_CATEGORIES`].
pub fn build_digest_prompt() -> String {
    let count = DIGEST_CATEGORIES.len();

    let mut prompt = format!(
        "\nPerform a deep-scan of the web for the last 24 hours and identify the single most \
         impactful headline for each of these {count} categories. \n\
         For each, provide a 'headline', 'url', and a 'reason' (summary of why it matters).\n\n\
         Categories & Logic:\n"
    );

    for (i, category) in DIGEST_CATEGORIES.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {}: {}\n",
            i + 1,
            category.name,
            category.guidance
        ));
    }

    prompt.push_str(&format!(
        "\nReturn the result ONLY as a JSON array of objects. Example format:\n[\n  \
         {{\"category\": \"{}\", \"headline\": \"...\", \"url\": \"...\", \"reason\": \"...\"}},\n  \
         ...\n]\n",
        DIGEST_CATEGORIES[0].name
    ));

    prompt
}
