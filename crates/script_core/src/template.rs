//! Canned script catalog and the topic substitution that fills it.
//!
//! The catalog is static data; [`generate`] is a pure function over it. The
//! seeded hook/CTA variant lives in [`generate_seeded`] and is opt-in only.

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{domain::Platform, protocol::GeneratedScript};
use tracing::warn;

pub const CATALOG_VERSION: u32 = 1;
pub const TOPIC_PLACEHOLDER: &str = "{topic}";
pub const DEFAULT_SEEDED_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub platform: Platform,
    pub body_pattern: &'static str,
}

const fn template(platform: Platform, body_pattern: &'static str) -> Template {
    Template {
        platform,
        body_pattern,
    }
}

static TIKTOK: [Template; 4] = [
    template(
        Platform::Tiktok,
        "Hook: Struggling with {topic}? Here's 3 secrets nobody tells you!",
    ),
    template(
        Platform::Tiktok,
        "Problem: Most people get {topic} wrong because they focus on the wrong things",
    ),
    template(
        Platform::Tiktok,
        "Solution: Try this simple method that takes just 5 minutes a day",
    ),
    template(
        Platform::Tiktok,
        "CTA: Like for part 2 where I reveal the advanced techniques! #{topic} #tips",
    ),
];

static YOUTUBE: [Template; 5] = [
    template(
        Platform::Youtube,
        "Intro: Today we're diving deep into {topic}. If you want to master this, stay till the end!",
    ),
    template(
        Platform::Youtube,
        "Key Point 1: The foundation of good {topic} starts with proper planning",
    ),
    template(
        Platform::Youtube,
        "Key Point 2: Avoid these 3 common mistakes that beginners make",
    ),
    template(
        Platform::Youtube,
        "Key Point 3: Advanced techniques that will take your {topic} to the next level",
    ),
    template(
        Platform::Youtube,
        "Outro: If you found this helpful, subscribe for more content on {topic}!",
    ),
];

static INSTAGRAM: [Template; 5] = [
    template(
        Platform::Instagram,
        "Caption: Your daily dose of {topic} wisdom! ✨",
    ),
    template(
        Platform::Instagram,
        "Tip 1: Quality over quantity always wins with {topic}",
    ),
    template(
        Platform::Instagram,
        "Tip 2: Consistency is more important than perfection",
    ),
    template(
        Platform::Instagram,
        "Tip 3: Track your progress to stay motivated",
    ),
    template(
        Platform::Instagram,
        "Hashtags: #{topic} #motivation #selfimprovement",
    ),
];

const HOOKS: [&str; 5] = [
    "Stop making this mistake!",
    "This changed everything for me...",
    "You won't believe what happened next!",
    "The secret nobody tells you about...",
    "3 simple steps to...",
];

const CTAS: [&str; 5] = [
    "Follow for more tips!",
    "Save this for later!",
    "Try this and tag me!",
    "Comment your results below!",
    "Share with someone who needs this!",
];

pub fn catalog(platform: Platform) -> &'static [Template] {
    match platform {
        Platform::Tiktok => &TIKTOK,
        Platform::Youtube => &YOUTUBE,
        Platform::Instagram => &INSTAGRAM,
    }
}

/// Maps a free-form platform name onto the catalog. Unknown names use the
/// default (TikTok) list rather than failing.
pub fn resolve_platform(name: &str) -> Platform {
    Platform::from_name(name).unwrap_or_else(|| {
        warn!(
            requested = name,
            fallback = %Platform::default(),
            "template: unknown platform, using default catalog"
        );
        Platform::default()
    })
}

/// Fills every catalog entry for `platform` with `topic`, in catalog order.
///
/// The topic is inserted verbatim: no trimming, escaping or case changes.
/// Callers validate that it is non-empty.
pub fn generate(topic: &str, platform: Platform) -> Vec<GeneratedScript> {
    catalog(platform)
        .iter()
        .enumerate()
        .map(|(index, template)| {
            script(
                topic,
                platform,
                index,
                template.body_pattern.replace(TOPIC_PLACEHOLDER, topic),
            )
        })
        .collect()
}

/// Hook/CTA variant. Hook and call-to-action are drawn from a PRNG seeded with
/// `seed`, so identical inputs always yield identical scripts.
pub fn generate_seeded(
    topic: &str,
    platform: Platform,
    seed: u64,
    count: usize,
) -> Vec<GeneratedScript> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|index| {
            let hook = HOOKS[rng.random_range(0..HOOKS.len())];
            let cta = CTAS[rng.random_range(0..CTAS.len())];
            script(topic, platform, index, hook_cta_body(topic, platform, hook, cta))
        })
        .collect()
}

fn hook_cta_body(topic: &str, platform: Platform, hook: &str, cta: &str) -> String {
    let name = platform.as_str();
    let upper = name.to_ascii_uppercase();
    let tag = compact_hashtag(topic);
    format!(
        "📱 {upper} SCRIPT\n\
         \n\
         🎯 HOOK (0-3s): {hook}\n\
         \n\
         🎵 SOUND: Use trending \"{name} sound\" with 1M+ uses\n\
         \n\
         📝 TEXT OVERLAYS:\n\
         1. First point about {topic}\n\
         2. Second important tip\n\
         3. The game-changer\n\
         \n\
         👀 VISUAL: Show before/after or demonstration\n\
         \n\
         📢 CTA: {cta}\n\
         \n\
         🔥 HASHTAGS: #{tag} #{name} #viral #fyp"
    )
}

/// Topic with all whitespace removed, for use after a `#`.
pub fn compact_hashtag(topic: &str) -> String {
    topic.chars().filter(|c| !c.is_whitespace()).collect()
}

fn script(topic: &str, platform: Platform, index: usize, body: String) -> GeneratedScript {
    let ordinal = index + 1;
    GeneratedScript {
        ordinal,
        title: format!("{topic} - Script {ordinal}"),
        body,
        platform,
    }
}

#[cfg(test)]
#[path = "tests/template_tests.rs"]
mod tests;
