//! Delivery cards, the plain-text export and the share link.

use chrono::{DateTime, SecondsFormat, Utc};
use shared::protocol::ScriptView;

use crate::{session::Session, template::compact_hashtag};

pub const EXPORT_TITLE: &str = "VIRAL SCRIPTS";
/// Line that introduces every script section in an export.
pub const EXPORT_DIVIDER: &str = "\n---\n";
pub const SHARE_INTENT_URL: &str = "https://twitter.com/intent/tweet";

pub fn render(session: &Session) -> Vec<ScriptView> {
    let hashtags = format!("#{} #viral #trending", compact_hashtag(session.topic()));
    session
        .scripts()
        .iter()
        .map(|script| ScriptView {
            ordinal: script.ordinal,
            heading: format!("Script {}", script.ordinal),
            title: script.title.clone(),
            body: script.body.clone(),
            trending_sound: format!("#{}Sound123", script.platform),
            hashtags: hashtags.clone(),
        })
        .collect()
}

/// Header block followed by one divider-introduced section per script.
/// Output depends only on the session and `exported_at`.
pub fn export(session: &Session, exported_at: DateTime<Utc>) -> String {
    let mut out = format!(
        "{EXPORT_TITLE}\nTopic: {}\nPlatform: {}\nExported: {}\nScripts: {}\n",
        session.topic(),
        session.platform(),
        exported_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        session.scripts().len(),
    );
    for script in session.scripts() {
        out.push_str(EXPORT_DIVIDER);
        out.push_str(&format!("SCRIPT {}\n{}\n", script.ordinal, script.body));
    }
    out
}

/// Recovers the script bodies from [`export`] output.
pub fn parse_export(text: &str) -> Vec<String> {
    text.split(EXPORT_DIVIDER)
        .skip(1)
        .map(|section| {
            let body = section.split_once('\n').map_or("", |(_, body)| body);
            body.strip_suffix('\n').unwrap_or(body).to_string()
        })
        .collect()
}

pub fn export_file_name(topic: &str, exported_at: DateTime<Utc>) -> String {
    let topic: String = topic
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("viral-scripts-{topic}-{}.txt", exported_at.timestamp_millis())
}

pub fn share_text(session: &Session) -> String {
    format!(
        "Just generated {} viral {} scripts about \"{}\" using @ViralScriptFactory!",
        session.scripts().len(),
        session.platform(),
        session.topic()
    )
}

pub fn share_link(session: &Session, page_url: &str) -> String {
    format!(
        "{SHARE_INTENT_URL}?text={}&url={}",
        urlencoding::encode(&share_text(session)),
        urlencoding::encode(page_url)
    )
}

#[cfg(test)]
#[path = "tests/delivery_tests.rs"]
mod tests;
