//! Plain-text results report and the share payloads built from it.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::model::Outcome;

/// Title used by the share sheet and the mail subject.
pub const SHARE_TITLE: &str = "クイズの結果";

/// Render a finished session's outcomes into the shareable report.
///
/// Deterministic: the same outcomes always produce byte-identical text.
/// The same body feeds the share sheet, the clipboard, and the mail
/// composer.
#[must_use]
pub fn render_summary(score: u32, total: usize, outcomes: &[Outcome]) -> String {
    let mut summary = format!("クイズの結果: {score} / {total} 正解！\n\n");
    for (index, outcome) in outcomes.iter().enumerate() {
        let icon = if outcome.is_correct { "✅" } else { "❌" };
        summary.push_str(&format!(
            "{icon} 問題 {}: {}\n  あなたの回答: {}\n",
            index + 1,
            outcome.question,
            outcome.user_answer
        ));
        if !outcome.is_correct {
            summary.push_str(&format!("  正解: {}\n", outcome.correct_answer));
        }
        if outcome.hint_viewed {
            summary.push_str("  (ヒントを見ました)\n");
        }
        summary.push('\n');
    }
    summary
}

/// Payload for the native share sheet; the clipboard takes `body` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareContent {
    pub title: String,
    pub body: String,
}

impl ShareContent {
    #[must_use]
    pub fn for_results(score: u32, total: usize, outcomes: &[Outcome]) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            body: render_summary(score, total, outcomes),
        }
    }

    /// `mailto:` link prefilled with the report as subject and body.
    #[must_use]
    pub fn mailto_link(&self) -> String {
        format!(
            "mailto:?subject={}&body={}",
            encode_component(&self.title),
            encode_component(&self.body)
        )
    }
}

/// Percent-encode a mailto query component (everything non-alphanumeric).
fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}
