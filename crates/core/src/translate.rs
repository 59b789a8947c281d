//! Bundled English→Japanese phrase table for hint and explanation text.
//!
//! Question prompts quote English fragments between full-width corner
//! brackets (`「…」`). When a quoted fragment has a bundled translation it
//! is appended to the hint/explanation being displayed; unknown fragments
//! contribute nothing.

/// The fixed phrase table shipped with the question bank.
static TRANSLATIONS: &[(&str, &str)] = &[
    ("You are happy.", "あなたは幸せです。"),
    ("Am I a student?", "私は学生ですか？"),
    ("I am busy.", "私は忙しいです。"),
    ("Are you tired?", "あなたは疲れていますか？"),
    ("I'm", "私は〜です"),
    ("You're", "あなたは〜です"),
    ("You are not a teacher.", "あなたは教師ではありません。"),
    ("I am not sleepy.", "私は眠くありません。"),
    ("Are you hungry?", "あなたはお腹が空いていますか？"),
    ("I am a tennis player.", "私はテニス選手です。"),
    ("You are in the classroom.", "あなたは教室にいます。"),
    ("Am I late?", "私は遅れていますか？"),
    ("He is busy.", "彼は忙しいです。"),
    ("Is she tired?", "彼女は疲れていますか？"),
    ("She is a student.", "彼女は学生です。"),
    ("He's", "彼は〜です"),
    ("She isn't", "彼女は〜ではありません"),
    ("Is he your brother?", "彼はあなたの兄弟ですか？"),
    ("It is a cat.", "それは猫です。"),
    ("He is a soccer player.", "彼はサッカー選手です。"),
    ("That is not my book.", "それは私の本ではありません。"),
    ("Is she a good singer?", "彼女は歌が上手いですか？"),
];

const OPEN: char = '「';
const CLOSE: char = '」';

fn lookup(phrase: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(english, _)| *english == phrase)
        .map(|(_, japanese)| *japanese)
}

/// Fragments quoted between `「` and `」`, in order of appearance.
fn quoted_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len_utf8()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };
        fragments.push(&after_open[..close]);
        rest = &after_open[close + CLOSE.len_utf8()..];
    }
    fragments
}

/// Append bundled translations for every quoted fragment of `question_text`
/// to `base_text`.
///
/// Pure and deterministic: fragments append in the order they appear in the
/// question, fragments without a table entry are ignored, and `base_text`
/// is returned untouched when nothing matches.
#[must_use]
pub fn annotate(base_text: &str, question_text: &str) -> String {
    let mut result = base_text.to_string();
    for fragment in quoted_fragments(question_text) {
        if let Some(translation) = lookup(fragment) {
            result.push_str("\n\n📝 ");
            result.push_str(fragment);
            result.push_str("\n→ ");
            result.push_str(translation);
        }
    }
    result
}
