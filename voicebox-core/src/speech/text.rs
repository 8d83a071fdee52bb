use super::types::TextType;

const SPEAK_OPEN: &str = "<speak>";
const SPEAK_CLOSE: &str = "</speak>";

/// Prepare request text for the provider.
///
/// SSML requests always end up as a single `<speak>` document, so callers may
/// hand in either plain sentences or ready-made markup. Plain text requests are
/// passed through untouched. Content is not escaped, which keeps inline SSML
/// fragments such as `<break/>` working.
pub fn normalize_text(text: &str, text_type: TextType) -> String {
    match text_type {
        TextType::Ssml if !is_speak_document(text) => format!("{SPEAK_OPEN}{text}{SPEAK_CLOSE}"),
        _ => text.to_string(),
    }
}

fn is_speak_document(text: &str) -> bool {
    let trimmed = text.trim();
    let opens = trimmed.starts_with(SPEAK_OPEN)
        || trimmed
            .strip_prefix("<speak")
            .is_some_and(|rest| rest.starts_with(char::is_whitespace));
    opens && trimmed.ends_with(SPEAK_CLOSE)
}
