use crate::cards::{decode, DRAW_CARD_TOKEN};

/// Prefix the server puts on narrations describing an agent play.
pub const AGENT_PLAYED_PREFIX: &str = "Agent played: ";
/// Prefix the server puts on the human's own play confirmation.
pub const YOU_PLAYED_PREFIX: &str = "You played: ";

/// Render a raw `"prefix: token"` narration for display. Strings without
/// the `": "` delimiter pass through unchanged.
pub fn format_narration(raw: &str) -> String {
    match raw.split_once(": ") {
        Some((prefix, token)) => format!("{prefix}: {}", decode(token).display_text()),
        None => raw.to_string(),
    }
}

/// The turn-log projection of a narration: just the card name for
/// `"prefix: token"` lines, the raw string otherwise.
pub fn log_entry(raw: &str) -> String {
    match raw.split_once(": ") {
        Some((_, token)) => decode(token).display_text(),
        None => raw.to_string(),
    }
}

/// The token of the card an agent narration says was played, when that play
/// should be animated. Draws and non-play narrations return `None`.
pub fn played_card(raw: &str) -> Option<&str> {
    let token = raw.strip_prefix(AGENT_PLAYED_PREFIX)?;
    (token != DRAW_CARD_TOKEN).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_the_trailing_card_token() {
        assert_eq!(format_narration("Agent played: b-skip"), "Agent played: Blue Skip");
        assert_eq!(format_narration("You played: r-5"), "You played: Red 5");
        assert_eq!(format_narration("Agent drew: draw_card"), "Agent drew: Draw Card");
    }

    #[test]
    fn strings_without_a_delimiter_pass_through() {
        for raw in ["", "Your Turn", "Error during agent turn.", "a:b"] {
            assert_eq!(format_narration(raw), raw);
        }
    }

    #[test]
    fn splits_on_the_first_delimiter_only() {
        assert_eq!(
            format_narration("Agent played: note: b-skip"),
            "Agent played: Unknown Card"
        );
    }

    #[test]
    fn log_entries_keep_only_the_card_name() {
        assert_eq!(log_entry("Agent played: b-skip"), "Blue Skip");
        assert_eq!(log_entry("Agent played: draw_card"), "Draw Card");
        assert_eq!(log_entry("Error during agent turn."), "Error during agent turn.");
    }

    #[test]
    fn played_card_skips_draws_and_non_plays() {
        assert_eq!(played_card("Agent played: b-skip"), Some("b-skip"));
        assert_eq!(played_card("Agent played: draw_card"), None);
        assert_eq!(played_card("Agent drew: draw_card"), None);
        assert_eq!(played_card("You played: r-5"), None);
    }
}
