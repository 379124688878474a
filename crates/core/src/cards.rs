use serde::{Deserialize, Serialize};

/// Wire sentinel for "draw from the deck instead of playing a card".
pub const DRAW_CARD_TOKEN: &str = "draw_card";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CardColor {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "r" => Some(Self::Red),
            "g" => Some(Self::Green),
            "b" => Some(Self::Blue),
            "y" => Some(Self::Yellow),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardRank {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl CardRank {
    fn from_trait(value: &str) -> Option<Self> {
        match value {
            "skip" => Some(Self::Skip),
            "reverse" => Some(Self::Reverse),
            "draw_2" => Some(Self::DrawTwo),
            "wild" => Some(Self::Wild),
            "wild_draw_4" => Some(Self::WildDrawFour),
            _ => value
                .parse::<u8>()
                .ok()
                .filter(|n| *n <= 9)
                .map(Self::Number),
        }
    }

    pub fn is_wild(self) -> bool {
        matches!(self, Self::Wild | Self::WildDrawFour)
    }

    pub fn label(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Skip => "Skip".to_string(),
            Self::Reverse => "Reverse".to_string(),
            Self::DrawTwo => "Draw 2".to_string(),
            Self::Wild => "Wild".to_string(),
            Self::WildDrawFour => "Wild Draw 4".to_string(),
        }
    }
}

/// Result of decoding an opaque card token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedCard {
    /// The `draw_card` sentinel: draw from the deck rather than play.
    Draw,
    /// A playable card. Wild ranks carry no display color.
    Card {
        color: Option<CardColor>,
        rank: CardRank,
    },
    /// Anything the grammar does not cover. Displayed as a placeholder,
    /// never an error.
    Unknown,
}

impl DecodedCard {
    pub fn display_text(&self) -> String {
        match self {
            Self::Draw => "Draw Card".to_string(),
            Self::Unknown => "Unknown Card".to_string(),
            Self::Card {
                color: Some(color),
                rank,
            } => format!("{} {}", color.name(), rank.label()),
            Self::Card { color: None, rank } => rank.label(),
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Self::Card { rank, .. } if rank.is_wild())
    }
}

/// Decode a card token (`r-5`, `g-skip`, `b-draw_2`, `r-wild`,
/// `wild_draw_4`, `draw_card`, ...). Total: every input decodes to
/// something displayable.
pub fn decode(token: &str) -> DecodedCard {
    if token == DRAW_CARD_TOKEN {
        return DecodedCard::Draw;
    }
    if let Some(rank) = CardRank::from_trait(token) {
        // Bare trait tokens: only the wild spellings arrive without a color.
        if rank.is_wild() {
            return DecodedCard::Card { color: None, rank };
        }
        return DecodedCard::Unknown;
    }
    let Some((code, trait_part)) = token.split_once('-') else {
        return DecodedCard::Unknown;
    };
    let Some(rank) = CardRank::from_trait(trait_part) else {
        return DecodedCard::Unknown;
    };
    if rank.is_wild() {
        return DecodedCard::Card { color: None, rank };
    }
    match CardColor::from_code(code) {
        Some(color) => DecodedCard::Card {
            color: Some(color),
            rank,
        },
        None => DecodedCard::Unknown,
    }
}

/// Whether a token names either wild variant, in any spelling the server
/// uses (`wild`, `wild_draw_4`, `r-wild`, ...).
pub fn is_wild_token(token: &str) -> bool {
    decode(token).is_wild()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_color_and_rank_tokens() {
        assert_eq!(decode("r-5").display_text(), "Red 5");
        assert_eq!(decode("g-skip").display_text(), "Green Skip");
        assert_eq!(decode("b-draw_2").display_text(), "Blue Draw 2");
        assert_eq!(decode("y-reverse").display_text(), "Yellow Reverse");
        assert_eq!(decode("b-0").display_text(), "Blue 0");
    }

    #[test]
    fn wild_ranks_suppress_the_color() {
        assert_eq!(decode("r-wild").display_text(), "Wild");
        assert_eq!(decode("g-wild_draw_4").display_text(), "Wild Draw 4");
        assert_eq!(decode("wild").display_text(), "Wild");
        assert_eq!(decode("wild_draw_4").display_text(), "Wild Draw 4");
    }

    #[test]
    fn draw_sentinel_has_its_own_display() {
        assert_eq!(decode(DRAW_CARD_TOKEN), DecodedCard::Draw);
        assert_eq!(decode(DRAW_CARD_TOKEN).display_text(), "Draw Card");
    }

    #[test]
    fn malformed_tokens_become_the_placeholder() {
        for token in ["", "r", "q-5", "r-10", "r-banana", "5", "skip"] {
            assert_eq!(decode(token), DecodedCard::Unknown, "token {token:?}");
            assert_eq!(decode(token).display_text(), "Unknown Card");
        }
    }

    #[test]
    fn sentinel_display_is_stable_across_invocations() {
        for _ in 0..3 {
            assert_eq!(decode("draw_card").display_text(), "Draw Card");
            assert_eq!(decode("wild").display_text(), "Wild");
            assert_eq!(decode("wild_draw_4").display_text(), "Wild Draw 4");
        }
    }

    #[test]
    fn wild_detection_covers_both_spellings() {
        assert!(is_wild_token("wild"));
        assert!(is_wild_token("r-wild_draw_4"));
        assert!(!is_wild_token("r-5"));
        assert!(!is_wild_token(DRAW_CARD_TOKEN));
    }
}
