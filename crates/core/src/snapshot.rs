use serde::{Deserialize, Serialize};

/// Who holds the turn (or won the game).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Human,
    Agent,
}

/// Difficulty levels accepted by the server's start endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn level(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Easy),
            2 => Some(Self::Medium),
            3 => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

/// A color answer for a pending wild-card choice. The type closes the
/// 4-letter set the server accepts; anything else is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Red,
    Green,
    Blue,
    Yellow,
}

impl ColorChoice {
    pub fn code(self) -> &'static str {
        match self {
            Self::Red => "r",
            Self::Green => "g",
            Self::Blue => "b",
            Self::Yellow => "y",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "r" => Some(Self::Red),
            "g" => Some(Self::Green),
            "b" => Some(Self::Blue),
            "y" => Some(Self::Yellow),
            _ => None,
        }
    }
}

/// One action the server currently permits the human to submit. The index
/// is only meaningful against the snapshot that carried it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalAction {
    pub action_index: u32,
    pub action_str: String,
}

/// Authoritative server state. Every response replaces the previous
/// snapshot wholesale; nothing is merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub player_hand: Vec<String>,
    pub agent_hand_size: usize,
    pub current_player: Seat,
    pub top_card: String,
    pub current_color: String,
    pub legal_actions: Vec<LegalAction>,
    #[serde(default)]
    pub discard_pile_top: Vec<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub agent_actions: Vec<String>,
    #[serde(default)]
    pub winner: Option<Seat>,
}
