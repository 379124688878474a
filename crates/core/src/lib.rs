//! Client-side state for the runo game. Keep this crate free of IO and
//! platform concerns: the transport comes in through [`GameBackend`] and the
//! clock is injected as `std::time::Instant` by callers.

pub mod anim;
pub mod backend;
pub mod cards;
pub mod gate;
pub mod narrate;
pub mod queue;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use anim::*;
pub use backend::*;
pub use cards::*;
pub use gate::*;
pub use narrate::*;
pub use queue::*;
pub use session::*;
pub use snapshot::*;
pub use timer::*;

use std::time::Duration;

/// How long a card played by the human stays in flight.
pub const HUMAN_PLAY_ANIMATION: Duration = Duration::from_millis(600);
/// How long a card played by the agent stays in flight.
pub const AGENT_PLAY_ANIMATION: Duration = Duration::from_millis(700);
/// Pause after an agent card lands before the next narration is presented.
pub const POST_ANIMATION_PAUSE: Duration = Duration::from_millis(500);
/// How long a no-animation narration (a draw) stays on screen before the
/// queue advances.
pub const NARRATION_READ_DELAY: Duration = Duration::from_millis(1000);
/// Lifetime of the transient action message before it fades.
pub const MESSAGE_FADE: Duration = Duration::from_millis(3000);
