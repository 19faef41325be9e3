//! Quartet Speech - Text-to-Speech Client
//!
//! Speech synthesis for agent replies:
//! - `TtsBackend`: the synthesis trait (dependency-injected)
//! - `ElevenLabsBackend`: ElevenLabs API client
//! - `VoiceProfile`: per-role voice settings
//! - `MockTts`: test double with call counting
//!
//! Synthesis is always best-effort; a failure here must never abort the
//! caller's turn.

#![forbid(unsafe_code)]

pub mod backend;
pub mod elevenlabs;
pub mod error;
pub mod mock;
pub mod voice;

pub use backend::TtsBackend;
pub use elevenlabs::{ElevenLabsBackend, ElevenLabsConfig};
pub use error::{Error, Result};
pub use mock::MockTts;
pub use voice::VoiceProfile;
