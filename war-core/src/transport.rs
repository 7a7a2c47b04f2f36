//! Transport requests
//!
//! The editor never talks to the audio engine directly; commands that touch
//! playback produce one of these requests for the caller to forward.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportRequest {
    /// Toggle between playing and paused.
    TogglePlay,
    Play,
    /// Start playback at an absolute frame.
    PlayFrom(u64),
    Pause,
    Stop,
    Seek(u64),
}
