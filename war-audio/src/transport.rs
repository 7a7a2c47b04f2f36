//! Playback transport state

use serde::{Deserialize, Serialize};
use tracing::debug;
use war_core::TransportRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Transport {
    pub state: TransportState,
    pub play_head_frames: u64,
}

impl Transport {
    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn handle(&mut self, req: TransportRequest) {
        match req {
            TransportRequest::TogglePlay => {
                self.state = match self.state {
                    TransportState::Playing => TransportState::Paused,
                    TransportState::Paused | TransportState::Stopped => TransportState::Playing,
                };
            }
            TransportRequest::Play => self.state = TransportState::Playing,
            TransportRequest::PlayFrom(frame) => {
                self.play_head_frames = frame;
                self.state = TransportState::Playing;
            }
            TransportRequest::Pause => {
                if self.state == TransportState::Playing {
                    self.state = TransportState::Paused;
                }
            }
            TransportRequest::Stop => {
                self.state = TransportState::Stopped;
                self.play_head_frames = 0;
            }
            TransportRequest::Seek(frame) => self.play_head_frames = frame,
        }
        debug!(state = ?self.state, frame = self.play_head_frames, "transport");
    }

    /// Advance the play head while playing.
    pub fn advance(&mut self, frames: u64) {
        if self.is_playing() {
            self.play_head_frames += frames;
        }
    }
}
