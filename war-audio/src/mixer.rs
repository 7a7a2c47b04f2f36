//! Summing voices into interleaved stereo

use tracing::debug;
use war_core::{Note, TimeGrid};

use crate::synth::{Voice, Waveform};
use crate::CHANNEL_COUNT;

/// Sums a fixed set of voices over consecutive frame ranges. The same
/// sample is written to both channels.
pub struct Mixer {
    voices: Vec<Voice>,
    sample_rate: u32,
    play_gain: f32,
}

impl Mixer {
    pub fn new(notes: Vec<Note>, waveform: Waveform, sample_rate: u32, play_gain: f32) -> Self {
        let voices = notes
            .into_iter()
            .map(|n| Voice::new(n, waveform))
            .collect::<Vec<_>>();
        debug!(voices = voices.len(), sample_rate, "mixer built");
        Self {
            voices,
            sample_rate,
            play_gain,
        }
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn set_play_gain(&mut self, gain: f32) {
        self.play_gain = gain.clamp(0.0, 1.0);
    }

    /// Frame past the end of the last note, i.e. the natural render length.
    pub fn end_frames(&self) -> u64 {
        self.voices.iter().map(Voice::end_frames).max().unwrap_or(0)
    }

    /// Mix `frames` frames starting at `start_frame` into `out`, which is
    /// cleared and resized to exactly `frames * CHANNEL_COUNT`.
    pub fn mix_into(&mut self, start_frame: u64, frames: usize, out: &mut Vec<f32>) {
        out.clear();
        out.resize(frames * CHANNEL_COUNT, 0.0);
        for i in 0..frames {
            let frame = start_frame + i as u64;
            let mut sum = 0.0f32;
            for voice in &mut self.voices {
                sum += voice.tick(frame, self.sample_rate);
            }
            let sample = sum * self.play_gain;
            out[i * CHANNEL_COUNT] = sample;
            out[i * CHANNEL_COUNT + 1] = sample;
        }
    }

    pub fn mix(&mut self, start_frame: u64, frames: usize) -> Vec<f32> {
        let mut out = Vec::new();
        self.mix_into(start_frame, frames, &mut out);
        out
    }
}

/// Offline render of a note list from frame zero through the end of the
/// last note, quantized up to whole columns of the grid.
pub fn render(notes: Vec<Note>, grid: &TimeGrid, waveform: Waveform, play_gain: f32) -> Vec<f32> {
    let mut mixer = Mixer::new(notes, waveform, grid.sample_rate, play_gain);
    let end = mixer.end_frames();
    let cols = (grid.frames_to_col(end)).ceil();
    let frames = grid.col_to_frames(cols).max(end);
    mixer.mix(0, frames as usize)
}

#[cfg(test)]
#[path = "mixer_tests.rs"]
mod tests;
