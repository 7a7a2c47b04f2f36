//! Waveform generators and the per-note voice

use std::f32::consts::{PI, TAU};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use war_core::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Waveform {
    #[default]
    Sine,
    Saw,
    Square,
    Triangle,
    Noise,
}

impl Waveform {
    /// Sample at a phase in `[0, 2π)`. Deterministic except for `Noise`.
    pub fn sample(&self, phase: f32, rng: &mut SmallRng) -> f32 {
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Saw => phase / PI - 1.0,
            Waveform::Square => {
                if phase < PI {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 2.0 / PI * phase.sin().asin(),
            Waveform::Noise => rng.gen_range(-1.0..=1.0),
        }
    }
}

/// Attack/sustain/release amplitude shaping inside the note duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Linear ramp-in, seconds.
    pub attack: f32,
    /// Level held between the ramps.
    pub sustain: f32,
    /// Linear ramp-out inside the tail of the duration, seconds.
    pub release: f32,
}

impl Envelope {
    pub fn from_note(note: &Note) -> Self {
        Self {
            attack: note.attack,
            sustain: note.sustain,
            release: note.release,
        }
    }

    /// Amplitude at `frame` of a note lasting `duration_frames`.
    pub fn level(&self, frame: u64, duration_frames: u64, sample_rate: u32) -> f32 {
        if frame >= duration_frames {
            return 0.0;
        }
        let rate = sample_rate as f32;
        let attack_frames = (self.attack * rate).max(1.0);
        let release_frames = (self.release * rate).max(1.0);
        let rise = (frame as f32 / attack_frames).min(1.0);
        let remaining = (duration_frames - frame) as f32;
        let fall = (remaining / release_frames).min(1.0);
        self.sustain * rise * fall
    }
}

/// One sounding note: a phase accumulator stepped by the note's
/// `phase_increment` and wrapped at 2π.
#[derive(Debug)]
pub struct Voice {
    note: Note,
    waveform: Waveform,
    envelope: Envelope,
    phase: f32,
    rng: SmallRng,
}

impl Voice {
    pub fn new(note: Note, waveform: Waveform) -> Self {
        Self {
            note,
            waveform,
            envelope: Envelope::from_note(&note),
            phase: 0.0,
            rng: SmallRng::seed_from_u64(note.id.0),
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn start_frames(&self) -> u64 {
        self.note.start_frames
    }

    pub fn end_frames(&self) -> u64 {
        self.note.start_frames + self.note.duration_frames
    }

    /// True when the note sounds at an absolute frame.
    pub fn active_at(&self, frame: u64) -> bool {
        frame >= self.start_frames() && frame < self.end_frames()
    }

    /// Next mono sample at an absolute frame. Advances the phase.
    pub fn tick(&mut self, frame: u64, sample_rate: u32) -> f32 {
        if !self.active_at(frame) {
            return 0.0;
        }
        let local = frame - self.note.start_frames;
        let level = self
            .envelope
            .level(local, self.note.duration_frames, sample_rate);
        let sample = self.waveform.sample(self.phase, &mut self.rng);
        self.phase += self.note.phase_increment;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        sample * level * self.note.gain
    }
}
