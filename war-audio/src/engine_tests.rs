use super::*;
use std::f32::consts::TAU;
use war_core::{NoteId, Pitch};

const RATE: u32 = 44_100;

fn note(start: u64, duration: u64) -> Note {
    Note {
        id: NoteId(1),
        start_frames: start,
        duration_frames: duration,
        pitch: Pitch(69),
        layer: 0,
        gain: 1.0,
        attack: 0.001,
        sustain: 1.0,
        release: 0.001,
        phase_increment: TAU * 440.0 / RATE as f32,
    }
}

fn wait_until_stopped(engine: &AudioEngine) {
    loop {
        let (state, _) = engine.status().unwrap();
        if state == TransportState::Stopped {
            return;
        }
    }
}

#[test]
fn fresh_engine_reports_stopped_at_zero() {
    let engine = AudioEngine::spawn_with_period(RATE, 256, Box::new(BufferSink::new()));
    assert_eq!(engine.status().unwrap(), (TransportState::Stopped, 0));
    engine.shutdown().unwrap();
}

#[test]
fn playback_runs_to_the_end_of_material() {
    let sink = BufferSink::new();
    let buffer = sink.buffer();
    let engine = AudioEngine::spawn_with_period(RATE, 256, Box::new(sink));

    engine.set_notes(vec![note(0, 2000)]).unwrap();
    engine.transport(TransportRequest::PlayFrom(0)).unwrap();
    wait_until_stopped(&engine);
    engine.shutdown().unwrap();

    // Whole periods until the play head passed 2000 frames.
    let samples = buffer.lock();
    assert_eq!(samples.len(), 2048 * CHANNEL_COUNT);
    assert!(samples.iter().any(|&s| s != 0.0));
}

#[test]
fn seek_moves_the_play_head_without_playing() {
    let engine = AudioEngine::spawn_with_period(RATE, 256, Box::new(BufferSink::new()));
    engine.transport(TransportRequest::Seek(4321)).unwrap();
    assert_eq!(engine.status().unwrap(), (TransportState::Stopped, 4321));
    engine.shutdown().unwrap();
}

#[test]
fn pause_holds_the_play_head() {
    let sink = BufferSink::new();
    let engine = AudioEngine::spawn_with_period(RATE, 256, Box::new(sink));
    // A long note keeps playback from reaching end of material right away.
    engine.set_notes(vec![note(0, 10_000_000)]).unwrap();
    engine.transport(TransportRequest::PlayFrom(0)).unwrap();
    engine.transport(TransportRequest::Pause).unwrap();
    let (state, frames) = engine.status().unwrap();
    assert_eq!(state, TransportState::Paused);
    let (_, frames_later) = engine.status().unwrap();
    assert_eq!(frames, frames_later);
    engine.shutdown().unwrap();
}

#[test]
fn play_gain_zero_mixes_silence() {
    let sink = BufferSink::new();
    let buffer = sink.buffer();
    let engine = AudioEngine::spawn_with_period(RATE, 256, Box::new(sink));
    engine.set_notes(vec![note(0, 1000)]).unwrap();
    engine.send(AudioCmd::SetPlayGain(0.0)).unwrap();
    engine.transport(TransportRequest::PlayFrom(0)).unwrap();
    wait_until_stopped(&engine);
    engine.shutdown().unwrap();
    assert!(buffer.lock().iter().all(|&s| s == 0.0));
}

#[test]
fn wav_sink_writes_the_render_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("render.wav");
    let engine = AudioEngine::spawn_with_period(
        RATE,
        256,
        Box::new(WavSink::new(path.clone(), RATE)),
    );
    engine.set_notes(vec![note(0, 1000)]).unwrap();
    engine.transport(TransportRequest::PlayFrom(0)).unwrap();
    wait_until_stopped(&engine);
    engine.shutdown().unwrap();

    let (spec, samples) = crate::wav::read_wav(&path).unwrap();
    assert_eq!(spec.sample_rate, RATE);
    assert_eq!(spec.channels, CHANNEL_COUNT as u16);
    assert_eq!(samples.len() % CHANNEL_COUNT, 0);
    assert!(samples.iter().any(|&s| s != 0.0));
}
