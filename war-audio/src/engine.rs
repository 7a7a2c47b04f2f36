//! The audio engine thread
//!
//! One dedicated thread owns the mixer and transport and pumps period-sized
//! buffers into a [`Sink`]. Everything else talks to it through a
//! `crossbeam-channel` command inbox. The sink is the pacing point: a device
//! binding would block in `write` until the hardware consumed the period;
//! the sinks shipped here never block.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use war_core::{Error, Note, Result, TransportRequest};

use crate::mixer::Mixer;
use crate::synth::Waveform;
use crate::transport::{Transport, TransportState};
use crate::wav::{write_wav, SampleFormat, WavSpec};
use crate::{CHANNEL_COUNT, DEFAULT_PERIOD_FRAMES};

/// Where mixed audio leaves the engine.
pub trait Sink: Send {
    fn write(&mut self, interleaved: &[f32]) -> Result<()>;

    /// Called once when the engine shuts down.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects everything written into a shared buffer.
#[derive(Default)]
pub struct BufferSink {
    buffer: Arc<Mutex<Vec<f32>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> Arc<Mutex<Vec<f32>>> {
        Arc::clone(&self.buffer)
    }
}

impl Sink for BufferSink {
    fn write(&mut self, interleaved: &[f32]) -> Result<()> {
        self.buffer.lock().extend_from_slice(interleaved);
        Ok(())
    }
}

/// Accumulates the mix and writes a float32 WAV on shutdown.
pub struct WavSink {
    path: PathBuf,
    sample_rate: u32,
    samples: Vec<f32>,
}

impl WavSink {
    pub fn new(path: PathBuf, sample_rate: u32) -> Self {
        Self {
            path,
            sample_rate,
            samples: Vec::new(),
        }
    }
}

impl Sink for WavSink {
    fn write(&mut self, interleaved: &[f32]) -> Result<()> {
        self.samples.extend_from_slice(interleaved);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let spec = WavSpec {
            channels: CHANNEL_COUNT as u16,
            sample_rate: self.sample_rate,
            format: SampleFormat::Float32,
        };
        write_wav(&self.path, spec, &self.samples)?;
        info!(path = %self.path.display(), frames = self.samples.len() / CHANNEL_COUNT, "render finished");
        Ok(())
    }
}

pub enum AudioCmd {
    SetNotes(Vec<Note>),
    SetWaveform(Waveform),
    SetPlayGain(f32),
    Transport(TransportRequest),
    GetStatus(Sender<(TransportState, u64)>),
    Shutdown,
}

pub struct AudioEngine {
    tx: Sender<AudioCmd>,
    handle: Option<JoinHandle<Result<()>>>,
}

impl AudioEngine {
    pub fn spawn(sample_rate: u32, sink: Box<dyn Sink>) -> Self {
        Self::spawn_with_period(sample_rate, DEFAULT_PERIOD_FRAMES, sink)
    }

    pub fn spawn_with_period(sample_rate: u32, period: usize, sink: Box<dyn Sink>) -> Self {
        let (tx, rx) = unbounded();
        let handle = thread::Builder::new()
            .name("war-audio".into())
            .spawn(move || run(rx, sample_rate, period, sink))
            .ok();
        if handle.is_none() {
            warn!("audio thread failed to spawn");
        }
        Self { tx, handle }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<()> {
        self.tx
            .send(cmd)
            .map_err(|_| Error::Audio("engine thread is gone".into()))
    }

    pub fn set_notes(&self, notes: Vec<Note>) -> Result<()> {
        self.send(AudioCmd::SetNotes(notes))
    }

    pub fn transport(&self, req: TransportRequest) -> Result<()> {
        self.send(AudioCmd::Transport(req))
    }

    /// Synchronous status query: transport state and play head frame.
    pub fn status(&self) -> Result<(TransportState, u64)> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(AudioCmd::GetStatus(reply_tx))?;
        reply_rx
            .recv()
            .map_err(|_| Error::Audio("engine thread is gone".into()))
    }

    pub fn shutdown(mut self) -> Result<()> {
        self.shutdown_inner()
    }

    fn shutdown_inner(&mut self) -> Result<()> {
        let _ = self.tx.send(AudioCmd::Shutdown);
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| Error::Audio("engine thread panicked".into()))?,
            None => Ok(()),
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.shutdown_inner();
        }
    }
}

fn run(rx: Receiver<AudioCmd>, sample_rate: u32, period: usize, mut sink: Box<dyn Sink>) -> Result<()> {
    let mut transport = Transport::default();
    let mut mixer = Mixer::new(Vec::new(), Waveform::default(), sample_rate, 1.0);
    let mut notes: Vec<Note> = Vec::new();
    let mut waveform = Waveform::default();
    let mut play_gain = 1.0f32;
    let mut out = Vec::with_capacity(period * CHANNEL_COUNT);
    debug!(sample_rate, period, "audio engine up");

    loop {
        // Block while idle, poll while playing.
        let mut shutdown = false;
        let mut rebuild = false;
        if transport.is_playing() {
            loop {
                match rx.try_recv() {
                    Ok(cmd) => {
                        handle_cmd(
                            cmd, &mut transport, &mut notes, &mut waveform, &mut play_gain,
                            &mut rebuild, &mut shutdown,
                        );
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        shutdown = true;
                        break;
                    }
                }
            }
        } else {
            match rx.recv() {
                Ok(cmd) => handle_cmd(
                    cmd, &mut transport, &mut notes, &mut waveform, &mut play_gain,
                    &mut rebuild, &mut shutdown,
                ),
                Err(_) => shutdown = true,
            }
        }
        if shutdown {
            break;
        }
        if rebuild {
            mixer = Mixer::new(notes.clone(), waveform, sample_rate, play_gain);
        }
        mixer.set_play_gain(play_gain);

        if transport.is_playing() {
            mixer.mix_into(transport.play_head_frames, period, &mut out);
            sink.write(&out)?;
            transport.advance(period as u64);
            if transport.play_head_frames >= mixer.end_frames() {
                transport.handle(TransportRequest::Stop);
                debug!("end of material");
            }
        }
    }

    sink.finish()?;
    debug!("audio engine down");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_cmd(
    cmd: AudioCmd,
    transport: &mut Transport,
    notes: &mut Vec<Note>,
    waveform: &mut Waveform,
    play_gain: &mut f32,
    rebuild: &mut bool,
    shutdown: &mut bool,
) {
    match cmd {
        AudioCmd::SetNotes(new_notes) => {
            *notes = new_notes;
            *rebuild = true;
        }
        AudioCmd::SetWaveform(wf) => {
            *waveform = wf;
            *rebuild = true;
        }
        AudioCmd::SetPlayGain(gain) => *play_gain = gain.clamp(0.0, 1.0),
        AudioCmd::Transport(req) => transport.handle(req),
        AudioCmd::GetStatus(reply) => {
            let _ = reply.send((transport.state, transport.play_head_frames));
        }
        AudioCmd::Shutdown => *shutdown = true,
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
