//! WAV file codec
//!
//! Minimal RIFF/fmt/data reader and writer, little-endian via `byteorder`.
//! Two sample formats: 16-bit PCM (capture files) and 32-bit float
//! (playback renders). Unknown chunks are skipped on read.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::debug;
use war_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Pcm16,
    Float32,
}

impl SampleFormat {
    fn audio_format(&self) -> u16 {
        match self {
            SampleFormat::Pcm16 => 1,
            SampleFormat::Float32 => 3,
        }
    }

    fn bits_per_sample(&self) -> u16 {
        match self {
            SampleFormat::Pcm16 => 16,
            SampleFormat::Float32 => 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub channels: u16,
    pub sample_rate: u32,
    pub format: SampleFormat,
}

pub fn write_wav(path: &Path, spec: WavSpec, samples: &[f32]) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_wav_to(&mut w, spec, samples)?;
    w.flush()?;
    debug!(path = %path.display(), samples = samples.len(), "wav written");
    Ok(())
}

pub fn write_wav_to<W: Write>(w: &mut W, spec: WavSpec, samples: &[f32]) -> Result<()> {
    let bytes_per_sample = u32::from(spec.format.bits_per_sample() / 8);
    let data_len = samples.len() as u32 * bytes_per_sample;
    let byte_rate = spec.sample_rate * u32::from(spec.channels) * bytes_per_sample;
    let block_align = spec.channels * spec.format.bits_per_sample() / 8;

    w.write_all(b"RIFF")?;
    w.write_u32::<LittleEndian>(36 + data_len)?;
    w.write_all(b"WAVE")?;

    w.write_all(b"fmt ")?;
    w.write_u32::<LittleEndian>(16)?;
    w.write_u16::<LittleEndian>(spec.format.audio_format())?;
    w.write_u16::<LittleEndian>(spec.channels)?;
    w.write_u32::<LittleEndian>(spec.sample_rate)?;
    w.write_u32::<LittleEndian>(byte_rate)?;
    w.write_u16::<LittleEndian>(block_align)?;
    w.write_u16::<LittleEndian>(spec.format.bits_per_sample())?;

    w.write_all(b"data")?;
    w.write_u32::<LittleEndian>(data_len)?;
    match spec.format {
        SampleFormat::Pcm16 => {
            for &s in samples {
                let clamped = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                w.write_i16::<LittleEndian>(clamped)?;
            }
        }
        SampleFormat::Float32 => {
            for &s in samples {
                w.write_f32::<LittleEndian>(s)?;
            }
        }
    }
    Ok(())
}

pub fn read_wav(path: &Path) -> Result<(WavSpec, Vec<f32>)> {
    let file = File::open(path)?;
    let mut r = BufReader::new(file);
    read_wav_from(&mut r)
}

pub fn read_wav_from<R: Read + Seek>(r: &mut R) -> Result<(WavSpec, Vec<f32>)> {
    let mut id = [0u8; 4];
    r.read_exact(&mut id)?;
    if &id != b"RIFF" {
        return Err(Error::Wav("missing RIFF header".into()));
    }
    let _riff_len = r.read_u32::<LittleEndian>()?;
    r.read_exact(&mut id)?;
    if &id != b"WAVE" {
        return Err(Error::Wav("not a WAVE file".into()));
    }

    let mut spec: Option<WavSpec> = None;
    loop {
        if r.read_exact(&mut id).is_err() {
            return Err(Error::Wav("no data chunk".into()));
        }
        let len = r.read_u32::<LittleEndian>()?;
        match &id {
            b"fmt " => {
                if len < 16 {
                    return Err(Error::Wav(format!("fmt chunk too short: {len}")));
                }
                let audio_format = r.read_u16::<LittleEndian>()?;
                let channels = r.read_u16::<LittleEndian>()?;
                let sample_rate = r.read_u32::<LittleEndian>()?;
                let _byte_rate = r.read_u32::<LittleEndian>()?;
                let _block_align = r.read_u16::<LittleEndian>()?;
                let bits = r.read_u16::<LittleEndian>()?;
                let format = match (audio_format, bits) {
                    (1, 16) => SampleFormat::Pcm16,
                    (3, 32) => SampleFormat::Float32,
                    other => {
                        return Err(Error::Wav(format!("unsupported format {other:?}")));
                    }
                };
                if len > 16 {
                    r.seek(SeekFrom::Current(i64::from(len) - 16))?;
                }
                spec = Some(WavSpec {
                    channels,
                    sample_rate,
                    format,
                });
            }
            b"data" => {
                let spec = spec.ok_or_else(|| Error::Wav("data before fmt".into()))?;
                let bytes_per_sample = u32::from(spec.format.bits_per_sample() / 8);
                let count = (len / bytes_per_sample) as usize;
                let mut samples = Vec::with_capacity(count);
                match spec.format {
                    SampleFormat::Pcm16 => {
                        for _ in 0..count {
                            let s = r.read_i16::<LittleEndian>()?;
                            samples.push(f32::from(s) / i16::MAX as f32);
                        }
                    }
                    SampleFormat::Float32 => {
                        for _ in 0..count {
                            samples.push(r.read_f32::<LittleEndian>()?);
                        }
                    }
                }
                return Ok((spec, samples));
            }
            _ => {
                // Skip unknown chunks (word-aligned).
                let skip = i64::from(len) + i64::from(len % 2);
                r.seek(SeekFrom::Current(skip))?;
            }
        }
    }
}
