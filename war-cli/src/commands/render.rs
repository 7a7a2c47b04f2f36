//! Offline render to WAV

use anyhow::{bail, Context, Result};
use std::path::Path;
use war_audio::{render, write_wav, SampleFormat, WavSpec, Waveform};
use war_config::Config;
use war_core::LayerMask;
use war_roll::Project;

pub fn run(
    config: &Config,
    project_path: &Path,
    output: &Path,
    bpm: Option<f64>,
    waveform: &str,
    float: bool,
) -> Result<()> {
    let project = Project::load(project_path)
        .with_context(|| format!("loading {}", project_path.display()))?;
    let mut grid = project.grid;
    if let Some(bpm) = bpm {
        if bpm <= 0.0 {
            bail!("bpm must be positive, got {bpm}");
        }
        grid.bpm = bpm;
    }

    let waveform = parse_waveform(waveform)?;
    let mask = LayerMask::all(u32::from(project.layer_count));
    let notes: Vec<_> = project
        .notes
        .iter()
        .filter(|(n, c)| !c.muted && mask.contains(n.layer))
        .map(|(n, _)| *n)
        .collect();
    if notes.is_empty() {
        bail!("{} has no audible notes", project_path.display());
    }

    let samples = render(notes, &grid, waveform, config.engine.default_gain);
    let spec = WavSpec {
        channels: war_audio::CHANNEL_COUNT as u16,
        sample_rate: grid.sample_rate,
        format: if float {
            SampleFormat::Float32
        } else {
            SampleFormat::Pcm16
        },
    };
    write_wav(output, spec, &samples).with_context(|| format!("writing {}", output.display()))?;

    let seconds = samples.len() as f64 / war_audio::CHANNEL_COUNT as f64 / grid.sample_rate as f64;
    println!("Rendered {:.2}s to {}", seconds, output.display());
    Ok(())
}

fn parse_waveform(name: &str) -> Result<Waveform> {
    Ok(match name {
        "sine" => Waveform::Sine,
        "saw" => Waveform::Saw,
        "square" => Waveform::Square,
        "triangle" => Waveform::Triangle,
        "noise" => Waveform::Noise,
        other => bail!("unknown waveform {other:?}"),
    })
}
