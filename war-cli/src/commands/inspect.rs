//! Project statistics

use anyhow::{Context, Result};
use std::path::Path;
use war_roll::Project;

pub fn run(project_path: &Path) -> Result<()> {
    let project = Project::load(project_path)
        .with_context(|| format!("loading {}", project_path.display()))?;

    println!("{}", project_path.display());
    println!("  bpm:     {}", project.grid.bpm);
    println!("  tuning:  {} Hz, {} EDO", project.tuning.base_frequency, project.tuning.edo);
    println!("  notes:   {}", project.notes.len());
    println!("  views:   {}", project.views.len());

    if project.notes.is_empty() {
        return Ok(());
    }

    let end = project
        .notes
        .iter()
        .map(|(n, _)| n.start_frames + n.duration_frames)
        .max()
        .unwrap_or(0);
    let seconds = end as f64 / project.grid.sample_rate as f64;
    println!("  length:  {seconds:.2}s");
    let pitches = project.notes.iter().map(|(n, _)| n.pitch);
    if let (Some(lowest), Some(highest)) = (pitches.clone().min(), pitches.max()) {
        println!("  pitches: {} to {}", lowest.0, highest.0);
    }

    let mut per_layer = vec![0usize; usize::from(project.layer_count)];
    let mut muted = 0usize;
    for (note, cell) in &project.notes {
        if let Some(count) = per_layer.get_mut(note.layer as usize) {
            *count += 1;
        }
        if cell.muted {
            muted += 1;
        }
    }
    for (layer, count) in per_layer.iter().enumerate() {
        if *count > 0 {
            println!("  layer {layer}: {count} notes");
        }
    }
    if muted > 0 {
        println!("  muted:   {muted}");
    }
    Ok(())
}
