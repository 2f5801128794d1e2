//! `hlsfetch status` – show which segment slots are already on disk.

use anyhow::Result;
use hlsfetch_core::config::HlsfetchConfig;
use hlsfetch_core::resume::{slot_state, SlotState};
use hlsfetch_core::scheduler::{self, JobSpec};
use std::path::Path;

fn describe(state: SlotState) -> (&'static str, String) {
    match state {
        SlotState::Missing => ("missing", "-".to_string()),
        SlotState::Empty => ("empty", "0".to_string()),
        SlotState::Filled(len) => ("done", len.to_string()),
    }
}

pub async fn run_status(
    cfg: &HlsfetchConfig,
    base_url: &str,
    index: &Path,
    temp_folder: &Path,
) -> Result<()> {
    let mut job = JobSpec::new(base_url, "");
    job.index_path = index.to_path_buf();
    job.temp_dir = temp_folder.to_path_buf();
    let plan = scheduler::plan_job(&job)?;

    println!("{:<6} {:<8} {:<12} {}", "INDEX", "STATE", "SIZE", "URL");
    let mut filled = 0usize;
    for segment in &plan.segments {
        let state = slot_state(&segment.slot);
        if state.is_filled() {
            filled += 1;
        }
        let (label, size) = describe(state);
        println!("{:<6} {:<8} {:<12} {}", segment.index, label, size, segment.url);
    }
    println!(
        "{}/{} segments downloaded in {}",
        filled,
        plan.segments.len(),
        plan.temp_dir.display()
    );
    if plan.temp_dir.join(&cfg.manifest_name).exists() {
        println!("Concat list {} present.", cfg.manifest_name);
    }
    Ok(())
}
