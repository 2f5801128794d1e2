//! `hlsfetch resolve` – print the resolved segment URLs (dry run).

use anyhow::Result;
use hlsfetch_core::playlist;
use std::path::Path;

pub async fn run_resolve(base_url: &str, index: &Path, extra_args: &str) -> Result<()> {
    let text = playlist::read_index(index)?;
    let urls = playlist::resolve(base_url, &text, extra_args)?;
    if urls.is_empty() {
        println!("No segments in {}.", index.display());
        return Ok(());
    }
    for url in urls {
        println!("{}", url);
    }
    Ok(())
}
