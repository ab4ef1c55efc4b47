use anyhow::{Context, Result};
use gridboard::logging::init_tracing;
use gridboard::replay::ReplayScript;
use std::path::PathBuf;

fn main() -> Result<()> {
    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: gridboard-replay <script.json>")?;

    let script = ReplayScript::load(&path)
        .with_context(|| format!("failed to load replay script {}", path.display()))?;
    init_tracing(&script.settings.log_filter);

    let report = script.run().context("replay aborted")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
