use anyhow::{bail, Context, Result};
use docsum_core::config::AppConfig;
use docsum_core::tables::AnalysisTables;
use docsum_core::{run_batch, scanner, Analyzer, BatchSummary};
use std::path::{Path, PathBuf};
use storage::OutputStore;
use tracing::info;

pub fn build_analyzer(cfg: &AppConfig) -> Result<Analyzer> {
    let tables = AnalysisTables::load_optional(cfg.tables.path.as_deref())
        .context("load analysis tables")?;
    Ok(Analyzer::new(cfg.summary.clone(), tables)?)
}

/// Scans `inputs` (or the configured include roots), analyzes every supported
/// document and appends the results to the store in `out_dir`.
pub fn process_inputs(cfg: &AppConfig, inputs: &[PathBuf], out_dir: &Path) -> Result<BatchSummary> {
    let roots: Vec<PathBuf> = if inputs.is_empty() {
        cfg.scan.include.iter().map(PathBuf::from).collect()
    } else {
        inputs.to_vec()
    };
    if roots.is_empty() {
        bail!("no input directories given and scan.include is empty");
    }

    let files = scanner::scan(&roots, &cfg.scan.exclude, cfg.scan.include_hidden)?;
    if files.is_empty() {
        bail!("no supported documents found in {:?}", roots);
    }
    info!("Discovered {} supported document(s).", files.len());

    let analyzer = build_analyzer(cfg)?;
    let mut store = OutputStore::open(out_dir)?.with_per_file_json(cfg.output.per_file_json);
    Ok(run_batch(&analyzer, &files, &mut store))
}
