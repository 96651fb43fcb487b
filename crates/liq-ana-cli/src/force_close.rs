use std::path::{Path, PathBuf};

use liq_ana_core::{
    account::Account,
    analysis::filter_force_close,
    config::AnalysisConfig,
    error::AnalysisError,
    file_manager::{load_accounts, save_accounts, FileManager, JsonFileManager, SaveOptions},
    SortOrder,
};
use liq_ana_tracing::{init_tracing, TraceConfig};

/// Clamps the optional count argument to zero and up, announcing what will be kept.
pub fn resolve_top_n(top_n: Option<i64>) -> i64 {
    match top_n {
        None => 0,
        Some(n) => {
            let n = n.max(0);
            if n > 0 {
                println!("Display Top {} accounts", n);
            } else {
                println!("Display all accounts");
            }
            n
        }
    }
}

pub fn analyze_force_close<M: FileManager>(
    file_manager: &M,
    source: &Path,
    target: &Path,
    order: SortOrder,
    top_n: i64,
) -> Result<Vec<Account>, AnalysisError> {
    let accounts = load_accounts(file_manager, source)?;
    let force_close_list = filter_force_close(&accounts, order, top_n)?;
    tracing::info!(
        "{} accounts to force close out of {}, order {:?}, top {}",
        force_close_list.len(),
        accounts.len(),
        order,
        top_n
    );
    save_accounts(file_manager, target, &force_close_list, SaveOptions::default())?;
    Ok(force_close_list)
}

/// Reads `liquidated_list.json` from the data dir, writes `ana_force_close.json` next to it.
pub fn force_close(
    cfg: AnalysisConfig,
    order: SortOrder,
    top_n: Option<i64>,
) -> Result<(), AnalysisError> {
    let trace_cfg: TraceConfig = cfg.log.try_into()?;
    let _g = init_tracing(trace_cfg);

    let top_n = resolve_top_n(top_n);
    analyze_force_close(
        &JsonFileManager {},
        &cfg.storage.source_path(),
        &cfg.storage.force_close_path(),
        order,
        top_n,
    )?;
    Ok(())
}

/// Same selection as [`force_close`], but both files live in the working directory and the
/// output goes to `ForceClose_list.json`.
pub fn analyze_liquidated_list(
    cfg: AnalysisConfig,
    order: SortOrder,
    top_n: Option<i64>,
) -> Result<(), AnalysisError> {
    let trace_cfg: TraceConfig = cfg.log.try_into()?;
    let _g = init_tracing(trace_cfg);

    let top_n = resolve_top_n(top_n);
    analyze_force_close(
        &JsonFileManager {},
        &PathBuf::from(&cfg.storage.source_file),
        &PathBuf::from(&cfg.storage.legacy_file),
        order,
        top_n,
    )?;
    Ok(())
}
