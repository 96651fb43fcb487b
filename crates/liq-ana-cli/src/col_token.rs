use std::path::Path;

use liq_ana_core::{
    account::Account,
    analysis::filter_by_collateral_token,
    config::AnalysisConfig,
    error::AnalysisError,
    file_manager::{load_accounts, save_accounts, FileManager, JsonFileManager, SaveOptions},
};
use liq_ana_tracing::{init_tracing, TraceConfig};

use super::constant::MISSING_TOKEN_ID_MSG;

/// The token id when exactly one positional argument was given. Otherwise the usage hint is
/// printed and `None` returned, so the caller can stop before touching config or files.
pub fn resolve_token_id(args: &[String]) -> Option<&str> {
    match args {
        [token_id] => Some(token_id.as_str()),
        _ => {
            println!("{}", MISSING_TOKEN_ID_MSG);
            None
        }
    }
}

pub fn analyze_col_token<M: FileManager>(
    file_manager: &M,
    source: &Path,
    target: &Path,
    token_id: &str,
) -> Result<Vec<Account>, AnalysisError> {
    let accounts = load_accounts(file_manager, source)?;
    let target_list = filter_by_collateral_token(&accounts, token_id)?;
    tracing::info!(
        "{} accounts out of {} hold collateral {}",
        target_list.len(),
        accounts.len(),
        token_id
    );
    save_accounts(file_manager, target, &target_list, SaveOptions::default())?;
    Ok(target_list)
}

/// Reads `liquidated_list.json` from the data dir, writes `ana_col_token.json` next to it.
pub fn col_token(cfg: AnalysisConfig, token_id: &str) -> Result<(), AnalysisError> {
    let trace_cfg: TraceConfig = cfg.log.try_into()?;
    let _g = init_tracing(trace_cfg);

    analyze_col_token(
        &JsonFileManager {},
        &cfg.storage.source_path(),
        &cfg.storage.col_token_path(),
        token_id,
    )?;
    Ok(())
}
