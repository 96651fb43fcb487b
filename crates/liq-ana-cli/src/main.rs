use clap::{Parser, Subcommand, ValueEnum};
use liq_ana_cli::{
    col_token::{col_token, resolve_token_id},
    constant::DEFAULT_CFG_DIR,
    force_close::{analyze_liquidated_list, force_close},
};
use liq_ana_core::{config::AnalysisConfig, error::AnalysisError, SortOrder};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: LiqAnaCommands,
}

pub trait Execute {
    fn execute(&self) -> std::result::Result<(), AnalysisError>;
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}

#[derive(Subcommand)]
pub enum LiqAnaCommands {
    /// Accounts whose borrowed sum exceeds their collateral sum, by borrowed sum.
    ForceClose {
        /// keep the first N accounts; 0 or a negative value keeps all
        #[arg(allow_negative_numbers = true)]
        top_n: Option<i64>,
        #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
        order: OrderArg,
        #[arg(short, long, default_value = DEFAULT_CFG_DIR)]
        cfg_path: String, // path to config dir
    },
    /// Accounts holding the given collateral token, by adjusted borrowed sum.
    ColToken {
        /// exactly one token id; anything else prints the usage hint
        #[arg(num_args = 0..)]
        token_ids: Vec<String>,
        #[arg(short, long, default_value = DEFAULT_CFG_DIR)]
        cfg_path: String,
    },
    /// Force-close selection on `liquidated_list.json` in the working directory.
    AnalyzeLiquidatedList {
        #[arg(allow_negative_numbers = true)]
        top_n: Option<i64>,
        #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
        order: OrderArg,
        #[arg(short, long, default_value = DEFAULT_CFG_DIR)]
        cfg_path: String,
    },
}

impl Execute for LiqAnaCommands {
    fn execute(&self) -> std::result::Result<(), AnalysisError> {
        match self {
            LiqAnaCommands::ForceClose { top_n, order, cfg_path } => {
                let cfg = AnalysisConfig::try_load(cfg_path)?;
                force_close(cfg, (*order).into(), *top_n)
            }

            LiqAnaCommands::ColToken { token_ids, cfg_path } => match resolve_token_id(token_ids) {
                Some(token_id) => {
                    let cfg = AnalysisConfig::try_load(cfg_path)?;
                    col_token(cfg, token_id)
                }
                None => Ok(()),
            },

            LiqAnaCommands::AnalyzeLiquidatedList { top_n, order, cfg_path } => {
                let cfg = AnalysisConfig::try_load(cfg_path)?;
                analyze_liquidated_list(cfg, (*order).into(), *top_n)
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.command.execute() {
        eprintln!("Execution result: {}", e);
        std::process::exit(1);
    }
}
