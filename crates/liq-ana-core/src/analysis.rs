use std::cmp::Ordering;

use itertools::Itertools;
use tracing::debug;

use crate::{
    account::{Account, Amount},
    error::AnalysisError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    fn compare(&self, a: &Amount, b: &Amount) -> Ordering {
        let ord = a.compare(b);
        match self {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}

/// Accounts whose borrowed sum is strictly above their collateral sum, sorted by borrowed sum.
///
/// A positive `top_n` keeps only the first `top_n` entries after sorting, zero or a negative
/// value keeps all of them. The input slice is left untouched.
pub fn filter_force_close(
    accounts: &[Account],
    order: SortOrder,
    top_n: i64,
) -> Result<Vec<Account>, AnalysisError> {
    let mut keyed = vec![];
    for account in accounts {
        if account.is_force_close()? {
            keyed.push((account.borrowed_sum()?, account));
        }
    }
    debug!("{} of {} accounts to force close", keyed.len(), accounts.len());

    let sorted = sort_by_key(keyed, order);
    Ok(take_top_n(sorted, top_n))
}

/// Accounts holding at least one collateral entry of `token_id`, by adjusted borrowed sum descending.
pub fn filter_by_collateral_token(
    accounts: &[Account],
    token_id: &str,
) -> Result<Vec<Account>, AnalysisError> {
    let mut keyed = vec![];
    for account in accounts {
        if account.has_collateral_token(token_id)? {
            keyed.push((account.adjusted_borrowed_sum()?, account));
        }
    }
    debug!("{} of {} accounts hold collateral {}", keyed.len(), accounts.len(), token_id);

    Ok(sort_by_key(keyed, SortOrder::Descending))
}

// stable, so equal keys keep their input order in both directions.
fn sort_by_key(keyed: Vec<(Amount, &Account)>, order: SortOrder) -> Vec<Account> {
    keyed
        .into_iter()
        .sorted_by(|a, b| order.compare(&a.0, &b.0))
        .map(|(_, account)| account.clone())
        .collect()
}

pub fn take_top_n(mut accounts: Vec<Account>, top_n: i64) -> Vec<Account> {
    if top_n > 0 {
        accounts.truncate(usize::try_from(top_n).unwrap_or(usize::MAX));
    }
    accounts
}
