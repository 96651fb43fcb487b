use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::error::AnalysisError;

pub const BORROWED_SUM: &str = "borrowedSum";
pub const COLLATERAL_SUM: &str = "collateralSum";
pub const ADJUSTED_BORROWED_SUM: &str = "adjustedBorrowedSum";
pub const COLLATERAL: &str = "collateral";
pub const TOKEN_ID: &str = "tokenId";

/// A numeric field value. Two integers compare exactly, anything else compares as `f64`.
#[derive(Debug, Clone, Copy)]
pub enum Amount {
    Int(i128),
    Float(f64),
}

impl Amount {
    fn from_value(value: &Value) -> Option<Self> {
        if let Some(n) = value.as_i64() {
            return Some(Amount::Int(n.into()));
        }
        if let Some(n) = value.as_u64() {
            return Some(Amount::Int(n.into()));
        }
        value.as_f64().map(Amount::Float)
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Amount::Int(n) => *n as f64,
            Amount::Float(f) => *f,
        }
    }

    pub fn compare(&self, other: &Amount) -> Ordering {
        match (self, other) {
            (Amount::Int(a), Amount::Int(b)) => a.cmp(b),
            _ => self.as_f64().partial_cmp(&other.as_f64()).unwrap_or(Ordering::Equal),
        }
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

/// A liquidated account record as found in the input document.
///
/// The whole json object is kept so that fields the analysis never reads are written back
/// unchanged. Only the handful of fields used by the filters are looked up, and only on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Account(Map<String, Value>);

impl Account {
    pub fn new(fields: Map<String, Value>) -> Self {
        Account(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn field(&self, name: &str) -> Result<&Value, AnalysisError> {
        self.0.get(name).ok_or_else(|| AnalysisError::MissingField { field: name.to_string() })
    }

    fn numeric_field(&self, name: &str) -> Result<Amount, AnalysisError> {
        let value = self.field(name)?;
        Amount::from_value(value).ok_or_else(|| AnalysisError::InvalidField {
            field: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn borrowed_sum(&self) -> Result<Amount, AnalysisError> {
        self.numeric_field(BORROWED_SUM)
    }

    pub fn collateral_sum(&self) -> Result<Amount, AnalysisError> {
        self.numeric_field(COLLATERAL_SUM)
    }

    pub fn adjusted_borrowed_sum(&self) -> Result<Amount, AnalysisError> {
        self.numeric_field(ADJUSTED_BORROWED_SUM)
    }

    /// True when the account owes strictly more than its collateral is worth.
    pub fn is_force_close(&self) -> Result<bool, AnalysisError> {
        Ok(self.borrowed_sum()?.compare(&self.collateral_sum()?) == Ordering::Greater)
    }

    /// Scans `collateral` in order and stops at the first entry whose `tokenId` matches.
    /// Only a string `tokenId` can match; `42` never equals `"42"`.
    pub fn has_collateral_token(&self, token_id: &str) -> Result<bool, AnalysisError> {
        let collateral = self.field(COLLATERAL)?;
        let entries = collateral.as_array().ok_or_else(|| AnalysisError::InvalidField {
            field: COLLATERAL.to_string(),
            value: collateral.to_string(),
        })?;
        for entry in entries {
            let id = entry
                .as_object()
                .and_then(|obj| obj.get(TOKEN_ID))
                .ok_or_else(|| AnalysisError::MissingField {
                    field: format!("{}.{}", COLLATERAL, TOKEN_ID),
                })?;
            if matches!(id, Value::String(s) if s == token_id) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Splits a parsed document into account records. The document must be a json array of objects.
pub fn accounts_from_value(value: Value) -> Result<Vec<Account>, AnalysisError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(AnalysisError::InvalidDocument(format!(
                "expect an array of accounts, got {}",
                json_kind(&other)
            )))
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(fields) => Ok(Account(fields)),
            other => Err(AnalysisError::InvalidDocument(format!(
                "account at index {} is {}, not an object",
                idx,
                json_kind(&other)
            ))),
        })
        .collect()
}

pub fn accounts_to_value(accounts: &[Account]) -> Value {
    Value::Array(accounts.iter().map(|account| Value::Object(account.0.clone())).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{accounts_from_value, accounts_to_value, Account, Amount};
    use crate::error::AnalysisError;

    fn account(value: serde_json::Value) -> Account {
        Account::new(value.as_object().unwrap().clone())
    }

    #[test]
    fn test_numeric_fields() {
        let acct = account(json!({
            "borrowedSum": 100,
            "collateralSum": 50.5,
            "adjustedBorrowedSum": 90.25,
            "collateral": []
        }));
        assert_eq!(acct.borrowed_sum().unwrap(), Amount::Int(100));
        assert_eq!(acct.collateral_sum().unwrap(), Amount::Float(50.5));
        assert_eq!(acct.adjusted_borrowed_sum().unwrap().as_f64(), 90.25);
        assert!(acct.is_force_close().unwrap());
    }

    #[test]
    fn test_force_close_is_strict() {
        let acct = account(json!({"borrowedSum": 60, "collateralSum": 60}));
        assert!(!acct.is_force_close().unwrap());
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let acct = account(json!({
            "borrowedSum": 9007199254740993u64,
            "collateralSum": 9007199254740992u64
        }));
        assert!(acct.is_force_close().unwrap());

        let acct = account(json!({"borrowedSum": u64::MAX, "collateralSum": -1}));
        assert!(acct.is_force_close().unwrap());

        let acct = account(json!({"borrowedSum": 3, "collateralSum": 2.5}));
        assert!(acct.is_force_close().unwrap());
        assert_eq!(Amount::Int(2), Amount::Float(2.0));
    }

    #[test]
    fn test_missing_field() {
        let acct = account(json!({"borrowedSum": 60}));
        match acct.is_force_close() {
            Err(AnalysisError::MissingField { field }) => assert_eq!(field, "collateralSum"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field() {
        let acct = account(json!({"borrowedSum": "60", "collateralSum": 1}));
        assert!(matches!(acct.borrowed_sum(), Err(AnalysisError::InvalidField { .. })));
    }

    #[test]
    fn test_has_collateral_token() {
        let acct = account(json!({
            "collateral": [{"tokenId": "usdt.e", "balance": "1"}, {"tokenId": 42}]
        }));
        assert!(acct.has_collateral_token("usdt.e").unwrap());
        assert!(!acct.has_collateral_token("42").unwrap());
        assert!(!acct.has_collateral_token("wrap.near").unwrap());
    }

    #[test]
    fn test_collateral_scan_stops_at_first_match() {
        let acct = account(json!({"collateral": [{"tokenId": "A"}, {"balance": "1"}]}));
        assert!(acct.has_collateral_token("A").unwrap());
        assert!(matches!(
            acct.has_collateral_token("B"),
            Err(AnalysisError::MissingField { .. })
        ));
    }

    #[test]
    fn test_accounts_from_value() {
        let doc = json!([{"z": 1, "a": 2}, {"borrowedSum": 3}]);
        let accounts = accounts_from_value(doc.clone()).unwrap();
        assert_eq!(accounts.len(), 2);
        let keys: Vec<&String> = accounts[0].fields().keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(accounts_to_value(&accounts), doc);

        assert!(matches!(
            accounts_from_value(json!({"borrowedSum": 3})),
            Err(AnalysisError::InvalidDocument(_))
        ));
        assert!(matches!(
            accounts_from_value(json!([{"borrowedSum": 3}, 7])),
            Err(AnalysisError::InvalidDocument(_))
        ));
    }
}
