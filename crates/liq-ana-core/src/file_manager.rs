use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use mockall::automock;
use serde::Serialize;
use serde_json::{Map, Serializer, Value};
use tracing::{debug, error, info};

use crate::{
    account::{accounts_from_value, accounts_to_value, Account},
    error::AnalysisError,
    formatter::AnalysisFormatter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub sort_keys: bool,
    pub ensure_ascii: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions { sort_keys: false, ensure_ascii: true }
    }
}

#[automock]
pub trait FileManager {
    fn read_json(&self, path: &Path) -> Result<Value, AnalysisError>;
    fn write_json(&self, path: &Path, value: &Value, opts: SaveOptions)
        -> Result<(), AnalysisError>;
}

/// Reads and writes whole json documents on the local file system.
pub struct JsonFileManager {}

impl FileManager for JsonFileManager {
    fn read_json(&self, path: &Path) -> Result<Value, AnalysisError> {
        let file = File::open(path).map_err(|e| {
            error!("file open error, {:?}: {:?}", path, e);
            AnalysisError::Io(e)
        })?;
        let reader = BufReader::new(file);
        let value: Value = serde_json::from_reader(reader).map_err(|e| {
            error!("unable to parse json data in {:?}: {:?}", path, e);
            AnalysisError::Json(e)
        })?;
        println!("Json file ({}) loaded.", path.display());
        info!("json file {:?} loaded", path);
        Ok(value)
    }

    fn write_json(
        &self,
        path: &Path,
        value: &Value,
        opts: SaveOptions,
    ) -> Result<(), AnalysisError> {
        let file = File::create(path).map_err(|e| {
            error!("file create error, {:?}: {:?}", path, e);
            AnalysisError::Io(e)
        })?;
        let mut writer = BufWriter::new(file);
        let mut ser =
            Serializer::with_formatter(&mut writer, AnalysisFormatter::new(opts.ensure_ascii));
        if opts.sort_keys {
            sort_keys(value).serialize(&mut ser)?;
        } else {
            value.serialize(&mut ser)?;
        }
        writer.flush()?;
        println!("Json file ({}) saved.", path.display());
        info!("json file {:?} saved", path);
        Ok(())
    }
}

/// Returns a copy of `value` with the keys of every nested object in ascending order.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> =
                entries.into_iter().map(|(k, v)| (k.clone(), sort_keys(v))).collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Loads the account list stored at `path`.
pub fn load_accounts<M: FileManager>(
    file_manager: &M,
    path: &Path,
) -> Result<Vec<Account>, AnalysisError> {
    let value = file_manager.read_json(path)?;
    let accounts = accounts_from_value(value)?;
    debug!("{} accounts parsed from {:?}", accounts.len(), path);
    Ok(accounts)
}

/// Writes `accounts` as a json array to `path`, replacing any existing file.
pub fn save_accounts<M: FileManager>(
    file_manager: &M,
    path: &Path,
    accounts: &[Account],
    opts: SaveOptions,
) -> Result<(), AnalysisError> {
    debug!("save {} accounts to {:?}", accounts.len(), path);
    file_manager.write_json(path, &accounts_to_value(accounts), opts)
}
