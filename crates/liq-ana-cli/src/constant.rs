pub const DEFAULT_CFG_DIR: &str = "config";
pub const MISSING_TOKEN_ID_MSG: &str = "Need designate collateral token id";
