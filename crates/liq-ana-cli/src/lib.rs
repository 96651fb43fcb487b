pub mod col_token;
pub mod constant;
pub mod force_close;
