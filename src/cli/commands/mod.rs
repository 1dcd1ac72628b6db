pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod holiday;
pub mod init;
pub mod log;
pub mod org;
pub mod override_cmd;
pub mod resolve;
pub mod status;
