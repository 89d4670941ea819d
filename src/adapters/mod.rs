//! Adapters binding the port traits to files on disk.

pub mod csv_data_adapter;
pub mod csv_ledger_adapter;
pub mod file_config_adapter;
