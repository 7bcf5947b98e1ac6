pub mod config;
pub mod key;
pub mod marshal;
pub mod reconcile;
pub mod resolve;
