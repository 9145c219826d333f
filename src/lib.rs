pub mod account;
pub mod amount;
pub mod config;
pub mod csv;
pub mod form;
pub mod generator;
pub mod history;
pub mod model;
pub mod notice;
pub mod schedule;
pub mod simulator;
pub mod support;
pub mod time;

pub use amount::{Amount, format_naira};
pub use config::Config;
pub use model::{Action, TransactionRecord, TxKind, TxStatus};
pub use simulator::{SimError, Simulator};
pub use time::time_ago;
