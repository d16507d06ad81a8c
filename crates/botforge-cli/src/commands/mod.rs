//! CLI command handlers

pub mod convert;
pub mod init;
pub mod models;
pub mod question;
pub mod respond;
pub mod schedule;
pub mod train;

pub use convert::run_convert;
pub use init::run_init;
pub use models::run_models;
pub use question::{run_add, run_list};
pub use respond::run_respond;
pub use schedule::run_schedule;
pub use train::run_train;
