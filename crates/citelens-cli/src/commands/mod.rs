//! Command implementations.

pub mod ask;
pub mod cite;
pub mod config;
pub mod summarize;

pub use self::ask::execute_ask;
pub use self::cite::execute_cite;
pub use self::config::execute_config;
pub use self::summarize::execute_summarize;
