//! Command implementations.
//!
//! Each command returns the text to print, leaving stdout to `main`.

pub mod agents;
pub mod profile;
pub mod resolve;
pub mod retrieve;
pub mod search;
pub mod suggest;

pub use self::agents::execute_agents;
pub use self::profile::execute_profile;
pub use self::resolve::execute_resolve;
pub use self::retrieve::execute_retrieve;
pub use self::search::execute_search;
pub use self::suggest::execute_suggest;

use crate::config::OutputFormat;
use crate::output::Formatter;

/// Prefix `body` with a result count in table mode.
fn with_count(formatter: &Formatter, total: Option<u64>, shown: usize, body: String) -> String {
    match formatter.format() {
        OutputFormat::Table => format!("{}\n{}", formatter.result_count(total, shown), body),
        OutputFormat::Json | OutputFormat::Quiet => body,
    }
}
