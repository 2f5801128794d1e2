//! CLI command handlers, one file per subcommand.

mod resolve;
mod run;
mod status;

pub use resolve::run_resolve;
pub use run::{run_download, RunOptions};
pub use status::run_status;
