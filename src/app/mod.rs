//! Application shell: the chat REPL, the console load test, run statistics
//! and shutdown handling used by the binary.

pub mod load_test;
pub mod repl;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use load_test::run_console_load_test;
pub use repl::{parse_command, parse_request_count, run_repl, ChatSession, ReplCommand};
pub use shutdown::{cancel_on_ctrl_c, run_until_cancelled};
pub use statistics::{print_run_banner, print_run_summary};
