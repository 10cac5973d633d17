// Handlers for CLI subcommands.
//
// main.rs parses arguments and dispatches here.

pub mod carriers;
pub mod track;
