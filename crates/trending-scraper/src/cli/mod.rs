//! CLI subcommand implementations for the `trending` binary.

pub mod doctor;
pub mod scrape_cmd;
