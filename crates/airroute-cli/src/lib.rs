//! airroute CLI library.
//!
//! Output-location resolution and formatting helpers shared by the
//! `airroute-cli` subcommands.

pub mod output;
