//! Replkit - Interactive Command Shell Builder
//!
//! Builds small interactive shells: register named commands backed by
//! clap parsers and plain functions, then hand control to a
//! read-parse-dispatch loop that runs them against a shared, mutable
//! context object.
//!
//! # Architecture
//!
//! - **Core**: Configuration and error handling
//! - **Command**: A name, an argument parser, and a handler bound together
//! - **Runner**: Command registry, aliases, shared context, and the loop
//!
//! # Usage
//!
//! ```rust,no_run
//! use clap::{value_parser, Arg};
//! use replkit::{Command, Runner};
//!
//! fn main() -> anyhow::Result<()> {
//!     let parser = clap::Command::new("add")
//!         .arg(Arg::new("x").required(true).value_parser(value_parser!(f64)))
//!         .arg(Arg::new("y").required(true).value_parser(value_parser!(f64)));
//!
//!     let add = Command::new("add", parser, |args| {
//!         let x: f64 = *args.get_one("x").unwrap();
//!         let y: f64 = *args.get_one("y").unwrap();
//!         println!("{}", x + y);
//!         Ok(())
//!     })?
//!     .help("Add 2 numbers");
//!
//!     let mut shell = Runner::new("calculator", ());
//!     shell.add_commands(vec![add], None)?;
//!     shell.run()?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod core;
pub mod runner;

// Re-export commonly used items
pub use crate::command::{ArgMatches, ArgSpec, Command, ExecOutcome, ParseOutcome};
pub use crate::core::{ReplConfig, ReplError, Result};
pub use crate::runner::{Dispatch, Runner, MAX_ALIAS_HOPS, RESERVED_WORDS};
