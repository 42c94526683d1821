//! Everything around invoking the external `bkcrack` executable.
//!
//! bkcrack itself is the system of interest; this module only assembles its
//! command lines, runs it, and scrapes the text it prints.

mod command;
pub mod output;
mod runner;
mod types;

pub use command::BkcrackCommand;
pub use runner::{
    materialize_literal, run_capture, spawn_streaming, CaptureOutput, CommandWorker, WorkerEvent,
};
pub use types::{BkcrackError, BkcrackResult};
