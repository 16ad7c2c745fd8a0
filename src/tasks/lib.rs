//! Command line front end for `factorlab-linalg`.
//!
//! Each binary under `src/binary-shims` calls one function in [`entry_points`].

#[macro_use] extern crate clap;
#[macro_use] extern crate log;
#[cfg(test)]
#[macro_use] extern crate factorlab_assert_close;

pub type FailResult<T> = Result<T, failure::Error>;

mod cmd;
mod config;
mod filetypes;
mod logging;
pub mod entry_points;

pub use crate::cmd::{run_factors, run_invert, run_solve, FactorMethod, FactorOutput};
pub use crate::config::Settings;
pub use crate::filetypes::{read_matrix, read_vector, write_json, matrix_rows, DataFormat};
pub use crate::logging::GlobalLogger;
