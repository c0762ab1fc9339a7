// src/io/mod.rs

//! File formats: job sets in, response times and state graphs out.

pub mod jobset;
pub mod precedence;
pub mod writer;

pub use jobset::{parse_jobset_csv, parse_jobset_toml, read_jobset};
pub use precedence::{apply_precedence_csv, read_precedence};
pub use writer::{render_response_times, write_dot, write_response_times};
