//! vscdl library
//!
//! Downloads the source tree of a Vercel deployment into a local directory.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod source;
pub mod utils;
