//! # CLI Command Implementations
//!
//! `hook-mirror` has a single command. Like any command module it holds an
//! `Args` struct derived with `clap` and an `execute` function that calls into
//! the `hook_mirror` library.

pub mod mirror;
