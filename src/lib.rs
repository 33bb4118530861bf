//! Small terminal habit tracker. Declare a handful of daily habits, check them off every day and
//! keep an eye on how long each streak has been going.
//!
//! [engine] contains the pure streak logic, [storage] keeps everything on disk and [cli] glues
//! both together into the `habitual` binary.

pub mod cli;
pub mod engine;
pub mod fs;
pub mod storage;
pub mod utils;
