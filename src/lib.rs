//! Interpreter for a small assembly-like language over four integer
//! registers (`R1`..`R4`). Programs are plain text, one instruction per
//! line; a run returns the collected output text or the failure of the
//! first bad line.

pub mod interpreter;
pub mod machine;
