use std::env;
use std::fs;

use color_eyre::eyre::{Result, WrapErr};
use simple_logger::SimpleLogger;

use miniasm::interpreter::Interpreter;

/// Runs a program file named on the command line (defaults to the bundled
/// sample) and prints whatever the run produced.
fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    SimpleLogger::new().init().unwrap(); // logging

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/programs/countdown.asm".to_string());
    let code = fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read program from `{}`", path))?;

    let mut interp = Interpreter::new();
    let output = interp.run(&code)?;

    if output.is_empty() {
        println!("Execution complete (no output).");
    } else {
        println!("{}", output);
    }

    Ok(())
}
