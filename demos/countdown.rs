use color_eyre::eyre::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use miniasm::interpreter::Interpreter;

/// Counts R1 down to zero. `SUB` raises the carry once the value goes
/// negative, `JC 6` then leaves the loop; both jumps land one line past
/// their target, which is what the line numbers are picked for.
const PROGRAM: &str = "\
MOV R1, 3
PRN R1
SUB R1, 1
JC 6
JMP 1
PRN R4
HLT";

fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .init()
        .unwrap(); // logging

    let mut interp = Interpreter::new();
    interp.max_steps = Some(1_000);

    let output = interp.run(PROGRAM)?;
    println!("{}", output);

    Ok(())
}
