use color_eyre::eyre::Result;
use simple_logger::SimpleLogger;

use miniasm::interpreter::Interpreter;

/// The overflow showcase: `ADD` pushes R1 past 255, the carry makes `JC`
/// jump, and the jump lands one line past its target. Line 7 is the `HLT`,
/// so the halt itself is skipped and the program falls off the end.
const PROGRAM: &str = "\
MOV R1, 250
ADD R1, 10
JC 7
PRN R1
MOV R2, 100
PRN R2
HLT
MOV R3, 1
PRN R3";

fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    SimpleLogger::new().init().unwrap(); // logging

    let mut interp = Interpreter::new();
    let output = interp.run(PROGRAM)?;

    println!("{}", output);

    Ok(())
}
