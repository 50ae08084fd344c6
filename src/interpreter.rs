pub mod error;

use crate::machine::{Register, Registers, Value};
use log::*;

use self::error::{Result, RunError, RunErrorKind};

/// Executes programs of the mini assembly language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interpreter {
    /// Register file
    pub registers: Registers,
    /// Carry flag. Written by `ADD` and `SUB` only, stale after everything else
    pub carry: bool,
    /// Program counter. 0-based index of the next line to dispatch; signed
    /// because the jump pre-adjustment passes through -1 for `JMP 0`
    pub pc: i64,
    /// Termination flag. Once set by `HLT`, no further line executes
    pub halted: bool,
    /// Lines produced by `PRN` and `HLT`, joined to form the run's result
    pub output: Vec<String>,
    /// Ceiling on dispatched instructions, `None` runs unbounded
    pub max_steps: Option<usize>,
}

impl Default for Interpreter {
    /// Initializes a fresh machine
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Initializes a fresh machine: zeroed registers, cleared carry, pc on
    /// the first line, not halted, empty output.
    pub fn new() -> Self {
        Self {
            registers: Registers::default(),
            carry: false,
            pc: 0,
            halted: false,
            output: Vec::new(),
            max_steps: None,
        }
    }

    /// Puts every piece of machine state back to its run-start default.
    /// `max_steps` is configuration, not machine state, and survives.
    fn reset(&mut self) {
        self.registers = Registers::default();
        self.carry = false;
        self.pc = 0;
        self.halted = false;
        self.output.clear();
    }

    /// Resolves a source operand: the register's current value if the token
    /// names one (case-sensitive), otherwise a base 10 integer literal.
    fn resolve(&self, token: &str) -> Result<Value, RunErrorKind> {
        if let Some(register) = Register::from_name(token) {
            return Ok(self.registers.read(register));
        }

        token.parse().map_err(|_| RunErrorKind::InvalidOperand {
            token: token.to_string(),
        })
    }

    /// Looks up a register operand. A single trailing comma is stripped
    /// first, so `MOV R1, 5` and `MOV R1 5` both work.
    fn register_operand(token: &str) -> Result<Register, RunErrorKind> {
        let name = token.strip_suffix(',').unwrap_or(token);

        Register::from_name(name).ok_or_else(|| RunErrorKind::InvalidRegister {
            name: name.to_string(),
        })
    }

    /// Parses a jump target. Targets are 1-based line numbers and must be
    /// integer literals; a register never names a target.
    fn jump_target(token: &str) -> Result<i64, RunErrorKind> {
        token.parse().map_err(|_| RunErrorKind::InvalidOperand {
            token: token.to_string(),
        })
    }

    /// Dispatches a single program line against the current machine state.
    ///
    /// Tokenization happens here, at dispatch time: a line that is never
    /// reached is never inspected. Blank lines are no-ops, and so is every
    /// line once the machine has halted.
    pub fn execute_line(&mut self, line: &str) -> Result<(), RunErrorKind> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || self.halted {
            return Ok(());
        }

        let mnemonic = tokens[0].to_uppercase();
        let opcode = Opcode::from_mnemonic(&mnemonic)
            .ok_or(RunErrorKind::UnknownInstruction { name: mnemonic })?;

        // Arity before operands: `MOV R9` is malformed, not a bad register.
        if tokens.len() < opcode.arity() {
            return Err(RunErrorKind::MalformedInstruction {
                line: line.trim().to_string(),
            });
        }

        match opcode {
            Opcode::MOV => {
                let dst = Self::register_operand(tokens[1])?;
                let value = self.resolve(tokens[2])?;
                self.registers.write(dst, value);

                debug!("MOV {} {}", dst, value);
            }
            Opcode::ADD => {
                let dst = Self::register_operand(tokens[1])?;
                let value = self.resolve(tokens[2])?;
                let result = self.registers.read(dst) + value;

                // The carry only signals 8-bit overflow, the stored value
                // stays exact.
                self.carry = result > 255;
                self.registers.write(dst, result);

                debug!("ADD {} {}: {}", dst, value, result);
            }
            Opcode::SUB => {
                let dst = Self::register_operand(tokens[1])?;
                let value = self.resolve(tokens[2])?;
                let result = self.registers.read(dst) - value;

                self.carry = result < 0;
                self.registers.write(dst, result);

                debug!("SUB {} {}: {}", dst, value, result);
            }
            Opcode::MUL => {
                let dst = Self::register_operand(tokens[1])?;
                let value = self.resolve(tokens[2])?;
                let result = self.registers.read(dst) * value;
                self.registers.write(dst, result);

                debug!("MUL {} {}: {}", dst, value, result);
            }
            Opcode::DIV => {
                let dst = Self::register_operand(tokens[1])?;
                let value = self.resolve(tokens[2])?;
                if value == 0 {
                    return Err(RunErrorKind::DivisionByZero);
                }

                let result = floor_div(self.registers.read(dst), value);
                self.registers.write(dst, result);

                debug!("DIV {} {}: {}", dst, value, result);
            }
            Opcode::PRN => {
                let register = Self::register_operand(tokens[1])?;
                let text = format!("{} = {}", register, self.registers.read(register));
                self.output.push(text);

                debug!("PRN {}", register);
            }
            Opcode::JMP => {
                let target = Self::jump_target(tokens[1])?;

                // Pre-adjusted for the loop's post-dispatch increment:
                // execution resumes on the line after `target`, and line
                // `target` itself never runs. Programs are written against
                // exactly this addressing.
                self.pc = target - 1;

                debug!("JMP {}", target);
            }
            Opcode::JC => {
                // The target is parsed before the carry check, so a bad
                // target fails even when the jump is not taken.
                let target = Self::jump_target(tokens[1])?;
                if self.carry {
                    self.pc = target - 1;
                }

                debug!("JC {}: taken={}", target, self.carry);
            }
            Opcode::HLT => {
                self.halted = true;
                self.output.push("Program halted.".to_string());

                debug!("HLT");
            }
        }

        Ok(())
    }

    /// Runs a whole program and returns its output.
    ///
    /// The machine is reset first, so every run is independent of the ones
    /// before it. The text is trimmed as a whole and split into lines; line 1
    /// is the first line after that trim and jump targets count from there.
    /// Each loop turn dispatches the line under the pc and then advances by
    /// one (also after a jump, see [`Interpreter::execute_line`]). The run
    /// ends normally when the pc leaves the program or the machine halts;
    /// a failed line aborts it with the 1-based line number attached.
    pub fn run(&mut self, program: &str) -> Result<String> {
        self.reset();

        let lines: Vec<&str> = program.trim().split('\n').collect();
        let mut steps = 0;

        while !self.halted && self.pc >= 0 && (self.pc as usize) < lines.len() {
            let line_nr = self.pc as usize + 1;

            if let Some(limit) = self.max_steps {
                if steps >= limit {
                    return Err(RunError::new(
                        RunErrorKind::StepLimitExceeded { limit },
                        line_nr,
                    ));
                }
            }

            self.execute_line(lines[self.pc as usize])
                .map_err(|kind| RunError::new(kind, line_nr))?;

            self.pc += 1;
            steps += 1;
        }

        debug!(
            "program finished: {} instruction(s), {} output line(s)",
            steps,
            self.output.len()
        );

        Ok(self.output.join("\n"))
    }
}

/// Floor division, rounding toward negative infinity: `-7 / 2` is `-4`.
/// Integer `/` truncates toward zero and `div_euclid` rounds upward for
/// negative divisors, neither matches the machine's `DIV`.
fn floor_div(lhs: Value, rhs: Value) -> Value {
    let quotient = lhs / rhs;
    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        quotient - 1
    } else {
        quotient
    }
}

macro_rules! opcodes {
    ( $( $( #[doc = $doc:expr] )+ $name:ident => $arity:literal , )+ ) => {
        /// The closed opcode set of the language
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        pub enum Opcode {
            $(
                $( #[doc = $doc] )+
                $name,
            )+
        }

        impl Opcode {
            pub const ALL: &'static [Self] = &[
                $( Self::$name , )+
            ];

            /// Looks up an upper-cased mnemonic token
            pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .find(|opcode| opcode.name() == mnemonic)
                    .copied()
            }

            /// Whitespace tokens the opcode requires, mnemonic included.
            /// Extra tokens beyond this are ignored.
            pub fn arity(&self) -> usize {
                match self {
                    $( Self::$name => $arity , )+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name) , )+
                }
            }
        }

        impl ::std::fmt::Display for Opcode {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $( Self::$name => f.write_str(stringify!($name)) , )+
                }
            }
        }
    }
}

opcodes! {
    /// Copy a resolved source value into a register
    MOV => 3,
    /// Add a resolved source value to a register, carry signals a result over 255
    ADD => 3,
    /// Subtract a resolved source value from a register, carry signals a negative result
    SUB => 3,
    /// Multiply a register by a resolved source value
    MUL => 3,
    /// Floor-divide a register by a resolved source value
    DIV => 3,
    /// Append `<reg> = <value>` to the output
    PRN => 2,
    /// Jump to a 1-based line number (execution resumes on the line after it)
    JMP => 2,
    /// Like `JMP`, but only when the carry flag is set
    JC => 2,
    /// Halt and append `Program halted.` to the output
    HLT => 1,
}
