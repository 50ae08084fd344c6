use std::fmt;

use num_enum::IntoPrimitive;
use num_enum::TryFromPrimitive;

/// Integer type stored in a register.
///
/// Wide on purpose: the carry flag models 8-bit overflow, the stored value
/// never wraps or gets masked.
pub type Value = i64;

/// The four named registers of the machine
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(TryFromPrimitive, IntoPrimitive)]
pub enum Register {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
}

impl Register {
    pub const ALL: &'static [Self] = &[Self::R1, Self::R2, Self::R3, Self::R4];

    /// Resolves a register name. Names are case-sensitive: `r1` is no register.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|register| register.name() == name)
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The register file the interpreter works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registers {
    /// The actual contents of the registers
    pub data: [Value; 4],
}

impl Default for Registers {
    /// Initializes all registers to zero
    fn default() -> Self {
        Registers { data: [0; 4] }
    }
}

impl Registers {
    /// Reads the current value of a register
    pub fn read(&self, register: Register) -> Value {
        self.data[usize::from(register)]
    }

    /// Writes a value to a register
    pub fn write(&mut self, register: Register, value: Value) {
        self.data[usize::from(register)] = value;
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;
    use color_eyre::eyre::Result;

    #[test]
    fn test_registers_start_at_zero() -> Result<()> {
        let registers = Registers::default();

        for &register in Register::ALL {
            assert_eq!(registers.read(register), 0);
        }

        Ok(())
    }

    #[test]
    fn test_read_write() -> Result<()> {
        let mut registers = Registers::default();

        registers.write(Register::R3, -42);
        assert_eq!(registers.read(Register::R3), -42);
        assert_eq!(registers.data[2], -42);

        Ok(())
    }

    #[test]
    fn test_name_lookup_is_case_sensitive() -> Result<()> {
        assert_eq!(Register::from_name("R2"), Some(Register::R2));
        assert_eq!(Register::from_name("r2"), None);
        assert_eq!(Register::from_name("R5"), None);
        assert_eq!(Register::from_name(""), None);

        Ok(())
    }

    #[test]
    fn test_register_index_round_trip() -> Result<()> {
        for &register in Register::ALL {
            assert_eq!(Register::try_from(usize::from(register))?, register);
        }

        Ok(())
    }

    #[test]
    fn test_display_matches_name() -> Result<()> {
        assert_eq!(Register::R1.to_string(), "R1");
        assert_eq!(Register::R4.to_string(), "R4");

        Ok(())
    }
}
