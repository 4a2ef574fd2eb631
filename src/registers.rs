//! RV32 general-purpose register definitions.
//!
//! Based on the RISC-V calling convention: registers `x8`..`x15` additionally
//! belong to the compressed-instruction register subset and get a 3-bit
//! index there via [`Register::compressed_index`].

use std::fmt;

use crate::error::RegisterConvError;
use crate::operand::Offset;
use crate::util::u8_fits_n_bits;

/// Number of `RISC-V` registers in a bank.
pub const NUMBER_OF_REGISTERS: usize = 32;

/// A general-purpose `RISC-V` register, `x0`..`x31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    const NBITS: usize = 5;

    /// The register's index, `0..=31`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// `true` if this register is addressable with a 3-bit field in a
    /// compressed (RVC) instruction, i.e. it is one of `x8..=x15`.
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        self.0 >= 8 && self.0 <= 15
    }

    /// This register's 3-bit index within the compressed register subset,
    /// if it belongs to it.
    #[must_use]
    pub const fn compressed_index(self) -> Option<u8> {
        if self.is_compressed() {
            Some(self.0 - 8)
        } else {
            None
        }
    }

    /// Builds the base+offset operand `self[offset]`, used by loads, stores,
    /// and `jalr`.
    #[must_use]
    pub const fn offset(self, offset: i16) -> Offset<Register> {
        Offset::new(self, offset)
    }

    pub(crate) const fn into_u32(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl TryFrom<u8> for Register {
    type Error = RegisterConvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if u8_fits_n_bits(value, Self::NBITS) {
            Ok(Self(value))
        } else {
            Err(RegisterConvError(i64::from(value)))
        }
    }
}

impl TryFrom<u32> for Register {
    type Error = RegisterConvError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| RegisterConvError(i64::from(value)))
            .and_then(Register::try_from)
    }
}

impl From<Register> for u8 {
    fn from(r: Register) -> Self {
        r.0
    }
}

impl From<Register> for u32 {
    fn from(r: Register) -> Self {
        u32::from(r.0)
    }
}

/// Hard-wired zero, ignores writes.
pub const X0: Register = Register(0);
/// Return address.
pub const X1: Register = Register(1);
/// Stack pointer.
pub const X2: Register = Register(2);
/// Global pointer.
pub const X3: Register = Register(3);
/// Thread pointer.
pub const X4: Register = Register(4);
/// Temporary register 0.
pub const X5: Register = Register(5);
/// Temporary register 1.
pub const X6: Register = Register(6);
/// Temporary register 2.
pub const X7: Register = Register(7);
/// Saved register 0 / frame pointer.
pub const X8: Register = Register(8);
/// Saved register 1.
pub const X9: Register = Register(9);
/// Function argument/return value 0.
pub const X10: Register = Register(10);
/// Function argument/return value 1.
pub const X11: Register = Register(11);
/// Function argument 2.
pub const X12: Register = Register(12);
/// Function argument 3.
pub const X13: Register = Register(13);
/// Function argument 4.
pub const X14: Register = Register(14);
/// Function argument 5.
pub const X15: Register = Register(15);
/// Function argument 6.
pub const X16: Register = Register(16);
/// Function argument 7.
pub const X17: Register = Register(17);
/// Saved register 2.
pub const X18: Register = Register(18);
/// Saved register 3.
pub const X19: Register = Register(19);
/// Saved register 4.
pub const X20: Register = Register(20);
/// Saved register 5.
pub const X21: Register = Register(21);
/// Saved register 6.
pub const X22: Register = Register(22);
/// Saved register 7.
pub const X23: Register = Register(23);
/// Saved register 8.
pub const X24: Register = Register(24);
/// Saved register 9.
pub const X25: Register = Register(25);
/// Saved register 10.
pub const X26: Register = Register(26);
/// Saved register 11.
pub const X27: Register = Register(27);
/// Temporary register 3.
pub const X28: Register = Register(28);
/// Temporary register 4.
pub const X29: Register = Register(29);
/// Temporary register 5.
pub const X30: Register = Register(30);
/// Temporary register 6.
pub const X31: Register = Register(31);

/// Alias for [`X0`].
pub const ZERO: Register = X0;
/// Alias for [`X1`].
pub const RA: Register = X1;
/// Alias for [`X2`].
pub const SP: Register = X2;
/// Alias for [`X3`].
pub const GP: Register = X3;
/// Alias for [`X4`].
pub const TP: Register = X4;
/// Alias for [`X5`].
pub const T0: Register = X5;
/// Alias for [`X6`].
pub const T1: Register = X6;
/// Alias for [`X7`].
pub const T2: Register = X7;
/// Alias for [`X8`].
pub const S0: Register = X8;
/// Alias for [`X8`].
pub const FP: Register = X8;
/// Alias for [`X9`].
pub const S1: Register = X9;
/// Alias for [`X10`].
pub const A0: Register = X10;
/// Alias for [`X11`].
pub const A1: Register = X11;
/// Alias for [`X12`].
pub const A2: Register = X12;
/// Alias for [`X13`].
pub const A3: Register = X13;
/// Alias for [`X14`].
pub const A4: Register = X14;
/// Alias for [`X15`].
pub const A5: Register = X15;
/// Alias for [`X16`].
pub const A6: Register = X16;
/// Alias for [`X17`].
pub const A7: Register = X17;
/// Alias for [`X18`].
pub const S2: Register = X18;
/// Alias for [`X19`].
pub const S3: Register = X19;
/// Alias for [`X20`].
pub const S4: Register = X20;
/// Alias for [`X21`].
pub const S5: Register = X21;
/// Alias for [`X22`].
pub const S6: Register = X22;
/// Alias for [`X23`].
pub const S7: Register = X23;
/// Alias for [`X24`].
pub const S8: Register = X24;
/// Alias for [`X25`].
pub const S9: Register = X25;
/// Alias for [`X26`].
pub const S10: Register = X26;
/// Alias for [`X27`].
pub const S11: Register = X27;
/// Alias for [`X28`].
pub const T3: Register = X28;
/// Alias for [`X29`].
pub const T4: Register = X29;
/// Alias for [`X30`].
pub const T5: Register = X30;
/// Alias for [`X31`].
pub const T6: Register = X31;

/// A floating-point register, `f0`..`f31`, used by the F and D extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FRegister(u8);

impl FRegister {
    const NBITS: usize = 5;

    /// The register's index, `0..=31`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// `true` if this register is addressable with a 3-bit field in a
    /// compressed (RVC) instruction, i.e. it is one of `f8..=f15`.
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        self.0 >= 8 && self.0 <= 15
    }

    /// This register's 3-bit index within the compressed register subset,
    /// if it belongs to it.
    #[must_use]
    pub const fn compressed_index(self) -> Option<u8> {
        if self.is_compressed() {
            Some(self.0 - 8)
        } else {
            None
        }
    }

    pub(crate) const fn into_u32(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for FRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

impl TryFrom<u8> for FRegister {
    type Error = RegisterConvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if u8_fits_n_bits(value, Self::NBITS) {
            Ok(Self(value))
        } else {
            Err(RegisterConvError(i64::from(value)))
        }
    }
}

impl From<FRegister> for u8 {
    fn from(r: FRegister) -> Self {
        r.0
    }
}

impl From<FRegister> for u32 {
    fn from(r: FRegister) -> Self {
        u32::from(r.0)
    }
}

/// Floating-point temporary register 0.
pub const FT0: FRegister = FRegister(0);
/// Floating-point temporary register 1.
pub const FT1: FRegister = FRegister(1);
/// Floating-point temporary register 2.
pub const FT2: FRegister = FRegister(2);
/// Floating-point temporary register 3.
pub const FT3: FRegister = FRegister(3);
/// Floating-point temporary register 4.
pub const FT4: FRegister = FRegister(4);
/// Floating-point temporary register 5.
pub const FT5: FRegister = FRegister(5);
/// Floating-point temporary register 6.
pub const FT6: FRegister = FRegister(6);
/// Floating-point temporary register 7.
pub const FT7: FRegister = FRegister(7);
/// Floating-point saved register 0.
pub const FS0: FRegister = FRegister(8);
/// Floating-point saved register 1.
pub const FS1: FRegister = FRegister(9);
/// Floating-point argument/return value 0.
pub const FA0: FRegister = FRegister(10);
/// Floating-point argument/return value 1.
pub const FA1: FRegister = FRegister(11);
/// Floating-point argument 2.
pub const FA2: FRegister = FRegister(12);
/// Floating-point argument 3.
pub const FA3: FRegister = FRegister(13);
/// Floating-point argument 4.
pub const FA4: FRegister = FRegister(14);
/// Floating-point argument 5.
pub const FA5: FRegister = FRegister(15);
/// Floating-point argument 6.
pub const FA6: FRegister = FRegister(16);
/// Floating-point argument 7.
pub const FA7: FRegister = FRegister(17);
/// Floating-point saved register 2.
pub const FS2: FRegister = FRegister(18);
/// Floating-point saved register 3.
pub const FS3: FRegister = FRegister(19);
/// Floating-point saved register 4.
pub const FS4: FRegister = FRegister(20);
/// Floating-point saved register 5.
pub const FS5: FRegister = FRegister(21);
/// Floating-point saved register 6.
pub const FS6: FRegister = FRegister(22);
/// Floating-point saved register 7.
pub const FS7: FRegister = FRegister(23);
/// Floating-point saved register 8.
pub const FS8: FRegister = FRegister(24);
/// Floating-point saved register 9.
pub const FS9: FRegister = FRegister(25);
/// Floating-point saved register 10.
pub const FS10: FRegister = FRegister(26);
/// Floating-point saved register 11.
pub const FS11: FRegister = FRegister(27);
/// Floating-point temporary register 8.
pub const FT8: FRegister = FRegister(28);
/// Floating-point temporary register 9.
pub const FT9: FRegister = FRegister(29);
/// Floating-point temporary register 10.
pub const FT10: FRegister = FRegister(30);
/// Floating-point temporary register 11.
pub const FT11: FRegister = FRegister(31);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_subset_is_x8_through_x15() {
        for i in 0..NUMBER_OF_REGISTERS {
            let r = Register::try_from(i as u8).unwrap();
            assert_eq!(r.is_compressed(), (8..=15).contains(&i));
        }
        assert_eq!(X8.compressed_index(), Some(0));
        assert_eq!(X15.compressed_index(), Some(7));
        assert_eq!(X7.compressed_index(), None);
        assert_eq!(X16.compressed_index(), None);
    }

    #[test]
    fn aliases_match_indices() {
        assert_eq!(ZERO, X0);
        assert_eq!(SP, X2);
        assert_eq!(FP, S0);
        assert_eq!(A0.index(), 10);
        assert_eq!(T6.index(), 31);
    }

    #[test]
    fn display_matches_xn() {
        assert_eq!(X5.to_string(), "x5");
        assert_eq!(ZERO.to_string(), "x0");
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert_eq!(
            Register::try_from(32_u8).unwrap_err().to_string(),
            "invalid register index: 32"
        );
    }

    #[test]
    fn fregister_compressed_subset_is_f8_through_f15() {
        assert_eq!(FS0.compressed_index(), Some(0));
        assert_eq!(FA5.compressed_index(), Some(7));
        assert_eq!(FT0.compressed_index(), None);
        assert_eq!(FA0.to_string(), "f10");
    }
}
