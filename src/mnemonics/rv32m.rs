//! Integer multiply/divide (the `M` extension). All eight mnemonics share
//! the base `OP` opcode and `funct7 = 0b0000001`; RV32C has no compressed
//! form for any of them.

use crate::assembler::Assembler;
use crate::features::FeatureSet;
use crate::format;
use crate::registers::Register;

const OP_REG: u32 = 0x33;
const FUNCT7_MULDIV: u32 = 0b0000001;

impl<'a> Assembler<'a> {
    fn muldiv(&mut self, funct3: u32, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.features.require(FeatureSet::M);
        let word = format::r_type(OP_REG, rd.into_u32(), funct3, rs1.into_u32(), rs2.into_u32(), FUNCT7_MULDIV);
        self.env.emit_word(word);
        self
    }

    /// `mul rd, rs1, rs2`.
    pub fn mul(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b000, rd, rs1, rs2)
    }

    /// `mulh rd, rs1, rs2`.
    pub fn mulh(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b001, rd, rs1, rs2)
    }

    /// `mulhsu rd, rs1, rs2`.
    pub fn mulhsu(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b010, rd, rs1, rs2)
    }

    /// `mulhu rd, rs1, rs2`.
    pub fn mulhu(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b011, rd, rs1, rs2)
    }

    /// `div rd, rs1, rs2`.
    pub fn div(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b100, rd, rs1, rs2)
    }

    /// `divu rd, rs1, rs2`.
    pub fn divu(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b101, rd, rs1, rs2)
    }

    /// `rem rd, rs1, rs2`.
    pub fn rem(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b110, rd, rs1, rs2)
    }

    /// `remu rd, rs1, rs2`.
    pub fn remu(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.muldiv(0b111, rd, rs1, rs2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::registers::{A0, A1, A2};

    #[test]
    fn mul_uses_muldiv_funct7() {
        let mut asm = Assembler::rv32im(16, None);
        asm.mul(A0, A1, A2);
        let word = u32::from_le_bytes(asm.generate()[0..4].try_into().unwrap());
        assert_eq!(word >> 25, FUNCT7_MULDIV);
        assert_eq!((word >> 12) & 0b111, 0b000);
    }

    #[test]
    #[should_panic(expected = "M")]
    fn mul_without_m_panics() {
        let mut asm = Assembler::rv32i(16, None);
        asm.mul(A0, A1, A2);
    }
}
