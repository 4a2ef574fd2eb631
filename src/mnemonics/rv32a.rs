//! Atomic memory operations (the `A` extension). Every mnemonic shares the
//! `amoop` opcode, `funct3 = 0b010` (word-sized), and a `funct5 | aq | rl`
//! field built from a fixed `aq=0, rl=0` since this assembler has no
//! ordering-annotation syntax — callers who need acquire/release semantics
//! fence around the region explicitly. RV32C has no compressed form for any
//! of these.

use crate::assembler::Assembler;
use crate::features::FeatureSet;
use crate::registers::Register;

const OP_AMO: u32 = 0x2F;
const FUNCT3_W: u32 = 0b010;

const FUNCT5_LR: u32 = 0b00010;
const FUNCT5_SC: u32 = 0b00011;
const FUNCT5_SWAP: u32 = 0b00001;
const FUNCT5_ADD: u32 = 0b00000;
const FUNCT5_XOR: u32 = 0b00100;
const FUNCT5_AND: u32 = 0b01100;
const FUNCT5_OR: u32 = 0b01000;
const FUNCT5_MIN: u32 = 0b10000;
const FUNCT5_MAX: u32 = 0b10100;
const FUNCT5_MINU: u32 = 0b11000;
const FUNCT5_MAXU: u32 = 0b11100;

const fn amo_word(funct5: u32, rd: u32, rs1: u32, rs2: u32) -> u32 {
    let funct7 = funct5 << 2;
    crate::format::r_type(OP_AMO, rd, FUNCT3_W, rs1, rs2, funct7)
}

impl<'a> Assembler<'a> {
    fn amo(&mut self, funct5: u32, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.features.require(FeatureSet::A);
        self.env.emit_word(amo_word(funct5, rd.into_u32(), rs1.into_u32(), rs2.into_u32()));
        self
    }

    /// `lr.w rd, (rs1)`. `rs2` is wired to `x0` per the ISA's encoding.
    pub fn lr_w(&mut self, rd: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_LR, rd, rs1, crate::registers::X0)
    }

    /// `sc.w rd, rs2, (rs1)`.
    pub fn sc_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_SC, rd, rs1, rs2)
    }

    /// `amoswap.w rd, rs2, (rs1)`.
    pub fn amoswap_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_SWAP, rd, rs1, rs2)
    }

    /// `amoadd.w rd, rs2, (rs1)`.
    pub fn amoadd_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_ADD, rd, rs1, rs2)
    }

    /// `amoxor.w rd, rs2, (rs1)`.
    pub fn amoxor_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_XOR, rd, rs1, rs2)
    }

    /// `amoand.w rd, rs2, (rs1)`.
    pub fn amoand_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_AND, rd, rs1, rs2)
    }

    /// `amoor.w rd, rs2, (rs1)`.
    pub fn amoor_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_OR, rd, rs1, rs2)
    }

    /// `amomin.w rd, rs2, (rs1)`.
    pub fn amomin_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_MIN, rd, rs1, rs2)
    }

    /// `amomax.w rd, rs2, (rs1)`.
    pub fn amomax_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_MAX, rd, rs1, rs2)
    }

    /// `amominu.w rd, rs2, (rs1)`.
    pub fn amominu_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_MINU, rd, rs1, rs2)
    }

    /// `amomaxu.w rd, rs2, (rs1)`.
    pub fn amomaxu_w(&mut self, rd: Register, rs2: Register, rs1: Register) -> &mut Self {
        self.amo(FUNCT5_MAXU, rd, rs1, rs2)
    }
}
