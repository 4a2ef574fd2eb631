//! Pure bit-packing for the RV32C (compressed) instruction forms. Mirrors
//! [`crate::format`]'s role for the base ISA: every function here takes
//! already-validated field values — legality predicates live in the
//! mnemonic layer ([`crate::mnemonics::compress`]) — and produces the final
//! 16-bit word.
//!
//! Field layouts follow the RISC-V C extension quadrant tables (CR/CI/CSS/
//! CIW/CL/CS/CA/CB/CJ). Comments on each function give the bit-by-bit
//! scatter since these are the most asymmetric, error-prone encodings in the
//! whole ISA.

use crate::bits::merge_bitfields;

const OP_Q0: u32 = 0b00;
const OP_Q1: u32 = 0b01;
const OP_Q2: u32 = 0b10;

/// CIW-format: `C.ADDI4SPN`. `funct3=000 | nzuimm[5:4|9:6|2|3] | rd' | op=00`.
#[must_use]
pub(crate) const fn addi4spn(rd3: u32, nzuimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q0, 0..2),
        (2..5, rd3, 0..3),
        (5..6, nzuimm, 3..4),
        (6..7, nzuimm, 2..3),
        (7..11, nzuimm, 6..10),
        (11..13, nzuimm, 4..6),
        (13..16, 0b000, 0..3),
    ])
}

/// CL-format: `C.LW`. `funct3=010 | imm[5:3] | rs1' | imm[2|6] | rd' | op=00`.
#[must_use]
pub(crate) const fn lw(rd3: u32, rs1_3: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q0, 0..2),
        (2..5, rd3, 0..3),
        (5..6, uimm, 6..7),
        (6..7, uimm, 2..3),
        (7..10, rs1_3, 0..3),
        (10..13, uimm, 3..6),
        (13..16, 0b010, 0..3),
    ])
}

/// CS-format: `C.SW`. Same layout as [`lw`] with `rs2'` instead of `rd'`.
#[must_use]
pub(crate) const fn sw(rs2_3: u32, rs1_3: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q0, 0..2),
        (2..5, rs2_3, 0..3),
        (5..6, uimm, 6..7),
        (6..7, uimm, 2..3),
        (7..10, rs1_3, 0..3),
        (10..13, uimm, 3..6),
        (13..16, 0b110, 0..3),
    ])
}

/// CL-format: `C.FLW`. `funct3=011`, layout otherwise identical to [`lw`].
#[must_use]
pub(crate) const fn flw(rd3: u32, rs1_3: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q0, 0..2),
        (2..5, rd3, 0..3),
        (5..6, uimm, 6..7),
        (6..7, uimm, 2..3),
        (7..10, rs1_3, 0..3),
        (10..13, uimm, 3..6),
        (13..16, 0b011, 0..3),
    ])
}

/// CS-format: `C.FSW`. `funct3=111`, layout otherwise identical to [`sw`].
#[must_use]
pub(crate) const fn fsw(rs2_3: u32, rs1_3: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q0, 0..2),
        (2..5, rs2_3, 0..3),
        (5..6, uimm, 6..7),
        (6..7, uimm, 2..3),
        (7..10, rs1_3, 0..3),
        (10..13, uimm, 3..6),
        (13..16, 0b111, 0..3),
    ])
}

/// CL-format: `C.FLD`. `funct3=001 | imm[5:3] | rs1' | imm[7:6] | rd' | op=00`
/// (8-byte aligned, low 3 bits implicitly zero).
#[must_use]
pub(crate) const fn fld(rd3: u32, rs1_3: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q0, 0..2),
        (2..5, rd3, 0..3),
        (5..7, uimm, 6..8),
        (7..10, rs1_3, 0..3),
        (10..13, uimm, 3..6),
        (13..16, 0b001, 0..3),
    ])
}

/// CS-format: `C.FSD`. `funct3=101`, layout otherwise identical to [`fld`].
#[must_use]
pub(crate) const fn fsd(rs2_3: u32, rs1_3: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q0, 0..2),
        (2..5, rs2_3, 0..3),
        (5..7, uimm, 6..8),
        (7..10, rs1_3, 0..3),
        (10..13, uimm, 3..6),
        (13..16, 0b101, 0..3),
    ])
}

/// CI-format: `C.ADDI`. `funct3=000 | imm[5] | rd/rs1 | imm[4:0] | op=01`.
#[must_use]
pub(crate) const fn addi(rd: u32, imm: u32) -> u16 {
    ci(0b000, rd, imm)
}

/// CI-format: `C.LI`. `funct3=010`.
#[must_use]
pub(crate) const fn li(rd: u32, imm: u32) -> u16 {
    ci(0b010, rd, imm)
}

/// CI-format: `C.LUI`. `funct3=011`, `rd` is the destination (never `x0`/`sp`).
#[must_use]
pub(crate) const fn lui(rd: u32, nzimm: u32) -> u16 {
    ci(0b011, rd, nzimm)
}

/// CI-format: `C.SLLI`. `funct3=000`, quadrant 2 (`op=10`).
#[must_use]
pub(crate) const fn slli(rd: u32, shamt: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..7, shamt, 0..5),
        (7..12, rd, 0..5),
        (12..13, shamt, 5..6),
        (13..16, 0b000, 0..3),
    ])
}

/// CI-format: `C.ADDI16SP`. `funct3=011`, `rd` is implicitly `sp`.
/// `imm[9|4|6|8:7|5]` scattered across the CI immediate field.
#[must_use]
pub(crate) const fn addi16sp(nzimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q1, 0..2),
        (2..3, nzimm, 5..6),
        (3..5, nzimm, 7..9),
        (5..6, nzimm, 6..7),
        (6..7, nzimm, 4..5),
        (7..12, 2, 0..5),
        (12..13, nzimm, 9..10),
        (13..16, 0b011, 0..3),
    ])
}

/// CI-format: `C.LWSP`. `funct3=010 | imm[5] | rd | imm[4:2|7:6] | op=10`.
#[must_use]
pub(crate) const fn lwsp(rd: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..4, uimm, 6..8),
        (4..7, uimm, 2..5),
        (7..12, rd, 0..5),
        (12..13, uimm, 5..6),
        (13..16, 0b010, 0..3),
    ])
}

/// CSS-format: `C.SWSP`. `funct3=110 | imm[5:2|7:6] | rs2 | op=10`.
#[must_use]
pub(crate) const fn swsp(rs2: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..7, rs2, 0..5),
        (7..9, uimm, 6..8),
        (9..13, uimm, 2..6),
        (13..16, 0b110, 0..3),
    ])
}

/// CI-format: `C.FLWSP`. `funct3=011`, layout identical to [`lwsp`].
#[must_use]
pub(crate) const fn flwsp(rd: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..4, uimm, 6..8),
        (4..7, uimm, 2..5),
        (7..12, rd, 0..5),
        (12..13, uimm, 5..6),
        (13..16, 0b011, 0..3),
    ])
}

/// CSS-format: `C.FSWSP`. `funct3=111`, layout identical to [`swsp`].
#[must_use]
pub(crate) const fn fswsp(rs2: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..7, rs2, 0..5),
        (7..9, uimm, 6..8),
        (9..13, uimm, 2..6),
        (13..16, 0b111, 0..3),
    ])
}

/// CI-format: `C.FLDSP`. `funct3=001 | imm[5] | rd | imm[4:3|8:6] | op=10`.
#[must_use]
pub(crate) const fn fldsp(rd: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..5, uimm, 6..9),
        (5..7, uimm, 3..5),
        (7..12, rd, 0..5),
        (12..13, uimm, 5..6),
        (13..16, 0b001, 0..3),
    ])
}

/// CSS-format: `C.FSDSP`. `funct3=101 | imm[5:3|8:6] | rs2 | op=10`.
#[must_use]
pub(crate) const fn fsdsp(rs2: u32, uimm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..7, rs2, 0..5),
        (7..10, uimm, 6..9),
        (10..13, uimm, 3..6),
        (13..16, 0b101, 0..3),
    ])
}

/// CR-format: `C.MV`. `funct4=1000 | rd | rs2 | op=10`.
#[must_use]
pub(crate) const fn mv(rd: u32, rs2: u32) -> u16 {
    cr(0b1000, rd, rs2)
}

/// CR-format: `C.ADD`. `funct4=1001`.
#[must_use]
pub(crate) const fn add(rd: u32, rs2: u32) -> u16 {
    cr(0b1001, rd, rs2)
}

/// CR-format: `C.JR`. `funct4=1000`, `rs2=0`.
#[must_use]
pub(crate) const fn jr(rs1: u32) -> u16 {
    cr(0b1000, rs1, 0)
}

/// CR-format: `C.JALR`. `funct4=1001`, `rs2=0`.
#[must_use]
pub(crate) const fn jalr(rs1: u32) -> u16 {
    cr(0b1001, rs1, 0)
}

/// `C.NOP`: `C.ADDI x0, 0`, i.e. `addi(0, 0)`.
#[must_use]
pub(crate) const fn nop() -> u16 {
    addi(0, 0)
}

/// CA-format: `C.SUB`. `funct6=100011 | rd'/rs1' | funct2=00 | rs2' | op=01`.
#[must_use]
pub(crate) const fn sub(rd3: u32, rs2_3: u32) -> u16 {
    ca(0b00, rd3, rs2_3)
}

/// CA-format: `C.XOR`. `funct2=01`.
#[must_use]
pub(crate) const fn xor(rd3: u32, rs2_3: u32) -> u16 {
    ca(0b01, rd3, rs2_3)
}

/// CA-format: `C.OR`. `funct2=10`.
#[must_use]
pub(crate) const fn or(rd3: u32, rs2_3: u32) -> u16 {
    ca(0b10, rd3, rs2_3)
}

/// CA-format: `C.AND`. `funct2=11`.
#[must_use]
pub(crate) const fn and(rd3: u32, rs2_3: u32) -> u16 {
    ca(0b11, rd3, rs2_3)
}

/// CB-format: `C.SRLI`. `funct3=100 | 0 | funct2=00 | rd'/rs1' | shamt | op=01`.
#[must_use]
pub(crate) const fn srli(rd3: u32, shamt: u32) -> u16 {
    cb_shift(0b00, rd3, shamt)
}

/// CB-format: `C.SRAI`. `funct2=01`.
#[must_use]
pub(crate) const fn srai(rd3: u32, shamt: u32) -> u16 {
    cb_shift(0b01, rd3, shamt)
}

/// CB-format: `C.ANDI`. `funct2=10`, `imm[5]`/`imm[4:0]` in place of `shamt`.
#[must_use]
pub(crate) const fn andi(rd3: u32, imm: u32) -> u16 {
    cb_shift(0b10, rd3, imm)
}

/// CB-format: `C.BEQZ`. `funct3=110 | imm[8|4:3] | rs1' | imm[7:6|2:1|5] | op=01`.
#[must_use]
pub(crate) const fn beqz(rs1_3: u32, imm: u32) -> u16 {
    cb_branch(0b110, rs1_3, imm)
}

/// CB-format: `C.BNEZ`. `funct3=111`.
#[must_use]
pub(crate) const fn bnez(rs1_3: u32, imm: u32) -> u16 {
    cb_branch(0b111, rs1_3, imm)
}

/// CJ-format: `C.J`. `funct3=101`, `rd` implicitly `x0`.
#[must_use]
pub(crate) const fn j(imm: u32) -> u16 {
    cj(0b101, imm)
}

/// CJ-format: `C.JAL`. `funct3=001`, `rd` implicitly `x1` (RV32 only).
#[must_use]
pub(crate) const fn jal(imm: u32) -> u16 {
    cj(0b001, imm)
}

const fn ci(funct3: u32, rd: u32, imm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q1, 0..2),
        (2..7, imm, 0..5),
        (7..12, rd, 0..5),
        (12..13, imm, 5..6),
        (13..16, funct3, 0..3),
    ])
}

const fn cr(funct4: u32, rd: u32, rs2: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q2, 0..2),
        (2..7, rs2, 0..5),
        (7..12, rd, 0..5),
        (12..16, funct4, 0..4),
    ])
}

const fn ca(funct2: u32, rd3: u32, rs2_3: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q1, 0..2),
        (2..5, rs2_3, 0..3),
        (5..7, funct2, 0..2),
        (7..10, rd3, 0..3),
        (10..16, 0b100011, 0..6),
    ])
}

const fn cb_shift(funct2: u32, rd3: u32, amount: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q1, 0..2),
        (2..7, amount, 0..5),
        (7..10, rd3, 0..3),
        (10..12, funct2, 0..2),
        (12..13, amount, 5..6),
        (13..16, 0b100, 0..3),
    ])
}

const fn cb_branch(funct3: u32, rs1_3: u32, imm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q1, 0..2),
        (2..3, imm, 5..6),
        (3..5, imm, 1..3),
        (5..7, imm, 6..8),
        (7..10, rs1_3, 0..3),
        (10..12, imm, 3..5),
        (12..13, imm, 8..9),
        (13..16, funct3, 0..3),
    ])
}

const fn cj(funct3: u32, imm: u32) -> u16 {
    merge16(&[
        (0..2, OP_Q1, 0..2),
        (2..3, imm, 5..6),
        (3..6, imm, 1..4),
        (6..7, imm, 7..8),
        (7..8, imm, 6..7),
        (8..9, imm, 10..11),
        (9..11, imm, 8..10),
        (11..12, imm, 4..5),
        (12..13, imm, 11..12),
        (13..16, funct3, 0..3),
    ])
}

/// Same bit-merging rule as [`crate::bits::merge_bitfields`] but for a
/// 16-bit result.
const fn merge16<const N: usize>(bitfields: &[(std::ops::Range<u32>, u32, std::ops::Range<u32>); N]) -> u16 {
    merge_bitfields(bitfields) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nop_is_addi_x0_zero() {
        assert_eq!(nop(), addi(0, 0));
    }

    #[test]
    fn addi_places_rd_and_immediate() {
        let word = addi(5, 0b11_1111 & 0x1F);
        assert_eq!(word & 0b11, OP_Q1 as u16);
        assert_eq!((word >> 7) & 0x1F, 5);
    }

    #[test]
    fn jr_and_jalr_differ_only_by_funct4_lsb() {
        assert_ne!(jr(1), jalr(1));
        assert_eq!(jr(1) & 0x7F, jalr(1) & 0x7F);
    }

    #[test]
    fn cj_roundtrips_displacement() {
        let displacement: i32 = -18;
        let word = j(displacement as u32);
        let imm = (((word >> 12) & 1) << 11)
            | (((word >> 8) & 0b11) << 8)
            | (((word >> 11) & 1) << 4)
            | (((word >> 2) & 1) << 5)
            | (((word >> 7) & 1) << 6)
            | (((word >> 6) & 1) << 7)
            | (((word >> 9) & 1) << 9)
            | (((word >> 3) & 0b111) << 1);
        let sign_extended = ((imm as i32) << 20) >> 20;
        assert_eq!(sign_extended, displacement);
    }

    #[test]
    fn cb_branch_roundtrips_displacement() {
        let displacement: i32 = -10;
        let word = beqz(0, displacement as u32);
        let imm8 = (word >> 12) & 1;
        let imm4_3 = (word >> 10) & 0b11;
        let imm7_6 = (word >> 5) & 0b11;
        let imm2_1 = (word >> 3) & 0b11;
        let imm5 = (word >> 2) & 1;
        let raw = (imm8 << 8) | (imm7_6 << 6) | (imm5 << 5) | (imm4_3 << 3) | (imm2_1 << 1);
        let sign_extended = ((raw as i32) << 23) >> 23;
        assert_eq!(sign_extended, displacement);
    }

    #[quickcheck_macros::quickcheck]
    fn cb_branch_roundtrips_any_legal_displacement(raw: i32, rs1_3: u8) -> quickcheck::TestResult {
        let displacement = (raw % 512) & !1;
        if !(-256..=254).contains(&displacement) {
            return quickcheck::TestResult::discard();
        }
        let rs1_3 = u32::from(rs1_3 % 8);
        let word = beqz(rs1_3, displacement as u32);
        let imm8 = (word >> 12) & 1;
        let imm4_3 = (word >> 10) & 0b11;
        let imm7_6 = (word >> 5) & 0b11;
        let imm2_1 = (word >> 3) & 0b11;
        let imm5 = (word >> 2) & 1;
        let raw_imm = (imm8 << 8) | (imm7_6 << 6) | (imm5 << 5) | (imm4_3 << 3) | (imm2_1 << 1);
        let decoded = ((raw_imm as i32) << 23) >> 23;
        quickcheck::TestResult::from_bool(decoded == displacement && ((word >> 7) & 0b111) as u32 == rs1_3)
    }

    #[quickcheck_macros::quickcheck]
    fn cj_roundtrips_any_legal_displacement(raw: i32) -> quickcheck::TestResult {
        let displacement = (raw % 4096) & !1;
        if !(-2048..=2046).contains(&displacement) {
            return quickcheck::TestResult::discard();
        }
        let word = j(displacement as u32);
        let imm = (((word >> 12) & 1) << 11)
            | (((word >> 8) & 0b11) << 8)
            | (((word >> 11) & 1) << 4)
            | (((word >> 2) & 1) << 5)
            | (((word >> 7) & 1) << 6)
            | (((word >> 6) & 1) << 7)
            | (((word >> 9) & 1) << 9)
            | (((word >> 3) & 0b111) << 1);
        let decoded = ((imm as i32) << 20) >> 20;
        quickcheck::TestResult::from_bool(decoded == displacement)
    }
}
