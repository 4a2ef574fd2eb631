//! Single- and double-precision floating point (the `F` and `D` extensions).
//!
//! Every arithmetic/compare/convert/move mnemonic shares opcode `0x53`
//! (`OP-FP`); the precision discriminator (`00` = single, `01` = double)
//! occupies `funct7[1:0]` and the operation family occupies `funct7[6:2]` —
//! the same bit positions the fused multiply-add family uses for a genuine
//! `rs3` register, so one R-type encoder (reused from [`crate::format`])
//! covers both: `funct7 = (rs3_field << 2) | precision`. For most mnemonics
//! `rs3_field` is a fixed 5-bit family tag (mirroring the "named `f`
//! constant" trick `RV32_asm_float.hpp` uses for the same purpose); only the
//! four `fmadd`-family mnemonics pass a real register there. Loads and
//! stores use the dedicated `0x07`/`0x27` opcodes and compress exactly like
//! `lw`/`sw`, just with the float-specific CL/CS/CI/CSS forms from
//! [`crate::compressed`].
//!
//! `F` and `D` are checked independently per mnemonic (`.s` requires `F`,
//! `.d` requires `D`) — enabling `D` does not imply `F`, matching the
//! original's separate `IS_FLOAT_ONLY`/`IS_DOUBLE_ONLY` assertions.

use crate::assembler::Assembler;
use crate::compressed;
use crate::features::FeatureSet;
use crate::format;
use crate::operand::Offset;
use crate::registers::{FRegister, Register, SP};
use crate::rounding::RoundingMode;
use crate::util::{i32_in_range, u32_in_range};

const OP_FP: u32 = 0x53;
const OP_LOAD_FP: u32 = 0x07;
const OP_STORE_FP: u32 = 0x27;

const PR_S: u32 = 0b00;
const PR_D: u32 = 0b01;

const F5_ADD: u32 = 0x00;
const F5_SUB: u32 = 0x01;
const F5_MUL: u32 = 0x02;
const F5_DIV: u32 = 0x03;
const F5_SGNJ: u32 = 0x04;
const F5_MINMAX: u32 = 0x05;
const F5_CVT_FP_FP: u32 = 0x08;
const F5_SQRT: u32 = 0x0B;
const F5_CMP: u32 = 0x14;
const F5_CVT_W: u32 = 0x18;
const F5_CVT_FP_W: u32 = 0x1A;
const F5_CLASS_MV_X: u32 = 0x1C;
const F5_MV_W_X: u32 = 0x1E;

const FUNCT3_SGNJ: u32 = 0b000;
const FUNCT3_SGNJN: u32 = 0b001;
const FUNCT3_SGNJX: u32 = 0b010;
const FUNCT3_MIN: u32 = 0b000;
const FUNCT3_MAX: u32 = 0b001;
const FUNCT3_FLE: u32 = 0b000;
const FUNCT3_FLT: u32 = 0b001;
const FUNCT3_FEQ: u32 = 0b010;
const FUNCT3_FMV: u32 = 0b000;
const FUNCT3_FCLASS: u32 = 0b001;

const OP_FMADD: u32 = 0b1000011;
const OP_FMSUB: u32 = 0b1000111;
const OP_FNMSUB: u32 = 0b1001011;
const OP_FNMADD: u32 = 0b1001111;

impl<'a> Assembler<'a> {
    fn c(&self) -> bool {
        self.features.contains(FeatureSet::C)
    }

    /// Every `OP-FP`-family word: the R-type layout with `rs3_field` (a real
    /// register for `fmadd`-family mnemonics, a fixed family tag otherwise)
    /// and `precision` packed into `funct7`.
    fn fp(&mut self, opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, rs3_field: u32, precision: u32) -> &mut Self {
        let word = format::r_type(opcode, rd, funct3, rs1, rs2, (rs3_field << 2) | precision);
        self.env.emit_word(word);
        self
    }

    fn require_f(&mut self) {
        self.features.require(FeatureSet::F);
    }

    fn require_d(&mut self) {
        self.features.require(FeatureSet::D);
    }

    // ---- loads / stores -------------------------------------------------

    /// `flw rd, offset(rs1)`. Compresses to `C.FLW`/`C.FLWSP` when legal.
    pub fn flw(&mut self, rd: FRegister, addr: Offset<Register>) -> &mut Self {
        self.require_f();
        let offset = i32::from(addr.offset());
        assert!(i32_in_range(offset, -2048, 2047), "flw offset out of range");
        if self.c() && addr.base() == SP && u32_in_range(offset as u32, 0, 252) && offset % 4 == 0 {
            self.env.emit_half(compressed::flwsp(rd.into_u32(), offset as u32));
            return self;
        }
        if self.c() && rd.is_compressed() && addr.base().is_compressed() && u32_in_range(offset as u32, 0, 124) && offset % 4 == 0 {
            self.env.emit_half(compressed::flw(
                u32::from(rd.compressed_index().unwrap()),
                u32::from(addr.base().compressed_index().unwrap()),
                offset as u32,
            ));
            return self;
        }
        let word = format::i_type(OP_LOAD_FP, rd.into_u32(), 0b010, addr.base().into_u32(), offset);
        self.env.emit_word(word);
        self
    }

    /// `fsw rs2, offset(rs1)`. Compresses to `C.FSW`/`C.FSWSP` when legal.
    pub fn fsw(&mut self, rs2: FRegister, addr: Offset<Register>) -> &mut Self {
        self.require_f();
        let offset = i32::from(addr.offset());
        assert!(i32_in_range(offset, -2048, 2047), "fsw offset out of range");
        if self.c() && addr.base() == SP && u32_in_range(offset as u32, 0, 252) && offset % 4 == 0 {
            self.env.emit_half(compressed::fswsp(rs2.into_u32(), offset as u32));
            return self;
        }
        if self.c() && rs2.is_compressed() && addr.base().is_compressed() && u32_in_range(offset as u32, 0, 124) && offset % 4 == 0 {
            self.env.emit_half(compressed::fsw(
                u32::from(rs2.compressed_index().unwrap()),
                u32::from(addr.base().compressed_index().unwrap()),
                offset as u32,
            ));
            return self;
        }
        let word = format::s_type(OP_STORE_FP, 0b010, addr.base().into_u32(), rs2.into_u32(), offset);
        self.env.emit_word(word);
        self
    }

    /// `fld rd, offset(rs1)`. Compresses to `C.FLD`/`C.FLDSP` when legal.
    pub fn fld(&mut self, rd: FRegister, addr: Offset<Register>) -> &mut Self {
        self.require_d();
        let offset = i32::from(addr.offset());
        assert!(i32_in_range(offset, -2048, 2047), "fld offset out of range");
        if self.c() && addr.base() == SP && u32_in_range(offset as u32, 0, 504) && offset % 8 == 0 {
            self.env.emit_half(compressed::fldsp(rd.into_u32(), offset as u32));
            return self;
        }
        if self.c() && rd.is_compressed() && addr.base().is_compressed() && u32_in_range(offset as u32, 0, 248) && offset % 8 == 0 {
            self.env.emit_half(compressed::fld(
                u32::from(rd.compressed_index().unwrap()),
                u32::from(addr.base().compressed_index().unwrap()),
                offset as u32,
            ));
            return self;
        }
        let word = format::i_type(OP_LOAD_FP, rd.into_u32(), 0b011, addr.base().into_u32(), offset);
        self.env.emit_word(word);
        self
    }

    /// `fsd rs2, offset(rs1)`. Compresses to `C.FSD`/`C.FSDSP` when legal.
    pub fn fsd(&mut self, rs2: FRegister, addr: Offset<Register>) -> &mut Self {
        self.require_d();
        let offset = i32::from(addr.offset());
        assert!(i32_in_range(offset, -2048, 2047), "fsd offset out of range");
        if self.c() && addr.base() == SP && u32_in_range(offset as u32, 0, 504) && offset % 8 == 0 {
            self.env.emit_half(compressed::fsdsp(rs2.into_u32(), offset as u32));
            return self;
        }
        if self.c() && rs2.is_compressed() && addr.base().is_compressed() && u32_in_range(offset as u32, 0, 248) && offset % 8 == 0 {
            self.env.emit_half(compressed::fsd(
                u32::from(rs2.compressed_index().unwrap()),
                u32::from(addr.base().compressed_index().unwrap()),
                offset as u32,
            ));
            return self;
        }
        let word = format::s_type(OP_STORE_FP, 0b011, addr.base().into_u32(), rs2.into_u32(), offset);
        self.env.emit_word(word);
        self
    }

    // ---- fused multiply-add family ---------------------------------------

    /// `fmadd.s rd, rs1, rs2, rs3`.
    pub fn fmadd_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FMADD, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_S)
    }

    /// `fmadd.d rd, rs1, rs2, rs3`.
    pub fn fmadd_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FMADD, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_D)
    }

    /// `fmsub.s rd, rs1, rs2, rs3`.
    pub fn fmsub_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FMSUB, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_S)
    }

    /// `fmsub.d rd, rs1, rs2, rs3`.
    pub fn fmsub_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FMSUB, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_D)
    }

    /// `fnmsub.s rd, rs1, rs2, rs3`.
    pub fn fnmsub_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FNMSUB, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_S)
    }

    /// `fnmsub.d rd, rs1, rs2, rs3`.
    pub fn fnmsub_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FNMSUB, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_D)
    }

    /// `fnmadd.s rd, rs1, rs2, rs3`.
    pub fn fnmadd_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FNMADD, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_S)
    }

    /// `fnmadd.d rd, rs1, rs2, rs3`.
    pub fn fnmadd_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rs3: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FNMADD, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), rs3.into_u32(), PR_D)
    }

    // ---- arithmetic --------------------------------------------------------

    /// `fadd.s rd, rs1, rs2`.
    pub fn fadd_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_ADD, PR_S)
    }

    /// `fadd.d rd, rs1, rs2`.
    pub fn fadd_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_ADD, PR_D)
    }

    /// `fsub.s rd, rs1, rs2`.
    pub fn fsub_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_SUB, PR_S)
    }

    /// `fsub.d rd, rs1, rs2`.
    pub fn fsub_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_SUB, PR_D)
    }

    /// `fmul.s rd, rs1, rs2`.
    pub fn fmul_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_MUL, PR_S)
    }

    /// `fmul.d rd, rs1, rs2`.
    pub fn fmul_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_MUL, PR_D)
    }

    /// `fdiv.s rd, rs1, rs2`.
    pub fn fdiv_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_DIV, PR_S)
    }

    /// `fdiv.d rd, rs1, rs2`.
    pub fn fdiv_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), rs2.into_u32(), F5_DIV, PR_D)
    }

    /// `fsqrt.s rd, rs1`. `rs2` is wired to `f0` per the ISA's encoding.
    pub fn fsqrt_s(&mut self, rd: FRegister, rs1: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 0, F5_SQRT, PR_S)
    }

    /// `fsqrt.d rd, rs1`.
    pub fn fsqrt_d(&mut self, rd: FRegister, rs1: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 0, F5_SQRT, PR_D)
    }

    // ---- sign injection and its pseudo-ops --------------------------------

    /// `fsgnj.s rd, rs1, rs2`. Identical bytes to `fmv.s rd, rs1` when
    /// `rs1 == rs2`.
    pub fn fsgnj_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_SGNJ, rs1.into_u32(), rs2.into_u32(), F5_SGNJ, PR_S)
    }

    /// `fsgnj.d rd, rs1, rs2`.
    pub fn fsgnj_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_SGNJ, rs1.into_u32(), rs2.into_u32(), F5_SGNJ, PR_D)
    }

    /// `fsgnjn.s rd, rs1, rs2`. Identical bytes to `fneg.s rd, rs1` when
    /// `rs1 == rs2`.
    pub fn fsgnjn_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_SGNJN, rs1.into_u32(), rs2.into_u32(), F5_SGNJ, PR_S)
    }

    /// `fsgnjn.d rd, rs1, rs2`.
    pub fn fsgnjn_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_SGNJN, rs1.into_u32(), rs2.into_u32(), F5_SGNJ, PR_D)
    }

    /// `fsgnjx.s rd, rs1, rs2`. Identical bytes to `fabs.s rd, rs1` when
    /// `rs1 == rs2`.
    pub fn fsgnjx_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_SGNJX, rs1.into_u32(), rs2.into_u32(), F5_SGNJ, PR_S)
    }

    /// `fsgnjx.d rd, rs1, rs2`.
    pub fn fsgnjx_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_SGNJX, rs1.into_u32(), rs2.into_u32(), F5_SGNJ, PR_D)
    }

    /// `fmv.s rd, rs1` → `fsgnj.s rd, rs1, rs1`.
    pub fn fmv_s(&mut self, rd: FRegister, rs1: FRegister) -> &mut Self {
        self.fsgnj_s(rd, rs1, rs1)
    }

    /// `fmv.d rd, rs1` → `fsgnj.d rd, rs1, rs1`.
    pub fn fmv_d(&mut self, rd: FRegister, rs1: FRegister) -> &mut Self {
        self.fsgnj_d(rd, rs1, rs1)
    }

    /// `fneg.s rd, rs1` → `fsgnjn.s rd, rs1, rs1`.
    pub fn fneg_s(&mut self, rd: FRegister, rs1: FRegister) -> &mut Self {
        self.fsgnjn_s(rd, rs1, rs1)
    }

    /// `fneg.d rd, rs1` → `fsgnjn.d rd, rs1, rs1`.
    pub fn fneg_d(&mut self, rd: FRegister, rs1: FRegister) -> &mut Self {
        self.fsgnjn_d(rd, rs1, rs1)
    }

    /// `fabs.s rd, rs1` → `fsgnjx.s rd, rs1, rs1`.
    pub fn fabs_s(&mut self, rd: FRegister, rs1: FRegister) -> &mut Self {
        self.fsgnjx_s(rd, rs1, rs1)
    }

    /// `fabs.d rd, rs1` → `fsgnjx.d rd, rs1, rs1`.
    pub fn fabs_d(&mut self, rd: FRegister, rs1: FRegister) -> &mut Self {
        self.fsgnjx_d(rd, rs1, rs1)
    }

    // ---- min / max -----------------------------------------------------

    /// `fmin.s rd, rs1, rs2`.
    pub fn fmin_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_MIN, rs1.into_u32(), rs2.into_u32(), F5_MINMAX, PR_S)
    }

    /// `fmin.d rd, rs1, rs2`.
    pub fn fmin_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_MIN, rs1.into_u32(), rs2.into_u32(), F5_MINMAX, PR_D)
    }

    /// `fmax.s rd, rs1, rs2`.
    pub fn fmax_s(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_MAX, rs1.into_u32(), rs2.into_u32(), F5_MINMAX, PR_S)
    }

    /// `fmax.d rd, rs1, rs2`.
    pub fn fmax_d(&mut self, rd: FRegister, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_MAX, rs1.into_u32(), rs2.into_u32(), F5_MINMAX, PR_D)
    }

    // ---- conversions -----------------------------------------------------

    /// `fcvt.w.s rd, rs1`.
    pub fn fcvt_w_s(&mut self, rd: Register, rs1: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 0, F5_CVT_W, PR_S)
    }

    /// `fcvt.w.d rd, rs1`.
    pub fn fcvt_w_d(&mut self, rd: Register, rs1: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 0, F5_CVT_W, PR_D)
    }

    /// `fcvt.wu.s rd, rs1`.
    pub fn fcvt_wu_s(&mut self, rd: Register, rs1: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 1, F5_CVT_W, PR_S)
    }

    /// `fcvt.wu.d rd, rs1`.
    pub fn fcvt_wu_d(&mut self, rd: Register, rs1: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 1, F5_CVT_W, PR_D)
    }

    /// `fcvt.s.w rd, rs1`.
    pub fn fcvt_s_w(&mut self, rd: FRegister, rs1: Register, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 0, F5_CVT_FP_W, PR_S)
    }

    /// `fcvt.s.wu rd, rs1`.
    pub fn fcvt_s_wu(&mut self, rd: FRegister, rs1: Register, rm: RoundingMode) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 1, F5_CVT_FP_W, PR_S)
    }

    /// `fcvt.s.d rd, rs1`.
    pub fn fcvt_s_d(&mut self, rd: FRegister, rs1: FRegister, rm: RoundingMode) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), rm.into_u32(), rs1.into_u32(), 1, F5_CVT_FP_FP, PR_S)
    }

    /// `fcvt.d.w rd, rs1`. Always emitted with `rne`: the conversion is
    /// exact and some disassemblers reject any other mode.
    pub fn fcvt_d_w(&mut self, rd: FRegister, rs1: Register) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), RoundingMode::Rne.into_u32(), rs1.into_u32(), 0, F5_CVT_FP_W, PR_D)
    }

    /// `fcvt.d.wu rd, rs1`. Always emitted with `rne`.
    pub fn fcvt_d_wu(&mut self, rd: FRegister, rs1: Register) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), RoundingMode::Rne.into_u32(), rs1.into_u32(), 1, F5_CVT_FP_W, PR_D)
    }

    /// `fcvt.d.s rd, rs1`. Always emitted with `rne`.
    pub fn fcvt_d_s(&mut self, rd: FRegister, rs1: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), RoundingMode::Rne.into_u32(), rs1.into_u32(), 0, F5_CVT_FP_FP, PR_D)
    }

    // ---- moves between integer and float register files ------------------

    /// `fmv.x.w rd, rs1`: the raw bits of `rs1`, moved into a GP register.
    pub fn fmv_x_w(&mut self, rd: Register, rs1: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FMV, rs1.into_u32(), 0, F5_CLASS_MV_X, PR_S)
    }

    /// `fmv.w.x rd, rs1`: the raw bits of `rs1`, moved into an FP register.
    pub fn fmv_w_x(&mut self, rd: FRegister, rs1: Register) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FMV, rs1.into_u32(), 0, F5_MV_W_X, PR_S)
    }

    // ---- compares ----------------------------------------------------------

    /// `feq.s rd, rs1, rs2`. `rd` is a general-purpose register.
    pub fn feq_s(&mut self, rd: Register, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FEQ, rs1.into_u32(), rs2.into_u32(), F5_CMP, PR_S)
    }

    /// `feq.d rd, rs1, rs2`.
    pub fn feq_d(&mut self, rd: Register, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FEQ, rs1.into_u32(), rs2.into_u32(), F5_CMP, PR_D)
    }

    /// `flt.s rd, rs1, rs2`.
    pub fn flt_s(&mut self, rd: Register, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FLT, rs1.into_u32(), rs2.into_u32(), F5_CMP, PR_S)
    }

    /// `flt.d rd, rs1, rs2`.
    pub fn flt_d(&mut self, rd: Register, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FLT, rs1.into_u32(), rs2.into_u32(), F5_CMP, PR_D)
    }

    /// `fle.s rd, rs1, rs2`.
    pub fn fle_s(&mut self, rd: Register, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FLE, rs1.into_u32(), rs2.into_u32(), F5_CMP, PR_S)
    }

    /// `fle.d rd, rs1, rs2`.
    pub fn fle_d(&mut self, rd: Register, rs1: FRegister, rs2: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FLE, rs1.into_u32(), rs2.into_u32(), F5_CMP, PR_D)
    }

    // ---- classify ------------------------------------------------------

    /// `fclass.s rd, rs1`.
    pub fn fclass_s(&mut self, rd: Register, rs1: FRegister) -> &mut Self {
        self.require_f();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FCLASS, rs1.into_u32(), 0, F5_CLASS_MV_X, PR_S)
    }

    /// `fclass.d rd, rs1`.
    pub fn fclass_d(&mut self, rd: Register, rs1: FRegister) -> &mut Self {
        self.require_d();
        self.fp(OP_FP, rd.into_u32(), FUNCT3_FCLASS, rs1.into_u32(), 0, F5_CLASS_MV_X, PR_D)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::registers::{A0, A1};
    use crate::registers::{FA0, FA1, FA2, FA3, FS0};

    #[test]
    fn fsgnj_collapses_into_fmv_when_rs1_equals_rs2() {
        let mut fsgnj_asm = Assembler::rv32imaf(16, None);
        fsgnj_asm.fsgnj_s(FA0, FA1, FA1);
        let fsgnj_bytes = fsgnj_asm.generate().to_vec();

        let mut fmv_asm = Assembler::rv32imaf(16, None);
        fmv_asm.fmv_s(FA0, FA1);
        let fmv_bytes = fmv_asm.generate().to_vec();

        assert_eq!(fsgnj_bytes, fmv_bytes);
    }

    #[test]
    fn fadd_s_sets_single_precision_bits() {
        let mut asm = Assembler::rv32imaf(16, None);
        asm.fadd_s(FA0, FA1, FA2, RoundingMode::Dyn);
        let word = u32::from_le_bytes(asm.generate()[0..4].try_into().unwrap());
        assert_eq!(word & 0x7F, OP_FP);
        assert_eq!((word >> 25) & 0b11, PR_S);
        assert_eq!((word >> 27) & 0x1F, F5_ADD);
    }

    #[test]
    fn fadd_d_sets_double_precision_bit() {
        let mut asm = Assembler::new_with_features(FeatureSet::I | FeatureSet::D, 16, None);
        asm.fadd_d(FA0, FA1, FA2, RoundingMode::Dyn);
        let word = u32::from_le_bytes(asm.generate()[0..4].try_into().unwrap());
        assert_eq!((word >> 25) & 0b11, PR_D);
    }

    #[test]
    #[should_panic(expected = "F")]
    fn single_precision_mnemonic_without_f_panics() {
        let mut asm = Assembler::rv32i(16, None);
        asm.fadd_s(FA0, FA1, FA2, RoundingMode::Dyn);
    }

    #[test]
    fn fmadd_s_places_rs3_as_a_real_register() {
        let mut asm = Assembler::rv32imaf(16, None);
        asm.fmadd_s(FA0, FA1, FA2, FA3, RoundingMode::Dyn);
        let word = u32::from_le_bytes(asm.generate()[0..4].try_into().unwrap());
        assert_eq!(word & 0x7F, OP_FMADD);
        assert_eq!(word >> 27, FA3.into_u32());
    }

    #[test]
    fn fcvt_d_w_always_uses_rne() {
        let mut asm = Assembler::new_with_features(FeatureSet::I | FeatureSet::D, 16, None);
        asm.fcvt_d_w(FA0, A0);
        let word = u32::from_le_bytes(asm.generate()[0..4].try_into().unwrap());
        assert_eq!((word >> 12) & 0b111, RoundingMode::Rne.into_u32());
    }

    #[test]
    fn feq_writes_to_a_general_purpose_register() {
        let mut asm = Assembler::rv32imaf(16, None);
        asm.feq_s(A0, FA1, FA2);
        let word = u32::from_le_bytes(asm.generate()[0..4].try_into().unwrap());
        assert_eq!((word >> 7) & 0x1F, u32::from(A0.index()));
        assert_eq!((word >> 12) & 0b111, FUNCT3_FEQ);
    }

    #[test]
    fn flw_compresses_to_c_flwsp_off_the_stack_pointer() {
        let mut asm = Assembler::rv32imafdc(16, None);
        asm.flw(FA0, SP.offset(16));
        assert_eq!(asm.generate().len(), 2);
    }

    #[test]
    fn fld_compresses_between_c_subset_registers() {
        let mut asm = Assembler::rv32imafdc(16, None);
        asm.fld(FS0, A0.offset(8));
        assert_eq!(asm.generate().len(), 2);
    }

    #[test]
    fn fld_stays_32_bit_outside_c_subset() {
        let mut asm = Assembler::rv32imafdc(16, None);
        asm.fld(FA0, A1.offset(8));
        assert_eq!(asm.generate().len(), 4);
    }
}
