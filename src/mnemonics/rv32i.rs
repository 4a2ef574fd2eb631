//! Base integer ISA (RV32I), its pseudo-instructions, and — when the `C`
//! extension is enabled — the compressed-form overrides for every mnemonic
//! RV32C can shorten. Branches and `jal` defer their compression choice to
//! [`crate::env::Env`]'s relaxation pass since it depends on a label
//! displacement not yet known at the call site; everything else here
//! decides immediately because its operands are already fully known.

use crate::assembler::Assembler;
use crate::compressed;
use crate::env::{BRANCH_FUNCT3_BEQ, BRANCH_FUNCT3_BNE};
use crate::features::FeatureSet;
use crate::format;
use crate::label::Label;
use crate::operand::Offset;
use crate::registers::{Register, A0, RA, SP, T1, X0, X1};
use crate::util::{i32_in_range, u32_in_range};

const OP_LOAD: u32 = 0x03;
const OP_IMM: u32 = 0x13;
const OP_AUIPC: u32 = 0x17;
const OP_STORE: u32 = 0x23;
const OP_REG: u32 = 0x33;
const OP_LUI: u32 = 0x37;
const OP_BRANCH: u32 = 0x63;
const OP_JALR: u32 = 0x67;
const OP_JAL: u32 = 0x6F;
const OP_SYSTEM: u32 = 0x73;

const F3_ADDI: u32 = 0b000;
const F3_SLLI: u32 = 0b001;
const F3_SLTI: u32 = 0b010;
const F3_SLTIU: u32 = 0b011;
const F3_XORI: u32 = 0b100;
const F3_SRLI_SRAI: u32 = 0b101;
const F3_ORI: u32 = 0b110;
const F3_ANDI: u32 = 0b111;
const FUNCT7_ALT: u32 = 0b0100000;

impl<'a> Assembler<'a> {
    fn c(&self) -> bool {
        self.features.contains(FeatureSet::C)
    }

    fn emit16(&mut self, word: u16) {
        self.env.emit_half(word);
    }

    fn emit32(&mut self, word: u32) {
        self.env.emit_word(word);
    }

    // ---- loads / stores ----------------------------------------------

    fn load(&mut self, opcode_funct3: u32, rd: Register, addr: Offset<Register>) -> &mut Self {
        assert!(i32_in_range(i32::from(addr.offset()), -2048, 2047), "load offset out of range");
        let word = format::i_type(OP_LOAD, rd.into_u32(), opcode_funct3, addr.base().into_u32(), i32::from(addr.offset()));
        self.emit32(word);
        self
    }

    /// `lb rd, offset(rs1)`.
    pub fn lb(&mut self, rd: Register, addr: Offset<Register>) -> &mut Self {
        self.load(0b000, rd, addr)
    }

    /// `lh rd, offset(rs1)`.
    pub fn lh(&mut self, rd: Register, addr: Offset<Register>) -> &mut Self {
        self.load(0b001, rd, addr)
    }

    /// `lw rd, offset(rs1)`. Compresses to `C.LW`/`C.LWSP` when legal.
    pub fn lw(&mut self, rd: Register, addr: Offset<Register>) -> &mut Self {
        let offset = i32::from(addr.offset());
        if self.c() && addr.base() == SP && rd != X0 && u32_in_range(offset as u32, 0, 252) && offset % 4 == 0 {
            self.emit16(compressed::lwsp(rd.into_u32(), offset as u32));
            return self;
        }
        if self.c() && rd.is_compressed() && addr.base().is_compressed() && u32_in_range(offset as u32, 0, 124) && offset % 4 == 0 {
            self.emit16(compressed::lw(
                u32::from(rd.compressed_index().unwrap()),
                u32::from(addr.base().compressed_index().unwrap()),
                offset as u32,
            ));
            return self;
        }
        self.load(0b010, rd, addr)
    }

    /// `lbu rd, offset(rs1)`.
    pub fn lbu(&mut self, rd: Register, addr: Offset<Register>) -> &mut Self {
        self.load(0b100, rd, addr)
    }

    /// `lhu rd, offset(rs1)`. Uses funct3 `0b101`, the correct RISC-V value
    /// (distinct from `lbu`'s `0b100`).
    pub fn lhu(&mut self, rd: Register, addr: Offset<Register>) -> &mut Self {
        self.load(0b101, rd, addr)
    }

    fn store(&mut self, funct3: u32, rs2: Register, addr: Offset<Register>) -> &mut Self {
        assert!(i32_in_range(i32::from(addr.offset()), -2048, 2047), "store offset out of range");
        let word = format::s_type(OP_STORE, funct3, addr.base().into_u32(), rs2.into_u32(), i32::from(addr.offset()));
        self.emit32(word);
        self
    }

    /// `sb rs2, offset(rs1)`.
    pub fn sb(&mut self, rs2: Register, addr: Offset<Register>) -> &mut Self {
        self.store(0b000, rs2, addr)
    }

    /// `sh rs2, offset(rs1)`.
    pub fn sh(&mut self, rs2: Register, addr: Offset<Register>) -> &mut Self {
        self.store(0b001, rs2, addr)
    }

    /// `sw rs2, offset(rs1)`. Compresses to `C.SW`/`C.SWSP` when legal.
    pub fn sw(&mut self, rs2: Register, addr: Offset<Register>) -> &mut Self {
        let offset = i32::from(addr.offset());
        if self.c() && addr.base() == SP && u32_in_range(offset as u32, 0, 252) && offset % 4 == 0 {
            self.emit16(compressed::swsp(rs2.into_u32(), offset as u32));
            return self;
        }
        if self.c() && rs2.is_compressed() && addr.base().is_compressed() && u32_in_range(offset as u32, 0, 124) && offset % 4 == 0 {
            self.emit16(compressed::sw(
                u32::from(rs2.compressed_index().unwrap()),
                u32::from(addr.base().compressed_index().unwrap()),
                offset as u32,
            ));
            return self;
        }
        self.store(0b010, rs2, addr)
    }

    // ---- immediate arithmetic -----------------------------------------

    /// `addi rd, rs1, imm`. The widest compression surface in RV32I: covers
    /// `C.ADDI4SPN`, `C.ADDI16SP` (tie-broken over `C.ADDI` per the RISC-V C
    /// spec), `C.ADDI`, `C.LI`, and `C.NOP`.
    pub fn addi(&mut self, rd: Register, rs1: Register, imm: i32) -> &mut Self {
        assert!(i32_in_range(imm, -2048, 2047), "addi immediate out of range");
        if self.c() {
            if rd == X0 && rs1 == X0 && imm == 0 {
                self.emit16(compressed::nop());
                return self;
            }
            if rs1 == SP && rd.is_compressed() && imm != 0 && imm % 4 == 0 && u32_in_range(imm as u32, 4, 1020) {
                self.emit16(compressed::addi4spn(u32::from(rd.compressed_index().unwrap()), imm as u32));
                return self;
            }
            if rd == SP && rs1 == SP && imm != 0 && imm % 16 == 0 && i32_in_range(imm, -512, 496) {
                self.emit16(compressed::addi16sp(imm as u32));
                return self;
            }
            if rd == rs1 && rd != X0 && imm != 0 && i32_in_range(imm, -32, 31) {
                self.emit16(compressed::addi(rd.into_u32(), imm as u32));
                return self;
            }
            if rs1 == X0 && rd != X0 && i32_in_range(imm, -32, 31) {
                self.emit16(compressed::li(rd.into_u32(), imm as u32));
                return self;
            }
        }
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_ADDI, rs1.into_u32(), imm));
        self
    }

    /// `slti rd, rs1, imm`.
    pub fn slti(&mut self, rd: Register, rs1: Register, imm: i32) -> &mut Self {
        assert!(i32_in_range(imm, -2048, 2047), "slti immediate out of range");
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_SLTI, rs1.into_u32(), imm));
        self
    }

    /// `sltiu rd, rs1, imm`.
    pub fn sltiu(&mut self, rd: Register, rs1: Register, imm: i32) -> &mut Self {
        assert!(i32_in_range(imm, -2048, 2047), "sltiu immediate out of range");
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_SLTIU, rs1.into_u32(), imm));
        self
    }

    /// `xori rd, rs1, imm`.
    pub fn xori(&mut self, rd: Register, rs1: Register, imm: i32) -> &mut Self {
        assert!(i32_in_range(imm, -2048, 2047), "xori immediate out of range");
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_XORI, rs1.into_u32(), imm));
        self
    }

    /// `ori rd, rs1, imm`.
    pub fn ori(&mut self, rd: Register, rs1: Register, imm: i32) -> &mut Self {
        assert!(i32_in_range(imm, -2048, 2047), "ori immediate out of range");
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_ORI, rs1.into_u32(), imm));
        self
    }

    /// `andi rd, rs1, imm`. Compresses to `C.ANDI` when legal.
    pub fn andi(&mut self, rd: Register, rs1: Register, imm: i32) -> &mut Self {
        assert!(i32_in_range(imm, -2048, 2047), "andi immediate out of range");
        if self.c() && rd == rs1 && rd.is_compressed() && i32_in_range(imm, -32, 31) {
            self.emit16(compressed::andi(u32::from(rd.compressed_index().unwrap()), imm as u32));
            return self;
        }
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_ANDI, rs1.into_u32(), imm));
        self
    }

    /// `slli rd, rs1, shamt`. Compresses to `C.SLLI` when legal.
    pub fn slli(&mut self, rd: Register, rs1: Register, shamt: u32) -> &mut Self {
        assert!(shamt < 32, "shift amount out of range");
        if self.c() && rd == rs1 && rd != X0 {
            self.emit16(compressed::slli(rd.into_u32(), shamt));
            return self;
        }
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_SLLI, rs1.into_u32(), shamt as i32));
        self
    }

    /// `srli rd, rs1, shamt`. Compresses to `C.SRLI` when legal.
    pub fn srli(&mut self, rd: Register, rs1: Register, shamt: u32) -> &mut Self {
        assert!(shamt < 32, "shift amount out of range");
        if self.c() && rd == rs1 && rd.is_compressed() {
            self.emit16(compressed::srli(u32::from(rd.compressed_index().unwrap()), shamt));
            return self;
        }
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_SRLI_SRAI, rs1.into_u32(), shamt as i32));
        self
    }

    /// `srai rd, rs1, shamt`. Compresses to `C.SRAI` when legal.
    pub fn srai(&mut self, rd: Register, rs1: Register, shamt: u32) -> &mut Self {
        assert!(shamt < 32, "shift amount out of range");
        if self.c() && rd == rs1 && rd.is_compressed() {
            self.emit16(compressed::srai(u32::from(rd.compressed_index().unwrap()), shamt));
            return self;
        }
        let imm = ((FUNCT7_ALT << 5) | shamt) as i32;
        self.emit32(format::i_type(OP_IMM, rd.into_u32(), F3_SRLI_SRAI, rs1.into_u32(), imm));
        self
    }

    // ---- register-register arithmetic ---------------------------------

    fn reg(&mut self, funct3: u32, funct7: u32, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.emit32(format::r_type(OP_REG, rd.into_u32(), funct3, rs1.into_u32(), rs2.into_u32(), funct7));
        self
    }

    /// `add rd, rs1, rs2`. Compresses to `C.MV`/`C.ADD` when `rs1 == x0` /
    /// `rd == rs1` respectively.
    pub fn add(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        if self.c() && rd != X0 {
            if rs1 == X0 && rs2 != X0 {
                self.emit16(compressed::mv(rd.into_u32(), rs2.into_u32()));
                return self;
            }
            if rd == rs1 && rs2 != X0 {
                self.emit16(compressed::add(rd.into_u32(), rs2.into_u32()));
                return self;
            }
        }
        self.reg(0b000, 0b0000000, rd, rs1, rs2)
    }

    /// `sub rd, rs1, rs2`. Compresses to `C.SUB` when `rd == rs1` and both
    /// are in the compressed register subset.
    pub fn sub(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        if self.c() && rd == rs1 && rd.is_compressed() && rs2.is_compressed() {
            self.emit16(compressed::sub(
                u32::from(rd.compressed_index().unwrap()),
                u32::from(rs2.compressed_index().unwrap()),
            ));
            return self;
        }
        self.reg(0b000, FUNCT7_ALT, rd, rs1, rs2)
    }

    /// `sll rd, rs1, rs2`.
    pub fn sll(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.reg(0b001, 0b0000000, rd, rs1, rs2)
    }

    /// `slt rd, rs1, rs2`.
    pub fn slt(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.reg(0b010, 0b0000000, rd, rs1, rs2)
    }

    /// `sltu rd, rs1, rs2`.
    pub fn sltu(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.reg(0b011, 0b0000000, rd, rs1, rs2)
    }

    /// `xor rd, rs1, rs2`. Compresses to `C.XOR` when legal.
    pub fn xor(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        if self.c() && rd == rs1 && rd.is_compressed() && rs2.is_compressed() {
            self.emit16(compressed::xor(
                u32::from(rd.compressed_index().unwrap()),
                u32::from(rs2.compressed_index().unwrap()),
            ));
            return self;
        }
        self.reg(0b100, 0b0000000, rd, rs1, rs2)
    }

    /// `srl rd, rs1, rs2`.
    pub fn srl(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.reg(0b101, 0b0000000, rd, rs1, rs2)
    }

    /// `sra rd, rs1, rs2`.
    pub fn sra(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        self.reg(0b101, FUNCT7_ALT, rd, rs1, rs2)
    }

    /// `or rd, rs1, rs2`. Compresses to `C.OR` when legal.
    pub fn or(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        if self.c() && rd == rs1 && rd.is_compressed() && rs2.is_compressed() {
            self.emit16(compressed::or(
                u32::from(rd.compressed_index().unwrap()),
                u32::from(rs2.compressed_index().unwrap()),
            ));
            return self;
        }
        self.reg(0b110, 0b0000000, rd, rs1, rs2)
    }

    /// `and rd, rs1, rs2`. Compresses to `C.AND` when legal.
    pub fn and(&mut self, rd: Register, rs1: Register, rs2: Register) -> &mut Self {
        if self.c() && rd == rs1 && rd.is_compressed() && rs2.is_compressed() {
            self.emit16(compressed::and(
                u32::from(rd.compressed_index().unwrap()),
                u32::from(rs2.compressed_index().unwrap()),
            ));
            return self;
        }
        self.reg(0b111, 0b0000000, rd, rs1, rs2)
    }

    // ---- branches / jumps ----------------------------------------------

    fn branch(&mut self, funct3: u32, rs1: Register, rs2: Register, label: impl Into<Label>) -> &mut Self {
        self.env.emit_branch(rs1, rs2, funct3, label.into());
        self
    }

    /// `beq rs1, rs2, label`.
    pub fn beq(&mut self, rs1: Register, rs2: Register, label: impl Into<Label>) -> &mut Self {
        self.branch(BRANCH_FUNCT3_BEQ, rs1, rs2, label)
    }

    /// `bne rs1, rs2, label`.
    pub fn bne(&mut self, rs1: Register, rs2: Register, label: impl Into<Label>) -> &mut Self {
        self.branch(BRANCH_FUNCT3_BNE, rs1, rs2, label)
    }

    /// `blt rs1, rs2, label`.
    pub fn blt(&mut self, rs1: Register, rs2: Register, label: impl Into<Label>) -> &mut Self {
        self.branch(0b100, rs1, rs2, label)
    }

    /// `bge rs1, rs2, label`.
    pub fn bge(&mut self, rs1: Register, rs2: Register, label: impl Into<Label>) -> &mut Self {
        self.branch(0b101, rs1, rs2, label)
    }

    /// `bltu rs1, rs2, label`.
    pub fn bltu(&mut self, rs1: Register, rs2: Register, label: impl Into<Label>) -> &mut Self {
        self.branch(0b110, rs1, rs2, label)
    }

    /// `bgeu rs1, rs2, label`.
    pub fn bgeu(&mut self, rs1: Register, rs2: Register, label: impl Into<Label>) -> &mut Self {
        self.branch(0b111, rs1, rs2, label)
    }

    /// `jal rd, label`. Compresses to `C.J`/`C.JAL` when `rd` is `x0`/`x1`
    /// and the displacement fits, decided during finalisation.
    pub fn jal(&mut self, rd: Register, label: impl Into<Label>) -> &mut Self {
        self.env.emit_jump(rd, label.into());
        self
    }

    /// `jalr rd, offset(rs1)`. Compresses to `C.JR`/`C.JALR` when
    /// `offset == 0`, `rs1 != x0`, and `rd` is `x0`/`x1` respectively.
    pub fn jalr(&mut self, rd: Register, addr: Offset<Register>) -> &mut Self {
        assert!(i32_in_range(i32::from(addr.offset()), -2048, 2047), "jalr offset out of range");
        if self.c() && addr.offset() == 0 && addr.base() != X0 {
            if rd == X0 {
                self.emit16(compressed::jr(addr.base().into_u32()));
                return self;
            }
            if rd == X1 {
                self.emit16(compressed::jalr(addr.base().into_u32()));
                return self;
            }
        }
        self.emit32(format::i_type(OP_JALR, rd.into_u32(), 0, addr.base().into_u32(), i32::from(addr.offset())));
        self
    }

    // ---- upper immediate / system ---------------------------------------

    /// `lui rd, imm20` (the 20-bit value placed at bits `[31:12]`).
    /// Compresses to `C.LUI` when legal.
    pub fn lui(&mut self, rd: Register, imm20: u32) -> &mut Self {
        assert!(imm20 <= 0xFFFFF, "lui immediate out of range");
        if self.c() && rd != X0 && rd != SP && imm20 != 0 {
            let in_low = u32_in_range(imm20, 1, 31);
            let in_high = u32_in_range(imm20, 0xFFFE0, 0xFFFFF);
            if in_low || in_high {
                self.emit16(compressed::lui(rd.into_u32(), imm20 & 0x3F));
                return self;
            }
        }
        self.emit32(format::u_type(OP_LUI, rd.into_u32(), imm20));
        self
    }

    /// `auipc rd, imm20`. Never compressed.
    pub fn auipc(&mut self, rd: Register, imm20: u32) -> &mut Self {
        assert!(imm20 <= 0xFFFFF, "auipc immediate out of range");
        self.emit32(format::u_type(OP_AUIPC, rd.into_u32(), imm20));
        self
    }

    /// `ecall`.
    pub fn ecall(&mut self) -> &mut Self {
        self.emit32(format::i_type(OP_SYSTEM, 0, 0, 0, 0));
        self
    }

    /// `ebreak`.
    pub fn ebreak(&mut self) -> &mut Self {
        self.emit32(format::i_type(OP_SYSTEM, 0, 0, 0, 1));
        self
    }

    // ---- pseudo-instructions --------------------------------------------

    /// `nop` → `addi x0, x0, 0`.
    pub fn nop(&mut self) -> &mut Self {
        self.addi(X0, X0, 0)
    }

    /// `mv rd, rs` → `addi rd, rs, 0`. Compresses to `C.MV` when legal: `ADDI
    /// rd, rs, 0` and `ADD rd, x0, rs` compute the same value, so the
    /// compressed form of the latter is a legal substitute whenever the base
    /// encoding would otherwise need all 4 bytes.
    pub fn mv(&mut self, rd: Register, rs: Register) -> &mut Self {
        if self.c() && rd != X0 && rs != X0 {
            self.emit16(compressed::mv(rd.into_u32(), rs.into_u32()));
            return self;
        }
        self.addi(rd, rs, 0)
    }

    /// `not rd, rs` → `xori rd, rs, -1`.
    pub fn not(&mut self, rd: Register, rs: Register) -> &mut Self {
        self.xori(rd, rs, -1)
    }

    /// `neg rd, rs` → `sub rd, x0, rs`.
    pub fn neg(&mut self, rd: Register, rs: Register) -> &mut Self {
        self.sub(rd, X0, rs)
    }

    /// `seqz rd, rs` → `sltiu rd, rs, 1`.
    pub fn seqz(&mut self, rd: Register, rs: Register) -> &mut Self {
        self.sltiu(rd, rs, 1)
    }

    /// `snez rd, rs` → `sltu rd, x0, rs`.
    pub fn snez(&mut self, rd: Register, rs: Register) -> &mut Self {
        self.sltu(rd, X0, rs)
    }

    /// `sltz rd, rs` → `slt rd, rs, x0`.
    pub fn sltz(&mut self, rd: Register, rs: Register) -> &mut Self {
        self.slt(rd, rs, X0)
    }

    /// `sgtz rd, rs` → `slt rd, x0, rs`.
    pub fn sgtz(&mut self, rd: Register, rs: Register) -> &mut Self {
        self.slt(rd, X0, rs)
    }

    /// `beqz rs, label` → `beq rs, x0, label`.
    pub fn beqz(&mut self, rs: Register, label: impl Into<Label>) -> &mut Self {
        self.beq(rs, X0, label)
    }

    /// `bnez rs, label` → `bne rs, x0, label`.
    pub fn bnez(&mut self, rs: Register, label: impl Into<Label>) -> &mut Self {
        self.bne(rs, X0, label)
    }

    /// `blez rs, label` → `bge x0, rs, label`.
    pub fn blez(&mut self, rs: Register, label: impl Into<Label>) -> &mut Self {
        self.bge(X0, rs, label)
    }

    /// `bgez rs, label` → `bge rs, x0, label`.
    pub fn bgez(&mut self, rs: Register, label: impl Into<Label>) -> &mut Self {
        self.bge(rs, X0, label)
    }

    /// `bltz rs, label` → `blt rs, x0, label`.
    pub fn bltz(&mut self, rs: Register, label: impl Into<Label>) -> &mut Self {
        self.blt(rs, X0, label)
    }

    /// `bgtz rs, label` → `blt x0, rs, label`.
    pub fn bgtz(&mut self, rs: Register, label: impl Into<Label>) -> &mut Self {
        self.blt(X0, rs, label)
    }

    /// `bgt rs, rt, label` → `blt rt, rs, label`.
    pub fn bgt(&mut self, rs: Register, rt: Register, label: impl Into<Label>) -> &mut Self {
        self.blt(rt, rs, label)
    }

    /// `ble rs, rt, label` → `bge rt, rs, label`.
    pub fn ble(&mut self, rs: Register, rt: Register, label: impl Into<Label>) -> &mut Self {
        self.bge(rt, rs, label)
    }

    /// `bgtu rs, rt, label` → `bltu rt, rs, label`.
    pub fn bgtu(&mut self, rs: Register, rt: Register, label: impl Into<Label>) -> &mut Self {
        self.bltu(rt, rs, label)
    }

    /// `bleu rs, rt, label` → `bgeu rt, rs, label`.
    pub fn bleu(&mut self, rs: Register, rt: Register, label: impl Into<Label>) -> &mut Self {
        self.bgeu(rt, rs, label)
    }

    /// `j label` → `jal x0, label`.
    pub fn j(&mut self, label: impl Into<Label>) -> &mut Self {
        self.jal(X0, label)
    }

    /// `jr rs` → `jalr x0, 0(rs)`.
    pub fn jr(&mut self, rs: Register) -> &mut Self {
        self.jalr(X0, rs.offset(0))
    }

    /// `ret` → `jalr x0, 0(x1)`.
    pub fn ret(&mut self) -> &mut Self {
        self.jalr(X0, RA.offset(0))
    }

    /// `li rd, imm` (32-bit immediate). Splits into an optional `lui`
    /// followed by an optional `addi`/`addi x0` so the reconstructed value
    /// equals `imm` exactly, including the `+= (imm & 0x800) << 1`
    /// correction to `hi` when the low half is sign-negative.
    pub fn li(&mut self, rd: Register, imm: i32) -> &mut Self {
        let imm_u = imm as u32;
        let hi: u32 = (imm_u & 0xFFFF_F000).wrapping_add((imm_u & 0x800) << 1);
        let lo: i32 = (((imm_u & 0xFFF) << 20) as i32) >> 20;
        if hi != 0 {
            self.lui(rd, hi >> 12);
            if lo != 0 {
                self.addi(rd, rd, lo);
            }
        } else {
            self.addi(rd, X0, lo);
        }
        self
    }

    /// `call label` → `auipc x1, hi` + `jalr x1, lo(x1)`; `hi`/`lo` are
    /// computed from the label's final displacement during finalisation,
    /// never at the call site. Never compressed.
    pub fn call(&mut self, label: impl Into<Label>) -> &mut Self {
        self.env.emit_call_tail(RA, RA, label.into());
        self
    }

    /// `tail label` → `auipc x6, hi` + `jalr x0, lo(x6)`. Never compressed.
    pub fn tail(&mut self, label: impl Into<Label>) -> &mut Self {
        self.env.emit_call_tail(T1, X0, label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::registers::{A1, A2, A4, A5};

    #[test]
    fn mv_and_addi_emit_identical_bytes() {
        let mut mv_asm = Assembler::rv32i(32, None);
        mv_asm.mv(A0, A4);
        let mv_bytes = mv_asm.generate().to_vec();

        let mut addi_asm = Assembler::rv32i(32, None);
        addi_asm.addi(A0, A4, 0);
        let addi_bytes = addi_asm.generate().to_vec();

        assert_eq!(mv_bytes, addi_bytes);
    }

    #[test]
    fn mv_compresses_to_c_mv_when_c_is_enabled() {
        let mut asm = Assembler::rv32gc(16, None);
        asm.mv(A5, A0);
        assert_eq!(asm.generate().len(), 2);
    }

    #[test]
    fn ret_emits_jalr_x0_x1() {
        let mut ret_asm = Assembler::rv32i(32, None);
        ret_asm.ret();
        let ret_bytes = ret_asm.generate().to_vec();

        let mut jalr_asm = Assembler::rv32i(32, None);
        jalr_asm.jalr(X0, RA.offset(0));
        let jalr_bytes = jalr_asm.generate().to_vec();

        assert_eq!(ret_bytes, jalr_bytes);
    }

    #[test]
    fn nop_compresses_when_c_enabled() {
        let mut asm = Assembler::rv32imafdc(32, None);
        asm.nop();
        assert_eq!(asm.generate().len(), 2);
    }

    #[test]
    fn nop_stays_32_bit_without_c() {
        let mut asm = Assembler::rv32i(32, None);
        asm.nop();
        assert_eq!(asm.generate().len(), 4);
    }

    #[test]
    fn large_immediate_li_emits_lui_and_addi_uncompressed() {
        let mut asm = Assembler::rv32gc(32, None);
        asm.li(A0, 0x1234_5678);
        assert_eq!(asm.generate().len(), 8);
    }

    #[test]
    fn negative_low_half_li_applies_the_hi_correction() {
        let mut asm = Assembler::rv32i(32, None);
        asm.li(A0, 0x1234_5fff_u32 as i32);
        let bytes = asm.generate();
        let lui_word = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        assert_eq!(lui_word >> 12, 0x12346);
    }

    #[test]
    fn branch_zero_shortens_with_c_enabled() {
        let mut asm = Assembler::rv32gc(32, None);
        asm.label("top");
        asm.beqz(A4, "end");
        asm.j("top");
        asm.label("end");
        assert_eq!(asm.generate().len(), 4);
    }

    #[test]
    fn forward_call_always_emits_auipc_and_jalr() {
        let mut asm = Assembler::rv32gc(32, None);
        asm.call("target");
        asm.label("target");
        assert_eq!(asm.generate().len(), 8);
    }

    #[test]
    fn memcpy_loop_matches_expected_total_size() {
        // lwsp/swsp variants collapse the loop body to four 16-bit
        // instructions plus a 16-bit branch and a 16-bit jump back.
        let mut asm = Assembler::rv32gc(64, None);
        asm.label("loop");
        asm.lw(A5, A0.offset(0));
        asm.sw(A5, A1.offset(0));
        asm.addi(A0, A0, 4);
        asm.addi(A1, A1, 4);
        asm.addi(A2, A2, -4);
        asm.bnez(A2, "loop");
        assert_eq!(asm.generate().len(), 12);
    }
}
