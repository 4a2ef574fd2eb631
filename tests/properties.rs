//! Property-based checks for the universal invariants in the encoding
//! engine: deterministic reproduction, size consistency, and range
//! rejection. Exercised through the public API only, in the same
//! `#[quickcheck]`-attribute style the pack's `fuel-vm` crate uses for its
//! instruction-stream fuzz tests.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rv32gc_jit::assembler::Assembler;
use rv32gc_jit::registers::{A0, A1};

/// `addi` accepts every immediate in its documented range without panicking,
/// and always emits either a 2-byte (compressed) or 4-byte (base) encoding.
#[quickcheck]
fn addi_in_range_never_panics_and_emits_2_or_4_bytes(imm: i16) -> TestResult {
    let imm = i32::from(imm) % 4096;
    if !(-2048..=2047).contains(&imm) {
        return TestResult::discard();
    }
    let mut asm = Assembler::rv32gc(16, None);
    asm.addi(A0, A1, imm);
    let len = asm.generate().len();
    TestResult::from_bool(len == 2 || len == 4)
}

/// `addi` rejects every immediate outside its documented range.
#[quickcheck]
fn addi_out_of_range_always_panics(raw: i32) -> TestResult {
    let imm = if raw >= 0 { raw.saturating_add(2048) } else { raw.saturating_sub(2049) };
    if (-2048..=2047).contains(&imm) {
        return TestResult::discard();
    }
    let result = std::panic::catch_unwind(|| {
        let mut asm = Assembler::rv32i(16, None);
        asm.addi(A0, A1, imm);
    });
    TestResult::from_bool(result.is_err())
}

/// Running `generate` twice on the same staged assembler reproduces
/// byte-identical output, regardless of which immediate was staged.
#[quickcheck]
fn generate_is_deterministic_for_any_valid_immediate(imm: i16) -> TestResult {
    let imm = i32::from(imm) % 4096;
    if !(-2048..=2047).contains(&imm) {
        return TestResult::discard();
    }
    let mut asm = Assembler::rv32gc(32, None);
    asm.li(A0, imm);
    let first = asm.generate().to_vec();
    let second = asm.generate().to_vec();
    TestResult::from_bool(first == second)
}

/// `li` always reconstructs the exact requested 32-bit immediate: splitting
/// into `lui`+`addi` (or just `addi`) never loses or corrupts bits.
#[quickcheck]
fn li_reconstructs_the_exact_immediate(imm: i32) -> bool {
    let mut asm = Assembler::rv32i(32, None);
    asm.li(A0, imm);
    let bytes = asm.generate();
    let mut value: i32 = 0;
    let mut offset = 0;
    while offset < bytes.len() {
        let word = u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
        let opcode = word & 0x7F;
        if opcode == 0x37 {
            // lui: place the 20-bit immediate at [31:12].
            value = (word & 0xFFFF_F000) as i32;
        } else {
            // addi rd, rd, simm12: sign-extend and add.
            let simm12 = (word as i32) >> 20;
            value = value.wrapping_add(simm12);
        }
        offset += 4;
    }
    value == imm
}
