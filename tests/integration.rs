use rv32gc_jit::assembler::Assembler;
use rv32gc_jit::registers::{A0, A1, A2, A4, A5, FA0, RA, X0};

#[test]
fn memcpy_loop_matches_the_reference_assembler() {
    let mut asm = Assembler::rv32gc(64, None);
    asm.add(A2, A0, A2);
    asm.mv(A5, A0);
    asm.label(".L59");
    asm.bne(A5, A2, ".L60");
    asm.ret();
    asm.label(".L60");
    asm.addi(A1, A1, 1);
    asm.lbu(A4, A1.offset(-1));
    asm.addi(A5, A5, 1);
    asm.sb(A4, A5.offset(-1));
    asm.j(".L59");
    assert_eq!(asm.generate().len(), 26);
}

#[test]
fn large_immediate_load_stays_uncompressed() {
    let mut asm = Assembler::rv32gc(32, None);
    asm.li(A0, 0x1234_5678);
    assert_eq!(asm.generate().len(), 8);
}

#[test]
fn negative_low_half_li_corrects_hi() {
    let mut asm = Assembler::rv32gc(32, None);
    asm.li(A0, 0x1234_5fff_u32 as i32);
    let bytes = asm.generate();
    let lui_word = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    assert_eq!(lui_word >> 12, 0x1234_6);
    let addi_word = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    assert_eq!((addi_word as i32) >> 20, -1);
}

#[test]
fn branch_zero_shortening_compresses_both_sides() {
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
fn call_with_a_far_displacement_encodes_the_correct_upper_immediate() {
    let mut asm = Assembler::rv32gc(32, None);
    asm.call(0x800);
    let bytes = asm.generate();
    let auipc_word = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    assert_eq!(auipc_word >> 12, 1, "hi >> 12 for displacement 0x800 must be 1, not 0x1000");
}

#[test]
fn float_sign_injection_collapses_into_fmv() {
    let mut fsgnj = Assembler::rv32imaf(16, None);
    fsgnj.fsgnj_s(rv32gc_jit::registers::FA2, FA0, FA0);
    let fsgnj_bytes = fsgnj.generate().to_vec();

    let mut fmv = Assembler::rv32imaf(16, None);
    fmv.fmv_s(rv32gc_jit::registers::FA2, FA0);
    let fmv_bytes = fmv.generate().to_vec();

    assert_eq!(fsgnj_bytes, fmv_bytes);
}

#[test]
fn generate_is_deterministic_across_repeated_calls() {
    let mut asm = Assembler::rv32gc(64, None);
    asm.label("start");
    asm.addi(A0, A0, 1);
    asm.jal(RA, "start");
    let first = asm.generate().to_vec();
    let second = asm.generate().to_vec();
    assert_eq!(first, second);
}

#[test]
#[should_panic(expected = "out of range")]
fn addi_rejects_immediate_above_range() {
    let mut asm = Assembler::rv32i(16, None);
    asm.addi(A0, A0, 2048);
}

#[test]
#[should_panic(expected = "out of range")]
fn addi_rejects_immediate_below_range() {
    let mut asm = Assembler::rv32i(16, None);
    asm.addi(A0, A0, -2049);
}

#[test]
fn compression_dominance_for_addi() {
    let mut asm = Assembler::rv32gc(16, None);
    asm.addi(A0, A0, 1);
    assert_eq!(asm.generate().len(), 2);
}

#[test]
fn label_roundtrip_for_a_forward_branch() {
    let mut asm = Assembler::rv32i(32, None);
    asm.beq(A0, A1, "end");
    asm.addi(A2, A2, 1);
    asm.label("end");
    let bytes = asm.generate();
    let word = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    let imm12 = (word >> 31) & 1;
    let imm10_5 = (word >> 25) & 0x3F;
    let imm4_1 = (word >> 8) & 0xF;
    let imm11 = (word >> 7) & 1;
    let raw = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    let displacement = ((raw as i32) << 19) >> 19;
    assert_eq!(displacement, 8);
}

#[test]
fn fcvt_d_w_emits_exact_rne_regardless_of_caller_intent() {
    let mut asm = Assembler::new_with_features(
        rv32gc_jit::features::FeatureSet::I | rv32gc_jit::features::FeatureSet::D,
        16,
        None,
    );
    asm.fcvt_d_w(FA0, A0);
    let word = u32::from_le_bytes(asm.generate()[0..4].try_into().unwrap());
    assert_eq!((word >> 12) & 0b111, 0, "fcvt.d.w must always encode rne");
}

#[test]
fn borrowed_buffer_round_trips_through_get_code() {
    let mut buffer = [0u8; 32];
    let mut asm = Assembler::rv32i(32, Some(&mut buffer));
    asm.addi(A0, X0, 5);
    let (code, size) = asm.get_code();
    assert_eq!(size, 4);
    assert_eq!(code.len(), 4);
}
