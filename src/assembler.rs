//! The composed assembler object: environment, allocator, and enabled
//! feature set, plus the finalisation entry point.

use tracing::trace;

use crate::alloc::Allocator;
use crate::env::Env;
use crate::features::FeatureSet;
use crate::label::Label;

/// Library version, packed as `0xABCD` meaning `A.BC(D)`.
pub const VERSION: u16 = 0x0100;

/// A composable RV32GC assembler. One instance stages an entire function
/// body; `generate` finalises it into executable bytes.
pub struct Assembler<'a> {
    pub(crate) env: Env,
    pub(crate) allocator: Allocator<'a>,
    pub(crate) features: FeatureSet,
    debug: bool,
    host_is_riscv: bool,
}

impl<'a> Assembler<'a> {
    /// Builds an assembler with an explicit feature set, a maximum output
    /// size, and an optional caller-supplied destination buffer. Every
    /// `rv32*` convenience constructor forwards here.
    #[must_use]
    pub fn new_with_features(features: FeatureSet, max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        let allocator = match user_buffer {
            Some(buffer) => Allocator::new_borrowed(buffer),
            None => Allocator::new_owned(max_size),
        };
        Self {
            env: Env::new(features.contains(FeatureSet::C)),
            allocator,
            features,
            debug: false,
            host_is_riscv: cfg!(target_arch = "riscv32"),
        }
    }

    /// RV32I only.
    #[must_use]
    pub fn rv32i(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::new_with_features(FeatureSet::I, max_size, user_buffer)
    }

    /// RV32I + M.
    #[must_use]
    pub fn rv32im(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::new_with_features(FeatureSet::I | FeatureSet::M, max_size, user_buffer)
    }

    /// RV32I + M + A.
    #[must_use]
    pub fn rv32ima(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::new_with_features(FeatureSet::I | FeatureSet::M | FeatureSet::A, max_size, user_buffer)
    }

    /// RV32I + M + A + F.
    #[must_use]
    pub fn rv32imaf(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::new_with_features(
            FeatureSet::I | FeatureSet::M | FeatureSet::A | FeatureSet::F,
            max_size,
            user_buffer,
        )
    }

    /// RV32I + M + A + F + D. Alias: [`Assembler::rv32g`].
    #[must_use]
    pub fn rv32imafd(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::new_with_features(
            FeatureSet::I | FeatureSet::M | FeatureSet::A | FeatureSet::F | FeatureSet::D,
            max_size,
            user_buffer,
        )
    }

    /// Alias for [`Assembler::rv32imafd`].
    #[must_use]
    pub fn rv32g(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::rv32imafd(max_size, user_buffer)
    }

    /// RV32I + M + A + F + D + C. Alias: [`Assembler::rv32gc`].
    #[must_use]
    pub fn rv32imafdc(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::new_with_features(
            FeatureSet::I | FeatureSet::M | FeatureSet::A | FeatureSet::F | FeatureSet::D | FeatureSet::C,
            max_size,
            user_buffer,
        )
    }

    /// Alias for [`Assembler::rv32imafdc`].
    #[must_use]
    pub fn rv32gc(max_size: usize, user_buffer: Option<&'a mut [u8]>) -> Self {
        Self::rv32imafdc(max_size, user_buffer)
    }

    /// Declares a symbolic label at the current position. Re-declaring the
    /// same name panics.
    pub fn label(&mut self, name: &str) -> &mut Self {
        self.env.declare(name);
        self
    }

    /// Toggles `tracing::trace!` emission of every queued/replayed
    /// instruction. Off by default; never changes emitted bytes.
    pub fn debug(&mut self, enabled: bool) -> &mut Self {
        self.debug = enabled;
        self
    }

    /// Toggles whether `generate` flushes the instruction cache
    /// (`fence.i`). Defaults to `true` only when compiled for a RISC-V
    /// target; a no-op on other hosts regardless of this setting.
    pub fn host_is_riscv(&mut self, enabled: bool) -> &mut Self {
        self.host_is_riscv = enabled;
        self
    }

    pub(crate) fn trace_if_debug(&self, message: &str) {
        if self.debug {
            trace!("{message}");
        }
    }

    /// Finalises the staged instruction stream into the destination
    /// buffer, flushing the instruction cache on RISC-V hosts. Idempotent:
    /// calling this more than once on the same assembler reproduces
    /// identical bytes.
    pub fn generate(&mut self) -> &[u8] {
        let buf = self.allocator.memory();
        let written = self.env.finalize(buf);
        if self.host_is_riscv {
            flush_instruction_cache();
        }
        &self.allocator.memory()[..written]
    }

    /// Returns the generated code and its length. Equivalent to calling
    /// [`Assembler::generate`] and taking its length.
    pub fn get_code(&mut self) -> (&[u8], usize) {
        let code = self.generate();
        let size = code.len();
        (code, size)
    }

    /// The library's version, packed into a 16-bit word.
    #[must_use]
    pub const fn get_version() -> u16 {
        VERSION
    }
}

#[cfg(target_arch = "riscv32")]
fn flush_instruction_cache() {
    unsafe {
        core::arch::asm!("fence.i");
    }
}

#[cfg(not(target_arch = "riscv32"))]
fn flush_instruction_cache() {}

pub(crate) fn label_from(label: impl Into<Label>) -> Label {
    label.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_1_0_0() {
        assert_eq!(Assembler::get_version(), 0x0100);
    }

    #[test]
    fn generate_is_idempotent() {
        let mut asm = Assembler::rv32i(64, None);
        asm.label("start");
        let first = asm.generate().to_vec();
        let second = asm.generate().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn borrowed_buffer_is_used_verbatim() {
        let mut buffer = [0u8; 64];
        let buffer_ptr = buffer.as_ptr();
        let mut asm = Assembler::rv32i(64, Some(&mut buffer));
        let code = asm.generate();
        assert_eq!(code.as_ptr(), buffer_ptr);
    }
}
