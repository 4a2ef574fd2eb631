//! Enabled ISA extensions.

use bitflags::bitflags;

bitflags! {
    /// The set of enabled RISC-V extensions. `I` is always set in practice —
    /// every mnemonic layer composes on top of the base integer ISA — but is
    /// kept as an explicit flag rather than implied, so a `FeatureSet` value
    /// is a complete, self-describing record of what was requested.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FeatureSet: u8 {
        /// Base integer ISA.
        const I = 0b0000_0001;
        /// Integer multiply/divide.
        const M = 0b0000_0010;
        /// Atomic memory operations.
        const A = 0b0000_0100;
        /// Single-precision floating point.
        const F = 0b0000_1000;
        /// Double-precision floating point.
        const D = 0b0001_0000;
        /// Compressed (16-bit) instruction forms.
        const C = 0b0010_0000;
    }
}

impl FeatureSet {
    /// Panics if a mnemonic that requires `required` is invoked without it
    /// enabled — misuse of a disabled extension is a programming error.
    pub(crate) fn require(self, required: FeatureSet) {
        assert!(
            self.contains(required),
            "extension {required:?} is not enabled in this feature set ({self:?})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rv32gc_contains_every_extension() {
        let gc = FeatureSet::I | FeatureSet::M | FeatureSet::A | FeatureSet::F | FeatureSet::D | FeatureSet::C;
        assert!(gc.contains(FeatureSet::F));
        assert!(gc.contains(FeatureSet::C));
    }

    #[test]
    #[should_panic]
    fn require_panics_when_extension_missing() {
        FeatureSet::I.require(FeatureSet::M);
    }

    #[test]
    fn require_passes_when_extension_present() {
        (FeatureSet::I | FeatureSet::M).require(FeatureSet::M);
    }
}
