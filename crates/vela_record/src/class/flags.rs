//! Per-field metadata flags.

use bitflags::bitflags;

bitflags! {
    /// Properties of a managed field, fixed when the record is defined.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FieldFlags: u8 {
        /// The definition gave the field a default.
        const HAS_DEFAULT = 1 << 0;
        /// Must be supplied to the constructor.
        const REQUIRED = 1 << 1;
        /// Declared type was widened to `Optional` by a `None` default.
        const WIDENED = 1 << 2;
        /// Declared by an ancestor and not redeclared.
        const INHERITED = 1 << 3;
    }
}
