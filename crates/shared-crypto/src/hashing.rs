//! # BLAKE3 Key Derivation
//!
//! Domain-separated derivation used by the signing and sealed-box modules.
//! Each caller passes its own context string so derived keys never collide
//! across uses.

/// Derive a 256-bit key from a context string and input key material.
///
/// The context must be a hardcoded, globally unique string.
pub fn blake3_derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    blake3::derive_key(context, key_material)
}
