//! Invite code generation.

use rand::Rng;

/// Code alphabet: uppercase alphanumerics minus the confusable glyphs
/// (0/O, 1/I/L) so codes survive being read aloud.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generates a random invite code of `len` characters.
#[must_use]
pub fn generate(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}
