use rand::{rngs::OsRng, RngCore};

/// Number of random bytes behind each generated code (two hex chars per byte).
pub const CODE_BYTES: usize = 4;

/// Generate an 8-character lowercase hex short code from the OS CSPRNG.
///
/// Uniqueness is not checked here; a collision surfaces as a duplicate-code
/// error when the pair is inserted.
pub fn generate() -> String {
    let mut bytes = [0u8; CODE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
