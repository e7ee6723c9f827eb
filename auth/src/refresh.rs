use rand::rngs::OsRng;
use rand::RngCore;

/// Refresh token size in bytes (32 bytes = 256 bits of entropy)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token.
///
/// OS-provided entropy, hex encoded (64 characters).
pub fn generate_refresh_token() -> String {
    let mut buffer = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut buffer);
    hex::encode(buffer)
}
