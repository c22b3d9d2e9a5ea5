use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

/// Generate an opaque identifier: 8 bytes from the OS CSPRNG, hex-encoded.
///
/// If the entropy source fails, falls back to the current UTC time
/// formatted `YYYYMMDDHHMMSS`. The fallback is coarse and collision-prone;
/// it is kept as documented behaviour rather than silently replaced.
pub fn generate() -> String {
    let mut bytes = [0u8; 8];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => hex::encode(bytes),
        Err(_) => Utc::now().format("%Y%m%d%H%M%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sixteen_hex_chars() {
        let id = generate();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_distinct() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }
}
