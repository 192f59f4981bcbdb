use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use uuid::Uuid;

/// Encode a token id into the opaque bearer string handed to clients.
pub fn encode(id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Decode a presented bearer string back into a token id.
///
/// Anything that is not url-safe base64 over exactly 16 bytes is rejected.
pub fn decode(token: &str) -> Option<Uuid> {
    let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;

    Uuid::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_tokens_decode_to_the_same_id() {
        let id = Uuid::new_v4();
        let token = encode(id);

        assert_eq!(decode(&token), Some(id));
    }

    #[test]
    fn encoded_tokens_are_opaque_and_url_safe() {
        let token = encode(Uuid::new_v4());

        assert_eq!(token.len(), 22);
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn garbage_does_not_decode() {
        assert_eq!(decode("not a token"), None);
        assert_eq!(decode(""), None);
        // Valid base64, wrong byte length.
        assert_eq!(decode("YWJj"), None);
    }
}
