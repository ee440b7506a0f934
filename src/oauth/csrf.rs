use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

const STATE_BYTES: usize = 32;

/// Random URL-safe value round-tripped through the authorization redirect.
pub fn generate_state() -> String {
    let buf: [u8; STATE_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(buf)
}
