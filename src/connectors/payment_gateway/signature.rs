use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str, payload: &[u8]) -> Option<HmacSha256> {
    // HMAC accepts keys of any length, including empty ones
    match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mut mac) => {
            mac.update(payload);
            Some(mac)
        }
        Err(err) => {
            tracing::error!("error generating hmac {err:?}");
            None
        }
    }
}

/// Lower-case hex HMAC-SHA256 of `payload`.
pub fn sign(secret: &str, payload: &[u8]) -> String {
    mac(secret, payload)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Checks a hex signature supplied by the caller. The digest comparison
/// is done by `Mac::verify_slice` in constant time. Hex case is ignored.
pub fn verify(secret: &str, payload: &[u8], supplied: &str) -> bool {
    let supplied = match hex::decode(supplied.trim()) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        _ => return false,
    };

    mac(secret, payload).map_or(false, |mac| mac.verify_slice(&supplied).is_ok())
}

/// The payload the checkout widget signs: `<order_id>|<payment_id>`.
pub fn payment_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> String {
    sign(secret, payment_payload(order_id, payment_id).as_bytes())
}

pub fn verify_payment(secret: &str, order_id: &str, payment_id: &str, supplied: &str) -> bool {
    verify(secret, payment_payload(order_id, payment_id).as_bytes(), supplied)
}

pub fn verify_body(secret: &str, body: &[u8], supplied: &str) -> bool {
    verify(secret, body, supplied)
}
