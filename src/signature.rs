use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use openssl::{
    hash::MessageDigest,
    pkey::{Id, PKey},
    sign::Verifier,
};

use crate::{
    domain::entities::verification_result::VerificationResult, errors::ReceiptSignatureError,
};

/// Standard alphabet with padding. Non-zero bits after the last full byte
/// are ignored rather than rejected.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Verifies the signature Google Play attaches to an in-app purchase receipt.
///
/// public_key:
///   The app's base64-encoded RSA public key (DER SubjectPublicKeyInfo), as
///   shown in the Play Console under "Monetization setup".
/// receipt:
///   The purchase JSON exactly as delivered by the store. The signature is
///   computed over these bytes, so they must not be re-serialized.
/// signature:
///   The base64-encoded RSASSA-PKCS1-v1_5 / SHA-1 signature delivered
///   alongside the receipt.
///
/// A signature that simply does not match yields `valid == false` without an
/// error; only malformed inputs set `error`.
pub fn verify_signature(public_key: &str, receipt: &[u8], signature: &str) -> VerificationResult {
    let key_der = match decode_base64(public_key) {
        Ok(der) => der,
        Err(e) => {
            tracing::debug!(error = %e, "public key is not valid base64");
            return VerificationResult::rejected(ReceiptSignatureError::InvalidKeyEncoding);
        }
    };
    let key = match PKey::public_key_from_der(&key_der) {
        Ok(key) if !is_exact_encoding(&key, &key_der) => {
            tracing::debug!("public key has trailing data");
            return VerificationResult::rejected(ReceiptSignatureError::UnsupportedOrMalformedKey);
        }
        Ok(key) if key.id() == Id::RSA => key,
        Ok(key) => {
            tracing::debug!(key_type = ?key.id(), "public key is not an RSA key");
            return VerificationResult::rejected(ReceiptSignatureError::UnsupportedOrMalformedKey);
        }
        Err(e) => {
            tracing::debug!(error = %e, "public key could not be parsed");
            return VerificationResult::rejected(ReceiptSignatureError::UnsupportedOrMalformedKey);
        }
    };
    let signature = match decode_base64(signature) {
        Ok(sig) => sig,
        Err(e) => {
            tracing::debug!(error = %e, "signature is not valid base64");
            return VerificationResult::rejected(ReceiptSignatureError::InvalidSignatureEncoding);
        }
    };
    // Any failure inside the RSA check (wrong signature length, bad padding)
    // means the signature does not match.
    VerificationResult::verified(rsa_sha1_verify(&key, receipt, &signature).unwrap_or(false))
}

fn rsa_sha1_verify(
    key: &PKey<openssl::pkey::Public>,
    data: &[u8],
    signature: &[u8],
) -> Result<bool, openssl::error::ErrorStack> {
    let mut verifier = Verifier::new(MessageDigest::sha1(), key)?;
    verifier.update(data)?;
    verifier.verify(signature)
}

/// OpenSSL stops reading after the first SubjectPublicKeyInfo, so anything
/// appended to it only shows up as a difference on re-encoding.
fn is_exact_encoding(key: &PKey<openssl::pkey::Public>, der: &[u8]) -> bool {
    key.public_key_to_der()
        .map(|encoded| encoded == der)
        .unwrap_or(false)
}

/// Standard padded base64. Line breaks are skipped, since keys copied from
/// the Play Console are sometimes wrapped.
fn decode_base64(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if input.contains(['\r', '\n']) {
        let joined: String = input.chars().filter(|c| *c != '\r' && *c != '\n').collect();
        LENIENT_BASE64.decode(joined)
    } else {
        LENIENT_BASE64.decode(input)
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;

    use super::*;

    const RECEIPT: &[u8] = br#"{"orderId":"GPA.xxxx-xxxx-xxxx-xxxxx","packageName":"my.package","productId":"myproduct","purchaseTime":1437564796303,"purchaseState":0,"developerPayload":"user001","purchaseToken":"some-token"}"#;

    const RSA_PUBLIC_KEY: &str = "MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQDGvModvVUrqJ9C5fy8J77ZQ7JDC6+tf5iK8C74/3mjmcvwo4nmprCgzR/BQIEuZWJi8KX+jiJUXKXF90JPsXHkKAPq6A1SCga7kWvs/M8srMpjNS9zJdwZF+eDOR0+lJEihO04zlpAV9ybPJ3Q621y1HUeVpwdxDNLQpJTuIflnwIDAQAB";

    const SIGNATURE: &str = "gj0N8LANKXOw4OhWkS1UZmDVUxM1UIP28F6bDzEp7BCqcVAe0DuDxmAY5wXdEgMRx/VM1Nl2crjogeV60OqCsbIaWqS/ZJwdP127aKR0jk8sbX36ssyYZ0DdZdBdCr1tBZ/eSW1GlGuD/CgVaxns0JaWecXakgoV7j+RF2AFbS4=";

    // Valid base64, but 128 random bytes rather than a DER key.
    const NOT_A_KEY: &str = "JTbngOdvBE0rfdOs3GeuBnPB+YEP1w/peM4VJbnVz+hN9Td25vPjAznX9YKTGQN4iDohZ07wtl+zYygIcpSCc2ozNZUs9pV0s5itayQo22aT5myJrQmkp94ZSGI2npDP4+FE6ZiF+7khl3qoE0rVZq4G2mfk5LIIyTPTSA4UvyQ=";

    // P-256 SubjectPublicKeyInfo.
    const EC_PUBLIC_KEY: &str = "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE0CD8P47bUZtvP8VekLA8BZVinPJwVCbZb2HmlGxhd6uHW6GpXVhQvVmzZHDs6na1+OpdihfyCBA7xxZ20XbBew==";

    #[test]
    fn test_public_key_invalid_base64() {
        let r = verify_signature("dummy_public_key", RECEIPT, SIGNATURE);
        assert!(!r.valid);
        assert_eq!(r.error, Some(ReceiptSignatureError::InvalidKeyEncoding));
    }

    #[test]
    fn test_public_key_not_rsa() {
        let r = verify_signature(NOT_A_KEY, RECEIPT, SIGNATURE);
        assert!(!r.valid);
        assert_eq!(r.error, Some(ReceiptSignatureError::UnsupportedOrMalformedKey));
    }

    #[test]
    fn test_public_key_is_ec() {
        let r = verify_signature(EC_PUBLIC_KEY, RECEIPT, SIGNATURE);
        assert!(!r.valid);
        assert_eq!(r.error, Some(ReceiptSignatureError::UnsupportedOrMalformedKey));
    }

    #[test]
    fn test_empty_public_key() {
        let r = verify_signature("", RECEIPT, SIGNATURE);
        assert_eq!(r.error, Some(ReceiptSignatureError::UnsupportedOrMalformedKey));
    }

    #[test]
    fn test_public_key_with_trailing_data() {
        let mut der = LENIENT_BASE64.decode(RSA_PUBLIC_KEY).unwrap();
        der.extend_from_slice(b"garbage");
        let key = LENIENT_BASE64.encode(&der);

        let r = verify_signature(&key, RECEIPT, SIGNATURE);
        assert!(!r.valid);
        assert_eq!(r.error, Some(ReceiptSignatureError::UnsupportedOrMalformedKey));
    }

    #[test]
    fn test_signature_with_trailing_bits_is_evaluated() {
        let r = verify_signature(RSA_PUBLIC_KEY, RECEIPT, "AB==");
        assert_eq!(
            r,
            VerificationResult {
                valid: false,
                error: None
            }
        );

        // "5" differs from "4" only in bits that fall past the last byte.
        let altered = SIGNATURE.replace("S4=", "S5=");
        assert_ne!(altered, SIGNATURE);
        let r = verify_signature(RSA_PUBLIC_KEY, RECEIPT, &altered);
        assert!(r.valid);
        assert_eq!(r.error, None);
    }

    #[test]
    fn test_public_key_with_trailing_bits_is_decoded() {
        // Same DER as EC_PUBLIC_KEY, so decoding succeeds and parsing decides.
        let key = EC_PUBLIC_KEY.replace("Bew==", "Bex==");
        assert_ne!(key, EC_PUBLIC_KEY);
        let r = verify_signature(&key, RECEIPT, SIGNATURE);
        assert_eq!(r.error, Some(ReceiptSignatureError::UnsupportedOrMalformedKey));
    }

    #[test]
    fn test_signature_invalid_base64() {
        let r = verify_signature(RSA_PUBLIC_KEY, RECEIPT, "invalid_signature");
        assert!(!r.valid);
        assert_eq!(r.error, Some(ReceiptSignatureError::InvalidSignatureEncoding));
    }

    #[test]
    fn test_key_error_takes_precedence_over_signature_error() {
        let r = verify_signature("dummy_public_key", RECEIPT, "invalid_signature");
        assert_eq!(r.error, Some(ReceiptSignatureError::InvalidKeyEncoding));
    }

    #[test]
    fn test_signature_mismatch_is_not_an_error() {
        let r = verify_signature(RSA_PUBLIC_KEY, RECEIPT, NOT_A_KEY);
        assert_eq!(
            r,
            VerificationResult {
                valid: false,
                error: None
            }
        );
    }

    #[test]
    fn test_signature_wrong_length_is_not_an_error() {
        let r = verify_signature(RSA_PUBLIC_KEY, RECEIPT, "AAAA");
        assert!(!r.valid);
        assert_eq!(r.error, None);
        let r = verify_signature(RSA_PUBLIC_KEY, RECEIPT, "");
        assert!(!r.valid);
        assert_eq!(r.error, None);
    }

    #[test]
    fn test_valid_signature() {
        let r = verify_signature(RSA_PUBLIC_KEY, RECEIPT, SIGNATURE);
        assert!(r.valid);
        assert_eq!(r.error, None);
    }

    #[test]
    fn test_wrapped_public_key() {
        let wrapped = format!("{}\r\n{}", &RSA_PUBLIC_KEY[..64], &RSA_PUBLIC_KEY[64..]);
        assert!(verify_signature(&wrapped, RECEIPT, SIGNATURE).valid);
    }

    #[test]
    fn test_receipt_bytes_used_verbatim() {
        let mut receipt = RECEIPT.to_vec();
        receipt.push(b'\n');
        let r = verify_signature(RSA_PUBLIC_KEY, &receipt, SIGNATURE);
        assert!(!r.valid);
        assert_eq!(r.error, None);

        let spaced = String::from_utf8(RECEIPT.to_vec())
            .unwrap()
            .replacen(',', ", ", 1);
        assert!(!verify_signature(RSA_PUBLIC_KEY, spaced.as_bytes(), SIGNATURE).valid);
    }

    #[test]
    fn test_idempotent() {
        let first = verify_signature(RSA_PUBLIC_KEY, RECEIPT, SIGNATURE);
        let second = verify_signature(RSA_PUBLIC_KEY, RECEIPT, SIGNATURE);
        assert_eq!(first, second);
        let first = verify_signature(NOT_A_KEY, RECEIPT, SIGNATURE);
        let second = verify_signature(NOT_A_KEY, RECEIPT, SIGNATURE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_calls() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| verify_signature(RSA_PUBLIC_KEY, RECEIPT, SIGNATURE)))
            .collect();
        for h in handles {
            assert!(h.join().unwrap().valid);
        }
    }
}
