use crate::errors::ReceiptSignatureError;

/// Outcome of verifying a receipt signature.
///
/// `valid == false` with `error == None` means the inputs were well-formed
/// but the signature does not match the receipt. `error` is only set when the
/// inputs could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationResult {
    pub valid: bool,
    pub error: Option<ReceiptSignatureError>,
}

impl VerificationResult {
    pub(crate) fn verified(valid: bool) -> Self {
        Self { valid, error: None }
    }

    pub(crate) fn rejected(error: ReceiptSignatureError) -> Self {
        Self {
            valid: false,
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// `Err` if the inputs were malformed, otherwise `Ok(valid)`.
    pub fn into_result(self) -> Result<bool, ReceiptSignatureError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.valid),
        }
    }
}

impl From<VerificationResult> for Result<bool, ReceiptSignatureError> {
    fn from(r: VerificationResult) -> Self {
        r.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(VerificationResult::verified(true).into_result(), Ok(true));
        assert_eq!(VerificationResult::verified(false).into_result(), Ok(false));
        assert_eq!(
            VerificationResult::rejected(ReceiptSignatureError::InvalidKeyEncoding).into_result(),
            Err(ReceiptSignatureError::InvalidKeyEncoding)
        );
    }

    #[test]
    fn test_rejected_is_never_valid() {
        let r = VerificationResult::rejected(ReceiptSignatureError::InvalidSignatureEncoding);
        assert!(!r.is_valid());
    }
}
