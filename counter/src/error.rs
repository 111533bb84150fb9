/// Error decoding or encoding a fixed-layout record.
///
/// Decoding is deterministic so the same malformed input always produces the
/// same error.  It’s up to the caller to decide whether the failure is worth
/// retrying (e.g. reading an account which hasn’t been initialised yet).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error,
)]
pub enum FormatError {
    /// The byte buffer doesn’t match the fixed size of the record.
    #[display("expected {want} bytes but got {got}")]
    Length { want: usize, got: usize },

    /// The instruction discriminant isn’t one of the known variants.
    #[display("unknown instruction variant {tag}")]
    UnknownVariant { tag: u8 },
}

impl FormatError {
    /// Checks that `got` equals `want`; returns [`FormatError::Length`]
    /// otherwise.
    pub(crate) fn check_len(want: usize, got: usize) -> Result<(), Self> {
        if want == got {
            Ok(())
        } else {
            Err(Self::Length { want, got })
        }
    }
}

#[test]
fn test_display() {
    assert_eq!(
        "expected 4 bytes but got 3",
        FormatError::Length { want: 4, got: 3 }.to_string()
    );
    assert_eq!(
        "unknown instruction variant 7",
        FormatError::UnknownVariant { tag: 7 }.to_string()
    );
}
