use crate::FormatError;

type Result<T = (), E = FormatError> = core::result::Result<T, E>;

/// A fixed-layout binary record.
///
/// The encoded size of a record is constant and independent of field values.
/// Encoding never fails; decoding fails if the input isn’t exactly
/// [`Record::SIZE`] bytes long or holds a value the record can’t represent.
pub trait Record: Sized {
    /// Length of the encoded record in bytes.
    const SIZE: usize;

    /// Fixed-size byte array holding an encoded record.
    type Bytes: AsRef<[u8]>;

    /// Encodes the record into a byte array.
    fn to_bytes(&self) -> Self::Bytes;

    /// Decodes the record from a buffer of exactly [`Record::SIZE`] bytes.
    fn decode(bytes: &[u8]) -> Result<Self>;

    /// Encodes the record into a newly allocated vector.
    fn encode(&self) -> Vec<u8> {
        self.to_bytes().as_ref().to_vec()
    }

    /// Encodes the record into given buffer.
    ///
    /// The buffer must be exactly [`Record::SIZE`] bytes long.  This is meant
    /// for writing into account data which is allocated up front.
    fn encode_into(&self, dst: &mut [u8]) -> Result {
        FormatError::check_len(Self::SIZE, dst.len())?;
        dst.copy_from_slice(self.to_bytes().as_ref());
        Ok(())
    }
}

/// Returns the encoded size of record `R`.
///
/// Doesn’t need a value of the record so it can be used to size an account
/// before any state exists.
pub const fn encoded_size<R: Record>() -> usize {
    R::SIZE
}
