use crate::{FormatError, Record};

type Result<T = (), E = FormatError> = core::result::Result<T, E>;

/// Data stored in the counter account.
///
/// Encoded as a single little-endian `u32`.  An account freshly allocated with
/// [`CounterState::SIZE`] zero bytes decodes as a counter of zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CounterState {
    pub count: u32,
}

impl CounterState {
    pub const SIZE: usize = 4;

    /// Returns state after executing the instruction; `None` if the counter
    /// would overflow or underflow.
    pub fn apply(self, instruction: CounterInstruction) -> Option<Self> {
        let count = match instruction {
            CounterInstruction::Increment(value) => {
                self.count.checked_add(value)
            }
            CounterInstruction::Decrement(value) => {
                self.count.checked_sub(value)
            }
        }?;
        Some(Self { count })
    }
}

impl Record for CounterState {
    const SIZE: usize = Self::SIZE;
    type Bytes = [u8; Self::SIZE];

    fn to_bytes(&self) -> Self::Bytes {
        self.count.to_le_bytes()
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        let bytes = <&[u8; Self::SIZE]>::try_from(bytes).map_err(|_| {
            FormatError::Length { want: Self::SIZE, got: bytes.len() }
        })?;
        Ok(Self { count: u32::from_le_bytes(*bytes) })
    }
}


/// Instruction of the counter program.
///
/// Encoded as a one-byte discriminant ([`Self::INCREMENT`] or
/// [`Self::DECREMENT`]) followed by the little-endian `u32` argument.  The set
/// of variants is closed: any other discriminant fails to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CounterInstruction {
    /// Adds the value to the counter.
    Increment(u32),
    /// Subtracts the value from the counter.
    Decrement(u32),
}

impl CounterInstruction {
    pub const SIZE: usize = 5;

    pub const INCREMENT: u8 = 0;
    pub const DECREMENT: u8 = 1;

    /// Returns the wire discriminant of the instruction.
    pub fn discriminant(&self) -> u8 {
        match self {
            Self::Increment(_) => Self::INCREMENT,
            Self::Decrement(_) => Self::DECREMENT,
        }
    }

    /// Returns the instruction’s argument.
    pub fn value(&self) -> u32 {
        match *self {
            Self::Increment(value) | Self::Decrement(value) => value,
        }
    }
}

impl Record for CounterInstruction {
    const SIZE: usize = Self::SIZE;
    type Bytes = [u8; Self::SIZE];

    fn to_bytes(&self) -> Self::Bytes {
        let [a, b, c, d] = self.value().to_le_bytes();
        [self.discriminant(), a, b, c, d]
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        let bytes = <&[u8; Self::SIZE]>::try_from(bytes).map_err(|_| {
            FormatError::Length { want: Self::SIZE, got: bytes.len() }
        })?;
        let [tag, a, b, c, d] = *bytes;
        let value = u32::from_le_bytes([a, b, c, d]);
        match tag {
            Self::INCREMENT => Ok(Self::Increment(value)),
            Self::DECREMENT => Ok(Self::Decrement(value)),
            tag => Err(FormatError::UnknownVariant { tag }),
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::encoded_size;

    #[test]
    fn test_sizes() {
        assert_eq!(4, encoded_size::<CounterState>());
        assert_eq!(5, encoded_size::<CounterInstruction>());
        assert_eq!(4, CounterState { count: u32::MAX }.encode().len());
        assert_eq!(5, CounterInstruction::Decrement(u32::MAX).encode().len());
    }

    #[test]
    fn test_state_encoding() {
        let state = CounterState { count: 10 };
        assert_eq!(vec![0x0A, 0, 0, 0], state.encode());
        assert_eq!(Ok(state), CounterState::decode(&[0x0A, 0, 0, 0]));
        assert_eq!(
            Ok(CounterState { count: 0x04030201 }),
            CounterState::decode(&[1, 2, 3, 4])
        );
        assert_eq!(Ok(CounterState::default()), CounterState::decode(&[0; 4]));
    }

    #[test]
    fn test_instruction_encoding() {
        assert_eq!(
            vec![0, 5, 0, 0, 0],
            CounterInstruction::Increment(5).encode()
        );
        assert_eq!(
            vec![1, 0x78, 0x56, 0x34, 0x12],
            CounterInstruction::Decrement(0x12345678).encode()
        );
        assert_eq!(
            Ok(CounterInstruction::Increment(5)),
            CounterInstruction::decode(&[0, 5, 0, 0, 0])
        );
        assert_eq!(
            Ok(CounterInstruction::Decrement(256)),
            CounterInstruction::decode(&[1, 0, 1, 0, 0])
        );
    }

    #[test]
    fn test_decode_errors() {
        let check_state = |got: usize| {
            let bytes = vec![0; got];
            assert_eq!(
                Err(FormatError::Length { want: 4, got }),
                CounterState::decode(&bytes)
            );
        };
        for len in [0, 1, 3, 5, 8] {
            check_state(len);
        }

        let check_ix = |want: FormatError, bytes: &[u8]| {
            assert_eq!(Err(want), CounterInstruction::decode(bytes));
        };
        check_ix(FormatError::Length { want: 5, got: 0 }, &[]);
        check_ix(FormatError::Length { want: 5, got: 4 }, &[0, 1, 2, 3]);
        check_ix(FormatError::Length { want: 5, got: 6 }, &[0; 6]);
        check_ix(FormatError::UnknownVariant { tag: 2 }, &[2, 0, 0, 0, 0]);
        check_ix(FormatError::UnknownVariant { tag: 255 }, &[255, 1, 0, 0, 0]);
    }

    #[test]
    fn test_encode_into() {
        let mut buf = [0xFF; 4];
        assert_eq!(Ok(()), CounterState { count: 258 }.encode_into(&mut buf));
        assert_eq!([2, 1, 0, 0], buf);

        let mut buf = [0xFF; 5];
        assert_eq!(
            Err(FormatError::Length { want: 4, got: 5 }),
            CounterState { count: 258 }.encode_into(&mut buf)
        );
        assert_eq!([0xFF; 5], buf);
    }

    #[test]
    fn test_apply() {
        let state = CounterState { count: 10 };
        let apply = |ix| state.apply(ix).map(|state| state.count);
        assert_eq!(Some(15), apply(CounterInstruction::Increment(5)));
        assert_eq!(Some(0), apply(CounterInstruction::Decrement(10)));
        assert_eq!(None, apply(CounterInstruction::Decrement(11)));
        assert_eq!(None, apply(CounterInstruction::Increment(u32::MAX - 9)));
        assert_eq!(
            Some(u32::MAX),
            apply(CounterInstruction::Increment(u32::MAX - 10))
        );
    }

    /// The counter program and existing clients use Borsh; make sure the
    /// layouts agree.
    #[test]
    fn test_borsh_layout() {
        #[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
        struct Counter {
            count: u32,
        }

        #[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
        enum InstructionType {
            Increment(u32),
            Decrement(u32),
        }

        for count in [0, 10, 0x01020304, u32::MAX] {
            let want = borsh::to_vec(&Counter { count }).unwrap();
            assert_eq!(want, CounterState { count }.encode());

            let want = InstructionType::Increment(count);
            let want = borsh::to_vec(&want).unwrap();
            assert_eq!(want, CounterInstruction::Increment(count).encode());
            let want = InstructionType::Decrement(count);
            let want = borsh::to_vec(&want).unwrap();
            assert_eq!(want, CounterInstruction::Decrement(count).encode());
        }

        let bytes = CounterInstruction::Decrement(7).encode();
        let got = borsh::from_slice::<InstructionType>(&bytes).unwrap();
        assert!(matches!(got, InstructionType::Decrement(7)));
        let bytes = CounterState { count: 7 }.encode();
        assert_eq!(7, borsh::from_slice::<Counter>(&bytes).unwrap().count);
    }

    fn any_instruction() -> impl Strategy<Value = CounterInstruction> {
        prop_oneof![
            any::<u32>().prop_map(CounterInstruction::Increment),
            any::<u32>().prop_map(CounterInstruction::Decrement),
        ]
    }

    proptest! {
        #[test]
        fn prop_state_round_trip(count in any::<u32>()) {
            let state = CounterState { count };
            let bytes = state.encode();
            prop_assert_eq!(CounterState::SIZE, bytes.len());
            prop_assert_eq!(Ok(state), CounterState::decode(&bytes));
        }

        #[test]
        fn prop_instruction_round_trip(ix in any_instruction()) {
            let bytes = ix.encode();
            prop_assert_eq!(CounterInstruction::SIZE, bytes.len());
            prop_assert_eq!(ix.discriminant(), bytes[0]);
            prop_assert_eq!(Ok(ix), CounterInstruction::decode(&bytes));
        }

        #[test]
        fn prop_state_rejects_wrong_length(
            bytes in prop::collection::vec(any::<u8>(), 0..16),
        ) {
            prop_assume!(bytes.len() != CounterState::SIZE);
            prop_assert_eq!(
                Err(FormatError::Length { want: 4, got: bytes.len() }),
                CounterState::decode(&bytes)
            );
        }

        #[test]
        fn prop_instruction_rejects_unknown_tag(
            tag in 2u8..,
            value in any::<u32>(),
        ) {
            let mut bytes = CounterInstruction::Increment(value).encode();
            bytes[0] = tag;
            prop_assert_eq!(
                Err(FormatError::UnknownVariant { tag }),
                CounterInstruction::decode(&bytes)
            );
        }
    }
}
