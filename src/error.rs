use thiserror::Error;

/**
Errors raised by the codec and the byte-level host interface.

Truncating an encode is *not* an error; see `TranscodeResult`.
*/
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("read of {requested} units exceeds capacity of {capacity} units")]
    OutOfBounds { requested: usize, capacity: usize },
    #[error("no zero terminator within capacity of {capacity} units")]
    Unterminated { capacity: usize },
    #[error("destination has no room for {required} units")]
    BufferTooSmall { required: usize },
    #[error("invalid code point 0x{value:x} at unit offset {at}")]
    InvalidCodePoint { at: usize, value: u32 },
    #[error("length of {bytes} bytes is not a multiple of the {width}-byte unit width")]
    UnalignedLength { bytes: usize, width: usize },
    #[error("overflow while computing byte length")]
    SizeOverflow,
}

impl Error {
    /**
    Returns `true` for errors caused by a read reaching past the declared capacity of a buffer.
    */
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(*self, Error::OutOfBounds { .. } | Error::Unterminated { .. })
    }
}
