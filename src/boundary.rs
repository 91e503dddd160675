/*!
The byte-denominated interface the host environment calls.

Host code addresses native memory in bytes, so these functions take byte lengths and convert them to unit counts.  Byte counts returned by encodes *exclude* the terminator; see `TranscodeResult` for the unit-level detail.
*/
use crate::codec::Codec;
use crate::encoding::{Encoding, Utf16, Utf16Unit, Utf32, Utf32Unit, Wide};
use crate::error::Error;
use crate::host::HostString;

/**
Decodes a native string from `memory`.

With `byte_length` of `None`, reads up to the first zero unit, never past the end of `memory`.  With `Some(n)`, reads exactly `n` bytes, zero units included.

# Failure

Fails if `n` is not a multiple of the unit width, if the read would leave `memory`, or if the units cannot be transcoded.
*/
pub fn decode_bytes<E>(memory: &[E::Unit], byte_length: Option<usize>) -> Result<HostString, Error>
where
    E: Encoding,
{
    match byte_length {
        None => Codec::<E>::decode_null_terminated(memory),
        Some(bytes) => Codec::<E>::decode_with_length(memory, units_in(bytes, E::WIDTH)?),
    }
}

/**
Encodes `value` into at most `max_bytes` of `memory`, terminating the output if there is room for a unit.

Returns the number of bytes of string content written, excluding the terminator.  A `max_bytes` that is not a multiple of the unit width is rounded down.

# Failure

Fails with `Error::OutOfBounds` if `max_bytes` declares more memory than `memory` holds.
*/
pub fn encode_bytes<E>(value: &HostString, memory: &mut [E::Unit], max_bytes: usize) -> Result<usize, Error>
where
    E: Encoding,
{
    let capacity = max_bytes / E::WIDTH;
    if capacity > memory.len() {
        return Err(Error::OutOfBounds {
            requested: capacity,
            capacity: memory.len(),
        });
    }

    let r = Codec::<E>::encode(value, &mut memory[..capacity]);
    r.payload_bytes(E::WIDTH).ok_or(Error::SizeOverflow)
}

/**
Number of bytes `value` needs in encoding `E`, excluding the terminator.
*/
pub fn length_bytes<E>(value: &HostString) -> Result<usize, Error> where E: Encoding {
    Codec::<E>::measure(value).checked_mul(E::WIDTH).ok_or(Error::SizeOverflow)
}

pub fn decode16(memory: &[Utf16Unit], byte_length: Option<usize>) -> Result<HostString, Error> {
    decode_bytes::<Utf16>(memory, byte_length)
}

pub fn decode32(memory: &[Utf32Unit], byte_length: Option<usize>) -> Result<HostString, Error> {
    decode_bytes::<Utf32>(memory, byte_length)
}

pub fn decode_wide(memory: &[<Wide as Encoding>::Unit], byte_length: Option<usize>) -> Result<HostString, Error> {
    decode_bytes::<Wide>(memory, byte_length)
}

pub fn encode16(value: &HostString, memory: &mut [Utf16Unit], max_bytes: usize) -> Result<usize, Error> {
    encode_bytes::<Utf16>(value, memory, max_bytes)
}

pub fn encode32(value: &HostString, memory: &mut [Utf32Unit], max_bytes: usize) -> Result<usize, Error> {
    encode_bytes::<Utf32>(value, memory, max_bytes)
}

pub fn encode_wide(value: &HostString, memory: &mut [<Wide as Encoding>::Unit], max_bytes: usize) -> Result<usize, Error> {
    encode_bytes::<Wide>(value, memory, max_bytes)
}

pub fn length_bytes16(value: &HostString) -> Result<usize, Error> {
    length_bytes::<Utf16>(value)
}

pub fn length_bytes32(value: &HostString) -> Result<usize, Error> {
    length_bytes::<Utf32>(value)
}

pub fn length_bytes_wide(value: &HostString) -> Result<usize, Error> {
    length_bytes::<Wide>(value)
}

fn units_in(bytes: usize, width: usize) -> Result<usize, Error> {
    if bytes % width != 0 {
        return Err(Error::UnalignedLength { bytes, width });
    }
    Ok(bytes / width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_byte_lengths() {
        let memory = [Utf16Unit(0x61), Utf16Unit(0)];
        assert_eq!(decode16(&memory, Some(3)), Err(Error::UnalignedLength { bytes: 3, width: 2 }));

        let mut out = [Utf16Unit(0xff); 4];
        // 7 bytes declares 3 units: two of content and the terminator.
        assert_eq!(encode16(&HostString::from("abc"), &mut out, 7), Ok(4));
        assert_eq!(out, [Utf16Unit(0x61), Utf16Unit(0x62), Utf16Unit(0), Utf16Unit(0xff)]);
    }

    #[test]
    fn less_than_one_unit_writes_nothing() {
        let mut out = [Utf32Unit(0xff); 2];
        assert_eq!(encode32(&HostString::from("a"), &mut out, 3), Ok(0));
        assert_eq!(out, [Utf32Unit(0xff); 2]);
    }

    #[test]
    fn declared_capacity_must_fit() {
        let mut out = [Utf32Unit(0); 2];
        assert_eq!(
            encode32(&HostString::from("a"), &mut out, 12),
            Err(Error::OutOfBounds { requested: 3, capacity: 2 }),
        );
    }

    #[test]
    fn lengths_in_bytes() {
        let s = HostString::from("a\u{2007C}");
        assert_eq!(length_bytes16(&s), Ok(6));
        assert_eq!(length_bytes32(&s), Ok(8));
    }
}
