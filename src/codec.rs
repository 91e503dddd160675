/*!
Decoding native buffers into host strings, and encoding host strings back into native buffers.
*/
use std::marker::PhantomData;

use log::trace;

use crate::encoding::{Encoding, Unit};
use crate::error::Error;
use crate::host::HostString;
use crate::structure::{Slice, Structure, ZeroTerm};

/**
The outcome of an encode.

All counts are in destination code units.  `units_written()` never exceeds the destination capacity and includes the terminator whenever one was written.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TranscodeResult {
    payload: usize,
    terminated: bool,
    required: usize,
}

impl TranscodeResult {
    /**
    Units written, *including* the terminator.
    */
    pub fn units_written(&self) -> usize {
        self.payload + self.terminated as usize
    }

    /**
    Units of string content written, *excluding* the terminator.
    */
    pub fn payload_units(&self) -> usize {
        self.payload
    }

    /**
    Payload size in bytes for units of `width` bytes.
    */
    pub fn payload_bytes(&self, width: usize) -> Option<usize> {
        self.payload.checked_mul(width)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /**
    Number of units the whole source would have needed, excluding the terminator.
    */
    pub fn required_units(&self) -> usize {
        self.required
    }

    /**
    Returns `true` if not all of the source fit.  Equivalent to `units_written() < required_units() + 1`.
    */
    pub fn is_truncated(&self) -> bool {
        self.payload < self.required
    }
}

/**
A codec between host strings and native strings of encoding `E`.

This is never instantiated; it exists to group the operations for one code-unit width.  Use `Codec<Utf16>`, `Codec<Utf32>`, or `Codec<Wide>` for the platform's `wchar_t`.

Every native buffer is a slice whose length is its declared capacity.  Nothing outside it is read or written.
*/
pub struct Codec<E> where E: Encoding {
    _marker: PhantomData<E>,
}

impl<E> Codec<E> where E: Encoding {
    /**
    Decodes the content of `src` as delimited by structure `S`.
    */
    pub fn decode<S>(src: &[E::Unit], extent: S::Extent) -> Result<HostString, Error>
    where
        S: Structure,
    {
        let content = S::content(src, extent)?;
        trace!("{}{}: decoding {} of {} units", S::debug_prefix(), E::debug_prefix(), content.len(), src.len());
        let mut units = Vec::with_capacity(content.len());
        E::decode_into(content, &mut units)?;
        Ok(HostString::from_units(units))
    }

    /**
    Decodes everything before the first zero unit in `src`.

    # Failure

    Fails with `Error::Unterminated` if `src` contains no zero unit.  The scan never goes past `src.len()`.
    */
    pub fn decode_null_terminated(src: &[E::Unit]) -> Result<HostString, Error> {
        Self::decode::<ZeroTerm>(src, ())
    }

    /**
    Decodes exactly `len` units from the start of `src`, zero units included.

    # Failure

    Fails with `Error::OutOfBounds` if `len` exceeds `src.len()`.
    */
    pub fn decode_with_length(src: &[E::Unit], len: usize) -> Result<HostString, Error> {
        Self::decode::<Slice>(src, len)
    }

    /**
    Encodes `value` into `dst`, truncating if necessary, and terminates the output.

    At most `dst.len() - 1` units of content are written, followed by a single zero unit.  An empty `dst` is left untouched.  Truncation is reported through the result, not as an error.
    */
    pub fn encode(value: &HostString, dst: &mut [E::Unit]) -> TranscodeResult {
        let required = E::measure(value.as_units());

        let room = match dst.len().checked_sub(1) {
            Some(room) => room,
            None => return TranscodeResult { payload: 0, terminated: false, required },
        };

        let payload = E::encode_into(value.as_units(), &mut dst[..room]);
        dst[payload] = E::Unit::zero();

        if payload < required {
            trace!("{}: truncated encode, {} of {} units", E::debug_prefix(), payload, required);
        }

        TranscodeResult { payload, terminated: true, required }
    }

    /**
    As `encode`, but treats a destination with no room at all for a non-empty `value` as an error.

    # Failure

    Fails with `Error::BufferTooSmall` if `dst` is empty and `value` is not.
    */
    pub fn encode_checked(value: &HostString, dst: &mut [E::Unit]) -> Result<TranscodeResult, Error> {
        if dst.is_empty() && !value.is_empty() {
            return Err(Error::BufferTooSmall { required: E::measure(value.as_units()) + 1 });
        }
        Ok(Self::encode(value, dst))
    }

    /**
    Number of units `value` needs in this encoding, excluding the terminator.
    */
    pub fn measure(value: &HostString) -> usize {
        E::measure(value.as_units())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::encoding::{units, Utf16, Utf16Unit, Utf32, Utf32Unit};

    fn utf32(s: &str) -> Vec<Utf32Unit> {
        units::<Utf32, _>(s.chars().map(|c| c as u32))
    }

    #[rstest]
    #[case(0, 0, false)]
    #[case(1, 0, true)]
    #[case(2, 1, true)]
    #[case(4, 3, true)]
    #[case(5, 4, true)]
    #[case(9, 4, true)]
    fn encode_capacity(#[case] cap: usize, #[case] payload: usize, #[case] terminated: bool) {
        let value = HostString::from("ab\u{2603}\u{2007C}");
        let mut dst = vec![Utf32Unit(0xff); cap];
        let r = Codec::<Utf32>::encode(&value, &mut dst);

        assert_eq!(r.payload_units(), payload);
        assert_eq!(r.is_terminated(), terminated);
        assert_eq!(r.units_written(), payload + terminated as usize);
        assert!(r.units_written() <= cap);
        assert_eq!(r.is_truncated(), payload < 4);
        assert_eq!(&dst[..payload], &utf32("ab\u{2603}\u{2007C}")[..payload]);
        if terminated {
            assert!(dst[payload].is_zero());
        }
        for unit in &dst[r.units_written()..] {
            assert_eq!(*unit, Utf32Unit(0xff));
        }
    }

    #[test]
    fn encode_utf16_counts_surrogates() {
        let value = HostString::from("a\u{2007C}");
        let mut dst = [Utf16Unit(0xff); 8];
        let r = Codec::<Utf16>::encode(&value, &mut dst);
        assert_eq!(r.payload_units(), 3);
        assert_eq!(&dst[..4], &[Utf16Unit(0x61), Utf16Unit(0xd840), Utf16Unit(0xdc7c), Utf16Unit(0)]);
    }

    #[test]
    fn encode_checked_rejects_empty_destination() {
        let value = HostString::from("abc");
        assert_eq!(
            Codec::<Utf16>::encode_checked(&value, &mut []),
            Err(Error::BufferTooSmall { required: 4 }),
        );
        let r = Codec::<Utf16>::encode_checked(&HostString::new(), &mut []).unwrap();
        assert_eq!(r.units_written(), 0);
    }

    #[test]
    fn decode_modes() {
        let src = utf32("ab\0cd");
        assert_eq!(Codec::<Utf32>::decode_null_terminated(&src).unwrap(), HostString::from("ab"));
        assert_eq!(Codec::<Utf32>::decode_with_length(&src, 5).unwrap(), HostString::from("ab\0cd"));
        assert_eq!(Codec::<Utf32>::decode_with_length(&src, 1).unwrap(), HostString::from("a"));
        assert!(Codec::<Utf32>::decode_with_length(&src, 6).unwrap_err().is_out_of_bounds());
        assert!(Codec::<Utf32>::decode_null_terminated(&src[3..]).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn decode_utf32_supplementary() {
        let src = utf32("\u{2007C}\0");
        let s = Codec::<Utf32>::decode_null_terminated(&src).unwrap();
        assert_eq!(s.as_units(), &[0xd840, 0xdc7c]);
    }
}
