/*!
Round-trip validation of the codec.

`RoundTrip` pushes a sample string from native memory to the host and back through each of the codec's modes, checking the native units that come out against the ones that went in.  It stops at the first discrepancy.
*/
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::ops::Range;

use log::{debug, warn};
use thiserror::Error;

use crate::alloc::{AllocError, Allocator, Rust};
use crate::buffer::UnitBuffer;
use crate::codec::{Codec, TranscodeResult};
use crate::encoding::{Encoding, Unit};
use crate::error::Error as CodecError;
use crate::host::HostString;

/**
The sample used by the reference scenario.

U+2603 is a snowman, U+20AC the euro sign and U+2007C a Han character outside the Basic Multilingual Plane, which takes a surrogate pair in UTF-16.
*/
pub const REFERENCE_SAMPLE: &str = "abc\u{2603}\u{20AC}\u{2007C}123 --- abc\u{2603}\u{20AC}\u{2007C}123";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Source,
    FullRoundTrip,
    Truncation,
    Substring,
    EmbeddedZero,
}

impl Display for Step {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match *self {
            Step::Source => "source",
            Step::FullRoundTrip => "full round trip",
            Step::Truncation => "truncation",
            Step::Substring => "explicit-length substring",
            Step::EmbeddedZero => "embedded zero",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{step}: {source}")]
    Codec { step: Step, source: CodecError },
    #[error("{step}: {source}")]
    Alloc { step: Step, source: AllocError },
    #[error("{step}: expected {expected} units, got {actual}")]
    LengthMismatch { step: Step, expected: usize, actual: usize },
    #[error("{step}: expected truncated write of {expected} units, got {actual}")]
    TruncationMismatch { step: Step, expected: usize, actual: usize },
    #[error("{step}: unit {at} is 0x{actual:x}, expected 0x{expected:x}")]
    ContentMismatch { step: Step, at: usize, expected: u32, actual: u32 },
    #[error("anchor {anchor:?} does not occur in the sample")]
    AnchorMissing { anchor: char },
}

/**
What each step of a successful run wrote.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub full: TranscodeResult,
    pub truncated: TranscodeResult,
    pub substring: TranscodeResult,
    pub embedded_zero: TranscodeResult,
}

/**
A round-trip scenario for encoding `E`, with native buffers allocated by `A`.

Each step allocates its own buffers; they are released when the step returns, whether or not it succeeded.  Destination buffers are filled with U+FFFD before encoding, so a terminator the encoder failed to write reads back as non-zero.
*/
pub struct RoundTrip<E, A = Rust> where E: Encoding, A: Allocator<AllocError=AllocError> {
    source: Vec<E::Unit>,
    truncated_capacity: usize,
    anchor: char,
    _marker: PhantomData<A>,
}

impl<E, A> RoundTrip<E, A> where E: Encoding, A: Allocator<AllocError=AllocError> {
    /**
    Creates a scenario for `sample`, truncating to 6 units and anchoring on the first `-`.

    The anchor is located by its encoded units, so an anchor outside the Basic Multilingual Plane spans two units under `Utf16`.
    */
    pub fn new(sample: &str) -> Self {
        let host = HostString::from(sample);
        let mut source = vec![E::Unit::zero(); E::measure(host.as_units())];
        E::encode_into(host.as_units(), &mut source);
        RoundTrip {
            source,
            truncated_capacity: 6,
            anchor: '-',
            _marker: PhantomData,
        }
    }

    /**
    The reference scenario, over `REFERENCE_SAMPLE`.
    */
    pub fn reference() -> Self {
        Self::new(REFERENCE_SAMPLE)
    }

    pub fn truncated_capacity(mut self, capacity: usize) -> Self {
        self.truncated_capacity = capacity;
        self
    }

    pub fn anchor(mut self, anchor: char) -> Self {
        self.anchor = anchor;
        self
    }

    /**
    The native units of the sample, without a terminator.
    */
    pub fn source(&self) -> &[E::Unit] {
        &self.source
    }

    /**
    Runs every step in order.
    */
    pub fn run(&self) -> Result<Report, ValidationError> {
        let r = self.run_steps();
        if let Err(ref err) = r {
            warn!("{}{} round trip failed: {}", E::debug_prefix(), A::debug_prefix(), err);
        }
        r
    }

    fn run_steps(&self) -> Result<Report, ValidationError> {
        let src = UnitBuffer::<E, A>::with_terminator(&self.source)
            .map_err(|source| ValidationError::Alloc { step: Step::Source, source })?;

        let full = self.full_round_trip(&src)?;
        let truncated = self.truncation(&src)?;
        let anchor = self.anchor_range()?;
        let substring = self.substring(anchor.end)?;
        let embedded_zero = self.embedded_zero(anchor)?;

        Ok(Report { full, truncated, substring, embedded_zero })
    }

    fn full_round_trip(&self, src: &[E::Unit]) -> Result<TranscodeResult, ValidationError> {
        let step = Step::FullRoundTrip;
        let len = self.source.len();

        let host = Codec::<E>::decode_null_terminated(src).map_err(codec(step))?;
        let mut memory = scratch::<E, A>(step, len + 1)?;
        let r = Codec::<E>::encode(&host, &mut memory);
        debug!("{}: {:?} wrote {:?}", step, host, r);

        check_length(step, len, r.payload_units())?;
        check_units(step, src, &memory)?;

        let again = Codec::<E>::decode_null_terminated(&memory).map_err(codec(step))?;
        check_host(step, &host, &again)?;
        Ok(r)
    }

    fn truncation(&self, src: &[E::Unit]) -> Result<TranscodeResult, ValidationError> {
        let step = Step::Truncation;
        let cap = self.truncated_capacity;
        let expected = self.source.len().min(cap.saturating_sub(1));

        let host = Codec::<E>::decode_null_terminated(src).map_err(codec(step))?;
        let mut memory = scratch::<E, A>(step, self.source.len() + 1)?;
        let r = Codec::<E>::encode(&host, &mut memory[..cap.min(self.source.len() + 1)]);
        debug!("{}: capacity {} wrote {:?}", step, cap, r);

        if r.payload_units() != expected {
            return Err(ValidationError::TruncationMismatch { step, expected, actual: r.payload_units() });
        }
        let expected_total = if cap == 0 { 0 } else { expected + 1 };
        if r.units_written() != expected_total {
            return Err(ValidationError::TruncationMismatch { step, expected: expected_total, actual: r.units_written() });
        }
        if cap > 0 {
            check_units(step, &self.source[..expected], &memory[..expected])?;
            check_zero(step, &memory, expected)?;
        }
        Ok(r)
    }

    fn substring(&self, end: usize) -> Result<TranscodeResult, ValidationError> {
        let step = Step::Substring;
        let sub = &self.source[..end];

        // Exactly as long as the substring, so there is no terminator to find.
        let native = UnitBuffer::<E, A>::from_units(sub)
            .map_err(|source| ValidationError::Alloc { step, source })?;
        let host = Codec::<E>::decode_with_length(&native, sub.len()).map_err(codec(step))?;

        let mut memory = scratch::<E, A>(step, self.source.len() + 1)?;
        let r = Codec::<E>::encode(&host, &mut memory);
        debug!("{}: {:?} wrote {:?}", step, host, r);

        check_length(step, sub.len(), r.payload_units())?;
        check_units(step, sub, &memory[..sub.len()])?;
        Ok(r)
    }

    fn embedded_zero(&self, anchor: Range<usize>) -> Result<TranscodeResult, ValidationError> {
        let step = Step::EmbeddedZero;
        let mut modified = self.source.clone();
        for unit in &mut modified[anchor] {
            *unit = E::Unit::zero();
        }

        let native = UnitBuffer::<E, A>::from_units(&modified)
            .map_err(|source| ValidationError::Alloc { step, source })?;
        let host = Codec::<E>::decode_with_length(&native, modified.len()).map_err(codec(step))?;

        let mut memory = scratch::<E, A>(step, self.source.len() + 1)?;
        let r = Codec::<E>::encode(&host, &mut memory);
        debug!("{}: {:?} wrote {:?}", step, host, r);

        check_length(step, modified.len(), r.payload_units())?;
        check_units(step, &modified, &memory[..modified.len()])?;
        Ok(r)
    }

    /**
    Units of the first occurrence of the anchor.
    */
    fn anchor_range(&self) -> Result<Range<usize>, ValidationError> {
        let mut host = [0u16; 2];
        let host = self.anchor.encode_utf16(&mut host);
        let mut needle = vec![E::Unit::zero(); E::measure(host)];
        E::encode_into(host, &mut needle);

        self.source.windows(needle.len())
            .position(|w| w == &needle[..])
            .map(|at| at..at + needle.len())
            .ok_or(ValidationError::AnchorMissing { anchor: self.anchor })
    }
}

/**
Allocates a destination buffer of `capacity` units, every one of them U+FFFD.
*/
fn scratch<E, A>(step: Step, capacity: usize) -> Result<UnitBuffer<E, A>, ValidationError>
where
    E: Encoding,
    A: Allocator<AllocError=AllocError>,
{
    let mut buf = UnitBuffer::<E, A>::zeroed(capacity)
        .map_err(|source| ValidationError::Alloc { step, source })?;
    let mut fill = [E::Unit::zero()];
    E::encode_into(&[0xfffd], &mut fill);
    buf.fill(fill[0]);
    Ok(buf)
}

fn codec(step: Step) -> impl Fn(CodecError) -> ValidationError {
    move |source| ValidationError::Codec { step, source }
}

fn check_length(step: Step, expected: usize, actual: usize) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::LengthMismatch { step, expected, actual });
    }
    Ok(())
}

/**
Compares `expected` against the front of `actual`, unit for unit.
*/
fn check_units<U>(step: Step, expected: &[U], actual: &[U]) -> Result<(), ValidationError> where U: Unit {
    for (at, e) in expected.iter().enumerate() {
        let a = actual.get(at).map(|u| u.value());
        if a != Some(e.value()) {
            return Err(ValidationError::ContentMismatch {
                step,
                at,
                expected: e.value(),
                actual: a.unwrap_or(0),
            });
        }
    }
    Ok(())
}

fn check_zero<U>(step: Step, memory: &[U], at: usize) -> Result<(), ValidationError> where U: Unit {
    match memory.get(at) {
        Some(u) if u.is_zero() => Ok(()),
        other => Err(ValidationError::ContentMismatch {
            step,
            at,
            expected: 0,
            actual: other.map_or(0, |u| u.value()),
        }),
    }
}

fn check_host(step: Step, expected: &HostString, actual: &HostString) -> Result<(), ValidationError> {
    let (e, a) = (expected.as_units(), actual.as_units());
    if e.len() != a.len() {
        return Err(ValidationError::LengthMismatch { step, expected: e.len(), actual: a.len() });
    }
    match e.iter().zip(a).position(|(x, y)| x != y) {
        None => Ok(()),
        Some(at) => Err(ValidationError::ContentMismatch {
            step,
            at,
            expected: e[at] as u32,
            actual: a[at] as u32,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Utf16, Utf16Unit, Utf32, Utf32Unit};

    #[test]
    fn scratch_is_never_zero() {
        let buf = scratch::<Utf32, Rust>(Step::Truncation, 4).unwrap();
        assert!(buf.iter().all(|u| *u == Utf32Unit(0xfffd)));
        let buf = scratch::<Utf16, Rust>(Step::Truncation, 4).unwrap();
        assert!(buf.iter().all(|u| *u == Utf16Unit(0xfffd)));
    }

    #[test]
    fn missing_terminator_is_caught() {
        // What an encoder that forgot the terminator would leave behind.
        let mut memory = scratch::<Utf32, Rust>(Step::Truncation, 6).unwrap();
        let host = HostString::from("abcde");
        Utf32::encode_into(host.as_units(), &mut memory[..5]);

        assert_eq!(
            check_zero(Step::Truncation, &memory, 5),
            Err(ValidationError::ContentMismatch {
                step: Step::Truncation,
                at: 5,
                expected: 0,
                actual: 0xfffd,
            }),
        );

        let src = UnitBuffer::<Utf32>::with_terminator(&memory[..5]).unwrap();
        assert_eq!(
            check_units(Step::FullRoundTrip, &src, &memory),
            Err(ValidationError::ContentMismatch {
                step: Step::FullRoundTrip,
                at: 5,
                expected: 0,
                actual: 0xfffd,
            }),
        );

        memory[5] = Utf32Unit(0);
        assert_eq!(check_zero(Step::Truncation, &memory, 5), Ok(()));
        assert_eq!(check_units(Step::FullRoundTrip, &src, &memory), Ok(()));
    }
}
