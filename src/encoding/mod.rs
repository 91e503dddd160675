/*!
Encoding types and traits.

An encoding fixes the width of a native code unit and how a run of those units maps onto host string units.  The host side is always UTF-16, so `Utf16` is a straight copy while `Utf32` has to split and pair surrogates.
*/
pub mod conv;

use std::fmt;

use crate::error::Error;
use self::conv::{PairSurrogates, SplitSurrogates};

macro_rules! naive_unit_impl {
    ($ty_name:ident, $repr:ty) => {
        unsafe impl Unit for $ty_name {
            type Repr = $repr;

            #[inline]
            fn zero() -> Self {
                $ty_name(0)
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.0 == 0
            }

            #[inline]
            fn from_repr(v: $repr) -> Self {
                $ty_name(v)
            }

            #[inline]
            fn into_repr(self) -> $repr {
                self.0
            }

            #[inline]
            fn value(&self) -> u32 {
                self.0 as u32
            }
        }

        impl fmt::Debug for $ty_name {
            fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
                write!(fmt, "{}(0x{:x})", stringify!($ty_name), self.0)
            }
        }

        impl From<$repr> for $ty_name {
            fn from(v: $repr) -> Self {
                $ty_name(v)
            }
        }
    };
}

/**
A fixed-width native string encoding.

This will be implemented by a marker type.  All lengths and capacities in this crate are counted in `Unit`s; `WIDTH` converts them to bytes.
*/
pub trait Encoding {
    type Unit: Unit<Repr=Self::FfiUnit>;
    type FfiUnit: Copy;

    /**
    Size of one code unit, in bytes.
    */
    const WIDTH: usize;

    /**
    Returns a string which can be used to uniquely identify this encoding in debug output.
    */
    fn debug_prefix() -> &'static str;

    /**
    Transcodes native units into host units, appending them to `out`.

    Zero units are content like any other.
    */
    fn decode_into(units: &[Self::Unit], out: &mut Vec<u16>) -> Result<(), Error>;

    /**
    Transcodes host units into `dst`, stopping when either runs out.  Returns the number of units written.
    */
    fn encode_into(host: &[u16], dst: &mut [Self::Unit]) -> usize;

    /**
    Returns the number of native units needed to hold `host`, excluding any terminator.
    */
    fn measure(host: &[u16]) -> usize;
}

/**
A single native code unit.

# Safety

The all-zero bit pattern must be a valid value equal to `zero()`, and the type must have the same layout as `Repr`.  Native buffers are handed out from zeroed allocations and reinterpreted from foreign pointers on the strength of this.
*/
pub unsafe trait Unit: Copy + Eq + fmt::Debug + 'static {
    type Repr: Copy;

    fn zero() -> Self;
    fn is_zero(&self) -> bool;
    fn from_repr(v: Self::Repr) -> Self;
    fn into_repr(self) -> Self::Repr;

    /**
    The unit's numeric value, widened.
    */
    fn value(&self) -> u32;
}

/**
UTF-16 native strings; possibly invalid.
*/
pub enum Utf16 {}

impl Encoding for Utf16 {
    type Unit = Utf16Unit;
    type FfiUnit = u16;

    const WIDTH: usize = 2;

    fn debug_prefix() -> &'static str { "Utf16" }

    fn decode_into(units: &[Utf16Unit], out: &mut Vec<u16>) -> Result<(), Error> {
        out.extend(units.iter().map(|u| u.0));
        Ok(())
    }

    fn encode_into(host: &[u16], dst: &mut [Utf16Unit]) -> usize {
        let n = host.len().min(dst.len());
        for (slot, &cu) in dst[..n].iter_mut().zip(host) {
            *slot = Utf16Unit(cu);
        }
        n
    }

    fn measure(host: &[u16]) -> usize {
        host.len()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Utf16Unit(pub u16);

naive_unit_impl! { Utf16Unit, u16 }

/**
UTF-32 native strings.

Decoding accepts any value up to U+10FFFF.  Surrogate values are carried through as single host units, the same way encoding writes unpaired host surrogates.
*/
pub enum Utf32 {}

impl Encoding for Utf32 {
    type Unit = Utf32Unit;
    type FfiUnit = u32;

    const WIDTH: usize = 4;

    fn debug_prefix() -> &'static str { "Utf32" }

    fn decode_into(units: &[Utf32Unit], out: &mut Vec<u16>) -> Result<(), Error> {
        let mut err = Ok(());
        out.extend(SplitSurrogates::new(units.iter().cloned(), &mut err));
        err
    }

    fn encode_into(host: &[u16], dst: &mut [Utf32Unit]) -> usize {
        let mut n = 0;
        for (slot, cp) in dst.iter_mut().zip(PairSurrogates::new(host.iter().cloned())) {
            *slot = Utf32Unit(cp);
            n += 1;
        }
        n
    }

    fn measure(host: &[u16]) -> usize {
        PairSurrogates::new(host.iter().cloned()).count()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Utf32Unit(pub u32);

naive_unit_impl! { Utf32Unit, u32 }

/**
The encoding of the platform's `wchar_t`.

This is a build-time choice: 16 bits on Windows or with the `short-wchar` feature, 32 bits everywhere else.
*/
#[cfg(any(windows, feature="short-wchar"))]
pub type Wide = Utf16;

/**
The encoding of the platform's `wchar_t`.

This is a build-time choice: 16 bits on Windows or with the `short-wchar` feature, 32 bits everywhere else.
*/
#[cfg(not(any(windows, feature="short-wchar")))]
pub type Wide = Utf32;

/**
The platform's wide character type, as seen by foreign code.
*/
#[cfg(not(feature="short-wchar"))]
pub type WChar = libc::wchar_t;

/**
The platform's wide character type, as seen by foreign code.
*/
#[cfg(feature="short-wchar")]
pub type WChar = u16;

/**
Converts a sequence of raw values into units of encoding `E`.
*/
pub fn units<E, I>(values: I) -> Vec<E::Unit>
where
    E: Encoding,
    I: IntoIterator<Item=E::FfiUnit>,
{
    values.into_iter().map(E::Unit::from_repr).collect()
}
