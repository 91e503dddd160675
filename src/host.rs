/*!
Host-side string values.
*/
use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;

use crate::encoding::conv::PairSurrogates;

/**
An owned string in the host environment's representation: a sequence of UTF-16 code units.

Like the host's own strings, a `HostString` has no terminator, may contain zero units anywhere, and is not required to be valid UTF-16.  Lengths are counted in UTF-16 units.
*/
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostString {
    units: Vec<u16>,
}

impl HostString {
    pub fn new() -> Self {
        HostString { units: Vec::new() }
    }

    pub fn from_units(units: Vec<u16>) -> Self {
        HostString { units }
    }

    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    pub fn into_units(self) -> Vec<u16> {
        self.units
    }

    /**
    Length in host (UTF-16) code units.
    */
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /**
    The code points of this string.  Unpaired surrogates are yielded as-is.
    */
    pub fn code_points(&self) -> PairSurrogates<std::iter::Cloned<std::slice::Iter<'_, u16>>> {
        PairSurrogates::new(self.units.iter().cloned())
    }

    /**
    Converts this string into a normal Rust string.

    # Failure

    This conversion will fail if the string contains unpaired surrogates.
    */
    pub fn to_string_checked(&self) -> Result<String, std::char::DecodeUtf16Error> {
        char::decode_utf16(self.units.iter().cloned()).collect()
    }

    /**
    Converts this string into a normal Rust string, replacing unpaired surrogates with U+FFFD.
    */
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl<'a> From<&'a str> for HostString {
    fn from(s: &'a str) -> Self {
        HostString { units: s.encode_utf16().collect() }
    }
}

impl From<Vec<u16>> for HostString {
    fn from(units: Vec<u16>) -> Self {
        HostString { units }
    }
}

impl FromIterator<u16> for HostString {
    fn from_iter<T>(iter: T) -> Self where T: IntoIterator<Item=u16> {
        HostString { units: iter.into_iter().collect() }
    }
}

impl AsRef<[u16]> for HostString {
    fn as_ref(&self) -> &[u16] {
        &self.units
    }
}

impl Debug for HostString {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "H\"")?;
        for r in char::decode_utf16(self.units.iter().cloned()) {
            match r {
                Ok(c) => write!(fmt, "{}", c.escape_debug())?,
                Err(e) => write!(fmt, "\\u{{{:x}}}", e.unpaired_surrogate())?,
            }
        }
        write!(fmt, "\"")
    }
}

impl Display for HostString {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.to_string_lossy(), fmt)
    }
}
