/*!
Structure types and traits.
*/
use crate::encoding::Unit;
use crate::error::Error;

/**
This trait is used to abstract over the ways a native buffer can delimit its string content.

These are marker types (not intended to actually be instantiated anywhere).  A structure never looks past the end of the slice it is given: the slice length is the buffer's declared capacity.
*/
pub trait Structure {
    /**
    Whatever the caller has to supply, beyond the buffer itself, to determine where the content ends.
    */
    type Extent: Copy;

    /**
    Returns a string which can be used to uniquely identify this structure in debug output.
    */
    fn debug_prefix() -> &'static str;

    /**
    Returns the content of `units`, excluding any structural data such as a terminator.
    */
    fn content<U>(units: &[U], extent: Self::Extent) -> Result<&[U], Error> where U: Unit;
}

/**
Strings terminated by a zero unit.

The scan for the terminator is bounded by the buffer's capacity.
*/
pub enum ZeroTerm {}

impl Structure for ZeroTerm {
    type Extent = ();

    fn debug_prefix() -> &'static str { "Z" }

    fn content<U>(units: &[U], _: ()) -> Result<&[U], Error> where U: Unit {
        match units.iter().position(|u| u.is_zero()) {
            Some(len) => Ok(&units[..len]),
            None => Err(Error::Unterminated { capacity: units.len() }),
        }
    }
}

impl ZeroTerm {
    /**
    Returns the content of `units` *including* the zero terminator.
    */
    pub fn content_with_term<U>(units: &[U]) -> Result<&[U], Error> where U: Unit {
        let len = Self::content(units, ())?.len();
        Ok(&units[..len + 1])
    }
}

/**
Strings with an explicit length in units.  Zero units are content; no terminator is expected.
*/
pub enum Slice {}

impl Structure for Slice {
    type Extent = usize;

    fn debug_prefix() -> &'static str { "S" }

    fn content<U>(units: &[U], len: usize) -> Result<&[U], Error> where U: Unit {
        units.get(..len).ok_or(Error::OutOfBounds {
            requested: len,
            capacity: units.len(),
        })
    }
}
