/*!
Encoding conversion support.

The host string representation is UTF-16, so the only real conversion work is between scalar values and surrogate pairs.
*/
use crate::encoding::Utf32Unit;
use crate::error::Error;

const MAX_CODE_POINT: u32 = 0x10ffff;

/**
Turns UTF-32 units into host units, splitting supplementary code points into surrogate pairs.

Surrogate values become a single host unit, so unpaired surrogates written by `PairSurrogates` read back unchanged.  The first unit above U+10FFFF stops iteration and is reported through the trap.
*/
pub struct SplitSurrogates<'a, It> {
    iter: Option<It>,
    at: usize,
    pending: Option<u16>,
    trap: &'a mut Result<(), Error>,
}

impl<'a, It> SplitSurrogates<'a, It> {
    pub fn new(iter: It, trap: &'a mut Result<(), Error>) -> Self {
        SplitSurrogates {
            iter: Some(iter),
            at: 0,
            pending: None,
            trap,
        }
    }
}

impl<'a, It> Iterator for SplitSurrogates<'a, It> where It: Iterator<Item=Utf32Unit> {
    type Item = u16;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(lo) = self.pending.take() {
            return Some(lo);
        }

        let cp = match self.iter.as_mut().and_then(Iterator::next) {
            Some(unit) => unit.0,
            None => return None,
        };

        let r = match cp {
            0..=0xffff => Some(cp as u16),
            0x1_0000..=MAX_CODE_POINT => {
                let ch = cp - 0x1_0000;
                self.pending = Some((0xdc00 | (ch & 0x3ff)) as u16);
                Some((0xd800 | (ch >> 10)) as u16)
            },
            _ => None,
        };

        if r.is_none() {
            self.iter = None;
            *self.trap = Err(Error::InvalidCodePoint { at: self.at, value: cp });
        } else {
            self.at += 1;
        }
        r
    }
}

/**
Turns host units into UTF-32 values, combining surrogate pairs.

Unpaired surrogates are passed through as their own value.
*/
pub struct PairSurrogates<It> where It: Iterator<Item=u16> {
    iter: It,
    peeked: Option<u16>,
}

impl<It> PairSurrogates<It> where It: Iterator<Item=u16> {
    pub fn new(iter: It) -> Self {
        PairSurrogates {
            iter,
            peeked: None,
        }
    }
}

impl<It> Iterator for PairSurrogates<It> where It: Iterator<Item=u16> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let cu0 = match self.peeked.take().or_else(|| self.iter.next()) {
            Some(cu) => cu,
            None => return None,
        };

        match cu0 {
            0xd800..=0xdbff => {
                match self.iter.next() {
                    Some(cu1 @ 0xdc00..=0xdfff) => {
                        let hi = (cu0 & 0x3ff) as u32;
                        let lo = (cu1 & 0x3ff) as u32;
                        Some(0x1_0000 + ((hi << 10) | lo))
                    },
                    other => {
                        self.peeked = other;
                        Some(cu0 as u32)
                    },
                }
            },
            _ => Some(cu0 as u32),
        }
    }
}
