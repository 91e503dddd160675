#![cfg(target_os="windows")]
extern crate libc;
extern crate wstrffi;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use std::mem;
use wstrffi::{HostString, WideBuffer, WideCodec};
use wstrffi::alloc::Malloc;
use wstrffi::buffer::units_from_wchar_ptr;
use wstrffi::encoding::{Encoding, Wide};

const WORD: &'static str = "gªrçon\u{2007C}";
const WORD_W: &'static [u16] = &[0x67, 0xAA, 0x72, 0xE7, 0x6F, 0x6E, 0xD840, 0xDC7C, 0x00];

#[test]
fn test_wchar_is_16_bits() {
    assert_eq!(mem::size_of::<libc::wchar_t>(), Wide::WIDTH);
    assert_eq!(Wide::WIDTH, 2);
}

#[test]
fn test_garcon() {
    let units = unsafe { units_from_wchar_ptr(WORD_W.as_ptr(), WORD_W.len()).expect(here!()) };
    {
        let hstr = WideCodec::decode_null_terminated(units).expect(here!());
        assert_eq!(hstr, HostString::from(WORD));
    }
    {
        let hstr = HostString::from(WORD);
        let mut buf = WideBuffer::<Malloc>::zeroed(WORD_W.len()).expect(here!());
        let r = WideCodec::encode(&hstr, &mut buf);
        assert_eq!(r.units_written(), WORD_W.len());
        assert_eq!(&buf[..], units);
    }
}
