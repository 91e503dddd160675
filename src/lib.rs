/*!
This crate marshals wide-character strings between native memory and a host environment's strings, in both directions, without losing a unit.

Native strings are runs of fixed-width code units, 16 or 32 bits wide depending on the platform's `wchar_t`.  Host strings (`HostString`) are sequences of UTF-16 units, like those of a JavaScript engine.  The codec (`Codec<E>`) converts between the two, and it never reads or writes past the capacity the caller declares for a native buffer.

# Quick Reference

| Operation | Native side | Function |
| ---: | --- | --- |
| Decode | Zero-terminated, scan bounded by capacity | `Codec::decode_null_terminated` |
| … | Explicit length, zero units kept | `Codec::decode_with_length` |
| Encode | Bounded, truncating, always terminated if capacity > 0 | `Codec::encode` |
| … | As above, but an empty destination is an error | `Codec::encode_checked` |
| Host interface | Byte lengths instead of unit counts | `boundary::{decode16, decode32, encode16, encode32}` |

# Components

| Prefix | Name | Meaning |
| ------ | ---- | ------- |
| `Z` | `ZeroTerm` | Content ends at the first zero unit. |
| `S` | `Slice` | Content length given explicitly; *not* zero-terminated. |
| `Utf16` | `Utf16` | 16-bit units, possibly invalid UTF-16. |
| `Utf32` | `Utf32` | 32-bit units holding code points up to U+10FFFF. |
| `C` | `Malloc` | C runtime heap allocator (*i.e.* `calloc`/`free`). |
| `R` | `Rust` | Rust heap allocator. |

`Wide` is `Utf16` on Windows and with the `short-wchar` feature, `Utf32` otherwise.  Note that the width of `wchar_t` is a property of how the *foreign* code was compiled; GCC allows it to be changed with `-fshort-wchar`.
*/

pub mod alloc;
pub mod boundary;
pub mod buffer;
pub mod codec;
pub mod encoding;
pub mod error;
pub mod host;
pub mod structure;
pub mod validate;

use encoding as e;

pub use buffer::UnitBuffer;
pub use codec::{Codec, TranscodeResult};
pub use error::Error;
pub use host::HostString;
pub use validate::{Report, RoundTrip, ValidationError};

pub type Codec16 = Codec<e::Utf16>;
pub type Codec32 = Codec<e::Utf32>;
pub type WideCodec = Codec<e::Wide>;

pub type WideBuffer<A = alloc::Rust> = UnitBuffer<e::Wide, A>;
