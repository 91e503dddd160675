/*!
Allocation types and traits.
*/
use std::alloc::{self as rust_alloc, Layout};
use std::mem;

use libc::{self, c_void};
use log::trace;
use thiserror::Error;

/**
Abstracts over different memory allocators.

In practice, this will be implemented by a marker type (which are not intended to actually be instantiated anywhere).  Native buffers are parameterised by their allocator so that memory handed to foreign code can come from the heap that code expects to free it with.
*/
pub trait Allocator {
    /**
    The type of errors that can occur during allocation.
    */
    type AllocError: AllocatorError + 'static;

    /**
    Allocate the specified number of *zeroed* bytes, with the specified alignment.

    `bytes` is never zero; zero-sized buffers do not reach the allocator.
    */
    fn alloc_bytes(bytes: usize, align: usize) -> Result<*mut (), Self::AllocError>;

    /**
    Free an allocation.

    `bytes` and `align` must be exactly the values the pointer was allocated with.
    */
    unsafe fn free(ptr: *mut (), bytes: usize, align: usize);

    /**
    Returns a string which can be used to uniquely identify this allocator in debug output.

    This string should *preferably* be short, reasonably evocative, unique, and a single `Camelword`, although nothing will break if this is not done.
    */
    fn debug_prefix() -> &'static str;
}

/**
This trait defines the required interface for allocation errors.
*/
pub trait AllocatorError: std::error::Error {
    /**
    Construct an error indicating that an overflow occurred when computing the size of the allocation.

    This exists to allow buffers to safely indicate that the size of an allocation exceeded some intrinsic limit.
    */
    fn overflow() -> Self;

    /**
    Construct an error indicating that the allocator could not provide the memory.
    */
    fn failed() -> Self;
}

/**
A general allocation error.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum AllocError {
    #[error("failed to allocate memory")]
    Failed,
    #[error("cannot satisfy requested alignment")]
    CannotAlign,
    #[error("overflow while computing size")]
    SizeOverflow,
}

impl AllocatorError for AllocError {
    fn overflow() -> Self {
        AllocError::SizeOverflow
    }

    fn failed() -> Self {
        AllocError::Failed
    }
}

/**
Represents the C runtime heap allocator.
*/
pub enum Malloc {}

impl Allocator for Malloc {
    type AllocError = AllocError;

    fn alloc_bytes(bytes: usize, align: usize) -> Result<*mut (), AllocError> {
        trace!("Malloc::alloc_bytes({:?}, {:?})", bytes, align);
        // A conservative guess.
        if align > mem::align_of::<usize>() {
            return Err(AllocError::CannotAlign);
        }

        let ptr = unsafe { libc::calloc(bytes, 1) };
        if ptr.is_null() {
            Err(AllocError::Failed)
        } else {
            Ok(ptr as *mut ())
        }
    }

    unsafe fn free(ptr: *mut (), _bytes: usize, _align: usize) {
        if !ptr.is_null() {
            libc::free(ptr as *mut c_void);
        }
    }

    fn debug_prefix() -> &'static str { "C" }
}

/**
Represents the Rust runtime heap allocator.
*/
pub enum Rust {}

impl Allocator for Rust {
    type AllocError = AllocError;

    fn alloc_bytes(bytes: usize, align: usize) -> Result<*mut (), AllocError> {
        trace!("Rust::alloc_bytes({:?}, {:?})", bytes, align);
        let layout = Layout::from_size_align(bytes, align)
            .map_err(|_| AllocError::CannotAlign)?;

        let ptr = unsafe { rust_alloc::alloc_zeroed(layout) };
        if ptr.is_null() {
            Err(AllocError::Failed)
        } else {
            Ok(ptr as *mut ())
        }
    }

    unsafe fn free(ptr: *mut (), bytes: usize, align: usize) {
        if !ptr.is_null() {
            let layout = Layout::from_size_align_unchecked(bytes, align);
            rust_alloc::dealloc(ptr as *mut u8, layout);
        }
    }

    fn debug_prefix() -> &'static str { "R" }
}
