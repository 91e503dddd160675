/*!
Native code-unit buffers.
*/
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

use crate::alloc::{Allocator, AllocatorError, Rust};
use crate::encoding::{Encoding, WChar, Wide};

/**
An owned, fixed-capacity region of native code units.

The capacity is fixed at construction and counted in units; it has nothing to do with where (or whether) the contents are terminated.  New buffers are zero-filled.  The memory comes from `A` and is returned to it on drop.

`UnitBuffer` dereferences to `[E::Unit]`, which is what the codec operates on.  Passing a sub-slice (`&mut buf[..n]`) is how a smaller capacity is declared to the codec.

# Parameters

`E` defines the encoding of the units, and so their width.

`A` defines the allocator which manages the memory.  *e.g.* `Malloc` when the buffer must be freed by C code, and `Rust` otherwise.
*/
pub struct UnitBuffer<E, A = Rust> where E: Encoding, A: Allocator {
    ptr: NonNull<E::Unit>,
    capacity: usize,
    _marker: PhantomData<A>,
}

impl<E, A> UnitBuffer<E, A> where E: Encoding, A: Allocator {
    /**
    Allocates a zero-filled buffer of `capacity` units.

    # Failure

    This method will fail if allocating memory fails, or if the size in bytes overflows.
    */
    pub fn zeroed(capacity: usize) -> Result<Self, A::AllocError> {
        let bytes = capacity.checked_mul(mem::size_of::<E::Unit>())
            .ok_or_else(A::AllocError::overflow)?;

        let ptr = if bytes == 0 {
            NonNull::dangling()
        } else {
            let raw = A::alloc_bytes(bytes, mem::align_of::<E::Unit>())? as *mut E::Unit;
            NonNull::new(raw).ok_or_else(A::AllocError::failed)?
        };

        Ok(UnitBuffer {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    /**
    Allocates a buffer holding exactly `units`.
    */
    pub fn from_units(units: &[E::Unit]) -> Result<Self, A::AllocError> {
        let mut buf = Self::zeroed(units.len())?;
        buf.copy_from_slice(units);
        Ok(buf)
    }

    /**
    Allocates a buffer holding `units` followed by a zero terminator.
    */
    pub fn with_terminator(units: &[E::Unit]) -> Result<Self, A::AllocError> {
        let total = units.len().checked_add(1)
            .ok_or_else(A::AllocError::overflow)?;
        let mut buf = Self::zeroed(total)?;
        buf[..units.len()].copy_from_slice(units);
        Ok(buf)
    }

    /**
    Capacity in units.
    */
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /**
    Capacity in bytes.  This cannot overflow; it was checked at allocation.
    */
    pub fn byte_capacity(&self) -> usize {
        self.capacity * mem::size_of::<E::Unit>()
    }

    /**
    Returns a foreign pointer to the first unit.

    The returned pointer is valid for at least as long as the buffer itself is.
    */
    pub fn as_ptr(&self) -> *const E::FfiUnit {
        self.ptr.as_ptr() as *const E::FfiUnit
    }

    /**
    Returns a mutable foreign pointer to the first unit.
    */
    pub fn as_mut_ptr(&mut self) -> *mut E::FfiUnit {
        self.ptr.as_ptr() as *mut E::FfiUnit
    }
}

impl<E, A> Deref for UnitBuffer<E, A> where E: Encoding, A: Allocator {
    type Target = [E::Unit];

    fn deref(&self) -> &[E::Unit] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }
}

impl<E, A> DerefMut for UnitBuffer<E, A> where E: Encoding, A: Allocator {
    fn deref_mut(&mut self) -> &mut [E::Unit] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }
}

impl<E, A> Drop for UnitBuffer<E, A> where E: Encoding, A: Allocator {
    fn drop(&mut self) {
        let bytes = self.byte_capacity();
        if bytes != 0 {
            unsafe {
                A::free(self.ptr.as_ptr() as *mut (), bytes, mem::align_of::<E::Unit>());
            }
        }
    }
}

impl<E, A> Debug for UnitBuffer<E, A> where E: Encoding, A: Allocator {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}{}", E::debug_prefix(), A::debug_prefix())?;
        fmt.debug_list().entries(self.iter()).finish()
    }
}

/**
Borrows `capacity` units starting at a foreign pointer.

If `ptr` is null, returns `None`.

# Safety

`ptr` must be valid for reads of `capacity` units, suitably aligned, and must not be written to for the lifetime `'a`.  `capacity` is the caller's declaration; nothing beyond it will ever be read, and nothing is inferred from the contents.
*/
pub unsafe fn units_from_ptr<'a, E>(ptr: *const E::FfiUnit, capacity: usize) -> Option<&'a [E::Unit]>
where
    E: Encoding,
{
    if ptr.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(ptr as *const E::Unit, capacity))
    }
}

/**
The mutable sibling of `units_from_ptr`.

# Safety

As for `units_from_ptr`, and the memory must not be accessed through any other pointer for the lifetime `'a`.
*/
pub unsafe fn units_from_ptr_mut<'a, E>(ptr: *mut E::FfiUnit, capacity: usize) -> Option<&'a mut [E::Unit]>
where
    E: Encoding,
{
    if ptr.is_null() {
        None
    } else {
        Some(slice::from_raw_parts_mut(ptr as *mut E::Unit, capacity))
    }
}

/**
Borrows `capacity` platform wide characters starting at `ptr`.

`WChar` is `libc::wchar_t`, or `u16` with the `short-wchar` feature.

# Safety

As for `units_from_ptr`.
*/
pub unsafe fn units_from_wchar_ptr<'a>(ptr: *const WChar, capacity: usize) -> Option<&'a [<Wide as Encoding>::Unit]> {
    units_from_ptr::<Wide>(ptr as *const <Wide as Encoding>::FfiUnit, capacity)
}
