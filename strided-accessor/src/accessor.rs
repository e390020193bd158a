//! The accessor protocol: element reads and writes by logical index.
//!
//! Kernels never subscript buffers directly. They call [`Accessor::get`] and
//! [`AccessorMut::set`], which the compiler resolves to one monomorphic
//! implementation per buffer type. Plain indexable buffers (`[T]`, `Vec<T>`,
//! `[T; N]`) implement the traits by subscripting; accessor-protocol objects
//! implement them however they like, including with side effects.
//!
//! The traits do not promise bounds checking beyond what the implementation
//! does on its own. Slices panic on out-of-range access; validating a
//! traversal up front is the job of the caller.

/// Read access to a buffer of `T` by logical index.
pub trait Accessor<T> {
    /// Returns the element at `index`.
    fn get(&self, index: usize) -> T;

    /// Number of addressable logical elements.
    fn len(&self) -> usize;

    /// Returns true if the buffer has no addressable elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to a buffer of `T` by logical index.
pub trait AccessorMut<T>: Accessor<T> {
    /// Stores `value` at `index`.
    fn set(&mut self, index: usize, value: T);
}

impl<T: Copy> Accessor<T> for [T] {
    #[inline(always)]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: Copy> AccessorMut<T> for [T] {
    #[inline(always)]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T: Copy> Accessor<T> for Vec<T> {
    #[inline(always)]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Copy> AccessorMut<T> for Vec<T> {
    #[inline(always)]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T: Copy, const N: usize> Accessor<T> for [T; N] {
    #[inline(always)]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        N
    }
}

impl<T: Copy, const N: usize> AccessorMut<T> for [T; N] {
    #[inline(always)]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T, A: Accessor<T> + ?Sized> Accessor<T> for &A {
    #[inline(always)]
    fn get(&self, index: usize) -> T {
        (**self).get(index)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<T, A: Accessor<T> + ?Sized> Accessor<T> for &mut A {
    #[inline(always)]
    fn get(&self, index: usize) -> T {
        (**self).get(index)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<T, A: AccessorMut<T> + ?Sized> AccessorMut<T> for &mut A {
    #[inline(always)]
    fn set(&mut self, index: usize, value: T) {
        (**self).set(index, value)
    }
}

/// Returns the getter for buffers of type `B`.
///
/// Resolution happens at compile time; the returned function pointer is the
/// same for every call with the same `(T, B)` pair.
#[inline]
pub fn resolve_getter<T, B: Accessor<T> + ?Sized>() -> fn(&B, usize) -> T {
    <B as Accessor<T>>::get
}

/// Returns the setter for buffers of type `B`.
#[inline]
pub fn resolve_setter<T, B: AccessorMut<T> + ?Sized>() -> fn(&mut B, usize, T) {
    <B as AccessorMut<T>>::set
}
