//! Kernels over dtype-tagged buffers.
//!
//! [`unary_dyn`] and [`binary_dyn`] resolve a getter per input and a setter
//! for the output once, then run the strided loop through those closures in
//! the `f64` value domain. [`UnaryDispatch`] maps `(input, output)` dtype
//! signatures to specialized kernels, typically a monomorphic call into the
//! generic kernels with the dynamic path as a fallback.

use crate::{DType, DynArray, DynArrayMut, Result, StridedError, StridedIndex};
use strided_accessor::{resolve_dyn_getter, resolve_dyn_setter};
use tracing::debug;

/// Applies `f` elementwise from a tagged input to a tagged output.
///
/// Input values are widened to `f64`; outputs are coerced to the output
/// dtype by its setter.
#[allow(clippy::too_many_arguments)]
pub fn unary_dyn<F>(
    n: usize,
    x: DynArray<'_>,
    stride_x: isize,
    offset_x: usize,
    y: DynArrayMut<'_>,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> Result<()>
where
    F: FnMut(f64) -> f64,
{
    let get = resolve_dyn_getter(x)?;
    let mut set = resolve_dyn_setter(y)?;
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        set(iy, f(get(ix)));
    }
    Ok(())
}

/// Applies `f` elementwise to two tagged inputs, writing a tagged output.
#[allow(clippy::too_many_arguments)]
pub fn binary_dyn<F>(
    n: usize,
    x: DynArray<'_>,
    stride_x: isize,
    offset_x: usize,
    y: DynArray<'_>,
    stride_y: isize,
    offset_y: usize,
    z: DynArrayMut<'_>,
    stride_z: isize,
    offset_z: usize,
    mut f: F,
) -> Result<()>
where
    F: FnMut(f64, f64) -> f64,
{
    let get_x = resolve_dyn_getter(x)?;
    let get_y = resolve_dyn_getter(y)?;
    let mut set = resolve_dyn_setter(z)?;
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    let zs = StridedIndex::new(n, stride_z, offset_z);
    for ((ix, iy), iz) in xs.zip(ys).zip(zs) {
        set(iz, f(get_x(ix), get_y(iy)));
    }
    Ok(())
}

/// Unary kernel over tagged buffers: `(n, x, stride_x, offset_x, y, stride_y, offset_y)`.
pub type UnaryKernel =
    fn(usize, DynArray<'_>, isize, usize, DynArrayMut<'_>, isize, usize) -> Result<()>;

/// Table of unary kernels keyed by `(input, output)` dtype.
#[derive(Default, Clone)]
pub struct UnaryDispatch {
    table: Vec<([DType; 2], UnaryKernel)>,
}

impl UnaryDispatch {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `kernel` for the given signature, replacing any previous entry.
    pub fn register(mut self, input: DType, output: DType, kernel: UnaryKernel) -> Self {
        let sig = [input, output];
        match self.table.iter_mut().find(|(s, _)| *s == sig) {
            Some(entry) => entry.1 = kernel,
            None => self.table.push((sig, kernel)),
        }
        self
    }

    /// Returns the kernel registered for a signature.
    pub fn lookup(&self, input: DType, output: DType) -> Option<UnaryKernel> {
        self.table
            .iter()
            .find(|(s, _)| *s == [input, output])
            .map(|(_, k)| *k)
    }

    /// Number of registered signatures.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no signatures are registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Runs the kernel matching the dtypes of `x` and `y`.
    #[allow(clippy::too_many_arguments)]
    pub fn call(
        &self,
        n: usize,
        x: DynArray<'_>,
        stride_x: isize,
        offset_x: usize,
        y: DynArrayMut<'_>,
        stride_y: isize,
        offset_y: usize,
    ) -> Result<()> {
        let (dx, dy) = (x.dtype(), y.dtype());
        let kernel = self.lookup(dx, dy).ok_or_else(|| {
            debug!(input = %dx, output = %dy, "no kernel registered");
            StridedError::UnsupportedSignature(vec![dx, dy])
        })?;
        debug!(input = %dx, output = %dy, "dispatching unary kernel");
        kernel(n, x, stride_x, offset_x, y, stride_y, offset_y)
    }
}

impl std::fmt::Debug for UnaryDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.table.iter().map(|(s, _)| s))
            .finish()
    }
}
