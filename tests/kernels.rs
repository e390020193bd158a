use approx::assert_relative_eq;
use num_complex::Complex64;
use std::cell::Cell;
use strided_kernels::blas::{axpy, dot, iamax, nrm2, scal};
use strided_kernels::{
    binary, binary_ndarray, check_bounds, cusumkbn, cusumors, cusumpw, cusumpw_in_place,
    dmskmap2, is_gzip_buffer, mask_unary, nullary, quaternary, sumpw, ternary, unary, unary_dyn,
    unary_in_place, unary_ndarray, variancepn, Accessor, AccessorMut, DType, DynArray, DynArrayMut, Interleaved,
    Result, StridedError, UnaryDispatch, BLOCKSIZE, GZIP_MIN_LENGTH,
};

fn running_sum(seed: f64, x: &[f64]) -> Vec<f64> {
    x.iter()
        .scan(seed, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

// ============================================================================
// Zero-length traversals and call counts
// ============================================================================

#[test]
fn test_zero_length_is_noop() {
    let x = [1.0, 2.0, 3.0];
    let mut y = [7.0; 3];
    let mut calls = 0;
    unary(0, &x[..], 1, &mut y[..], 1, |v: f64| {
        calls += 1;
        v
    });
    cusumpw(0, 1.0, &x[..], 1, &mut y[..], 1);
    mask_unary(0, &x[..], 1, &[0u8; 3][..], 1, &mut y[..], 1, |v: f64| v);
    assert_eq!(calls, 0);
    assert_eq!(y, [7.0; 3]);
    assert_eq!(sumpw::<f64, _>(0, &x[..], 1), 0.0);
}

#[test]
fn test_callback_runs_exactly_n_times() {
    let x = vec![1.0; 64];
    let mut y = vec![0.0; 64];
    let mut calls = 0usize;
    binary(
        17,
        &x[..],
        3,
        &x[..],
        -2,
        &mut y[..],
        1,
        |a: f64, b: f64| {
            calls += 1;
            a + b
        },
    );
    assert_eq!(calls, 17);

    let mut calls = 0usize;
    nullary(9, &mut y[..], -7, || {
        calls += 1;
        calls as f64
    });
    assert_eq!(calls, 9);
}

// ============================================================================
// Accessor-protocol buffers
// ============================================================================

/// Buffer that records every element read and write.
struct Recording<T> {
    data: Vec<T>,
    reads: Cell<usize>,
    writes: Vec<usize>,
}

impl<T> Recording<T> {
    fn new(data: Vec<T>) -> Self {
        Self {
            data,
            reads: Cell::new(0),
            writes: Vec::new(),
        }
    }
}

impl<T: Copy> Accessor<T> for Recording<T> {
    fn get(&self, index: usize) -> T {
        self.reads.set(self.reads.get() + 1);
        self.data[index]
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T: Copy> AccessorMut<T> for Recording<T> {
    fn set(&mut self, index: usize, value: T) {
        self.writes.push(index);
        self.data[index] = value;
    }
}

#[test]
fn test_unary_goes_through_accessors() {
    let x = Recording::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let mut y = Recording::new(vec![0.0; 3]);
    unary(3, &x, 2, &mut y, -1, |v: f64| v * 10.0);
    assert_eq!(x.reads.get(), 3);
    assert!(x.writes.is_empty());
    assert_eq!(y.reads.get(), 0);
    assert_eq!(y.writes, vec![2, 1, 0]);
    assert_eq!(y.data, vec![50.0, 30.0, 10.0]);
}

#[test]
fn test_mask_reads_every_flag_and_skips_masked_writes() {
    let x = Recording::new(vec![-1.0, -2.0, -3.0, -4.0]);
    let mask = Recording::new(vec![1u8, 0, 0, 1]);
    let mut y = Recording::new(vec![9.0; 4]);
    mask_unary(4, &x, 1, &mask, 1, &mut y, 1, f64::abs);
    assert_eq!(mask.reads.get(), 4);
    assert_eq!(x.reads.get(), 2);
    assert_eq!(y.writes, vec![1, 2]);
    assert_eq!(y.data, vec![9.0, 2.0, 3.0, 9.0]);
}

#[test]
fn test_cusum_writes_each_position_once() {
    let n = 2 * BLOCKSIZE + 3;
    let x = Recording::new(vec![1.0; n]);
    let mut y = Recording::new(vec![0.0; n]);
    cusumpw(n, 0.0, &x, 1, &mut y, 1);
    assert_eq!(x.reads.get(), n);
    let mut written = y.writes.clone();
    written.sort_unstable();
    assert_eq!(written, (0..n).collect::<Vec<_>>());
    assert_eq!(y.data[n - 1], n as f64);
}

// ============================================================================
// Stride and offset handling
// ============================================================================

#[test]
fn test_simple_form_negative_stride_starts_at_end() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let mut y = [0.0; 3];
    unary(3, &x[..], -2, &mut y[..], 1, |v: f64| v * 10.0);
    assert_eq!(y, [50.0, 30.0, 10.0]);
}

#[test]
fn test_ndarray_form_uses_explicit_offsets() {
    let x = [0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 3.0];
    let mut y = [0.0; 6];
    unary_ndarray(3, &x[..], 2, 2, &mut y[..], -2, 5, |v: f64| v + 1.0);
    assert_eq!(y, [0.0, 4.0, 0.0, 3.0, 0.0, 2.0]);
}

#[test]
fn test_zero_stride_broadcasts_scalar_input() {
    let x = [2.0, 3.0, 4.0];
    let scalar = [10.0];
    let mut z = [0.0; 3];
    binary_ndarray(
        3,
        &x[..],
        1,
        0,
        &scalar[..],
        0,
        0,
        &mut z[..],
        1,
        0,
        |a: f64, b: f64| a * b,
    );
    assert_eq!(z, [20.0, 30.0, 40.0]);
}

#[test]
fn test_ternary_and_quaternary_fixtures() {
    let a = [1.0, 2.0, 3.0];
    let b = [10.0, 20.0, 30.0];
    let c = [100.0, 200.0, 300.0];
    let mut w = [0.0; 3];
    ternary(3, &a[..], 1, &b[..], 1, &c[..], -1, &mut w[..], 1, |x: f64, y: f64, z: f64| {
        x + y + z
    });
    assert_eq!(w, [311.0, 222.0, 133.0]);

    let d = [1000.0];
    let mut u = [0.0; 3];
    quaternary(
        3,
        &a[..],
        1,
        &b[..],
        1,
        &c[..],
        1,
        &d[..],
        0,
        &mut u[..],
        1,
        |x: f64, y: f64, z: f64, v: f64| x + y + z + v,
    );
    assert_eq!(u, [1111.0, 1222.0, 1333.0]);
}

#[test]
fn test_check_bounds_before_untrusted_traversal() {
    assert!(check_bounds(10, 5, 2, 0).is_ok());
    assert!(check_bounds(10, 4, -3, 9).is_ok());
    match check_bounds(10, 6, 2, 0) {
        Err(StridedError::OutOfBounds { index, len }) => {
            assert_eq!(index, 10);
            assert_eq!(len, 10);
        }
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
}

// ============================================================================
// Cumulative sums
// ============================================================================

#[test]
fn test_cusum_fixtures() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let mut y = [0.0; 5];

    cusumpw(5, 0.0, &x[..], 1, &mut y[..], 1);
    assert_eq!(y, [1.0, 3.0, 6.0, 10.0, 15.0]);

    cusumpw(5, 10.0, &x[..], 1, &mut y[..], 1);
    assert_eq!(y, [11.0, 13.0, 16.0, 20.0, 25.0]);

    let mut y = [0.0; 3];
    cusumpw(3, 0.0, &x[..], -2, &mut y[..], 1);
    assert_eq!(y, [5.0, 8.0, 9.0]);
}

#[test]
fn test_cusum_nan_propagates() {
    let x = [1.0, f64::NAN, 3.0, f64::NAN];
    let mut y = [0.0; 4];
    cusumpw(4, 0.0, &x[..], 1, &mut y[..], 1);
    assert_eq!(y[0], 1.0);
    assert!(y[1..].iter().all(|v| v.is_nan()));
}

#[test]
fn test_cusum_crosses_block_boundaries() {
    for n in [BLOCKSIZE - 1, BLOCKSIZE, BLOCKSIZE + 1, 3 * BLOCKSIZE + 7] {
        let x: Vec<f64> = (1..=n).map(|i| i as f64).collect();
        let expected = running_sum(2.0, &x);

        let mut y = vec![0.0; n];
        cusumpw(n, 2.0, &x[..], 1, &mut y[..], 1);
        assert_eq!(y, expected, "pairwise n = {n}");

        cusumkbn(n, 2.0, &x[..], 1, &mut y[..], 1);
        assert_eq!(y, expected, "kbn n = {n}");

        cusumors(n, 2.0, &x[..], 1, &mut y[..], 1);
        assert_eq!(y, expected, "ordinary n = {n}");

        let mut z = x.clone();
        cusumpw_in_place(n, 2.0, &mut z[..], 1);
        assert_eq!(z, expected, "in place n = {n}");
    }
}

// ============================================================================
// Masks
// ============================================================================

#[test]
fn test_mask_leaves_masked_outputs_untouched() {
    let x = [-1.0, -2.0, -3.0, -4.0, -5.0];
    let mask = [0u8, 0, 1, 0, 0];
    let mut y = [0.0; 5];
    mask_unary(5, &x[..], 1, &mask[..], 1, &mut y[..], 1, f64::abs);
    assert_eq!(y, [1.0, 2.0, 0.0, 4.0, 5.0]);

    let mut z = [9.0; 5];
    dmskmap2(5, &x, 1, &x, -1, &mask, 1, &mut z, 1, |a, b| a - b);
    assert_eq!(z, [4.0, 2.0, 9.0, -2.0, -4.0]);
}

// ============================================================================
// Identity, aliasing, and BLAS-style operations
// ============================================================================

#[test]
fn test_identity_round_trip() {
    let x: Vec<f64> = (0..20).map(|i| (i as f64).sin()).collect();
    let mut y = vec![0.0; 20];
    unary(20, &x[..], 1, &mut y[..], 1, |v: f64| v);
    let mut back = vec![0.0; 20];
    unary(20, &y[..], -1, &mut back[..], -1, |v: f64| v);
    assert_eq!(back, x);
}

#[test]
fn test_in_place_scale_matches_out_of_place() {
    let x: Vec<f64> = (0..12).map(|i| i as f64 - 5.5).collect();
    let mut expected = vec![0.0; 12];
    unary(6, &x[..], 2, &mut expected[..], 2, |v: f64| 3.0 * v);
    for i in (1..12).step_by(2) {
        expected[i] = x[i];
    }

    let mut in_place = x.clone();
    scal(6, 3.0, &mut in_place[..], 2);
    assert_eq!(in_place, expected);

    let mut via_map = x.clone();
    unary_in_place(6, &mut via_map[..], 2, |v: f64| 3.0 * v);
    assert_eq!(via_map, expected);
}

#[test]
fn test_axpy_dot_nrm2() {
    let x = [1.0, 2.0, 3.0];
    let mut y = [1.0, 1.0, 1.0];
    axpy(3, 2.0, &x[..], 1, &mut y[..], 1);
    assert_eq!(y, [3.0, 5.0, 7.0]);
    assert_eq!(dot::<f64, _, _>(3, &x[..], 1, &y[..], -1), 7.0 + 10.0 + 9.0);
    assert_relative_eq!(nrm2::<f64, _>(2, &[3.0, 4.0][..], 1), 5.0);
    assert_eq!(iamax::<f64, _>(3, &[1.0, -9.0, 4.0][..], 1), Some(1));
}

#[test]
fn test_complex_through_interleaved_components() {
    // [1+2i, 3+4i] as interleaved parts
    let raw = [1.0, 2.0, 3.0, 4.0];
    let mut out = [0.0; 4];
    {
        let x = Interleaved::new(&raw[..]);
        let mut y = Interleaved::new(&mut out[..]);
        unary(2, &x, 1, &mut y, 1, |z: Complex64| z * Complex64::new(0.0, 1.0));
    }
    assert_eq!(out, [-2.0, 1.0, -4.0, 3.0]);
}

#[test]
fn test_variance_fixture() {
    let x = [1.0, -2.0, 2.0];
    assert_relative_eq!(variancepn(3, 1.0, &x[..], 1), 13.0 / 3.0, epsilon = 1e-12);
    assert!(variancepn::<f64, _>(1, 1.0, &x[..], 1).is_nan());
    assert_eq!(variancepn::<f64, _>(1, 0.0, &x[..], 1), 0.0);
}

// ============================================================================
// Gzip detection
// ============================================================================

#[test]
fn test_gzip_detection() {
    let mut buf = vec![0u8; GZIP_MIN_LENGTH];
    buf[..3].copy_from_slice(&[0x1f, 0x8b, 0x08]);
    assert!(is_gzip_buffer(&buf[..]));
    assert!(!is_gzip_buffer(&buf[..GZIP_MIN_LENGTH - 1]));
    buf[2] = 0x07;
    assert!(!is_gzip_buffer(&buf[..]));
    assert!(!is_gzip_buffer(&[0u8; 0][..]));
}

// ============================================================================
// Dtype dispatch
// ============================================================================

fn abs_kernel(
    n: usize,
    x: DynArray<'_>,
    stride_x: isize,
    offset_x: usize,
    y: DynArrayMut<'_>,
    stride_y: isize,
    offset_y: usize,
) -> Result<()> {
    unary_dyn(n, x, stride_x, offset_x, y, stride_y, offset_y, f64::abs)
}

#[test]
fn test_dispatch_resolves_registered_signatures() {
    let table = UnaryDispatch::new()
        .register(DType::Float64, DType::Float64, abs_kernel)
        .register(DType::Int16, DType::Float32, abs_kernel);
    assert_eq!(table.len(), 2);

    let x = [-1.0, 2.0, -3.0];
    let mut y = [0.0; 3];
    table
        .call(3, DynArray::Float64(&x), 1, 0, DynArrayMut::Float64(&mut y), 1, 0)
        .unwrap();
    assert_eq!(y, [1.0, 2.0, 3.0]);

    let xi = [-4i16, 5, -6];
    let mut yf = [0.0f32; 3];
    table
        .call(3, DynArray::Int16(&xi), -1, 2, DynArrayMut::Float32(&mut yf), 1, 0)
        .unwrap();
    assert_eq!(yf, [6.0, 5.0, 4.0]);
}

#[test]
fn test_dispatch_rejects_unknown_signature() {
    let table = UnaryDispatch::new().register(DType::Float64, DType::Float64, abs_kernel);
    let x = [1i32, 2];
    let mut y = [0.0; 2];
    let err = table
        .call(2, DynArray::Int32(&x), 1, 0, DynArrayMut::Float64(&mut y), 1, 0)
        .unwrap_err();
    assert!(matches!(
        err,
        StridedError::UnsupportedSignature(ref sig) if sig == &[DType::Int32, DType::Float64]
    ));
    assert_eq!(y, [0.0; 2]);
}

#[test]
fn test_dyn_setter_coerces_to_output_dtype() {
    let x = [-1.5, 2.5, 300.0, 0.4];
    let mut clamped = [0u8; 4];
    unary_dyn(
        4,
        DynArray::Float64(&x),
        1,
        0,
        DynArrayMut::Uint8c(&mut clamped),
        1,
        0,
        |v| v,
    )
    .unwrap();
    assert_eq!(clamped, [0, 2, 255, 0]);
}
