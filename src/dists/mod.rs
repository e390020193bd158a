//! Distribution functions built on the elementwise kernels.

pub mod triangular;
