//! Real scalar type shared by every kernel in a build.
//!
//! Precision is chosen once at build time: 64-bit by default, 32-bit with the
//! `single-precision` feature. Buffers handed across the C boundary must use
//! the same width.

#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

#[cfg(feature = "single-precision")]
pub type Real = f32;

/// Size in bytes of one [`Real`] sample.
pub const REAL_BYTES: usize = std::mem::size_of::<Real>();

pub fn precision_name() -> &'static str {
    if cfg!(feature = "single-precision") {
        "single"
    } else {
        "double"
    }
}
