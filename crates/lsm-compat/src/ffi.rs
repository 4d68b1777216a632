//! `extern "C"` entry points carrying the legacy linker symbols.
//!
//! These keep link compatibility with C/C++ drivers written against the
//! patch-module header:
//!
//! ```c
//! #define INIT_CIRCLE initcircle_
//! void INIT_CIRCLE(LSMLIB_REAL* level_set,
//!                  const int* ilo_gb, const int* ihi_gb,
//!                  const int* jlo_gb, const int* jhi_gb,
//!                  const int* ilo_fb, const int* ihi_fb,
//!                  const int* jlo_fb, const int* jhi_fb,
//!                  const LSMLIB_REAL* x_lower, const LSMLIB_REAL* dx,
//!                  const LSMLIB_REAL* center, const LSMLIB_REAL* radius);
//! ```
//!
//! `LSMLIB_REAL` must match [`Real`] for the build. The routines return
//! nothing; a null pointer or a rejected argument set leaves the buffer
//! untouched and is logged at `warn` level. The radius is taken as given,
//! so a negative radius still writes `|x - center| - radius`.

use std::ffi::c_int;
use std::slice;

use lsm_patch::ported::init_circle_raw;
use lsm_patch::{IndexBox2, Real};
use tracing::warn;

/// Reads `N` consecutive values, or `None` for a null pointer.
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `N` values.
unsafe fn read_array<T: Copy, const N: usize>(ptr: *const T) -> Option<[T; N]> {
    if ptr.is_null() {
        return None;
    }
    let values = unsafe { slice::from_raw_parts(ptr, N) };
    values.try_into().ok()
}

/// Reads one scalar, or `None` for a null pointer.
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads.
unsafe fn read_scalar<T: Copy>(ptr: *const T) -> Option<T> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { *ptr })
    }
}

/// Fills the fill box of `level_set` with the signed distance to a circle.
///
/// # Safety
///
/// `level_set` must be valid for writes of
/// `(ihi_gb - ilo_gb + 1) * (jhi_gb - jlo_gb + 1)` values laid out in Fortran
/// order. `x_lower`, `dx` and `center` must each be valid for reads of two
/// values; every other pointer must be valid for one read. No other thread
/// may access the fill-box cells of the buffer during the call.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn initcircle_(
    level_set: *mut Real,
    ilo_gb: *const c_int,
    ihi_gb: *const c_int,
    jlo_gb: *const c_int,
    jhi_gb: *const c_int,
    ilo_fb: *const c_int,
    ihi_fb: *const c_int,
    jlo_fb: *const c_int,
    jhi_fb: *const c_int,
    x_lower: *const Real,
    dx: *const Real,
    center: *const Real,
    radius: *const Real,
) {
    if level_set.is_null() {
        warn!("initcircle_ called with a null level_set buffer");
        return;
    }

    let bounds = [
        ilo_gb, ihi_gb, jlo_gb, jhi_gb, ilo_fb, ihi_fb, jlo_fb, jhi_fb,
    ]
    .map(|ptr| unsafe { read_scalar(ptr) });
    let [
        Some(ilo_gb),
        Some(ihi_gb),
        Some(jlo_gb),
        Some(jhi_gb),
        Some(ilo_fb),
        Some(ihi_fb),
        Some(jlo_fb),
        Some(jhi_fb),
    ] = bounds
    else {
        warn!("initcircle_ called with a null box bound");
        return;
    };

    let (Some(x_lower), Some(dx), Some(center), Some(radius)) = (unsafe {
        (
            read_array::<Real, 2>(x_lower),
            read_array::<Real, 2>(dx),
            read_array::<Real, 2>(center),
            read_scalar(radius),
        )
    }) else {
        warn!("initcircle_ called with a null geometry or shape argument");
        return;
    };

    let ghost_box = IndexBox2::new(ilo_gb, ihi_gb, jlo_gb, jhi_gb);
    let fill_box = IndexBox2::new(ilo_fb, ihi_fb, jlo_fb, jhi_fb);
    if ghost_box.is_empty() {
        warn!(ghost = %ghost_box, "initcircle_ called with an empty ghost box");
        return;
    }
    let Some(cells) = ghost_box.checked_num_cells() else {
        warn!(ghost = %ghost_box, "initcircle_ called with an unaddressable ghost box");
        return;
    };

    let field = unsafe { slice::from_raw_parts_mut(level_set, cells) };
    if let Err(err) = init_circle_raw(field, ghost_box, fill_box, x_lower, dx, center, radius) {
        warn!(error = %err, "initcircle_ rejected its arguments");
    }
}
