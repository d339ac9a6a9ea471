//! Zero-Cost Grid Access Macros
//!
//! The fluid solver walks `(width+2)*(height+2)` cell buffers with loop bounds
//! that already guarantee every index is in range. These macros keep those
//! hot loops bounds-checked in debug builds and unchecked in release builds.
//!
//! Usage:
//! ```rust
//! use fluxbox_engine::fast;
//!
//! let stride = 4; // width + 2
//! let idx = 1 + stride * 1;
//!
//! let density = vec![0.5_f64; 16];
//! // Read: fast!(slice, [index])
//! let d = *fast!(density, [idx]);
//! assert_eq!(d, 0.5);
//!
//! let mut u = vec![0.0_f64; 16];
//! // Write: fast!(slice, [index] = value)
//! fast!(u, [idx] = -d);
//! assert_eq!(u[idx], -0.5);
//! ```

/// Bounds-checked in debug, `get_unchecked` in release.
///
/// Only use where the surrounding loop already proves the index valid
/// (interior cells `1..=width`, `1..=height` plus the halo).
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
