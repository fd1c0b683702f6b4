//! Diagnostic output.
//!
//! `diag!` forwards to `defmt::warn!` with the `defmt` feature, otherwise to
//! `log::warn!` with the `log` feature, and expands to nothing without
//! either. Format strings must stick to plain `{}` placeholders so they are
//! valid for both backends.

macro_rules! diag {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($($arg)*);
    }};
}
