//! Tests for `tja_rs::analysis`.

mod properties;
