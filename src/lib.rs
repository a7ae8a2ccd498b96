//! A 32-bit flag word and a flat key/value text map, written in pure
//! Rust.
//!
//! [`FlagSet`] is the main type in this library: a value type wrapping
//! one `i32` interpreted as 32 independent boolean flags, with
//! single-bit and masked operations, logical combination, fixed-width
//! shifts and binary/hex/decimal formatting. The pure bit math behind
//! it lives in the [`bitwise`] module as free functions.
//!
//! [`TextMap`] is a companion data type: a string-keyed string map
//! that round-trips through one delimited line (`key=value` pairs,
//! space-joined) and never raises on a malformed value.
//!
//! # Examples
//! ```
//! use flagword::FlagSet;
//!
//! let mut flags = FlagSet::new();
//! flags.turn_on(0);
//! flags.turn_on(2);
//! assert_eq!(flags.value(), 0b101);
//! assert_eq!(flags.to_hex_string(), "00000005");
//! assert_eq!(flags.shift_left(1), 0b1010);
//! ```
//!
//! # Features
//!
//! - Single-bit operations by index: `turn_on`, `turn_off`, `set_bit`
//! - Masked operations: `is_set` (all-of test), `set_masked`, `toggle`
//! - Logical combination with another set or a raw value:
//!   `and`, `or`, `xor`, `invert`
//! - Fixed-width shifts with count-modulo-32 semantics:
//!   `shift_left`, `shift_right` (arithmetic), `shift_right_unsigned`
//! - Operator support: `&`, `|`, `^`, `!`, `<<`, `>>` and the assign
//!   forms
//! - Formatting and parsing: decimal (`Display`/`FromStr`), 32-digit
//!   binary, 8-digit lowercase hex, per-bit array expansion
//! - Out-of-range bit indices are no-ops, never panics
//! - [`TextMap`]: typed get/put with log-and-fall-back parsing,
//!   skip-malformed deserialization

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod bitwise;
mod flagset;
mod textmap;

pub use flagset::{FlagSet, ParseFlagSetError};
pub use textmap::{KEY_VALUE_DELIMITER, PAIR_DELIMITER, TextMap, TextRecord};
