use core::fmt::{self, Debug, Display, Formatter};
use core::num::ParseIntError;
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};
use core::str::FromStr;

use thiserror::Error;

use crate::bitwise;

/// The characters used to render an off and an on bit.
const DIGITS: [char; 2] = ['0', '1'];

/// A set of 32 independent boolean flags stored in one `i32`.
///
/// Each bit is one flag. Individual bits are addressed by index or by
/// mask; one `FlagSet` may modify another through logical AND, OR and
/// XOR. Every mutating operation updates the stored value and returns
/// the new value, so updates can be read back without a second call.
///
/// Out-of-range bit indices (≥ 32) resolve to the empty mask and leave
/// the set unchanged; shift counts wrap modulo the word width. Nothing
/// on this type panics.
///
/// # Examples
/// ```
/// use flagword::FlagSet;
///
/// let mut flags = FlagSet::new();
/// flags.turn_on(3);
/// assert!(flags.is_set(flagword::bitwise::mask_of(3)));
/// assert_eq!(flags.popcount(), 1);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct FlagSet(i32);

impl FlagSet {
    /// The value with every flag turned off. Used by default.
    pub const ALL_OFF: i32 = 0;

    /// The value with every flag turned on: the bitwise complement of
    /// [`ALL_OFF`](Self::ALL_OFF), i.e. `-1` in two's complement.
    pub const ALL_ON: i32 = !Self::ALL_OFF;

    /// Creates a new flag set with all flags turned off.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// assert_eq!(FlagSet::new().value(), FlagSet::ALL_OFF);
    /// ```
    pub const fn new() -> Self {
        Self(Self::ALL_OFF)
    }

    /// Creates a new flag set holding exactly the bits of `value`.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// assert_eq!(FlagSet::from_value(0b1010).value(), 10);
    /// ```
    pub const fn from_value(value: i32) -> Self {
        Self(value)
    }

    /// Creates a new flag set with all flags turned on.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// assert_eq!(FlagSet::with_all_set().value(), -1);
    /// assert_eq!(FlagSet::with_all_set().popcount(), 32);
    /// ```
    pub const fn with_all_set() -> Self {
        Self(Self::ALL_ON)
    }

    /// Returns the stored value.
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Replaces the stored value.
    pub fn set_value(&mut self, value: i32) {
        self.0 = value;
    }

    /// Returns `true` if every bit selected by `mask` is turned on.
    ///
    /// An "all of" test: a mask combining several flags matches only
    /// when all of them are on.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let flags = FlagSet::from_value(0b0110);
    /// assert!(flags.is_set(0b0010));
    /// assert!(!flags.is_set(0b0111));
    /// ```
    pub const fn is_set(&self, mask: i32) -> bool {
        bitwise::is_set(self.0, mask)
    }

    /// Turns on the flag at `index` and returns the new value.
    ///
    /// An index outside `[0, 31]` leaves the set unchanged.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::new();
    /// assert_eq!(flags.turn_on(3), 0b1000);
    /// assert_eq!(flags.turn_on(32), 0b1000); // out of range, no-op
    /// ```
    pub fn turn_on(&mut self, index: u32) -> i32 {
        self.0 = bitwise::turn_on(self.0, bitwise::mask_of(index));
        self.0
    }

    /// Turns off the flag at `index` and returns the new value.
    ///
    /// An index outside `[0, 31]` leaves the set unchanged.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::from_value(0b1111);
    /// assert_eq!(flags.turn_off(0), 0b1110);
    /// ```
    pub fn turn_off(&mut self, index: u32) -> i32 {
        self.0 = bitwise::turn_off(self.0, bitwise::mask_of(index));
        self.0
    }

    /// Turns the flag at `index` on or off and returns the new value.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::new();
    /// flags.set_bit(1, true);
    /// assert_eq!(flags.set_bit(0, true), 0b0011);
    /// assert_eq!(flags.set_bit(1, false), 0b0001);
    /// ```
    pub fn set_bit(&mut self, index: u32, on: bool) -> i32 {
        if on { self.turn_on(index) } else { self.turn_off(index) }
    }

    /// Turns all bits selected by `mask` on or off within a single
    /// mutation and returns the new value.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::new();
    /// assert_eq!(flags.set_masked(0b1010, true), 0b1010);
    /// assert_eq!(flags.set_masked(0b0010, false), 0b1000);
    /// ```
    pub fn set_masked(&mut self, mask: i32, on: bool) -> i32 {
        self.0 = bitwise::set(self.0, mask, on);
        self.0
    }

    /// Toggles exactly the bits selected by `mask` and returns the new
    /// value.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::from_value(0b0110);
    /// assert_eq!(flags.toggle(0b0011), 0b0101);
    /// ```
    pub fn toggle(&mut self, mask: i32) -> i32 {
        self.0 = bitwise::toggle(self.0, mask);
        self.0
    }

    /// Turns all flags off.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::with_all_set();
    /// flags.clear();
    /// assert_eq!(flags.value(), FlagSet::ALL_OFF);
    /// ```
    pub fn clear(&mut self) {
        self.clear_all(false);
    }

    /// Sets all flags to the given state at once.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::new();
    /// flags.clear_all(true);
    /// assert_eq!(flags.value(), FlagSet::ALL_ON);
    /// ```
    pub fn clear_all(&mut self, on: bool) {
        self.0 = if on { Self::ALL_ON } else { Self::ALL_OFF };
    }

    /// Combines the stored value with `operand` through bitwise AND
    /// and returns the new value.
    ///
    /// The operand may be another `FlagSet` or a raw `i32`.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::from_value(0b1100);
    /// assert_eq!(flags.and(0b1010), 0b1000);
    /// assert_eq!(flags.and(FlagSet::with_all_set()), 0b1000);
    /// ```
    pub fn and(&mut self, operand: impl Into<i32>) -> i32 {
        self.0 &= operand.into();
        self.0
    }

    /// Combines the stored value with `operand` through bitwise
    /// inclusive OR and returns the new value.
    ///
    /// The operand may be another `FlagSet` or a raw `i32`.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::from_value(0b1000);
    /// assert_eq!(flags.or(FlagSet::from_value(0b0001)), 0b1001);
    /// ```
    pub fn or(&mut self, operand: impl Into<i32>) -> i32 {
        self.0 |= operand.into();
        self.0
    }

    /// Combines the stored value with `operand` through bitwise
    /// exclusive OR and returns the new value.
    ///
    /// The operand may be another `FlagSet` or a raw `i32`.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::from_value(0b1100);
    /// assert_eq!(flags.xor(0b0110), 0b1010);
    /// ```
    pub fn xor(&mut self, operand: impl Into<i32>) -> i32 {
        self.0 ^= operand.into();
        self.0
    }

    /// Inverts every bit of the stored value (bitwise NOT) and returns
    /// the new value.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::with_all_set();
    /// assert_eq!(flags.invert(), FlagSet::ALL_OFF);
    /// ```
    pub fn invert(&mut self) -> i32 {
        self.0 = !self.0;
        self.0
    }

    /// Shifts the stored value left by `shift` bit positions and
    /// returns the new value.
    ///
    /// Bits shifted past bit 31 are discarded; the count wraps modulo
    /// the word width, so any `u32` count is legal.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::from_value(1);
    /// assert_eq!(flags.shift_left(31), i32::MIN);
    /// assert_eq!(flags.shift_left(1), 0); // sign bit evicted
    /// ```
    pub fn shift_left(&mut self, shift: u32) -> i32 {
        self.0 = bitwise::shl(self.0, shift);
        self.0
    }

    /// Shifts the stored value right arithmetically by `shift` bit
    /// positions and returns the new value.
    ///
    /// The sign bit is replicated into the vacated high bits; the
    /// count wraps modulo the word width.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::from_value(-8);
    /// assert_eq!(flags.shift_right(1), -4);
    ///
    /// let mut all_on = FlagSet::with_all_set();
    /// assert_eq!(all_on.shift_right(1), FlagSet::ALL_ON);
    /// ```
    pub fn shift_right(&mut self, shift: u32) -> i32 {
        self.0 = bitwise::shr(self.0, shift);
        self.0
    }

    /// Shifts the stored value right logically by `shift` bit
    /// positions and returns the new value.
    ///
    /// Zeros fill the vacated high bits regardless of sign; the count
    /// wraps modulo the word width.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let mut flags = FlagSet::with_all_set();
    /// assert_eq!(flags.shift_right_unsigned(1), i32::MAX);
    /// ```
    pub fn shift_right_unsigned(&mut self, shift: u32) -> i32 {
        self.0 = bitwise::shr_unsigned(self.0, shift);
        self.0
    }

    /// Returns the number of flags currently turned on.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// assert_eq!(FlagSet::from_value(0b1011).popcount(), 3);
    /// ```
    pub const fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

    /// Expands the stored value into one element per flag, from the
    /// most-significant bit to the least-significant, each `1` if the
    /// flag is on and `0` otherwise.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// let bits = FlagSet::from_value(1).to_bits();
    /// assert_eq!(bits.len(), 32);
    /// assert_eq!(bits[31], 1);
    /// ```
    pub fn to_bits(&self) -> [u8; 32] {
        bitwise::to_bits(self.0)
    }

    /// Renders the stored value as exactly 32 binary digits, from the
    /// most-significant bit to the least-significant.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// assert_eq!(
    ///     FlagSet::from_value(0b100).to_binary_string(),
    ///     "00000000000000000000000000000100",
    /// );
    /// ```
    pub fn to_binary_string(&self) -> String {
        self.to_bits().iter().map(|&bit| DIGITS[bit as usize]).collect()
    }

    /// Renders the stored value as exactly 8 lowercase hexadecimal
    /// digits, without a prefix.
    ///
    /// # Examples
    /// ```
    /// use flagword::FlagSet;
    ///
    /// assert_eq!(FlagSet::from_value(255).to_hex_string(), "000000ff");
    /// assert_eq!(FlagSet::with_all_set().to_hex_string(), "ffffffff");
    /// ```
    pub fn to_hex_string(&self) -> String {
        format!("{:08x}", self.0 as u32)
    }
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for FlagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FlagSet({})", self.to_binary_string())
    }
}

/// Renders the stored value in signed decimal form; the counterpart of
/// the [`FromStr`] parse-back constructor.
impl Display for FlagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Error returned when parsing a [`FlagSet`] from its decimal string
/// form fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid flag word: {0}")]
pub struct ParseFlagSetError(#[from] ParseIntError);

/// Parses a flag set back from the signed decimal form produced by its
/// `Display` implementation.
///
/// # Examples
/// ```
/// use flagword::FlagSet;
///
/// let flags: FlagSet = "-1".parse().unwrap();
/// assert_eq!(flags, FlagSet::with_all_set());
/// assert!("not a number".parse::<FlagSet>().is_err());
/// ```
impl FromStr for FlagSet {
    type Err = ParseFlagSetError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_value(source.parse()?))
    }
}

impl From<i32> for FlagSet {
    fn from(value: i32) -> Self {
        Self::from_value(value)
    }
}

impl From<FlagSet> for i32 {
    fn from(flags: FlagSet) -> i32 {
        flags.value()
    }
}

impl BitAnd for FlagSet {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self::Output {
        self.and(rhs);
        self
    }
}

impl BitAndAssign for FlagSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.and(rhs);
    }
}

impl BitOr for FlagSet {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self.or(rhs);
        self
    }
}

impl BitOrAssign for FlagSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.or(rhs);
    }
}

impl BitXor for FlagSet {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self.xor(rhs);
        self
    }
}

impl BitXorAssign for FlagSet {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.xor(rhs);
    }
}

impl Not for FlagSet {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.invert();
        self
    }
}

impl Shl<u32> for FlagSet {
    type Output = Self;

    fn shl(mut self, rhs: u32) -> Self::Output {
        self.shift_left(rhs);
        self
    }
}

impl ShlAssign<u32> for FlagSet {
    fn shl_assign(&mut self, rhs: u32) {
        self.shift_left(rhs);
    }
}

/// The `>>` operator is the arithmetic (sign-replicating) shift; use
/// [`shift_right_unsigned`](FlagSet::shift_right_unsigned) for the
/// zero-filling one.
impl Shr<u32> for FlagSet {
    type Output = Self;

    fn shr(mut self, rhs: u32) -> Self::Output {
        self.shift_right(rhs);
        self
    }
}

impl ShrAssign<u32> for FlagSet {
    fn shr_assign(&mut self, rhs: u32) {
        self.shift_right(rhs);
    }
}
