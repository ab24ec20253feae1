/*!
  A bit field is a range of binary digits within a 32 bit unsigned word. Bit 0 is the
  low-order bit, with value 2^0, and bit 31 is the high-order bit, with value 2^31. Bounds
  are inclusive, so `BitField::new(0, 3)` is the low-order nibble, a 4 bit field.

  A `BitField` is the only tool the instruction codec uses to pack the parts of an
  instruction into a word and unpack them again. Every operation here is a pure function
  of its arguments: inserting into a word returns a new word.
*/

use std::fmt::{Display, Formatter};

use crate::error::CodecError;

pub type Word = u32;
pub const WORD_SIZE: u32 = 32;

/**
  Interprets the low `width` bits of `field` as a two's-complement signed integer. If the
  sign bit (bit `width - 1`) is clear the value is returned unchanged; otherwise the result
  is `field - 2^width`.

  For example, `0b111` in a 3 bit field is `-4 + 2 + 1 = -1`, while the same pattern in a
  4 bit field, `0b0111`, is a positive 7.

  `width` must be in `2..=32` and `field` must fit in `width` bits.
*/
pub fn sign_extend(field: Word, width: u32) -> Result<i32, CodecError> {
  if width < 2 || width > WORD_SIZE {
    return Err(CodecError::InvalidWidth(width));
  }
  if width < WORD_SIZE && field >> width != 0 {
    return Err(CodecError::ValueOverflow { value: field as i64, width });
  }

  // Park the sign bit in bit 31 and let the arithmetic shift carry it back down.
  let shift = WORD_SIZE - width;
  Ok(((field << shift) as i32) >> shift)
}

/// An inclusive range of bits `[from_bit, to_bit]` within a `Word`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BitField {
  from_bit: u32,
  to_bit: u32,
  // Derived from the bounds.
  width: u32,
  mask: Word,
}

impl BitField {

  pub fn new(from_bit: u32, to_bit: u32) -> Result<BitField, CodecError> {
    if from_bit > to_bit || to_bit >= WORD_SIZE {
      return Err(CodecError::InvalidFieldRange { from_bit, to_bit });
    }
    Ok(BitField::fixed(from_bit, to_bit))
  }

  /**
    Constructor for fields whose bounds are known at compile time, such as the fields of
    the instruction layout. Used in a `const` item, malformed bounds are a compile error.
  */
  pub const fn fixed(from_bit: u32, to_bit: u32) -> BitField {
    assert!(from_bit <= to_bit && to_bit < WORD_SIZE, "malformed bit field bounds");
    let width = to_bit - from_bit + 1;
    let mask = (Word::MAX >> (WORD_SIZE - width)) << from_bit;
    BitField { from_bit, to_bit, width, mask }
  }

  pub fn from_bit(&self) -> u32 {
    self.from_bit
  }

  pub fn to_bit(&self) -> u32 {
    self.to_bit
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  /// The bits of the field, in position.
  pub fn mask(&self) -> Word {
    self.mask
  }

  /// The largest unsigned value the field holds, `2^width - 1`.
  pub fn max_value(&self) -> Word {
    self.mask >> self.from_bit
  }

  /// The inclusive range of two's-complement values the field holds.
  pub fn signed_range(&self) -> (i32, i32) {
    let half = 1i64 << (self.width - 1);
    (-half as i32, (half - 1) as i32)
  }

  /**
    Extracts the field and returns it in the low-order bits. For example, extracting bits
    3..5 gives a value between `0b000` and `0b111`.
  */
  pub fn extract(&self, word: Word) -> Word {
    (word & self.mask) >> self.from_bit
  }

  /// Extracts the field as a signed integer. A 1 bit field has no magnitude bits and is
  /// rejected with `InvalidWidth`.
  pub fn extract_signed(&self, word: Word) -> Result<i32, CodecError> {
    sign_extend(self.extract(word), self.width)
  }

  /**
    Returns `word` with the field's bits replaced by `value`, which must fit in the field.
    Bits outside the field are untouched.

    Example: `BitField::new(3, 5)?.insert(0b101, 0b110) == Ok(0b101110)`
  */
  pub fn insert(&self, value: Word, word: Word) -> Result<Word, CodecError> {
    if value > self.max_value() {
      return Err(CodecError::ValueOverflow { value: value as i64, width: self.width });
    }
    Ok((word & !self.mask) | (value << self.from_bit))
  }

  /// Inserts `value` in two's-complement form. `value` must lie in `signed_range()`.
  pub fn insert_signed(&self, value: i32, word: Word) -> Result<Word, CodecError> {
    if self.width < 2 {
      return Err(CodecError::InvalidWidth(self.width));
    }
    let (min, max) = self.signed_range();
    if value < min || value > max {
      return Err(CodecError::ValueOverflow { value: value as i64, width: self.width });
    }
    self.insert((value as Word) & self.max_value(), word)
  }

}

impl Display for BitField {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.width == 1 {
      write!(f, "{}", self.from_bit)
    } else {
      write!(f, "{}..{}", self.to_bit, self.from_bit)
    }
  }
}
