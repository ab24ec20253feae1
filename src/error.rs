//! Failures of the bit field primitive and the instruction codec. Every one of them is
//! reported at the point of detection; nothing is ever truncated or defaulted instead.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::bitfield::Word;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CodecError {
  /// `from_bit > to_bit`, or a bound outside `0..=31`.
  InvalidFieldRange {
    from_bit: u32,
    to_bit: u32
  },
  /// The value does not fit in a field `width` bits wide.
  ValueOverflow {
    value: i64,
    width: u32
  },
  /// Signed interpretation needs at least a sign bit and one magnitude bit.
  InvalidWidth(u32),
  UnknownOpcode(u32),
  UnknownCondFlag(u32),
  UnknownRegister(u32),
  /// Holds the offending reserved bits, still in position.
  ReservedBitsSet(Word),
}

impl Display for CodecError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      CodecError::InvalidFieldRange { from_bit, to_bit } => {
        write!(f, "invalid bit field {}..{}: bounds must satisfy 0 <= from <= to <= 31", from_bit, to_bit)
      }

      CodecError::ValueOverflow { value, width } => {
        write!(f, "value {} does not fit in a {} bit field", value, width)
      }

      CodecError::InvalidWidth(width) => {
        write!(f, "signed interpretation requires a width of 2 to 32 bits, got {}", width)
      }

      CodecError::UnknownOpcode(code) => {
        write!(f, "unknown opcode {:#x}", code)
      }

      CodecError::UnknownCondFlag(bits) => {
        write!(f, "unknown condition flags {:#06b}", bits)
      }

      CodecError::UnknownRegister(index) => {
        write!(f, "unknown register r{}", index)
      }

      CodecError::ReservedBitsSet(bits) => {
        write!(f, "reserved bits are set: {:#010x}", bits)
      }

    }
  }
}

impl Error for CodecError {}
