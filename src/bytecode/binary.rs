/*!
  This module is responsible for the encoding and decoding of binary instructions. The
  field constants below are the whole layout; nothing else knows where a field lives.
*/

use std::convert::TryFrom;

use super::{CondFlag, Instruction, OpCode, Register};
use crate::bitfield::{BitField, Word};
use crate::error::CodecError;

// If you change any of these you must also change the layout table in `bytecode`'s docs.
pub const RESERVED : BitField = BitField::fixed(31, 31);
pub const OPCODE   : BitField = BitField::fixed(26, 30);
pub const COND     : BitField = BitField::fixed(22, 25);
pub const TARGET   : BitField = BitField::fixed(18, 21);
pub const SRC1     : BitField = BitField::fixed(14, 17);
pub const SRC2     : BitField = BitField::fixed(10, 13);
pub const OFFSET   : BitField = BitField::fixed(0, 9);

/// Every field of the instruction word with its name, high-order field first.
pub const LAYOUT: [(&str, BitField); 7] = [
  ("reserved", RESERVED),
  ("opcode",   OPCODE),
  ("cond",     COND),
  ("target",   TARGET),
  ("src1",     SRC1),
  ("src2",     SRC2),
  ("offset",   OFFSET),
];

/**
  Encodes the instruction into a word. The reserved bit is left zero. An `Instruction` can
  only be built with components that fit the layout, so this fails only if the layout
  constants themselves are changed inconsistently with the value domains.
*/
pub fn encode(instruction: &Instruction) -> Result<Word, CodecError> {
  let mut word: Word = 0;
  word = OPCODE.insert(instruction.opcode().code() as Word, word)?;
  word = COND.insert(instruction.cond().code() as Word, word)?;
  word = TARGET.insert(instruction.target().index() as Word, word)?;
  word = SRC1.insert(instruction.src1().index() as Word, word)?;
  word = SRC2.insert(instruction.src2().index() as Word, word)?;
  word = OFFSET.insert_signed(instruction.offset(), word)?;
  Ok(word)
}

/// Decodes a word into an instruction. A word that does not name a complete instruction is
/// an error; there are no partially decoded instructions.
pub fn decode(word: Word) -> Result<Instruction, CodecError> {
  if RESERVED.extract(word) != 0 {
    return Err(CodecError::ReservedBitsSet(word & RESERVED.mask()));
  }

  let code = OPCODE.extract(word);
  let opcode = u8::try_from(code).ok()
                                 .and_then(|code| OpCode::try_from(code).ok())
                                 .ok_or(CodecError::UnknownOpcode(code))?;

  let bits = COND.extract(word);
  let cond = u8::try_from(bits).ok()
                               .and_then(CondFlag::from_bits)
                               .ok_or(CodecError::UnknownCondFlag(bits))?;

  let target = decode_register(TARGET, word)?;
  let src1   = decode_register(SRC1, word)?;
  let src2   = decode_register(SRC2, word)?;
  let offset = OFFSET.extract_signed(word)?;

  Instruction::new(opcode, cond, target, src1, src2, offset)
}

fn decode_register(field: BitField, word: Word) -> Result<Register, CodecError> {
  let index = field.extract(word);
  u8::try_from(index).ok()
                     .and_then(|index| Register::try_from(index).ok())
                     .ok_or(CodecError::UnknownRegister(index))
}

impl Instruction {
  pub fn encode(&self) -> Result<Word, CodecError> {
    encode(self)
  }
}


#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  fn sub_mz() -> Instruction {
    Instruction::new(
      OpCode::Sub,
      CondFlag::M | CondFlag::Z,
      Register::R2,
      Register::R1,
      Register::R3,
      -12
    ).unwrap()
  }

  #[test]
  fn layout_covers_the_word(){
    let mut covered: Word = 0;
    for (name, field) in LAYOUT.iter() {
      assert_eq!(covered & field.mask(), 0, "{} overlaps another field", name);
      covered |= field.mask();
    }
    assert_eq!(covered, Word::MAX);
  }

  #[test]
  fn encode_known_word(){
    // 0 00100 0011 0010 0001 0011 1111110100
    assert_eq!(sub_mz().encode(), Ok(0b0_00100_0011_0010_0001_0011_1111110100));
    assert_eq!(sub_mz().encode(), Ok(0x10C8_4FF4));
  }

  #[test]
  fn decode_encode_round_trip(){
    let instruction = sub_mz();
    let word = instruction.encode().unwrap();
    let decoded = decode(word).unwrap();
    assert_eq!(decoded, instruction);
    assert_eq!(decoded.to_string(), instruction.to_string());
  }

  #[test]
  fn round_trip_over_the_value_domains(){
    let (min, max) = OFFSET.signed_range();
    for opcode in OpCode::iter() {
      for code in 0..16u8 {
        let cond = CondFlag::from_bits(code).unwrap();
        for register in Register::iter() {
          for &offset in &[min, -1, 0, 1, max] {
            let instruction =
              Instruction::new(opcode, cond, register, Register::R7, register, offset).unwrap();
            let word = instruction.encode().unwrap();
            assert_eq!(RESERVED.extract(word), 0);
            assert_eq!(decode(word), Ok(instruction), "{}", instruction);
          }
        }
      }
    }
  }

  #[test]
  fn boundary_offsets(){
    let make = |offset| {
      Instruction::new(OpCode::Load, CondFlag::ALWAYS, Register::R1, Register::R15, Register::R0, offset)
        .unwrap()
    };
    let lowest = make(-512).encode().unwrap();
    let highest = make(511).encode().unwrap();
    assert_eq!(OFFSET.extract(lowest), 0b10_0000_0000);
    assert_eq!(OFFSET.extract(highest), 0b01_1111_1111);
    assert_eq!(decode(lowest).unwrap().offset(), -512);
    assert_eq!(decode(highest).unwrap().offset(), 511);
  }

  #[test]
  fn accepted_words_re_encode_to_themselves(){
    for &word in &[0u32, 0x10C8_4FF4, 0x1BFF_FFFF, 0x0000_03FF] {
      let instruction = decode(word).unwrap();
      assert_eq!(instruction.encode(), Ok(word), "{:#010x}", word);
    }
  }

  #[test]
  fn unknown_opcodes_are_rejected(){
    for code in 7..32 {
      let word = OPCODE.insert(code, 0).unwrap();
      assert_eq!(decode(word), Err(CodecError::UnknownOpcode(code)));
    }
  }

  #[test]
  fn reserved_bit_is_rejected(){
    let word = sub_mz().encode().unwrap() | 0x8000_0000;
    assert_eq!(decode(word), Err(CodecError::ReservedBitsSet(0x8000_0000)));
  }

}
