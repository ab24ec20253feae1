use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::{CondFlag, OpCode, Register, OFFSET};
use super::assembly::{parse_instruction, AssemblyError};
use crate::error::CodecError;

/**
  Holds the unencoded components of an instruction. An `Instruction` is an immutable value:
  it is built by `Instruction::new`, by parsing its text form, or by `decode`, and every
  one of those checks that the offset fits in the offset field, so any `Instruction`
  can be encoded.
*/
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instruction {
  opcode : OpCode,
  cond   : CondFlag,
  target : Register,
  src1   : Register,
  src2   : Register,
  offset : i32,
}

impl Instruction {

  pub fn new(
    opcode: OpCode,
    cond  : CondFlag,
    target: Register,
    src1  : Register,
    src2  : Register,
    offset: i32
  ) -> Result<Instruction, CodecError> {
    let (min, max) = OFFSET.signed_range();
    if offset < min || offset > max {
      return Err(CodecError::ValueOverflow { value: offset as i64, width: OFFSET.width() });
    }
    Ok(Instruction { opcode, cond, target, src1, src2, offset })
  }

  pub fn opcode(&self) -> OpCode {
    self.opcode
  }

  pub fn cond(&self) -> CondFlag {
    self.cond
  }

  pub fn target(&self) -> Register {
    self.target
  }

  pub fn src1(&self) -> Register {
    self.src1
  }

  pub fn src2(&self) -> Register {
    self.src2
  }

  pub fn offset(&self) -> i32 {
    self.offset
  }

}

/// The canonical text form, `SUB/MZ r2,r1,r3[-12]`. `FromStr` reads it back.
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}/{} {},{},{}[{}]",
      self.opcode, self.cond, self.target, self.src1, self.src2, self.offset
    )
  }
}

impl FromStr for Instruction {
  type Err = AssemblyError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    parse_instruction(text)
  }
}
