/*!

  The Duck Machine uses a 32 bit word, and every instruction is exactly one word. An
  instruction word is a fixed composition of non-overlapping bit fields, high-order
  bits first:

    Reserved:  1 bit   (bit  31)       must be zero
    Opcode:    5 bits  (bits 26..30)
    Cond:      4 bits  (bits 22..25)   OR of the condition flags M, Z, P, V
    Target:    4 bits  (bits 18..21)   register r0..r15
    Src1:      4 bits  (bits 14..17)   register r0..r15
    Src2:      4 bits  (bits 10..13)   register r0..r15
    Offset:   10 bits  (bits  0..9)    two's complement, -512..=511

  The symbolic components of an instruction are closed types. Only codes that name an
  `OpCode`, a set of `CondFlag`s, or a `Register` decode at all; anything else is an error
  rather than an instruction with a placeholder in it.

  The human readable form of an instruction is `OPCODE/FLAGS target,src1,src2[offset]`,
  for example `SUB/MZ r2,r1,r3[-12]`. See `assembly`.

*/

pub mod assembly;
mod binary;
mod condition;
mod instruction;
pub mod listing;
mod register;

pub use binary::{decode, encode, RESERVED, OPCODE, COND, TARGET, SRC1, SRC2, OFFSET, LAYOUT};
pub use condition::CondFlag;
pub use instruction::Instruction;
pub use register::Register;

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

/**
  Opcodes of the Duck Machine. The discriminant of each variant is its code in the opcode
  field, so the order below is significant. Codes 7 through 31 are unassigned.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)]
pub enum OpCode {
  Halt,   // 0
  Load,
  Store,
  Add,
  Sub,
  Mul,
  Div,    // 6
}

impl OpCode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}
