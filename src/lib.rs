/*!
  A bit-field codec for the Duck Machine, a small teaching CPU. `bitfield` extracts and
  inserts contiguous bit ranges of a 32 bit word; `bytecode` builds the instruction word
  out of such fields and maps it to and from a structured `Instruction`.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bitfield;
pub mod bytecode;
pub mod error;

pub use bitfield::{sign_extend, BitField, Word, WORD_SIZE};
pub use bytecode::{decode, encode, CondFlag, Instruction, OpCode, Register};
pub use error::CodecError;
