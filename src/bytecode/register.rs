use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

/**
  The sixteen general registers. The discriminant is the register's code in a register
  field. `r0` always reads as zero and `r15` is the program counter, which is why they
  also answer to `zero` and `pc` when parsed.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[repr(u8)]
pub enum Register {
  #[strum(to_string = "r0", serialize = "zero")]
  R0,
  #[strum(to_string = "r1")]
  R1,
  #[strum(to_string = "r2")]
  R2,
  #[strum(to_string = "r3")]
  R3,
  #[strum(to_string = "r4")]
  R4,
  #[strum(to_string = "r5")]
  R5,
  #[strum(to_string = "r6")]
  R6,
  #[strum(to_string = "r7")]
  R7,
  #[strum(to_string = "r8")]
  R8,
  #[strum(to_string = "r9")]
  R9,
  #[strum(to_string = "r10")]
  R10,
  #[strum(to_string = "r11")]
  R11,
  #[strum(to_string = "r12")]
  R12,
  #[strum(to_string = "r13")]
  R13,
  #[strum(to_string = "r14")]
  R14,
  #[strum(to_string = "r15", serialize = "pc")]
  R15,
}

impl Register {
  pub const ZERO: Register = Register::R0;
  pub const PC: Register = Register::R15;

  pub fn index(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}


#[cfg(test)]
mod tests {
  use std::convert::TryFrom;
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn every_index_names_a_register(){
    for index in 0..16u8 {
      let register = Register::try_from(index).unwrap();
      assert_eq!(register.index(), index);
      assert_eq!(register.to_string(), format!("r{}", index));
    }
    assert!(Register::try_from(16u8).is_err());
    assert_eq!(Register::iter().count(), 16);
  }

  #[test]
  fn names_and_aliases(){
    assert_eq!(Register::from_str("r2"), Ok(Register::R2));
    assert_eq!(Register::from_str("r15"), Ok(Register::PC));
    assert_eq!(Register::from_str("pc"), Ok(Register::R15));
    assert_eq!(Register::from_str("zero"), Ok(Register::ZERO));
    assert!(Register::from_str("r16").is_err());
    assert!(Register::from_str("R2").is_err());

    // Aliases are accepted, never produced.
    assert_eq!(Register::PC.to_string(), "r15");
    let name: &'static str = Register::ZERO.into();
    assert_eq!(name, "r0");
  }

}
