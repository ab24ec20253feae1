//! Condition flags. An instruction executes only if the machine's condition code shares a
//! flag with the instruction's condition set, so `ALWAYS` is every flag and `NEVER` is none.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bimap::BiMap;
use bitflags::bitflags;

bitflags! {
  #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
  pub struct CondFlag: u8 {
    /// Minus: the last result was negative.
    const M = 0b0001;
    /// Zero
    const Z = 0b0010;
    /// Positive
    const P = 0b0100;
    /// Overflow
    const V = 0b1000;
  }
}

// Letters in rendering order, lowest bit first.
const FLAG_ORDER: [char; 4] = ['M', 'Z', 'P', 'V'];

lazy_static! {
  static ref FLAG_LETTERS: BiMap<char, CondFlag> = {
    let mut letters = BiMap::new();
    letters.insert('M', CondFlag::M);
    letters.insert('Z', CondFlag::Z);
    letters.insert('P', CondFlag::P);
    letters.insert('V', CondFlag::V);
    letters
  };
}

impl CondFlag {
  pub const NEVER: CondFlag = CondFlag::empty();
  pub const ALWAYS: CondFlag = CondFlag::all();

  /// The code stored in the condition field.
  pub fn code(&self) -> u8 {
    self.bits()
  }
}

impl Display for CondFlag {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if *self == CondFlag::ALWAYS {
      return write!(f, "ALWAYS");
    }
    if *self == CondFlag::NEVER {
      return write!(f, "NEVER");
    }
    let letters: String =
      FLAG_ORDER
        .iter()
        .filter(|letter| {
          FLAG_LETTERS
            .get_by_left(*letter)
            .map_or(false, |flag| self.contains(*flag))
        })
        .collect();
    write!(f, "{}", letters)
  }
}

/// Accepts `ALWAYS`, `NEVER`, or any nonempty combination of the letters `M`, `Z`, `P`, `V`.
impl FromStr for CondFlag {
  type Err = strum::ParseError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    match text {
      "ALWAYS" => Ok(CondFlag::ALWAYS),
      "NEVER"  => Ok(CondFlag::NEVER),
      ""       => Err(strum::ParseError::VariantNotFound),
      letters  => {
        letters.chars().try_fold(CondFlag::NEVER, |flags, letter| {
          FLAG_LETTERS
            .get_by_left(&letter)
            .map(|flag| flags | *flag)
            .ok_or(strum::ParseError::VariantNotFound)
        })
      }
    }
  }
}
