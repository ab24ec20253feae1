/*!
  The human readable textual form of an instruction is called assembly. An instruction is
  written

    OPCODE/FLAGS target,src1,src2[offset]

  for example `SUB/MZ r2,r1,r3[-12]`. This is exactly what `Instruction`'s `Display`
  produces, so rendering and parsing are inverses. When reading, `/FLAGS` may be omitted
  and means `ALWAYS`, whitespace around the separators is ignored, registers may be given
  by their aliases `zero` and `pc`, and a `#` starts a comment that runs to the end of the
  line.

  Parsing happens in two steps. `nom` recognizes the shape of a line and hands back the
  text of each component; the components are then resolved through the `strum` derives of
  the value domains, and each failure is reported with its line number.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::{
  bytes::complete::take_till,
  character::complete::{
    alpha1,
    alphanumeric1,
    char as one_char,
    digit1,
    one_of,
    space0,
    space1
  },
  combinator::{all_consuming, opt, recognize},
  sequence::{delimited, pair, preceded, terminated, tuple},
  IResult
};

use super::{CondFlag, Instruction, OpCode, Register};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssemblyError {
  /// The line does not have the shape of an instruction at all.
  Malformed {
    line: usize,
    text: String
  },
  NotAnOperation {
    line: usize,
    name: String
  },
  NotACondition {
    line: usize,
    flags: String
  },
  NotARegister {
    line: usize,
    name: String
  },
  OffsetOutOfRange {
    line: usize,
    offset: String
  },
}

impl AssemblyError {
  pub fn line(&self) -> usize {
    match self {
      AssemblyError::Malformed { line, .. }        => *line,
      AssemblyError::NotAnOperation { line, .. }   => *line,
      AssemblyError::NotACondition { line, .. }    => *line,
      AssemblyError::NotARegister { line, .. }     => *line,
      AssemblyError::OffsetOutOfRange { line, .. } => *line,
    }
  }
}

impl Display for AssemblyError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      AssemblyError::Malformed { line, text } => {
        write!(f, "Error on line {}: `{}` is not an instruction.", line, text)
      }
      AssemblyError::NotAnOperation { line, name } => {
        write!(f, "Error on line {}: {} is not an operation.", line, name)
      }
      AssemblyError::NotACondition { line, flags } => {
        write!(f, "Error on line {}: {} is not a set of condition flags.", line, flags)
      }
      AssemblyError::NotARegister { line, name } => {
        write!(f, "Error on line {}: {} is not a register.", line, name)
      }
      AssemblyError::OffsetOutOfRange { line, offset } => {
        write!(f, "Error on line {}: offset {} does not fit in the offset field.", line, offset)
      }
    }
  }
}

impl std::error::Error for AssemblyError {}

/// The text of each component of an instruction, before any of it is resolved.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct RawInstruction<'a> {
  opcode : &'a str,
  cond   : Option<&'a str>,
  target : &'a str,
  src1   : &'a str,
  src2   : &'a str,
  offset : &'a str,
}

fn comma(input: &str) -> IResult<&str, char> {
  delimited(space0, one_char(','), space0)(input)
}

fn signed_integer(input: &str) -> IResult<&str, &str> {
  recognize(pair(opt(one_of("+-")), digit1))(input)
}

fn raw_instruction(input: &str) -> IResult<&str, RawInstruction<'_>> {
  let (input, (opcode, cond)) =
    preceded(
      space0,
      pair(
        alpha1,
        opt(preceded(delimited(space0, one_char('/'), space0), alpha1))
      )
    )(input)?;

  let (input, (target, _, src1, _, src2)) =
    preceded(
      space1,
      tuple((alphanumeric1, comma, alphanumeric1, comma, alphanumeric1))
    )(input)?;

  let (input, offset) =
    terminated(
      delimited(
        delimited(space0, one_char('['), space0),
        signed_integer,
        preceded(space0, one_char(']'))
      ),
      space0
    )(input)?;

  Ok((input, RawInstruction { opcode, cond, target, src1, src2, offset }))
}

/// The part of a line before any comment.
fn code_part(line: &str) -> &str {
  let split: IResult<&str, &str> = take_till(|c: char| c == '#')(line);
  match split {
    Ok((_comment, code)) => code,
    Err(_e) => line
  }
}

fn resolve(raw: RawInstruction<'_>, line: usize) -> Result<Instruction, AssemblyError> {
  let opcode = OpCode::from_str(raw.opcode).map_err(|_| {
    AssemblyError::NotAnOperation { line, name: raw.opcode.to_string() }
  })?;

  let cond = match raw.cond {
    Some(flags) => CondFlag::from_str(flags).map_err(|_| {
      AssemblyError::NotACondition { line, flags: flags.to_string() }
    })?,
    None => CondFlag::ALWAYS
  };

  let register = |name: &str| {
    Register::from_str(name).map_err(|_| {
      AssemblyError::NotARegister { line, name: name.to_string() }
    })
  };
  let target = register(raw.target)?;
  let src1   = register(raw.src1)?;
  let src2   = register(raw.src2)?;

  let out_of_range = || AssemblyError::OffsetOutOfRange { line, offset: raw.offset.to_string() };
  // A leading `+` is accepted by `i32::from_str`.
  let offset = i32::from_str(raw.offset).map_err(|_| out_of_range())?;

  Instruction::new(opcode, cond, target, src1, src2, offset).map_err(|_| out_of_range())
}

fn parse_line(text: &str, line: usize) -> Result<Instruction, AssemblyError> {
  let code = code_part(text);
  match all_consuming(raw_instruction)(code) {
    Ok((_rest, raw)) => resolve(raw, line),
    Err(_e) => Err(AssemblyError::Malformed { line, text: code.trim().to_string() })
  }
}

/// Parses exactly one instruction. Errors report line 1.
pub fn parse_instruction(text: &str) -> Result<Instruction, AssemblyError> {
  parse_line(text, 1)
}

/**
  Parses a listing with one instruction per line. Blank lines and lines holding only a
  comment are skipped. Every other line yields either its instruction or the reason it is
  not one, so a caller can report all problems in one pass. Lines are numbered from 1.
*/
pub fn parse_assembly(text: &str) -> Vec<Result<Instruction, AssemblyError>> {
  text
    .lines()
    .enumerate()
    .filter(|(_, line)| !code_part(line).trim().is_empty())
    .map(|(idx, line)| parse_line(line, idx + 1))
    .collect()
}
