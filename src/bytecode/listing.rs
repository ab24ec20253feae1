//! A field-by-field breakdown of an instruction word, for people. The codec never prints;
//! callers that want to see a word ask for its table and print it themselves.

use std::convert::TryFrom;

use prettytable::{format as TableFormat, Table};

use super::{CondFlag, OpCode, Register, LAYOUT, RESERVED, OPCODE, COND, OFFSET};
use crate::bitfield::{BitField, Word};

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

// What the raw bits of `field` mean. Works on any word, including ones `decode` rejects.
fn interpret(field: BitField, word: Word) -> String {
  let raw = field.extract(word);
  let unknown = || "unknown".to_string();

  match field {
    RESERVED => {
      match raw {
        0 => String::new(),
        _ => "set".to_string()
      }
    }
    OPCODE => {
      u8::try_from(raw).ok()
                       .and_then(|code| OpCode::try_from(code).ok())
                       .map_or_else(unknown, |opcode| opcode.to_string())
    }
    COND => {
      u8::try_from(raw).ok()
                       .and_then(CondFlag::from_bits)
                       .map_or_else(unknown, |cond| cond.to_string())
    }
    OFFSET => {
      OFFSET.extract_signed(word)
            .map_or_else(|_| unknown(), |offset| offset.to_string())
    }
    // The three register fields.
    _ => {
      u8::try_from(raw).ok()
                       .and_then(|index| Register::try_from(index).ok())
                       .map_or_else(unknown, |register| register.to_string())
    }
  }
}

/// One row per field of the layout: its name, bit range, raw bits, and what they mean.
pub fn field_table(word: Word) -> Table {
  let mut table = Table::new();
  table.set_titles(row![ub->"Field", ub->"Bits", ub->"Raw", ub->"Value"]);
  table.set_format(*TABLE_DISPLAY_FORMAT);

  for (name, field) in LAYOUT.iter() {
    let raw = format!("{:0width$b}", field.extract(word), width = field.width() as usize);
    let value = interpret(*field, word);
    table.add_row(row![name, field, raw, value]);
  }

  table
}


#[cfg(test)]
mod tests {
  use super::*;

  fn cell(table: &Table, row: usize, column: usize) -> String {
    table.get_row(row)
         .and_then(|r| r.get_cell(column))
         .map(|c| c.get_content())
         .unwrap_or_default()
  }

  #[test]
  fn breaks_down_a_valid_word(){
    // SUB/MZ r2,r1,r3[-12]
    let table = field_table(0x10C8_4FF4);
    assert_eq!(table.len(), LAYOUT.len());

    assert_eq!(cell(&table, 0, 0), "reserved");
    assert_eq!(cell(&table, 0, 3), "");

    assert_eq!(cell(&table, 1, 1), "30..26");
    assert_eq!(cell(&table, 1, 2), "00100");
    assert_eq!(cell(&table, 1, 3), "SUB");

    assert_eq!(cell(&table, 2, 3), "MZ");
    assert_eq!(cell(&table, 3, 3), "r2");
    assert_eq!(cell(&table, 4, 3), "r1");
    assert_eq!(cell(&table, 5, 3), "r3");

    assert_eq!(cell(&table, 6, 2), "1111110100");
    assert_eq!(cell(&table, 6, 3), "-12");
  }

  #[test]
  fn marks_what_decode_would_reject(){
    // Reserved bit set, opcode 31.
    let table = field_table(0xFC00_0000);
    assert_eq!(cell(&table, 0, 3), "set");
    assert_eq!(cell(&table, 1, 3), "unknown");
  }

}
