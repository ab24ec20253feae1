use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use pico_args::Arguments;

use dm_codec::bytecode::assembly::parse_assembly;
use dm_codec::bytecode::listing::field_table;
use dm_codec::{decode, Word};

struct Args {
  asm: Option<PathBuf>,
  disasm: bool,
  fields: bool,
  words: Vec<String>,
}

impl Args {
  fn parse() -> anyhow::Result<Self> {
    let mut args = Arguments::from_env();

    let asm = args.opt_value_from_str("--asm")?;
    let disasm = args.contains("--disasm");
    // With `trace_fields` on, every word gets its field table.
    let fields = args.contains("--fields") || cfg!(feature = "trace_fields");
    let words =
      args.finish()
          .into_iter()
          .map(|word| word.into_string().map_err(|w| anyhow::anyhow!("not valid text: {:?}", w)))
          .collect::<anyhow::Result<Vec<String>>>()?;

    Ok(Args { asm, disasm, fields, words })
  }
}

fn parse_word(text: &str) -> anyhow::Result<Word> {
  let digits = text.trim_start_matches("0x").trim_start_matches("0X").replace('_', "");
  Word::from_str_radix(&digits, 16).with_context(|| format!("`{}` is not a hex word", text))
}

fn assemble(path: &Path, fields: bool) -> anyhow::Result<()> {
  let text =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

  let mut errors = 0;
  for parsed in parse_assembly(&text) {
    match parsed {
      Ok(instruction) => {
        let word = instruction.encode()?;
        println!("{:#010x}  {}", word, instruction);
        if fields {
          println!("{}", field_table(word));
        }
      }
      Err(e) => {
        eprintln!("{}", e);
        errors += 1;
      }
    }
  }

  if errors > 0 {
    bail!("{} line(s) of {} did not assemble", errors, path.display());
  }
  Ok(())
}

fn disassemble(words: &[String], fields: bool) -> anyhow::Result<()> {
  for text in words {
    let word = parse_word(text)?;
    if fields {
      println!("{}", field_table(word));
    }
    let instruction = decode(word).with_context(|| format!("cannot decode {:#010x}", word))?;
    println!("{:#010x}  {}", word, instruction);
  }
  Ok(())
}

fn main() -> anyhow::Result<()> {
  let Args { asm, disasm, fields, words } = Args::parse()?;

  #[cfg(feature = "trace_fields")]
  eprintln!("Field tracing ENABLED");

  let mut did_anything = false;

  if let Some(path) = asm {
    assemble(&path, fields)?;
    did_anything = true;
  }

  if disasm {
    disassemble(&words, fields)?;
    did_anything = true;
  } else if !words.is_empty() {
    bail!("unexpected arguments: {}", words.join(" "));
  }

  if !did_anything {
    eprintln!("No action specified! Use --asm <file> or --disasm <hex word>...");
  }

  Ok(())
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_words(){
    assert_eq!(parse_word("0x10C84FF4").unwrap(), 0x10C8_4FF4);
    assert_eq!(parse_word("10c8_4ff4").unwrap(), 0x10C8_4FF4);
    assert!(parse_word("0xZZ").is_err());
    assert!(parse_word("0x1_0000_0000").is_err());
  }

}
