use clap;
use log::error;
use std::io::{BufRead, Read, Write};
use std::str::FromStr;
use crate::chars::{CharSet, MINIMAL_CONTROLS};
use crate::STDRESULT;
use super::CommandError;

const RCH: &str = "unreachable was reached";

/// Translate between a machine character set and UTF-8, one line at a time.
/// Line boundaries pass through verbatim in both directions.
pub fn filter(cmd: &clap::ArgMatches) -> STDRESULT {
    let charset = CharSet::from_str(cmd.get_one::<String>("charset").expect(RCH))?;
    let strict = cmd.get_flag("strict");
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    match cmd.get_one::<String>("direction").expect(RCH).as_str() {
        "decode" => {
            let mut line: Vec<u8> = Vec::new();
            loop {
                line.clear();
                if reader.read_until(0x0a, &mut line)? == 0 {
                    break;
                }
                let txt = charset.decode(&line, MINIMAL_CONTROLS);
                writer.write_all(txt.as_bytes())?;
            }
        }
        "encode" => {
            if atty::is(atty::Stream::Stdout) {
                error!("encoded output is machine bytes, please redirect it");
                return Err(Box::new(CommandError::InvalidCommand));
            }
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            for line in text.split_inclusive('\n') {
                let bytes = match strict {
                    true => match charset.encode_strict(line) {
                        Ok(bytes) => bytes,
                        Err(e) => {
                            error!("{}", e);
                            return Err(Box::new(CommandError::UnmappableInput));
                        }
                    },
                    false => charset.encode_lossy(line),
                };
                writer.write_all(&bytes)?;
            }
        }
        _ => panic!("{}", RCH),
    }
    writer.flush()?;
    Ok(())
}
