//! # `fat8kit` main library
//!
//! This library extracts files from FAT8-formatted floppy disk images stored
//! in the D88 container format, as used by the NEC PC-6001/6601, PC-8001/8801,
//! and PC-9801 families and the Toshiba Pasopia.
//!
//! ## Architecture
//!
//! Decoding proceeds through three layers:
//! * `img` slices a byte stream into disks and indexes their sectors, it does
//!   not try to interpret a file system
//! * `fs::fat8` detects which FAT8 layout is on a disk, then decodes its
//!   directory, reconciles the triplicate FAT, and follows cluster chains
//! * `commands` drives extraction, classification, deobfuscation of protected
//!   saves, and host file naming
//!
//! When a `fs::fat8::Disk` is created it takes ownership of an
//! `img::DiskImage` and uses it as storage.
//!
//! ## Character Sets
//!
//! Directory names and text dumps use machine character sets with no exact
//! Unicode counterpart.  The `chars` module carries two fixed 256-entry
//! tables (PC-88/98 and PC-6001) built so that byte to code point to byte is
//! the identity, leaning on the private use area where Unicode has nothing
//! suitable.
//!
//! ## Protected Saves
//!
//! BASIC's `SAVE "...",P` scrambles the file body.  `fs::fat8::obfuscate`
//! reverses the PC-88 combined-XOR-key scheme and the PC-98 bit rotation;
//! for other families the obfuscated body is extracted as is.

pub mod img;
pub mod chars;
pub mod fs;
pub mod commands;
pub mod cli;

use std::io::Read;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(), Box<dyn std::error::Error>>;

/// Read a whole input stream, from a file path or from stdin when the
/// path is `-`.
pub fn read_stream(path: &str) -> Result<Vec<u8>, DYNERR> {
    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    match std::fs::read(path) {
        Ok(buf) => Ok(buf),
        Err(e) => Err(Box::new(e)),
    }
}

/// Interpret a bytestream as a D88 container and return the first disk
/// with its file system, or Err if nothing could be interpreted.
pub fn create_disk_from_bytestream(buf: &[u8]) -> Result<fs::fat8::Disk, DYNERR> {
    match img::d88::DiskIter::new(buf).next() {
        Some((_, Ok(image))) => match fs::fat8::Disk::from_img(image) {
            Ok(disk) => Ok(disk),
            Err(e) => Err(Box::new(e)),
        },
        Some((_, Err(e))) => Err(Box::new(e)),
        None => Err(Box::new(img::Error::MalformedContainer)),
    }
}
