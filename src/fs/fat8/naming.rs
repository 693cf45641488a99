//! ## Host name policy
//!
//! Directory names come off the disk in a machine character set and may
//! contain anything at all, so the host name is built defensively: decode,
//! trim the space padding, percent-escape what the host file system cannot
//! take, normalize the extension by classification, then tack on the
//! attribute suffixes.  Collisions are settled case-insensitively so the
//! output directory behaves the same on case-folding file systems.

use std::collections::HashSet;
use crate::chars::{CharSet, NO_CONTROLS};
use super::types::{FileFlags, FileKind};

const UNSAFE_CHARS: &str = "\"*+,/:;<=>?[\\]|\u{00a5}\u{00a6}";
const UNSAFE_NAMES: [&str; 23] = [
    "CLOCK$", "CON", "PRN", "AUX", "NUL",
    "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn is_unsafe(ch: char) -> bool {
    let cp = ch as u32;
    cp < 0x20
        || cp == 0x7f
        || (0xe000..=0xf8ff).contains(&cp)
        || ch == '%'
        || UNSAFE_CHARS.contains(ch)
}

/// Percent-escape one name part.  The escape carries the machine byte, so
/// `%XX` always round-trips to the on-disk name.  `allow_dot` is false for
/// the parts themselves since the separator is added by the caller.
fn sanitize_part(part: &str, charset: CharSet) -> String {
    let last = part.chars().count().saturating_sub(1);
    let mut ans = String::new();
    for (i, ch) in part.chars().enumerate() {
        let unsafe_here = is_unsafe(ch)
            || ch == '.'
            || (i == 0 && ch == ' ')
            || (i == last && (ch == ' ' || ch == '.'));
        if unsafe_here {
            for byt in charset.encode_lossy(&ch.to_string()) {
                ans += &format!("%{:02X}", byt);
            }
        } else {
            ans.push(ch);
        }
    }
    ans
}

/// Build the host name for a directory entry: `BASE.EXT` plus the
/// normalized extension and the flag suffixes, without collision handling.
pub fn host_name(
    name_bytes: &[u8; 6],
    ext_bytes: &[u8; 3],
    kind: FileKind,
    flags: FileFlags,
    charset: CharSet,
) -> String {
    let name = charset.decode(name_bytes, NO_CONTROLS);
    let ext = charset.decode(ext_bytes, NO_CONTROLS);
    let name = sanitize_part(name.trim_end_matches(' '), charset);
    let ext = sanitize_part(ext.trim_end_matches(' '), charset);
    let mut base = match ext.is_empty() {
        true => name,
        false => format!("{}.{}", name, ext),
    };
    if UNSAFE_NAMES.contains(&base.to_uppercase().as_str()) {
        // hide reserved device names by escaping the first character
        let first: String = base.chars().take(1).collect();
        let rest: String = base.chars().skip(1).collect();
        let mut escaped = String::new();
        for byt in charset.encode_lossy(&first) {
            escaped += &format!("%{:02X}", byt);
        }
        base = escaped + &rest;
    }
    if base.is_empty() || base.starts_with('.') {
        base = format!("(empty){}", base);
    }
    let natural = match base.rsplit_once('.') {
        Some((_, suffix)) => suffix.to_lowercase(),
        None => String::new(),
    };
    let normalized = match kind {
        FileKind::Binary if !["bin", "cod"].contains(&natural.as_str()) => ".bin",
        FileKind::Basic if !["bas", "n88", "nip", "bin"].contains(&natural.as_str()) => ".bas",
        FileKind::Ascii if !["asc", "txt"].contains(&natural.as_str()) => ".asc",
        _ => "",
    };
    base + normalized + &flags.suffixes()
}

/// Insert `tail` after the base name, ahead of any extensions.
fn extend_name(name: &str, tail: &str) -> String {
    match name.split_once('.') {
        Some((head, rest)) => format!("{}{}.{}", head, tail, rest),
        None => format!("{}{}", name, tail),
    }
}

/// Companion artifact name: the final `.XXX` becomes `_XXX_utf8_dump.txt`.
pub fn utf8_dump_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((head, suffix)) => format!("{}_{}_utf8_dump.txt", head, suffix),
        None => format!("{}_utf8_dump.txt", name),
    }
}

/// Tracks names already produced, compared case-insensitively.
pub struct NamePool {
    used: HashSet<String>,
}

impl NamePool {
    pub fn new() -> Self {
        Self { used: HashSet::new() }
    }
    /// Claim `name`, disambiguating with ` (K)` before the extensions,
    /// K counting up from 2.
    pub fn claim(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut k = 1;
        while self.used.contains(&candidate.to_lowercase()) {
            k += 1;
            candidate = extend_name(name, &format!(" ({})", k));
        }
        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_name(kind: FileKind, attr_flags: FileFlags, name: &[u8; 6], ext: &[u8; 3]) -> String {
        host_name(name, ext, kind, attr_flags, CharSet::Pc98)
    }

    #[test]
    fn plain_names() {
        let flags = FileFlags::default();
        assert_eq!(entry_name(FileKind::Basic, flags, b"HELLO ", b"BAS"), "HELLO.BAS");
        assert_eq!(entry_name(FileKind::Ascii, flags, b"README", b"TXT"), "README.TXT");
    }

    #[test]
    fn extension_normalization() {
        let flags = FileFlags::default();
        assert_eq!(entry_name(FileKind::Binary, flags, b"DATA  ", b"DAT"), "DATA.DAT.bin");
        assert_eq!(entry_name(FileKind::Binary, flags, b"LOADER", b"COD"), "LOADER.COD");
        assert_eq!(entry_name(FileKind::Basic, flags, b"GAME  ", b"   "), "GAME.bas");
        assert_eq!(entry_name(FileKind::Ascii, flags, b"NOTES ", b"DOC"), "NOTES.DOC.asc");
    }

    #[test]
    fn flag_suffix_order() {
        let flags = FileFlags {
            r1: true,
            r3: true,
            read_only: true,
            obfuscated: true,
            verify: true,
            ..Default::default()
        };
        assert_eq!(
            entry_name(FileKind::Basic, flags, b"GAME  ", b"BAS"),
            "GAME.BAS.r-1.r-3.r-o.vfy.obf"
        );
    }

    #[test]
    fn unsafe_characters_escape_to_machine_bytes() {
        let flags = FileFlags::default();
        // 0x2F is a solidus in both character sets
        assert_eq!(entry_name(FileKind::Ascii, flags, b"A/B   ", b"TXT"), "A%2FB.TXT");
        // a yen sign decodes from 0x5C and must escape back to it
        let name = host_name(b"A\x5cB   ", b"TXT", FileKind::Ascii, flags, CharSet::Pc98);
        assert_eq!(name, "A%5CB.TXT");
    }

    #[test]
    fn empty_and_reserved_names() {
        let flags = FileFlags::default();
        assert_eq!(entry_name(FileKind::Ascii, flags, b"      ", b"   "), "(empty).asc");
        assert_eq!(entry_name(FileKind::Ascii, flags, b"CON   ", b"   "), "%43ON.asc");
    }

    #[test]
    fn collisions() {
        let mut pool = NamePool::new();
        assert_eq!(pool.claim("README.TXT"), "README.TXT");
        assert_eq!(pool.claim("readme.txt"), "readme (2).txt");
        assert_eq!(pool.claim("README.TXT"), "README (3).TXT");
        assert_eq!(pool.claim("HELLO"), "HELLO");
        assert_eq!(pool.claim("HELLO"), "HELLO (2)");
    }

    #[test]
    fn dump_names() {
        assert_eq!(utf8_dump_name("GAME.BAS.obf"), "GAME.BAS_obf_utf8_dump.txt");
        assert_eq!(utf8_dump_name("HELLO.BAS"), "HELLO_BAS_utf8_dump.txt");
        assert_eq!(utf8_dump_name("_AutoRun.dat"), "_AutoRun_dat_utf8_dump.txt");
        assert_eq!(utf8_dump_name("NAME"), "NAME_utf8_dump.txt");
    }
}
