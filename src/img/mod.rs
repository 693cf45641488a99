//! # Disk Image Module
//!
//! This is the container layer.  It knows how to slice a byte stream into
//! logical floppies and index their sectors, and nothing about file systems.
//!
//! A D88 stream is a concatenation of disks, each led by a 688-byte header
//! carrying a per-track offset table.  `d88::DiskIter` walks the
//! concatenation and yields one `DiskImage` per disk, in stream order.  The
//! sector index is keyed by the CHRN address fields recorded with each
//! sector, not by position, so shifted or partial tracks still resolve.

pub mod d88;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::collections::BTreeMap;
use std::fmt;

/// Enumerates container errors.  The `Display` trait will print the long message.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not a well formed container")]
    MalformedContainer,
    #[error("stream ended before the declared image size")]
    TruncatedStream,
}

/// Media kind byte from the D88 header.
#[derive(FromPrimitive, PartialEq, Eq, Clone, Copy, Debug)]
pub enum MediaKind {
    F2D = 0x00,
    F2DD = 0x10,
    F2HD = 0x20,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F2D => write!(f, "2D"),
            Self::F2DD => write!(f, "2DD"),
            Self::F2HD => write!(f, "2HD"),
        }
    }
}

/// One recorded sector: the CHRN header fields plus the payload.
#[derive(Clone, Debug)]
pub struct Sector {
    pub cylinder: u8,
    pub head: u8,
    pub sector_id: u8,
    /// size code N, 0..3 for 128/256/512/1024
    pub size_code: u8,
    pub sectors_in_track: u16,
    pub density: u8,
    pub deleted: bool,
    pub status: u8,
    /// true when the recorded data length disagreed with the size code;
    /// the payload has been clamped to the declared size
    pub malformed: bool,
    pub data: Vec<u8>,
}

impl Sector {
    /// Declared payload size per the size code N.  The code is masked to
    /// three bits, corrupt values cannot shift the size out of range.
    pub fn declared_size(&self) -> usize {
        128 << (self.size_code & 7) as usize
    }
}

/// A logical floppy: header fields plus a sector index keyed by
/// (cylinder, head, sector id).
#[derive(Debug)]
pub struct DiskImage {
    pub name: String,
    pub write_protected: bool,
    pub media: Option<MediaKind>,
    pub media_byte: u8,
    pub declared_size: usize,
    /// count of malformed sector records seen while indexing
    pub malformed_sectors: usize,
    index: BTreeMap<(u8, u8, u8), Sector>,
}

impl DiskImage {
    pub fn new(name: String, write_protected: bool, media_byte: u8, declared_size: usize) -> Self {
        Self {
            name,
            write_protected,
            media: MediaKind::from_u8(media_byte),
            media_byte,
            declared_size,
            malformed_sectors: 0,
            index: BTreeMap::new(),
        }
    }
    /// Insert a sector; the first record for a given address wins.
    pub fn insert(&mut self, sec: Sector) -> bool {
        let key = (sec.cylinder, sec.head, sec.sector_id);
        if self.index.contains_key(&key) {
            log::warn!(
                "cyl {} head {} sector {} appears more than once, keeping first",
                key.0, key.1, key.2
            );
            return false;
        }
        if sec.malformed {
            self.malformed_sectors += 1;
        }
        self.index.insert(key, sec);
        true
    }
    pub fn get(&self, cyl: u8, head: u8, sector_id: u8) -> Option<&Sector> {
        self.index.get(&(cyl, head, sector_id))
    }
    /// All sectors in (cylinder, head, id) order.
    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.index.values()
    }
    /// Sectors belonging to one track, in id order.
    pub fn track(&self, cyl: u8, head: u8) -> Vec<&Sector> {
        self.index
            .range((cyl, head, 0)..=(cyl, head, 255))
            .map(|(_, s)| s)
            .collect()
    }
    /// Highest cylinder number seen plus one.
    pub fn cylinders(&self) -> usize {
        match self.index.keys().map(|k| k.0).max() {
            Some(c) => c as usize + 1,
            None => 0,
        }
    }
    /// Highest head number seen plus one, at least 1.
    pub fn heads(&self) -> usize {
        match self.index.keys().map(|k| k.1).max() {
            Some(h) => h as usize + 1,
            None => 1,
        }
    }
    /// Highest sector id seen on any track.
    pub fn max_sector_id(&self) -> usize {
        match self.index.keys().map(|k| k.2).max() {
            Some(r) => r as usize,
            None => 0,
        }
    }
    pub fn total_sectors(&self) -> usize {
        self.index.len()
    }
    pub fn payload_bytes(&self) -> usize {
        self.index.values().map(|s| s.data.len()).sum()
    }
    pub fn largest_sector(&self) -> usize {
        self.index.values().map(|s| s.data.len()).max().unwrap_or(0)
    }
}
