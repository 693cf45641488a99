//! ## Known FAT8 formats
//!
//! Several mutually incompatible disk layouts all answer to the FAT8 name.
//! This module holds the descriptor type, the table of known formats, and
//! the detector that matches an indexed disk against the table.
//!
//! The table is ordered: the first entry whose fingerprint matches wins.
//! Entries carrying a boot-sector byte hint sit ahead of geometry-only
//! entries with the same geometry, so a `SYS` boot loader lands on the
//! PC-6001 entry before the PC-8001 entry can claim the disk.

use log::{debug, info};
use crate::chars::CharSet;
use crate::img::{DiskImage, MediaKind};
use super::obfuscate::Scheme;
use super::types::Error;

/// Closed set of machine families; selects the character set and the
/// save-time obfuscation scheme.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MachineFamily {
    Pc88,
    Pc98,
    Pc6001,
    Pasopia,
}

impl MachineFamily {
    pub fn charset(&self) -> CharSet {
        match self {
            Self::Pc6001 => CharSet::Pc6001,
            _ => CharSet::Pc98,
        }
    }
    /// The scheme protected saves use on this family, if it is known.
    pub fn obfuscation(&self) -> Option<Scheme> {
        match self {
            Self::Pc88 => Some(Scheme::Pc88),
            Self::Pc98 => Some(Scheme::Pc98),
            _ => None,
        }
    }
}

/// Predicate over the first sector of track 0, side 0.
#[derive(Clone, Copy)]
pub enum BootHint {
    /// no constraint
    Any,
    /// payload begins with the given bytes
    Prefix(&'static [u8]),
    /// payload begins with one of the given byte strings
    OneOf(&'static [&'static [u8]]),
    /// payload is exactly 128 bytes
    Size128,
    /// payload is anything but 128 bytes
    SizeNot128,
}

impl BootHint {
    fn matches(&self, boot: Option<&[u8]>) -> bool {
        match self {
            Self::Any => true,
            Self::Prefix(p) => matches!(boot, Some(b) if b.starts_with(p)),
            Self::OneOf(list) => {
                matches!(boot, Some(b) if list.iter().any(|p| b.starts_with(p)))
            }
            Self::Size128 => matches!(boot, Some(b) if b.len() == 128),
            Self::SizeNot128 => matches!(boot, Some(b) if b.len() != 128),
        }
    }
}

/// Geometry and boot-sector fingerprint for one table entry.
pub struct Fingerprint {
    pub tracks: usize,
    pub sides: usize,
    /// logical sectors per track, after any sector subdivision
    pub sectors: usize,
    /// declared media kind, enforced only when the disk declares a known kind
    pub media: Option<MediaKind>,
    pub boot: BootHint,
}

/// Describes one FAT8 layout: geometry, the location of the system track,
/// and the machine family.  The fields echo the BASIC manuals the layouts
/// were taken from; wild types were observed on archived disks.
pub struct Fat8Format {
    pub name: &'static str,
    pub family: MachineFamily,
    pub fingerprint: Fingerprint,
    /// track count as far as the FAT is concerned (wild types record an
    /// extra physical track the FAT does not cover)
    pub fat_tracks: usize,
    pub system_track: usize,
    pub system_side: usize,
    pub clusters_per_track: usize,
    /// Pasopia numbers clusters with the side in the least significant
    /// position
    pub side_is_cluster_lsb: bool,
}

/// A selected variant: the table entry joined with the observed sector
/// geometry.
pub struct Fat8Variant {
    pub name: &'static str,
    pub family: MachineFamily,
    pub tracks: usize,
    pub fat_tracks: usize,
    pub sides: usize,
    /// logical sectors per track
    pub sectors: usize,
    /// logical sector size in bytes
    pub sector_size: usize,
    /// each physical sector holds 1 << shift logical sectors
    pub sector_shift: usize,
    pub system_track: usize,
    pub system_side: usize,
    pub clusters_per_track: usize,
    pub side_is_cluster_lsb: bool,
}

impl Fat8Variant {
    pub fn sectors_per_cluster(&self) -> usize {
        self.sectors / self.clusters_per_track
    }
    pub fn bytes_per_cluster(&self) -> usize {
        self.sectors_per_cluster() * self.sector_size
    }
    pub fn total_clusters(&self) -> usize {
        self.fat_tracks * self.sides * self.clusters_per_track
    }
    /// Directory occupies the leading sectors of the system track.
    pub fn dir_sectors(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.sectors - 4
    }
    /// The ID/autorun sector sits between the directory and the FAT.
    pub fn id_sector(&self) -> usize {
        self.sectors - 3
    }
    /// The three FAT copies close out the system track.
    pub fn fat_sectors(&self) -> [usize; 3] {
        [self.sectors - 2, self.sectors - 1, self.sectors]
    }
    pub fn charset(&self) -> CharSet {
        self.family.charset()
    }
}

pub const KNOWN_FORMATS: [Fat8Format; 12] = [
    Fat8Format {
        // from PC 6001mk II User Manual
        name: "PC-6001 mkII 5.25\" 1D",
        family: MachineFamily::Pc6001,
        fingerprint: Fingerprint {
            tracks: 35, sides: 1, sectors: 16,
            media: None, boot: BootHint::Prefix(b"SYS"),
        },
        fat_tracks: 35, system_track: 18, system_side: 0,
        clusters_per_track: 2, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // seen in the wild
        name: "PC-6001 mkII 5.25\" 1D (wild type, 36 tracks)",
        family: MachineFamily::Pc6001,
        fingerprint: Fingerprint {
            tracks: 36, sides: 1, sectors: 16,
            media: None, boot: BootHint::Prefix(b"SYS"),
        },
        fat_tracks: 35, system_track: 18, system_side: 0,
        clusters_per_track: 2, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // seen in the wild
        name: "PC-6601 3.5\" 1D (wild type)",
        family: MachineFamily::Pc6001,
        fingerprint: Fingerprint {
            tracks: 40, sides: 1, sectors: 16,
            media: None, boot: BootHint::Prefix(b"SYS"),
        },
        fat_tracks: 40, system_track: 18, system_side: 0,
        clusters_per_track: 2, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // seen in the wild
        name: "PC-6601 SR 3.5\" 1DD (wild type)",
        family: MachineFamily::Pc6001,
        fingerprint: Fingerprint {
            tracks: 80, sides: 1, sectors: 16,
            media: None, boot: BootHint::OneOf(&[b"IPL", b"RXR"]),
        },
        fat_tracks: 80, system_track: 37, system_side: 0,
        clusters_per_track: 2, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // seen in the wild
        name: "PC-6601 SR 3.5\" 1DD (wild type, 81 tracks)",
        family: MachineFamily::Pc6001,
        fingerprint: Fingerprint {
            tracks: 81, sides: 1, sectors: 16,
            media: None, boot: BootHint::OneOf(&[b"IPL", b"RXR"]),
        },
        fat_tracks: 80, system_track: 37, system_side: 0,
        clusters_per_track: 2, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // from PC-8801 mkII BASIC User's Manual
        //      PC-8001 mkII SR N80SR-BASIC Reference Manual
        //      PC-8001 N-BASIC Programming Textbook
        name: "PC-8000/PC-8800 5.25\" 1D",
        family: MachineFamily::Pc88,
        fingerprint: Fingerprint {
            tracks: 35, sides: 1, sectors: 16,
            media: None, boot: BootHint::Any,
        },
        fat_tracks: 35, system_track: 18, system_side: 0,
        clusters_per_track: 2, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // seen in the wild
        name: "Pasopia 5.25\" 2D (wild type)",
        family: MachineFamily::Pasopia,
        fingerprint: Fingerprint {
            tracks: 40, sides: 2, sectors: 16,
            media: None, boot: BootHint::Prefix(b"\0\0\0\0"),
        },
        fat_tracks: 40, system_track: 18, system_side: 0,
        clusters_per_track: 2, side_is_cluster_lsb: true,
    },
    Fat8Format {
        // from PC-8801 mkII MR N88-BASIC / N88-Japanese BASIC Guide Book
        //      PC-8801 mkII BASIC User's Manual
        //      PC-8001 mkII SR N80SR-BASIC Reference Manual
        name: "PC-8000/PC-8800 5.25\" 2D",
        family: MachineFamily::Pc88,
        fingerprint: Fingerprint {
            tracks: 40, sides: 2, sectors: 16,
            media: None, boot: BootHint::Any,
        },
        fat_tracks: 40, system_track: 18, system_side: 1,
        clusters_per_track: 2, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // from PC-9801UV21 BASIC User's Manual
        name: "PC-9800 3.5\" 2DD/5.25\" 2DD",
        family: MachineFamily::Pc98,
        fingerprint: Fingerprint {
            tracks: 80, sides: 2, sectors: 16,
            media: Some(MediaKind::F2DD), boot: BootHint::Any,
        },
        fat_tracks: 80, system_track: 40, system_side: 0,
        clusters_per_track: 1, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // from PC-9801UV21 BASIC User's Manual
        name: "PC-9800 8\" 2D/3.5\" 2HD/5.25\" 2HD",
        family: MachineFamily::Pc98,
        fingerprint: Fingerprint {
            tracks: 77, sides: 2, sectors: 26,
            media: None, boot: BootHint::Size128,
        },
        fat_tracks: 77, system_track: 35, system_side: 0,
        clusters_per_track: 1, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // seen in the wild
        name: "PC-9800 8\" 2D/3.5\" 2HD/5.25\" 2HD (wild type, 78 tracks)",
        family: MachineFamily::Pc98,
        fingerprint: Fingerprint {
            tracks: 78, sides: 2, sectors: 26,
            media: None, boot: BootHint::Size128,
        },
        fat_tracks: 77, system_track: 35, system_side: 0,
        clusters_per_track: 1, side_is_cluster_lsb: false,
    },
    Fat8Format {
        // from PC-8801 mkII MR N88-BASIC / N88-Japanese BASIC Guide Book
        //      PC-8801 mkII BASIC User's Manual
        //      PC-8001 mkII SR N80SR-BASIC Reference Manual
        name: "PC-8801 mkII 8\" 2D/5.25\" 2HD",
        family: MachineFamily::Pc88,
        fingerprint: Fingerprint {
            tracks: 77, sides: 2, sectors: 26,
            media: None, boot: BootHint::SizeNot128,
        },
        fat_tracks: 77, system_track: 35, system_side: 0,
        clusters_per_track: 1, side_is_cluster_lsb: false,
    },
];

/// Observed geometry used to evaluate fingerprints.
struct Observed {
    tracks: usize,
    sides: usize,
    sectors: usize,
    sector_size: usize,
    sector_shift: usize,
}

/// Collect geometry from the first cylinder or two.  When physical sectors
/// are larger than 256 bytes with fewer than 16 to a track, they subdivide
/// into logical sectors until the counts line up with the FAT8 layouts.
fn observe(img: &DiskImage) -> Option<Observed> {
    let mut sectors = 0usize;
    let mut sector_size = 0usize;
    let mut sides = 0usize;
    for sec in img.sectors() {
        if sec.cylinder > 1 {
            continue;
        }
        if sec.head as usize + 1 > sides {
            sides = sec.head as usize + 1;
        }
        if sec.head == 0 {
            if sec.sectors_in_track as usize > sectors {
                sectors = sec.sectors_in_track as usize;
            }
            if sec.data.len() > sector_size {
                sector_size = sec.data.len();
            }
        }
    }
    if sectors == 0 {
        sectors = img.track(0, 0).len();
    }
    if sectors == 0 || sector_size == 0 {
        return None;
    }
    let mut sector_shift = 0;
    while sector_size > 0x100 && sectors < 16 {
        sector_shift += 1;
        sector_size >>= 1;
        sectors <<= 1;
    }
    Some(Observed {
        tracks: img.cylinders(),
        sides,
        sectors,
        sector_size,
        sector_shift,
    })
}

/// Match the disk against the known-format table, first hit wins.
pub fn detect(img: &DiskImage) -> Result<Fat8Variant, Error> {
    let obs = match observe(img) {
        Some(obs) => obs,
        None => {
            debug!("no sectors on the first cylinders");
            return Err(Error::UnknownFormat);
        }
    };
    let boot = img.get(0, 0, 1).map(|sec| sec.data.as_slice());
    if let Some(b) = boot {
        debug!(
            "boot sector {} bytes, prefix {}",
            b.len(),
            hex::encode(&b[0..usize::min(4, b.len())])
        );
    }
    for fmt in &KNOWN_FORMATS {
        let fp = &fmt.fingerprint;
        if fp.tracks != obs.tracks || fp.sides != obs.sides || fp.sectors != obs.sectors {
            continue;
        }
        if let (Some(want), Some(have)) = (fp.media, img.media) {
            if want != have {
                continue;
            }
        }
        if !fp.boot.matches(boot) {
            continue;
        }
        info!("identified {}", fmt.name);
        return Ok(Fat8Variant {
            name: fmt.name,
            family: fmt.family,
            tracks: obs.tracks,
            fat_tracks: fmt.fat_tracks,
            sides: fmt.fingerprint.sides,
            sectors: obs.sectors,
            sector_size: obs.sector_size,
            sector_shift: obs.sector_shift,
            system_track: fmt.system_track,
            system_side: fmt.system_side,
            clusters_per_track: fmt.clusters_per_track,
            side_is_cluster_lsb: fmt.side_is_cluster_lsb,
        });
    }
    debug!(
        "no fingerprint matched: {} tracks, {} sides, {} sectors of {} bytes",
        obs.tracks, obs.sides, obs.sectors, obs.sector_size
    );
    Err(Error::UnknownFormat)
}
