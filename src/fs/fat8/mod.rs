//! # FAT8 file system module
//!
//! This decodes the FAT8 layouts used by NEC's 8-bit BASIC disk systems and
//! relatives.  One *system track* holds everything the filesystem knows: the
//! directory in the leading sectors, an ID sector, and three copies of a
//! one-byte-per-cluster allocation table.  Files are chains of clusters; a
//! terminal FAT value in 0xC0..=0xC7 says how many sectors of the final
//! cluster belong to the file.
//!
//! The decoder is deliberately forgiving.  Structural problems are recorded
//! and counted, the affected file is emitted with a best-effort truncated
//! body, and the walk moves on to the next entry.

pub mod types;
pub mod formats;
pub mod obfuscate;
pub mod naming;

use bit_vec::BitVec;
use log::{debug, trace};
use std::collections::BTreeMap;

use crate::img::DiskImage;
use self::formats::Fat8Variant;
use self::types::*;

/// Result of a chain walk: the data clusters traversed, the raw terminal
/// value when one was reached, and the error that stopped the walk early.
pub struct ChainWalk {
    pub clusters: Vec<u8>,
    pub terminal: Option<u8>,
    pub error: Option<Error>,
}

/// Everything decoded from one disk: the files in directory order and the
/// disk-level errors (directory structure, FAT reconciliation) that precede
/// any per-file problem.
pub struct Catalog {
    pub files: Vec<ExtractedFile>,
    pub errors: Vec<Error>,
}

impl Catalog {
    /// Total structural error count over the disk and all of its files.
    pub fn error_count(&self) -> usize {
        self.errors.len() + self.files.iter().map(|f| f.errors.len()).sum::<usize>()
    }
}

/// The primary interface for FAT8 operations.  Owns the sector index and
/// the selected variant.
pub struct Disk {
    img: DiskImage,
    fmt: Fat8Variant,
}

impl Disk {
    /// Detect the variant and take ownership of the image.  Fails with
    /// `UnknownFormat` when no fingerprint matches.
    pub fn from_img(img: DiskImage) -> Result<Self, Error> {
        let fmt = formats::detect(&img)?;
        Ok(Self { img, fmt })
    }
    pub fn fmt(&self) -> &Fat8Variant {
        &self.fmt
    }
    pub fn img(&self) -> &DiskImage {
        &self.img
    }

    /// Fetch one logical sector, subdividing physical sectors when the
    /// variant calls for it.  Short physical sectors are zero-padded to the
    /// logical size.  `None` when the physical sector is absent.
    fn read_virtual_sector(&self, track: usize, side: usize, vsec: usize) -> Option<Vec<u8>> {
        let shift = self.fmt.sector_shift;
        let psec = ((vsec - 1) >> shift) + 1;
        let sec = self.img.get(track as u8, side as u8, psec as u8)?;
        let size = self.fmt.sector_size;
        let sub = (vsec - 1) & ((1 << shift) - 1);
        let mut ans = vec![0; size];
        let lo = size * sub;
        let hi = usize::min(size * (sub + 1), sec.data.len());
        if hi > lo {
            ans[0..hi - lo].copy_from_slice(&sec.data[lo..hi]);
        }
        Some(ans)
    }

    /// Raw payload of the boot/ID sector at track 0, side 0, sector 1.
    pub fn boot_sector(&self) -> Option<Vec<u8>> {
        self.img.get(0, 0, 1).map(|sec| sec.data.clone())
    }

    /// The ID/autorun sector of the system track.
    pub fn id_sector(&self) -> Option<Vec<u8>> {
        self.read_virtual_sector(self.fmt.system_track, self.fmt.system_side, self.fmt.id_sector())
    }

    /// Directory sectors of the system track, keyed by logical sector number.
    pub fn dir_sectors(&self) -> BTreeMap<usize, Option<Vec<u8>>> {
        self.fmt
            .dir_sectors()
            .map(|vsec| {
                (vsec, self.read_virtual_sector(self.fmt.system_track, self.fmt.system_side, vsec))
            })
            .collect()
    }

    /// The three FAT copies, keyed by logical sector number.
    pub fn fat_sectors(&self) -> BTreeMap<usize, Option<Vec<u8>>> {
        self.fmt
            .fat_sectors()
            .iter()
            .map(|vsec| {
                (*vsec, self.read_virtual_sector(self.fmt.system_track, self.fmt.system_side, *vsec))
            })
            .collect()
    }

    /// Scan the directory region in on-disk order.  A first byte of 0x00
    /// ends the directory, 0xFF marks a free slot, and running off the end
    /// of the region is an implicit end.
    pub fn directory(&self) -> (Vec<DirectoryEntry>, Vec<Error>) {
        let mut entries = Vec::new();
        let mut errors = Vec::new();
        let mut idx = 0;
        'scan: for (vsec, data) in self.dir_sectors() {
            let data = match data {
                Some(d) => d,
                None => {
                    errors.push(Error::MissingSector(
                        self.fmt.system_track,
                        self.fmt.system_side,
                        vsec,
                    ));
                    continue;
                }
            };
            for slot in data.chunks_exact(DIR_ENTRY_SIZE) {
                idx += 1;
                match slot[0] {
                    DIR_END => break 'scan,
                    DIR_FREE => continue,
                    _ => {
                        let entry = DirectoryEntry::from_slice(idx, slot);
                        if !entry.is_well_formed() {
                            errors.push(Error::MalformedDirectoryEntry(idx));
                        }
                        trace!(
                            "entry {}: attr {:02X} start {:02X}",
                            idx, entry.attr, entry.start_cluster
                        );
                        entries.push(entry);
                    }
                }
            }
        }
        (entries, errors)
    }

    /// Reconcile the FAT triplicate into one table by per-slot majority
    /// vote.  Three-way ties fall back to the first copy.  Every slot where
    /// the copies differ records a `FatDisagreement`.
    pub fn reconcile_fat(&self) -> (Vec<u8>, Vec<Error>) {
        let mut errors = Vec::new();
        let copies: Vec<Option<Vec<u8>>> = self
            .fmt
            .fat_sectors()
            .iter()
            .map(|vsec| {
                let data = self.read_virtual_sector(
                    self.fmt.system_track,
                    self.fmt.system_side,
                    *vsec,
                );
                if data.is_none() {
                    errors.push(Error::MissingSector(
                        self.fmt.system_track,
                        self.fmt.system_side,
                        *vsec,
                    ));
                }
                data
            })
            .collect();
        let mut fat = vec![FAT_FREE; 256];
        for slot in 0..self.fmt.total_clusters() {
            let vals: Vec<u8> = copies
                .iter()
                .filter_map(|c| c.as_ref())
                .filter_map(|c| c.get(slot).copied())
                .collect();
            if vals.is_empty() {
                continue;
            }
            if vals.iter().all(|v| *v == vals[0]) {
                fat[slot] = vals[0];
                continue;
            }
            // majority wins, else copy 1
            fat[slot] = *vals
                .iter()
                .find(|v| vals.iter().filter(|w| w == v).count() >= 2)
                .unwrap_or(&vals[0]);
            errors.push(Error::FatDisagreement(slot));
        }
        (fat, errors)
    }

    /// Classify a FAT value as seen from a chain: `Ok` carries a usable
    /// cluster number.
    fn check_link(&self, link: u8) -> Result<u8, Error> {
        match link {
            FAT_BAD | FAT_FREE => Err(Error::ChainCorrupt(link)),
            l if l > FAT_NEXT_TOP => Err(Error::ChainOutOfRange(link)),
            l if l < RESERVED_CLUSTERS => Err(Error::ChainOutOfRange(link)),
            l if (l as usize) >= self.fmt.total_clusters() => Err(Error::ChainOutOfRange(link)),
            l => Ok(l),
        }
    }

    /// Follow next-pointers from `start` until a terminal value.  Cycle
    /// detection runs over a bitmap of the cluster space, so each step is
    /// O(1).
    pub fn walk_chain(&self, start: u8, fat: &[u8]) -> ChainWalk {
        let mut clusters = Vec::new();
        let mut visited = BitVec::from_elem(256, false);
        let mut cur = start;
        loop {
            match self.check_link(cur) {
                Ok(c) => {
                    if visited.get(c as usize).unwrap_or(false) {
                        return ChainWalk { clusters, terminal: None, error: Some(Error::ChainCycle(c)) };
                    }
                    visited.set(c as usize, true);
                    clusters.push(c);
                }
                Err(e) => return ChainWalk { clusters, terminal: None, error: Some(e) },
            }
            let next = fat[cur as usize];
            if (FAT_TERMINAL_BASE..=FAT_TERMINAL_TOP).contains(&next) {
                return ChainWalk { clusters, terminal: Some(next), error: None };
            }
            cur = next;
        }
    }

    /// Map a cluster number to its track, side, and first logical sector.
    fn cluster_location(&self, cluster: u8) -> (usize, usize, usize) {
        let c = cluster as usize;
        let cpt = self.fmt.clusters_per_track;
        let sides = self.fmt.sides;
        let span = self.fmt.sectors / cpt;
        match self.fmt.side_is_cluster_lsb {
            true => (c / sides / cpt, c % sides, 1 + (c / sides % cpt) * span),
            false => (c / cpt / sides, (c / cpt) % sides, 1 + (c % cpt) * span),
        }
    }

    /// Materialize one directory entry into a file body.
    pub fn read_file(&self, entry: &DirectoryEntry, fat: &[u8]) -> ExtractedFile {
        let walk = self.walk_chain(entry.start_cluster, fat);
        let mut errors: Vec<Error> = walk.error.iter().cloned().collect();
        let spc = self.fmt.sectors_per_cluster();
        let mut body = Vec::new();
        for (i, cluster) in walk.clusters.iter().enumerate() {
            let final_cluster = i + 1 == walk.clusters.len();
            let nsec = match (final_cluster, walk.terminal) {
                (true, Some(term)) => (term & 7) as usize + 1,
                _ => spc,
            };
            let (track, side, first) = self.cluster_location(*cluster);
            for s in 0..nsec {
                let vsec = first + s;
                match self.read_virtual_sector(track, side, vsec) {
                    Some(data) => body.extend(data),
                    None => {
                        errors.push(Error::MissingSector(track, side, vsec));
                        body.extend(vec![0; self.fmt.sector_size]);
                    }
                }
            }
        }
        let mut chain = walk.clusters.clone();
        if let Some(term) = walk.terminal {
            chain.push(term);
        }
        debug!(
            "entry {} start {:02X}: {} clusters, {} bytes{}",
            entry.idx,
            entry.start_cluster,
            walk.clusters.len(),
            body.len(),
            match walk.error.is_some() {
                true => ", truncated",
                false => "",
            }
        );
        ExtractedFile {
            kind: entry.kind(),
            flags: entry.flags(),
            entry: entry.clone(),
            chain,
            body,
            truncated: walk.error.is_some(),
            errors,
        }
    }

    /// Decode the whole disk: directory scan, FAT reconciliation, then one
    /// file per entry in on-disk order.
    pub fn extract_all(&self) -> Catalog {
        let (entries, mut errors) = self.directory();
        let (fat, mut fat_errors) = self.reconcile_fat();
        errors.append(&mut fat_errors);
        let files = entries
            .iter()
            .map(|entry| self.read_file(entry, &fat))
            .collect();
        Catalog { files, errors }
    }
}
