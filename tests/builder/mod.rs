//! In-memory D88 builders for the integration tests.  Everything is built
//! from scratch so the tests carry no binary fixtures.
#![allow(dead_code)]

use std::collections::BTreeMap;

/// One sector record queued for the image: id, size code, payload.
type Record = (u8, u8, Vec<u8>);

pub struct DiskBuilder {
    pub name: &'static str,
    pub media: u8,
    pub write_protect: bool,
    pub sector_size: usize,
    pub sectors_per_track: u16,
    tracks: BTreeMap<(u8, u8), Vec<Record>>,
}

fn size_code(size: usize) -> u8 {
    match size {
        128 => 0,
        256 => 1,
        512 => 2,
        1024 => 3,
        _ => panic!("unsupported sector size"),
    }
}

impl DiskBuilder {
    pub fn new(name: &'static str, media: u8, sector_size: usize, sectors_per_track: u16) -> Self {
        Self {
            name,
            media,
            write_protect: false,
            sector_size,
            sectors_per_track,
            tracks: BTreeMap::new(),
        }
    }
    /// A full single-density PC-8001/8801 5.25" 1D layout, every sector zeroed.
    pub fn pc80_1d() -> Self {
        let mut bld = Self::new("TESTDISK", 0x00, 256, 16);
        for cyl in 0..35 {
            bld.track_full(cyl, 0);
        }
        bld
    }
    /// A full PC-9800 2DD layout, every sector zeroed.
    pub fn pc98_2dd() -> Self {
        let mut bld = Self::new("TESTDISK", 0x10, 256, 16);
        for cyl in 0..80 {
            bld.track_full(cyl, 0);
            bld.track_full(cyl, 1);
        }
        bld
    }
    /// Populate a whole track with zeroed sectors 1..=sectors_per_track.
    pub fn track_full(&mut self, cyl: u8, head: u8) {
        let records = (1..=self.sectors_per_track as u8)
            .map(|r| (r, size_code(self.sector_size), vec![0; self.sector_size]))
            .collect();
        self.tracks.insert((cyl, head), records);
    }
    /// Replace the payload of one sector.
    pub fn set(&mut self, cyl: u8, head: u8, r: u8, data: Vec<u8>) {
        assert_eq!(data.len(), self.sector_size);
        self.set_raw(cyl, head, r, size_code(self.sector_size), data);
    }
    /// Replace one sector with an explicit size code and payload, which is
    /// how a malformed record (declared vs actual length) gets built.
    pub fn set_raw(&mut self, cyl: u8, head: u8, r: u8, code: u8, data: Vec<u8>) {
        let records = self.tracks.entry((cyl, head)).or_insert_with(Vec::new);
        match records.iter_mut().find(|rec| rec.0 == r) {
            Some(rec) => *rec = (r, code, data),
            None => records.push((r, code, data)),
        }
    }
    /// Append a record even when the id is already present, for testing
    /// duplicate-address handling.
    pub fn push_record(&mut self, cyl: u8, head: u8, r: u8, data: Vec<u8>) {
        let code = size_code(self.sector_size);
        self.tracks
            .entry((cyl, head))
            .or_insert_with(Vec::new)
            .push((r, code, data));
    }
    /// Drop one sector record entirely.
    pub fn omit(&mut self, cyl: u8, head: u8, r: u8) {
        if let Some(records) = self.tracks.get_mut(&(cyl, head)) {
            records.retain(|rec| rec.0 != r);
        }
    }
    /// Flatten into D88 bytes: 688-byte header, track offset table, then
    /// the sector records track by track.
    pub fn build(&self) -> Vec<u8> {
        let header_size = 688;
        let mut track_bufs: Vec<((u8, u8), Vec<u8>)> = Vec::new();
        for ((cyl, head), records) in &self.tracks {
            let mut buf = Vec::new();
            for (r, code, data) in records {
                buf.push(*cyl);
                buf.push(*head);
                buf.push(*r);
                buf.push(*code);
                buf.extend(self.sectors_per_track.to_le_bytes());
                buf.push(0); // density
                buf.push(0); // deleted
                buf.push(0); // status
                buf.extend([0; 5]);
                buf.extend((data.len() as u16).to_le_bytes());
                buf.extend(data);
            }
            track_bufs.push(((*cyl, *head), buf));
        }
        let total: usize = header_size + track_bufs.iter().map(|(_, b)| b.len()).sum::<usize>();
        let mut ans = vec![0u8; header_size];
        let name = self.name.as_bytes();
        ans[0..name.len()].copy_from_slice(name);
        ans[26] = match self.write_protect {
            true => 0x10,
            false => 0x00,
        };
        ans[27] = self.media;
        ans[28..32].copy_from_slice(&(total as u32).to_le_bytes());
        let sides = self
            .tracks
            .keys()
            .map(|(_, h)| *h as usize + 1)
            .max()
            .unwrap_or(1);
        let mut offset = header_size;
        for ((cyl, head), buf) in &track_bufs {
            if buf.is_empty() {
                continue;
            }
            let slot = *cyl as usize * sides + *head as usize;
            let i = 32 + slot * 4;
            ans[i..i + 4].copy_from_slice(&(offset as u32).to_le_bytes());
            offset += buf.len();
        }
        for (_, buf) in track_bufs {
            ans.extend(buf);
        }
        ans
    }
}

/// Compose a 16-byte directory entry.
pub fn dir_entry(name: &[u8; 6], ext: &[u8; 3], attr: u8, cluster: u8) -> [u8; 16] {
    let mut ans = [0u8; 16];
    ans[0..6].copy_from_slice(name);
    ans[6..9].copy_from_slice(ext);
    ans[9] = attr;
    ans[10] = cluster;
    ans
}

/// A directory sector: the given entries followed by an end sentinel.
pub fn dir_sector(entries: &[[u8; 16]], size: usize) -> Vec<u8> {
    let mut ans = Vec::new();
    for entry in entries {
        ans.extend(entry);
    }
    ans.resize(size, 0x00);
    ans
}

/// A FAT sector: all clusters free except the listed (slot, value) pairs.
pub fn fat_sector(slots: &[(usize, u8)], size: usize) -> Vec<u8> {
    let mut ans = vec![0xffu8; size];
    for (slot, value) in slots {
        ans[*slot] = *value;
    }
    ans
}
