//! ## Support for D88 disk containers
//!
//! The D88 format wraps one or more floppies in a single stream.  Each disk
//! starts with a 688-byte header: a 17-byte name, reserved bytes, the write
//! protect flag, the media kind, the total image size, and a 164-entry table
//! of track start offsets (0 = track absent).  Each track is a run of sector
//! records, a 16-byte CHRN header followed by the payload.
//!
//! Disks are concatenated back to back; the size field of each header is the
//! distance to the next one.  A zero size field or end of stream terminates
//! the sequence.

use log::{debug, trace, warn};
use crate::img;
use crate::img::{DiskImage, Sector};

pub const HEADER_SIZE: usize = 688;
pub const NAME_SIZE: usize = 17;
pub const WRITE_PROTECT_OFFSET: usize = 26;
pub const MEDIA_OFFSET: usize = 27;
pub const SIZE_OFFSET: usize = 28;
pub const TRACK_TABLE_OFFSET: usize = 32;
pub const TRACK_SLOTS: usize = 164;
pub const SECTOR_HEADER_SIZE: usize = 16;

const WRITE_PROTECT_FLAG: u8 = 0x10;

pub fn file_extensions() -> Vec<String> {
    vec!["d88".to_string(), "d77".to_string()]
}

/// Walks a concatenated D88 stream, yielding `(disk number, disk)` pairs,
/// disk numbers from 1.  A structural failure ends the walk after yielding
/// the error, since the next header cannot be located reliably.
pub struct DiskIter<'a> {
    buf: &'a [u8],
    cursor: usize,
    disk_num: usize,
}

impl<'a> DiskIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, cursor: 0, disk_num: 0 }
    }
}

impl<'a> Iterator for DiskIter<'a> {
    type Item = (usize, Result<DiskImage, img::Error>);
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.buf.len() {
            return None;
        }
        self.disk_num += 1;
        if self.buf.len() - self.cursor < HEADER_SIZE {
            self.cursor = self.buf.len();
            return Some((self.disk_num, Err(img::Error::TruncatedStream)));
        }
        let base = self.cursor;
        let size = u32::from_le_bytes(
            self.buf[base + SIZE_OFFSET..base + SIZE_OFFSET + 4]
                .try_into()
                .expect("slice length"),
        ) as usize;
        if size == 0 {
            return None;
        }
        if size <= TRACK_TABLE_OFFSET {
            self.cursor = self.buf.len();
            return Some((self.disk_num, Err(img::Error::MalformedContainer)));
        }
        if base + size > self.buf.len() {
            self.cursor = self.buf.len();
            return Some((self.disk_num, Err(img::Error::TruncatedStream)));
        }
        let slice = &self.buf[base..base + size];
        self.cursor = base + size;
        Some((self.disk_num, parse_disk(slice)))
    }
}

/// Parse one disk given exactly the bytes the size field declares.
pub fn parse_disk(buf: &[u8]) -> Result<DiskImage, img::Error> {
    if buf.len() < HEADER_SIZE {
        return Err(img::Error::TruncatedStream);
    }
    let name_bytes: Vec<u8> = buf[0..NAME_SIZE]
        .iter()
        .take_while(|b| **b != 0)
        .cloned()
        .collect();
    let name = String::from_utf8_lossy(&name_bytes).to_string();
    let write_protected = buf[WRITE_PROTECT_OFFSET] & WRITE_PROTECT_FLAG != 0;
    let media_byte = buf[MEDIA_OFFSET];
    let size = buf.len();
    let mut disk = DiskImage::new(name, write_protected, media_byte, size);
    debug!(
        "disk `{}` media {:02X} write protect {} size {}",
        disk.name, media_byte, write_protected, size
    );

    let mut offsets: Vec<usize> = Vec::new();
    for slot in 0..TRACK_SLOTS {
        let i = TRACK_TABLE_OFFSET + slot * 4;
        let offset = u32::from_le_bytes(buf[i..i + 4].try_into().expect("slice length")) as usize;
        if offset == 0 || offset == size {
            // absent track
            continue;
        }
        if offset < HEADER_SIZE || offset + SECTOR_HEADER_SIZE > size {
            warn!("track slot {} offset {} lies outside the image", slot, offset);
            return Err(img::Error::MalformedContainer);
        }
        offsets.push(offset);
    }
    offsets.sort_unstable();

    let mut consumed_end = HEADER_SIZE;
    for (i, track_offset) in offsets.iter().enumerate() {
        let region_end = match offsets.get(i + 1) {
            Some(next) => *next,
            None => size,
        };
        consumed_end = parse_track(buf, *track_offset, region_end, &mut disk)?;
    }
    if consumed_end != size {
        warn!(
            "consumed {} bytes but the header declares {}",
            consumed_end, size
        );
        return Err(img::Error::MalformedContainer);
    }
    Ok(disk)
}

/// Parse the run of sector records in `[track_offset, region_end)`,
/// returning the offset just past the last record.
fn parse_track(
    buf: &[u8],
    track_offset: usize,
    region_end: usize,
    disk: &mut DiskImage,
) -> Result<usize, img::Error> {
    let mut cursor = track_offset;
    let mut expected: Option<u16> = None;
    let mut count: u16 = 0;
    while cursor + SECTOR_HEADER_SIZE <= region_end {
        if let Some(n) = expected {
            if count >= n {
                break;
            }
        }
        let hdr = &buf[cursor..cursor + SECTOR_HEADER_SIZE];
        let sectors_in_track = u16::from_le_bytes([hdr[4], hdr[5]]);
        let data_len = u16::from_le_bytes([hdr[14], hdr[15]]) as usize;
        if cursor + SECTOR_HEADER_SIZE + data_len > region_end {
            warn!(
                "sector data at {} spills past the track region end {}",
                cursor, region_end
            );
            return Err(img::Error::MalformedContainer);
        }
        let payload = &buf[cursor + SECTOR_HEADER_SIZE..cursor + SECTOR_HEADER_SIZE + data_len];
        let declared = 128usize << (hdr[3] & 7) as usize;
        let malformed = data_len != declared;
        let data = match malformed {
            false => payload.to_vec(),
            true => {
                warn!(
                    "cyl {} head {} sector {}: recorded length {} vs declared {}",
                    hdr[0], hdr[1], hdr[2], data_len, declared
                );
                let mut clamped = vec![0; declared];
                let n = usize::min(declared, data_len);
                clamped[0..n].copy_from_slice(&payload[0..n]);
                clamped
            }
        };
        trace!(
            "cyl {} head {} sector {} size code {} length {}",
            hdr[0], hdr[1], hdr[2], hdr[3], data_len
        );
        disk.insert(Sector {
            cylinder: hdr[0],
            head: hdr[1],
            sector_id: hdr[2],
            size_code: hdr[3],
            sectors_in_track,
            density: hdr[6],
            deleted: hdr[7] != 0,
            status: hdr[8],
            malformed,
            data,
        });
        if expected.is_none() && sectors_in_track > 0 {
            expected = Some(sectors_in_track);
        }
        count += 1;
        cursor += SECTOR_HEADER_SIZE + data_len;
    }
    Ok(cursor)
}
