// tests of the D88 container reader
mod builder;

use builder::DiskBuilder;
use fat8kit::img::d88::{self, DiskIter};
use fat8kit::img::MediaKind;

#[test]
fn index_single_disk() {
    let bytes = DiskBuilder::pc80_1d().build();
    let disks: Vec<_> = DiskIter::new(&bytes).collect();
    assert_eq!(disks.len(), 1);
    let (num, result) = &disks[0];
    assert_eq!(*num, 1);
    let disk = result.as_ref().expect("disk should parse");
    assert_eq!(disk.name, "TESTDISK");
    assert_eq!(disk.media, Some(MediaKind::F2D));
    assert!(!disk.write_protected);
    assert_eq!(disk.declared_size, bytes.len());
    assert_eq!(disk.cylinders(), 35);
    assert_eq!(disk.heads(), 1);
    assert_eq!(disk.total_sectors(), 35 * 16);
    assert_eq!(disk.max_sector_id(), 16);
    let sec = disk.get(18, 0, 14).expect("system track sector");
    assert_eq!(sec.data.len(), 256);
    assert_eq!(sec.sectors_in_track, 16);
}

#[test]
fn write_protect_flag() {
    let mut bld = DiskBuilder::pc80_1d();
    bld.write_protect = true;
    let bytes = bld.build();
    let (_, result) = DiskIter::new(&bytes).next().expect("one disk");
    assert!(result.expect("disk should parse").write_protected);
}

#[test]
fn concatenated_disks() {
    let mut bytes = DiskBuilder::pc80_1d().build();
    let mut second = DiskBuilder::pc80_1d();
    second.name = "SECOND";
    bytes.extend(second.build());
    let disks: Vec<_> = DiskIter::new(&bytes).collect();
    assert_eq!(disks.len(), 2);
    assert_eq!(disks[0].0, 1);
    assert_eq!(disks[1].0, 2);
    assert_eq!(disks[1].1.as_ref().expect("disk should parse").name, "SECOND");
}

#[test]
fn zero_size_terminates() {
    let mut bytes = DiskBuilder::pc80_1d().build();
    // a zeroed header after the first disk means no further disks
    bytes.extend(vec![0u8; d88::HEADER_SIZE]);
    let disks: Vec<_> = DiskIter::new(&bytes).collect();
    assert_eq!(disks.len(), 1);
    assert!(disks[0].1.is_ok());
}

#[test]
fn truncated_stream() {
    let bytes = DiskBuilder::pc80_1d().build();
    let cut = &bytes[0..bytes.len() - 10];
    let disks: Vec<_> = DiskIter::new(cut).collect();
    assert_eq!(disks.len(), 1);
    let err = disks[0].1.as_ref().expect_err("should be truncated");
    assert_eq!(err.to_string(), "stream ended before the declared image size");
}

#[test]
fn track_offset_outside_image() {
    let mut bytes = DiskBuilder::pc80_1d().build();
    let bogus = (bytes.len() as u32 + 100).to_le_bytes();
    bytes[32..36].copy_from_slice(&bogus);
    let (_, result) = DiskIter::new(&bytes).next().expect("one disk");
    let err = result.expect_err("offset outside image must fail");
    assert_eq!(err.to_string(), "not a well formed container");
}

#[test]
fn malformed_sector_is_clamped() {
    let mut bld = DiskBuilder::pc80_1d();
    // declared 256 byte sector, only 100 bytes recorded
    bld.set_raw(5, 0, 3, 1, vec![0xaa; 100]);
    let (_, result) = DiskIter::new(&bld.build()).next().expect("one disk");
    let disk = result.expect("disk should parse");
    assert_eq!(disk.malformed_sectors, 1);
    let sec = disk.get(5, 0, 3).expect("sector present");
    assert!(sec.malformed);
    assert_eq!(sec.declared_size(), 256);
    assert_eq!(sec.data.len(), 256);
    assert_eq!(&sec.data[0..100], &vec![0xaa; 100][..]);
    assert_eq!(&sec.data[100..], &vec![0u8; 156][..]);
}

#[test]
fn duplicate_sector_keeps_first() {
    let mut bld = DiskBuilder::pc80_1d();
    bld.set(3, 0, 7, vec![0x11; 256]);
    // keep the record count at the declared sixteen
    bld.omit(3, 0, 16);
    bld.push_record(3, 0, 7, vec![0x22; 256]);
    let (_, result) = DiskIter::new(&bld.build()).next().expect("one disk");
    let disk = result.expect("disk should parse");
    assert_eq!(disk.get(3, 0, 7).expect("sector").data[0], 0x11);
}
