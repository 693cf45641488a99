// tests of the FAT8 decoder over synthetic disks
mod builder;

use builder::{dir_entry, dir_sector, fat_sector, DiskBuilder};
use fat8kit::fs::fat8::obfuscate::Scheme;
use fat8kit::fs::fat8::types::{Error, FileKind};
use fat8kit::fs::fat8::{naming, Disk};

const SEC: usize = 256;

/// body pattern with a nonzero, non-EOF final byte
fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 7 + 31) & 0xff) as u8).collect()
}

fn first_disk(bytes: &[u8]) -> Disk {
    fat8kit::create_disk_from_bytestream(bytes).expect("could not interpret test image")
}

/// PC-8000 1D disk with one file chained from the given FAT slots.
fn one_file_disk(attr: u8, start: u8, fat_slots: &[(usize, u8)], body: &[u8]) -> DiskBuilder {
    let mut bld = DiskBuilder::pc80_1d();
    bld.set(18, 0, 1, dir_sector(&[dir_entry(b"HELLO ", b"BAS", attr, start)], SEC));
    let fat = fat_sector(fat_slots, SEC);
    for r in [14, 15, 16] {
        bld.set(18, 0, r, fat.clone());
    }
    for (i, chunk) in body.chunks(SEC).enumerate() {
        let mut data = chunk.to_vec();
        data.resize(SEC, 0);
        // lay the body into track 1 (cluster 2 on this geometry)
        bld.set(1, 0, 1 + i as u8, data);
    }
    bld
}

#[test]
fn single_small_file() {
    // one 256 byte BASIC file, start cluster 2, terminal 0xC0
    let body = pattern(SEC);
    let bld = one_file_disk(0x80, 2, &[(2, 0xc0)], &body);
    let disk = first_disk(&bld.build());
    assert_eq!(disk.fmt().name, "PC-8000/PC-8800 5.25\" 1D");
    let catalog = disk.extract_all();
    assert_eq!(catalog.error_count(), 0);
    assert_eq!(catalog.files.len(), 1);
    let file = &catalog.files[0];
    assert_eq!(file.kind, FileKind::Basic);
    assert!(!file.flags.obfuscated && !file.flags.read_only);
    assert!(!file.truncated);
    assert_eq!(file.chain, vec![2, 0xc0]);
    assert_eq!(file.body, body);
    let name = naming::host_name(
        &file.entry.name,
        &file.entry.ext,
        file.kind,
        file.flags,
        disk.fmt().charset(),
    );
    assert_eq!(name, "HELLO.BAS");
}

#[test]
fn terminal_sector_counts() {
    // terminal low bits + 1 sectors of the final cluster belong to the file
    for (term, sectors) in [(0xc0u8, 1usize), (0xc1, 2), (0xc3, 4), (0xc7, 8)] {
        let body = pattern(sectors * SEC);
        let bld = one_file_disk(0x00, 2, &[(2, term)], &body);
        let catalog = first_disk(&bld.build()).extract_all();
        assert_eq!(catalog.files[0].body, body, "terminal {:02X}", term);
    }
}

#[test]
fn multi_cluster_chain() {
    // clusters 2 -> 4 with one sector of the final cluster
    let body = pattern(9 * SEC);
    let mut bld = one_file_disk(0x00, 2, &[(2, 0x04), (4, 0xc0)], &[]);
    // cluster 2 covers track 1 sectors 1-8, cluster 4 covers track 2 sector 1
    for (i, chunk) in body.chunks(SEC).take(8).enumerate() {
        bld.set(1, 0, 1 + i as u8, chunk.to_vec());
    }
    bld.set(2, 0, 1, body[8 * SEC..].to_vec());
    let catalog = first_disk(&bld.build()).extract_all();
    assert_eq!(catalog.error_count(), 0);
    let file = &catalog.files[0];
    assert_eq!(file.chain, vec![2, 4, 0xc0]);
    assert_eq!(file.body, body);
}

#[test]
fn directory_sentinels() {
    // a free slot is skipped, the end sentinel stops the scan even though
    // a later sector holds another entry
    let mut bld = DiskBuilder::pc80_1d();
    let mut sector1 = vec![0xffu8; 16];
    sector1.extend(dir_entry(b"KEEP  ", b"TXT", 0x00, 2));
    sector1.resize(SEC, 0x00);
    bld.set(18, 0, 1, sector1);
    bld.set(18, 0, 2, dir_sector(&[dir_entry(b"LOST  ", b"TXT", 0x03, 3)], SEC));
    let fat = fat_sector(&[(2, 0xc0), (3, 0xc0)], SEC);
    for r in [14, 15, 16] {
        bld.set(18, 0, r, fat.clone());
    }
    let (entries, errors) = first_disk(&bld.build()).directory();
    assert!(errors.is_empty());
    assert_eq!(entries.len(), 1);
    assert_eq!(&entries[0].name, b"KEEP  ");
    assert_eq!(entries[0].idx, 2);
}

#[test]
fn fat_majority_vote() {
    // copies read (05, 05, 09) at slot 7: majority wins, disagreement logged
    let body = pattern(SEC);
    let mut bld = one_file_disk(0x80, 2, &[(2, 0xc0), (7, 0x05)], &body);
    bld.set(18, 0, 16, fat_sector(&[(2, 0xc0), (7, 0x09)], SEC));
    let disk = first_disk(&bld.build());
    let (fat, errors) = disk.reconcile_fat();
    assert_eq!(fat[7], 0x05);
    assert_eq!(errors, vec![Error::FatDisagreement(7)]);
    let catalog = disk.extract_all();
    assert_eq!(catalog.error_count(), 1);
    // the file itself is unaffected
    assert_eq!(catalog.files[0].body, body);
}

#[test]
fn fat_three_way_tie_prefers_first_copy() {
    let body = pattern(SEC);
    let mut bld = one_file_disk(0x80, 2, &[(2, 0xc0), (7, 0x05)], &body);
    bld.set(18, 0, 15, fat_sector(&[(2, 0xc0), (7, 0x09)], SEC));
    bld.set(18, 0, 16, fat_sector(&[(2, 0xc0), (7, 0x0b)], SEC));
    let (fat, errors) = first_disk(&bld.build()).reconcile_fat();
    assert_eq!(fat[7], 0x05);
    assert_eq!(errors, vec![Error::FatDisagreement(7)]);
}

#[test]
fn chain_cycle_detected() {
    let body = pattern(16 * SEC);
    let bld = one_file_disk(0x00, 2, &[(2, 0x03), (3, 0x02)], &body);
    let catalog = first_disk(&bld.build()).extract_all();
    let file = &catalog.files[0];
    assert!(file.truncated);
    assert_eq!(file.errors, vec![Error::ChainCycle(2)]);
    // both clusters were materialized in full before the walk stopped
    assert_eq!(file.body.len(), 2 * 8 * SEC);
}

#[test]
fn chain_out_of_range() {
    let bld = one_file_disk(0x00, 2, &[(2, 0x90)], &pattern(SEC));
    let catalog = first_disk(&bld.build()).extract_all();
    assert_eq!(catalog.files[0].errors, vec![Error::ChainOutOfRange(0x90)]);
    assert!(catalog.files[0].truncated);
}

#[test]
fn chain_into_free_or_bad_cluster() {
    for bad in [0xffu8, 0xfe] {
        let bld = one_file_disk(0x00, 2, &[(2, bad)], &pattern(SEC));
        let catalog = first_disk(&bld.build()).extract_all();
        assert_eq!(catalog.files[0].errors, vec![Error::ChainCorrupt(bad)]);
    }
}

#[test]
fn chain_head_in_reserved_clusters() {
    let bld = one_file_disk(0x00, 1, &[(1, 0xc0)], &pattern(SEC));
    let catalog = first_disk(&bld.build()).extract_all();
    let file = &catalog.files[0];
    assert_eq!(file.errors, vec![Error::ChainOutOfRange(1)]);
    assert!(file.body.is_empty());
}

#[test]
fn missing_sector_zero_fills() {
    let body = pattern(3 * SEC);
    let mut bld = one_file_disk(0x00, 2, &[(2, 0xc2)], &body);
    bld.omit(1, 0, 2);
    let catalog = first_disk(&bld.build()).extract_all();
    assert_eq!(catalog.error_count(), 1);
    let file = &catalog.files[0];
    assert_eq!(file.errors, vec![Error::MissingSector(1, 0, 2)]);
    assert_eq!(file.body.len(), 3 * SEC);
    assert_eq!(&file.body[0..SEC], &body[0..SEC]);
    assert_eq!(&file.body[SEC..2 * SEC], &vec![0u8; SEC][..]);
    assert_eq!(&file.body[2 * SEC..], &body[2 * SEC..]);
}

#[test]
fn trailing_eof_marker_is_preserved() {
    // body length comes from the chain terminator alone, a trailing
    // 0x1A-and-NULs tail is file data like any other
    let mut data = pattern(SEC);
    data[100] = 0x1a;
    for byt in data.iter_mut().skip(101) {
        *byt = 0;
    }
    let bld = one_file_disk(0x00, 2, &[(2, 0xc0)], &data);
    let catalog = first_disk(&bld.build()).extract_all();
    assert_eq!(catalog.files[0].body, data);
}

#[test]
fn pc88_protected_save() {
    // obfuscated BASIC save, plaintext starts with the BASIC save magic
    let mut plain = pattern(2 * SEC);
    plain[0] = 0xff;
    let cipher = Scheme::Pc88.obfuscate(&plain);
    let bld = one_file_disk(0xa0, 2, &[(2, 0xc1)], &cipher);
    let disk = first_disk(&bld.build());
    assert_eq!(disk.fmt().family.obfuscation(), Some(Scheme::Pc88));
    let catalog = disk.extract_all();
    let file = &catalog.files[0];
    assert_eq!(file.kind, FileKind::Basic);
    assert!(file.flags.obfuscated);
    assert_eq!(file.body, cipher);
    let deobf = Scheme::Pc88.deobfuscate(&file.body);
    assert_eq!(deobf, plain);
    assert_eq!(deobf[0], 0xff);
    // both artifacts get names, the deobfuscated one loses the obf suffix
    let mut pool = naming::NamePool::new();
    let obf_name = pool.claim(&naming::host_name(
        &file.entry.name, &file.entry.ext, file.kind, file.flags, disk.fmt().charset(),
    ));
    let deobf_name = pool.claim(&naming::host_name(
        &file.entry.name, &file.entry.ext, file.kind, file.flags.without_obfuscated(), disk.fmt().charset(),
    ));
    assert_eq!(obf_name, "HELLO.BAS.obf");
    assert_eq!(deobf_name, "HELLO.BAS");
}

#[test]
fn pc98_protected_save() {
    // binary file on a 2DD disk, one bit rotation per byte
    let plain = pattern(2 * SEC);
    let cipher = Scheme::Pc98.obfuscate(&plain);
    let mut bld = DiskBuilder::pc98_2dd();
    bld.set(40, 0, 1, dir_sector(&[dir_entry(b"DATA  ", b"DAT", 0x21, 2)], SEC));
    let fat = fat_sector(&[(2, 0xc1)], SEC);
    for r in [14, 15, 16] {
        bld.set(40, 0, r, fat.clone());
    }
    bld.set(1, 0, 1, cipher[0..SEC].to_vec());
    bld.set(1, 0, 2, cipher[SEC..].to_vec());
    let disk = first_disk(&bld.build());
    assert_eq!(disk.fmt().name, "PC-9800 3.5\" 2DD/5.25\" 2DD");
    assert_eq!(disk.fmt().family.obfuscation(), Some(Scheme::Pc98));
    let catalog = disk.extract_all();
    assert_eq!(catalog.error_count(), 0);
    let file = &catalog.files[0];
    assert_eq!(file.kind, FileKind::Binary);
    assert!(file.flags.obfuscated);
    assert_eq!(Scheme::Pc98.deobfuscate(&file.body), plain);
    // .DAT is not in the binary allow-list so .bin is appended before the suffixes
    let name = naming::host_name(
        &file.entry.name, &file.entry.ext, file.kind, file.flags, disk.fmt().charset(),
    );
    assert_eq!(name, "DATA.DAT.bin.obf");
}

#[test]
fn detection_prefers_boot_hints() {
    // the same 35 track geometry is PC-6001 when the boot loader says SYS
    let mut bld = DiskBuilder::pc80_1d();
    let mut boot = vec![0u8; SEC];
    boot[0..3].copy_from_slice(b"SYS");
    bld.set(0, 0, 1, boot);
    let disk = first_disk(&bld.build());
    assert_eq!(disk.fmt().name, "PC-6001 mkII 5.25\" 1D");
    assert_eq!(disk.fmt().charset().to_string(), "pc6001-8bit");
    assert_eq!(disk.fmt().family.obfuscation(), None);
}

#[test]
fn detection_pasopia_side_lsb() {
    let mut bld = DiskBuilder::new("TESTDISK", 0x00, 256, 16);
    for cyl in 0..40 {
        bld.track_full(cyl, 0);
        bld.track_full(cyl, 1);
    }
    // an all-zero boot sector is the Pasopia tell on this geometry
    let disk = first_disk(&bld.build());
    assert_eq!(disk.fmt().name, "Pasopia 5.25\" 2D (wild type)");
    assert!(disk.fmt().side_is_cluster_lsb);
}

#[test]
fn detection_unknown_geometry() {
    let mut bld = DiskBuilder::new("TESTDISK", 0x00, 256, 16);
    for cyl in 0..30 {
        bld.track_full(cyl, 0);
    }
    let bytes = bld.build();
    match fat8kit::create_disk_from_bytestream(&bytes) {
        Ok(_) => panic!("30 track disk should not match any format"),
        Err(e) => assert_eq!(e.to_string(), "no known format fingerprint matched"),
    }
}
