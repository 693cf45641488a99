//! ## Extraction driver
//!
//! For each disk of each container: detect the variant, decode the file
//! system, classify and optionally deobfuscate every file, choose host
//! names, and write the artifacts into a sibling output directory.  A
//! report mirroring stdout is saved inside the directory as
//! `_fat8_d88_output.txt`.
//!
//! Structural errors never abort a disk, let alone the run; they are
//! counted and surfaced through the directory suffix.  Only I/O and
//! argument errors reach the exit code.

use clap;
use log::error;
use std::path::Path;

use crate::chars::MINIMAL_CONTROLS;
use crate::fs::fat8;
use crate::fs::fat8::naming::{self, NamePool};
use crate::fs::fat8::types::ExtractedFile;
use crate::img::{d88, DiskImage};
use crate::STDRESULT;

const RCH: &str = "unreachable was reached";
const REPORT_NAME: &str = "_fat8_d88_output.txt";

pub fn extract(cmd: &clap::ArgMatches) -> STDRESULT {
    let out_parent = cmd.get_one::<String>("out");
    for path in cmd.get_many::<String>("dimg").expect(RCH) {
        let buf = crate::read_stream(path)?;
        let parent = match out_parent {
            Some(dir) => Path::new(dir).to_path_buf(),
            None => match Path::new(path).parent() {
                Some(dir) if dir != Path::new("") => dir.to_path_buf(),
                _ => Path::new(".").to_path_buf(),
            },
        };
        let stem = match (path.as_str(), Path::new(path).file_stem()) {
            ("-", _) | (_, None) => "stdin".to_string(),
            (_, Some(stem)) => stem.to_string_lossy().to_string(),
        };
        let disks: Vec<(usize, Result<DiskImage, crate::img::Error>)> =
            d88::DiskIter::new(&buf).collect();
        let multi = disks.len() > 1;
        for (disk_num, result) in disks {
            extract_disk(&stem, &parent, disk_num, multi, result)?;
        }
    }
    Ok(())
}

/// Assemble the whole report and artifact set for one disk, then write the
/// output directory.  The directory name carries the disk number for
/// multi-disk containers and the structural error count when it is nonzero.
fn extract_disk(
    stem: &str,
    parent: &Path,
    disk_num: usize,
    multi: bool,
    result: Result<DiskImage, crate::img::Error>,
) -> STDRESULT {
    let disk_suffix = match multi {
        true => format!(" [Disk {:02}]", disk_num),
        false => String::new(),
    };
    let mut report: Vec<String> = Vec::new();
    report.push(format!(
        "fat8kit {} run {}",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    let image = match result {
        Ok(image) => image,
        Err(e) => {
            error!("disk {}: {}", disk_num, e);
            report.push(format!("\n== Disk Information{} ==", disk_suffix));
            report.push(format!("Container error: {}", e));
            return write_outputs(stem, parent, &disk_suffix, 1, report, Vec::new());
        }
    };
    log_disk_information(&image, &disk_suffix, &mut report);
    log_track_table(&image, &mut report);

    let malformed = image.malformed_sectors;
    let disk = match fat8::Disk::from_img(image) {
        Ok(disk) => disk,
        Err(e) => {
            error!("disk {}: {}", disk_num, e);
            report.push("\n== Diagnostic Information ==".to_string());
            report.push(format!("Format error: {}", e));
            return write_outputs(stem, parent, &disk_suffix, malformed + 1, report, Vec::new());
        }
    };
    log_diagnostics(&disk, &mut report);

    let catalog = disk.extract_all();
    if !catalog.errors.is_empty() {
        report.push("\n== Structural Errors ==".to_string());
        for e in &catalog.errors {
            report.push(format!("{}", e));
        }
    }

    // host names are chosen in directory order so collisions resolve
    // deterministically
    let charset = disk.fmt().charset();
    let scheme = disk.fmt().family.obfuscation();
    let mut pool = NamePool::new();
    let mut artifacts: Vec<(String, Vec<u8>, String)> = Vec::new();
    report.push("\n== Directory Entries ==".to_string());
    for file in &catalog.files {
        let deobfuscating = file.flags.obfuscated && scheme.is_some();
        let host_name = pool.claim(&naming::host_name(
            &file.entry.name,
            &file.entry.ext,
            file.kind,
            file.flags,
            charset,
        ));
        let deobf_name = match deobfuscating {
            true => Some(pool.claim(&naming::host_name(
                &file.entry.name,
                &file.entry.ext,
                file.kind,
                file.flags.without_obfuscated(),
                charset,
            ))),
            false => None,
        };
        log_entry(file, &host_name, deobf_name.as_deref(), charset, &mut report);
        artifacts.push((
            host_name,
            file.body.clone(),
            charset.decode(&file.body, MINIMAL_CONTROLS),
        ));
        if let (Some(name), Some(scheme)) = (deobf_name, scheme) {
            let plain = scheme.deobfuscate(&file.body);
            let dump = charset.decode(&plain, MINIMAL_CONTROLS);
            artifacts.push((name, plain, dump));
        }
    }

    system_track_artifacts(&disk, &mut artifacts);
    let error_count = malformed + catalog.error_count();
    write_outputs(stem, parent, &disk_suffix, error_count, report, artifacts)
}

fn log_disk_information(image: &DiskImage, disk_suffix: &str, report: &mut Vec<String>) {
    report.push(format!("\n== Disk Information{} ==", disk_suffix));
    report.push(format!("Disk name/comment: {}", image.name));
    report.push(format!(
        "Disk attributes: {}",
        match image.write_protected {
            true => "DiskWriteProtected",
            false => "None",
        }
    ));
    report.push(format!("Disk size: {}", image.declared_size));
    report.push(format!(
        "Media kind: {}",
        match image.media {
            Some(kind) => kind.to_string(),
            None => format!("unknown (0x{:02X})", image.media_byte),
        }
    ));
}

fn log_track_table(image: &DiskImage, report: &mut Vec<String>) {
    report.push("\n== Track/Sector Table ==".to_string());
    for cyl in 0..image.cylinders() {
        for head in 0..image.heads() {
            let sectors = image.track(cyl as u8, head as u8);
            if sectors.is_empty() {
                continue;
            }
            report.push(format!(
                "Track {:3}, Side {}: {}",
                cyl,
                head,
                sectors
                    .iter()
                    .map(|s| format!("{:2}:{}", s.sector_id, s.data.len()))
                    .collect::<Vec<String>>()
                    .join(", ")
            ));
        }
    }
}

fn log_diagnostics(disk: &fat8::Disk, report: &mut Vec<String>) {
    let fmt = disk.fmt();
    let img = disk.img();
    report.push("\n== Diagnostic Information ==".to_string());
    report.push(format!("Detected format name: {}", fmt.name));
    report.push(format!("8-bit character set: {}", fmt.charset()));
    report.push(format!(
        "BASIC obfuscation method: {}",
        match fmt.family.obfuscation() {
            Some(scheme) => scheme.to_string(),
            None => "None; unable to deobfuscate".to_string(),
        }
    ));
    report.push(format!("Recorded total sectors: {}", img.total_sectors()));
    report.push(format!("Recorded payload bytes: {}", img.payload_bytes()));
    report.push(format!("Highest sector index: {}", img.max_sector_id()));
    report.push(format!("Largest recorded sector: {}", img.largest_sector()));
    report.push(format!("Track count: {}", fmt.tracks));
    report.push(format!("FAT track count: {}", fmt.fat_tracks));
    report.push(format!("Side count: {}", fmt.sides));
    report.push(format!("Sectors per track: {}", fmt.sectors));
    report.push(format!("Sector size: {}", fmt.sector_size));
    report.push(format!(
        "Logical sectors per D88 sector: {}",
        1usize << fmt.sector_shift
    ));
    report.push(format!("Sectors per cluster: {}", fmt.sectors_per_cluster()));
    report.push(format!("Bytes per cluster: {}", fmt.bytes_per_cluster()));
    report.push(format!("Clusters per track: {}", fmt.clusters_per_track));
    report.push(format!("Total clusters: {}", fmt.total_clusters()));
    report.push(format!(
        "Is side number the cluster LSB, Pasopia-style: {}",
        fmt.side_is_cluster_lsb
    ));
    report.push(format!("System track: {}", fmt.system_track));
    report.push(format!("System side: {}", fmt.system_side));
    report.push(format!(
        "Directory sector indices: {}",
        fmt.dir_sectors()
            .map(|idx| idx.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    ));
    report.push(format!("ID/autorun sector index: {}", fmt.id_sector()));
    report.push(format!(
        "FAT sector indices: {}",
        fmt.fat_sectors()
            .iter()
            .map(|idx| idx.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    ));
}

fn log_entry(
    file: &ExtractedFile,
    host_name: &str,
    deobf_name: Option<&str>,
    charset: crate::chars::CharSet,
    report: &mut Vec<String>,
) {
    let name = charset.decode(&file.entry.name, crate::chars::NO_CONTROLS);
    let ext = charset.decode(&file.entry.ext, crate::chars::NO_CONTROLS);
    let names = match deobf_name {
        Some(deobf) => format!("{}, {}", quote(host_name), quote(deobf)),
        None => quote(host_name),
    };
    report.push(format!(
        "{:3}. {}.{} {:40} {:8} {} {:9} ATTRS={} START={:02X} CHAIN={}",
        file.entry.idx,
        name,
        ext,
        names,
        file.body.len(),
        file.kind,
        match file.truncated {
            true => "TRUNCATED",
            false => "OK",
        },
        file.flags,
        file.entry.start_cluster,
        file.chain
            .iter()
            .map(|c| format!("{:02X}", c))
            .collect::<Vec<String>>()
            .join("\u{2192}")
    ));
    for e in &file.errors {
        report.push(format!("     {}", e));
    }
}

/// Quote a name for the report when it carries spaces or anything exotic.
fn quote(name: &str) -> String {
    match name.chars().any(|ch| ch <= ' ' || ch as u32 >= 0x7f) {
        true => format!("\"{}\"", name),
        false => name.to_string(),
    }
}

/// Raw system-track artifacts: boot sector, directory sectors, ID sector,
/// and the FAT copies, each with a UTF-8 dump companion.
fn system_track_artifacts(disk: &fat8::Disk, artifacts: &mut Vec<(String, Vec<u8>, String)>) {
    let charset = disk.fmt().charset();
    if let Some(boot) = disk.boot_sector() {
        let dump = charset.decode(&boot, MINIMAL_CONTROLS);
        artifacts.push(("_boot_sector.dat".to_string(), boot, dump));
    }
    for (vsec, data) in disk.dir_sectors() {
        if let Some(data) = data {
            if data.iter().all(|byt| *byt == 0xff) {
                // unused directory sectors are not worth a file
                continue;
            }
            let dump = charset.decode(&data, MINIMAL_CONTROLS);
            artifacts.push((format!("_dir_sector_{}.dat", vsec), data, dump));
        }
    }
    if let Some(data) = disk.id_sector() {
        let dump = charset.decode(&data, MINIMAL_CONTROLS);
        artifacts.push(("_AutoRun.dat".to_string(), data, dump));
    }
    for (vsec, data) in disk.fat_sectors() {
        if let Some(data) = data {
            let dump = charset.decode(&data, MINIMAL_CONTROLS);
            artifacts.push((format!("_fat_sector_{}.dat", vsec), data, dump));
        }
    }
}

/// Create the output directory, print and save the report, and write every
/// artifact with its UTF-8 dump companion.
fn write_outputs(
    stem: &str,
    parent: &Path,
    disk_suffix: &str,
    error_count: usize,
    report: Vec<String>,
    artifacts: Vec<(String, Vec<u8>, String)>,
) -> STDRESULT {
    let error_suffix = match error_count {
        0 => String::new(),
        n => format!(" [Error Count {:02}]", n),
    };
    let dir_name = format!("{} [FAT8 Contents]{}{}", stem, disk_suffix, error_suffix);
    let outdir = super::unique_dir(parent, &dir_name);
    for line in &report {
        println!("{}", line);
    }
    println!("\n== Extracting ==");
    println!("mkdir {}", outdir.display());
    std::fs::create_dir_all(&outdir)?;
    std::fs::write(outdir.join(REPORT_NAME), report.join("\n") + "\n")?;
    for (name, data, dump) in artifacts {
        let data_path = outdir.join(&name);
        println!("writing {}", data_path.display());
        std::fs::write(&data_path, data)?;
        let dump_path = outdir.join(naming::utf8_dump_name(&name));
        println!("writing {}", dump_path.display());
        std::fs::write(&dump_path, dump)?;
    }
    println!("\nDone.{}", disk_suffix);
    Ok(())
}
