use clap;
use crate::STDRESULT;

/// Write the detected format and geometry of the first disk as JSON.
pub fn stat(cmd: &clap::ArgMatches) -> STDRESULT {
    let buf = match cmd.get_one::<String>("dimg") {
        Some(path) => crate::read_stream(path)?,
        None => crate::read_stream("-")?,
    };
    let disk = crate::create_disk_from_bytestream(&buf)?;
    let img = disk.img();
    let fmt = disk.fmt();
    let mut obj = json::JsonValue::new_object();
    obj["image_type"] = "d88".into();
    obj["disk_name"] = img.name.clone().into();
    obj["write_protected"] = img.write_protected.into();
    obj["media_kind"] = match img.media {
        Some(kind) => kind.to_string().into(),
        None => json::JsonValue::Null,
    };
    obj["format_name"] = fmt.name.into();
    obj["machine_charset"] = fmt.charset().to_string().into();
    obj["obfuscation"] = match fmt.family.obfuscation() {
        Some(scheme) => scheme.to_string().into(),
        None => json::JsonValue::Null,
    };
    let mut geo = json::JsonValue::new_object();
    geo["tracks"] = fmt.tracks.into();
    geo["fat_tracks"] = fmt.fat_tracks.into();
    geo["sides"] = fmt.sides.into();
    geo["sectors_per_track"] = fmt.sectors.into();
    geo["sector_size"] = fmt.sector_size.into();
    geo["logical_sectors_per_physical"] = (1usize << fmt.sector_shift).into();
    geo["clusters_per_track"] = fmt.clusters_per_track.into();
    geo["sectors_per_cluster"] = fmt.sectors_per_cluster().into();
    geo["bytes_per_cluster"] = fmt.bytes_per_cluster().into();
    geo["total_clusters"] = fmt.total_clusters().into();
    geo["system_track"] = fmt.system_track.into();
    geo["system_side"] = fmt.system_side.into();
    geo["side_is_cluster_lsb"] = fmt.side_is_cluster_lsb.into();
    geo["directory_sectors"] = fmt.dir_sectors().collect::<Vec<usize>>().into();
    geo["id_sector"] = fmt.id_sector().into();
    geo["fat_sectors"] = fmt.fat_sectors().to_vec().into();
    obj["geometry"] = geo;
    let s = match cmd.get_one::<u16>("indent") {
        Some(spaces) => json::stringify_pretty(obj, *spaces),
        None => json::stringify(obj),
    };
    println!("{}", s);
    return Ok(());
}
