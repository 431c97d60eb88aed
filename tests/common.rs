#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

/// The binary, isolated from the real home directory through `SITESHEET_HOME`.
pub fn sheet(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("sitesheet");
    cmd.env("SITESHEET_HOME", home).env_remove("SITESHEET_LOG");
    cmd
}

/// Fresh, empty scratch directory inside the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("sitesheet_{}_{}", name, std::process::id()));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

pub fn path_str(p: &PathBuf) -> String {
    p.to_string_lossy().to_string()
}

/// Three entries over two days; entry `t1` has two slips, the second missing
/// from blob storage.
pub const SNAPSHOT: &str = r#"{
  "entries": [
    {"id": "t1", "work_date": "2025-09-03", "employee_name": "Shawn", "job_type": "Residential",
     "job_description": "Driveway base at 14 Elm", "total_hours": 8.0, "notes": "Wet morning"},
    {"id": "t2", "work_date": "2025-09-03", "employee_name": "Dave", "job_type": "Commercial",
     "job_description": "Sidewalk forms", "total_hours": 7.5},
    {"id": "t3", "work_date": "2025-09-04", "employee_name": "Shawn", "job_type": "Residential",
     "job_description": "Septic bed", "total_hours": 9.0}
  ],
  "equipment": [
    {"entry_id": "t1", "equipment": "Excavator 320", "attachment": "Bucket", "hours": 6.0},
    {"entry_id": "t1", "equipment": "Dump Truck", "trucking_hours": 3.5},
    {"entry_id": "t3", "equipment": "Excavator 320", "hours": 4.0}
  ],
  "materials": [
    {"entry_id": "t1", "material_name": "Clear Stone", "loads": 4.0},
    {"entry_id": "t3", "material_name": "Sand", "loads": 2.0}
  ],
  "photos": [
    {"entry_id": "t1", "path": "slips/t1-a.png", "filename": "ticket-a.png"},
    {"entry_id": "t1", "path": "slips/t1-missing.jpg", "filename": "ticket-b.jpg"}
  ]
}"#;

/// Small PNG produced with the same codec the engine decodes with.
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 6, image::Rgb([200, 40, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Write the snapshot and the one existing slip; returns (snapshot, blob root).
pub fn snapshot_fixture(dir: &PathBuf) -> (String, String) {
    let snapshot = dir.join("snapshot.json");
    fs::write(&snapshot, SNAPSHOT).expect("write snapshot");

    let blobs = dir.join("blobs");
    fs::create_dir_all(blobs.join("slips")).expect("create blob dir");
    fs::write(blobs.join("slips/t1-a.png"), tiny_png()).expect("write slip");

    (path_str(&snapshot), path_str(&blobs))
}
