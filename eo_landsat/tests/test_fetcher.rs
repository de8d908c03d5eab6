/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{fs, io::Write, path::Path};

use eo_landsat::fetcher::{extract_archive, find_band_file, archive_path, scene_dir, download_label};
use eo_landsat::errors::LandsatError;

// run with "cargo test --test test_fetcher -- --nocapture"

const DISPLAY_ID: &str = "LC08_L2SP_044034_20230720_20230802_02_T1";

fn write_scene_archive (path: &Path, files: &[(&str,&[u8])]) {
    let file = fs::File::create( path).unwrap();
    let mut builder = tar::Builder::new( file);
    for (name,content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size( content.len() as u64);
        header.set_mode( 0o644);
        header.set_cksum();
        builder.append_data( &mut header, name, *content).unwrap();
    }
    builder.finish().unwrap();
}

#[test]
fn test_scene_paths () {
    let dir = Path::new("LandsatDownloader");
    assert_eq!( archive_path( dir, DISPLAY_ID), dir.join( format!("{DISPLAY_ID}.tar")));
    assert_eq!( scene_dir( dir, DISPLAY_ID), dir.join( DISPLAY_ID));
    assert_eq!( download_label( DISPLAY_ID), format!("download_{DISPLAY_ID}"));
}

#[test]
fn test_extract_archive () {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive_path( dir.path(), DISPLAY_ID);
    let b10 = format!("{DISPLAY_ID}_ST_B10.TIF");
    let mtl = format!("{DISPLAY_ID}_MTL.txt");
    write_scene_archive( &archive, &[ (b10.as_str(), b"not really a tiff"), (mtl.as_str(), b"GROUP = LANDSAT_METADATA_FILE") ]);

    let sdir = scene_dir( dir.path(), DISPLAY_ID);
    let n = extract_archive( &archive, &sdir).unwrap();
    assert_eq!( n, 2);
    assert_eq!( fs::read_to_string( sdir.join( &mtl)).unwrap(), "GROUP = LANDSAT_METADATA_FILE");

    let band = find_band_file( &sdir, "ST_B10").unwrap();
    assert_eq!( band, sdir.join( &b10));

    match find_band_file( &sdir, "ST_QA") {
        Err(LandsatError::BandNotFound(_)) => {}
        other => panic!("expected band not found, got {other:?}")
    }
}

#[test]
fn test_extract_nested_band () {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("nested.tar");
    write_scene_archive( &archive, &[ ("scene/bands/x_st_b10.tif", b"lowercase band") ]);

    let sdir = dir.path().join("nested");
    extract_archive( &archive, &sdir).unwrap();
    let band = find_band_file( &sdir, "ST_B10").unwrap();
    assert!( band.ends_with("scene/bands/x_st_b10.tif"));
}

#[test]
fn test_corrupt_archive () {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("corrupt.tar");
    let mut file = fs::File::create( &archive).unwrap();
    file.write_all( &[0x42u8; 1024]).unwrap();
    drop(file);

    match extract_archive( &archive, dir.path().join("corrupt")) {
        Err(LandsatError::ExtractError(msg)) => println!("extract error: {msg}"),
        other => panic!("expected extract error, got {other:?}")
    }
}

#[test]
fn test_missing_archive () {
    let dir = tempfile::tempdir().unwrap();
    match extract_archive( dir.path().join("missing.tar"), dir.path().join("missing")) {
        Err(LandsatError::ExtractError(_)) => {}
        other => panic!("expected extract error, got {other:?}")
    }
}
