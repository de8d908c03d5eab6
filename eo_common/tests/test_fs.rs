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

use std::{fs, path::Path};
use regex::Regex;
use eo_common::fs::{matching_files_in_dir, files_with_extension, find_file_matching, ensure_writable_dir, check_existing_file, is_non_empty_file};

// run with "cargo test --test test_fs -- --nocapture"

#[test]
fn test_matching_files() {
    let re = Regex::new( r".*\.rs").unwrap();
    let dir = Path::new("src");
    let res = matching_files_in_dir( &dir, &re);

    assert!(res.is_ok());

    if let Ok(files) = res {
        assert!( !files.is_empty());
        for f in files {
            println!("{f:?}");
        }
    } else {
        panic!("no matching files in src/ ?")
    }
}

#[test]
fn test_files_with_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write( dir.path().join("a.ris"), "a").unwrap();
    fs::write( dir.path().join("b.ris.bak"), "b").unwrap();
    fs::create_dir( dir.path().join("sub.ris")).unwrap(); // dirs are not included

    let files = files_with_extension( &dir.path(), "ris").unwrap();
    assert_eq!( files.len(), 1);
    assert!( files[0].ends_with("a.ris"));
}

#[test]
fn test_find_nested_file() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("LC08_L2SP_044034_20230615_20230622_02_T1");
    ensure_writable_dir( &sub).unwrap();
    fs::write( sub.join("LC08_L2SP_044034_20230615_20230622_02_T1_ST_B10.TIF"), "x").unwrap();
    fs::write( sub.join("LC08_L2SP_044034_20230615_20230622_02_T1_SR_B4.TIF"), "x").unwrap();

    let re = Regex::new( r"_ST_B10\.TIF$").unwrap();
    let found = find_file_matching( &dir.path(), &re).unwrap();
    assert!( found.is_some());
    println!("found: {:?}", found);
    assert!( found.unwrap().to_str().unwrap().ends_with("_ST_B10.TIF"));

    let re = Regex::new( r"_QA_PIXEL\.TIF$").unwrap();
    assert!( find_file_matching( &dir.path(), &re).unwrap().is_none());
}

#[test]
fn test_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.tar");
    fs::write( &empty, "").unwrap();

    assert!( check_existing_file( &empty).is_ok());
    assert!( !is_non_empty_file( &empty));
    assert!( check_existing_file( dir.path().join("missing.tif")).is_err());
    assert!( check_existing_file( dir.path()).is_err());
}
