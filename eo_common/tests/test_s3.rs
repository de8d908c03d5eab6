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
#![cfg(feature = "s3")]
#![allow(unused)]

use std::{fs, io};
use eo_common::s3::{S3Error, remove_partial_download};

// run with "cargo test --features s3 --test test_s3 -- --nocapture"

#[test]
fn test_remove_partial_download () {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chm_tile.tif");

    fs::write( &path, b"partial").unwrap();
    let res = remove_partial_download( &path, Err( S3Error::IOError( io::Error::new( io::ErrorKind::UnexpectedEof, "stream closed"))));
    println!("{res:?}");
    assert!( matches!( res, Err(S3Error::IOError(_))));
    assert!( !path.exists());

    // completed downloads are kept
    fs::write( &path, b"complete").unwrap();
    let res = remove_partial_download( &path, Ok(8));
    assert_eq!( res.unwrap(), 8);
    assert!( path.is_file());

    // nothing to remove if the file was never created
    let missing = dir.path().join("missing.tif");
    let res = remove_partial_download( &missing, Err( S3Error::IOError( io::Error::new( io::ErrorKind::PermissionDenied, "denied"))));
    assert!( res.is_err());
}
