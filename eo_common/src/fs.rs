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

use std::fs::{self,DirEntry,File};
use std::io::{self,ErrorKind};
use io::ErrorKind::*;
use regex::Regex;
use std::path::{Path,PathBuf};

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|s| s.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|s| s.to_str())
}

/// create dir (and all its parents) if it does not exist yet, fail if it exists but is read-only
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn is_non_empty_file <P: AsRef<Path>> (path: P) -> bool {
    fs::metadata(path).map( |md| md.is_file() && md.len() > 0).unwrap_or(false)
}

/// check that path refers to an existing regular file. This does not open the file
pub fn check_existing_file <P: AsRef<Path>> (path: P) -> Result<()> {
    let path = path.as_ref();
    if path.is_file() {
        Ok(())
    } else {
        Err(io_error!(NotFound, "file not found: {:?}", path))
    }
}

/// get regular files of dir whose name ends with ".{ext}" (case sensitive).
/// The result is in `read_dir` order, i.e. we do not sort
pub fn files_with_extension<P: AsRef<Path>> (dir: &P, ext: &str) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    if !dir.is_dir() {
        return Err(io_error!(NotFound, "not a directory: {:?}", dir))
    }

    let suffix = format!(".{ext}");
    let mut list: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if let Some(fname) = entry.file_name().to_str() {
                if fname.ends_with( suffix.as_str()) {
                    list.push(path)
                }
            }
        }
    }

    Ok(list)
}

pub fn matching_files_in_dir<P: AsRef<Path>> (dir: &P, fname_regex: &Regex) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    let mut list: Vec<PathBuf> = Vec::new();

    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            if let Ok(entry) = entry {
                if let Some(fname) = entry.file_name().to_str() {
                    if fname_regex.is_match( fname) {
                        list.push(entry.path())
                    }
                }
            }
        }
    }

    Ok(list)
}

/// recursively search dir for the first file whose name matches the provided regex
pub fn find_file_matching<P: AsRef<Path>> (dir: &P, fname_regex: &Regex) -> Result<Option<PathBuf>> {
    let dir: &Path = dir.as_ref();
    if !dir.is_dir() { return Ok(None) }

    let mut subdirs: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if let Some(fname) = entry.file_name().to_str() {
            if fname_regex.is_match(fname) { return Ok(Some(path)) }
        }
    }

    for sub in &subdirs {
        if let Some(path) = find_file_matching( sub, fname_regex)? { return Ok(Some(path)) }
    }
    Ok(None)
}
