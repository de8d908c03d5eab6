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

//! merging of text based citation files (RIS) into a single file

use std::{fs::{self,File}, io::{self,BufWriter,Write}, path::{Path,PathBuf}};
use tracing::{debug,info};

use crate::fs::files_with_extension;

pub const RIS_EXT: &str = "ris";

/// merge all files of `dir` that end with ".{ext}" into `output`, in directory listing order.
/// Each file content is trimmed and followed by a blank line. The output file itself is never an input,
/// even if it resides in `dir` and has the same extension. No input files produce an empty output file.
/// Returns the number of merged files
pub fn merge_text_files (dir: impl AsRef<Path>, ext: &str, output: impl AsRef<Path>) -> io::Result<usize> {
    let dir = dir.as_ref();
    let output = output.as_ref();

    let out_canonical = fs::canonicalize(output).ok();
    let inputs: Vec<PathBuf> = files_with_extension( &dir, ext)?.into_iter()
        .filter( |p| out_canonical.is_none() || fs::canonicalize(p).ok() != out_canonical)
        .collect();

    // read everything before we (re)create the output
    let mut contents: Vec<String> = Vec::with_capacity( inputs.len());
    for path in &inputs {
        debug!("reading {:?}", path);
        contents.push( fs::read_to_string(path)?);
    }

    let mut w = BufWriter::new( File::create(output)?);
    for content in &contents {
        w.write_all( merged_block(content).as_bytes())?;
    }
    w.flush()?;

    info!("merged {} .{} files from {:?} into {:?}", inputs.len(), ext, dir, output);
    Ok( inputs.len())
}

pub fn merge_ris_files (dir: impl AsRef<Path>, output: impl AsRef<Path>) -> io::Result<usize> {
    merge_text_files( dir, RIS_EXT, output)
}

/// the block a single input contributes to the merged output
pub fn merged_block (content: &str)->String {
    format!("{}\n\n", content.trim())
}
