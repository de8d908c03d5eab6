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

use std::path::PathBuf;
use anyhow::Result;
use eo_common::{define_cli, check_cli, init_logging, ris::merge_text_files};

define_cli! { ARGS [about="merge citation (RIS) files of a directory into a single file"] =
    ext: String      [help="extension of files to merge", long, default_value="ris"],
    dir: PathBuf     [help="directory with files to merge"],
    output: PathBuf  [help="path of merged output file"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let n = merge_text_files( &ARGS.dir, &ARGS.ext, &ARGS.output)?;
    println!("merged {} files into {}", n, ARGS.output.display());
    Ok(())
}
