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

use eo_common::{define_cli, check_cli, init_logging};
use eo_landsat::{LstCalibration, derive_lst};

define_cli! { ARGS [about="derive_lst - compute land surface temperature (°C) from a thermal band"] =
    scale: f64      [help="scale factor of digital numbers", long, default_value="0.00341802"],
    offset: f64     [help="offset in Kelvin", long, default_value="149.0", allow_negative_numbers=true],
    input: PathBuf  [help="thermal band raster (e.g. *_ST_B10.TIF)"],
    output: PathBuf [help="Float32 LST output raster"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let cal = LstCalibration { scale: ARGS.scale, offset: ARGS.offset };
    let summary = derive_lst( &ARGS.input, &ARGS.output, &cal)?;

    println!("{}x{} pixels written to {}", summary.width, summary.height, ARGS.output.display());
    if !summary.stats.is_empty() {
        println!("min {:.2}°C, max {:.2}°C, mean {:.2}°C", summary.stats.min, summary.stats.max, summary.stats.avg);
    }
    Ok(())
}
