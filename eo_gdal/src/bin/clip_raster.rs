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

use eo_common::{define_cli, check_cli, init_logging, BoundingBox};
use eo_gdal::{Dataset, clip::clip_to_bbox};

define_cli! { ARGS [about="clip_raster - crop a raster to a lon/lat bounding box"] =
    west: f64       [help="west longitude in degrees", long, allow_negative_numbers=true],
    south: f64      [help="south latitude in degrees", long, allow_negative_numbers=true],
    east: f64       [help="east longitude in degrees", long, allow_negative_numbers=true],
    north: f64      [help="north latitude in degrees", long, allow_negative_numbers=true],
    input: PathBuf  [help="path of raster to clip"],
    output: PathBuf [help="path of clipped raster"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let bbox = BoundingBox::<f64>::new( ARGS.west, ARGS.south, ARGS.east, ARGS.north);
    let ds = Dataset::open( &ARGS.input)?;
    let res = clip_to_bbox( &ds, &bbox, &ARGS.output)?;

    println!("clipped to {}x{} (offset {},{}), {} samples masked: {}", 
        res.window.width, res.window.height, res.window.col_off, res.window.row_off, res.n_masked, ARGS.output.display());
    Ok(())
}
