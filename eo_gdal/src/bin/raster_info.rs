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

use eo_common::{define_cli, check_cli};
use eo_gdal::{Dataset, Metadata, get_raster_info, dataset_srs, srs_epsg_4326, transform_bounds_2d};

define_cli! { ARGS [about="raster_info - show size, georeference and meta information of a GDAL raster"] =
    meta: bool    [help="also show metadata items of dataset and bands", short, long],
    path: PathBuf [help="path to GDAL dataset"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    let ds = Dataset::open(&ARGS.path)?;

    let (cols,rows) = ds.raster_size();
    println!("raster size: {} x {}, {} band(s)", cols, rows, ds.raster_count());

    if let Ok(info) = get_raster_info( &ds) {
        println!("pixel size:  {} x {}", info.dx, info.dy);
        let bounds = info.bounds();
        println!("bounds:      [{}, {}, {}, {}]", bounds.west, bounds.south, bounds.east, bounds.north);

        if let Ok(srs) = dataset_srs( &ds) {
            println!("srs:         {}", if srs.is_geographic() { "geographic" } else if srs.is_projected() { "projected" } else { "other" });
            if let Ok(geo) = transform_bounds_2d( &srs, &srs_epsg_4326()?, &bounds, None) {
                println!("lon/lat:     [{:.5}, {:.5}, {:.5}, {:.5}]", geo.west, geo.south, geo.east, geo.north);
            }
        } else {
            println!("srs:         none");
        }
    }

    if ARGS.meta { show_meta( &ds, 0)?; }

    for band_id in 1..=ds.raster_count() {
        let band = ds.rasterband( band_id)?;
        println!("--- band {}: {:?}, nodata: {:?}", band_id, band.band_type(), band.no_data_value());
        if ARGS.meta { show_meta( &band, 4)?; }
    }

    Ok(())
}

fn show_meta<M> (meta: &M, level: usize)->Result<()> where M: Metadata {
    let indent = " ".repeat(level);

    if let Ok(descr) = meta.description() { 
        if !descr.is_empty() { println!("{}description: {}", indent, descr); }
    }

    for domain in meta.metadata_domains() {
        if let Some(items) = meta.metadata_domain( &domain) {
            if !items.is_empty() {
                println!("{}domain: {}", indent, domain);
                for item in &items {
                    println!("{}    {}", indent, item);
                }
            }
        }
    }

    Ok(())
}
