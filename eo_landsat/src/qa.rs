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

//! pixel quality of Collection 2 Level 2 scenes. The QA_PIXEL band is a bit field per pixel; we use it
//! to estimate how much of an area of interest is obscured by clouds and their shadows

use std::{fs, path::Path};
use ndarray::Array2;
use tracing::{info,warn};

use eo_common::BoundingBox;
use eo_gdal::{clip::clip_path_to_bbox, raster::{Raster, read_raster_path}};
use crate::fetcher::find_band_file;
use crate::errors::{Result, LandsatError};

pub const QA_BAND: &str = "QA_PIXEL";

pub const FILL_BIT: u16 = 1;
pub const DILATED_CLOUD_BIT: u16 = 1 << 1;
pub const CLOUD_BIT: u16 = 1 << 3;
pub const CLOUD_SHADOW_BIT: u16 = 1 << 4;

/// bits that make a pixel count as cloudy
pub const CLOUD_MASK: u16 = DILATED_CLOUD_BIT | CLOUD_BIT | CLOUD_SHADOW_BIT;

#[inline]
pub fn is_cloudy (qa: u16)->bool {
    qa & CLOUD_MASK != 0
}

#[inline]
pub fn is_fill (qa: u16, no_data: Option<f64>)->bool {
    qa & FILL_BIT != 0 || no_data.map( |nd| nd == qa as f64).unwrap_or(false)
}

/// percentage (0..100) of non-fill pixels that are flagged as cloud, dilated cloud or cloud shadow.
/// None if there are no such pixels
pub fn cloud_pct (qa: &Array2<u16>, no_data: Option<f64>)->Option<f64> {
    let (n, n_cloudy) = qa.iter()
        .filter( |v| !is_fill( **v, no_data))
        .fold( (0usize,0usize), |(n,nc), v| (n + 1, if is_cloudy(*v) { nc + 1 } else { nc }));

    if n > 0 { Some( 100.0 * n_cloudy as f64 / n as f64) } else { None }
}

/// cloud percentage of an extracted scene, within the lon/lat area if given or for the whole scene otherwise.
/// An area without valid quality pixels counts as fully clouded
pub fn aoi_cloud_pct (scene_dir: &Path, aoi: Option<&BoundingBox<f64>>)->Result<f64> {
    let qa_file = find_band_file( scene_dir, QA_BAND)?;

    let qa: Raster<u16> = if let Some(bbox) = aoi {
        let clipped = scene_dir.join( format!("{QA_BAND}_aoi.tif"));
        let res = read_clipped( &qa_file, bbox, &clipped);
        if clipped.is_file() {
            if let Err(e) = fs::remove_file( &clipped) { warn!("failed to remove {:?}: {}", clipped, e) }
        }
        res?
    } else {
        read_raster_path( &qa_file, 1)?
    };

    let pct = cloud_pct( &qa.data, qa.meta.no_data).unwrap_or(100.0);
    info!("cloud cover of {}x{} quality pixels in {:?}: {:.1}%", qa.width(), qa.height(), scene_dir, pct);
    Ok(pct)
}

fn read_clipped (qa_file: &Path, bbox: &BoundingBox<f64>, clipped: &Path)->Result<Raster<u16>> {
    clip_path_to_bbox( qa_file, bbox, clipped)?;
    Ok( read_raster_path( clipped, 1)? )
}

/// error out if the cloud percentage is not below the given limit
pub fn check_cloud_pct (display_id: &str, pct: f64, max_pct: f64)->Result<()> {
    if pct < max_pct {
        Ok(())
    } else {
        Err( LandsatError::TooCloudy( format!("{display_id} has {pct:.1}% cloud cover in area of interest (limit {max_pct}%)")))
    }
}
