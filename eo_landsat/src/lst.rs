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

//! land surface temperature (LST) from thermal band digital numbers. Values are scaled into Kelvin with
//! the calibration of the product collection and then converted into degrees Celsius

use std::path::Path;
use ndarray::Array2;
use tracing::info;

use eo_common::{MinMaxAvg, fs::check_existing_file};
use eo_gdal::{GdalDataType, raster::{Raster, read_raster_path, write_raster}};
use crate::config::LstCalibration;
use crate::errors::{Result, LandsatError};

pub const KELVIN_OFFSET: f64 = 273.15;

/// temperature in degrees Celsius for a digital number
#[inline]
pub fn celsius (cal: &LstCalibration, dn: f64)->f64 {
    dn * cal.scale + cal.offset - KELVIN_OFFSET
}

/// per pixel LST. Nodata (and NaN) input becomes NaN output
pub fn lst_array (dn: &Array2<f64>, no_data: Option<f64>, cal: &LstCalibration)->Array2<f32> {
    dn.mapv( |v| {
        if v.is_nan() || no_data.map( |nd| nd == v).unwrap_or(false) {
            f32::NAN
        } else {
            celsius( cal, v) as f32
        }
    })
}

#[derive(Debug,Clone)]
pub struct LstSummary {
    pub width: usize,
    pub height: usize,
    /// statistics over valid pixels, in degrees Celsius
    pub stats: MinMaxAvg,
}

pub fn lst_stats (lst: &Array2<f32>)->MinMaxAvg {
    let mut stats = MinMaxAvg::new();
    lst.iter().filter( |v| !v.is_nan()).for_each( |v| stats.add( *v as f64));
    stats
}

/// read band 1 of input, convert into a Float32 LST raster with NaN nodata and write it LZW compressed
/// to output. The georeference of the input is preserved
pub fn derive_lst (input: impl AsRef<Path>, output: impl AsRef<Path>, cal: &LstCalibration)->Result<LstSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    // check before handing the path to GDAL so that we get a clear error
    check_existing_file( input).map_err( |_| LandsatError::MissingInput( format!("{input:?}")))?;

    let dn: Raster<f64> = read_raster_path( input, 1)?;
    let data = lst_array( &dn.data, dn.meta.no_data, cal);
    let stats = lst_stats( &data);

    let meta = dn.meta.with_data_type( GdalDataType::Float32, Some(f64::NAN));
    let lst = Raster::new( meta, data)?;
    write_raster( output, &lst)?;

    if stats.is_empty() {
        info!("derived LST {:?} has no valid pixels", output);
    } else {
        info!("derived LST {:?}: min {:.2}°C, max {:.2}°C, mean {:.2}°C", output, stats.min, stats.max, stats.avg);
    }

    Ok( LstSummary { width: lst.width(), height: lst.height(), stats })
}
