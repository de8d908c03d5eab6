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

pub mod errors;
pub mod raster;
pub mod clip;

use gdal::raster::RasterCreationOptions;
use lazy_static::lazy_static;
use std::{collections::HashMap, path::Path};

// we re-export these so that other crates don't need a direct gdal dependency
pub use gdal::{self, Driver, DriverManager, Metadata, Dataset, errors::GdalError, GeoTransform, GeoTransformEx, cpl::CslStringList};
pub use gdal::raster::{GdalType,GdalDataType,RasterBand,Buffer};
pub use gdal::spatial_ref::{CoordTransform, CoordTransformOptions, SpatialRef};

use eo_common::{BoundingBox, fs::extension};
use crate::errors::{Result, misc_error, EoGdalError};

lazy_static! {
    // we only support raster formats GDAL can create from scratch
    static ref EXT_MAP: HashMap<&'static str, &'static str> = HashMap::from( [ // file extension -> driver short name
        ("tif", "GTiff"),
        ("tiff", "GTiff"),
        ("nc", "netCDF"),
        ("img", "HFA"),
    ]);
}

pub fn get_driver_name_for_extension (ext: &str) -> Option<&'static str> {
    EXT_MAP.get( ext.to_lowercase().as_str()).map(|v| &**v)
}

/// driver for the file extension of path, GTiff if the extension is unknown
pub fn get_driver_for_path (path: impl AsRef<Path>) -> Result<Driver> {
    let path = path.as_ref();
    let name = extension(&path).and_then( get_driver_name_for_extension).unwrap_or("GTiff");
    Ok( DriverManager::get_driver_by_name( name)? )
}

/// lossless compression for created rasters
pub fn lzw_create_opts ()->Result<RasterCreationOptions> {
    let mut co = RasterCreationOptions::new();
    co.add_string("COMPRESS=LZW")?;
    Ok(co)
}

pub fn new_geotransform (x_upper_left: f64, x_resolution: f64, row_rotation: f64,
                         y_upper_left: f64, col_rotation: f64, y_resolution: f64) -> GeoTransform {
    [x_upper_left,x_resolution,row_rotation,y_upper_left,col_rotation,y_resolution]
}

/// geotransform of a sub-window that starts at the given pixel offsets
pub fn shifted_geotransform (gt: &GeoTransform, col_off: usize, row_off: usize) -> GeoTransform {
    let (x,y) = gt.apply( col_off as f64, row_off as f64);
    [x, gt[1], gt[2], y, gt[4], gt[5]]
}

/* #region SpatialRef based coordinate transformations ************************************************************/

pub fn srs_epsg_4326 () -> Result<SpatialRef> { Ok( SpatialRef::from_epsg(4326)? ) }

/// the SpatialRef of a dataset. Fails for datasets without projection
pub fn dataset_srs (ds: &Dataset) -> Result<SpatialRef> {
    let wkt = ds.projection();
    if wkt.is_empty() {
        Err( misc_error("dataset has no spatial reference system"))
    } else {
        Ok( SpatialRef::from_wkt( &wkt)? )
    }
}

/// exact transformation (no ballpark fallback) between two SpatialRefs
pub fn exact_transform (s_srs: &SpatialRef, t_srs: &SpatialRef) -> Result<CoordTransform> {
    let mut ct_options = CoordTransformOptions::new()?;
    ct_options.desired_accuracy( 0.0);
    ct_options.set_ballpark_allowed(false);
    Ok( CoordTransform::new_with_options(s_srs, t_srs, &ct_options)? )
}

pub fn transform_point_2d (transform: &CoordTransform, x: f64, y: f64) -> Result<(f64,f64)> {
    let mut ax: [f64;1] = [x];
    let mut ay: [f64;1] = [y];
    let mut az: [f64;0] = [];

    transform.transform_coords(&mut ax, &mut ay, &mut az)?;
    Ok((ax[0],ay[0]))
}

/// transform geographic (lon,lat degrees) points into the provided target SRS.
/// EPSG:4326 has lat,lon axis order so we have to swap for the source, and for the target if it is geographic
pub fn transform_lon_lat_points (t_srs: &SpatialRef, pts: &[(f64,f64)]) -> Result<Vec<(f64,f64)>> {
    let s_srs = srs_epsg_4326()?;
    let transform = exact_transform( &s_srs, t_srs)?;
    let t_is_geo = t_srs.is_geographic();

    let mut list = Vec::with_capacity( pts.len());
    for (lon,lat) in pts {
        let (x,y) = transform_point_2d( &transform, *lat, *lon)?;
        list.push( if t_is_geo { (y,x) } else { (x,y) });
    }
    Ok(list)
}

/// transform a bounding box between SRSs, densifying the edges.
/// Watch out - if source or target are geographic we have to swap axis order
pub fn transform_bounds_2d (s_srs: &SpatialRef, t_srs: &SpatialRef, bbox: &BoundingBox<f64>, opt_densify_pts: Option<i32>) -> Result<BoundingBox<f64>> {
    let s_is_geo = s_srs.is_geographic();
    let t_is_geo = t_srs.is_geographic();

    let bounds: [f64;4] = if s_is_geo { [bbox.south,bbox.west,bbox.north,bbox.east] } else { bbox.to_minmax_array() };
    let densify_pts: i32 = opt_densify_pts.unwrap_or(21); // default recommended by GDAL OCTTransformBounds doc

    let transform = exact_transform( s_srs, t_srs)?;
    let a = transform.transform_bounds(&bounds, densify_pts)?;

    if t_is_geo {
        Ok( BoundingBox::new( a[1], a[0], a[3], a[2]) )
    } else {
        Ok( BoundingBox::new( a[0], a[1], a[2], a[3]) )
    }
}

/* #endregion SpatialRef based coordinate transformations */

pub fn create_dataset<P> (driver: &Driver, path: P, width: usize, height: usize, n_bands: usize, data_type: GdalDataType, co: &RasterCreationOptions)->Result<Dataset> 
    where P: AsRef<Path>
{
    use GdalDataType::*;
    match data_type {
        UInt8   => Ok( driver.create_with_band_type_with_options::<u8,P>(path, width, height, n_bands, co)? ),
        UInt16  => Ok( driver.create_with_band_type_with_options::<u16,P>(path, width, height, n_bands, co)? ),
        UInt32  => Ok( driver.create_with_band_type_with_options::<u32,P>(path, width, height, n_bands, co)? ),
        Int8    => Ok( driver.create_with_band_type_with_options::<i8,P>(path, width, height, n_bands, co)? ),
        Int16   => Ok( driver.create_with_band_type_with_options::<i16,P>(path, width, height, n_bands, co)? ),
        Int32   => Ok( driver.create_with_band_type_with_options::<i32,P>(path, width, height, n_bands, co)? ),
        Float32 => Ok( driver.create_with_band_type_with_options::<f32,P>(path, width, height, n_bands, co)? ),
        Float64 => Ok( driver.create_with_band_type_with_options::<f64,P>(path, width, height, n_bands, co)? ),
        other => Err( EoGdalError::UnsupportedDataType( format!("{other:?}")))
    }
}

#[derive(Debug)]
pub struct RasterInfo {
    pub cols: usize,
    pub left: f64,
    pub right: f64,
    pub dx: f64,

    pub rows: usize,
    pub top: f64,
    pub bottom: f64,
    pub dy: f64
}

impl RasterInfo {
    /// extent in dataset SRS coordinates (assuming a north-up raster)
    pub fn bounds (&self)->BoundingBox<f64> {
        BoundingBox::new( self.left.min(self.right), self.bottom.min(self.top), self.left.max(self.right), self.bottom.max(self.top))
    }
}

pub fn get_raster_info (ds: &Dataset)->Result<RasterInfo> {
    let (cols,rows) = ds.raster_size();
    let a = ds.geo_transform()?;

    let left = a[0];
    let dx = a[1];
    let right = left + (dx * cols as f64); 

    let top = a[3];
    let dy = a[5];
    let bottom = top + (dy * rows as f64);

    Ok( RasterInfo { cols, left, right, dx, rows, top, bottom, dy } )
}
