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

//! cropping rasters to geographic bounding boxes.
//!
//! The box is given in lon/lat degrees (EPSG:4326) and is transformed into the SRS of the raster as a polygon.
//! The pixel window covering the transformed polygon becomes the extent of the clipped raster, and samples
//! whose pixel center lies outside of the polygon are set to nodata

use std::path::Path;
use geo::{Coord, LineString, Polygon, Intersects, Point, BoundingRect};
use num::{NumCast, Zero};
use tracing::{debug,info};

use eo_common::BoundingBox;
use crate::{Dataset, GdalType, GdalDataType, GeoTransform, GeoTransformEx, RasterBand, Buffer,
    dataset_srs, transform_lon_lat_points, shifted_geotransform, create_dataset, get_driver_for_path, lzw_create_opts};
use crate::errors::{Result, EoGdalError, no_overlap};

/// a pixel rectangle within a raster
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct PixelWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelWindow {
    pub fn size (&self)->(usize,usize) { (self.width, self.height) }
    pub fn offset (&self)->(isize,isize) { (self.col_off as isize, self.row_off as isize) }
}

/// what clipping produced
#[derive(Debug,Clone)]
pub struct ClipInfo {
    pub window: PixelWindow,
    pub geo_transform: GeoTransform,
    /// number of samples per band that were set to nodata because they are outside the clip polygon
    pub n_masked: usize,
}

/// the smallest pixel window that covers all provided points (in SRS coordinates of the raster), clamped to the
/// raster extent. Returns None if the covered area does not intersect the raster
pub fn pixel_window (gt: &GeoTransform, raster_size: (usize,usize), pts: &[(f64,f64)]) -> Result<Option<PixelWindow>> {
    if pts.is_empty() { return Ok(None) }
    let inv = gt.invert()?;
    let (width,height) = raster_size;

    let mut col_min = f64::MAX;
    let mut col_max = f64::MIN;
    let mut row_min = f64::MAX;
    let mut row_max = f64::MIN;

    for (x,y) in pts {
        let (col,row) = inv.apply( *x, *y);
        col_min = col_min.min(col);
        col_max = col_max.max(col);
        row_min = row_min.min(row);
        row_max = row_max.max(row);
    }

    if !(col_min.is_finite() && col_max.is_finite() && row_min.is_finite() && row_max.is_finite()) {
        return Ok(None)
    }

    let c0 = col_min.floor().max(0.0);
    let c1 = col_max.ceil().min( width as f64);
    let r0 = row_min.floor().max(0.0);
    let r1 = row_max.ceil().min( height as f64);

    if c0 >= c1 || r0 >= r1 {
        Ok(None)
    } else {
        Ok( Some( PixelWindow {
            col_off: c0 as usize,
            row_off: r0 as usize,
            width: (c1 - c0) as usize,
            height: (r1 - r0) as usize
        }))
    }
}

/// the clip polygon of a geographic bounding box in the SRS of the dataset
pub fn bbox_polygon (ds: &Dataset, bbox: &BoundingBox<f64>) -> Result<Polygon<f64>> {
    if !bbox.is_valid() {
        return Err( EoGdalError::InvalidBoundingBox( format!("{bbox:?}")))
    }
    let srs = dataset_srs(ds)?;
    let corners = [
        (bbox.west, bbox.south),
        (bbox.east, bbox.south),
        (bbox.east, bbox.north),
        (bbox.west, bbox.north),
    ];
    let pts = transform_lon_lat_points( &srs, &corners)?;
    Ok( Polygon::new( LineString::from( pts), vec![]) )
}

/// mask of samples in the window whose pixel center is inside (or on the boundary of) the polygon. Row major order
pub fn center_mask (gt: &GeoTransform, window: &PixelWindow, polygon: &Polygon<f64>) -> Vec<bool> {
    let mut mask = Vec::with_capacity( window.width * window.height);
    for j in 0..window.height {
        for i in 0..window.width {
            let (x,y) = gt.apply( (window.col_off + i) as f64 + 0.5, (window.row_off + j) as f64 + 0.5);
            mask.push( polygon.intersects( &Point::new(x,y)));
        }
    }
    mask
}

/// clip all bands of the dataset to a geographic bounding box and write the result to `tgt_path` (using the
/// driver for the file extension, with LZW compression). If the box does not overlap the raster no file is written
pub fn clip_to_bbox (ds: &Dataset, bbox: &BoundingBox<f64>, tgt_path: impl AsRef<Path>) -> Result<ClipInfo> {
    let tgt_path = tgt_path.as_ref();
    let gt = ds.geo_transform()?;
    let raster_size = ds.raster_size();

    let polygon = bbox_polygon( ds, bbox)?;
    let pts: Vec<(f64,f64)> = polygon.exterior().points().map(|p| (p.x(), p.y())).collect();

    let window = pixel_window( &gt, raster_size, &pts)?
        .ok_or_else( || no_overlap( format!("{:?} outside of {}x{} raster", bbox, raster_size.0, raster_size.1)))?;
    debug!("clip window {:?}", window);

    let mask = center_mask( &gt, &window, &polygon);
    let n_masked = mask.iter().filter(|m| !**m).count();

    let n_bands = ds.raster_count();
    if n_bands < 1 { return Err( EoGdalError::MiscError("no rasterbands to clip".into())) }
    let band_type = ds.rasterband(1)?.band_type();

    let driver = get_driver_for_path( tgt_path)?;
    let co = lzw_create_opts()?;
    let mut tgt_ds = create_dataset( &driver, tgt_path, window.width, window.height, n_bands, band_type, &co)?;

    let tgt_gt = shifted_geotransform( &gt, window.col_off, window.row_off);
    tgt_ds.set_geo_transform( &tgt_gt)?;
    tgt_ds.set_projection( ds.projection().as_str())?;

    for k in 1..=n_bands {
        let src_band = ds.rasterband(k)?;
        let mut tgt_band = tgt_ds.rasterband(k)?;
        clip_band( &src_band, &mut tgt_band, &window, &mask)?;
    }

    info!("clipped {}x{} raster to {}x{} window at ({},{})", raster_size.0, raster_size.1, window.width, window.height, window.col_off, window.row_off);
    Ok( ClipInfo { window, geo_transform: tgt_gt, n_masked } )
}

pub fn clip_path_to_bbox (src_path: impl AsRef<Path>, bbox: &BoundingBox<f64>, tgt_path: impl AsRef<Path>) -> Result<ClipInfo> {
    let ds = Dataset::open( src_path.as_ref())?;
    clip_to_bbox( &ds, bbox, tgt_path)
}

fn clip_band (src: &RasterBand, tgt: &mut RasterBand, window: &PixelWindow, mask: &[bool]) -> Result<()> {
    use GdalDataType::*;

    match src.band_type() {
        UInt8   => clip_band_type::<u8>( src, tgt, window, mask),
        UInt16  => clip_band_type::<u16>( src, tgt, window, mask),
        UInt32  => clip_band_type::<u32>( src, tgt, window, mask),
        Int8    => clip_band_type::<i8>( src, tgt, window, mask),
        Int16   => clip_band_type::<i16>( src, tgt, window, mask),
        Int32   => clip_band_type::<i32>( src, tgt, window, mask),
        Float32 => clip_band_type::<f32>( src, tgt, window, mask),
        Float64 => clip_band_type::<f64>( src, tgt, window, mask),
        other => Err( EoGdalError::UnsupportedDataType( format!("{other:?}")))
    }
}

/// the value we use for masked samples: the source nodata value, NaN for float bands without nodata, 0 otherwise
pub fn fill_value<T: NumCast + Zero> (no_data: Option<f64>)->T {
    no_data.or( Some(f64::NAN)).and_then( |v| <T as NumCast>::from(v)).unwrap_or( T::zero())
}

/// the nodata value of the clipped band. This is the source nodata if it is representable as `T`, otherwise the fill
/// value (e.g. for a -9999 nodata on a u8 band), so that masked samples are always flagged as nodata
pub fn target_no_data<T: NumCast + Copy> (src_no_data: Option<f64>, fill: T)->Option<f64> {
    src_no_data
        .filter( |v| <T as NumCast>::from(*v).is_some())
        .or_else( || fill.to_f64())
}

fn clip_band_type <T> (src: &RasterBand, tgt: &mut RasterBand, window: &PixelWindow, mask: &[bool]) -> Result<()>
    where T: Copy + GdalType + NumCast + Zero
{
    let src_no_data = src.no_data_value();
    let fill: T = fill_value( src_no_data);

    let buf = src.read_as::<T>( window.offset(), window.size(), window.size(), None)?;
    let mut data = buf.data().to_vec();
    for (v,inside) in data.iter_mut().zip( mask.iter()) {
        if !*inside { *v = fill }
    }

    let tgt_no_data = target_no_data( src_no_data, fill);
    tgt.set_no_data_value( tgt_no_data)?;

    let mut tgt_buf = Buffer::new( window.size(), data);
    tgt.write( (0,0), window.size(), &mut tgt_buf)?;
    Ok(())
}
