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

//! single band rasters as ndarrays together with their georeference

use std::path::Path;
use ndarray::Array2;
use tracing::debug;

use crate::{Dataset, GdalType, GdalDataType, GeoTransform, Buffer, create_dataset, get_driver_for_path, lzw_create_opts};
use crate::errors::{Result, misc_error};

/// georeference and layout of a raster band
#[derive(Debug,Clone,PartialEq)]
pub struct RasterMeta {
    pub width: usize,
    pub height: usize,
    pub geo_transform: GeoTransform,
    /// WKT, empty if the dataset is not georeferenced
    pub projection: String,
    pub no_data: Option<f64>,
    pub data_type: GdalDataType,
}

impl RasterMeta {
    /// the same georeference for a different band data type
    pub fn with_data_type (&self, data_type: GdalDataType, no_data: Option<f64>)->RasterMeta {
        RasterMeta { data_type, no_data, ..self.clone() }
    }

    pub fn n_samples (&self)->usize { self.width * self.height }
}

/// a single raster band in memory. Data is in (row,col) order
#[derive(Debug,Clone)]
pub struct Raster<T> {
    pub meta: RasterMeta,
    pub data: Array2<T>,
}

impl<T: Copy> Raster<T> {
    pub fn new (meta: RasterMeta, data: Array2<T>)->Result<Self> {
        let (rows,cols) = data.dim();
        if rows != meta.height || cols != meta.width {
            return Err( misc_error( format!("raster data {}x{} does not match meta {}x{}", cols, rows, meta.width, meta.height)))
        }
        Ok( Raster{ meta, data } )
    }

    pub fn width (&self)->usize { self.meta.width }
    pub fn height (&self)->usize { self.meta.height }

    /// is v the nodata value of this raster (NaN counts as nodata for float rasters)
    pub fn is_no_data (&self, v: f64)->bool {
        v.is_nan() || self.meta.no_data.map( |nd| nd == v).unwrap_or(false)
    }
}

pub fn read_raster_meta (ds: &Dataset, band_index: usize)->Result<RasterMeta> {
    let (width,height) = ds.raster_size();
    let band = ds.rasterband( band_index)?;
    let geo_transform = ds.geo_transform()?;

    Ok( RasterMeta {
        width, height, geo_transform,
        projection: ds.projection(),
        no_data: band.no_data_value(),
        data_type: band.band_type(),
    })
}

/// read a complete band (1-based index) as the given sample type. GDAL converts if the band has a different type
pub fn read_band<T> (ds: &Dataset, band_index: usize)->Result<Raster<T>> where T: Copy + GdalType {
    let meta = read_raster_meta( ds, band_index)?;
    let band = ds.rasterband( band_index)?;
    let (w,h) = (meta.width, meta.height);

    let buf = band.read_as::<T>( (0,0), (w,h), (w,h), None)?;
    let data = Array2::from_shape_vec( (h,w), buf.data().to_vec())?;

    debug!("read band {} ({}x{} {:?})", band_index, w, h, meta.data_type);
    Ok( Raster { meta, data } )
}

pub fn read_raster_path<T,P> (path: P, band_index: usize)->Result<Raster<T>> where T: Copy + GdalType, P: AsRef<Path> {
    let ds = Dataset::open( path.as_ref())?;
    read_band( &ds, band_index)
}

/// write raster as single band dataset with LZW compression. The band data type is the type of `T`,
/// georeference and nodata are taken from the raster meta
pub fn write_raster<T,P> (path: P, raster: &Raster<T>)->Result<()> where T: Copy + GdalType, P: AsRef<Path> {
    let path = path.as_ref();
    let meta = &raster.meta;
    let (w,h) = (meta.width, meta.height);

    let data: Vec<T> = raster.data.iter().copied().collect();
    if data.len() != meta.n_samples() {
        return Err( misc_error( format!("sample count {} does not match raster size {}x{}", data.len(), w, h)))
    }

    let driver = get_driver_for_path( path)?;
    let co = lzw_create_opts()?;
    let mut ds = driver.create_with_band_type_with_options::<T,_>( path, w, h, 1, &co)?;

    ds.set_geo_transform( &meta.geo_transform)?;
    if !meta.projection.is_empty() { ds.set_projection( meta.projection.as_str())?; }

    let mut band = ds.rasterband(1)?;
    if meta.no_data.is_some() { band.set_no_data_value( meta.no_data)?; }

    let mut buf = Buffer::new( (w,h), data);
    band.write( (0,0), (w,h), &mut buf)?;

    debug!("wrote {}x{} raster to {:?}", w, h, path);
    Ok(())
}
