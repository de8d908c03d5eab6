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

use std::path::Path;
use ndarray::{Array2, array};

use eo_gdal::{GdalDataType, SpatialRef, new_geotransform};
use eo_gdal::raster::{Raster, RasterMeta, write_raster};
use eo_common::BoundingBox;
use eo_landsat::{HeatMapConfig, process_scene};
use eo_landsat::qa::{cloud_pct, aoi_cloud_pct, check_cloud_pct, is_cloudy, CLOUD_BIT, CLOUD_SHADOW_BIT, DILATED_CLOUD_BIT, FILL_BIT};
use eo_landsat::errors::LandsatError;

// run with "cargo test --test test_qa -- --nocapture"

const DISPLAY_ID: &str = "LC08_L2SP_044034_20230720_20230802_02_T1";

const CLEAR: u16 = 1 << 6;
const CLOUD: u16 = CLEAR | CLOUD_BIT | DILATED_CLOUD_BIT;
const SHADOW: u16 = CLEAR | CLOUD_SHADOW_BIT;

/// 8x8 QA band on a 1/8 degree grid over lon [-122,-121], lat [36.5,37.5]. The left half is clear, the right
/// half is clouded, the top row is fill
fn write_qa_band (path: &Path) {
    let meta = RasterMeta {
        width: 8, height: 8,
        geo_transform: new_geotransform( -122.0, 0.125, 0.0, 37.5, 0.0, -0.125),
        projection: SpatialRef::from_epsg(4326).unwrap().to_wkt().unwrap(),
        no_data: Some(1.0),
        data_type: GdalDataType::UInt16
    };
    let data = Array2::<u16>::from_shape_fn( (8,8), |(r,c)| if r == 0 { FILL_BIT } else if c < 4 { CLEAR } else { CLOUD });
    write_raster( path, &Raster::new( meta, data).unwrap()).unwrap();
}

fn scene_dir (dir: &Path)->std::path::PathBuf {
    let scene_dir = dir.join( DISPLAY_ID);
    std::fs::create_dir_all( &scene_dir).unwrap();
    write_qa_band( &scene_dir.join( format!("{DISPLAY_ID}_QA_PIXEL.TIF")));
    scene_dir
}

#[test]
fn test_cloud_bits () {
    assert!( !is_cloudy( CLEAR));
    assert!( is_cloudy( CLOUD));
    assert!( is_cloudy( SHADOW));
    assert!( is_cloudy( CLEAR | DILATED_CLOUD_BIT));
    assert!( !is_cloudy( CLEAR | (1 << 2))); // cirrus is not counted
}

#[test]
fn test_cloud_pct () {
    let qa = array![[CLEAR, CLOUD], [SHADOW, FILL_BIT]];
    let pct = cloud_pct( &qa, None).unwrap();
    assert!( (pct - 200.0/3.0).abs() < 1e-9);

    // explicit nodata value is excluded too
    let qa = array![[CLEAR, CLOUD], [0, 0]];
    assert_eq!( cloud_pct( &qa, Some(0.0)), Some(50.0));

    assert_eq!( cloud_pct( &array![[FILL_BIT]], Some(1.0)), None);
}

#[test]
fn test_aoi_cloud_pct () {
    let dir = tempfile::tempdir().unwrap();
    let scene_dir = scene_dir( dir.path());

    // whole scene: 56 valid pixels, half of them clouded
    assert_eq!( aoi_cloud_pct( &scene_dir, None).unwrap(), 50.0);

    // clear west half
    let west = BoundingBox::new( -121.875, 36.75, -121.625, 37.25);
    assert_eq!( aoi_cloud_pct( &scene_dir, Some(&west)).unwrap(), 0.0);

    // clouded east half
    let east = BoundingBox::new( -121.375, 36.75, -121.125, 37.25);
    assert_eq!( aoi_cloud_pct( &scene_dir, Some(&east)).unwrap(), 100.0);

    // only fill pixels count as fully clouded
    let fill = BoundingBox::new( -121.9, 37.4, -121.1, 37.49);
    assert_eq!( aoi_cloud_pct( &scene_dir, Some(&fill)).unwrap(), 100.0);

    // no clipped leftovers in the scene dir
    assert_eq!( std::fs::read_dir( &scene_dir).unwrap().count(), 1);
}

#[test]
fn test_check_cloud_pct () {
    assert!( check_cloud_pct( DISPLAY_ID, 14.9, 15.0).is_ok());
    match check_cloud_pct( DISPLAY_ID, 15.0, 15.0) {
        Err(LandsatError::TooCloudy(msg)) => assert!( msg.contains( DISPLAY_ID)),
        other => panic!("expected too cloudy error, got {other:?}")
    }
}

#[test]
fn test_process_cloudy_scene () {
    let dir = tempfile::tempdir().unwrap();
    let scene_dir = scene_dir( dir.path());
    let output_dir = dir.path().join("output");

    let config = HeatMapConfig { 
        output_dir: output_dir.clone(),
        clip: Some( BoundingBox::new( -121.375, 36.75, -121.125, 37.25)),
        max_aoi_cloud_pct: Some(15.0),
        ..HeatMapConfig::default() 
    };

    // rejected before the thermal band is even looked at
    match process_scene( &scene_dir, DISPLAY_ID, &config) {
        Err(LandsatError::TooCloudy(msg)) => println!("expected: {msg}"),
        other => panic!("expected too cloudy error, got {other:?}")
    }
    assert!( !output_dir.join( format!("{DISPLAY_ID}_LST.tif")).exists());
}
