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

use ndarray::{Array2, array};
use image::Rgba;
use eo_image::{RenderConfig, RenderStyle, RenderStyleConfig, ClassificationConfig, render_values, render_to_png};
use eo_image::render::{add_legend, value_stats};

// run with "cargo test --test test_render -- --nocapture"

#[test]
fn test_render_classes () {
    let data: Array2<f64> = array![[10.0, 28.0], [f64::NAN, -9999.0], [40.0, 33.0]];
    let style = RenderStyle::from_config( &RenderStyleConfig::Classes( ClassificationConfig::default()), &data, Some(-9999.0)).unwrap();

    let img = render_values( &data, Some(-9999.0), &style);
    assert_eq!( img.dimensions(), (2,3));
    assert_eq!( *img.get_pixel(0,0), Rgba([255,255,255,255]));
    assert_eq!( *img.get_pixel(1,0), Rgba([0,128,0,255]));
    assert_eq!( img.get_pixel(0,1)[3], 0); // NaN is transparent
    assert_eq!( img.get_pixel(1,1)[3], 0); // nodata is transparent
    assert_eq!( *img.get_pixel(0,2), Rgba([255,0,0,255]));
    assert_eq!( *img.get_pixel(1,2), Rgba([255,165,0,255]));
}

#[test]
fn test_render_ramp_from_data () {
    let data: Array2<f64> = array![[1.0, 2.0], [3.0, f64::NAN]];
    let stats = value_stats( &data, None);
    assert_eq!( (stats.n, stats.min, stats.max), (3, 1.0, 3.0));

    let cfg = RenderStyleConfig::Ramp{ name: "gray".into(), min: None, max: None, min_floor: None };
    let style = RenderStyle::from_config( &cfg, &data, None).unwrap();
    let img = render_values( &data, None, &style);
    assert_eq!( *img.get_pixel(0,0), Rgba([0,0,0,255]));
    assert_eq!( *img.get_pixel(0,1), Rgba([255,255,255,255]));

    let legend = style.legend();
    assert_eq!( legend.len(), 5);
    assert_eq!( legend[0].1, "1.0");
    assert_eq!( legend[4].1, "3.0");
}

#[test]
fn test_ramp_min_floor () {
    // a cold outlier would otherwise stretch the ramp down to -20
    let data: Array2<f64> = array![[-20.0, 10.0], [20.0, 30.0]];
    let cfg = RenderStyleConfig::Ramp{ name: "gray".into(), min: None, max: None, min_floor: Some(-5.0) };
    let style = RenderStyle::from_config( &cfg, &data, None).unwrap();
    match style {
        RenderStyle::Ramp{min,max,..} => assert_eq!( (min,max), (-5.0,30.0)),
        _ => panic!("expected ramp style")
    }

    let img = render_values( &data, None, &style);
    assert_eq!( *img.get_pixel(0,0), Rgba([0,0,0,255])); // below the floor maps to the low end
    assert_eq!( *img.get_pixel(1,1), Rgba([255,255,255,255]));
    assert_eq!( style.legend()[0].1, "-5.0");

    // a floor below the data range does not change anything
    let cfg = RenderStyleConfig::Ramp{ name: "gray".into(), min: None, max: None, min_floor: Some(-50.0) };
    match RenderStyle::from_config( &cfg, &data, None).unwrap() {
        RenderStyle::Ramp{min,..} => assert_eq!( min, -20.0),
        _ => panic!("expected ramp style")
    }

    let cfg: RenderStyleConfig = eo_common::config::config_from_str( r#"Ramp(name: "viridis", min: None, max: Some(40.0))"#).unwrap();
    assert_eq!( cfg, RenderStyleConfig::Ramp{ name: "viridis".into(), min: None, max: Some(40.0), min_floor: None });
}

#[test]
fn test_ramp_without_data () {
    let data: Array2<f64> = array![[f64::NAN]];
    let cfg = RenderStyleConfig::Ramp{ name: "viridis".into(), min: None, max: None, min_floor: None };
    assert!( RenderStyle::from_config( &cfg, &data, None).is_err());
}

#[test]
fn test_legend_panel () {
    let data: Array2<f64> = Array2::from_elem( (4,4), 30.0);
    let style = RenderStyle::from_config( &RenderStyleConfig::Classes( ClassificationConfig::default()), &data, None).unwrap();
    let img = render_values( &data, None, &style);
    let out = add_legend( &img, &style.legend(), None, None);

    assert_eq!( out.width(), 4 + 150);
    assert!( out.height() >= 5 * 24);
}

#[test]
fn test_render_png () {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lst.png");
    let data: Array2<f64> = Array2::from_shape_fn( (10,20), |(r,c)| (r + c) as f64 * 2.0);

    let legend = render_to_png( &data, None, &RenderConfig::default(), &path).unwrap();
    assert_eq!( legend.len(), 5);
    assert!( path.is_file());

    let img = image::open( &path).unwrap();
    assert_eq!( img.width(), 20 + 150);
}
