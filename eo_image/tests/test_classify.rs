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

use image::Rgb;
use eo_image::{ClassificationScheme, ClassificationConfig, parse_color, ColorRamp};
use eo_image::errors::EoImageError;

// run with "cargo test --test test_classify -- --nocapture"

fn heat_scheme ()->ClassificationScheme {
    ClassificationScheme::from_config( &ClassificationConfig::default()).unwrap()
}

#[test]
fn test_class_index () {
    let scheme = heat_scheme();
    assert_eq!( scheme.n_classes(), 5);

    assert_eq!( scheme.class_index(-5.0), Some(0)); // below first boundary clamps
    assert_eq!( scheme.class_index(0.0), Some(0));
    assert_eq!( scheme.class_index(26.99), Some(0));
    assert_eq!( scheme.class_index(27.0), Some(1)); // boundary belongs to the class starting there
    assert_eq!( scheme.class_index(31.5), Some(2));
    assert_eq!( scheme.class_index(36.0), Some(4));
    assert_eq!( scheme.class_index(50.0), Some(4)); // at or above last boundary clamps
    assert_eq!( scheme.class_index(75.0), Some(4));
    assert_eq!( scheme.class_index(f64::NAN), None);
}

#[test]
fn test_every_value_has_one_class () {
    let scheme = heat_scheme();
    let values: Vec<f64> = (-100..600).map(|i| i as f64 * 0.1).collect();
    let counts = scheme.class_counts( values.iter().copied());
    println!("{counts:?}");
    assert_eq!( counts.iter().sum::<usize>(), values.len());
}

#[test]
fn test_legend_labels () {
    let scheme = heat_scheme();
    assert_eq!( scheme.legend_labels(), vec!["<27", "27–30", "30–33", "33–36", ">36"]);

    let two = ClassificationScheme::new( vec![0.0, 10.5, 20.0], vec![Rgb([0,0,0]), Rgb([255,255,255])]).unwrap();
    assert_eq!( two.legend_labels(), vec!["<10.5", ">10.5"]);

    let one = ClassificationScheme::new( vec![0.0, 1.0], vec![Rgb([0,0,0])]).unwrap();
    assert_eq!( one.legend_labels(), vec!["0–1"]);
}

#[test]
fn test_scheme_colors () {
    let scheme = heat_scheme();
    assert_eq!( scheme.color_of(20.0), Some(Rgb([255,255,255])));
    assert_eq!( scheme.color_of(28.0), Some(Rgb([0,128,0])));
    assert_eq!( scheme.color_of(34.0), Some(Rgb([255,165,0])));
    assert_eq!( scheme.color_of(40.0), Some(Rgb([255,0,0])));
}

#[test]
fn test_invalid_schemes () {
    let c = vec![Rgb([0,0,0]); 2];
    assert!( matches!( ClassificationScheme::new( vec![0.0, 5.0, 5.0], c.clone()), Err(EoImageError::InvalidScheme(_))));
    assert!( matches!( ClassificationScheme::new( vec![10.0, 5.0, 1.0], c.clone()), Err(EoImageError::InvalidScheme(_))));
    assert!( matches!( ClassificationScheme::new( vec![0.0, 5.0, 10.0, 15.0], c.clone()), Err(EoImageError::InvalidScheme(_))));
    assert!( matches!( ClassificationScheme::new( vec![0.0], vec![]), Err(EoImageError::InvalidScheme(_))));
    assert!( matches!( ClassificationScheme::new( vec![0.0, f64::NAN, 1.0], c), Err(EoImageError::InvalidScheme(_))));
}

#[test]
fn test_colors () {
    assert_eq!( parse_color("orange").unwrap(), Rgb([255,165,0]));
    assert_eq!( parse_color(" Green ").unwrap(), Rgb([0,128,0]));
    assert_eq!( parse_color("#ff8000").unwrap(), Rgb([255,128,0]));
    assert!( parse_color("not-a-color").is_err());
    assert!( parse_color("#12345").is_err());
}

#[test]
fn test_ramps () {
    let ramp = ColorRamp::from_name("Viridis").unwrap();
    assert_eq!( ramp, ColorRamp::Viridis);
    assert_eq!( ramp.color_at(0.0), Rgb([68,1,84]));
    assert_eq!( ramp.color_at(1.0), Rgb([253,231,37]));
    assert_eq!( ramp.color_at(2.0), Rgb([253,231,37])); // clamped

    let gray = ColorRamp::from_name("grey").unwrap();
    assert_eq!( gray.color_at(0.5), Rgb([128,128,128]));
    assert!( ColorRamp::from_name("rainbow").is_err());
}
