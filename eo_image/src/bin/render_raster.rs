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
use anyhow::{anyhow,Result};

use eo_common::{define_cli, check_cli, init_logging, config::load_config_path};
use eo_gdal::raster::{Raster, read_raster_path};
use eo_image::{RenderConfig, RenderStyleConfig, ClassificationConfig, render_to_png, render::hex_string};

define_cli! { ARGS [about="render_raster - render a single band raster as color coded PNG image with legend"] =
    config: Option<PathBuf>   [help="RON render config (default is LST heat classes)", short, long],
    boundaries: Option<String> [help="comma separated class boundaries, e.g. \"0,27,30,33,36,50\"", long],
    colors: Option<String>    [help="comma separated class colors, e.g. \"white,green,yellow,orange,red\"", long],
    ramp: Option<String>      [help="continuous color ramp (viridis,plasma,inferno,magma,cividis,gray)", long],
    min_floor: Option<f64>    [help="lower limit for the minimum of a continuous ramp, e.g. -5", long],
    font: Option<PathBuf>     [help="TTF font file for legend labels", long],
    band: usize               [help="1-based band index", long, default_value="1"],
    input: PathBuf            [help="raster to render"],
    output: PathBuf           [help="PNG output file"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let mut config: RenderConfig = if let Some(path) = &ARGS.config { load_config_path( path)? } else { RenderConfig::default() };

    if let Some(name) = &ARGS.ramp {
        config.style = RenderStyleConfig::Ramp{ name: name.clone(), min: None, max: None, min_floor: ARGS.min_floor };
    } else if let (Some(bounds),Some(colors)) = (&ARGS.boundaries, &ARGS.colors) {
        config.style = RenderStyleConfig::Classes( ClassificationConfig { 
            boundaries: parse_list( bounds, |s| s.parse::<f64>().map_err(|e| anyhow!("invalid boundary '{s}': {e}")))?,
            colors: parse_list( colors, |s| Ok(s.to_string()))?
        });
    } else if ARGS.boundaries.is_some() || ARGS.colors.is_some() {
        return Err( anyhow!("boundaries and colors have to be specified together"))
    }
    if ARGS.font.is_some() { config.font = ARGS.font.clone() }

    let raster: Raster<f64> = read_raster_path( &ARGS.input, ARGS.band)?;
    let legend = render_to_png( &raster.data, raster.meta.no_data, &config, &ARGS.output)?;

    println!("legend:");
    for (color,label) in &legend {
        println!("  {}  {}", hex_string(color), label);
    }
    println!("saved image to {}", ARGS.output.display());
    Ok(())
}

fn parse_list<T,F> (s: &str, f: F)->Result<Vec<T>> where F: Fn(&str)->Result<T> {
    s.split(',').map(|e| e.trim()).filter(|e| !e.is_empty()).map(f).collect()
}
