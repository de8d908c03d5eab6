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

//! color coded rendering of single band rasters, with an optional legend panel

use std::path::{Path,PathBuf};
use ndarray::Array2;
use image::{Rgb, Rgba, RgbaImage};
use imageproc::{drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut}, rect::Rect};
use ab_glyph::{FontVec, PxScale};
use serde::{Serialize,Deserialize};
use tracing::{debug,info};

use eo_common::MinMaxAvg;
use crate::classify::{ClassificationConfig, ClassificationScheme};
use crate::color::{ColorRamp, TRANSPARENT, opaque};
use crate::errors::{Result, EoImageError};

const LEGEND_WIDTH: u32 = 150;
const SWATCH_SIZE: u32 = 16;
const LEGEND_MARGIN: u32 = 8;
const LEGEND_LINE: u32 = 24;

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub enum RenderStyleConfig {
    Classes(ClassificationConfig),
    /// a continuous ramp, stretched between min and max (data range if not set). An optional `min_floor`
    /// raises the lower bound so that a few outliers (e.g. water or cloud edges) do not compress the ramp
    Ramp { 
        name: String, 
        min: Option<f64>, 
        max: Option<f64>,
        #[serde(default)]
        min_floor: Option<f64> 
    },
}

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub style: RenderStyleConfig,
    pub legend: bool,
    /// TTF/OTF font file for legend labels. Without it the legend only has color swatches
    pub font: Option<PathBuf>,
    pub font_size: f32,
    pub title: Option<String>,
}

impl Default for RenderConfig {
    fn default()->Self {
        RenderConfig {
            style: RenderStyleConfig::Classes( ClassificationConfig::default()),
            legend: true,
            font: None,
            font_size: 14.0,
            title: None,
        }
    }
}

/// resolved render style
#[derive(Debug,Clone)]
pub enum RenderStyle {
    Classes(ClassificationScheme),
    Ramp { ramp: ColorRamp, min: f64, max: f64 },
}

impl RenderStyle {
    /// resolve a style config for the given values. Ramp bounds that are not configured are taken from the data
    pub fn from_config (config: &RenderStyleConfig, data: &Array2<f64>, no_data: Option<f64>)->Result<RenderStyle> {
        match config {
            RenderStyleConfig::Classes(cc) => Ok( RenderStyle::Classes( ClassificationScheme::from_config(cc)?)),
            RenderStyleConfig::Ramp{name, min, max, min_floor} => {
                let ramp = ColorRamp::from_name(name)?;
                let (mut min,max) = match (min,max) {
                    (Some(min),Some(max)) => (*min,*max),
                    _ => {
                        let stats = value_stats( data, no_data);
                        if stats.is_empty() { return Err( EoImageError::InsufficientData("no valid values".into())) }
                        (min.unwrap_or(stats.min), max.unwrap_or(stats.max))
                    }
                };
                if let Some(floor) = min_floor {
                    if min < *floor { min = *floor }
                }
                if !(min <= max) { return Err( EoImageError::IllegalArgument( format!("invalid ramp range {min}..{max}"))) }
                Ok( RenderStyle::Ramp{ ramp, min, max })
            }
        }
    }

    pub fn color_of (&self, v: f64)->Option<Rgb<u8>> {
        if v.is_nan() { return None }
        match self {
            RenderStyle::Classes(scheme) => scheme.color_of(v),
            RenderStyle::Ramp{ramp,min,max} => {
                let t = if max > min { (v - min) / (max - min) } else { 0.5 };
                Some( ramp.color_at(t))
            }
        }
    }

    pub fn legend (&self)->Vec<(Rgb<u8>,String)> {
        match self {
            RenderStyle::Classes(scheme) => scheme.legend(),
            RenderStyle::Ramp{ramp,min,max} => {
                (0..5).map( |i| {
                    let t = i as f64 / 4.0;
                    (ramp.color_at(t), format!("{:.1}", min + t * (max - min)))
                }).collect()
            }
        }
    }
}

pub fn is_valid_value (v: f64, no_data: Option<f64>)->bool {
    !v.is_nan() && no_data.map( |nd| nd != v).unwrap_or(true)
}

pub fn value_stats (data: &Array2<f64>, no_data: Option<f64>)->MinMaxAvg {
    let mut stats = MinMaxAvg::new();
    for v in data.iter().copied().filter( |v| is_valid_value(*v, no_data)) {
        stats.add(v);
    }
    stats
}

/// map each sample to its color. Nodata and NaN samples are transparent
pub fn render_values (data: &Array2<f64>, no_data: Option<f64>, style: &RenderStyle)->RgbaImage {
    let (rows,cols) = data.dim();
    let mut img = RgbaImage::new( cols as u32, rows as u32);

    for ((r,c),v) in data.indexed_iter() {
        let px = if is_valid_value( *v, no_data) {
            style.color_of(*v).map( opaque).unwrap_or( TRANSPARENT)
        } else {
            TRANSPARENT
        };
        img.put_pixel( c as u32, r as u32, px);
    }
    img
}

pub fn load_font (path: impl AsRef<Path>)->Result<FontVec> {
    let data = std::fs::read( path.as_ref())?;
    Ok( FontVec::try_from_vec( data)? )
}

/// put a legend panel right of the rendered raster
pub fn add_legend (img: &RgbaImage, legend: &[(Rgb<u8>,String)], title: Option<&str>, font: Option<(&FontVec,f32)>)->RgbaImage {
    let (w,h) = img.dimensions();
    let n_lines = legend.len() as u32 + if title.is_some() { 1 } else { 0 };
    let legend_height = 2*LEGEND_MARGIN + n_lines * LEGEND_LINE;

    let mut out = RgbaImage::from_pixel( w + LEGEND_WIDTH, h.max( legend_height), Rgba([255,255,255,255]));
    image::imageops::overlay( &mut out, img, 0, 0);

    let black = Rgba([0,0,0,255]);
    let x0 = (w + LEGEND_MARGIN) as i32;
    let mut y = LEGEND_MARGIN as i32;

    if let (Some(title),Some((font,size))) = (title,font) {
        draw_text_mut( &mut out, black, x0, y, PxScale::from(size), font, title);
        y += LEGEND_LINE as i32;
    } else if title.is_some() {
        y += LEGEND_LINE as i32;
    }

    for (color,label) in legend {
        let rect = Rect::at( x0, y).of_size( SWATCH_SIZE, SWATCH_SIZE);
        draw_filled_rect_mut( &mut out, rect, opaque(*color));
        draw_hollow_rect_mut( &mut out, rect, black);

        if let Some((font,size)) = font {
            draw_text_mut( &mut out, black, x0 + SWATCH_SIZE as i32 + 6, y, PxScale::from(size), font, label.as_str());
        }
        y += LEGEND_LINE as i32;
    }

    out
}

/// render a raster band with the given config and save it as PNG. Returns the resolved legend
pub fn render_to_png (data: &Array2<f64>, no_data: Option<f64>, config: &RenderConfig, path: impl AsRef<Path>)->Result<Vec<(Rgb<u8>,String)>> {
    let path = path.as_ref();
    let style = RenderStyle::from_config( &config.style, data, no_data)?;
    let legend = style.legend();

    let mut img = render_values( data, no_data, &style);
    debug!("rendered {}x{} image", img.width(), img.height());

    if config.legend {
        let font = if let Some(font_path) = &config.font { Some( load_font( font_path)?) } else { None };
        img = add_legend( &img, &legend, config.title.as_deref(), font.as_ref().map(|f| (f, config.font_size)));
    }

    img.save_with_format( path, image::ImageFormat::Png)?;
    info!("saved rendered raster to {:?}", path);
    Ok(legend)
}

pub fn hex_string (c: &Rgb<u8>)->String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}
