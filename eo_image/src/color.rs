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

//! color specs and continuous color ramps

use std::collections::HashMap;
use image::{Rgb,Rgba};
use lazy_static::lazy_static;
use serde::{Serialize,Deserialize};

use crate::errors::{Result, EoImageError};

lazy_static! {
    // base names as used by common plotting libraries
    static ref NAMED_COLORS: HashMap<&'static str, [u8;3]> = HashMap::from( [
        ("white",     [255,255,255]),
        ("black",     [0,0,0]),
        ("red",       [255,0,0]),
        ("darkred",   [139,0,0]),
        ("green",     [0,128,0]),
        ("darkgreen", [0,100,0]),
        ("lime",      [0,255,0]),
        ("blue",      [0,0,255]),
        ("navy",      [0,0,128]),
        ("lightblue", [173,216,230]),
        ("cyan",      [0,255,255]),
        ("magenta",   [255,0,255]),
        ("yellow",    [255,255,0]),
        ("gold",      [255,215,0]),
        ("orange",    [255,165,0]),
        ("purple",    [128,0,128]),
        ("pink",      [255,192,203]),
        ("brown",     [165,42,42]),
        ("olive",     [128,128,0]),
        ("gray",      [128,128,128]),
        ("grey",      [128,128,128]),
    ]);
}

pub const TRANSPARENT: Rgba<u8> = Rgba([0,0,0,0]);

pub fn get_hex_rgb (hex_color: &str)->Result<[u8;3]> {
    let hex = hex_color.trim_start_matches('#');
    if hex.len() != 6 { return Err( EoImageError::InvalidColor( hex_color.to_string())) }
    let v = u32::from_str_radix( hex, 16).map_err(|_| EoImageError::InvalidColor( hex_color.to_string()))?;

    let r = (v >> 16) as u8;
    let g = (v >> 8 & 0xff) as u8;
    let b = (v & 0xff) as u8;

    Ok([r, g, b])
}

/// parse a color name ("orange") or hex spec ("#ffa500")
pub fn parse_color (spec: &str)->Result<Rgb<u8>> {
    let s = spec.trim().to_lowercase();
    if let Some(rgb) = NAMED_COLORS.get( s.as_str()) {
        Ok( Rgb(*rgb))
    } else {
        Ok( Rgb( get_hex_rgb( &s)?))
    }
}

pub fn opaque (c: Rgb<u8>)->Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

/* #region color ramps ********************************************************************************************/

/// a position in [0,1] mapped to a color
#[derive(Debug,Clone,Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: [u8;3],
}

impl ColorStop {
    pub const fn new (t: f64, r: u8, g: u8, b: u8)->Self { ColorStop { t, color: [r,g,b] } }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum ColorRamp {
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Gray,
}

const VIRIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 68, 1, 84),
    ColorStop::new(0.25, 59, 82, 139),
    ColorStop::new(0.50, 33, 145, 140),
    ColorStop::new(0.75, 94, 201, 98),
    ColorStop::new(1.00, 253, 231, 37),
];

const PLASMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 13, 8, 135),
    ColorStop::new(0.25, 126, 3, 168),
    ColorStop::new(0.50, 204, 71, 120),
    ColorStop::new(0.75, 248, 149, 64),
    ColorStop::new(1.00, 240, 249, 33),
];

const INFERNO_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 4),
    ColorStop::new(0.25, 87, 16, 110),
    ColorStop::new(0.50, 188, 55, 84),
    ColorStop::new(0.75, 249, 142, 9),
    ColorStop::new(1.00, 252, 255, 164),
];

const MAGMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 4),
    ColorStop::new(0.25, 81, 18, 124),
    ColorStop::new(0.50, 183, 55, 121),
    ColorStop::new(0.75, 252, 137, 97),
    ColorStop::new(1.00, 252, 253, 191),
];

const CIVIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 34, 78),
    ColorStop::new(0.25, 65, 77, 108),
    ColorStop::new(0.50, 124, 123, 120),
    ColorStop::new(0.75, 188, 175, 111),
    ColorStop::new(1.00, 253, 234, 69),
];

const GRAY_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 0),
    ColorStop::new(1.00, 255, 255, 255),
];

impl ColorRamp {
    pub const ALL: &[ColorRamp] = &[ Self::Viridis, Self::Plasma, Self::Inferno, Self::Magma, Self::Cividis, Self::Gray ];

    pub fn name (&self)->&'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Cividis => "cividis",
            Self::Gray => "gray",
        }
    }

    pub fn from_name (name: &str)->Result<ColorRamp> {
        let name = name.trim().to_lowercase();
        Self::ALL.iter().find( |r| r.name() == name || (name == "grey" && **r == Self::Gray))
            .copied()
            .ok_or_else( || EoImageError::UnknownRamp( name))
    }

    fn stops (&self)->&'static [ColorStop] {
        match self {
            Self::Viridis => VIRIDIS_STOPS,
            Self::Plasma => PLASMA_STOPS,
            Self::Inferno => INFERNO_STOPS,
            Self::Magma => MAGMA_STOPS,
            Self::Cividis => CIVIDIS_STOPS,
            Self::Gray => GRAY_STOPS,
        }
    }

    /// color at normalized position t, which is clamped to [0,1]
    pub fn color_at (&self, t: f64)->Rgb<u8> {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        for i in 1..stops.len() {
            if t <= stops[i].t {
                let (s0,s1) = (&stops[i-1], &stops[i]);
                let f = (t - s0.t) / (s1.t - s0.t);
                return Rgb( [lerp(s0.color[0], s1.color[0], f), lerp(s0.color[1], s1.color[1], f), lerp(s0.color[2], s1.color[2], f)])
            }
        }
        Rgb( stops[stops.len()-1].color)
    }
}

fn lerp (a: u8, b: u8, f: f64)->u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}

/* #endregion color ramps */
