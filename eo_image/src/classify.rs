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

//! discrete classification of raster values.
//! Boundaries `b[0] < b[1] < .. < b[n]` define the half-open classes `[b[i],b[i+1])`. Values below `b[0]` fall into
//! the first class, values at or above `b[n]` into the last one

use image::Rgb;
use serde::{Serialize,Deserialize};

use crate::color::parse_color;
use crate::errors::{Result, invalid_scheme};

/// serializable form of a classification scheme, with colors as names or hex specs
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct ClassificationConfig {
    pub boundaries: Vec<f64>,
    pub colors: Vec<String>,
}

impl Default for ClassificationConfig {
    /// land surface temperature heat classes in degrees Celsius
    fn default()->Self {
        ClassificationConfig {
            boundaries: vec![0.0, 27.0, 30.0, 33.0, 36.0, 50.0],
            colors: ["white", "green", "yellow", "orange", "red"].iter().map(|s| s.to_string()).collect()
        }
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct ClassificationScheme {
    boundaries: Vec<f64>,
    colors: Vec<Rgb<u8>>,
}

impl ClassificationScheme {
    /// boundaries have to be finite and strictly increasing, with one color per class
    pub fn new (boundaries: Vec<f64>, colors: Vec<Rgb<u8>>)->Result<Self> {
        if boundaries.len() < 2 {
            return Err( invalid_scheme( format!("need at least 2 boundaries, got {}", boundaries.len())))
        }
        if boundaries.iter().any(|b| !b.is_finite()) {
            return Err( invalid_scheme( "boundaries have to be finite"))
        }
        if !boundaries.windows(2).all( |w| w[0] < w[1]) {
            return Err( invalid_scheme( format!("boundaries not strictly increasing: {:?}", boundaries)))
        }
        if colors.len() != boundaries.len() - 1 {
            return Err( invalid_scheme( format!("{} boundaries require {} colors, got {}", boundaries.len(), boundaries.len()-1, colors.len())))
        }

        Ok( ClassificationScheme { boundaries, colors } )
    }

    pub fn from_config (config: &ClassificationConfig)->Result<Self> {
        let colors = config.colors.iter().map( |c| parse_color(c)).collect::<Result<Vec<_>>>()?;
        Self::new( config.boundaries.clone(), colors)
    }

    pub fn n_classes (&self)->usize { self.colors.len() }
    pub fn boundaries (&self)->&[f64] { &self.boundaries }
    pub fn colors (&self)->&[Rgb<u8>] { &self.colors }

    /// class of a value, None for NaN
    pub fn class_index (&self, v: f64)->Option<usize> {
        if v.is_nan() { return None }
        let n_le = self.boundaries.partition_point( |b| *b <= v);
        Some( n_le.saturating_sub(1).min( self.n_classes() - 1))
    }

    pub fn color_of (&self, v: f64)->Option<Rgb<u8>> {
        self.class_index(v).map( |i| self.colors[i])
    }

    /// `<b1`, `b1–b2`, .. `>b(n-1)`. A single class is labeled `b0–b1`
    pub fn legend_labels (&self)->Vec<String> {
        let b = &self.boundaries;
        let n = self.n_classes();

        if n == 1 {
            return vec![ format!("{}–{}", b[0], b[1]) ]
        }

        let mut labels = Vec::with_capacity(n);
        labels.push( format!("<{}", b[1]));
        for i in 1..n-1 {
            labels.push( format!("{}–{}", b[i], b[i+1]));
        }
        labels.push( format!(">{}", b[n-1]));
        labels
    }

    pub fn legend (&self)->Vec<(Rgb<u8>,String)> {
        self.colors.iter().copied().zip( self.legend_labels().into_iter()).collect()
    }

    /// number of values per class, ignoring NaNs
    pub fn class_counts<I> (&self, values: I)->Vec<usize> where I: IntoIterator<Item=f64> {
        let mut counts = vec![0; self.n_classes()];
        for v in values {
            if let Some(i) = self.class_index(v) { counts[i] += 1 }
        }
        counts
    }
}
