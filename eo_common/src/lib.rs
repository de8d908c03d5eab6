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

use serde::{Serialize,Deserialize};
use num::{Num,ToPrimitive};
use tracing_subscriber::EnvFilter;

pub mod macros;
pub mod fs;
pub mod datetime;
pub mod net;
pub mod config;
pub mod outcome;
pub mod ris;

#[cfg(feature="s3")]
pub mod s3;

/// a generic bounding box without semantics for the coordinate type
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + PartialOrd + ToPrimitive> BoundingBox<T> {
    pub fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn from_wsen<N> (wsen: &[N;4]) -> BoundingBox<T> where N: Num + Copy + Into<T> {
        BoundingBox::<T>{
            west: wsen[0].into(),
            south: wsen[1].into(),
            east: wsen[2].into(),
            north: wsen[3].into()
        }
    }

    pub fn to_minmax_array (&self) -> [T;4] {
        [self.west,self.south,self.east,self.north]
    }

    /// a box is only valid if it has a non-empty extent in both dimensions
    pub fn is_valid (&self) -> bool {
        self.west < self.east && self.south < self.north
    }

    pub fn contains (&self, x: T, y: T) -> bool {
        x >= self.west && x <= self.east && y >= self.south && y <= self.north
    }

    pub fn intersects (&self, other: &BoundingBox<T>) -> bool {
        self.west < other.east && other.west < self.east && self.south < other.north && other.south < self.north
    }

    pub fn center (&self) -> (f64,f64) {
        let w = self.west.to_f64().unwrap_or(f64::NAN);
        let s = self.south.to_f64().unwrap_or(f64::NAN);
        let e = self.east.to_f64().unwrap_or(f64::NAN);
        let n = self.north.to_f64().unwrap_or(f64::NAN);
        ( (w + e) / 2.0, (s + n) / 2.0 )
    }
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: 0.0 } }

    pub fn add (&mut self, v: f64) {
        self.n += 1;
        if v < self.min { self.min = v }
        if v > self.max { self.max = v }
        self.avg += (v - self.avg) / self.n as f64;
    }

    pub fn is_empty (&self)->bool { self.n == 0 }
}

/// initialize the global tracing subscriber. The max level is taken from RUST_LOG and defaults to "info".
/// Note this only succeeds for the first call, subsequent calls are ignored
pub fn init_logging () {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_target(false)
        .try_init();
}
