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

//! Landsat land surface temperature heat maps: scene search and download through the USGS M2M API,
//! LST derivation from the thermal band, clipping and rendering

pub mod errors;
pub mod config;
pub mod m2m;
pub mod locator;
pub mod fetcher;
pub mod lst;
pub mod qa;
pub mod pipeline;

pub use config::{HeatMapConfig, SceneSearchConfig, SearchLocation, LstCalibration, Credentials, resolve_credentials};
pub use locator::{SceneRecord, locate_scenes, select_most_recent};
pub use fetcher::{FetchedScene, fetch_scene, extract_archive, find_band_file};
pub use lst::derive_lst;
pub use pipeline::{HeatMapProducts, run_heat_map, process_scene};
