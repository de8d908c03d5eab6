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

//! configuration of scene search, download, LST derivation and heat map rendering. All of these are
//! explicit values that get passed into the stage functions

use std::{env, path::PathBuf};
use chrono::NaiveDate;
use serde::{Serialize,Deserialize};

use eo_common::BoundingBox;
use eo_image::RenderConfig;
use crate::errors::{Result, LandsatError, invalid_config};

pub const M2M_API_URL: &str = "https://m2m.cr.usgs.gov/api/api/json/stable/";
pub const LANDSAT_C2_L2: &str = "landsat_ot_c2_l2";

/// env vars we use if credentials are not in the config
pub const USERNAME_VAR: &str = "M2M_USERNAME";
pub const PASSWORD_VAR: &str = "M2M_PASSWORD";
pub const TOKEN_VAR: &str = "M2M_TOKEN";

#[derive(Clone,Serialize,Deserialize,PartialEq)]
pub enum Credentials {
    Password { username: String, password: String },
    /// application token as generated on the EarthExplorer profile page
    Token { username: String, token: String },
}

impl Credentials {
    pub fn username (&self)->&str {
        match self {
            Credentials::Password{username,..} => username,
            Credentials::Token{username,..} => username,
        }
    }

    pub fn is_complete (&self)->bool {
        match self {
            Credentials::Password{username,password} => !username.trim().is_empty() && !password.is_empty(),
            Credentials::Token{username,token} => !username.trim().is_empty() && !token.is_empty(),
        }
    }

    /// token takes precedence over password
    pub fn from_env ()->Result<Credentials> {
        let username = env::var(USERNAME_VAR).map_err(|_| LandsatError::MissingCredentials( format!("{USERNAME_VAR} not set")))?;
        if let Ok(token) = env::var(TOKEN_VAR) {
            Ok( Credentials::Token{ username, token })
        } else if let Ok(password) = env::var(PASSWORD_VAR) {
            Ok( Credentials::Password{ username, password })
        } else {
            Err( LandsatError::MissingCredentials( format!("neither {TOKEN_VAR} nor {PASSWORD_VAR} set")))
        }
    }
}

// we don't want secrets in log output
impl std::fmt::Debug for Credentials {
    fn fmt (&self, f: &mut std::fmt::Formatter<'_>)->std::fmt::Result {
        match self {
            Credentials::Password{username,..} => write!(f, "Password{{username: {username:?}, password: ***}}"),
            Credentials::Token{username,..} => write!(f, "Token{{username: {username:?}, token: ***}}"),
        }
    }
}

/// use configured credentials if complete, otherwise fall back to env vars
pub fn resolve_credentials (opt_creds: Option<&Credentials>)->Result<Credentials> {
    match opt_creds {
        Some(creds) if creds.is_complete() => Ok(creds.clone()),
        Some(creds) => Err( LandsatError::MissingCredentials( format!("incomplete credentials for '{}'", creds.username()))),
        None => Credentials::from_env()
    }
}

#[derive(Clone,Serialize,Deserialize,Debug,PartialEq)]
pub enum SearchLocation {
    Point { lon: f64, lat: f64 },
    Area(BoundingBox<f64>),
}

impl SearchLocation {
    /// lower left and upper right (lon,lat) of the search area
    pub fn mbr (&self)->((f64,f64),(f64,f64)) {
        match self {
            SearchLocation::Point{lon,lat} => ((*lon,*lat),(*lon,*lat)),
            SearchLocation::Area(bbox) => ((bbox.west,bbox.south),(bbox.east,bbox.north)),
        }
    }
}

#[derive(Clone,Serialize,Deserialize,Debug,PartialEq)]
#[serde(default)]
pub struct SceneSearchConfig {
    pub dataset: String,
    pub location: SearchLocation,
    /// inclusive date range
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// max cloud cover in percent
    pub max_cloud_cover: u8,
    pub max_results: u32,
}

impl Default for SceneSearchConfig {
    fn default()->Self {
        SceneSearchConfig {
            dataset: LANDSAT_C2_L2.to_string(),
            location: SearchLocation::Point{ lon: -121.8863, lat: 37.3382 },
            start_date: NaiveDate::from_ymd_opt(2023,6,1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2023,9,30).unwrap_or_default(),
            max_cloud_cover: 5,
            max_results: 100,
        }
    }
}

impl SceneSearchConfig {
    pub fn check (&self)->Result<()> {
        if self.dataset.trim().is_empty() { return Err( invalid_config("no dataset")) }
        if self.start_date > self.end_date { return Err( invalid_config( format!("start date {} after end date {}", self.start_date, self.end_date))) }
        if self.max_cloud_cover > 100 { return Err( invalid_config( format!("max cloud cover {} > 100", self.max_cloud_cover))) }
        if self.max_results == 0 { return Err( invalid_config("max_results has to be positive")) }
        match &self.location {
            SearchLocation::Point{lon,lat} => {
                if lon.abs() > 180.0 || lat.abs() > 90.0 { return Err( invalid_config( format!("invalid search point {lon},{lat}"))) }
            }
            SearchLocation::Area(bbox) => {
                if !bbox.is_valid() { return Err( invalid_config( format!("invalid search area {bbox:?}"))) }
            }
        }
        Ok(())
    }
}

/// linear scaling of thermal band digital numbers into Kelvin. Defaults are for Landsat Collection 2 Level 2 ST_B10
#[derive(Clone,Copy,Serialize,Deserialize,Debug,PartialEq)]
#[serde(default)]
pub struct LstCalibration {
    pub scale: f64,
    pub offset: f64,
}

impl Default for LstCalibration {
    fn default()->Self {
        LstCalibration { scale: 0.00341802, offset: 149.0 }
    }
}

/// everything the heat map pipeline needs, from scene search to rendering
#[derive(Clone,Serialize,Deserialize,Debug)]
#[serde(default)]
pub struct HeatMapConfig {
    pub api_url: String,
    /// if not set we use M2M_USERNAME and M2M_TOKEN / M2M_PASSWORD env vars
    pub credentials: Option<Credentials>,
    pub search: SceneSearchConfig,
    /// directory for downloaded archives and extracted scenes
    pub download_dir: PathBuf,
    /// directory for derived products
    pub output_dir: PathBuf,
    /// suffix of the thermal band file within the scene (e.g. "ST_B10")
    pub band: String,
    pub calibration: LstCalibration,
    /// lon/lat clip area. The full scene is rendered if not set
    pub clip: Option<BoundingBox<f64>>,
    /// skip scenes with a QA_PIXEL cloud percentage at or above this limit within the clip area
    pub max_aoi_cloud_pct: Option<f64>,
    pub render: RenderConfig,
}

impl Default for HeatMapConfig {
    fn default()->Self {
        HeatMapConfig {
            api_url: M2M_API_URL.to_string(),
            credentials: None,
            search: SceneSearchConfig::default(),
            download_dir: PathBuf::from("LandsatDownloader"),
            output_dir: PathBuf::from("output"),
            band: "ST_B10".to_string(),
            calibration: LstCalibration::default(),
            clip: None,
            max_aoi_cloud_pct: None,
            render: RenderConfig::default(),
        }
    }
}
