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

use thiserror::Error;
use eo_common::{net::NetError, config::ConfigError};
use eo_gdal::errors::EoGdalError;
use eo_image::errors::EoImageError;

pub type Result<T> = std::result::Result<T, LandsatError>;

#[derive(Error,Debug)]
pub enum LandsatError {
    #[error("credentials not provided: {0}")]
    MissingCredentials(String),

    #[error("authentication failed: {0}")]
    AuthError(String),

    #[error("catalog API error {0}: {1}")]
    ApiError(String,String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("scene download failed: {0}")]
    DownloadError(String),

    #[error("scene download not ready: {0}")]
    DownloadNotReady(String),

    #[error("archive extraction failed: {0}")]
    ExtractError(String),

    #[error("input file not found: {0}")]
    MissingInput(String),

    #[error("band file not found: {0}")]
    BandNotFound(String),

    #[error("too cloudy: {0}")]
    TooCloudy(String),

    // pass through errors
    #[error("network error {0}")]
    NetError( #[from] NetError),

    #[error("raster error {0}")]
    GdalError( #[from] EoGdalError),

    #[error("image error {0}")]
    ImageError( #[from] EoImageError),

    #[error("config error {0}")]
    ConfigError( #[from] ConfigError),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}

pub fn invalid_config<S: ToString> (msg: S)->LandsatError {
    LandsatError::InvalidConfig(msg.to_string())
}

pub fn download_error<S: ToString> (msg: S)->LandsatError {
    LandsatError::DownloadError(msg.to_string())
}

pub fn extract_error<S: ToString> (msg: S)->LandsatError {
    LandsatError::ExtractError(msg.to_string())
}
