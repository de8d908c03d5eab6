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

pub type Result<T> = std::result::Result<T, EoGdalError>;

#[derive(Error,Debug)]
pub enum EoGdalError {
    #[error("GDAL error {0}")]
    GdalError( #[from] gdal::errors::GdalError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("raster shape error {0}")]
    ShapeError( #[from] ndarray::ShapeError),

    #[error("unsupported GDAL data type {0}")]
    UnsupportedDataType(String),

    #[error("invalid bounding box {0}")]
    InvalidBoundingBox(String),

    #[error("bounding box does not overlap raster {0}")]
    NoOverlap(String),

    #[error("{0}")]
    MiscError(String)
}

pub fn misc_error<S: ToString> (msg: S)->EoGdalError {
    EoGdalError::MiscError(msg.to_string())
}

pub fn no_overlap<S: ToString> (msg: S)->EoGdalError {
    EoGdalError::NoOverlap(msg.to_string())
}
