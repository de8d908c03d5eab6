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
use eo_common::define_error;

pub type Result<T> = std::result::Result<T, EoImageError>;

define_error!{ pub EoImageError = 
    ImageError(#[from] image::ImageError) : "Image error {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}",
    InvalidFont( #[from] ab_glyph::InvalidFont) : "Invalid font error: {0}",
    InvalidColor(String) : "invalid color spec: {0}",
    InvalidScheme(String) : "invalid classification scheme: {0}",
    UnknownRamp(String) : "unknown color ramp: {0}",
    InsufficientData(String) : "insufficient data: {0}",
    IllegalArgument(String) : "illegal argument: {0}"
}

pub fn invalid_scheme<S: ToString> (msg: S)->EoImageError {
    EoImageError::InvalidScheme(msg.to_string())
}
