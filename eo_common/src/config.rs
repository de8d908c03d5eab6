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

//! RON based configuration files. Config structs are plain serde types that are explicitly loaded
//! and passed into the functions that need them, there is no global config state

use std::{fs, path::Path};
use serde::{Serialize,de::DeserializeOwned};
use ron::ser::PrettyConfig;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error,Debug)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    ConfigNotFound(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config deserialize RON error {0}")]
    RonSerdeError( #[from] ron::error::SpannedError),

    #[error("config serialize RON error {0}")]
    RonError( #[from] ron::Error),
}

pub fn load_config_path<C,P> (path: P) -> Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( ConfigError::ConfigNotFound( path.display().to_string()))
    }
    let data = fs::read(path)?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

pub fn config_from_str<C> (s: &str) -> Result<C> where C: DeserializeOwned {
    Ok( ron::from_str(s)? )
}

/// pretty printed RON, e.g. to generate a config template from defaults
pub fn config_to_string<C> (config: &C) -> Result<String> where C: Serialize {
    Ok( ron::ser::to_string_pretty( config, PrettyConfig::default())? )
}
