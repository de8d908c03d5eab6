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

//! common utility functions for network operations

use std::{fs::File, io::Write, path::Path};
use reqwest::{header::{HeaderMap,HeaderName,HeaderValue,CONTENT_TYPE}, Client, StatusCode};
use serde::{Serialize,de::DeserializeOwned};
use tracing::debug;

use crate::define_error;

define_error!{ pub NetError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    UnauthorizedError(String) : "not authorized {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    ErrorResponse(u16, String) : "error response status {0}: {1}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// turn a list of "key: value" strings into a HeaderMap
pub fn get_headermap (headers: &[(&str,&str)]) -> Result<HeaderMap> {
    let mut hm = HeaderMap::new();
    for (k,v) in headers {
        hm.append( 
            HeaderName::from_bytes( k.as_bytes()).map_err(|e| NetError::OpFailed(e.to_string()))?, 
            HeaderValue::from_str(v).map_err(|e| NetError::OpFailed(e.to_string()))?
        );
    }
    Ok(hm)
}

/// POST a JSON request and parse the JSON response. Only 200 responses are parsed. Non-200 responses with a body
/// are returned as `ErrorResponse` so that callers can parse service specific error payloads
pub async fn post_json_query<T,U> (client: &Client, url: &str, opt_headers: Option<&HeaderMap>, data: &T) -> Result<U> 
    where T: Serialize, U: DeserializeOwned 
{
    let mut headers = opt_headers.cloned().unwrap_or_default();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let response = client.post( url).headers( headers).json( data).send().await?;

    match response.status() {
        StatusCode::OK => {
            Ok( response.json().await? )
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            if body.trim().is_empty() {
                Err( status_error( url, status))
            } else {
                debug!("{} response from {}: {}", status, url, body);
                Err( NetError::ErrorResponse( status.as_u16(), body))
            }
        }
    }
}

fn status_error (url: &str, status: StatusCode)->NetError {
    match status {
        StatusCode::NOT_FOUND => NetError::NotFoundError(format!("{url}")),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NetError::UnauthorizedError(format!("{url}")),
        other => NetError::OpFailed(format!("response status {other:?}"))
    }
}

/// download URL into the given file path. Retrieve in chunks to support large files.
/// Returns number of bytes written
pub async fn download_url (client: &Client, url: &str, opt_headers: Option<&HeaderMap>, path: impl AsRef<Path>) -> Result<u64> {
    let mut req = client.get(url);
    if let Some(headermap) = opt_headers {
        req = req.headers(headermap.clone())
    }
    
    let mut response = req.send().await?;

    match response.status() {
        StatusCode::OK => {
            let path = path.as_ref();
            let mut file = File::create(path)?;
            let mut len: u64 = 0;

            while let Some(chunk) = response.chunk().await? {
                len += chunk.len() as u64;
                file.write_all(&chunk)?;
            }

            file.flush()?;
            debug!("downloaded {} bytes from {} to {:?}", len, url, path);
            Ok(len)
        }
        status => {
            Err( status_error( url, status))
        }
    }
}
