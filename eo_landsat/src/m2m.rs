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

//! client for the USGS Machine-to-Machine (M2M) JSON API. Each request is a POST with a JSON payload
//! that returns an envelope with `data` and optional `errorCode`/`errorMessage` fields. Authenticated
//! requests carry the API key returned by login in a `X-Auth-Token` header

use reqwest::{Client, header::HeaderMap};
use serde::{Serialize,Deserialize,de::DeserializeOwned};
use serde_json::{json, Value};
use tracing::{debug,info,warn};

use eo_common::net::{NetError, post_json_query, get_headermap};
use crate::config::Credentials;
use crate::errors::{Result, LandsatError};

pub const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Deserialize,Debug)]
#[serde(rename_all="camelCase")]
pub struct M2mResponse<T> {
    pub data: Option<T>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl<T> M2mResponse<T> {
    /// the error reported by the envelope, if any. AUTH_* error codes are authentication errors
    pub fn error (&self, endpoint: &str)->Option<LandsatError> {
        self.error_code.as_ref().map( |code| {
            let msg = self.error_message.as_deref().unwrap_or_default();
            if code.starts_with("AUTH_") {
                LandsatError::AuthError( format!("{code}: {msg}"))
            } else {
                LandsatError::ApiError( code.clone(), format!("{endpoint}: {msg}"))
            }
        })
    }

    pub fn into_result (self, endpoint: &str)->Result<Option<T>> {
        match self.error( endpoint) {
            Some(e) => Err(e),
            None => Ok( self.data)
        }
    }
}

/// map the body of a non-200 response to an error. The server still sends the JSON envelope for most
/// failures (e.g. AUTH_INVALID with a 401), in which case its error code takes precedence over the status
pub fn error_response (endpoint: &str, status: u16, body: String)->LandsatError {
    match serde_json::from_str::<M2mResponse<Value>>( &body) {
        Ok(envelope) => envelope.error( endpoint).unwrap_or_else( || LandsatError::NetError( NetError::ErrorResponse( status, body))),
        Err(_) => LandsatError::NetError( NetError::ErrorResponse( status, body))
    }
}

/* #region response data types ***********************************************************************************/

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all="camelCase")]
pub struct SceneSearchData {
    #[serde(default)]
    pub results: Vec<SceneResult>,
    pub records_returned: Option<u64>,
    pub total_hits: Option<u64>,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all="camelCase")]
pub struct SceneResult {
    pub entity_id: String,
    pub display_id: String,
    pub cloud_cover: Option<Value>,
    pub temporal_coverage: Option<TemporalCoverage>,
    #[serde(default)]
    pub metadata: Vec<MetadataField>,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all="camelCase")]
pub struct TemporalCoverage {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all="camelCase")]
pub struct MetadataField {
    pub field_name: String,
    pub value: Option<Value>,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all="camelCase")]
pub struct DownloadOption {
    pub id: Value,
    pub entity_id: String,
    pub product_name: Option<String>,
    #[serde(default)]
    pub available: bool,
}

impl DownloadOption {
    pub fn product_id (&self)->String {
        value_to_string( &self.id)
    }
}

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all="camelCase")]
pub struct DownloadUrl {
    pub url: Option<String>,
    pub entity_id: Option<String>,
    pub display_id: Option<String>,
}

#[derive(Deserialize,Debug,Clone,Default)]
#[serde(rename_all="camelCase")]
pub struct DownloadRequestData {
    #[serde(default)]
    pub available_downloads: Vec<DownloadUrl>,
    #[serde(default)]
    pub preparing_downloads: Vec<DownloadUrl>,
}

#[derive(Deserialize,Debug,Clone,Default)]
#[serde(rename_all="camelCase")]
pub struct DownloadRetrieveData {
    #[serde(default)]
    pub available: Vec<DownloadUrl>,
    #[serde(default)]
    pub requested: Vec<DownloadUrl>,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all="camelCase")]
pub struct SceneListEntry {
    pub entity_id: String,
}

/// string content of a JSON value, without quotes for strings
pub fn value_to_string (v: &Value)->String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string()
    }
}

/* #endregion response data types */

pub struct M2mClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl M2mClient {
    pub fn new (base_url: &str)->Self {
        let base_url = if base_url.ends_with('/') { base_url.to_string() } else { format!("{base_url}/") };
        M2mClient { client: Client::new(), base_url, api_key: None }
    }

    pub fn http_client (&self)->&Client { &self.client }

    pub fn is_logged_in (&self)->bool { self.api_key.is_some() }

    fn auth_headers (&self)->Result<Option<HeaderMap>> {
        if let Some(key) = &self.api_key {
            Ok( Some( get_headermap( &[(AUTH_HEADER, key.as_str())])?))
        } else {
            Ok(None)
        }
    }

    async fn request<T,U> (&self, endpoint: &str, payload: &T)->Result<Option<U>> where T: Serialize, U: DeserializeOwned {
        let url = format!("{}{}", self.base_url, endpoint);
        let headers = self.auth_headers()?;
        debug!("M2M request {}", endpoint);

        match post_json_query::<T,M2mResponse<U>>( &self.client, &url, headers.as_ref(), payload).await {
            Ok(response) => response.into_result( endpoint),
            Err(NetError::ErrorResponse(status,body)) => Err( error_response( endpoint, status, body)),
            Err(e) => Err( e.into())
        }
    }

    pub async fn login (&mut self, creds: &Credentials)->Result<()> {
        let (endpoint, payload) = match creds {
            Credentials::Password{username,password} => ("login", json!({"username": username, "password": password})),
            Credentials::Token{username,token} => ("login-token", json!({"username": username, "token": token})),
        };

        let api_key: Option<String> = self.request( endpoint, &payload).await.map_err( |e| match e {
            LandsatError::ApiError(code,msg) => LandsatError::AuthError( format!("{code}: {msg}")),
            other => other
        })?;

        if let Some(key) = api_key {
            info!("logged in to M2M as {}", creds.username());
            self.api_key = Some(key);
            Ok(())
        } else {
            Err( LandsatError::AuthError("no API key returned".into()))
        }
    }

    /// end the session. This is a no-op if we are not logged in
    pub async fn logout (&mut self)->Result<()> {
        if self.is_logged_in() {
            let res: Result<Option<Value>> = self.request( "logout", &json!({})).await;
            self.api_key = None;
            res?;
            debug!("logged out of M2M");
        }
        Ok(())
    }

    /// logout that only logs failures, to be used on paths that already have a result
    pub async fn close (&mut self) {
        if let Err(e) = self.logout().await {
            warn!("M2M logout failed: {e}");
        }
    }

    pub async fn scene_search (&self, payload: &Value)->Result<SceneSearchData> {
        let data: Option<SceneSearchData> = self.request( "scene-search", payload).await?;
        Ok( data.unwrap_or( SceneSearchData{ results: Vec::new(), records_returned: Some(0), total_hits: Some(0) }))
    }

    /// look up the entity id of a scene with a known display id (product identifier)
    pub async fn entity_id_for (&self, dataset: &str, display_id: &str)->Result<Option<String>> {
        let list_id = format!("lookup_{}", display_id);
        let add_payload = json!({
            "listId": list_id,
            "datasetName": dataset,
            "idField": "displayId",
            "entityId": display_id
        });
        let _: Option<Value> = self.request( "scene-list-add", &add_payload).await?;

        let get_payload = json!({ "listId": list_id, "datasetName": dataset });
        let res: Result<Option<Vec<SceneListEntry>>> = self.request( "scene-list-get", &get_payload).await;

        let removed: Result<Option<Value>> = self.request( "scene-list-remove", &json!({ "listId": list_id })).await;
        if let Err(e) = removed {
            warn!("failed to remove scene list {list_id}: {e}");
        }
        Ok( res?.and_then( |list| list.into_iter().next()).map( |e| e.entity_id))
    }

    pub async fn download_options (&self, dataset: &str, entity_id: &str)->Result<Vec<DownloadOption>> {
        let payload = json!({ "datasetName": dataset, "entityIds": [entity_id] });
        let data: Option<Vec<DownloadOption>> = self.request( "download-options", &payload).await?;
        Ok( data.unwrap_or_default())
    }

    pub async fn download_request (&self, entity_id: &str, product_id: &str, label: &str)->Result<DownloadRequestData> {
        let payload = json!({
            "downloads": [ { "entityId": entity_id, "productId": product_id } ],
            "label": label
        });
        let data: Option<DownloadRequestData> = self.request( "download-request", &payload).await?;
        Ok( data.unwrap_or_default())
    }

    pub async fn download_retrieve (&self, label: &str)->Result<DownloadRetrieveData> {
        let data: Option<DownloadRetrieveData> = self.request( "download-retrieve", &json!({ "label": label })).await?;
        Ok( data.unwrap_or_default())
    }
}

/// the scene-search request payload
pub fn scene_search_payload (dataset: &str, ll: (f64,f64), ur: (f64,f64), start: &str, end: &str, max_cloud_cover: u8, max_results: u32)->Value {
    json!({
        "datasetName": dataset,
        "maxResults": max_results,
        "metadataType": "full",
        "sceneFilter": {
            "spatialFilter": {
                "filterType": "mbr",
                "lowerLeft": { "latitude": ll.1, "longitude": ll.0 },
                "upperRight": { "latitude": ur.1, "longitude": ur.0 }
            },
            "acquisitionFilter": { "start": start, "end": end },
            "cloudCoverFilter": { "min": 0, "max": max_cloud_cover, "includeUnknown": false }
        }
    })
}
