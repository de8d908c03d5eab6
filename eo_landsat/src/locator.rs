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

//! scene locator: catalog query for scenes covering a location within a date range and below a cloud cover
//! threshold. Results are sorted most recent first

use std::fmt;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info,warn,error};

use eo_common::{datetime::{Dated, parse_date_prefix, sort_newest_first, newest, naive_date_to_utc}, outcome::Outcome};
use crate::config::{Credentials, SceneSearchConfig};
use crate::m2m::{M2mClient, SceneResult, SceneSearchData, scene_search_payload, value_to_string};
use crate::errors::{Result, LandsatError};

/// the catalog information we keep for a scene
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct SceneRecord {
    pub entity_id: String,
    pub display_id: String,
    pub wrs_path: Option<u32>,
    pub wrs_row: Option<u32>,
    pub satellite: Option<String>,
    pub cloud_cover: Option<f64>,
    pub acquisition_date: NaiveDate,
}

impl Dated for SceneRecord {
    fn date (&self)->DateTime<Utc> { naive_date_to_utc( &self.acquisition_date) }
}

impl fmt::Display for SceneRecord {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "{:<42} {:>4} {:>4} {:>10} {:>6} {}",
            self.display_id,
            opt_str( &self.wrs_path),
            opt_str( &self.wrs_row),
            self.satellite.as_deref().unwrap_or("-"),
            self.cloud_cover.map( |c| format!("{c:.2}")).unwrap_or("-".into()),
            self.acquisition_date)
    }
}

fn opt_str<T: ToString> (v: &Option<T>)->String {
    v.as_ref().map( |v| v.to_string()).unwrap_or("-".into())
}

pub fn scene_table_header ()->String {
    format!("{:<42} {:>4} {:>4} {:>10} {:>6} {}", "display_id", "path", "row", "satellite", "cloud", "acquisition_date")
}

/// metadata field names differ between datasets and API versions, we compare only lowercase alphanumerics
fn normalized_name (s: &str)->String {
    s.chars().filter( |c| c.is_ascii_alphanumeric()).map( |c| c.to_ascii_lowercase()).collect()
}

fn metadata_value<'a> (scene: &'a SceneResult, names: &[&str])->Option<&'a Value> {
    scene.metadata.iter()
        .find( |f| { let n = normalized_name( &f.field_name); names.iter().any( |name| *name == n) })
        .and_then( |f| f.value.as_ref())
}

fn value_to_f64 (v: &Value)->Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None
    }
}

fn value_to_u32 (v: &Value)->Option<u32> {
    value_to_f64(v).filter( |x| *x >= 0.0).map( |x| x as u32)
}

/// dates can come as "2023-06-15", "2023/06/15" or with trailing time specs
pub fn parse_catalog_date (s: &str)->Option<NaiveDate> {
    parse_date_prefix( &s.trim().replace('/', "-"))
}

impl SceneRecord {
    /// None if the result has no acquisition date we can parse
    pub fn from_result (scene: &SceneResult)->Option<SceneRecord> {
        let acquisition_date = metadata_value( scene, &["dateacquired", "acquisitiondate"])
            .map( value_to_string)
            .and_then( |s| parse_catalog_date(&s))
            .or_else( || scene.temporal_coverage.as_ref()
                .and_then( |tc| tc.start_date.as_deref())
                .and_then( parse_catalog_date))?;

        let cloud_cover = scene.cloud_cover.as_ref().and_then( value_to_f64)
            .or_else( || metadata_value( scene, &["scenecloudcoverl1", "cloudcover"]).and_then( value_to_f64));

        Some( SceneRecord {
            entity_id: scene.entity_id.clone(),
            display_id: scene.display_id.clone(),
            wrs_path: metadata_value( scene, &["wrspath"]).and_then( value_to_u32),
            wrs_row: metadata_value( scene, &["wrsrow"]).and_then( value_to_u32),
            satellite: metadata_value( scene, &["satellite", "spacecraftidentifier"]).map( value_to_string).map( |s| s.trim().to_string()),
            cloud_cover,
            acquisition_date
        })
    }
}

/// turn search results into scene records, most recent first. Results without acquisition date are skipped
pub fn scene_records (data: &SceneSearchData)->Vec<SceneRecord> {
    let mut scenes: Vec<SceneRecord> = Vec::with_capacity( data.results.len());
    for r in &data.results {
        if let Some(rec) = SceneRecord::from_result(r) {
            scenes.push(rec)
        } else {
            warn!("ignoring scene {} without acquisition date", r.display_id);
        }
    }
    sort_newest_first( &mut scenes);
    scenes
}

pub fn parse_scene_search (json: &str)->Result<Vec<SceneRecord>> {
    let data: SceneSearchData = serde_json::from_str(json)?;
    Ok( scene_records( &data))
}

/// the scene with the latest acquisition date
pub fn select_most_recent (scenes: &[SceneRecord])->Option<&SceneRecord> {
    newest( scenes)
}

pub fn search_payload (search: &SceneSearchConfig)->Value {
    let (ll,ur) = search.location.mbr();
    scene_search_payload( 
        &search.dataset, ll, ur, 
        &search.start_date.format("%Y-%m-%d").to_string(), 
        &search.end_date.format("%Y-%m-%d").to_string(), 
        search.max_cloud_cover, search.max_results
    )
}

/// query scenes with an already logged in client
pub async fn search_scenes (client: &M2mClient, search: &SceneSearchConfig)->Result<Vec<SceneRecord>> {
    search.check()?;
    let data = client.scene_search( &search_payload(search)).await?;
    info!("scene search returned {} of {} hits", data.results.len(), data.total_hits.unwrap_or(0));
    Ok( scene_records( &data))
}

/// the locator stage: login, search and logout. Authentication and network failures as well as empty results
/// are reported as outcomes, not propagated
pub async fn locate_scenes (client: &mut M2mClient, creds: &Credentials, search: &SceneSearchConfig)->Outcome<Vec<SceneRecord>,LandsatError> {
    if let Err(e) = search.check() {
        return Outcome::Failed(e)
    }
    if let Err(e) = client.login( creds).await {
        error!("catalog login failed: {e}");
        return Outcome::Failed(e)
    }

    let res = search_scenes( client, search).await;
    client.close().await;

    match res {
        Ok(scenes) if scenes.is_empty() => {
            let msg = format!("no {} scenes between {} and {} with cloud cover <= {}%", 
                search.dataset, search.start_date, search.end_date, search.max_cloud_cover);
            warn!("{msg}");
            Outcome::Empty(msg)
        }
        Ok(scenes) => Outcome::Completed(scenes),
        Err(e) => {
            error!("scene search failed: {e}");
            Outcome::Failed(e)
        }
    }
}
