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

//! scene fetcher: download the product bundle of a scene as `{dir}/{display_id}.tar` and extract it into
//! `{dir}/{display_id}/`. Download and extraction failures are reported as distinct errors. There is no retry,
//! a bundle that is still being prepared is reported as `DownloadNotReady`

use std::{fs::{self,File}, path::{Path,PathBuf}};
use regex::RegexBuilder;
use tracing::{info,debug,warn};

use eo_common::{fs::{ensure_writable_dir, is_non_empty_file, find_file_matching}, net::download_url, outcome::Outcome};
use crate::config::Credentials;
use crate::locator::SceneRecord;
use crate::m2m::{M2mClient, DownloadOption};
use crate::errors::{Result, LandsatError, download_error, extract_error};

/// where a fetched scene ended up
#[derive(Debug,Clone,PartialEq)]
pub struct FetchedScene {
    pub display_id: String,
    pub archive: PathBuf,
    pub scene_dir: PathBuf,
    /// false if we re-used an already downloaded archive
    pub downloaded: bool,
}

pub fn archive_path (dir: impl AsRef<Path>, display_id: &str)->PathBuf {
    dir.as_ref().join( format!("{display_id}.tar"))
}

pub fn scene_dir (dir: impl AsRef<Path>, display_id: &str)->PathBuf {
    dir.as_ref().join( display_id)
}

pub fn download_label (display_id: &str)->String {
    format!("download_{display_id}")
}

/// we prefer the full product bundle, otherwise take whatever is available first
pub fn select_product (options: &[DownloadOption])->Option<&DownloadOption> {
    options.iter()
        .filter( |o| o.available)
        .find( |o| o.product_name.as_deref().map( |n| n.contains("Bundle")).unwrap_or(false))
        .or_else( || options.iter().find( |o| o.available))
}

/// obtain a download URL for the scene product. Needs a logged in client
pub async fn request_download_url (client: &M2mClient, dataset: &str, entity_id: &str, display_id: &str)->Result<String> {
    let options = client.download_options( dataset, entity_id).await?;
    let product = select_product( &options).ok_or_else( || download_error( format!("no available product for {display_id}")))?;
    debug!("requesting product {:?} for {}", product.product_name, display_id);

    let label = download_label( display_id);
    let req = client.download_request( entity_id, &product.product_id(), &label).await?;

    if let Some(url) = req.available_downloads.iter().find_map( |d| d.url.clone()) {
        return Ok(url)
    }

    if !req.preparing_downloads.is_empty() {
        // one more look, the request might have been served in the meantime
        let ret = client.download_retrieve( &label).await?;
        if let Some(url) = ret.available.iter().find_map( |d| d.url.clone()) {
            return Ok(url)
        }
        return Err( LandsatError::DownloadNotReady( format!("{display_id} is still being prepared")))
    }

    Err( download_error( format!("no download URL for {display_id}")))
}

/// unpack a tar archive into dir, returning the number of extracted entries.
/// Entries that would end up outside of dir are skipped
pub fn extract_archive (archive: impl AsRef<Path>, dir: impl AsRef<Path>)->Result<usize> {
    let archive = archive.as_ref();
    let dir = dir.as_ref();

    let file = File::open( archive).map_err( |e| extract_error( format!("cannot open {archive:?}: {e}")))?;
    fs::create_dir_all( dir).map_err( |e| extract_error( format!("cannot create {dir:?}: {e}")))?;

    let mut tar = tar::Archive::new( file);
    let entries = tar.entries().map_err( |e| extract_error( format!("{archive:?}: {e}")))?;

    let mut n = 0;
    for entry in entries {
        let mut entry = entry.map_err( |e| extract_error( format!("{archive:?}: {e}")))?;
        let unpacked = entry.unpack_in( dir).map_err( |e| extract_error( format!("{archive:?}: {e}")))?;
        if unpacked {
            n += 1;
        } else {
            warn!("skipping archive entry outside of {dir:?}");
        }
    }

    if n == 0 {
        return Err( extract_error( format!("no entries in {archive:?}")))
    }
    info!("extracted {} entries from {:?}", n, archive);
    Ok(n)
}

/// download and extract a scene with a logged in client. An existing non-empty archive is not downloaded again
pub async fn fetch_scene (client: &M2mClient, dataset: &str, entity_id: &str, display_id: &str, dir: impl AsRef<Path>)->Result<FetchedScene> {
    let dir = dir.as_ref();
    ensure_writable_dir( dir).map_err( |e| download_error( format!("download dir {dir:?}: {e}")))?;

    let archive = archive_path( dir, display_id);
    let mut downloaded = false;

    if is_non_empty_file( &archive) {
        info!("using existing archive {:?}", archive);
    } else {
        let url = request_download_url( client, dataset, entity_id, display_id).await?;
        info!("downloading {} to {:?}", display_id, archive);

        match download_url( client.http_client(), &url, None, &archive).await {
            Ok(len) => info!("downloaded {} bytes", len),
            Err(e) => {
                let _ = fs::remove_file( &archive); // don't leave partial archives around
                return Err( download_error( format!("{display_id}: {e}")))
            }
        }
        downloaded = true;
    }

    let scene_dir = scene_dir( dir, display_id);
    extract_archive( &archive, &scene_dir)?;

    Ok( FetchedScene { display_id: display_id.to_string(), archive, scene_dir, downloaded })
}

/// the fetch stage: login, resolve the entity id if we only have a display id, download, extract and logout
pub async fn fetch_stage (client: &mut M2mClient, creds: &Credentials, dataset: &str, scene: &SceneRecord, dir: &Path)->Outcome<FetchedScene,LandsatError> {
    if let Err(e) = client.login( creds).await {
        return Outcome::Failed(e)
    }

    let res = fetch_logged_in( client, dataset, scene, dir).await;
    client.close().await;

    match res {
        Ok(Some(fetched)) => Outcome::Completed(fetched),
        Ok(None) => Outcome::Empty( format!("no scene with id {}", scene.display_id)),
        Err(e) => Outcome::Failed(e)
    }
}

async fn fetch_logged_in (client: &M2mClient, dataset: &str, scene: &SceneRecord, dir: &Path)->Result<Option<FetchedScene>> {
    let entity_id = if scene.entity_id.is_empty() {
        client.entity_id_for( dataset, &scene.display_id).await?
    } else {
        Some( scene.entity_id.clone())
    };

    if let Some(entity_id) = entity_id {
        Ok( Some( fetch_scene( client, dataset, &entity_id, &scene.display_id, dir).await?))
    } else {
        Ok(None)
    }
}

/// find the file for a given band (e.g. "ST_B10") within an extracted scene directory
pub fn find_band_file (scene_dir: impl AsRef<Path>, band: &str)->Result<PathBuf> {
    let scene_dir = scene_dir.as_ref();
    let re = RegexBuilder::new( &format!(r"_{}\.tiff?$", regex::escape(band)))
        .case_insensitive(true)
        .build()
        .map_err( |e| LandsatError::BandNotFound( format!("invalid band name {band}: {e}")))?;

    find_file_matching( &scene_dir, &re)?
        .ok_or_else( || LandsatError::BandNotFound( format!("{band} in {scene_dir:?}")))
}
