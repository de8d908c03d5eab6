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

//! the heat map pipeline: a thin sequential composition of the independent stages. Each stage reports an
//! `Outcome`, the pipeline stops at the first stage that does not complete

use std::path::{Path,PathBuf};
use ndarray::Array2;
use image::Rgb;
use tracing::{info,warn};

use eo_common::{fs::ensure_writable_dir, outcome::Outcome};
use eo_gdal::{clip::clip_path_to_bbox, raster::{Raster, read_raster_path}};
use eo_image::render_to_png;
use crate::config::{HeatMapConfig, resolve_credentials};
use crate::m2m::M2mClient;
use crate::locator::{SceneRecord, locate_scenes, select_most_recent};
use crate::fetcher::{FetchedScene, fetch_stage, find_band_file};
use crate::lst::derive_lst;
use crate::qa::{aoi_cloud_pct, check_cloud_pct};
use crate::errors::{Result, LandsatError};

/// files produced for a scene
#[derive(Debug,Clone)]
pub struct HeatMapProducts {
    pub display_id: String,
    /// QA_PIXEL cloud percentage within the clip area, if a limit was configured
    pub aoi_cloud_pct: Option<f64>,
    pub lst: PathBuf,
    pub clipped: Option<PathBuf>,
    pub image: PathBuf,
    pub legend: Vec<(Rgb<u8>,String)>,
}

pub fn lst_path (output_dir: &Path, display_id: &str)->PathBuf { output_dir.join( format!("{display_id}_LST.tif")) }
pub fn clipped_path (output_dir: &Path, display_id: &str)->PathBuf { output_dir.join( format!("{display_id}_LST_clip.tif")) }
pub fn image_path (output_dir: &Path, display_id: &str)->PathBuf { output_dir.join( format!("{display_id}_LST.png")) }

/// the local part of the pipeline, for an already extracted scene: derive LST, clip if configured and render
pub fn process_scene (scene_dir: &Path, display_id: &str, config: &HeatMapConfig)->Result<HeatMapProducts> {
    let output_dir = config.output_dir.as_path();
    ensure_writable_dir( output_dir)?;

    let cloud_pct = if let Some(max_pct) = config.max_aoi_cloud_pct {
        let pct = aoi_cloud_pct( scene_dir, config.clip.as_ref())?;
        check_cloud_pct( display_id, pct, max_pct)?;
        Some(pct)
    } else {
        None
    };

    let band_file = find_band_file( scene_dir, &config.band)?;
    info!("using thermal band {:?}", band_file);

    let lst = lst_path( output_dir, display_id);
    derive_lst( &band_file, &lst, &config.calibration)?;

    let clipped = if let Some(bbox) = &config.clip {
        let path = clipped_path( output_dir, display_id);
        let ci = clip_path_to_bbox( &lst, bbox, &path)?;
        info!("clipped LST to {}x{} pixels", ci.window.width, ci.window.height);
        Some(path)
    } else {
        None
    };

    let render_src = clipped.as_ref().unwrap_or( &lst);
    let raster: Raster<f64> = read_raster_path( render_src, 1)?;
    let image = image_path( output_dir, display_id);
    let legend = render_to_png( &raster.data, raster.meta.no_data, &config.render, &image)?;

    Ok( HeatMapProducts { display_id: display_id.to_string(), aoi_cloud_pct: cloud_pct, lst, clipped, image, legend })
}

/// run all stages: locate, select the most recent scene, fetch, derive, clip and render
pub async fn run_heat_map (config: &HeatMapConfig)->Outcome<HeatMapProducts,LandsatError> {
    let creds = match resolve_credentials( config.credentials.as_ref()) {
        Ok(creds) => creds,
        Err(e) => return Outcome::Failed(e)
    };
    let mut client = M2mClient::new( &config.api_url);

    let scenes = match locate_scenes( &mut client, &creds, &config.search).await.logged("scene search") {
        Outcome::Completed(scenes) => scenes,
        Outcome::Empty(reason) => return Outcome::Empty(reason),
        Outcome::Failed(e) => return Outcome::Failed(e),
    };

    let Some(scene) = select_most_recent( &scenes) else {
        return Outcome::Empty("no scene to select".into())
    };
    info!("selected scene {} acquired {}", scene.display_id, scene.acquisition_date);

    fetch_stage( &mut client, &creds, &config.search.dataset, scene, &config.download_dir).await
        .logged("scene fetch")
        .and_then( |fetched: FetchedScene| {
            let outcome = match process_scene( &fetched.scene_dir, &fetched.display_id, config) {
                Err(LandsatError::TooCloudy(msg)) => Outcome::Empty(msg),
                res => Outcome::from( res)
            };
            outcome.logged("scene processing")
        })
}
