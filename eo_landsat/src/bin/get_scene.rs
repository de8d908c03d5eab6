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
#![allow(unused)]

use std::path::PathBuf;
use anyhow::Result;

use eo_common::{define_cli, check_cli, init_logging, outcome::Outcome, config::load_config_path};
use eo_landsat::{HeatMapConfig, resolve_credentials, m2m::M2mClient, fetcher::fetch_stage, locator::SceneRecord};

define_cli! { ARGS [about="get_scene - download and extract a Landsat scene bundle"] =
    config: Option<PathBuf>   [help="RON heat map config (for API url, dataset and credentials)", short, long],
    entity_id: Option<String> [help="catalog entity id of scene (looked up from display id if not set)", long],
    dir: PathBuf              [help="download directory", long, default_value="LandsatDownloader"],
    display_id: String        [help="display id (product identifier) of scene"]
}

#[tokio::main(flavor="current_thread")]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let config: HeatMapConfig = if let Some(path) = &ARGS.config { load_config_path( path)? } else { HeatMapConfig::default() };
    let creds = resolve_credentials( config.credentials.as_ref())?;
    let mut client = M2mClient::new( &config.api_url);

    let scene = SceneRecord {
        entity_id: ARGS.entity_id.clone().unwrap_or_default(),
        display_id: ARGS.display_id.clone(),
        wrs_path: None, wrs_row: None, satellite: None, cloud_cover: None,
        acquisition_date: Default::default()
    };

    match fetch_stage( &mut client, &creds, &config.search.dataset, &scene, &ARGS.dir).await {
        Outcome::Completed(fetched) => {
            println!("archive: {}", fetched.archive.display());
            println!("scene:   {}", fetched.scene_dir.display());
        }
        Outcome::Empty(reason) => println!("nothing to download: {reason}"),
        Outcome::Failed(e) => eprintln!("download failed: {e}"),
    }
    Ok(())
}
