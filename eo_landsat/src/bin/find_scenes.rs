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
use anyhow::{anyhow,Result};

use eo_common::{define_cli, check_cli, init_logging, outcome::Outcome, config::load_config_path, datetime::parse_ymd};
use eo_landsat::{HeatMapConfig, SearchLocation, locate_scenes, resolve_credentials, m2m::M2mClient, locator::scene_table_header};

define_cli! { ARGS [about="find_scenes - list Landsat scenes for a location, date range and max cloud cover"] =
    config: Option<PathBuf> [help="RON heat map config with search parameters", short, long],
    lon: Option<f64>        [help="longitude of search point in degrees", long, allow_negative_numbers=true],
    lat: Option<f64>        [help="latitude of search point in degrees", long, allow_negative_numbers=true],
    start: Option<String>   [help="start date (YYYY-MM-DD)", long],
    end: Option<String>     [help="end date (YYYY-MM-DD)", long],
    cloud: Option<u8>       [help="max cloud cover in percent", long]
}

#[tokio::main(flavor="current_thread")]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let mut config: HeatMapConfig = if let Some(path) = &ARGS.config { load_config_path( path)? } else { HeatMapConfig::default() };
    let search = &mut config.search;

    match (ARGS.lon, ARGS.lat) {
        (Some(lon),Some(lat)) => search.location = SearchLocation::Point{lon,lat},
        (None,None) => {}
        _ => return Err( anyhow!("lon and lat have to be specified together"))
    }
    if let Some(s) = &ARGS.start { search.start_date = parse_ymd(s)? }
    if let Some(s) = &ARGS.end { search.end_date = parse_ymd(s)? }
    if let Some(cc) = ARGS.cloud { search.max_cloud_cover = cc }

    let creds = resolve_credentials( config.credentials.as_ref())?;
    let mut client = M2mClient::new( &config.api_url);

    match locate_scenes( &mut client, &creds, &config.search).await {
        Outcome::Completed(scenes) => {
            println!("{}", scene_table_header());
            for scene in &scenes { println!("{scene}") }
            println!("{} scenes found", scenes.len());
        }
        Outcome::Empty(reason) => println!("no scenes found: {reason}"),
        Outcome::Failed(e) => eprintln!("scene search failed: {e}"),
    }
    Ok(())
}
