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

use eo_common::{define_cli, check_cli, init_logging, outcome::Outcome, config::load_config_path};
use eo_image::render::hex_string;
use eo_landsat::{HeatMapConfig, run_heat_map, process_scene};

define_cli! { ARGS [about="lst_pipeline - find the most recent Landsat scene and render its land surface temperature heat map"] =
    scene_dir: Option<PathBuf> [help="process an already extracted scene directory instead of searching and downloading", long],
    config: PathBuf            [help="RON heat map config"]
}

#[tokio::main(flavor="current_thread")]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let config: HeatMapConfig = load_config_path( &ARGS.config)?;

    let outcome = if let Some(dir) = &ARGS.scene_dir {
        let display_id = dir.file_name().and_then( |s| s.to_str()).ok_or_else( || anyhow!("invalid scene dir {dir:?}"))?;
        Outcome::from( process_scene( dir, display_id, &config))
    } else {
        run_heat_map( &config).await
    };

    match outcome {
        Outcome::Completed(products) => {
            println!("scene:  {}", products.display_id);
            if let Some(pct) = products.aoi_cloud_pct { println!("clouds: {:.1}%", pct) }
            println!("LST:    {}", products.lst.display());
            if let Some(clipped) = &products.clipped { println!("clip:   {}", clipped.display()) }
            println!("image:  {}", products.image.display());
            for (color,label) in &products.legend { println!("  {}  {}", hex_string(color), label) }
        }
        Outcome::Empty(reason) => println!("no heat map produced: {reason}"),
        Outcome::Failed(e) => eprintln!("heat map pipeline failed: {e}"),
    }
    Ok(())
}
