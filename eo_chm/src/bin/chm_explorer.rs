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

use eo_common::{define_cli, check_cli, init_logging, config::load_config_path};
use eo_chm::{ChmConfig, ObjectDownload, run_explorer};

define_cli! { ARGS [about="chm_explorer - explore the public canopy height model bucket (anonymous, read-only)"] =
    tree: Vec<String>         [help="print prefix tree below given prefix (repeatable)", long],
    list: Option<String>      [help="list first objects below given prefix", long],
    max_keys: Option<i32>     [help="max number of listed objects", long],
    search: Option<String>    [help="search all objects below given prefix for suffix", long],
    suffix: Option<String>    [help="key suffix to search for (case insensitive)", long],
    key: Option<String>       [help="object key to download", long],
    output: Option<PathBuf>   [help="local file for downloaded object (default is the key's file name)", short, long],
    config: Option<PathBuf>   [help="RON explorer config"]
}

#[tokio::main(flavor="current_thread")]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_logging();

    let mut config: ChmConfig = if let Some(path) = &ARGS.config { load_config_path( path)? } else { ChmConfig::default() };

    config.tree_prefixes.extend( ARGS.tree.iter().cloned());
    if ARGS.list.is_some() { config.list_prefix = ARGS.list.clone() }
    if let Some(n) = ARGS.max_keys { config.max_keys = n }
    if ARGS.search.is_some() { config.search_prefix = ARGS.search.clone() }
    if let Some(suffix) = &ARGS.suffix { config.suffix = suffix.clone() }
    if let Some(key) = &ARGS.key {
        let path = ARGS.output.clone().unwrap_or_else( || PathBuf::from( key.rsplit('/').next().unwrap_or(key)));
        config.downloads.push( ObjectDownload{ key: key.clone(), path });
    }

    let n_failed = run_explorer( &config).await?;
    if n_failed > 0 {
        eprintln!("{n_failed} operations failed");
    }
    Ok(())
}
