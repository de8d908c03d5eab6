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

//! read-only explorer for the public canopy height model (CHM) bucket: prefix trees, object listings,
//! suffix searches and single object downloads

pub mod errors;

use std::path::PathBuf;
use serde::{Serialize,Deserialize};
use tracing::info;

use eo_common::{outcome::Outcome, fs::ensure_writable_dir};
use eo_common::s3::{S3Client, S3ObjectInfo, S3Prefix, create_s3_client, get_prefix_tree, list_objects, find_objects, download_s3_object};
use crate::errors::{Result, ChmError, op_failed};

pub const CHM_BUCKET: &str = "dataforgood-fb-data";
pub const CHM_REGION: &str = "us-east-1";
pub const TREE_INDENT: &str = "    ";

/// an object to download and the local file to store it in
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct ObjectDownload {
    pub key: String,
    pub path: PathBuf,
}

/// what to explore. Each of the operations is skipped if it has no prefix or download
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct ChmConfig {
    pub bucket: String,
    pub region: String,
    /// roots of prefix ("folder") trees to print
    pub tree_prefixes: Vec<String>,
    /// prefix to list the first `max_keys` objects of
    pub list_prefix: Option<String>,
    pub max_keys: i32,
    /// prefix to search for keys with `suffix`
    pub search_prefix: Option<String>,
    pub suffix: String,
    pub downloads: Vec<ObjectDownload>,
}

impl Default for ChmConfig {
    fn default()->Self {
        ChmConfig {
            bucket: CHM_BUCKET.to_string(),
            region: CHM_REGION.to_string(),
            tree_prefixes: Vec::new(),
            list_prefix: None,
            max_keys: 100,
            search_prefix: None,
            suffix: ".geojson".to_string(),
            downloads: Vec::new(),
        }
    }
}

/// case insensitive key suffix match
pub fn matches_suffix (key: &str, suffix: &str)->bool {
    key.to_lowercase().ends_with( &suffix.to_lowercase())
}

pub fn format_tree (tree: &[S3Prefix])->Vec<String> {
    tree.iter().map( |p| format!("{}{}", TREE_INDENT.repeat(p.level), p.prefix)).collect()
}

pub fn format_listing (objects: &[S3ObjectInfo])->Vec<String> {
    objects.iter().enumerate().map( |(i,o)| format!("{:3}. {}  ({} bytes)", i+1, o.key, o.size)).collect()
}

/// a search without matches is a valid (empty) result
pub fn search_outcome (found: Vec<S3ObjectInfo>, suffix: &str)->Outcome<Vec<S3ObjectInfo>,ChmError> {
    if found.is_empty() {
        Outcome::Empty( format!("No {suffix} files found."))
    } else {
        Outcome::Completed(found)
    }
}

/* #region stages ***********************************************************************************************/

pub async fn tree_stage (client: &S3Client, bucket: &str, root: &str)->Outcome<Vec<S3Prefix>,ChmError> {
    println!("\n=== prefix tree of {bucket}/{root} ===\n");
    match get_prefix_tree( client, bucket, root).await {
        Ok(tree) => {
            for line in format_tree( &tree) { println!("{line}") }
            if tree.is_empty() { Outcome::Empty( format!("no prefixes below {root}")) } else { Outcome::Completed(tree) }
        }
        Err(e) => Outcome::Failed( e.into())
    }
}

pub async fn list_stage (client: &S3Client, bucket: &str, prefix: &str, max_keys: i32)->Outcome<Vec<S3ObjectInfo>,ChmError> {
    println!("\n=== first {max_keys} objects in {prefix} ===\n");
    match list_objects( client, bucket, prefix, max_keys).await {
        Ok(objects) => {
            for line in format_listing( &objects) { println!("{line}") }
            println!("\nlisted {} objects", objects.len());
            if objects.is_empty() { Outcome::Empty( format!("no objects in {prefix}")) } else { Outcome::Completed(objects) }
        }
        Err(e) => Outcome::Failed( e.into())
    }
}

pub async fn search_stage (client: &S3Client, bucket: &str, prefix: &str, suffix: &str)->Outcome<Vec<S3ObjectInfo>,ChmError> {
    println!("\n=== searching for {suffix} files in {prefix} ===\n");
    match find_objects( client, bucket, prefix, |o| matches_suffix( &o.key, suffix)).await {
        Ok(found) => {
            for o in &found { println!("found: {}  (size: {} bytes)", o.key, o.size) }
            let outcome = search_outcome( found, suffix);
            match &outcome {
                Outcome::Completed(found) => println!("\ntotal found: {}", found.len()),
                Outcome::Empty(msg) => println!("{msg}"),
                Outcome::Failed(_) => {}
            }
            outcome
        }
        Err(e) => Outcome::Failed( e.into())
    }
}

pub async fn download_stage (client: &S3Client, bucket: &str, download: &ObjectDownload)->Outcome<u64,ChmError> {
    println!("\n=== downloading {} ===\n", download.key);
    if let Some(dir) = download.path.parent().filter( |d| !d.as_os_str().is_empty()) {
        if let Err(e) = ensure_writable_dir( dir) { return Outcome::Failed( e.into()) }
    }
    match download_s3_object( client, bucket, &download.key, &download.path).await {
        Ok(len) => {
            println!("saved {} bytes to {}", len, download.path.display());
            Outcome::Completed(len)
        }
        Err(e) => Outcome::Failed( e.into())
    }
}

/* #endregion stages */

/// run all configured operations in sequence. Failures of one operation are logged and do not stop the others,
/// the number of failed operations is returned
pub async fn run_explorer (config: &ChmConfig)->Result<usize> {
    if config.max_keys <= 0 { return Err( op_failed( format!("invalid max_keys {}", config.max_keys))) }

    let client = create_s3_client( config.region.clone()).await?;
    let bucket = config.bucket.as_str();
    let mut n_failed = 0;

    for root in &config.tree_prefixes {
        if tree_stage( &client, bucket, root).await.logged("prefix tree").is_failed() { n_failed += 1 }
    }
    if let Some(prefix) = &config.list_prefix {
        if list_stage( &client, bucket, prefix, config.max_keys).await.logged("object listing").is_failed() { n_failed += 1 }
    }
    if let Some(prefix) = &config.search_prefix {
        if search_stage( &client, bucket, prefix, &config.suffix).await.logged("object search").is_failed() { n_failed += 1 }
    }
    for download in &config.downloads {
        if download_stage( &client, bucket, download).await.logged("object download").is_failed() { n_failed += 1 }
    }

    info!("explorer finished with {} failed operations", n_failed);
    Ok(n_failed)
}
