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

//! read-only support functions for public (anonymous) AWS S3 buckets

use std::{path::Path, fs::{self,File}, io::Write};
use thiserror::Error;
use aws_sdk_s3::{Client, primitives::ByteStream};
use aws_config::{Region,meta::region::RegionProviderChain};
use tracing::{debug,warn};

pub type S3Client = Client;

pub type Result<T> = std::result::Result<T, S3Error>;

#[derive(Error,Debug)]
pub enum S3Error {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("AWS S3 get object error {0}")]
    AWSS3ObjectError( #[from] aws_smithy_runtime_api::client::result::SdkError<aws_sdk_s3::operation::get_object::GetObjectError, aws_smithy_runtime_api::http::Response>),

    #[error("AWS S3 list objects error {0}")]
    AWSS3ListObjectsError( #[from] aws_smithy_runtime_api::client::result::SdkError<aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error, aws_smithy_runtime_api::http::Response>),

    #[error("AWS byte stream download error {0}")]
    AWSByteStreamError( #[from] aws_smithy_types::byte_stream::error::Error),
}

/// key and size of a listed object
#[derive(Clone,Debug,PartialEq)]
pub struct S3ObjectInfo {
    pub key: String,
    pub size: i64,
}

/// a "folder" of a bucket listing together with its nesting level below the listing root
#[derive(Clone,Debug,PartialEq)]
pub struct S3Prefix {
    pub level: usize,
    pub prefix: String,
}

impl S3Prefix {
    /// the last path element of the prefix, e.g. "chm" for "forests/v2/chm/"
    pub fn name (&self)->&str {
        prefix_name( &self.prefix)
    }
}

pub fn prefix_name (prefix: &str)->&str {
    prefix.trim_end_matches('/').rsplit('/').next().unwrap_or(prefix)
}

/// create S3 Client for given region. This does not use any credentials
pub async fn create_s3_client (region: String) -> Result<Client> {
    let region_provider = RegionProviderChain::first_try( Region::new( region));
    let aws_config = aws_config::from_env().no_credentials().region(region_provider).load().await;
    Ok( Client::new(&aws_config) ) 
}

/// get all direct sub-prefixes ("folders") of a prefix, using '/' as the delimiter
pub async fn list_common_prefixes (client: &Client, bucket: &str, prefix: &str) -> Result<Vec<String>> {
    let mut list: Vec<String> = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let mut builder = client.list_objects_v2().bucket(bucket).prefix(prefix).delimiter("/");
        if let Some(t) = &token {
            builder = builder.continuation_token(t);
        }
        let result = builder.send().await?;

        for cp in result.common_prefixes() {
            if let Some(p) = cp.prefix() { list.push( p.to_string()) }
        }

        token = next_token( result.is_truncated(), result.next_continuation_token());
        if token.is_none() { break }
    }

    Ok(list)
}

/// depth first traversal of all prefixes below the given root prefix, in listing order.
/// The root itself is not included, its direct children have level 0
pub async fn get_prefix_tree (client: &Client, bucket: &str, root: &str) -> Result<Vec<S3Prefix>> {
    let mut tree: Vec<S3Prefix> = Vec::new();
    let mut stack: Vec<S3Prefix> = Vec::new();

    for p in list_common_prefixes( client, bucket, root).await?.into_iter().rev() {
        stack.push( S3Prefix{ level: 0, prefix: p });
    }

    while let Some(node) = stack.pop() {
        let children = list_common_prefixes( client, bucket, &node.prefix).await?;
        for p in children.into_iter().rev() {
            stack.push( S3Prefix{ level: node.level+1, prefix: p });
        }
        tree.push(node);
    }

    Ok(tree)
}

/// list up to max_keys objects below the given prefix (single request)
pub async fn list_objects (client: &Client, bucket: &str, prefix: &str, max_keys: i32) -> Result<Vec<S3ObjectInfo>> {
    let result = client.list_objects_v2().bucket(bucket).prefix(prefix).max_keys(max_keys).send().await?;
    Ok( result.contents().iter().filter_map( object_info).collect() )
}

/// page through all objects below the given prefix and return the ones matching the filter. An empty result
/// is not an error
pub async fn find_objects<F> (client: &Client, bucket: &str, prefix: &str, filter: F) -> Result<Vec<S3ObjectInfo>>
    where F: Fn(&S3ObjectInfo)->bool
{
    let mut list: Vec<S3ObjectInfo> = Vec::new();
    let mut token: Option<String> = None;
    let mut n_pages = 0;

    loop {
        let mut builder = client.list_objects_v2().bucket(bucket).prefix(prefix);
        if let Some(t) = &token {
            builder = builder.continuation_token(t);
        }
        let result = builder.send().await?;
        n_pages += 1;

        for o in result.contents().iter().filter_map( object_info) {
            if filter(&o) { list.push(o) }
        }

        token = next_token( result.is_truncated(), result.next_continuation_token());
        if token.is_none() { break }
    }

    debug!("searched {} pages of {}/{}, {} matches", n_pages, bucket, prefix, list.len());
    Ok(list)
}

/// download the object with the given key into a file. Returns the number of bytes written.
/// A file that was only partially written when the transfer failed is removed
pub async fn download_s3_object (client: &Client, bucket: &str, key: &str, path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let object = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await?; 

    let res = write_byte_stream( object.body, path).await;
    remove_partial_download( path, res)
}

async fn write_byte_stream (mut body: ByteStream, path: &Path) -> Result<u64> {
    let mut file = File::create(path)?;
    let mut len: u64 = 0;
    while let Some(bytes) = body.try_next().await? {
        len += bytes.len() as u64;
        file.write_all(&bytes)?;
    }
    file.flush()?;
    Ok(len)
}

/// pass through the result of a download, removing the target file if the download failed
pub fn remove_partial_download (path: &Path, res: Result<u64>) -> Result<u64> {
    if let Err(e) = &res {
        if path.is_file() {
            match fs::remove_file( path) {
                Ok(()) => debug!("removed partial download {:?} after: {}", path, e),
                Err(re) => warn!("failed to remove partial download {:?}: {}", path, re)
            }
        }
    }
    res
}

fn object_info (o: &aws_sdk_s3::types::Object)->Option<S3ObjectInfo> {
    o.key().map( |k| S3ObjectInfo{ key: k.to_string(), size: o.size().unwrap_or(0) })
}

fn next_token (is_truncated: Option<bool>, token: Option<&str>)->Option<String> {
    if is_truncated.unwrap_or(false) { token.map(|t| t.to_string()) } else { None }
}
