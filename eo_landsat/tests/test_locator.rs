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

use chrono::NaiveDate;
use serde_json::json;

use eo_landsat::locator::{SceneRecord, parse_scene_search, parse_catalog_date, select_most_recent, search_payload};
use eo_landsat::m2m::{M2mResponse, SceneSearchData, DownloadOption};
use eo_landsat::fetcher::select_product;
use eo_landsat::errors::LandsatError;
use eo_landsat::SceneSearchConfig;

// run with "cargo test --test test_locator -- --nocapture"

const SEARCH_RESPONSE: &str = r#"{
  "results": [
    {
      "entityId": "LC80440342021001LGN00",
      "displayId": "LC08_L2SP_044034_20210101_20210308_02_T1",
      "cloudCover": "1.23",
      "temporalCoverage": { "startDate": "2021-01-01 00:00:00", "endDate": "2021-01-01 00:00:00" },
      "metadata": [
        { "fieldName": "WRS Path", "value": " 044" },
        { "fieldName": "WRS Row", "value": " 034" },
        { "fieldName": "Satellite", "value": 8 },
        { "fieldName": "Date Acquired", "value": "2021/01/01" }
      ]
    },
    {
      "entityId": "LC90440342023166LGN00",
      "displayId": "LC09_L2SP_044034_20230615_20230617_02_T1",
      "cloudCover": 0.5,
      "metadata": [
        { "fieldName": "wrs_path", "value": "44" },
        { "fieldName": "wrs_row", "value": "34" },
        { "fieldName": "Spacecraft Identifier", "value": "LANDSAT_9" },
        { "fieldName": "Date Acquired", "value": "2023-06-15" }
      ]
    },
    {
      "entityId": "LC80440342022060LGN00",
      "displayId": "LC08_L2SP_044034_20220301_20220310_02_T1",
      "cloudCover": 3,
      "temporalCoverage": { "startDate": "2022-03-01 00:00:00" },
      "metadata": []
    },
    {
      "entityId": "undated",
      "displayId": "LC08_UNDATED",
      "metadata": []
    }
  ],
  "recordsReturned": 4,
  "totalHits": 4
}"#;

#[test]
fn test_parse_scene_search () {
    let scenes = parse_scene_search( SEARCH_RESPONSE).unwrap();
    for s in &scenes { println!("{s}") }

    assert_eq!( scenes.len(), 3); // undated scene is skipped
    let dates: Vec<String> = scenes.iter().map( |s| s.acquisition_date.to_string()).collect();
    assert_eq!( dates, vec!["2023-06-15", "2022-03-01", "2021-01-01"]);

    let s = &scenes[0];
    assert_eq!( s.wrs_path, Some(44));
    assert_eq!( s.wrs_row, Some(34));
    assert_eq!( s.satellite.as_deref(), Some("LANDSAT_9"));
    assert_eq!( s.cloud_cover, Some(0.5));

    let s = &scenes[2];
    assert_eq!( s.entity_id, "LC80440342021001LGN00");
    assert_eq!( s.satellite.as_deref(), Some("8"));
    assert_eq!( s.cloud_cover, Some(1.23));

    let s = &scenes[1];
    assert_eq!( s.wrs_path, None);
    assert_eq!( s.cloud_cover, Some(3.0));
}

#[test]
fn test_select_most_recent () {
    let scenes = parse_scene_search( SEARCH_RESPONSE).unwrap();
    let mut reversed = scenes.clone();
    reversed.reverse();

    let newest = select_most_recent( &reversed).unwrap();
    assert_eq!( newest.acquisition_date, NaiveDate::from_ymd_opt(2023,6,15).unwrap());
    assert_eq!( newest.display_id, "LC09_L2SP_044034_20230615_20230617_02_T1");

    assert!( select_most_recent( &[]).is_none());
}

#[test]
fn test_empty_search () {
    let scenes = parse_scene_search( r#"{"results":[],"recordsReturned":0,"totalHits":0}"#).unwrap();
    assert!( scenes.is_empty());
}

#[test]
fn test_catalog_dates () {
    assert_eq!( parse_catalog_date("2023/06/15"), NaiveDate::from_ymd_opt(2023,6,15));
    assert_eq!( parse_catalog_date(" 2023-06-15 18:42:10"), NaiveDate::from_ymd_opt(2023,6,15));
    assert_eq!( parse_catalog_date("15 June"), None);
}

#[test]
fn test_response_envelope () {
    let ok: M2mResponse<String> = serde_json::from_str( r#"{"data":"abc","errorCode":null,"errorMessage":null}"#).unwrap();
    assert_eq!( ok.into_result("login").unwrap(), Some("abc".to_string()));

    let auth: M2mResponse<String> = serde_json::from_str( r#"{"data":null,"errorCode":"AUTH_INVALID","errorMessage":"User credential verification failed"}"#).unwrap();
    match auth.into_result("login") {
        Err(LandsatError::AuthError(msg)) => assert!( msg.starts_with("AUTH_INVALID")),
        other => panic!("expected auth error, got {other:?}")
    }

    let other: M2mResponse<String> = serde_json::from_str( r#"{"data":null,"errorCode":"SEARCH_ERROR","errorMessage":"bad filter"}"#).unwrap();
    match other.into_result("scene-search") {
        Err(LandsatError::ApiError(code,_)) => assert_eq!( code, "SEARCH_ERROR"),
        other => panic!("expected api error, got {other:?}")
    }
}

#[test]
fn test_search_payload () {
    let config = SceneSearchConfig::default();
    let payload = search_payload( &config);
    println!("{}", serde_json::to_string_pretty( &payload).unwrap());

    assert_eq!( payload["datasetName"], json!("landsat_ot_c2_l2"));
    let filter = &payload["sceneFilter"];
    assert_eq!( filter["spatialFilter"]["filterType"], json!("mbr"));
    assert_eq!( filter["spatialFilter"]["lowerLeft"]["longitude"], json!(-121.8863));
    assert_eq!( filter["acquisitionFilter"]["start"], json!("2023-06-01"));
    assert_eq!( filter["acquisitionFilter"]["end"], json!("2023-09-30"));
    assert_eq!( filter["cloudCoverFilter"]["max"], json!(5));
}

#[test]
fn test_select_product () {
    let options: Vec<DownloadOption> = serde_json::from_value( json!([
        { "id": "5e81f14f92acf9ef", "entityId": "e1", "productName": "Landsat Collection 2 Level-2 Band File", "available": true },
        { "id": "5e83d14fec7cae84", "entityId": "e1", "productName": "Landsat Collection 2 Level-2 Product Bundle", "available": false },
        { "id": 42, "entityId": "e1", "productName": "Landsat Collection 2 Level-2 QA Bundle", "available": true }
    ])).unwrap();

    let p = select_product( &options).unwrap();
    assert_eq!( p.product_id(), "42");

    let p = select_product( &options[..2]).unwrap();
    assert_eq!( p.product_id(), "5e81f14f92acf9ef");

    assert!( select_product( &options[1..2]).is_none());
}
