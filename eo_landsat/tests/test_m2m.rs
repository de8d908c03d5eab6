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

use std::sync::{Arc, Mutex};
use chrono::NaiveDate;
use tokio::{net::{TcpListener, TcpStream}, io::{AsyncReadExt, AsyncWriteExt}};

use eo_common::outcome::Outcome;
use eo_landsat::m2m::{M2mClient, error_response};
use eo_landsat::locator::{SceneRecord, locate_scenes};
use eo_landsat::fetcher::fetch_stage;
use eo_landsat::errors::LandsatError;
use eo_landsat::{Credentials, SceneSearchConfig};

// run with "cargo test --test test_m2m -- --nocapture"

/// a request received by the stub server: endpoint (path without leading '/') and whether it had an auth token
#[derive(Debug,Clone)]
struct Received {
    endpoint: String,
    authorized: bool,
}

/// minimal HTTP/1.1 server that answers each endpoint with a canned (status, JSON body) response.
/// Every response closes its connection so that each request gets its own accept
async fn start_stub (routes: Vec<(&'static str, u16, &'static str)>)->(String, Arc<Mutex<Vec<Received>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let received = Arc::new( Mutex::new( Vec::new()));
    let log = received.clone();

    tokio::spawn( async move {
        while let Ok((mut stream,_)) = listener.accept().await {
            let (endpoint, authorized) = read_request( &mut stream).await;
            log.lock().unwrap().push( Received{ endpoint: endpoint.clone(), authorized });

            let (status, body) = routes.iter()
                .find( |(e,_,_)| *e == endpoint)
                .map( |(_,s,b)| (*s,*b))
                .unwrap_or( (404, ""));
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status, if status == 200 { "OK" } else { "Error" }, body.len(), body
            );
            let _ = stream.write_all( response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (url, received)
}

async fn read_request (stream: &mut TcpStream)->(String,bool) {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read( &mut chunk).await.unwrap_or(0);
        if n == 0 { return (String::new(), false) }
        buf.extend_from_slice( &chunk[..n]);

        if let Some(pos) = buf.windows(4).position( |w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy( &buf[..pos]).to_ascii_lowercase();
            let content_len = head.lines()
                .filter_map( |l| l.split_once(':'))
                .find( |(k,_)| k.trim() == "content-length")
                .and_then( |(_,v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);

            while buf.len() < pos + 4 + content_len {
                let n = stream.read( &mut chunk).await.unwrap_or(0);
                if n == 0 { break }
                buf.extend_from_slice( &chunk[..n]);
            }

            let endpoint = head.split_whitespace().nth(1).unwrap_or("/").trim_start_matches('/').to_string();
            let authorized = head.contains("x-auth-token: key42");
            return (endpoint, authorized)
        }
    }
}

fn creds ()->Credentials {
    Credentials::Password { username: "someone".into(), password: "secret".into() }
}

fn endpoints (received: &Arc<Mutex<Vec<Received>>>)->Vec<String> {
    received.lock().unwrap().iter().map( |r| r.endpoint.clone()).collect()
}

#[tokio::test]
async fn test_locate_unreachable () {
    // nothing listens on the discard port
    let mut client = M2mClient::new("http://127.0.0.1:9/");
    match locate_scenes( &mut client, &creds(), &SceneSearchConfig::default()).await {
        Outcome::Failed(LandsatError::NetError(e)) => println!("expected: {e}"),
        other => panic!("expected network failure, got {other:?}")
    }
    assert!( !client.is_logged_in());
}

#[tokio::test]
async fn test_locate_auth_invalid () {
    let (url, received) = start_stub( vec![
        ("login", 200, r#"{"data":null,"errorCode":"AUTH_INVALID","errorMessage":"User credential verification failed"}"#)
    ]).await;

    let mut client = M2mClient::new( &url);
    match locate_scenes( &mut client, &creds(), &SceneSearchConfig::default()).await {
        Outcome::Failed(LandsatError::AuthError(msg)) => assert!( msg.starts_with("AUTH_INVALID")),
        other => panic!("expected auth failure, got {other:?}")
    }
    // no search and no logout without a session
    assert_eq!( endpoints( &received), vec!["login".to_string()]);
}

#[tokio::test]
async fn test_locate_auth_invalid_status () {
    // the envelope error code wins over the 401 status
    let (url, received) = start_stub( vec![
        ("login", 401, r#"{"data":null,"errorCode":"AUTH_UNAUTHORIZED","errorMessage":"User does not have access"}"#)
    ]).await;

    let mut client = M2mClient::new( &url);
    match locate_scenes( &mut client, &creds(), &SceneSearchConfig::default()).await {
        Outcome::Failed(LandsatError::AuthError(msg)) => assert!( msg.starts_with("AUTH_UNAUTHORIZED")),
        other => panic!("expected auth failure, got {other:?}")
    }
}

#[tokio::test]
async fn test_locate_empty () {
    let (url, received) = start_stub( vec![
        ("login", 200, r#"{"data":"key42","errorCode":null,"errorMessage":null}"#),
        ("scene-search", 200, r#"{"data":{"results":[],"recordsReturned":0,"totalHits":0},"errorCode":null,"errorMessage":null}"#),
        ("logout", 200, r#"{"data":true,"errorCode":null,"errorMessage":null}"#)
    ]).await;

    let mut client = M2mClient::new( &url);
    match locate_scenes( &mut client, &creds(), &SceneSearchConfig::default()).await {
        Outcome::Empty(msg) => println!("expected: {msg}"),
        other => panic!("expected empty outcome, got {other:?}")
    }

    let received = received.lock().unwrap().clone();
    println!("{received:?}");
    let eps: Vec<&str> = received.iter().map( |r| r.endpoint.as_str()).collect();
    assert_eq!( eps, vec!["login", "scene-search", "logout"]);
    assert!( !received[0].authorized);
    assert!( received[1].authorized && received[2].authorized);
    assert!( !client.is_logged_in());
}

#[tokio::test]
async fn test_fetch_unknown_display_id () {
    // the scene list lookup finds nothing and removing the list fails, which is only logged
    let (url, received) = start_stub( vec![
        ("login", 200, r#"{"data":"key42","errorCode":null,"errorMessage":null}"#),
        ("scene-list-add", 200, r#"{"data":1,"errorCode":null,"errorMessage":null}"#),
        ("scene-list-get", 200, r#"{"data":[],"errorCode":null,"errorMessage":null}"#),
        ("scene-list-remove", 500, r#"{"data":null,"errorCode":"LIST_ERROR","errorMessage":"list does not exist"}"#),
        ("logout", 200, r#"{"data":true,"errorCode":null,"errorMessage":null}"#)
    ]).await;

    let scene = SceneRecord {
        entity_id: String::new(),
        display_id: "LC08_L2SP_044034_20230720_20230802_02_T1".into(),
        wrs_path: Some(44),
        wrs_row: Some(34),
        satellite: None,
        cloud_cover: None,
        acquisition_date: NaiveDate::from_ymd_opt(2023,7,20).unwrap()
    };

    let dir = tempfile::tempdir().unwrap();
    let mut client = M2mClient::new( &url);
    match fetch_stage( &mut client, &creds(), "landsat_ot_c2_l2", &scene, dir.path()).await {
        Outcome::Empty(msg) => assert!( msg.contains( &scene.display_id)),
        other => panic!("expected empty outcome, got {other:?}")
    }

    assert_eq!( endpoints( &received), vec!["login", "scene-list-add", "scene-list-get", "scene-list-remove", "logout"]);
    assert!( !client.is_logged_in());
}

#[test]
fn test_error_response () {
    match error_response( "login", 401, r#"{"data":null,"errorCode":"AUTH_INVALID","errorMessage":"bad password"}"#.to_string()) {
        LandsatError::AuthError(msg) => assert_eq!( msg, "AUTH_INVALID: bad password"),
        other => panic!("expected auth error, got {other:?}")
    }
    match error_response( "scene-search", 400, r#"{"data":null,"errorCode":"SEARCH_ERROR","errorMessage":"bad filter"}"#.to_string()) {
        LandsatError::ApiError(code,_) => assert_eq!( code, "SEARCH_ERROR"),
        other => panic!("expected api error, got {other:?}")
    }
    // no envelope, keep status and body
    match error_response( "scene-search", 502, "<html>bad gateway</html>".to_string()) {
        LandsatError::NetError(e) => assert!( e.to_string().contains("502")),
        other => panic!("expected net error, got {other:?}")
    }
}
