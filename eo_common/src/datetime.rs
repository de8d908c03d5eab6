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

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::time::{Duration, UNIX_EPOCH, SystemTime};

/// parse "YYYY-MM-DD" dates
pub fn parse_ymd (s: &str)->Result<NaiveDate,chrono::ParseError> {
    NaiveDate::parse_from_str( s.trim(), "%Y-%m-%d")
}

/// parse dates that can have trailing time specs such as "2023-06-15 00:00:00-05" or "2023-06-15T10:12:00Z".
/// Only the date part is used
pub fn parse_date_prefix (s: &str)->Option<NaiveDate> {
    let s = s.trim();
    if s.len() < 10 { return None }
    s.get(0..10).and_then( |p| parse_ymd(p).ok())
}

pub fn naive_date_to_utc (d: &NaiveDate)->DateTime<Utc> {
    d.and_time( NaiveTime::MIN).and_utc()
}

/* #region dated objects ****************************************************************************************/

/// a type bound for something we can get a date for.
/// The main purpose of this trait is to avoid having to extract DateTime lists out of already existing collections
pub trait Dated {
    fn date (&self)->DateTime<Utc>;
}

impl<Tz:TimeZone> Dated for DateTime<Tz> {
    fn date (&self)->DateTime<Utc> { self.to_utc() }
}

impl Dated for NaiveDate {
    fn date (&self)->DateTime<Utc> { naive_date_to_utc(self) }
}

impl Dated for SystemTime {
    fn date (&self)->DateTime<Utc> {
        let nanos = self.duration_since( UNIX_EPOCH).unwrap_or(Duration::ZERO).as_nanos();
        DateTime::from_timestamp_nanos( nanos as i64)
    }
}

/// sort in descending date order (stable, i.e. items with the same date keep their relative order)
pub fn sort_newest_first<T: Dated> (items: &mut [T]) {
    items.sort_by( |a,b| b.date().cmp( &a.date()));
}

/// the item with the latest date. If several items have the same date the first one is returned
pub fn newest<T: Dated> (items: &[T])->Option<&T> {
    let mut res: Option<&T> = None;
    for it in items {
        match res {
            Some(r) if r.date() >= it.date() => {}
            _ => res = Some(it)
        }
    }
    res
}

/* #endregion dated objects */
