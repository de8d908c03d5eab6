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

//! stage outcomes that keep genuine failures apart from valid but empty results (e.g. a catalog query
//! without matches). Stages report their outcome instead of propagating, so that callers can decide
//! whether to continue

use std::fmt::{self,Display};
use tracing::{info,warn,error};

#[derive(Debug)]
pub enum Outcome<T,E> {
    /// the stage produced a result
    Completed(T),
    /// the stage ran without error but had nothing to produce
    Empty(String),
    /// the stage failed
    Failed(E)
}

impl<T,E> Outcome<T,E> {
    pub fn is_completed (&self)->bool { matches!(self, Outcome::Completed(_)) }
    pub fn is_empty (&self)->bool { matches!(self, Outcome::Empty(_)) }
    pub fn is_failed (&self)->bool { matches!(self, Outcome::Failed(_)) }

    pub fn completed (self)->Option<T> {
        if let Outcome::Completed(v) = self { Some(v) } else { None }
    }

    pub fn failed (self)->Option<E> {
        if let Outcome::Failed(e) = self { Some(e) } else { None }
    }

    pub fn map<U,F> (self, f: F)->Outcome<U,E> where F: FnOnce(T)->U {
        match self {
            Outcome::Completed(v) => Outcome::Completed(f(v)),
            Outcome::Empty(reason) => Outcome::Empty(reason),
            Outcome::Failed(e) => Outcome::Failed(e)
        }
    }

    /// only run the next stage for completed outcomes
    pub fn and_then<U,F> (self, f: F)->Outcome<U,E> where F: FnOnce(T)->Outcome<U,E> {
        match self {
            Outcome::Completed(v) => f(v),
            Outcome::Empty(reason) => Outcome::Empty(reason),
            Outcome::Failed(e) => Outcome::Failed(e)
        }
    }

    pub fn into_result (self)->Result<Option<T>,E> {
        match self {
            Outcome::Completed(v) => Ok(Some(v)),
            Outcome::Empty(_) => Ok(None),
            Outcome::Failed(e) => Err(e)
        }
    }
}

impl<T,E: Display> Outcome<T,E> {
    /// log the outcome of a named stage and pass it on
    pub fn logged (self, stage: &str)->Self {
        match &self {
            Outcome::Completed(_) => info!("{stage} completed"),
            Outcome::Empty(reason) => warn!("{stage} produced no result: {reason}"),
            Outcome::Failed(e) => error!("{stage} failed: {e}"),
        }
        self
    }
}

impl<T,E> From<Result<T,E>> for Outcome<T,E> {
    fn from (res: Result<T,E>)->Self {
        match res {
            Ok(v) => Outcome::Completed(v),
            Err(e) => Outcome::Failed(e)
        }
    }
}

impl<T,E: Display> Display for Outcome<T,E> {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            Outcome::Completed(_) => write!(f, "completed"),
            Outcome::Empty(reason) => write!(f, "empty: {reason}"),
            Outcome::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}
