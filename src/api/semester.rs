// Copyright (C) 2024-2026 The lolos-rs developers
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions
// are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
//    this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright
//    notice, this list of conditions and the following disclaimer in the
//    documentation and/or other materials provided with the distribution.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// SPDX-License-Identifier: BSD-2-Clause

use std::fmt;

use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use super::{deserialize_time, serialize_time, required, Validate};
use super::activity::Activity;
use crate::{Error, LolosResult};

// --------------------------------------------------------------------------------------------------------------------------------
// Types relating to semesters and positions:

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct SemesterId(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct PositionId(pub String);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


// A named function needed to run activities ("driver", "cashier", ...),
// defined once per semester and referenced by activity requirements.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id          : PositionId,
    pub name        : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description : Option<String>
}


impl Validate for Position {
    fn validate(&self) -> LolosResult<()> {
        required("position.id",   &self.id.0)?;
        required("position.name", &self.name)
    }
}


// Partial update for a position; fields left as None are not sent.
#[derive(Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name        : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description : Option<String>
}


#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id         : SemesterId,
    pub name       : String,
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub start_date : DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub end_date   : DateTime<Utc>,
    #[serde(default)]
    pub is_active  : bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities : Vec<Activity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions  : Vec<Position>
}


impl Validate for Semester {
    fn validate(&self) -> LolosResult<()> {
        required("semester.id",   &self.id.0)?;
        required("semester.name", &self.name)?;
        if self.start_date > self.end_date {
            return Err(Error::MalformedEntity(
                format!("semester {} starts after it ends", self.id.0)));
        }
        self.activities.validate()?;
        self.positions.validate()
    }
}

// --------------------------------------------------------------------------------------------------------------------------------
