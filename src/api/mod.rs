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

pub mod user;
pub mod group;
pub mod semester;
pub mod activity;
pub mod goal;

use chrono::prelude::*;
use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serializer};

use crate::{Error, LolosResult};

// The backend emits timestamps as RFC 3339 strings ("2025-03-01T12:00:00.000Z").

pub fn deserialize_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where D: Deserializer<'de>
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}


pub fn serialize_time<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer
{
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
}


pub fn deserialize_opt_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where D: Deserializer<'de>
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => DateTime::parse_from_rfc3339(&s)
                       .map(|t| Some(t.with_timezone(&Utc)))
                       .map_err(serde::de::Error::custom),
        None    => Ok(None)
    }
}


pub fn serialize_opt_time<S>(time: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer
{
    match time {
        Some(t) => serialize_time(t, serializer),
        None    => serializer.serialize_none()
    }
}

// --------------------------------------------------------------------------------------------------------------------------------
// Response envelope:
//
// Some controllers wrap their payload in {"data": ...} (groups, positions,
// assignments, user search) while others return the entity bare (semesters,
// activities, goals). The envelope is unwrapped before anything is handed to
// callers.

#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub data : T
}

// --------------------------------------------------------------------------------------------------------------------------------
// Structural validity:
//
// Entities deserialized from the wire are checked before they are admitted
// into the rest of the library. A record that fails its checks surfaces as
// Error::MalformedEntity rather than circulating half-populated.

pub trait Validate {
    fn validate(&self) -> LolosResult<()>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> LolosResult<()> {
        for item in self {
            item.validate()?;
        }
        Ok(())
    }
}

pub(crate) fn required(field: &str, value: &str) -> LolosResult<()> {
    if value.trim().is_empty() {
        Err(Error::MalformedEntity(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}

// --------------------------------------------------------------------------------------------------------------------------------
