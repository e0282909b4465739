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

use super::{deserialize_opt_time, serialize_opt_time, required, Validate};
use crate::LolosResult;

// --------------------------------------------------------------------------------------------------------------------------------
// Types relating to users:

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id         : UserId,
    pub first_name : String,
    pub last_name  : String,
    pub rut        : String,          // National identity number
    pub email      : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone      : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address    : Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_time",
            serialize_with = "serialize_opt_time", skip_serializing_if = "Option::is_none")]
    pub birth_date : Option<DateTime<Utc>>
}


impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}


impl Validate for User {
    fn validate(&self) -> LolosResult<()> {
        required("user.id",    &self.id.0)?;
        required("user.email", &self.email)
    }
}

// --------------------------------------------------------------------------------------------------------------------------------
