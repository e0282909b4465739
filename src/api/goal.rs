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

use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use super::{deserialize_time, serialize_time, deserialize_opt_time, serialize_opt_time,
            required, Validate};
use crate::{Error, LolosResult};

// --------------------------------------------------------------------------------------------------------------------------------
// Types relating to fundraising goals:

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct GoalId(pub String);


#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id             : GoalId,
    pub name           : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description    : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose        : Option<String>,
    pub target_amount  : f64,
    pub current_amount : f64,
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub start_date     : DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_opt_time",
            serialize_with = "serialize_opt_time", skip_serializing_if = "Option::is_none")]
    pub end_date       : Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active      : bool
}


impl Goal {
    // Fraction of the target raised so far, clamped to [0, 1]. A goal with
    // no target reads as zero progress.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            0.0
        } else {
            (self.current_amount / self.target_amount).min(1.0).max(0.0)
        }
    }
}


impl Validate for Goal {
    fn validate(&self) -> LolosResult<()> {
        required("goal.id",   &self.id.0)?;
        required("goal.name", &self.name)?;
        if self.target_amount < 0.0 || self.current_amount < 0.0 {
            return Err(Error::MalformedEntity(
                format!("goal {} has a negative amount", self.id.0)));
        }
        Ok(())
    }
}

// --------------------------------------------------------------------------------------------------------------------------------
