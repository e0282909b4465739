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

use super::{deserialize_time, serialize_time, required, Validate};
use super::semester::{Position, PositionId};
use super::user::User;
use crate::{Error, LolosResult};

// --------------------------------------------------------------------------------------------------------------------------------
// Types relating to activities, position requirements and assignments:

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct ActivityId(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct ActivityPositionId(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct AssignmentId(pub String);


// The requirement that an activity needs `quantity` members filling a given
// position.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPosition {
    pub id       : ActivityPositionId,
    pub position : Position,
    pub quantity : u32
}


impl Validate for ActivityPosition {
    fn validate(&self) -> LolosResult<()> {
        required("activityPosition.id", &self.id.0)?;
        self.position.validate()?;
        if self.quantity == 0 {
            return Err(Error::MalformedEntity(
                format!("activityPosition {} requests zero slots", self.id.0)));
        }
        Ok(())
    }
}


// One member filling one slot of one position for one activity.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id       : AssignmentId,
    pub position : Position,
    pub user     : User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes    : Option<String>
}


impl Validate for Assignment {
    fn validate(&self) -> LolosResult<()> {
        required("assignment.id", &self.id.0)?;
        self.position.validate()?;
        self.user.validate()
    }
}


#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id                 : ActivityId,
    pub name               : String,
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub date               : DateTime<Utc>,
    pub location           : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description        : Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activity_positions : Vec<ActivityPosition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignments        : Vec<Assignment>
}


impl Validate for Activity {
    fn validate(&self) -> LolosResult<()> {
        required("activity.id",   &self.id.0)?;
        required("activity.name", &self.name)?;
        self.activity_positions.validate()?;
        self.assignments.validate()?;

        // The roster never holds more assignments for a position than the
        // requirement asks for.
        for ap in &self.activity_positions {
            let filled = self.filled_count(&ap.position.id);
            if filled > ap.quantity as usize {
                return Err(Error::MalformedEntity(
                    format!("activity {} has {} assignments for position {} but only {} slots",
                            self.id.0, filled, ap.position.id, ap.quantity)));
            }
        }

        // A member holds at most one assignment per activity.
        for (i, a) in self.assignments.iter().enumerate() {
            if self.assignments[..i].iter().any(|other| other.user.id == a.user.id) {
                return Err(Error::MalformedEntity(
                    format!("activity {} assigns user {} more than once", self.id.0, a.user.id)));
            }
        }
        Ok(())
    }
}


// Requirement line sent when creating an activity.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityPosition {
    pub position_id : PositionId,
    pub quantity    : u32
}

// --------------------------------------------------------------------------------------------------------------------------------
