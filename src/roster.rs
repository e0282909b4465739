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

// Roster capacity and eligibility. Everything here is a pure query over an
// activity's in-memory state: validation is separated from persistence, so
// the rules can be exercised without a network and reused by any caller.
//
// These checks are advisory. The backend runs the same checks atomically and
// is the source of truth; a request it rejects after a race must be treated
// as final, and local state refreshed rather than the request retried.

use serde::Serialize;

use crate::api::activity::{Activity, ActivityPosition, Assignment, ActivityId, AssignmentId};
use crate::api::group::UserGroup;
use crate::api::semester::PositionId;
use crate::api::user::{User, UserId};
use crate::policy::{can_manage, level};
use crate::{Error, LolosResult};

// --------------------------------------------------------------------------------------------------------------------------------
// Fill-state queries:

impl Activity {
    // How many assignments this activity holds for the given position.
    pub fn filled_count(&self, position: &PositionId) -> usize {
        self.assignments.iter().filter(|a| &a.position.id == position).count()
    }


    pub fn is_position_full(&self, requirement: &ActivityPosition) -> bool {
        self.filled_count(&requirement.position.id) >= requirement.quantity as usize
    }


    // Total slots across all requirements.
    pub fn total_required(&self) -> u32 {
        self.activity_positions.iter().map(|ap| ap.quantity).sum()
    }


    // Overall fill fraction in [0, 1]. An activity with no requirements
    // reads as 0 rather than dividing by zero, and assignments to positions
    // with no listed requirement cannot push the fraction past 1.
    pub fn progress(&self) -> f64 {
        let required = self.total_required();
        if required == 0 {
            0.0
        } else {
            (self.assignments.len() as f64 / required as f64).min(1.0)
        }
    }


    pub fn is_assigned(&self, user: &UserId) -> bool {
        self.assignments.iter().any(|a| &a.user.id == user)
    }


    // Group members who may still be assigned: one assignment per member per
    // activity, regardless of position.
    pub fn eligible_candidates<'a>(&self, members: &'a [UserGroup]) -> Vec<&'a User> {
        members.iter()
               .filter(|m| !self.is_assigned(&m.user.id))
               .map(|m| &m.user)
               .collect()
    }
}

// --------------------------------------------------------------------------------------------------------------------------------
// Request builders:
//
// A successful build yields a descriptor ready for submission via
// Lolos::create_assignment / Lolos::delete_assignment. No I/O happens here.

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub activity_id : ActivityId,
    pub position_id : PositionId,
    pub user_id     : UserId
}


#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemovalRequest {
    pub assignment_id : AssignmentId
}


pub fn request_assignment(activity    : &Activity,
                          requirement : &ActivityPosition,
                          candidate   : &User,
                          actor_level : u32) -> LolosResult<AssignmentRequest>
{
    if activity.is_position_full(requirement) {
        return Err(Error::PositionFull(requirement.position.id.clone()));
    }
    if activity.is_assigned(&candidate.id) {
        return Err(Error::NotEligible(candidate.id.clone()));
    }
    if !can_manage(actor_level, level::ADMIN) {
        return Err(Error::InsufficientPrivilege { actor: actor_level, required: level::ADMIN });
    }
    Ok(AssignmentRequest {
        activity_id : activity.id.clone(),
        position_id : requirement.position.id.clone(),
        user_id     : candidate.id.clone()
    })
}


pub fn request_removal(assignment: &Assignment, actor_level: u32) -> LolosResult<RemovalRequest> {
    if !can_manage(actor_level, level::ADMIN) {
        return Err(Error::InsufficientPrivilege { actor: actor_level, required: level::ADMIN });
    }
    Ok(RemovalRequest { assignment_id: assignment.id.clone() })
}
