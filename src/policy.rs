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

// Role-based authorization. Every privileged action in a group is gated on
// the actor's role level; the checks here are the single place those
// comparisons live, so every caller enforces the same rules. All functions
// are pure and total: a failed check is a `false`, never an error.

use crate::api::group::UserGroup;

// The named thresholds. The numeric values are policy, not protocol; only
// the ordering MEMBER < ADMIN < OWNER is relied upon.
pub mod level {
    pub const MEMBER : u32 = 10;
    pub const ADMIN  : u32 = 50;
    pub const OWNER  : u32 = 100;
}


// The level a membership confers. A member without a role acts at minimum
// privilege; that is an ordinary state, not an error.
pub fn effective_level(membership: &UserGroup) -> u32 {
    membership.group_role.as_ref().map_or(0, |role| role.level)
}


pub fn can_manage(level: u32, threshold: u32) -> bool {
    level >= threshold
}


// Strict inequality: an actor may never create a role at or above their own
// level. Callers reject the action before any request is sent.
pub fn can_create_role(actor_level: u32, proposed_level: u32) -> bool {
    proposed_level < actor_level
}
