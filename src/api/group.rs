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

use serde::{Deserialize, Serialize};

use super::{required, Validate};
use super::user::{User, UserId};
use super::semester::Semester;
use crate::{Error, LolosResult};

// --------------------------------------------------------------------------------------------------------------------------------
// Types relating to groups, roles and memberships:

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct GroupId(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct GroupRoleId(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct UserGroupId(pub String);


// A named authority tier within a group. The level fixes what a holder may
// do; see crate::policy for how levels are compared.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupRole {
    pub id          : GroupRoleId,
    pub name        : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
    pub level       : u32,
    #[serde(default)]
    pub is_default  : bool,
    #[serde(default)]
    pub is_system   : bool
}


impl Validate for GroupRole {
    fn validate(&self) -> LolosResult<()> {
        required("groupRole.id",   &self.id.0)?;
        required("groupRole.name", &self.name)
    }
}


// Membership of one user in one group, optionally carrying a role. A member
// without a role is still a member, just at minimum privilege.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id         : UserGroupId,
    pub user       : User,
    #[serde(default)]
    pub is_creator : bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_role : Option<GroupRole>
}


impl Validate for UserGroup {
    fn validate(&self) -> LolosResult<()> {
        required("userGroup.id", &self.id.0)?;
        self.user.validate()?;
        if let Some(role) = &self.group_role {
            role.validate()?;
        }
        Ok(())
    }
}


#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id          : GroupId,
    pub name        : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles       : Vec<GroupRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_groups : Vec<UserGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub semesters   : Vec<Semester>
}


impl Group {
    // The membership record for a given user, if they belong to this group.
    pub fn membership_of(&self, user: &UserId) -> Option<&UserGroup> {
        self.user_groups.iter().find(|ug| &ug.user.id == user)
    }
}


impl Validate for Group {
    fn validate(&self) -> LolosResult<()> {
        required("group.id",   &self.id.0)?;
        required("group.name", &self.name)?;
        self.roles.validate()?;
        self.user_groups.validate()?;
        self.semesters.validate()?;

        // At most one role per group is the default.
        let defaults = self.roles.iter().filter(|r| r.is_default).count();
        if defaults > 1 {
            return Err(Error::MalformedEntity(
                format!("group {} has {} default roles", self.id.0, defaults)));
        }

        // A user belongs to a group at most once.
        for (i, ug) in self.user_groups.iter().enumerate() {
            if self.user_groups[..i].iter().any(|other| other.user.id == ug.user.id) {
                return Err(Error::MalformedEntity(
                    format!("group {} lists user {} more than once", self.id.0, ug.user.id)));
            }
        }
        Ok(())
    }
}

// --------------------------------------------------------------------------------------------------------------------------------
