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

// This library contains code to interact with the Lolos group-management
// backend: volunteer and member organizations ("groups"), their roles and
// memberships, semesters, positions ("cargos"), activities, and the
// assignment of members to positions within activities.
//
// The backend is a REST API. Requests carry a bearer token in the
// Authorization header once one is set on the client; token issuance itself
// (login/register) is outside the scope of this library. Some controllers
// wrap responses in a {"data": ...} envelope, others return the entity bare;
// the per-endpoint methods below encode which is which.
//
// Alongside the client, the crate ships the domain rules the mobile app
// enforces before it talks to the server:
//   policy  - role-level authorization (who may manage what)
//   roster  - activity capacity and candidate eligibility
// Both are pure and perform no I/O; the backend re-checks the same rules
// atomically and remains the source of truth.

mod api;

pub mod policy;
pub mod roster;

pub use api::*;
pub use api::user::*;
pub use api::group::*;
pub use api::semester::*;
pub use api::activity::*;
pub use api::goal::*;
pub use roster::*;

use chrono::prelude::*;
use chrono::SecondsFormat;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error as ThisError;
use tracing::debug;

// =================================================================================================================================
// Errors:

#[derive(ThisError, Debug)]
pub enum Error {
    // Raw data failed its required-field or invariant checks.
    #[error("malformed entity: {0}")]
    MalformedEntity(String),

    // The actor's role level is below the threshold the action requires.
    #[error("role level {actor} is below the required level {required}")]
    InsufficientPrivilege { actor: u32, required: u32 },

    // The requested position has no remaining capacity on this activity.
    #[error("position {0} has no open slots on this activity")]
    PositionFull(PositionId),

    // The candidate already holds an assignment on this activity.
    #[error("user {0} already holds an assignment on this activity")]
    NotEligible(UserId),

    #[error("resource not found")]
    NotFound,

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not parse response: {0}")]
    Json(#[from] serde_json::Error)
}

pub type LolosResult<T> = Result<T, Error>;

// =================================================================================================================================
// Lolos API client:

pub const DEFAULT_BASE_URL : &str = "https://api.lolosapp.com";

pub struct Lolos {
    connection : reqwest::blocking::Client,
    base_url   : String,
    token      : Option<String>
}


impl Lolos {
    // Query parameters go through reqwest so they are percent-encoded;
    // a literal "+" in an email must not arrive server-side as a space.
    fn request(&self, method: reqwest::Method, path: &str, query: &[(&str, &str)]) -> reqwest::blocking::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "lolos api request");
        let mut req = self.connection.request(method, &url).query(query);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }


    fn execute(&self, method: reqwest::Method, path: &str, query: &[(&str, &str)],
               body: Option<&serde_json::Value>) -> LolosResult<String> {
        let mut req = self.request(method, path, query);
        if let Some(body) = body {
            req = req.json(body);
        }
        let res = req.send()?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound);
        }
        Ok(res.error_for_status()?.text()?)
    }


    // Entities are validated before they are returned, so callers never see
    // a record that violates its own invariants.
    fn retrieve<T>(&self, path: &str, query: &[(&str, &str)]) -> LolosResult<T>
        where T: DeserializeOwned + Validate
    {
        let body   = self.execute(reqwest::Method::GET, path, query, None)?;
        let entity = serde_json::from_str::<T>(&body)?;
        entity.validate()?;
        Ok(entity)
    }


    fn retrieve_wrapped<T>(&self, path: &str, query: &[(&str, &str)]) -> LolosResult<T>
        where T: DeserializeOwned + Validate
    {
        let body = self.execute(reqwest::Method::GET, path, query, None)?;
        let env  = serde_json::from_str::<ApiResponse<T>>(&body)?;
        env.data.validate()?;
        Ok(env.data)
    }


    fn create<T>(&self, path: &str, payload: &serde_json::Value) -> LolosResult<T>
        where T: DeserializeOwned + Validate
    {
        let body   = self.execute(reqwest::Method::POST, path, &[], Some(payload))?;
        let entity = serde_json::from_str::<T>(&body)?;
        entity.validate()?;
        Ok(entity)
    }


    fn create_wrapped<T>(&self, path: &str, payload: &serde_json::Value) -> LolosResult<T>
        where T: DeserializeOwned + Validate
    {
        let body = self.execute(reqwest::Method::POST, path, &[], Some(payload))?;
        let env  = serde_json::from_str::<ApiResponse<T>>(&body)?;
        env.data.validate()?;
        Ok(env.data)
    }


    fn patch_wrapped<T>(&self, path: &str, payload: &serde_json::Value) -> LolosResult<T>
        where T: DeserializeOwned + Validate
    {
        let body = self.execute(reqwest::Method::PATCH, path, &[], Some(payload))?;
        let env  = serde_json::from_str::<ApiResponse<T>>(&body)?;
        env.data.validate()?;
        Ok(env.data)
    }


    fn remove(&self, path: &str) -> LolosResult<()> {
        self.execute(reqwest::Method::DELETE, path, &[], None)?;
        Ok(())
    }


    pub fn new(base_url: &str) -> Self {
        Lolos {
            connection : reqwest::blocking::Client::new(),
            base_url   : base_url.trim_end_matches('/').to_string(),
            token      : None
        }
    }


    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }


    // ----------------------------------------------------------------------------------------------------------------------------
    // Endpoints for groups, roles and membership:
    //   GET  /groups/user/{userId}     - groups the user belongs to
    //   POST /groups                   - create a group
    //   GET  /groups/{id}              - group detail (roles, members, semesters)
    //   POST /group-roles              - create a role within a group
    //   GET  /users/search?email=...   - look up a user by email
    //   POST /groups/{id}/add-member   - add a member to a group

    pub fn user_groups(&self, user: &UserId) -> LolosResult<Vec<Group>> {
        self.retrieve_wrapped(&format!("/groups/user/{}", user.0), &[])
    }


    pub fn create_group(&self, name: &str, description: Option<&str>, created_by: &UserId) -> LolosResult<Group> {
        self.create_wrapped("/groups", &json!({
            "name"        : name,
            "description" : description,
            "createdById" : created_by
        }))
    }


    pub fn group(&self, group: &GroupId) -> LolosResult<Group> {
        self.retrieve_wrapped(&format!("/groups/{}", group.0), &[])
    }


    // The proposed level must be below the actor's own; check with
    // policy::can_create_role before calling, the backend rejects
    // escalations as well.
    pub fn create_group_role(&self, group: &GroupId, name: &str, description: Option<&str>, level: u32) -> LolosResult<GroupRole> {
        self.create_wrapped("/group-roles", &json!({
            "groupId"     : group,
            "name"        : name,
            "description" : description,
            "level"       : level
        }))
    }


    pub fn search_user_by_email(&self, email: &str) -> LolosResult<User> {
        self.retrieve_wrapped("/users/search", &[("email", email)])
    }


    pub fn add_member(&self, group: &GroupId, user: &UserId, assigned_by: &UserId) -> LolosResult<UserGroup> {
        self.create_wrapped(&format!("/groups/{}/add-member", group.0), &json!({
            "userId"           : user,
            "assignedByUserId" : assigned_by
        }))
    }


    // ----------------------------------------------------------------------------------------------------------------------------
    // Endpoints for semesters:
    //   GET    /semester?groupId=...   - semesters of a group
    //   POST   /semester               - create a semester
    //   GET    /semester/{id}          - semester detail (activities, positions)
    //   DELETE /semester/{id}

    pub fn semesters(&self, group: &GroupId) -> LolosResult<Vec<Semester>> {
        self.retrieve("/semester", &[("groupId", &group.0)])
    }


    pub fn create_semester(&self, group: &GroupId, name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> LolosResult<Semester> {
        self.create("/semester", &json!({
            "groupId"   : group,
            "name"      : name,
            "startDate" : start.to_rfc3339_opts(SecondsFormat::Millis, true),
            "endDate"   : end.to_rfc3339_opts(SecondsFormat::Millis, true)
        }))
    }


    pub fn semester(&self, semester: &SemesterId) -> LolosResult<Semester> {
        self.retrieve(&format!("/semester/{}", semester.0), &[])
    }


    pub fn delete_semester(&self, semester: &SemesterId) -> LolosResult<()> {
        self.remove(&format!("/semester/{}", semester.0))
    }


    // ----------------------------------------------------------------------------------------------------------------------------
    // Endpoints for positions:
    //   GET    /position?semesterId=...  - positions defined in a semester
    //   POST   /position                 - create a position
    //   PATCH  /position/{id}            - partial update
    //   DELETE /position/{id}

    pub fn positions(&self, semester: &SemesterId) -> LolosResult<Vec<Position>> {
        self.retrieve_wrapped("/position", &[("semesterId", &semester.0)])
    }


    pub fn create_position(&self, semester: &SemesterId, name: &str, description: Option<&str>) -> LolosResult<Position> {
        self.create_wrapped("/position", &json!({
            "semesterId"  : semester,
            "name"        : name,
            "description" : description
        }))
    }


    pub fn update_position(&self, position: &PositionId, patch: &PositionPatch) -> LolosResult<Position> {
        self.patch_wrapped(&format!("/position/{}", position.0), &serde_json::to_value(patch)?)
    }


    pub fn delete_position(&self, position: &PositionId) -> LolosResult<()> {
        self.remove(&format!("/position/{}", position.0))
    }


    // ----------------------------------------------------------------------------------------------------------------------------
    // Endpoints for activities:
    //   GET    /activity?semesterId=...  - activities in a semester
    //   POST   /activity                 - create an activity with its requirements
    //   GET    /activity/{id}            - activity detail (requirements, roster)
    //   DELETE /activity/{id}

    pub fn activities(&self, semester: &SemesterId) -> LolosResult<Vec<Activity>> {
        self.retrieve("/activity", &[("semesterId", &semester.0)])
    }


    pub fn create_activity(&self, semester: &SemesterId, name: &str, date: DateTime<Utc>,
                           location: &str, description: Option<&str>,
                           requirements: &[NewActivityPosition]) -> LolosResult<Activity> {
        // Same bound Activity::validate holds deserialized data to: a
        // requirement for zero slots is rejected before anything is sent.
        for requirement in requirements {
            if requirement.quantity == 0 {
                return Err(Error::MalformedEntity(
                    format!("requirement for position {} requests zero slots", requirement.position_id)));
            }
        }
        self.create("/activity", &json!({
            "semesterId"  : semester,
            "name"        : name,
            "date"        : date.to_rfc3339_opts(SecondsFormat::Millis, true),
            "location"    : location,
            "description" : description,
            "positions"   : requirements
        }))
    }


    pub fn activity(&self, activity: &ActivityId) -> LolosResult<Activity> {
        self.retrieve(&format!("/activity/{}", activity.0), &[])
    }


    pub fn delete_activity(&self, activity: &ActivityId) -> LolosResult<()> {
        self.remove(&format!("/activity/{}", activity.0))
    }


    // ----------------------------------------------------------------------------------------------------------------------------
    // Endpoints for assignments:
    //   POST   /assignment       - assign a member to a position slot
    //   DELETE /assignment/{id}  - remove an assignment
    //
    // Build the request descriptors with roster::request_assignment /
    // roster::request_removal so capacity, eligibility and privilege are
    // checked before anything is sent.

    pub fn create_assignment(&self, request: &AssignmentRequest, notes: Option<&str>) -> LolosResult<Assignment> {
        self.create_wrapped("/assignment", &json!({
            "activityId" : request.activity_id,
            "positionId" : request.position_id,
            "userId"     : request.user_id,
            "notes"      : notes
        }))
    }


    pub fn delete_assignment(&self, request: &RemovalRequest) -> LolosResult<()> {
        self.remove(&format!("/assignment/{}", request.assignment_id.0))
    }


    // ----------------------------------------------------------------------------------------------------------------------------
    // Endpoints for fundraising goals:
    //   GET /goal/active?groupId=...  - the group's active goal, 404 if none

    pub fn active_goal(&self, group: &GroupId) -> LolosResult<Option<Goal>> {
        match self.retrieve::<Goal>("/goal/active", &[("groupId", &group.0)]) {
            Ok(goal)             => Ok(Some(goal)),
            Err(Error::NotFound) => Ok(None),
            Err(e)               => Err(e)
        }
    }
}


impl Default for Lolos {
    fn default() -> Self {
        Lolos::new(DEFAULT_BASE_URL)
    }
}

// =================================================================================================================================
// Test suite:

#[cfg(test)]
mod lolos_tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn user(id: &str) -> User {
        User {
            id         : UserId(id.to_string()),
            first_name : id.to_string(),
            last_name  : "Pérez".to_string(),
            rut        : "12.345.678-5".to_string(),
            email      : format!("{}@example.com", id),
            phone      : None,
            occupation : None,
            address    : None,
            birth_date : None
        }
    }

    fn member(id: &str, level: Option<u32>) -> UserGroup {
        UserGroup {
            id         : UserGroupId(format!("ug-{}", id)),
            user       : user(id),
            is_creator : false,
            group_role : level.map(|l| GroupRole {
                id          : GroupRoleId(format!("role-{}", id)),
                name        : "Rol".to_string(),
                description : None,
                level       : l,
                is_default  : false,
                is_system   : false
            })
        }
    }

    fn position(id: &str, name: &str) -> Position {
        Position { id: PositionId(id.to_string()), name: name.to_string(), description: None }
    }

    fn requirement(id: &str, position: &Position, quantity: u32) -> ActivityPosition {
        ActivityPosition {
            id       : ActivityPositionId(id.to_string()),
            position : position.clone(),
            quantity : quantity
        }
    }

    fn assignment(id: &str, position: &Position, member: &User) -> Assignment {
        Assignment {
            id       : AssignmentId(id.to_string()),
            position : position.clone(),
            user     : member.clone(),
            notes    : None
        }
    }

    fn activity(name: &str, requirements: Vec<ActivityPosition>, assignments: Vec<Assignment>) -> Activity {
        Activity {
            id                 : ActivityId(format!("act-{}", name)),
            name               : name.to_string(),
            date               : ts("2025-06-14T18:00:00.000Z"),
            location           : "Sede central".to_string(),
            description        : None,
            activity_positions : requirements,
            assignments        : assignments
        }
    }

    // ----------------------------------------------------------------------------------------------------------------------------
    // Tests relating to entity construction:

    #[test]
    fn test_group_from_payload() -> LolosResult<()> {
        let payload = r#"{
            "id": "g1",
            "name": "Club de Lolos",
            "description": "Agrupación de voluntarios",
            "roles": [
                {"id": "r1", "name": "Presidente", "level": 100, "isDefault": false, "isSystem": true},
                {"id": "r2", "name": "Socio", "level": 10, "isDefault": true}
            ],
            "userGroups": [
                {"id": "ug1", "isCreator": true,
                 "user": {"id": "u1", "firstName": "Ana", "lastName": "Rojas",
                          "rut": "12.345.678-5", "email": "ana@example.com"},
                 "groupRole": {"id": "r1", "name": "Presidente", "level": 100,
                               "isDefault": false, "isSystem": true}}
            ]
        }"#;

        let g = serde_json::from_str::<Group>(payload)?;
        g.validate()?;

        assert_eq!(g.id,             GroupId("g1".to_string()));
        assert_eq!(g.name,           "Club de Lolos");
        assert_eq!(g.roles.len(),    2);
        assert_eq!(g.roles[0].level, 100);
        assert!(g.roles[0].is_system);
        assert!(g.roles[1].is_default);

        let m = g.membership_of(&UserId("u1".to_string())).unwrap();
        assert!(m.is_creator);
        assert_eq!(m.user.full_name(), "Ana Rojas");
        assert_eq!(policy::effective_level(m), 100);

        Ok(())
    }


    #[test]
    fn test_semester_from_payload() -> LolosResult<()> {
        let payload = r#"{
            "id": "sem1",
            "name": "Primer Semestre 2025",
            "startDate": "2025-03-01T00:00:00.000Z",
            "endDate": "2025-07-31T00:00:00.000Z",
            "isActive": true,
            "positions": [
                {"id": "p1", "name": "Cocinero"},
                {"id": "p2", "name": "Cajero", "description": "Maneja la caja"}
            ]
        }"#;

        let s = serde_json::from_str::<Semester>(payload)?;
        s.validate()?;

        assert_eq!(s.name,       "Primer Semestre 2025");
        assert_eq!(s.start_date, ts("2025-03-01T00:00:00.000Z"));
        assert_eq!(s.end_date,   ts("2025-07-31T00:00:00.000Z"));
        assert!(s.is_active);
        assert_eq!(s.positions.len(), 2);
        assert_eq!(s.positions[1].description.as_deref(), Some("Maneja la caja"));

        Ok(())
    }


    #[test]
    fn test_activity_from_payload() -> LolosResult<()> {
        let payload = r#"{
            "id": "a1",
            "name": "Completada",
            "date": "2025-06-14T18:00:00.000Z",
            "location": "Plaza de Armas",
            "activityPositions": [
                {"id": "ap1", "position": {"id": "p1", "name": "Cocinero"}, "quantity": 2},
                {"id": "ap2", "position": {"id": "p2", "name": "Cajero"}, "quantity": 2}
            ],
            "assignments": [
                {"id": "s1", "position": {"id": "p1", "name": "Cocinero"},
                 "user": {"id": "u1", "firstName": "Ana", "lastName": "Rojas",
                          "rut": "12.345.678-5", "email": "ana@example.com"}}
            ]
        }"#;

        let a = serde_json::from_str::<Activity>(payload)?;
        a.validate()?;

        assert_eq!(a.location,       "Plaza de Armas");
        assert_eq!(a.total_required(), 4);
        assert_eq!(a.filled_count(&PositionId("p1".to_string())), 1);
        assert_eq!(a.filled_count(&PositionId("p2".to_string())), 0);
        assert_eq!(a.progress(),     0.25);
        assert!(a.is_assigned(&UserId("u1".to_string())));

        Ok(())
    }


    #[test]
    fn test_payload_missing_required_field() {
        // No "name": rejected at deserialization, not admitted half-built.
        let payload = r#"{"id": "a1", "date": "2025-06-14T18:00:00.000Z", "location": "Sede"}"#;
        assert!(serde_json::from_str::<Activity>(payload).is_err());
    }


    #[test]
    fn test_empty_group_name_rejected() {
        let g = Group {
            id          : GroupId("g1".to_string()),
            name        : "   ".to_string(),
            description : None,
            roles       : vec!(),
            user_groups : vec!(),
            semesters   : vec!()
        };
        match g.validate() {
            Err(Error::MalformedEntity(_)) => {},
            other                          => panic!("expected MalformedEntity, got {:?}", other)
        }
    }


    #[test]
    fn test_duplicate_default_role_rejected() {
        let role = |id: &str| GroupRole {
            id          : GroupRoleId(id.to_string()),
            name        : "Socio".to_string(),
            description : None,
            level       : 10,
            is_default  : true,
            is_system   : false
        };
        let g = Group {
            id          : GroupId("g1".to_string()),
            name        : "Club".to_string(),
            description : None,
            roles       : vec!(role("r1"), role("r2")),
            user_groups : vec!(),
            semesters   : vec!()
        };
        assert!(matches!(g.validate(), Err(Error::MalformedEntity(_))));
    }


    #[test]
    fn test_duplicate_membership_rejected() {
        let g = Group {
            id          : GroupId("g1".to_string()),
            name        : "Club".to_string(),
            description : None,
            roles       : vec!(),
            user_groups : vec!(member("u1", None), member("u1", Some(10))),
            semesters   : vec!()
        };
        assert!(matches!(g.validate(), Err(Error::MalformedEntity(_))));
    }


    #[test]
    fn test_semester_date_ordering() {
        let s = Semester {
            id         : SemesterId("sem1".to_string()),
            name       : "Invertido".to_string(),
            start_date : ts("2025-07-31T00:00:00.000Z"),
            end_date   : ts("2025-03-01T00:00:00.000Z"),
            is_active  : false,
            activities : vec!(),
            positions  : vec!()
        };
        assert!(matches!(s.validate(), Err(Error::MalformedEntity(_))));
    }


    #[test]
    fn test_zero_quantity_requirement_rejected() {
        let cook = position("p1", "Cocinero");
        let a = activity("Bingo", vec!(requirement("ap1", &cook, 0)), vec!());
        assert!(matches!(a.validate(), Err(Error::MalformedEntity(_))));
    }


    #[test]
    fn test_overfull_roster_rejected() {
        let cook = position("p1", "Cocinero");
        let a = activity("Bingo",
                         vec!(requirement("ap1", &cook, 1)),
                         vec!(assignment("s1", &cook, &user("u1")),
                              assignment("s2", &cook, &user("u2"))));
        assert!(matches!(a.validate(), Err(Error::MalformedEntity(_))));
    }


    #[test]
    fn test_double_assignment_rejected() {
        let cook   = position("p1", "Cocinero");
        let cashier = position("p2", "Cajero");
        let u1 = user("u1");
        let a = activity("Bingo",
                         vec!(requirement("ap1", &cook, 1), requirement("ap2", &cashier, 1)),
                         vec!(assignment("s1", &cook, &u1),
                              assignment("s2", &cashier, &u1)));
        assert!(matches!(a.validate(), Err(Error::MalformedEntity(_))));
    }


    #[test]
    fn test_user_round_trip() -> LolosResult<()> {
        let payload = r#"{
            "id": "u1", "firstName": "Ana", "lastName": "Rojas",
            "rut": "12.345.678-5", "email": "ana@example.com",
            "phone": "+56 9 1234 5678", "birthDate": "1998-11-23T00:00:00.000Z"
        }"#;

        let u       = serde_json::from_str::<User>(payload)?;
        let encoded = serde_json::to_string(&u)?;

        // Wire names survive re-serialization...
        let v = serde_json::from_str::<serde_json::Value>(&encoded)?;
        assert_eq!(v["id"],        "u1");
        assert_eq!(v["firstName"], "Ana");
        assert_eq!(v["lastName"],  "Rojas");
        assert_eq!(v["rut"],       "12.345.678-5");
        assert_eq!(v["email"],     "ana@example.com");
        assert_eq!(v["birthDate"], "1998-11-23T00:00:00.000Z");

        // ...and so do the values.
        let again = serde_json::from_str::<User>(&encoded)?;
        assert_eq!(again.id,         u.id);
        assert_eq!(again.email,      u.email);
        assert_eq!(again.phone,      u.phone);
        assert_eq!(again.birth_date, u.birth_date);

        Ok(())
    }

    // ----------------------------------------------------------------------------------------------------------------------------
    // Tests relating to the authorization policy:

    #[test]
    fn test_effective_level() {
        assert_eq!(policy::effective_level(&member("u1", Some(policy::level::ADMIN))), 50);
        assert_eq!(policy::effective_level(&member("u2", None)), 0);
    }


    #[test]
    fn test_can_manage_is_monotonic() {
        for threshold in &[policy::level::MEMBER, policy::level::ADMIN, policy::level::OWNER] {
            let mut previous = false;
            for actor in 0..=120 {
                let now = policy::can_manage(actor, *threshold);
                assert!(now || !previous);  // once granted, never revoked as the level rises
                previous = now;
            }
        }
        assert!(policy::level::MEMBER < policy::level::ADMIN);
        assert!(policy::level::ADMIN  < policy::level::OWNER);
        assert!(policy::can_manage(policy::level::ADMIN, policy::level::MEMBER));
        assert!(!policy::can_manage(policy::level::MEMBER, policy::level::ADMIN));
    }


    #[test]
    fn test_can_create_role_is_strict() {
        for actor in 0..=110 {
            for proposed in 0..=110 {
                assert_eq!(policy::can_create_role(actor, proposed), proposed < actor);
            }
        }
        assert!(!policy::can_create_role(50, 50));
        assert!(policy::can_create_role(50, 49));
    }

    // ----------------------------------------------------------------------------------------------------------------------------
    // Tests relating to roster capacity and eligibility:

    #[test]
    fn test_progress_fills_to_one() -> LolosResult<()> {
        let cook = position("p1", "Cocinero");
        let req  = requirement("ap1", &cook, 2);
        let mut a = activity("Bingo", vec!(req.clone()), vec!());

        assert_eq!(a.progress(), 0.0);
        assert!(!a.is_position_full(&req));

        a.assignments.push(assignment("s1", &cook, &user("u1")));
        assert_eq!(a.progress(), 0.5);
        assert!(!a.is_position_full(&req));

        a.assignments.push(assignment("s2", &cook, &user("u2")));
        a.validate()?;
        assert_eq!(a.filled_count(&cook.id), 2);
        assert_eq!(a.progress(), 1.0);
        assert!(a.is_position_full(&req));

        Ok(())
    }


    #[test]
    fn test_progress_without_requirements() {
        let a = activity("Vacía", vec!(), vec!());
        assert_eq!(a.progress(), 0.0);
        assert!(a.progress().is_finite());
    }


    #[test]
    fn test_progress_never_exceeds_one() -> LolosResult<()> {
        // Assignments may name positions that have no listed requirement;
        // the fill fraction still tops out at 1.
        let cook    = position("p1", "Cocinero");
        let cashier = position("p2", "Cajero");
        let door    = position("p3", "Portero");
        let a = activity("Bingo",
                         vec!(requirement("ap1", &cook, 1)),
                         vec!(assignment("s1", &cashier, &user("u1")),
                              assignment("s2", &door, &user("u2"))));

        a.validate()?;
        assert_eq!(a.total_required(), 1);
        assert_eq!(a.assignments.len(), 2);
        assert_eq!(a.progress(), 1.0);

        Ok(())
    }


    #[test]
    fn test_eligible_candidates_exclude_assigned() {
        let cook    = position("p1", "Cocinero");
        let members = vec!(member("u1", None), member("u2", Some(50)), member("u3", None));
        let a = activity("Bingo",
                         vec!(requirement("ap1", &cook, 2)),
                         vec!(assignment("s1", &cook, &user("u2"))));

        let eligible = a.eligible_candidates(&members);
        let ids: Vec<&str> = eligible.iter().map(|u| u.id.0.as_str()).collect();
        assert_eq!(ids, vec!("u1", "u3"));
    }


    #[test]
    fn test_bingo_cashier_scenario() -> LolosResult<()> {
        let cashier = position("p1", "Cajero");
        let door    = position("p2", "Portero");
        let req_cashier = requirement("ap1", &cashier, 1);
        let req_door    = requirement("ap2", &door, 1);
        let mut bingo = activity("Bingo", vec!(req_cashier.clone(), req_door.clone()), vec!());

        let u1 = user("u1");
        let u2 = user("u2");

        // U1 takes the only cashier slot.
        let req = request_assignment(&bingo, &req_cashier, &u1, policy::level::ADMIN)?;
        assert_eq!(req.activity_id, bingo.id);
        assert_eq!(req.position_id, cashier.id);
        assert_eq!(req.user_id,     u1.id);

        bingo.assignments.push(assignment("s1", &cashier, &u1));
        assert!(bingo.is_position_full(&req_cashier));

        // No second cashier.
        match request_assignment(&bingo, &req_cashier, &u2, policy::level::ADMIN) {
            Err(Error::PositionFull(p)) => assert_eq!(p, cashier.id),
            other                       => panic!("expected PositionFull, got {:?}", other)
        }

        // U1 is already on the roster, any position.
        match request_assignment(&bingo, &req_door, &u1, policy::level::ADMIN) {
            Err(Error::NotEligible(u)) => assert_eq!(u, u1.id),
            other                      => panic!("expected NotEligible, got {:?}", other)
        }

        Ok(())
    }


    #[test]
    fn test_assignment_needs_admin() -> LolosResult<()> {
        let cook = position("p1", "Cocinero");
        let req  = requirement("ap1", &cook, 1);
        let a    = activity("Bingo", vec!(req.clone()), vec!());
        let u1   = user("u1");

        match request_assignment(&a, &req, &u1, policy::level::MEMBER) {
            Err(Error::InsufficientPrivilege { actor, required }) => {
                assert_eq!(actor,    policy::level::MEMBER);
                assert_eq!(required, policy::level::ADMIN);
            }
            other => panic!("expected InsufficientPrivilege, got {:?}", other)
        }

        let descriptor = request_assignment(&a, &req, &u1, policy::level::ADMIN)?;
        assert_eq!(descriptor.user_id, u1.id);

        Ok(())
    }


    #[test]
    fn test_removal_needs_admin() -> LolosResult<()> {
        let cook = position("p1", "Cocinero");
        let s1   = assignment("s1", &cook, &user("u1"));

        assert!(matches!(request_removal(&s1, policy::level::MEMBER),
                         Err(Error::InsufficientPrivilege { .. })));

        let removal = request_removal(&s1, policy::level::OWNER)?;
        assert_eq!(removal.assignment_id, s1.id);

        Ok(())
    }

    // ----------------------------------------------------------------------------------------------------------------------------
    // Tests relating to goals:

    #[test]
    fn test_goal_progress() -> LolosResult<()> {
        let payload = r#"{
            "id": "goal1", "name": "Gira de fin de año",
            "targetAmount": 500000, "currentAmount": 125000,
            "startDate": "2025-03-01T00:00:00.000Z", "isActive": true
        }"#;

        let mut g = serde_json::from_str::<Goal>(payload)?;
        g.validate()?;
        assert_eq!(g.progress(), 0.25);

        // Over-funded clamps to 1, and a zero target never divides by zero.
        g.current_amount = 900000.0;
        assert_eq!(g.progress(), 1.0);
        g.target_amount = 0.0;
        assert_eq!(g.progress(), 0.0);

        Ok(())
    }

    // ----------------------------------------------------------------------------------------------------------------------------
    // Tests relating to client configuration:

    #[test]
    fn test_client_configuration() {
        let c = Lolos::new("http://127.0.0.1:3000/");
        assert_eq!(c.base_url, "http://127.0.0.1:3000");
        assert!(c.token.is_none());

        let c = Lolos::default().with_token("secret");
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.token.as_deref(), Some("secret"));
    }


    #[test]
    fn test_query_parameters_are_encoded() -> LolosResult<()> {
        // A "+" in an email must reach the server as %2B, not as a space.
        let c = Lolos::new("http://127.0.0.1:3000");
        let req = c.request(reqwest::Method::GET, "/users/search",
                            &[("email", "ana+lolos@example.com")]).build()?;

        assert_eq!(req.url().path(),  "/users/search");
        assert_eq!(req.url().query(), Some("email=ana%2Blolos%40example.com"));

        Ok(())
    }


    #[test]
    fn test_zero_quantity_requirement_not_submitted() {
        // Rejected client-side; nothing listens on this address, so reaching
        // the wire would surface as Error::Http instead.
        let api = Lolos::new("http://127.0.0.1:9");
        let bad = NewActivityPosition {
            position_id : PositionId("p1".to_string()),
            quantity    : 0
        };
        match api.create_activity(&SemesterId("sem1".to_string()), "Bingo",
                                  ts("2025-06-14T18:00:00.000Z"), "Sede central",
                                  None, &[bad]) {
            Err(Error::MalformedEntity(_)) => {},
            other => panic!("expected MalformedEntity, got {:?}", other)
        }
    }
}

// =================================================================================================================================
