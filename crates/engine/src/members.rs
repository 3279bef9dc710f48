//! The module contains the `Member` struct, its `Role` and the `members`
//! table.

use std::fmt;

use sea_orm::entity::prelude::*;

/// Role of a member.
///
/// Admins manage every member record, users can only see and renew their own
/// membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "user")]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Path of the dashboard a member lands on after login.
    pub fn home(self) -> &'static str {
        match self {
            Self::Admin => "/admin_home",
            Self::User => "/user_home",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gym member able to log in.
///
/// The stored password hash never leaves the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<Model> for Member {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: model.role,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::membership_details::Entity")]
    MembershipDetails,
}

impl Related<super::membership_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
