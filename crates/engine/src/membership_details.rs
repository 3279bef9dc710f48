//! The module contains `MembershipDetails` and the renewal date arithmetic.

use chrono::{Months, NaiveDate};
use sea_orm::entity::prelude::*;

use crate::{EngineError, ResultEngine};

/// Format used to read and print membership dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The current membership term of a member.
///
/// `membership_date` anchors the term, `membership_time` describes the plan
/// (e.g. "1 year"). There is no lapsed state: callers needing an expiry use
/// [`MembershipDetails::expires_on`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipDetails {
    pub id: i32,
    pub membership_date: NaiveDate,
    pub membership_time: String,
}

impl MembershipDetails {
    /// Date one year after the anchor date.
    pub fn expires_on(&self) -> ResultEngine<NaiveDate> {
        add_one_year(self.membership_date)
    }
}

impl From<Model> for MembershipDetails {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            membership_date: model.membership_date,
            membership_time: model.membership_time,
        }
    }
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(format!("'{raw}' is not a YYYY-MM-DD date")))
}

/// Advance `date` by one calendar year.
///
/// February 29 clamps to February 28 of the following year.
pub fn add_one_year(date: NaiveDate) -> ResultEngine<NaiveDate> {
    date.checked_add_months(Months::new(12))
        .ok_or_else(|| EngineError::InvalidDate(format!("cannot renew past {date}")))
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "membership_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub membership_date: Date,
    pub membership_time: String,
    #[sea_orm(unique)]
    pub member_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Members,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
