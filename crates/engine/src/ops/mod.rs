use sea_orm::{QueryFilter, prelude::*};

use crate::{EngineError, Member, MembershipDetails, ResultEngine, members, membership_details};

use super::Engine;

mod auth;
mod directory;
mod memberships;
mod seed;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = sea_orm::TransactionTrait::begin(&$self.database).await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// A member together with its membership, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRecord {
    pub member: Member,
    pub membership: Option<MembershipDetails>,
}

/// Partial update of a member submitted by an admin.
///
/// Blank values are ignored, so a form can leave any field empty.
#[derive(Clone, Debug, Default)]
pub struct MemberUpdate {
    pub username: Option<String>,
    pub membership_date: Option<String>,
    pub membership_time: Option<String>,
}

impl Engine {
    async fn find_member_model<C: ConnectionTrait>(
        &self,
        db: &C,
        id: i32,
    ) -> ResultEngine<members::Model> {
        members::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("User with ID {id} does not exist!")))
    }

    async fn find_membership_model<C: ConnectionTrait>(
        &self,
        db: &C,
        member_id: i32,
    ) -> ResultEngine<Option<membership_details::Model>> {
        membership_details::Entity::find()
            .filter(membership_details::Column::MemberId.eq(member_id))
            .one(db)
            .await
            .map_err(Into::into)
    }

    async fn record_in<C: ConnectionTrait>(&self, db: &C, id: i32) -> ResultEngine<MemberRecord> {
        let member = self.find_member_model(db, id).await?;
        let membership = self.find_membership_model(db, id).await?;
        Ok(MemberRecord {
            member: member.into(),
            membership: membership.map(Into::into),
        })
    }
}
