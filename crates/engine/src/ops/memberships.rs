//! Membership terms: lazy creation on update and self-service renewal.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, DatabaseTransaction, prelude::*};

use crate::{
    EngineError, MembershipDetails, ResultEngine, membership_details,
    membership_details::add_one_year,
};

use super::{Engine, with_tx};

impl Engine {
    /// Creates the membership if missing, otherwise overwrites the supplied
    /// fields.
    ///
    /// Creating a membership needs both the date and the plan; an update with
    /// neither is a no-op.
    pub(super) async fn upsert_membership(
        &self,
        db_tx: &DatabaseTransaction,
        member_id: i32,
        membership_date: Option<NaiveDate>,
        membership_time: Option<String>,
    ) -> ResultEngine<()> {
        match self.find_membership_model(db_tx, member_id).await? {
            Some(existing) => {
                if membership_date.is_none() && membership_time.is_none() {
                    return Ok(());
                }
                let mut active: membership_details::ActiveModel = existing.into();
                if let Some(date) = membership_date {
                    active.membership_date = ActiveValue::Set(date);
                }
                if let Some(time) = membership_time {
                    active.membership_time = ActiveValue::Set(time);
                }
                active.update(db_tx).await?;
                tracing::info!("updated membership of member {member_id}");
            }
            None => match (membership_date, membership_time) {
                (None, None) => {}
                (Some(date), Some(time)) => {
                    membership_details::ActiveModel {
                        membership_date: ActiveValue::Set(date),
                        membership_time: ActiveValue::Set(time),
                        member_id: ActiveValue::Set(member_id),
                        ..Default::default()
                    }
                    .insert(db_tx)
                    .await?;
                    tracing::info!("created membership for member {member_id} from {date}");
                }
                _ => {
                    return Err(EngineError::MissingField(
                        "membership_date and membership_time are both required to create a membership"
                            .to_string(),
                    ));
                }
            },
        }
        Ok(())
    }

    /// Returns the membership of `member_id`, if any.
    pub async fn membership(&self, member_id: i32) -> ResultEngine<Option<MembershipDetails>> {
        Ok(self
            .find_membership_model(&self.database, member_id)
            .await?
            .map(Into::into))
    }

    /// Advances the membership anchor date of `member_id` by one year.
    ///
    /// The plan (`membership_time`) is left as it is.
    pub async fn renew_membership(&self, member_id: i32) -> ResultEngine<MembershipDetails> {
        with_tx!(self, |db_tx| {
            let existing = self
                .find_membership_model(&db_tx, member_id)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("no membership to renew".to_string()))?;

            let renewed = add_one_year(existing.membership_date)?;
            let mut active: membership_details::ActiveModel = existing.into();
            active.membership_date = ActiveValue::Set(renewed);
            let model = active.update(&db_tx).await?;

            tracing::info!("renewed membership of member {member_id} until {renewed}");
            Ok(MembershipDetails::from(model))
        })
    }
}
