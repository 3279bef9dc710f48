//! Member directory operations (admin side).

use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, Member, ResultEngine, Role, members, membership_details,
    membership_details::parse_date,
    password::hash_blocking,
    util::{
        MEMBERSHIP_TIME_MAX_LEN, PASSWORD_MAX_LEN, USERNAME_MAX_LEN, max_len, optional,
        parse_member_id, required,
    },
};

use super::{Engine, MemberRecord, MemberUpdate, with_tx};

impl Engine {
    /// Lists every member in primary key order.
    pub async fn list_members(&self) -> ResultEngine<Vec<Member>> {
        let rows = members::Entity::find()
            .order_by_asc(members::Column::Id)
            .all(&self.database)
            .await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    /// Registers a new member with role `User` from raw form values.
    pub async fn add_member(&self, id: &str, username: &str, password: &str) -> ResultEngine<Member> {
        let missing: Vec<&str> = [("id", id.trim()), ("username", username.trim()), ("password", password)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(label, _)| label)
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::MissingField(missing.join(", ")));
        }

        let id = parse_member_id(id)?;
        self.create_member(id, username, password, Role::User).await
    }

    /// Creates a member with an explicit role.
    ///
    /// Both the id and the username must be unused.
    pub async fn create_member(
        &self,
        id: i32,
        username: &str,
        password: &str,
        role: Role,
    ) -> ResultEngine<Member> {
        let username = required(username, "username")?.to_string();
        if password.is_empty() {
            return Err(EngineError::MissingField("password is required".to_string()));
        }
        max_len(&username, USERNAME_MAX_LEN, "username")?;
        max_len(password, PASSWORD_MAX_LEN, "password")?;
        let password = hash_blocking(password, self.password_rounds).await?;

        with_tx!(self, |db_tx| {
            if members::Entity::find_by_id(id).one(&db_tx).await?.is_some() {
                return Err(EngineError::ExistingKey(format!(
                    "User with ID {id} already exists!"
                )));
            }
            self.require_username_free(&db_tx, &username).await?;

            let model = members::ActiveModel {
                id: ActiveValue::Set(id),
                username: ActiveValue::Set(username),
                password: ActiveValue::Set(password),
                role: ActiveValue::Set(role),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!("created {role} '{}' with id {id}", model.username);
            Ok(Member::from(model))
        })
    }

    /// Deletes the member called `username` together with its membership.
    ///
    /// Returns the deleted username. `actor_id` is the admin performing the
    /// deletion, who cannot remove their own account.
    pub async fn delete_member(&self, username: &str, actor_id: i32) -> ResultEngine<String> {
        let username = required(username, "username")?.to_string();

        with_tx!(self, |db_tx| {
            let member = members::Entity::find()
                .filter(members::Column::Username.eq(username.as_str()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("User not found.".to_string()))?;
            if member.id == actor_id {
                return Err(EngineError::Forbidden(
                    "admins cannot delete their own account".to_string(),
                ));
            }

            membership_details::Entity::delete_many()
                .filter(membership_details::Column::MemberId.eq(member.id))
                .exec(&db_tx)
                .await?;
            members::Entity::delete_by_id(member.id)
                .exec(&db_tx)
                .await?;

            tracing::info!("deleted member '{}' (id {})", member.username, member.id);
            Ok(member.username)
        })
    }

    /// Loads a member with its membership.
    pub async fn member_record(&self, id: i32) -> ResultEngine<MemberRecord> {
        self.record_in(&self.database, id).await
    }

    /// Applies a partial update to a member and its membership.
    ///
    /// An unknown id is reported before any value is checked. Every value is
    /// validated before anything is written, so a malformed date leaves both
    /// the member and its membership untouched.
    pub async fn update_member(&self, id: i32, update: MemberUpdate) -> ResultEngine<MemberRecord> {
        with_tx!(self, |db_tx| {
            let member = self.find_member_model(&db_tx, id).await?;

            let username = optional(update.username.as_deref()).map(ToString::to_string);
            if let Some(username) = &username {
                max_len(username, USERNAME_MAX_LEN, "username")?;
            }
            let membership_date = optional(update.membership_date.as_deref())
                .map(parse_date)
                .transpose()?;
            let membership_time =
                optional(update.membership_time.as_deref()).map(ToString::to_string);
            if let Some(time) = &membership_time {
                max_len(time, MEMBERSHIP_TIME_MAX_LEN, "membership_time")?;
            }

            if let Some(username) = username
                && username != member.username
            {
                self.require_username_free(&db_tx, &username).await?;
                tracing::info!("renaming member {id}: '{}' -> '{username}'", member.username);
                let mut active: members::ActiveModel = member.into();
                active.username = ActiveValue::Set(username);
                active.update(&db_tx).await?;
            }

            self.upsert_membership(&db_tx, id, membership_date, membership_time)
                .await?;
            self.record_in(&db_tx, id).await
        })
    }

    /// Removes every member and membership.
    pub async fn clear_members(&self) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            membership_details::Entity::delete_many()
                .exec(&db_tx)
                .await?;
            members::Entity::delete_many().exec(&db_tx).await?;
            Ok(())
        })
    }

    async fn require_username_free(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<()> {
        let taken = members::Entity::find()
            .filter(members::Column::Username.eq(username))
            .one(db)
            .await?
            .is_some();
        if taken {
            return Err(EngineError::ExistingKey(format!(
                "Username '{username}' already exists!"
            )));
        }
        Ok(())
    }
}
