use sea_orm::{QueryFilter, prelude::*};

use crate::{EngineError, Member, ResultEngine, members, password::verify_login_blocking};

use super::Engine;

impl Engine {
    /// Check a username/password pair and return the matching member.
    ///
    /// Unknown usernames and wrong passwords fail the same way and take as
    /// long: an unknown username is checked against the decoy hash.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<Member> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(EngineError::InvalidCredentials);
        }

        let member = members::Entity::find()
            .filter(members::Column::Username.eq(username))
            .one(&self.database)
            .await?;

        let stored = member.as_ref().map(|member| member.password.clone());
        let verified = verify_login_blocking(password, stored, &self.decoy_hash).await?;

        match member {
            Some(member) if verified => Ok(member.into()),
            Some(_) => {
                tracing::warn!("wrong password for '{username}'");
                Err(EngineError::InvalidCredentials)
            }
            None => {
                tracing::warn!("login attempt for unknown user '{username}'");
                Err(EngineError::InvalidCredentials)
            }
        }
    }

    /// Load a member by id.
    pub async fn member(&self, id: i32) -> ResultEngine<Member> {
        self.find_member_model(&self.database, id)
            .await
            .map(Into::into)
    }
}
