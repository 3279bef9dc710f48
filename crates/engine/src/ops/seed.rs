use crate::{ResultEngine, Role};

use super::{Engine, MemberUpdate};

impl Engine {
    /// Replaces all data with a demo admin (`admin`/`admin123`) and a member
    /// (`user`/`user123`) holding a one-year membership from 2025-01-01.
    pub async fn seed_demo(&self) -> ResultEngine<()> {
        self.clear_members().await?;
        self.create_member(1, "admin", "admin123", Role::Admin)
            .await?;
        self.create_member(2, "user", "user123", Role::User).await?;
        self.update_member(
            2,
            MemberUpdate {
                username: None,
                membership_date: Some("2025-01-01".to_string()),
                membership_time: Some("1 year".to_string()),
            },
        )
        .await?;
        tracing::info!("seeded demo members");
        Ok(())
    }
}
