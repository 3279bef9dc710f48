use sea_orm::DatabaseConnection;

pub use error::EngineError;
pub use members::{Member, Role};
pub use membership_details::{DATE_FORMAT, MembershipDetails, add_one_year, parse_date};
pub use ops::{MemberRecord, MemberUpdate};
pub use password::{DEFAULT_ROUNDS, hash_password, verify_password};
pub use util::parse_member_id;

mod error;
mod members;
mod membership_details;
mod ops;
mod password;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Storage handle shared by every request handler.
///
/// The engine owns no cross-request state besides the connection pool: every
/// operation reads or writes the database directly, and writes run in a
/// single transaction.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    password_rounds: u32,
    /// Hash checked when a login names no member.
    decoy_hash: String,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    password_rounds: u32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            password_rounds: DEFAULT_ROUNDS,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// PBKDF2 rounds used when hashing new passwords.
    pub fn password_rounds(mut self, rounds: u32) -> EngineBuilder {
        self.password_rounds = rounds;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        if self.password_rounds == 0 {
            return Err(EngineError::InvalidField(
                "password_rounds: must be > 0".to_string(),
            ));
        }
        let decoy_hash = password::hash_blocking("decoy", self.password_rounds).await?;
        Ok(Engine {
            database: self.database,
            password_rounds: self.password_rounds,
            decoy_hash,
        })
    }
}
