use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, MemberUpdate, Role};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .password_rounds(1_000)
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn seeded() -> (Engine, DatabaseConnection) {
    let (engine, db) = engine_with_db().await;
    engine.seed_demo().await.unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn membership_update(date: &str, time: &str) -> MemberUpdate {
    MemberUpdate {
        username: Some(String::new()),
        membership_date: Some(date.to_string()),
        membership_time: Some(time.to_string()),
    }
}

async fn stored_password(db: &DatabaseConnection, id: i32) -> String {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT password FROM members WHERE id = ?",
            vec![id.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "password").unwrap()
}

#[tokio::test]
async fn seed_demo_creates_admin_and_member() {
    let (engine, _db) = seeded().await;

    let members = engine.list_members().await.unwrap();
    let summary: Vec<_> = members
        .iter()
        .map(|m| (m.id, m.username.as_str(), m.role))
        .collect();
    assert_eq!(summary, vec![(1, "admin", Role::Admin), (2, "user", Role::User)]);

    let record = engine.member_record(2).await.unwrap();
    let membership = record.membership.unwrap();
    assert_eq!(membership.membership_date, date(2025, 1, 1));
    assert_eq!(membership.membership_time, "1 year");
    assert!(engine.membership(1).await.unwrap().is_none());
}

#[tokio::test]
async fn seed_demo_is_repeatable() {
    let (engine, _db) = seeded().await;
    engine.add_member("3", "carla", "pw").await.unwrap();

    engine.seed_demo().await.unwrap();
    assert_eq!(engine.list_members().await.unwrap().len(), 2);
}

#[tokio::test]
async fn authenticate_checks_password() {
    let (engine, _db) = seeded().await;

    let admin = engine.authenticate("admin", "admin123").await.unwrap();
    assert_eq!(admin.role, Role::Admin);
    let user = engine.authenticate("user", "user123").await.unwrap();
    assert_eq!(user.id, 2);

    assert_eq!(
        engine.authenticate("user", "admin123").await,
        Err(EngineError::InvalidCredentials)
    );
    assert_eq!(
        engine.authenticate("nobody", "user123").await,
        Err(EngineError::InvalidCredentials)
    );
    assert_eq!(
        engine.authenticate("user", "").await,
        Err(EngineError::InvalidCredentials)
    );
}

#[tokio::test]
async fn unknown_username_fails_like_a_wrong_password() {
    let (engine, _db) = seeded().await;

    for (username, password) in [("nobody", "decoy"), ("nobody", ""), ("user", "decoy")] {
        assert_eq!(
            engine.authenticate(username, password).await,
            Err(EngineError::InvalidCredentials),
            "{username}/{password}"
        );
    }
}

#[tokio::test]
async fn passwords_are_stored_hashed() {
    let (engine, db) = seeded().await;

    let stored = stored_password(&db, 2).await;
    assert_ne!(stored, "user123");
    assert!(stored.starts_with("pbkdf2-sha256$1000$"));
    assert!(engine::verify_password("user123", &stored));
}

#[tokio::test]
async fn add_member_registers_a_user() {
    let (engine, _db) = seeded().await;

    let member = engine.add_member(" 7 ", "dora", "secret").await.unwrap();
    assert_eq!(member.id, 7);
    assert_eq!(member.username, "dora");
    assert_eq!(member.role, Role::User);

    let logged = engine.authenticate("dora", "secret").await.unwrap();
    assert_eq!(logged, member);
    assert!(engine.membership(7).await.unwrap().is_none());
}

#[tokio::test]
async fn add_member_requires_every_field() {
    let (engine, _db) = seeded().await;

    let err = engine.add_member("", "dora", "").await.unwrap_err();
    assert_eq!(err, EngineError::MissingField("id, password".to_string()));
    let err = engine.add_member("5", "   ", "pw").await.unwrap_err();
    assert_eq!(err, EngineError::MissingField("username".to_string()));

    assert_eq!(engine.list_members().await.unwrap().len(), 2);
}

#[tokio::test]
async fn add_member_validates_values() {
    let (engine, _db) = seeded().await;

    assert!(matches!(
        engine.add_member("five", "dora", "pw").await,
        Err(EngineError::InvalidField(_))
    ));
    assert!(matches!(
        engine.add_member("5", "a_very_long_username", "pw").await,
        Err(EngineError::InvalidField(_))
    ));
    assert!(matches!(
        engine.add_member("5", "dora", "elevenchars").await,
        Err(EngineError::InvalidField(_))
    ));
    assert_eq!(engine.list_members().await.unwrap().len(), 2);
}

#[tokio::test]
async fn add_member_with_duplicate_id_leaves_storage_unchanged() {
    let (engine, db) = seeded().await;
    let before = engine.list_members().await.unwrap();
    let password_before = stored_password(&db, 2).await;

    let err = engine.add_member("2", "intruder", "pw").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("User with ID 2 already exists!".to_string())
    );

    assert_eq!(engine.list_members().await.unwrap(), before);
    assert_eq!(stored_password(&db, 2).await, password_before);
}

#[tokio::test]
async fn add_member_with_duplicate_username_is_rejected() {
    let (engine, _db) = seeded().await;

    let err = engine.add_member("9", "user", "pw").await.unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
    assert!(matches!(
        engine.member(9).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn delete_unknown_username_is_not_found() {
    let (engine, _db) = seeded().await;
    let before = engine.list_members().await.unwrap();

    let err = engine.delete_member("ghost", 1).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("User not found.".to_string()));
    assert_eq!(engine.list_members().await.unwrap(), before);
}

#[tokio::test]
async fn delete_removes_member_and_membership() {
    let (engine, db) = seeded().await;

    let deleted = engine.delete_member("user", 1).await.unwrap();
    assert_eq!(deleted, "user");
    assert!(matches!(
        engine.member(2).await,
        Err(EngineError::KeyNotFound(_))
    ));

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM membership_details",
        ))
        .await
        .unwrap()
        .unwrap();
    let remaining: i64 = row.try_get("", "n").unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn delete_requires_username_and_refuses_self() {
    let (engine, _db) = seeded().await;

    assert!(matches!(
        engine.delete_member("  ", 1).await,
        Err(EngineError::MissingField(_))
    ));
    assert!(matches!(
        engine.delete_member("admin", 1).await,
        Err(EngineError::Forbidden(_))
    ));
    assert_eq!(engine.list_members().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_creates_membership_lazily() {
    let (engine, _db) = seeded().await;
    engine.add_member("3", "carla", "pw").await.unwrap();

    let record = engine
        .update_member(3, membership_update("2025-03-15", "6 months"))
        .await
        .unwrap();
    let membership = record.membership.unwrap();
    assert_eq!(membership.membership_date, date(2025, 3, 15));
    assert_eq!(membership.membership_time, "6 months");
    assert_eq!(record.member.username, "carla");
}

#[tokio::test]
async fn update_without_membership_needs_date_and_time() {
    let (engine, _db) = seeded().await;
    engine.add_member("3", "carla", "pw").await.unwrap();

    let err = engine
        .update_member(
            3,
            MemberUpdate {
                username: Some("carla".to_string()),
                membership_date: Some("2025-03-15".to_string()),
                membership_time: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingField(_)));
    assert!(engine.membership(3).await.unwrap().is_none());

    // A rename alone does not create a membership.
    let record = engine
        .update_member(
            3,
            MemberUpdate {
                username: Some("carlotta".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(record.member.username, "carlotta");
    assert!(record.membership.is_none());
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let (engine, _db) = seeded().await;

    let record = engine
        .update_member(
            2,
            MemberUpdate {
                username: Some(String::new()),
                membership_date: None,
                membership_time: Some("2 years".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(record.member.username, "user");
    let membership = record.membership.unwrap();
    assert_eq!(membership.membership_date, date(2025, 1, 1));
    assert_eq!(membership.membership_time, "2 years");
}

#[tokio::test]
async fn update_with_malformed_date_changes_nothing() {
    let (engine, _db) = seeded().await;
    let before = engine.member_record(2).await.unwrap();

    let err = engine
        .update_member(
            2,
            MemberUpdate {
                username: Some("renamed".to_string()),
                membership_date: Some("2025-13-40".to_string()),
                membership_time: Some("2 years".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));
    assert_eq!(engine.member_record(2).await.unwrap(), before);
}

#[tokio::test]
async fn update_rejects_taken_username_and_unknown_id() {
    let (engine, _db) = seeded().await;

    let err = engine
        .update_member(
            2,
            MemberUpdate {
                username: Some("admin".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
    assert_eq!(engine.member(2).await.unwrap().username, "user");

    let err = engine
        .update_member(42, membership_update("2025-01-01", "1 year"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("User with ID 42 does not exist!".to_string())
    );
}

#[tokio::test]
async fn update_reports_unknown_id_before_bad_values() {
    let (engine, _db) = seeded().await;

    let err = engine
        .update_member(99, membership_update("2025-13-40", "2 years"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("User with ID 99 does not exist!".to_string())
    );
}

#[tokio::test]
async fn renew_advances_one_year_and_keeps_plan() {
    let (engine, _db) = seeded().await;

    let renewed = engine.renew_membership(2).await.unwrap();
    assert_eq!(renewed.membership_date, date(2026, 1, 1));
    assert_eq!(renewed.membership_time, "1 year");

    let renewed = engine.renew_membership(2).await.unwrap();
    assert_eq!(renewed.membership_date, date(2027, 1, 1));
    assert_eq!(
        engine.membership(2).await.unwrap(),
        Some(renewed)
    );
}

#[tokio::test]
async fn renew_leap_day_clamps_to_february_28() {
    let (engine, _db) = seeded().await;
    engine
        .update_member(2, membership_update("2024-02-29", ""))
        .await
        .unwrap();

    let renewed = engine.renew_membership(2).await.unwrap();
    assert_eq!(renewed.membership_date, date(2025, 2, 28));
}

#[tokio::test]
async fn renew_without_membership_fails() {
    let (engine, _db) = seeded().await;

    let err = engine.renew_membership(1).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("no membership to renew".to_string())
    );
    assert!(engine.membership(1).await.unwrap().is_none());
}
