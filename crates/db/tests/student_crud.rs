//! Integration tests for the student registry.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL`.

use rollcall_db::models::student::{CreateStudent, StudentListParams, UpdateStudent};
use rollcall_db::repositories::StudentRepo;
use sqlx::PgPool;

fn new_student(std: &str, div: &str, roll: i32, name: &str) -> CreateStudent {
    CreateStudent {
        std: std.to_string(),
        div: div.to_string(),
        academic_year: "2024-25".to_string(),
        name: name.to_string(),
        roll,
        mobile: "9800000000".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_find_update_delete(pool: PgPool) {
    let created = StudentRepo::create(&pool, &new_student(" 5 ", "A", 1, " Asha "))
        .await
        .unwrap();
    assert_eq!(created.std, "5");
    assert_eq!(created.name, "Asha");

    let found = StudentRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.roll, 1);

    let updated = StudentRepo::update(
        &pool,
        created.id,
        &UpdateStudent {
            mobile: Some("9811111111".into()),
            ..UpdateStudent::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.mobile, "9811111111");
    assert_eq!(updated.name, "Asha");

    assert!(StudentRepo::delete(&pool, created.id).await.unwrap());
    assert!(!StudentRepo::delete(&pool, created.id).await.unwrap());
    assert!(StudentRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_roll_in_class_violates_unique_constraint(pool: PgPool) {
    StudentRepo::create(&pool, &new_student("5", "A", 7, "First"))
        .await
        .unwrap();

    let err = StudentRepo::create(&pool, &new_student("5", "A", 7, "Second"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_students_class_roll"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    // Same roll in another division is fine.
    StudentRepo::create(&pool, &new_student("5", "B", 7, "Third"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_and_orders_by_roll(pool: PgPool) {
    StudentRepo::create(&pool, &new_student("5", "A", 2, "B")).await.unwrap();
    StudentRepo::create(&pool, &new_student("5", "A", 1, "A")).await.unwrap();
    StudentRepo::create(&pool, &new_student("6", "A", 1, "C")).await.unwrap();

    let class_5a = StudentRepo::list(
        &pool,
        &StudentListParams {
            std: Some("5".into()),
            div: Some("A".into()),
            academic_year: None,
        },
    )
    .await
    .unwrap();
    let rolls: Vec<i32> = class_5a.iter().map(|s| s.roll).collect();
    assert_eq!(rolls, vec![1, 2]);

    let everyone = StudentRepo::list(&pool, &StudentListParams::default())
        .await
        .unwrap();
    assert_eq!(everyone.len(), 3);
}
