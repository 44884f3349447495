//! Integration tests for the recipe aggregate repository.
//!
//! Each test runs against its own in-memory SQLite pool, so the full
//! migration + transaction machinery is exercised without touching disk.

use savora_core::{IngredientInput, NewRecipe, ValidationError};
use savora_db::{Database, DbConfig, DbError};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

fn pho() -> NewRecipe {
    NewRecipe {
        name: "Pho".to_string(),
        description: "Vietnamese soup".to_string(),
        ingredients: vec![IngredientInput {
            name: "rice noodles".to_string(),
            quantity: "200".to_string(),
            unit: "g".to_string(),
        }],
        steps: vec!["Boil broth".to_string(), "Add noodles".to_string()],
        ..Default::default()
    }
}

async fn count(db: &Database, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(db.pool()).await.unwrap()
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let db = test_db().await;
    let repo = db.recipes();

    let id = repo.create(&pho()).await.unwrap();
    let detail = repo.get(id).await.unwrap();

    assert_eq!(detail.recipe.id, id);
    assert_eq!(detail.recipe.name, "Pho");
    assert_eq!(detail.recipe.description, "Vietnamese soup");
    assert_eq!(detail.recipe.image, None);

    assert_eq!(detail.ingredients.len(), 1);
    assert_eq!(detail.ingredients[0].name, "rice noodles");
    assert_eq!(detail.ingredients[0].quantity, "200");
    assert_eq!(detail.ingredients[0].unit, "g");

    assert_eq!(detail.steps.len(), 2);
    assert_eq!(detail.steps[0].step_number, 1);
    assert_eq!(detail.steps[0].instruction, "Boil broth");
    assert_eq!(detail.steps[1].step_number, 2);
    assert_eq!(detail.steps[1].instruction, "Add noodles");
}

#[tokio::test]
async fn step_numbers_are_contiguous_and_follow_input_order() {
    let db = test_db().await;
    let repo = db.recipes();

    let mut input = pho();
    input.steps = (1..=7).map(|i| format!("step {i}")).collect();

    let id = repo.create(&input).await.unwrap();
    let detail = repo.get(id).await.unwrap();

    let numbers: Vec<i64> = detail.steps.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, (1..=7).collect::<Vec<i64>>());

    for (i, step) in detail.steps.iter().enumerate() {
        assert_eq!(step.instruction, format!("step {}", i + 1));
    }
}

#[tokio::test]
async fn update_renumbers_steps_from_supplied_order() {
    let db = test_db().await;
    let repo = db.recipes();

    let id = repo.create(&pho()).await.unwrap();

    // Reverse the steps; the stored numbering must follow the new order
    let mut input = pho();
    input.steps = vec!["Add noodles".to_string(), "Boil broth".to_string()];
    repo.update(id, &input).await.unwrap();

    let detail = repo.get(id).await.unwrap();
    assert_eq!(detail.steps.len(), 2);
    assert_eq!(detail.steps[0].step_number, 1);
    assert_eq!(detail.steps[0].instruction, "Add noodles");
    assert_eq!(detail.steps[1].step_number, 2);
    assert_eq!(detail.steps[1].instruction, "Boil broth");
}

#[tokio::test]
async fn repeated_update_does_not_duplicate_children() {
    let db = test_db().await;
    let repo = db.recipes();

    let id = repo.create(&pho()).await.unwrap();

    let mut input = pho();
    input.ingredients.push(IngredientInput {
        name: "beef".to_string(),
        quantity: "300".to_string(),
        unit: "g".to_string(),
    });

    repo.update(id, &input).await.unwrap();
    let first = repo.get(id).await.unwrap();

    repo.update(id, &input).await.unwrap();
    let second = repo.get(id).await.unwrap();

    assert_eq!(first.ingredients, second.ingredients);
    assert_eq!(first.steps, second.steps);
    assert_eq!(second.ingredients.len(), 2);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM ingredients").await, 2);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM steps").await, 2);
}

#[tokio::test]
async fn failed_child_insert_rolls_back_the_parent() {
    let db = test_db().await;
    let repo = db.recipes();

    // Simulate a storage failure mid-operation: the parent insert succeeds,
    // then the first step insert aborts.
    sqlx::query(
        "CREATE TRIGGER fail_step_inserts BEFORE INSERT ON steps \
         BEGIN SELECT RAISE(ABORT, 'simulated failure'); END",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let err = repo.create(&pho()).await.unwrap_err();
    assert!(err.is_storage_failure(), "unexpected error: {err}");

    // The whole unit rolled back: no parent, no partial child set
    assert_eq!(count(&db, "SELECT COUNT(*) FROM recipes").await, 0);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM ingredients").await, 0);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM steps").await, 0);

    // The id the failed create would have produced resolves to nothing
    assert!(matches!(
        repo.get(1).await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test]
async fn failed_update_leaves_previous_children_intact() {
    let db = test_db().await;
    let repo = db.recipes();

    let id = repo.create(&pho()).await.unwrap();

    sqlx::query(
        "CREATE TRIGGER fail_step_inserts BEFORE INSERT ON steps \
         BEGIN SELECT RAISE(ABORT, 'simulated failure'); END",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let mut input = pho();
    input.name = "Pho Ga".to_string();
    input.steps = vec!["Something else".to_string()];

    let err = repo.update(id, &input).await.unwrap_err();
    assert!(err.is_storage_failure());

    // Rollback restored the original aggregate, including the deleted children
    let detail = repo.get(id).await.unwrap();
    assert_eq!(detail.recipe.name, "Pho");
    assert_eq!(detail.steps.len(), 2);
    assert_eq!(detail.steps[0].instruction, "Boil broth");
    assert_eq!(detail.ingredients.len(), 1);
}

#[tokio::test]
async fn delete_removes_every_child_row() {
    let db = test_db().await;
    let repo = db.recipes();

    let id = repo.create(&pho()).await.unwrap();
    let other = repo.create(&pho()).await.unwrap();

    repo.delete(id).await.unwrap();

    assert!(matches!(
        repo.get(id).await,
        Err(DbError::NotFound { .. })
    ));

    let orphans: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM ingredients WHERE recipe_id = ?1) \
              + (SELECT COUNT(*) FROM steps WHERE recipe_id = ?1)",
    )
    .bind(id)
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!(orphans, 0);

    // The sibling recipe is untouched
    assert!(repo.get(other).await.is_ok());

    // Deleting again reports the missing row
    assert!(matches!(
        repo.delete(id).await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let db = test_db().await;

    assert!(matches!(
        db.recipes().delete(999_999).await,
        Err(DbError::NotFound { entity, id }) if entity == "Recipe" && id == 999_999
    ));
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let db = test_db().await;

    assert!(matches!(
        db.recipes().update(999_999, &pho()).await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test]
async fn invalid_input_is_rejected_before_storage() {
    let db = test_db().await;
    let repo = db.recipes();

    // Name only - no description, no children
    let input = NewRecipe {
        name: "X".to_string(),
        ..Default::default()
    };

    let err = repo.create(&input).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Validation(ValidationError::Required { ref field }) if field == "description"
    ));

    // Nothing was written
    assert_eq!(count(&db, "SELECT COUNT(*) FROM recipes").await, 0);
}

#[tokio::test]
async fn update_preserves_image_unless_replaced() {
    let db = test_db().await;
    let repo = db.recipes();

    let mut input = pho();
    input.image = Some("https://media.example/pho.jpg".to_string());
    let id = repo.create(&input).await.unwrap();

    // No image in the payload: the stored reference survives
    repo.update(id, &pho()).await.unwrap();
    let detail = repo.get(id).await.unwrap();
    assert_eq!(
        detail.recipe.image.as_deref(),
        Some("https://media.example/pho.jpg")
    );

    // A new reference replaces it
    let mut replacement = pho();
    replacement.image = Some("https://media.example/pho-2.jpg".to_string());
    repo.update(id, &replacement).await.unwrap();
    let detail = repo.get(id).await.unwrap();
    assert_eq!(
        detail.recipe.image.as_deref(),
        Some("https://media.example/pho-2.jpg")
    );
}

#[tokio::test]
async fn list_returns_every_aggregate() {
    let db = test_db().await;
    let repo = db.recipes();

    assert!(repo.list().await.unwrap().is_empty());

    let a = repo.create(&pho()).await.unwrap();
    let mut other = pho();
    other.name = "Carbonara".to_string();
    other.country = Some("Italy".to_string());
    let b = repo.create(&other).await.unwrap();

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 2);

    let ids: Vec<i64> = all.iter().map(|d| d.recipe.id).collect();
    assert!(ids.contains(&a) && ids.contains(&b));

    for detail in &all {
        assert!(!detail.ingredients.is_empty());
        assert!(!detail.steps.is_empty());
    }
}
