mod common;

use common::{create_test_plan, entry, exercise_id, record_at, seeded_test_db, sets};
use repbook::models::PlanDraft;
use repbook::repositories::{PlanRepository, RecordRepository};

#[tokio::test]
async fn test_listing_reproduces_submitted_exercise_order() {
    let pool = seeded_test_db().await;
    let squat = exercise_id(&pool, "Squat").await;
    let bench = exercise_id(&pool, "Bench Press").await;
    let ohp = exercise_id(&pool, "Overhead Press").await;

    // Deliberately not in catalog order.
    create_test_plan(&pool, "Full Body", &[ohp, squat, bench]).await;

    let plans = PlanRepository::new(pool.clone())
        .list_with_exercises()
        .await
        .unwrap();
    assert_eq!(plans.len(), 1);
    let names: Vec<&str> = plans[0].exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Overhead Press", "Squat", "Bench Press"]);
}

#[tokio::test]
async fn test_editing_a_plan_preserves_its_record_history() {
    let pool = seeded_test_db().await;
    let repo = PlanRepository::new(pool.clone());
    let records = RecordRepository::new(pool.clone());

    let bench = exercise_id(&pool, "Bench Press").await;
    let ohp = exercise_id(&pool, "Overhead Press").await;
    let plan_id = create_test_plan(&pool, "Push Day", &[bench, ohp]).await;

    let date = record_at(
        &pool,
        "2024-03-01T10:00:00.000Z",
        plan_id,
        &[entry(bench, sets(&[(60.0, 8), (60.0, 7)]))],
    )
    .await;

    // Rename and reorder through the editing path.
    let edited = repo
        .save_plan(
            &PlanDraft {
                name: "Push Day v2".to_string(),
                exercise_ids: vec![ohp, bench],
            },
            Some(plan_id),
        )
        .await
        .unwrap();

    assert_eq!(edited, plan_id);

    let detail = records.session_detail(&date, plan_id).await.unwrap();
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0].exercise_name.as_deref(), Some("Bench Press"));
    assert_eq!(detail[0].sets.len(), 2);
}

#[tokio::test]
async fn test_deleting_a_plan_keeps_its_sessions() {
    let pool = seeded_test_db().await;
    let repo = PlanRepository::new(pool.clone());
    let records = RecordRepository::new(pool.clone());

    let bench = exercise_id(&pool, "Bench Press").await;
    let plan_id = create_test_plan(&pool, "Push Day", &[bench]).await;
    let date = record_at(
        &pool,
        "2024-03-01T10:00:00.000Z",
        plan_id,
        &[entry(bench, sets(&[(60.0, 8)]))],
    )
    .await;

    assert!(repo.delete_plan(plan_id).await.unwrap());

    // History survives, with no plan name to show.
    let detail = records.session_detail(&date, plan_id).await.unwrap();
    assert_eq!(detail[0].sets.len(), 1);

    let months = records.sessions_by_month().await.unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].sessions[0].workout_id, plan_id);
    assert_eq!(months[0].sessions[0].workout_name, None);
}

#[tokio::test]
async fn test_failed_save_is_never_partially_visible() {
    let pool = seeded_test_db().await;
    let repo = PlanRepository::new(pool.clone());
    let bench = exercise_id(&pool, "Bench Press").await;

    // Duplicate exercise violates the association primary key mid-insert.
    let result = repo
        .save_plan(
            &PlanDraft {
                name: "Doubled".to_string(),
                exercise_ids: vec![bench, bench],
            },
            None,
        )
        .await;

    assert!(result.is_err());
    assert!(repo.list_with_exercises().await.unwrap().is_empty());
}
