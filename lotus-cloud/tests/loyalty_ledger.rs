//! Loyalty balances, rank thresholds and the append-only history.

mod common;

use axum::extract::State;
use axum::{Extension, Json};
use common::*;
use lotus_cloud::AppState;
use lotus_cloud::api;
use lotus_cloud::auth::Caller;
use lotus_cloud::db::loyalty;
use shared::error::ErrorCode;
use shared::models::{AwardPoints, LoyaltyRank, UserRole};

#[tokio::test]
async fn test_awards_accumulate_and_promote() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;

    let l = loyalty::award_points(&pool, CUSTOMER_ID, 50, "signup gift")
        .await
        .expect("award");
    assert_eq!(l.points, 50);
    assert_eq!(l.rank, LoyaltyRank::Bronze);

    let l = loyalty::award_points(&pool, CUSTOMER_ID, 50, "promo")
        .await
        .expect("award");
    assert_eq!(l.points, 100);
    assert_eq!(l.rank, LoyaltyRank::Silver);

    let l = loyalty::award_points(&pool, CUSTOMER_ID, 100, "promo")
        .await
        .expect("award");
    assert_eq!(l.points, 200);
    assert_eq!(l.rank, LoyaltyRank::Gold);

    let l = loyalty::award_points(&pool, CUSTOMER_ID, 100, "promo")
        .await
        .expect("award");
    assert_eq!(l.points, 300);
    assert_eq!(l.rank, LoyaltyRank::Platinum);

    let history = loyalty::find_history(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(
        history.iter().map(|h| h.delta).collect::<Vec<_>>(),
        vec![50, 50, 100, 100]
    );
    assert_eq!(history[0].reason, "signup gift");

    let info = loyalty::get_rank(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(info.rank, LoyaltyRank::Platinum);
    assert_eq!(info.points, 300);
}

#[tokio::test]
async fn test_rank_of_unknown_customer_defaults_to_bronze() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;

    let info = loyalty::get_rank(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(info.rank, LoyaltyRank::Bronze);
    assert_eq!(info.points, 0);
}

#[tokio::test]
async fn test_award_rejects_non_positive_deltas() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;

    for bad in [0, -5] {
        let err = loyalty::award_points(&pool, CUSTOMER_ID, bad, "nope")
            .await
            .unwrap_err();
        assert_eq!(app_code(err), ErrorCode::InvalidPointsAmount);
    }

    let history = loyalty::find_history(&pool, CUSTOMER_ID).await.unwrap();
    assert!(history.is_empty());
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loyalty")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0, "rejected awards leave no balance row");
}

#[tokio::test]
async fn test_award_requires_existing_customer() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;

    let err = loyalty::award_points(&pool, 31337, 10, "ghost")
        .await
        .unwrap_err();
    assert_eq!(app_code(err), ErrorCode::CustomerNotFound);
}

#[tokio::test]
async fn test_points_endpoint_guards() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    let state = AppState::with_pool(pool.clone());
    let admin = Caller { user_id: ADMIN_ID, role: UserRole::Admin };
    let customer = Caller { user_id: CUSTOMER_ID, role: UserRole::Customer };

    // blank reason is rejected before touching the database
    let err = api::loyalty::award_points(
        State(state.clone()),
        Extension(admin),
        Json(AwardPoints { customer_id: CUSTOMER_ID, points: 10, reason: "   ".into() }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ReasonRequired);

    // non-admins cannot award
    let err = api::loyalty::award_points(
        State(state.clone()),
        Extension(customer),
        Json(AwardPoints { customer_id: CUSTOMER_ID, points: 10, reason: "gift".into() }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::AdminRequired);

    let resp = api::loyalty::award_points(
        State(state),
        Extension(admin),
        Json(AwardPoints { customer_id: CUSTOMER_ID, points: 10, reason: " gift ".into() }),
    )
    .await
    .expect("award");
    let awarded = resp.data.expect("payload");
    assert_eq!(awarded.points, 10);

    // the reason is stored trimmed
    let history = loyalty::find_history(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(history[0].reason, "gift");
}
