//! Status transitions and the completion bonus side effect.

mod common;

use common::*;
use lotus_cloud::db::{bookings, loyalty};
use shared::error::ErrorCode;
use shared::models::{BonusOutcome, BookingStatus, LoyaltyRank};

async fn stored_status(pool: &sqlx::SqlitePool, booking_id: i64) -> String {
    sqlx::query_scalar("SELECT status FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_confirm_then_complete_awards_bonus_once() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    let booking = bookings::create_booking(&pool, CUSTOMER_ID, &booking_request())
        .await
        .expect("create booking");

    let change = bookings::set_status(&pool, booking.id, BookingStatus::Confirmed)
        .await
        .expect("confirm");
    assert_eq!(change.booking.status, BookingStatus::Confirmed);
    assert_eq!(change.bonus, BonusOutcome::NotApplicable);

    let change = bookings::set_status(&pool, booking.id, BookingStatus::Completed)
        .await
        .expect("complete");
    assert_eq!(change.booking.status, BookingStatus::Completed);
    match change.bonus {
        BonusOutcome::Awarded(l) => {
            assert_eq!(l.customer_id, CUSTOMER_ID);
            assert_eq!(l.points, 10);
            assert_eq!(l.rank, LoyaltyRank::Bronze);
        }
        other => panic!("expected an awarded bonus, got {other:?}"),
    }

    // a second completion attempt is rejected, the bonus stays single
    let err = bookings::set_status(&pool, booking.id, BookingStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(app_code(err), ErrorCode::InvalidStatusTransition);

    let rank = loyalty::get_rank(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(rank.points, 10);
    let history = loyalty::find_history(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].delta, 10);
}

#[tokio::test]
async fn test_completion_bonus_promotes_rank() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    loyalty::award_points(&pool, CUSTOMER_ID, 95, "imported balance")
        .await
        .expect("seed points");

    let booking = bookings::create_booking(&pool, CUSTOMER_ID, &booking_request())
        .await
        .expect("create booking");
    bookings::set_status(&pool, booking.id, BookingStatus::Confirmed)
        .await
        .expect("confirm");
    let change = bookings::set_status(&pool, booking.id, BookingStatus::Completed)
        .await
        .expect("complete");

    // 95 + 10 crosses the SILVER threshold
    match change.bonus {
        BonusOutcome::Awarded(l) => {
            assert_eq!(l.points, 105);
            assert_eq!(l.rank, LoyaltyRank::Silver);
        }
        other => panic!("expected an awarded bonus, got {other:?}"),
    }

    let history = loyalty::find_history(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].delta, 10);
}

#[tokio::test]
async fn test_illegal_transitions_persist_nothing() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    let booking = bookings::create_booking(&pool, CUSTOMER_ID, &booking_request())
        .await
        .expect("create booking");

    let err = bookings::set_status(&pool, booking.id, BookingStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(app_code(err), ErrorCode::InvalidStatusTransition);
    assert_eq!(stored_status(&pool, booking.id).await, "PENDING");

    let err = bookings::set_status(&pool, booking.id, BookingStatus::Pending)
        .await
        .unwrap_err();
    assert_eq!(app_code(err), ErrorCode::InvalidStatusTransition);

    let history = loyalty::find_history(&pool, CUSTOMER_ID).await.unwrap();
    assert!(history.is_empty(), "no bonus on a rejected transition");
}

#[tokio::test]
async fn test_terminal_bookings_are_frozen() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    let booking = bookings::create_booking(&pool, CUSTOMER_ID, &booking_request())
        .await
        .expect("create booking");
    bookings::cancel(&pool, booking.id).await.expect("cancel");

    for next in [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ] {
        let err = bookings::set_status(&pool, booking.id, next).await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::InvalidStatusTransition);
    }

    let err = bookings::cancel(&pool, booking.id).await.unwrap_err();
    assert_eq!(app_code(err), ErrorCode::InvalidStatusTransition);
    let err = bookings::reschedule(&pool, booking.id, chrono::Utc::now())
        .await
        .unwrap_err();
    assert_eq!(app_code(err), ErrorCode::InvalidStatusTransition);
}

#[tokio::test]
async fn test_reschedule_forces_confirmed() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    let booking = bookings::create_booking(&pool, CUSTOMER_ID, &booking_request())
        .await
        .expect("create booking");
    assert_eq!(booking.status, BookingStatus::Pending);

    let new_time = chrono::Utc::now() + chrono::Duration::days(3);
    let updated = bookings::reschedule(&pool, booking.id, new_time)
        .await
        .expect("reschedule");
    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(updated.scheduled_at, new_time.timestamp_millis());
}

#[tokio::test]
async fn test_cancel_forces_cancelled_from_confirmed() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    let booking = bookings::create_booking(&pool, CUSTOMER_ID, &booking_request())
        .await
        .expect("create booking");
    bookings::set_status(&pool, booking.id, BookingStatus::Confirmed)
        .await
        .expect("confirm");

    let cancelled = bookings::cancel(&pool, booking.id).await.expect("cancel");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(stored_status(&pool, booking.id).await, "CANCELLED");
}

#[tokio::test]
async fn test_bonus_failure_keeps_booking_completed() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;
    let booking = bookings::create_booking(&pool, CUSTOMER_ID, &booking_request())
        .await
        .expect("create booking");
    bookings::set_status(&pool, booking.id, BookingStatus::Confirmed)
        .await
        .expect("confirm");

    // break the loyalty ledger so the award cannot run
    sqlx::query("DROP TABLE loyalty_history")
        .execute(&pool)
        .await
        .unwrap();

    let change = bookings::set_status(&pool, booking.id, BookingStatus::Completed)
        .await
        .expect("the status change itself must succeed");
    assert_eq!(change.booking.status, BookingStatus::Completed);
    assert!(
        matches!(change.bonus, BonusOutcome::Failed(_)),
        "bonus failure is reported, not propagated"
    );
    assert_eq!(stored_status(&pool, booking.id).await, "COMPLETED");

    // the failed award rolled back completely, balance included
    let rank = loyalty::get_rank(&pool, CUSTOMER_ID).await.unwrap();
    assert_eq!(rank.points, 0);
}

#[tokio::test]
async fn test_status_change_on_unknown_booking() {
    let pool = memory_pool().await;
    seed_marketplace(&pool).await;

    let err = bookings::set_status(&pool, 777, BookingStatus::Confirmed)
        .await
        .unwrap_err();
    assert_eq!(app_code(err), ErrorCode::BookingNotFound);
    let err = bookings::cancel(&pool, 777).await.unwrap_err();
    assert_eq!(app_code(err), ErrorCode::BookingNotFound);
    let err = bookings::reschedule(&pool, 777, chrono::Utc::now())
        .await
        .unwrap_err();
    assert_eq!(app_code(err), ErrorCode::BookingNotFound);
}
