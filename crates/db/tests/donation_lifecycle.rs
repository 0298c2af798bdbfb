//! Integration tests for the donation lifecycle (PRD-03).
//!
//! Exercises the repository layer against a real database:
//! - Pledge creation writes the donation, its items, and the initial log
//!   in one transaction
//! - Status transitions follow the fixed stage order and append one log row
//! - Rejected transitions leave the row and the log untouched
//! - Listing and processing views

use assert_matches::assert_matches;
use sqlx::PgPool;
use tulong_core::error::CoreError;
use tulong_core::status::DonationStatus;
use tulong_db::error::DbError;
use tulong_db::models::donation::{CreateDonation, NewDonationItem};
use tulong_db::repositories::{
    AccountRepo, BarangayRepo, DonationRepo, RecipientRequestRepo, RoleRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_request(pool: &PgPool) -> i64 {
    let barangay = BarangayRepo::list(pool).await.unwrap().remove(0);
    let normalized = tulong_core::submission::NormalizedRequest {
        complete_name: "Jose Ramos".to_string(),
        age: 41,
        contact_number: "09181234567".to_string(),
        email_address: None,
        barangay_id: barangay.id,
        area: "Zone 4".to_string(),
        type_of_calamity: "Flood".to_string(),
        no_of_family_members: 5,
        number_of_children: 2,
        age_group_infant: 1,
        age_group_early_child: 1,
        age_group_middle_child: 0,
        age_group_adolescent: 0,
        in_kind_necessities: "Food, Health".to_string(),
        specifications: serde_json::json!({}),
        proof_photo: None,
    };
    RecipientRequestRepo::create(pool, &normalized)
        .await
        .unwrap()
        .id
}

async fn seed_donor(pool: &PgPool, contact_number: &str) -> i64 {
    let role = RoleRepo::find_by_name(pool, tulong_core::roles::ROLE_DONOR)
        .await
        .unwrap()
        .expect("donor role should be seeded");
    let account = AccountRepo::create(
        pool,
        &tulong_db::models::account::CreateAccount {
            name: "Ana Dela Cruz".to_string(),
            org_name: Some("Bayanihan Relief".to_string()),
            contact_number: contact_number.to_string(),
            email: None,
            address: None,
            password_hash: "$argon2id$stub-hash-for-repo-tests".to_string(),
            role_id: role.id,
            barangay_id: None,
        },
    )
    .await
    .unwrap();
    account.id
}

fn new_pledge(request_id: i64, donor_id: Option<i64>, control_number: &str) -> CreateDonation {
    CreateDonation {
        request_id,
        donor_id,
        control_number: control_number.to_string(),
        items: vec![
            NewDonationItem {
                item_name: "Rice".to_string(),
                quantity: 10,
            },
            NewDonationItem {
                item_name: "Bottled Water".to_string(),
                quantity: 24,
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Test: Pledge creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_pledge_writes_items_and_log(pool: PgPool) {
    let request_id = seed_request(&pool).await;
    let donor_id = seed_donor(&pool, "09192220001").await;

    let details = DonationRepo::create(
        &pool,
        &new_pledge(request_id, Some(donor_id), "DN-20260825-AAAAAA"),
    )
    .await
    .unwrap();

    assert_eq!(details.donation.status, DonationStatus::Pledged.as_str());
    assert_eq!(details.donation.request_id, request_id);
    assert_eq!(details.donation.donor_id, Some(donor_id));
    assert_eq!(details.donor_name.as_deref(), Some("Ana Dela Cruz"));

    assert_eq!(details.items.len(), 2);
    assert_eq!(details.items[0].item_name, "Rice");
    assert_eq!(details.items[0].quantity, 10);

    assert_eq!(details.status_logs.len(), 1);
    assert_eq!(details.status_logs[0].status, DonationStatus::Pledged.as_str());
    assert_eq!(details.status_logs[0].remarks, "Donation pledged");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_pledge_without_donor(pool: PgPool) {
    let request_id = seed_request(&pool).await;

    let details = DonationRepo::create(&pool, &new_pledge(request_id, None, "DN-20260825-BBBBBB"))
        .await
        .unwrap();

    assert_eq!(details.donation.donor_id, None);
    assert!(details.donor_name.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_control_number_rejected(pool: PgPool) {
    let request_id = seed_request(&pool).await;

    DonationRepo::create(&pool, &new_pledge(request_id, None, "DN-20260825-CCCCCC"))
        .await
        .unwrap();
    let result =
        DonationRepo::create(&pool, &new_pledge(request_id, None, "DN-20260825-CCCCCC")).await;
    assert!(result.is_err(), "Duplicate control number should fail");
}

// ---------------------------------------------------------------------------
// Test: Status transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_walk_appends_logs(pool: PgPool) {
    let request_id = seed_request(&pool).await;
    let details = DonationRepo::create(&pool, &new_pledge(request_id, None, "DN-20260825-DDDDDD"))
        .await
        .unwrap();
    let id = details.donation.id;

    for (target, remarks) in [
        (DonationStatus::Collected, "Picked up from donor"),
        (DonationStatus::Processing, "Sorting at warehouse"),
        (DonationStatus::InTransit, ""),
        (DonationStatus::Received, "Confirmed by recipient"),
    ] {
        let updated = DonationRepo::transition_status(&pool, id, target, remarks)
            .await
            .unwrap();
        assert_eq!(updated.status, target.as_str());
    }

    let logs = DonationRepo::status_logs(&pool, id).await.unwrap();
    assert_eq!(logs.len(), 5);
    assert_eq!(logs[0].status, DonationStatus::Pledged.as_str());
    assert_eq!(logs[1].remarks, "Picked up from donor");
    assert_eq!(logs[4].status, DonationStatus::Received.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_transition_rolls_back(pool: PgPool) {
    let request_id = seed_request(&pool).await;
    let details = DonationRepo::create(&pool, &new_pledge(request_id, None, "DN-20260825-EEEEEE"))
        .await
        .unwrap();
    let id = details.donation.id;

    // PLEDGED cannot skip straight to PROCESSING.
    let err = DonationRepo::transition_status(&pool, id, DonationStatus::Processing, "")
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidTransition { .. }));

    // Nothing was written: status and log length are unchanged.
    let row = DonationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.status, DonationStatus::Pledged.as_str());
    let logs = DonationRepo::status_logs(&pool, id).await.unwrap();
    assert_eq!(logs.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_received_is_terminal(pool: PgPool) {
    let request_id = seed_request(&pool).await;
    let details = DonationRepo::create(&pool, &new_pledge(request_id, None, "DN-20260825-FFFFFF"))
        .await
        .unwrap();
    let id = details.donation.id;

    for target in [
        DonationStatus::Collected,
        DonationStatus::Processing,
        DonationStatus::InTransit,
        DonationStatus::Received,
    ] {
        DonationRepo::transition_status(&pool, id, target, "")
            .await
            .unwrap();
    }

    let err = DonationRepo::transition_status(&pool, id, DonationStatus::Collected, "")
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidTransition { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_missing_donation(pool: PgPool) {
    let err = DonationRepo::transition_status(&pool, 999_999, DonationStatus::Collected, "")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound {
            entity: "Donation",
            ..
        })
    );
}

// ---------------------------------------------------------------------------
// Test: Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_order(pool: PgPool) {
    let request_id = seed_request(&pool).await;
    let donor_id = seed_donor(&pool, "09192220002").await;

    let first = DonationRepo::create(
        &pool,
        &new_pledge(request_id, Some(donor_id), "DN-20260825-G00001"),
    )
    .await
    .unwrap();
    let second = DonationRepo::create(
        &pool,
        &new_pledge(request_id, Some(donor_id), "DN-20260825-G00002"),
    )
    .await
    .unwrap();

    // Per request: oldest first.
    let by_request = DonationRepo::list_by_request(&pool, request_id).await.unwrap();
    assert_eq!(by_request.len(), 2);
    assert_eq!(by_request[0].donation.id, first.donation.id);
    assert_eq!(by_request[1].donation.id, second.donation.id);

    // Per donor: newest first.
    let by_donor = DonationRepo::list_by_donor(&pool, donor_id).await.unwrap();
    assert_eq!(by_donor.len(), 2);
    assert_eq!(by_donor[0].donation.id, second.donation.id);
    assert_eq!(by_donor[1].donation.id, first.donation.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_requests_with_donations_view(pool: PgPool) {
    let with_donation = seed_request(&pool).await;
    let _without_donation = seed_request(&pool).await;

    DonationRepo::create(&pool, &new_pledge(with_donation, None, "DN-20260825-HHHHHH"))
        .await
        .unwrap();

    let count = DonationRepo::count_requests_with_donations(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let rows = DonationRepo::requests_with_donations(&pool, 20, 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].request.id, with_donation);
    assert_eq!(rows[0].donations.len(), 1);
    assert_eq!(rows[0].donations[0].items.len(), 2);
}
