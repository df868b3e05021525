//! Integration tests for the segmentation services over the real adapters
//!
//! These tests verify that:
//! 1. Catalog, membership, and report services compose over one shared store
//! 2. Soft-deletion and expiration shape the active-membership view
//! 3. The monthly report reflects assignment history and caches by filename
//! 4. Error precedence survives the full stack (validation before existence
//!    before persistence)

use chrono::{Datelike, Duration, TimeZone, Utc};
use uuid::Uuid;

use cohort_domain::error::SegmentationError;
use cohort_domain::{
    CatalogService, MembershipService, ReportService, UserId, UserSegment,
};
use cohort_store::{FsReportArchive, MemoryStore};

fn services(
    store: &MemoryStore,
) -> (
    CatalogService<MemoryStore>,
    MembershipService<MemoryStore>,
    ReportService<MemoryStore, FsReportArchive>,
) {
    let reports_dir = std::env::temp_dir().join(format!("cohort-it-{}", Uuid::now_v7()));
    (
        CatalogService::new(store.clone()),
        MembershipService::new(store.clone()),
        ReportService::new(store.clone(), FsReportArchive::new(reports_dir)),
    )
}

fn user() -> UserId {
    UserId::from_uuid(Uuid::now_v7())
}

#[tokio::test]
async fn test_full_membership_lifecycle() {
    let store = MemoryStore::new();
    let (catalog, membership, _) = services(&store);
    let id = user();

    catalog
        .add_segment("AVITO_DISCOUNT_50", Some("autumn promo".to_string()))
        .await
        .unwrap();
    catalog.add_segment("AVITO_VOICE_MESSAGES", None).await.unwrap();

    membership
        .set_segments(
            &id,
            &[
                UserSegment::new("AVITO_DISCOUNT_50"),
                UserSegment::expiring("AVITO_VOICE_MESSAGES", Utc::now() + Duration::days(7)),
            ],
        )
        .await
        .unwrap();

    let active = membership.get_segments(&id).await.unwrap();
    assert_eq!(
        active.slugs,
        vec![
            "AVITO_DISCOUNT_50".to_string(),
            "AVITO_VOICE_MESSAGES".to_string()
        ]
    );

    // Removing one assignment leaves the other in force.
    membership
        .delete_segments(&id, &["AVITO_DISCOUNT_50".to_string()])
        .await
        .unwrap();

    let active = membership.get_segments(&id).await.unwrap();
    assert_eq!(active.slugs, vec!["AVITO_VOICE_MESSAGES".to_string()]);

    // Retiring the remaining segment in the catalog empties the view.
    catalog.delete_segment("AVITO_VOICE_MESSAGES").await.unwrap();

    let err = membership.get_segments(&id).await.unwrap_err();
    assert!(matches!(err, SegmentationError::SegmentsNotFound));
}

#[tokio::test]
async fn test_error_precedence_across_the_stack() {
    let store = MemoryStore::new();
    let (catalog, membership, _) = services(&store);
    let id = user();

    catalog.add_segment("S1", None).await.unwrap();

    // Naming is checked before existence: the bad slug wins even though S9
    // is also unknown.
    let err = membership
        .set_segments(
            &id,
            &[UserSegment::new("S9"), UserSegment::new("s1-bad")],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SegmentationError::InvalidSlug(_)));

    // Existence is checked before persistence: nothing was written, so the
    // user is still unknown to the store.
    let err = membership
        .set_segments(&id, &[UserSegment::new("S9")])
        .await
        .unwrap_err();
    assert!(matches!(err, SegmentationError::SegmentsNotFound));

    let err = membership.get_segments(&id).await.unwrap_err();
    assert!(matches!(err, SegmentationError::UserNotFound));
}

#[tokio::test]
async fn test_report_reflects_history_and_caches() {
    let store = MemoryStore::new();
    let (catalog, _, reports) = services(&store);
    let id = user();

    catalog.add_segment("TEST_SLUG", None).await.unwrap();

    // Seed history directly through the store ports: the period validator
    // only accepts closed past years.
    let last_year = Utc::now().year() - 1;
    let created = Utc.with_ymd_and_hms(last_year, 3, 5, 12, 0, 0).unwrap();
    let removed = Utc.with_ymd_and_hms(last_year, 3, 20, 12, 0, 0).unwrap();

    use cohort_domain::storage::AssignmentStore;
    store
        .upsert(&id, &[UserSegment::new("TEST_SLUG")], created)
        .await
        .unwrap();
    store
        .soft_delete_many(&id, &["TEST_SLUG".to_string()], removed)
        .await
        .unwrap();

    let filename = reports.create_report(last_year, 3).await.unwrap();
    assert_eq!(filename, format!("3_{}_report.csv", last_year));

    let text = String::from_utf8(reports.fetch_report(&filename).await.unwrap()).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains(",TEST_SLUG,added,"));
    assert!(rows[1].contains(",TEST_SLUG,deleted,"));

    // A repeated request returns the same artifact.
    let again = reports.create_report(last_year, 3).await.unwrap();
    assert_eq!(again, filename);

    // An empty month is DataNotFound, not an empty file.
    let err = reports.create_report(last_year, 4).await.unwrap_err();
    assert!(matches!(err, SegmentationError::DataNotFound));
}
