//! Behaviour every [`RsvpRepository`] must share, run against each backend
//! from its own test module. Expects an empty repository.

use super::{PersistenceError, RsvpRepository};
use crate::rsvp::{RsvpFields, RsvpRecord};

pub fn sample_fields(name: &str) -> RsvpFields {
    RsvpFields {
        guest_name: name.to_string(),
        guest_count: 2,
        notes: "arriving late".to_string(),
        contributions: vec!["lemonade".to_string(), "paper cups".to_string()],
    }
}

pub fn sample_record(id: &str, created_at: u64) -> RsvpRecord {
    RsvpRecord::new(id.to_string(), sample_fields(&format!("Guest {id}")), created_at)
}

pub async fn run_all<R: RsvpRepository>(repo: &R) {
    empty_collection(repo).await;
    insert_then_find(repo).await;
    duplicate_insert_rejected(repo).await;
    list_is_ordered(repo).await;
    update_replaces_mutable_fields(repo).await;
    update_unknown_is_none(repo).await;
    delete_reports_presence(repo).await;
}

async fn empty_collection<R: RsvpRepository>(repo: &R) {
    assert!(repo.list_all().await.is_empty());
    assert_eq!(repo.find_by_id("nope").await.unwrap(), None);
}

async fn insert_then_find<R: RsvpRepository>(repo: &R) {
    let record = sample_record("find-me", 1_000);
    repo.insert(&record).await.unwrap();
    assert_eq!(repo.find_by_id("find-me").await.unwrap(), Some(record));
}

async fn duplicate_insert_rejected<R: RsvpRepository>(repo: &R) {
    let record = sample_record("dup", 1_100);
    repo.insert(&record).await.unwrap();
    let err = repo.insert(&sample_record("dup", 1_200)).await.unwrap_err();
    assert!(matches!(err, PersistenceError::DuplicateId(id) if id == "dup"));
    assert_eq!(repo.find_by_id("dup").await.unwrap(), Some(record));
}

async fn list_is_ordered<R: RsvpRepository>(repo: &R) {
    repo.insert(&sample_record("third", 3_000)).await.unwrap();
    repo.insert(&sample_record("second", 2_000)).await.unwrap();

    let list = repo.list_all().await;
    let ids: Vec<&str> = list.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["find-me", "dup", "second", "third"]);
    assert!(list.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

async fn update_replaces_mutable_fields<R: RsvpRepository>(repo: &R) {
    let fields = RsvpFields {
        guest_name: "Renamed".to_string(),
        guest_count: 5,
        notes: String::new(),
        contributions: vec!["chips".to_string()],
    };
    let updated = repo
        .update("second", &fields)
        .await
        .unwrap()
        .expect("record exists");

    assert_eq!(updated.id, "second");
    assert_eq!(updated.created_at, 2_000);
    assert_eq!(updated.guest_name, "Renamed");
    assert_eq!(updated.guest_count, 5);
    assert_eq!(updated.notes, "");
    assert_eq!(updated.contributions, vec!["chips"]);
    assert!(updated.updated_at.unwrap() >= updated.created_at);

    assert_eq!(repo.find_by_id("second").await.unwrap(), Some(updated));
}

async fn update_unknown_is_none<R: RsvpRepository>(repo: &R) {
    let before = repo.list_all().await.len();
    let result = repo.update("ghost", &sample_fields("Ghost")).await.unwrap();
    assert_eq!(result, None);
    assert_eq!(repo.list_all().await.len(), before);
    assert_eq!(repo.find_by_id("ghost").await.unwrap(), None);
}

async fn delete_reports_presence<R: RsvpRepository>(repo: &R) {
    assert!(repo.delete_by_id("third").await.unwrap());
    assert_eq!(repo.find_by_id("third").await.unwrap(), None);
    assert!(repo.list_all().await.iter().all(|r| r.id != "third"));
    assert!(!repo.delete_by_id("third").await.unwrap());
    assert!(!repo.delete_by_id("never-existed").await.unwrap());
}
