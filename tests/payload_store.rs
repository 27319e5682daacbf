use std::fs;

use chrono::NaiveDate;

use job_monitor::config::MonitorConfig;
use job_monitor::ingestion::JobStore;
use job_monitor::source::{FileJobSource, JobSource};

const PAYLOAD: &str = r#"{
  "jobDB": [
    {"_id": "a1", "userID": "U1", "jobTitle": "Backend Engineer", "companyName": "Acme",
     "currentStatus": "Applied", "timeline": [{"status": "saved"}, {"status": "Applied"}],
     "updatedAt": "10/03/2024, 9:00am"},
    {"jobID": "a2", "userID": "U1", "currentStatus": "applied", "timeline": ["applied"],
     "updatedAt": "", "dateAdded": "10/03/2024, 5:00pm"},
    {"userID": "U1", "joblink": "https://jobs.example.com/3", "currentStatus": "Applied",
     "timeline": ["applied"], "updatedAt": 1710115200000},
    {"_id": "a4", "userID": "U1", "currentStatus": "Interviewing", "timeline": ["applied", "interviewing"]},
    {"_id": "a5", "userID": "U1", "currentStatus": "Applied", "timeline": [], "updatedAt": "10/03/2024"},
    {"_id": "b1", "userID": "U2", "currentStatus": "Offer", "timeline": ["offer"]},
    {"_id": "c1", "currentStatus": "Applied", "timeline": ["applied"], "updatedAt": "10/03/2024"},
    "not-a-record"
  ]
}"#;

#[test]
fn file_payload_flows_through_store_views() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    fs::write(&path, PAYLOAD).unwrap();

    let store = JobStore::new(MonitorConfig::default());
    let source = FileJobSource::new(&path);
    assert_eq!(store.refresh(&source).unwrap(), 1);
    assert_eq!(store.len(), 7);
    assert_eq!(store.owners(), vec!["U1", "U2"]);

    let report = store.owner_report("U1", NaiveDate::from_ymd_opt(2024, 3, 10));
    assert_eq!(report.census.get("applied"), 4);
    assert_eq!(report.census.get("interviewing"), 1);
    assert_eq!(report.census.total(), 5);

    // 1710115200000 ms is 2024-03-11T00:00:00Z.
    let keys: Vec<String> = report
        .applied
        .iter()
        .map(|entry| entry.record.record_key())
        .collect();
    assert_eq!(keys, vec!["U1-https://jobs.example.com/3", "a2", "a1"]);

    let on_day: Vec<String> = report
        .applied_on
        .iter()
        .map(|entry| entry.record.record_key())
        .collect();
    assert_eq!(on_day, vec!["a2", "a1"]);
}

#[test]
fn rewritten_payload_replaces_previous_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    fs::write(&path, PAYLOAD).unwrap();

    let store = JobStore::default();
    let source = FileJobSource::new(&path);
    store.refresh(&source).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 10);
    assert_eq!(store.owner_report("U1", date).applied.len(), 3);

    fs::write(&path, r#"{"jobDB": [{"_id": "z", "userID": "U9"}]}"#).unwrap();
    store.refresh(&source).unwrap();
    assert_eq!(store.owners(), vec!["U9"]);
    assert!(store.owner_report("U1", date).applied.is_empty());
}

#[test]
fn unreadable_payload_leaves_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    fs::write(&path, PAYLOAD).unwrap();

    let store = JobStore::default();
    let source = FileJobSource::new(&path);
    store.refresh(&source).unwrap();
    assert!(!store.is_empty());

    fs::write(&path, "{ truncated").unwrap();
    assert!(store.refresh(&source).is_err());
    assert!(store.is_empty());
    assert!(store.owners().is_empty());
    assert!(
        store
            .last_error()
            .is_some_and(|message| message.contains(source.id()))
    );
}

#[test]
fn falsy_owner_and_status_scalars_do_not_create_clients_or_labels() {
    let records = job_monitor::decode_job_payload(
        br#"{"jobDB": [
            {"userID": false, "currentStatus": 0},
            {"userID": "U1", "currentStatus": false},
            {"userID": 0, "currentStatus": "Applied"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(job_monitor::owner_ids(&records), vec!["U1"]);
    let partition = job_monitor::owner_partition(&records, "U1");
    let census = job_monitor::status_census(partition.iter().copied());
    assert_eq!(census.iter().collect::<Vec<_>>(), vec![("unknown", 1)]);
}
