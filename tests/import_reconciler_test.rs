mod common;

use std::collections::HashSet;

use common::{fields, row, MemoryLeadStore};
use leads_backend::dto::lead_dto::RawLeadRow;
use leads_backend::services::import_service::ImportService;
use leads_backend::services::lead_service::LeadStore;

fn names(leads: &[leads_backend::models::lead::Lead]) -> HashSet<(String, String)> {
    leads
        .iter()
        .map(|lead| (lead.first_name.clone(), lead.last_name.clone()))
        .collect()
}

#[tokio::test]
async fn creates_new_leads_and_updates_existing_ones() {
    let store = MemoryLeadStore::new();
    store.create(fields("Ana", "Gomez", "Acme")).await.unwrap();

    let service = ImportService::new(store.clone());
    let outcome = service
        .import_batch(vec![
            row("Ana", "Gomez", "Initech"),
            row("Bo", "Li", "Globex"),
        ])
        .await;

    assert_eq!(
        names(&outcome.imported_leads),
        HashSet::from([("Bo".to_string(), "Li".to_string())])
    );
    assert_eq!(
        names(&outcome.updated_leads),
        HashSet::from([("Ana".to_string(), "Gomez".to_string())])
    );
    assert!(outcome.failed_leads.is_empty());

    // Update is a full overwrite, not a merge.
    let ana = store.lead(1).unwrap();
    assert_eq!(ana.company_name, "Initech");
    assert_eq!(store.leads().len(), 2);
}

#[tokio::test]
async fn update_overwrites_fields_the_row_left_empty() {
    let store = MemoryLeadStore::new();
    let seeded = store
        .create(leads_backend::models::lead::LeadFields {
            first_name: "Ana".into(),
            last_name: "Gomez".into(),
            job_title: "CTO".into(),
            email: "ana@acme.io".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let service = ImportService::new(store.clone());
    let outcome = service.import_batch(vec![row("Ana", "Gomez", "Acme")]).await;
    assert_eq!(outcome.updated_leads.len(), 1);

    let ana = store.lead(seeded.id).unwrap();
    assert_eq!(ana.company_name, "Acme");
    assert_eq!(ana.job_title, "");
    assert_eq!(ana.email, "");
}

#[tokio::test]
async fn repeated_key_within_one_batch_creates_then_updates() {
    let store = MemoryLeadStore::new();
    let service = ImportService::new(store.clone());

    let outcome = service
        .import_batch(vec![row("Jo", "", ""), row("Jo", "", "Acme")])
        .await;

    assert_eq!(outcome.imported_leads.len(), 1);
    assert_eq!(outcome.updated_leads.len(), 1);
    assert!(outcome.failed_leads.is_empty());
    assert_eq!(store.leads().len(), 1);
}

#[tokio::test]
async fn importing_the_same_batch_twice_is_idempotent_on_name() {
    let store = MemoryLeadStore::new();
    let service = ImportService::new(store.clone());

    let first = service.import_batch(vec![row("Jo", "Ma", "Acme")]).await;
    assert_eq!(first.imported_leads.len(), 1);
    assert!(first.updated_leads.is_empty());

    let second = service.import_batch(vec![row("Jo", "Ma", "Acme")]).await;
    assert!(second.imported_leads.is_empty());
    assert_eq!(second.updated_leads.len(), 1);
    assert_eq!(store.leads().len(), 1);
}

#[tokio::test]
async fn rows_without_first_name_always_fail() {
    let store = MemoryLeadStore::new();
    let service = ImportService::new(store.clone());

    let no_name = RawLeadRow {
        last_name: Some("Gomez".into()),
        email: Some("x@y.io".into()),
        company_name: Some("Acme".into()),
        ..Default::default()
    };
    let outcome = service
        .import_batch(vec![no_name.clone(), row("Ana", "", "")])
        .await;

    assert_eq!(outcome.failed_leads, vec![no_name]);
    assert_eq!(outcome.imported_leads.len(), 1);
    assert_eq!(store.leads().len(), 1);
}

#[tokio::test]
async fn persistence_errors_downgrade_to_failed_rows() {
    let store = MemoryLeadStore::new();
    store.create(fields("Ana", "Gomez", "Acme")).await.unwrap();
    store.set_fail_writes(true);

    let service = ImportService::new(store.clone());
    let outcome = service
        .import_batch(vec![
            row("Ana", "Gomez", "Initech"),
            row("Bo", "Li", "Globex"),
        ])
        .await;

    assert!(outcome.imported_leads.is_empty());
    assert!(outcome.updated_leads.is_empty());
    assert_eq!(outcome.failed_leads.len(), 2);

    // The pre-existing lead is untouched.
    assert_eq!(store.lead(1).unwrap().company_name, "Acme");
}

#[tokio::test]
async fn empty_batch_yields_empty_outcome() {
    let store = MemoryLeadStore::new();
    let service = ImportService::new(store.clone());
    let outcome = service.import_batch(Vec::new()).await;
    assert!(outcome.imported_leads.is_empty());
    assert!(outcome.updated_leads.is_empty());
    assert!(outcome.failed_leads.is_empty());
}
