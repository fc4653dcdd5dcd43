use jobboard_core::store::{DocumentStore, StoreResponse, StoreResult};
use jobboard_core::{
    Cell, CompanyRole, JobListing, ListingRepository, Location, MemoryDocumentStore, RepoError,
    RemoteListingRepository, Table, COLUMNS,
};
use serde_json::json;
use std::sync::Barrier;
use std::thread;

fn acme() -> JobListing {
    JobListing {
        company_name: "Acme".to_string(),
        phone_number: "555-0100".to_string(),
        location: Location::Chennai,
        role: CompanyRole::Freelance,
        cyber_security: true,
        python_backend: false,
        net_backend: false,
        ai_developer: false,
    }
}

fn listing(company: &str) -> JobListing {
    JobListing::new(company, "000", Location::Bengaluru, CompanyRole::ProductBased)
}

#[test]
fn append_to_empty_store_then_fetch_returns_one_projected_row() {
    let store = MemoryDocumentStore::new();
    let repo = RemoteListingRepository::new(&store);

    assert!(repo.append(&acme()).unwrap());

    let table = repo.fetch().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.cell(0, "Company Name"),
        Some(&Cell::Text("Acme".into()))
    );
    assert_eq!(
        table.cell(0, "Phone Number"),
        Some(&Cell::Text("555-0100".into()))
    );
    assert_eq!(table.cell(0, "Location"), Some(&Cell::Text("Chennai".into())));
    assert_eq!(
        table.cell(0, "Role of the Company"),
        Some(&Cell::Text("Freelance".into()))
    );
    assert_eq!(
        table.cell(0, "Cyber Security Engineer"),
        Some(&Cell::Bool(true))
    );
    assert_eq!(table.cell(0, "Python Backend"), Some(&Cell::Bool(false)));
    assert_eq!(table.cell(0, ".Net Backend"), Some(&Cell::Bool(false)));
    assert_eq!(
        table.cell(0, "AI Product Developer"),
        Some(&Cell::Bool(false))
    );
}

#[test]
fn appended_listing_is_the_last_row() {
    let store = MemoryDocumentStore::new();
    let repo = RemoteListingRepository::new(&store);
    repo.append(&listing("First")).unwrap();
    repo.append(&listing("Second")).unwrap();
    let before = repo.fetch().unwrap().len();

    repo.append(&acme()).unwrap();

    let table = repo.fetch().unwrap();
    let expected = Table::from_listings(&[acme()]);
    assert_eq!(table.len(), before + 1);
    assert_eq!(table.rows().last(), expected.rows().first());
}

#[test]
fn append_writes_the_camel_case_wire_shape() {
    let store = MemoryDocumentStore::new();
    let repo = RemoteListingRepository::new(&store);
    repo.append(&acme()).unwrap();

    assert_eq!(
        store.document().unwrap(),
        json!([{
            "companyName": "Acme",
            "phoneNumber": "555-0100",
            "location": "Chennai",
            "role": "Freelance",
            "cyberSecurity": true,
            "pythonBackend": false,
            "netBackend": false,
            "aiDeveloper": false
        }])
    );
}

#[test]
fn fetch_treats_missing_and_empty_documents_as_empty_tables() {
    for body in ["", "null", "[]", "{}", "[null, null]"] {
        let store = MemoryDocumentStore::new();
        store.set_raw_body(body);
        let table = RemoteListingRepository::new(&store).fetch().unwrap();
        assert!(table.is_empty(), "body `{body}` should yield an empty table");
        assert_eq!(table.headers().len(), COLUMNS.len());
    }

    let absent = MemoryDocumentStore::new();
    assert!(RemoteListingRepository::new(&absent).fetch().unwrap().is_empty());
}

#[test]
fn fetch_treats_non_success_status_as_empty() {
    let store = MemoryDocumentStore::with_document(&json!([serde_json::to_value(acme()).unwrap()]));
    store.set_read_status(401);

    let table = RemoteListingRepository::new(&store).fetch().unwrap();
    assert!(table.is_empty());
}

#[test]
fn fetch_reads_keyed_documents_in_store_order() {
    let store = MemoryDocumentStore::new();
    store.set_raw_body(
        json!({
            "-Nb": serde_json::to_value(listing("Beta")).unwrap(),
            "-Na": serde_json::to_value(listing("Alpha")).unwrap(),
            "-Nc": null
        })
        .to_string(),
    );

    let table = RemoteListingRepository::new(&store).fetch().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0][0], Cell::Text("Beta".into()));
    assert_eq!(table.rows()[1][0], Cell::Text("Alpha".into()));
}

#[test]
fn fetch_columns_are_fixed_regardless_of_remote_key_order() {
    let store = MemoryDocumentStore::new();
    store.set_raw_body(
        r#"[{"aiDeveloper":true,"netBackend":true,"pythonBackend":false,"cyberSecurity":false,
            "role":"Service Based","location":"Coimbatore","phoneNumber":"9","companyName":"Q"}]"#,
    );

    let table = RemoteListingRepository::new(&store).fetch().unwrap();
    let labels: Vec<&str> = COLUMNS.iter().map(|column| column.label).collect();
    assert_eq!(table.headers().to_vec(), labels);
    assert_eq!(
        table.rows()[0],
        vec![
            Cell::Text("Q".into()),
            Cell::Text("9".into()),
            Cell::Text("Coimbatore".into()),
            Cell::Text("Service Based".into()),
            Cell::Bool(false),
            Cell::Bool(true),
            Cell::Bool(false),
            Cell::Bool(true),
        ]
    );
}

#[test]
fn fetch_reports_schema_mismatch_for_incomplete_records() {
    let mut incomplete = serde_json::to_value(acme()).unwrap();
    incomplete.as_object_mut().unwrap().remove("netBackend");
    let store = MemoryDocumentStore::with_document(&json!([
        null,
        serde_json::to_value(acme()).unwrap(),
        incomplete
    ]));

    let err = RemoteListingRepository::new(&store).fetch().unwrap_err();
    match err {
        RepoError::SchemaMismatch { index, field } => {
            assert_eq!(index, 1);
            assert_eq!(field, "netBackend");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fetch_reports_invalid_json_body() {
    let store = MemoryDocumentStore::new();
    store.set_raw_body("<html>maintenance</html>");

    let err = RemoteListingRepository::new(&store).fetch().unwrap_err();
    assert!(matches!(err, RepoError::InvalidDocument(_)));
}

#[test]
fn unreachable_store_is_remote_unavailable_and_leaves_state_unchanged() {
    let store = MemoryDocumentStore::with_document(&json!([]));
    store.set_unavailable(true);
    let repo = RemoteListingRepository::new(&store);

    assert!(matches!(
        repo.fetch().unwrap_err(),
        RepoError::RemoteUnavailable(_)
    ));
    assert!(matches!(
        repo.append(&acme()).unwrap_err(),
        RepoError::RemoteUnavailable(_)
    ));

    store.set_unavailable(false);
    assert_eq!(store.document(), Some(json!([])));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn rejected_write_returns_false_without_changing_the_document() {
    let store = MemoryDocumentStore::with_document(&json!([]));
    store.set_write_status(403);
    let repo = RemoteListingRepository::new(&store);

    assert!(!repo.append(&acme()).unwrap());
    assert_eq!(store.document(), Some(json!([])));
}

#[test]
fn append_after_failed_read_starts_from_an_empty_array() {
    let store = MemoryDocumentStore::with_document(&json!([serde_json::to_value(listing("Old")).unwrap()]));
    store.set_read_status(500);
    let repo = RemoteListingRepository::new(&store);

    assert!(repo.append(&acme()).unwrap());

    store.set_read_status(200);
    let table = repo.fetch().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0][0], Cell::Text("Acme".into()));
}

#[test]
fn interleaved_appends_lose_the_first_writer() {
    let store = MemoryDocumentStore::new();
    let repo = RemoteListingRepository::new(&store);

    // A and B both read before either writes.
    let mut seen_by_a = repo.load_document().unwrap();
    let mut seen_by_b = repo.load_document().unwrap();

    seen_by_a.push(serde_json::to_value(listing("A")).unwrap());
    assert!(repo.replace_document(&seen_by_a).unwrap());
    seen_by_b.push(serde_json::to_value(listing("B")).unwrap());
    assert!(repo.replace_document(&seen_by_b).unwrap());

    let table = repo.fetch().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0][0], Cell::Text("B".into()));
}

/// Holds every reader at a barrier until all concurrent appends have read.
struct ReadGate<'a> {
    inner: &'a MemoryDocumentStore,
    barrier: Barrier,
}

impl DocumentStore for ReadGate<'_> {
    fn get(&self) -> StoreResult<StoreResponse> {
        let response = self.inner.get();
        self.barrier.wait();
        response
    }

    fn put(&self, body: String) -> StoreResult<u16> {
        self.inner.put(body)
    }
}

#[test]
fn concurrent_appends_keep_only_the_last_write() {
    let store = MemoryDocumentStore::new();
    let gate = ReadGate {
        inner: &store,
        barrier: Barrier::new(2),
    };
    let repo = RemoteListingRepository::new(&gate);

    thread::scope(|scope| {
        let first = scope.spawn(|| repo.append(&listing("A")).unwrap());
        let second = scope.spawn(|| repo.append(&listing("B")).unwrap());
        assert!(first.join().unwrap());
        assert!(second.join().unwrap());
    });

    assert_eq!(store.write_count(), 2);
    let document = store.document().unwrap();
    let records = document.as_array().unwrap();
    assert_eq!(records.len(), 1, "one of the two appends must be lost");
    let survivor = records[0]["companyName"].as_str().unwrap();
    assert!(survivor == "A" || survivor == "B");
}
