use nextcalls_core::source::fixture::{load_fixture, save_fixture};
use nextcalls_core::{
    CachedContactSource, CallDerivationEngine, ContactSource, FixtureContactSource,
    FixtureDocument, FixtureReminderSource, RawContact, RawReminder, ReminderSource, SourceError,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

fn document() -> FixtureDocument {
    let mut done = RawReminder::new("Volgende acties", "Item 0611223199");
    done.completed = true;
    FixtureDocument {
        lists: vec!["Leeg".to_string()],
        reminders: vec![
            RawReminder::new("Volgende acties", "Item 0477403040"),
            RawReminder::new("Werk", "Joske Vermeulen bellen"),
            done,
        ],
        contacts: vec![RawContact::person("Joske", "Vermeulen", "+32 477 88 55 66")],
    }
}

async fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("fixture.json");
    save_fixture(&path, &document()).await.unwrap();
    path
}

#[tokio::test]
async fn reads_open_reminders_per_list() {
    let dir = tempfile::tempdir().unwrap();
    let source = FixtureReminderSource::new(write_fixture(dir.path()).await);

    let all = source.read_all("").await.unwrap();
    let work = source.read_all("Werk").await.unwrap();
    let empty = source.read_all("Leeg").await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].title, "Joske Vermeulen bellen");
    assert!(empty.is_empty());
    assert_eq!(
        source.list_available_lists().await.unwrap(),
        vec!["Leeg", "Volgende acties", "Werk"]
    );
}

#[tokio::test]
async fn unknown_list_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = FixtureReminderSource::new(write_fixture(dir.path()).await);

    let err = source.read_all("Prive").await.unwrap_err();

    assert_eq!(err, SourceError::ListNotFound("Prive".to_string()));
}

#[tokio::test]
async fn completion_is_written_back_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path()).await;
    let source = FixtureReminderSource::new(&path);
    let reminder = source.read_all("Volgende acties").await.unwrap()[0].clone();

    source.complete(&reminder).await.unwrap();

    let stored = load_fixture(&path).await.unwrap();
    let record = stored
        .reminders
        .iter()
        .find(|record| record.id == reminder.id)
        .unwrap();
    assert!(record.completed);
    assert!(source.read_all("Volgende acties").await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_document_is_a_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let err = FixtureContactSource::new(&path).read_all().await.unwrap_err();

    assert!(matches!(err, SourceError::SourceReadFailure(_)));
}

#[tokio::test]
async fn cached_contacts_outlive_document_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path()).await;
    let cached = CachedContactSource::new(Arc::new(FixtureContactSource::new(&path)));

    assert_eq!(cached.read_all().await.unwrap().len(), 1);
    save_fixture(&path, &FixtureDocument::default()).await.unwrap();

    assert!(cached.is_cached());
    assert_eq!(cached.read_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn engine_derives_calls_from_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path()).await;
    let (_selection, selection_rx) = watch::channel(String::new());
    let engine = CallDerivationEngine::new(
        Arc::new(FixtureReminderSource::new(&path)),
        Arc::new(CachedContactSource::new(Arc::new(
            FixtureContactSource::new(&path),
        ))),
        selection_rx,
    );

    assert_eq!(engine.refresh().await.unwrap(), 2);
    let phones: Vec<String> = engine.calls().iter().map(|call| call.phone.clone()).collect();
    assert_eq!(phones, vec!["0477403040", "+32477885566"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reads_during_completions_never_see_partial_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.json");
    let document = FixtureDocument {
        reminders: (0..2000)
            .map(|n| RawReminder::new("Volgende acties", format!("Item {n} 0477403040")))
            .collect(),
        ..FixtureDocument::default()
    };
    save_fixture(&path, &document).await.unwrap();
    let source = Arc::new(FixtureReminderSource::new(&path));
    let targets = source.read_all("").await.unwrap()[..50].to_vec();

    let completer = tokio::spawn({
        let source = Arc::clone(&source);
        async move {
            for reminder in &targets {
                source.complete(reminder).await.unwrap();
            }
        }
    });

    let mut reads = 0;
    loop {
        let open = source.read_all("").await.unwrap();
        assert!(open.len() >= 1950);
        reads += 1;
        if completer.is_finished() {
            break;
        }
    }
    completer.await.unwrap();

    assert!(reads > 0);
    assert_eq!(source.read_all("").await.unwrap().len(), 1950);
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name != "fixture.json")
        .collect();
    assert!(leftovers.is_empty(), "temporary files left: {leftovers:?}");
}
