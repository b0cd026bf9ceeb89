use aeon_core::AeonCore;
use aeon_core::types::{AppConfig, CollectionName, Config, StructureKind};
use aeon_search::{MatchMode, SearchConfig, SearchEngine, SearchError, SearchQuery};
use tempfile::TempDir;

const ROWS: [&str; 4] = [
    "My favorite color is blue.",
    "The colour wheel has 12 hues!",
    "Colors of autumn: red, orange, gold.",
    "Dogs bark at the mailman",
];

fn open(temp: &TempDir) -> AeonCore {
    AeonCore::open(Config {
        base_path: temp.path().to_path_buf(),
    })
    .unwrap()
}

fn make_name(s: &str) -> CollectionName {
    CollectionName::try_from(s).unwrap()
}

/// Verify import, index, persist, reload and query across a store restart.
#[test]
fn test_import_index_persist_reload() {
    let temp = TempDir::new().unwrap();
    let name = make_name("notes");

    {
        let mut core = open(&temp);
        let mut engine = SearchEngine::new(SearchConfig::default());
        engine.import(name.clone(), ROWS);
        engine.index(&name).unwrap();
        engine.persist_table(&mut core, &name).unwrap();
        engine.persist_index(&mut core, &name).unwrap();
    }

    let core = open(&temp);
    let mut engine = SearchEngine::new(SearchConfig::default());
    let reports = engine.load_all(&core).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_complete());

    let results = engine
        .find(&name, &SearchQuery::parse("the", MatchMode::Exact))
        .unwrap();
    assert_eq!(
        results.rows().collect::<Vec<_>>(),
        vec![ROWS[1], ROWS[3]]
    );

    let results = engine
        .find(&name, &SearchQuery::parse("COLOR", MatchMode::Fuzzy))
        .unwrap();
    assert_eq!(results.row_ids(), &[0, 1, 2]);

    let results = engine
        .find(&name, &SearchQuery::parse("colour hues", MatchMode::Fuzzy))
        .unwrap();
    assert_eq!(results.row_ids(), &[1]);

    let results = engine
        .find(&name, &SearchQuery::parse("12", MatchMode::Exact))
        .unwrap();
    assert!(results.is_empty());
}

/// Verify the engine picks up threshold and default mode from config.toml.
#[test]
fn test_config_file_drives_engine() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        AppConfig::path(temp.path()),
        "[indexing]\nsimilarity_threshold = 1.0\n\n[query]\ndefault_mode = \"fuzzy\"\n",
    )
    .unwrap();

    let app_config = AppConfig::load(&AppConfig::path(temp.path())).unwrap();
    let config = SearchConfig::from(&app_config);
    assert_eq!(config.similarity_threshold(), 1.0);
    assert_eq!(config.default_mode(), MatchMode::Fuzzy);

    let name = make_name("notes");
    let mut engine = SearchEngine::new(config);
    engine.import(name.clone(), ROWS);
    engine.index(&name).unwrap();

    let query = SearchQuery::parse("color", engine.config().default_mode());
    assert_eq!(engine.find(&name, &query).unwrap().row_ids(), &[0]);
}

/// Verify a corrupted fuzzy dictionary degrades the collection to exact search.
#[test]
fn test_corrupted_fuzzy_dictionary() {
    let temp = TempDir::new().unwrap();
    let name = make_name("notes");

    {
        let mut core = open(&temp);
        let mut engine = SearchEngine::new(SearchConfig::default());
        engine.import(name.clone(), ROWS);
        engine.index(&name).unwrap();
        engine.persist_table(&mut core, &name).unwrap();
        engine.persist_index(&mut core, &name).unwrap();
    }
    {
        let db = redb::Database::create(temp.path().join("aeon.redb")).unwrap();
        let txn = db.begin_write().unwrap();
        {
            let definition: redb::TableDefinition<&str, &[u8]> =
                redb::TableDefinition::new("fuzzy_by_term");
            let mut table = txn.open_table(definition).unwrap();
            table.insert("notes", [1u8, 0xff].as_slice()).unwrap();
        }
        txn.commit().unwrap();
    }

    let core = open(&temp);
    let mut engine = SearchEngine::new(SearchConfig::default());
    let report = engine.load(&core, &name).unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.corrupted, vec![StructureKind::FuzzyByTerm]);
    assert!(report.missing.is_empty());
    assert!(matches!(
        report.unavailable().next(),
        Some(SearchError::StructureUnavailable {
            structure: StructureKind::FuzzyByTerm,
            ..
        })
    ));

    let status = engine.status(&name).unwrap();
    assert!(status.is_indexed());
    assert!(!status.supports_fuzzy());

    let exact = engine.find(&name, &SearchQuery::exact(["dogs"])).unwrap();
    assert_eq!(exact.row_ids(), &[3]);

    let err = engine
        .find(&name, &SearchQuery::fuzzy(["dogs"]))
        .unwrap_err();
    assert!(matches!(err, SearchError::FuzzyUnavailable(_)));

    engine.index(&name).unwrap();
    let fuzzy = engine.find(&name, &SearchQuery::fuzzy(["dogs"])).unwrap();
    assert_eq!(fuzzy.row_ids(), &[3]);
}

/// Verify removing a collection from the store leaves other collections intact.
#[test]
fn test_remove_collection() {
    let temp = TempDir::new().unwrap();
    let mut core = open(&temp);
    let mut engine = SearchEngine::new(SearchConfig::default());

    for name in ["a", "b"] {
        let name = make_name(name);
        engine.import(name.clone(), ROWS);
        engine.persist_table(&mut core, &name).unwrap();
    }

    assert!(core.remove(&make_name("a")).unwrap());

    let mut reloaded = SearchEngine::new(SearchConfig::default());
    reloaded.load_all(&core).unwrap();
    assert_eq!(reloaded.collections(), vec![&make_name("b")]);
}
