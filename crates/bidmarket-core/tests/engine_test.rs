#![allow(clippy::unwrap_used)]
// End-to-end tests for `FilterEngine`: wiremock for the HTTP path, in-memory
// sources for draft isolation and ordering.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::sync::oneshot;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bidmarket_api::{MarketClient, RawEntity, SearchEndpoint, SearchPage};
use bidmarket_core::{
    Catalog, CoreError, CostRange, DraftEdit, Entity, EntityId, EntityKind, FilterEngine,
    FilterPhase, FilterSelection, Lang, ListingSource, ListingState, ListingType, Location,
    MarketConfig, ReferenceSource, build_path, parse_path,
};

// ── Fixtures ────────────────────────────────────────────────────────

fn categories() -> Value {
    json!([
        { "id": 1, "name": "home_repair", "name_uk": "Ремонт", "name_en": "Home Repair" },
        { "id": 2, "name_uk": "Електрика" },
        { "id": 3, "name_en": "Beauty", "slug_uk": "krasa" },
        { "id": 4, "name_en": "Home Cleaning" }
    ])
}

fn subcategories() -> Value {
    json!([
        { "id": 10, "name_en": "Roofing", "category_id": 1 },
        { "id": 11, "name_en": "Wiring", "category_id": 2 },
        { "id": 12, "name_en": "Ghost", "category_id": 99 }
    ])
}

fn countries() -> Value {
    json!([{ "id": 5, "name_en": "Poland", "name_pl": "Polska" }])
}

fn cities() -> Value {
    json!([{ "id": 50, "name_en": "Lodz", "name_pl": "Łódź", "country_id": 5 }])
}

fn fixture(kind: EntityKind) -> Value {
    match kind {
        EntityKind::Category => categories(),
        EntityKind::Subcategory => subcategories(),
        EntityKind::Country => countries(),
        EntityKind::City => cities(),
    }
}

fn config() -> MarketConfig {
    MarketConfig::new(Url::parse("http://localhost:1/").unwrap())
}

fn location(href: &str) -> Location {
    Location::parse(href, Lang::Uk, ListingType::Requests).unwrap()
}

async fn mount_catalog(server: &MockServer) {
    for (route, body) in [
        ("/categories", categories()),
        ("/subcategories", subcategories()),
        ("/countries", countries()),
        ("/cities", cities()),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

fn http_engine(server: &MockServer) -> FilterEngine<MarketClient, MarketClient, Vec<String>> {
    let client = MarketClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    FilterEngine::new(client.clone(), client, Vec::<String>::new(), &config())
}

// ── In-memory sources ───────────────────────────────────────────────

struct FakeReference;

impl ReferenceSource for FakeReference {
    async fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<Entity>, CoreError> {
        let raw: Vec<RawEntity> = serde_json::from_value(fixture(kind)).unwrap();
        Ok(raw.into_iter().map(|r| Entity::from_raw(kind, r)).collect())
    }
}

async fn fake_catalog() -> Arc<Catalog> {
    bidmarket_core::CatalogStore::new(FakeReference)
        .load()
        .await
        .unwrap()
}

/// Answers immediately and counts calls.
#[derive(Default)]
struct CountingListings {
    calls: Arc<AtomicUsize>,
}

impl ListingSource for CountingListings {
    async fn fetch_listings(
        &self,
        _endpoint: SearchEndpoint,
        _params: Vec<(&'static str, String)>,
    ) -> Result<SearchPage, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SearchPage::default())
    }
}

/// Holds each request until the test releases the gate keyed by its
/// `search` parameter.
#[derive(Default)]
struct GatedListings {
    gates: Mutex<HashMap<String, oneshot::Receiver<SearchPage>>>,
}

impl GatedListings {
    fn gate(&self, search: &str) -> oneshot::Sender<SearchPage> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(search.to_owned(), rx);
        tx
    }
}

impl ListingSource for GatedListings {
    async fn fetch_listings(
        &self,
        _endpoint: SearchEndpoint,
        params: Vec<(&'static str, String)>,
    ) -> Result<SearchPage, CoreError> {
        let search = params
            .iter()
            .find(|(k, _)| *k == "search")
            .map(|(_, v)| v.clone())
            .unwrap();
        let gate = self.gates.lock().unwrap().remove(&search).unwrap();
        Ok(gate.await.unwrap())
    }
}

fn page(total: u64) -> SearchPage {
    SearchPage {
        results: Vec::new(),
        total,
    }
}

// ── HTTP end to end ─────────────────────────────────────────────────

#[tokio::test]
async fn test_mount_resolves_location_and_fetches() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    Mock::given(method("GET"))
        .and(path("/bids-v2"))
        .and(query_param("category_id", "1"))
        .and(query_param("subcategory_id", "10"))
        .and(query_param("country_id", "5"))
        .and(query_param("city_id", "50"))
        .and(query_param("search", "flat roof"))
        .and(query_param("min_cost", "100"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 7 }],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut engine = http_engine(&server);
    let handle = engine
        .mount(&location(
            "/en/bids/poland/lodz/home-repair/roofing?search=flat+roof&min_cost=100",
        ))
        .await
        .unwrap();
    handle.await.unwrap();

    match engine.listing_state() {
        ListingState::Loaded { seq, page } => {
            assert_eq!(seq, 1);
            assert_eq!(page.total, 1);
        }
        other => panic!("expected Loaded, got {other:?}"),
    }
    assert!(engine.history().is_empty(), "mount must not push history");

    let bids: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/bids-v2")
        .collect();
    assert_eq!(bids.len(), 1);
    assert_eq!(
        bids[0].url.query(),
        Some(
            "category_id=1&subcategory_id=10&country_id=5&city_id=50\
             &search=flat+roof&min_cost=100&language=en"
        )
    );
}

#[tokio::test]
async fn test_apply_pushes_href_and_refetches() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    Mock::given(method("GET"))
        .and(path("/bids-v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "total": 0
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut engine = http_engine(&server);
    engine
        .mount(&location("/uk/bids/all/all/ремонт/roofing"))
        .await
        .unwrap()
        .await
        .unwrap();

    engine
        .edit_draft(DraftEdit::Select(EntityKind::Category, EntityId::new(2)))
        .unwrap();
    engine.apply().unwrap().await.unwrap();

    insta::assert_snapshot!(engine.history().join("\n"), @"/uk/bids/all/all/електрика/all");
    assert_eq!(engine.state().applied().subcategory_id(), None);
    assert_eq!(engine.listing_state().seq(), Some(2));
}

#[tokio::test]
async fn test_companies_listing_uses_its_endpoint() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    Mock::given(method("GET"))
        .and(path("/companies-v2"))
        .and(query_param("country_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 1 }, { "id": 2 }],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut engine = http_engine(&server);
    engine
        .mount(&location("/pl/companies/polska"))
        .await
        .unwrap()
        .await
        .unwrap();

    match engine.listing_state() {
        ListingState::Loaded { page, .. } => assert_eq!(page.results.len(), 2),
        other => panic!("expected Loaded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_catalog_failure_disables_filters() {
    let server = MockServer::start().await;
    for route in ["/categories", "/subcategories", "/countries"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/cities"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bids-v2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut engine = http_engine(&server);
    let err = engine.mount(&location("/en/bids")).await.unwrap_err();

    assert!(matches!(err, CoreError::CatalogUnavailable { .. }), "got {err:?}");
    assert!(matches!(
        engine.state().phase(),
        FilterPhase::Unavailable { message } if message.contains("503")
    ));
    assert!(matches!(
        engine.edit_draft(DraftEdit::Search("x".into())),
        Err(CoreError::CatalogNotLoaded)
    ));
    assert!(engine.catalog().is_none());
}

#[tokio::test]
async fn test_fetch_failure_keeps_filters_usable() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/bids-v2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let mut engine = http_engine(&server);
    engine
        .mount(&location("/en/bids"))
        .await
        .unwrap()
        .await
        .unwrap();

    assert!(matches!(engine.listing_state(), ListingState::Failed { .. }));
    assert_eq!(engine.state().phase(), &FilterPhase::Ready);
    assert!(engine.edit_draft(DraftEdit::Search("roof".into())).is_ok());
}

#[tokio::test]
async fn test_orphan_child_is_dropped_everywhere() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/bids-v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [], "total": 0 })))
        .mount(&server)
        .await;

    let mut engine = http_engine(&server);
    engine
        .mount(&location("/en/category/home-repair/ghost"))
        .await
        .unwrap()
        .await
        .unwrap();

    let catalog = engine.catalog().unwrap();
    assert_eq!(catalog.subcategories().len(), 2);

    let applied = engine.state().applied();
    assert_eq!(applied.category_id(), Some(EntityId::new(1)));
    assert_eq!(applied.subcategory_id(), None);
    insta::assert_snapshot!(engine.state().current_href(), @"/en/category/home-repair/all");
}

// ── Draft isolation ─────────────────────────────────────────────────

#[tokio::test]
async fn test_draft_edits_never_fetch_or_navigate() {
    let listings = CountingListings::default();
    let calls = Arc::clone(&listings.calls);
    let mut engine = FilterEngine::new(FakeReference, listings, Vec::<String>::new(), &config());

    engine
        .mount(&location("/en/bids"))
        .await
        .unwrap()
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let applied = engine.state().applied();

    for edit in [
        DraftEdit::Select(EntityKind::City, EntityId::new(50)),
        DraftEdit::Select(EntityKind::Subcategory, EntityId::new(11)),
        DraftEdit::Search("дах".into()),
        DraftEdit::MinCost(Some(10)),
        DraftEdit::MaxCost(Some(20)),
        DraftEdit::Clear(EntityKind::City),
    ] {
        engine.edit_draft(edit).unwrap();
    }
    engine.discard_draft().unwrap();
    engine
        .edit_draft(DraftEdit::Select(EntityKind::Country, EntityId::new(5)))
        .unwrap();
    tokio::task::yield_now().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(engine.history().is_empty());
    assert!(Arc::ptr_eq(&applied, &engine.state().applied()));

    engine.submit().unwrap().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(engine.history().as_slice(), ["/en/bids/poland/all/all/all"]);
}

#[tokio::test]
async fn test_quick_filter_reset_and_language_switch() {
    let mut engine = FilterEngine::new(
        FakeReference,
        CountingListings::default(),
        Vec::<String>::new(),
        &config(),
    );
    engine
        .mount(&location("/pl/bids/polska"))
        .await
        .unwrap()
        .await
        .unwrap();

    engine
        .quick_filter(DraftEdit::Select(EntityKind::Subcategory, EntityId::new(11)))
        .unwrap()
        .await
        .unwrap();
    engine
        .quick_filter(DraftEdit::Select(EntityKind::City, EntityId::new(50)))
        .unwrap()
        .await
        .unwrap();
    engine.switch_language(Lang::Uk).unwrap().await.unwrap();
    engine.reset().unwrap().await.unwrap();

    insta::assert_snapshot!(engine.history().join("\n"), @r"
    /pl/bids/polska/all/електрика/wiring
    /pl/bids/polska/łódź/електрика/wiring
    /uk/bids/poland/lodz/електрика/wiring
    /uk/bids/all/all/all/all
    ");
}

// ── Stale responses ─────────────────────────────────────────────────

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let listings = GatedListings::default();
    let first = listings.gate("first");
    let second = listings.gate("second");
    let mut engine = FilterEngine::new(FakeReference, listings, Vec::<String>::new(), &config());
    let mut updates = engine.subscribe_listings();

    let slow = engine.mount(&location("/en/bids?search=first")).await.unwrap();
    engine
        .edit_draft(DraftEdit::Search("second".into()))
        .unwrap();
    let fast = engine.apply().unwrap();
    assert_eq!(engine.listing_state(), ListingState::Loading { seq: 2 });

    second.send(page(2)).unwrap();
    fast.await.unwrap();
    assert_eq!(
        engine.listing_state(),
        ListingState::Loaded {
            seq: 2,
            page: Arc::new(page(2)),
        }
    );
    updates.borrow_and_update();

    first.send(page(1)).unwrap();
    slow.await.unwrap();

    assert_eq!(engine.listing_state().seq(), Some(2));
    assert!(!updates.has_changed().unwrap(), "stale response was published");
}

// ── Build / parse ───────────────────────────────────────────────────

#[tokio::test]
async fn test_build_parse_idempotence() {
    let catalog = fake_catalog().await;
    let get = |kind, id| Arc::clone(catalog.get(kind, EntityId::new(id)).unwrap());

    let selections = vec![
        FilterSelection::empty(),
        FilterSelection {
            category: Some(get(EntityKind::Category, 2)),
            subcategory: Some(get(EntityKind::Subcategory, 11)),
            country: Some(get(EntityKind::Country, 5)),
            city: Some(get(EntityKind::City, 50)),
            search: "дах і стіни".into(),
            cost: CostRange::new(Some(100), Some(500)),
        },
        FilterSelection {
            category: Some(get(EntityKind::Category, 3)),
            search: "a&b=c".into(),
            ..FilterSelection::default()
        },
        FilterSelection {
            category: Some(get(EntityKind::Category, 4)),
            country: Some(get(EntityKind::Country, 5)),
            cost: CostRange::new(None, Some(75)),
            ..FilterSelection::default()
        },
    ];

    for selection in &selections {
        for lang in Lang::ALL {
            for listing in ListingType::ALL {
                let built = build_path(selection, lang, listing);
                let href = built.to_href(lang, listing);
                let loc = Location::parse(&href, Lang::De, ListingType::Companies).unwrap();
                assert_eq!((loc.lang, loc.listing), (lang, listing), "{href}");

                let parsed = parse_path(loc.segments.as_slice(), &loc.query, lang, &catalog, listing);
                assert_eq!(build_path(&parsed, lang, listing), built, "{href}");
                if listing == ListingType::Requests {
                    assert_eq!(&parsed, selection, "{href}");
                }
            }
        }
    }
}

#[tokio::test]
async fn test_localized_hrefs() {
    let catalog = fake_catalog().await;
    let selection = FilterSelection {
        category: Some(Arc::clone(&catalog.categories()[3])),
        ..FilterSelection::default()
    };

    // no uk name: the english one is slugged
    let uk = build_path(&selection, Lang::Uk, ListingType::Category);
    insta::assert_snapshot!(uk.to_href(Lang::Uk, ListingType::Category), @"/uk/category/home-cleaning/all");

    let selection = FilterSelection {
        category: Some(Arc::clone(&catalog.categories()[1])),
        search: "ремонт даху".into(),
        ..FilterSelection::default()
    };
    let en = build_path(&selection, Lang::En, ListingType::Category);
    insta::assert_snapshot!(
        en.to_href(Lang::En, ListingType::Category),
        @"/en/category/електрика/all?search=%D1%80%D0%B5%D0%BC%D0%BE%D0%BD%D1%82+%D0%B4%D0%B0%D1%85%D1%83"
    );
}
