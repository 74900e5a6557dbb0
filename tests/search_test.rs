mod common;

use assert2::{check, let_assert};
use common::{adapter, store};
use rstest::rstest;
use sitesearch::search::plain_text;
use sitesearch::{DocumentRecord, DocumentStore, IndexConfig, QueryAdapter, SearchIndex};
use std::sync::Arc;

/// Urls of pages whose title or text literally contains `word`.
fn pages_containing(store: &DocumentStore, word: &str) -> Vec<String> {
    store
        .find_all(|r| {
            let text = format!("{} {}", r.title, plain_text(&r.content)).to_lowercase();
            text.contains(word)
        })
        .into_iter()
        .map(|r| r.url.clone())
        .collect()
}

#[rstest]
#[case("install")]
#[case("template")]
#[case("static")]
#[case("html")]
#[case("markdown")]
fn first_result_is_a_matching_page(adapter: Arc<QueryAdapter>, #[case] word: &str) {
    let matches = adapter.search(word).unwrap();
    let_assert!(Some(first) = matches.first());

    let matching = pages_containing(adapter.store(), word);
    check!(matching.contains(&first.record.url), "{} not in {:?}", first.record.url, matching);
}

#[rstest]
fn exact_title_finds_its_page(adapter: Arc<QueryAdapter>) {
    for record in adapter.store() {
        let matches = adapter.search(&record.title).unwrap();
        check!(
            matches.iter().any(|m| m.record.url == record.url),
            "'{}' did not find {}",
            record.title,
            record.url
        );
    }
}

#[rstest]
#[case("kubernetes")]
#[case("zzzz")]
#[case("the of")]
#[case("12345")] // no page mentions a number
#[case("ignored")] // only inside a <script> block
fn unmatched_query_is_empty(adapter: Arc<QueryAdapter>, #[case] query: &str) {
    check!(adapter.search(query).unwrap().is_empty());
}

#[rstest]
fn every_url_resolves_to_exactly_one_page(store: Arc<DocumentStore>) {
    for record in store.iter() {
        let_assert!(Some(found) = store.find_by_url(&record.url));
        check!(found.title == record.title);
        check!(found.content == record.content);
        check!(store.find_all(|r| r.url == record.url).len() == 1);
    }
}

#[rstest]
fn adapter_keeps_index_order(adapter: Arc<QueryAdapter>) {
    let from_adapter: Vec<_> = adapter
        .search("page content")
        .unwrap()
        .into_iter()
        .map(|m| m.record.url.as_str())
        .collect();
    let from_index: Vec<_> = adapter
        .index()
        .search("page content")
        .into_iter()
        .map(|hit| hit.reference)
        .collect();

    check!(from_adapter.len() >= 4);
    check!(from_adapter == from_index);
}

#[rstest]
fn title_match_outranks_body_match(adapter: Arc<QueryAdapter>) {
    let matches = adapter.search("search").unwrap();
    let_assert!(Some(first) = matches.first());
    check!(first.record.url == "/docs/search/");
}

#[rstest]
fn did_you_mean_suggests_close_titles(adapter: Arc<QueryAdapter>) {
    check!(adapter.search("Deploymnet").unwrap().is_empty());
    let near = adapter.did_you_mean("Deploymnet", 3);
    let_assert!(Some(first) = near.first());
    check!(first.url == "/docs/deployment/");
}

#[rstest]
#[case("404", "/404/")]
#[case("2.0", "/docs/v2/")]
#[case("It", "/docs/it/")]
fn titles_without_plain_words_are_searchable(#[case] title: &str, #[case] url: &str) {
    let store = Arc::new(
        DocumentStore::from_records(vec![
            DocumentRecord::new("404", "<p>Not found</p>", "/404/"),
            DocumentRecord::new("2.0", "<p>Release notes</p>", "/docs/v2/"),
            DocumentRecord::new("It", "<p>The project itself</p>", "/docs/it/"),
            DocumentRecord::new("Guide", "<p>Start with it</p>", "/docs/guide/"),
        ])
        .unwrap(),
    );
    let index = Arc::new(SearchIndex::build(store.as_ref(), &IndexConfig::default()));
    let adapter = QueryAdapter::new(store, index);

    let matches = adapter.search(title).unwrap();
    let_assert!(Some(first) = matches.first());
    check!(first.record.url == url);
}
