//! Response normalization.
//!
//! Maps backend JSON onto [`SearchResponse`]. Nothing in here fails: missing,
//! null or malformed pieces fall back to empty values so a partial batch still
//! yields one response per query.
//!
//! The requested [`SearchType`] fixes the shape of synthesized responses; an
//! echoed `search_params.type` decides the shape of items the backend sent.

use crate::types::{
    ImageResult, OrganicResult, SearchOutput, SearchQuery, SearchResponse, SearchResults,
    SearchType,
};
use serde_json::Value;
use tracing::debug;

fn str_field(v: &Value, key: &str) -> String {
    v.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Non-negative integer from a number, float or numeric string; 0 otherwise.
fn u64_field(v: &Value, key: &str) -> u64 {
    v.get(key)
        .and_then(|x| {
            x.as_u64()
                .or_else(|| x.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .or_else(|| {
                    let s = x.as_str()?.trim();
                    s.parse::<u64>()
                        .ok()
                        .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u64))
                })
        })
        .unwrap_or(0)
}

fn u32_field(v: &Value, key: &str) -> u32 {
    u32::try_from(u64_field(v, key)).unwrap_or(u32::MAX)
}

/// Stringify a scalar without parsing it; backend totals may be placeholders.
fn text_field(v: Option<&Value>, default: &str) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

fn organic_result(r: &Value) -> OrganicResult {
    OrganicResult {
        title: str_field(r, "title"),
        link: str_field(r, "link"),
        snippet: str_field(r, "snippet"),
        position: u32_field(r, "position"),
    }
}

/// Backend `imageUrl` is the image itself, backend `link` is the hosting page.
fn image_result(r: &Value) -> ImageResult {
    ImageResult {
        title: str_field(r, "title"),
        link: str_field(r, "imageUrl"),
        thumbnail: str_field(r, "thumbnailUrl"),
        source: str_field(r, "source"),
        source_link: str_field(r, "link"),
        width: u32_field(r, "imageWidth"),
        height: u32_field(r, "imageHeight"),
        position: u32_field(r, "position"),
    }
}

/// Normalize one backend item; `None`, null, empty arrays and non-objects
/// produce an empty `kind`-shaped response for `fallback_query`.
pub fn parse_one(item: Option<&Value>, fallback_query: &str, kind: SearchType) -> SearchResponse {
    let data = match item {
        Some(v @ Value::Object(_)) => v,
        _ => return SearchResponse::empty(fallback_query, kind),
    };

    let search_info = data.get("search_info");
    let params = data.get("search_params");
    let search_type = match params.and_then(|p| p.get("type")).and_then(Value::as_str) {
        Some("image") => SearchType::Image,
        Some(_) => SearchType::Search,
        None => kind,
    };
    let query = params
        .and_then(|p| p.get("q"))
        .and_then(Value::as_str)
        .unwrap_or(fallback_query)
        .to_string();

    let raw_results = data
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let results = if search_type == SearchType::Image {
        SearchResults::Image(raw_results.iter().map(image_result).collect())
    } else {
        SearchResults::Organic(raw_results.iter().map(organic_result).collect())
    };

    SearchResponse {
        success: true,
        query,
        total_results: text_field(search_info.and_then(|s| s.get("total_results")), "0"),
        search_time: text_field(search_info.and_then(|s| s.get("search_time")), "0"),
        results,
        credits_used: u64_field(data, "credits"),
    }
}

fn items(raw: &Value) -> &[Value] {
    match raw {
        Value::Null => &[],
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}

/// Normalize the payload of a single-query call.
pub fn process_single(raw: &Value, query: &str, kind: SearchType) -> SearchResponse {
    parse_one(items(raw).first(), query, kind)
}

/// Normalize the payload of a batch call: exactly one response per query, in
/// input order, padded with empty responses when the backend returned fewer.
pub fn process_batch(raw: &Value, queries: &[String], kind: SearchType) -> Vec<SearchResponse> {
    let items = items(raw);
    if items.len() < queries.len() {
        debug!(
            expected = queries.len(),
            received = items.len(),
            "padding batch response with empty results"
        );
    } else if items.len() > queries.len() {
        debug!(
            expected = queries.len(),
            received = items.len(),
            "dropping surplus batch items"
        );
    }
    queries
        .iter()
        .enumerate()
        .map(|(i, q)| parse_one(items.get(i), q, kind))
        .collect()
}

/// Normalize a raw backend payload against the original query.
///
/// Single query in, [`SearchOutput::Single`] out; batch in,
/// [`SearchOutput::Batch`] out.
pub fn process(raw: &Value, original: &SearchQuery, kind: SearchType) -> SearchOutput {
    match original {
        SearchQuery::Single(q) => SearchOutput::Single(process_single(raw, q, kind)),
        SearchQuery::Batch(queries) => SearchOutput::Batch(process_batch(raw, queries, kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WEB: SearchType = SearchType::Search;
    const IMAGE: SearchType = SearchType::Image;

    fn organic_item(q: &str) -> Value {
        json!({
            "search_info": {"total_results": "About 1,000", "search_time": "0.42"},
            "results": [
                {"title": "Rust", "link": "https://rust-lang.org", "snippet": "A language", "position": 1}
            ],
            "search_params": {"type": "search", "q": q},
            "credits": 1
        })
    }

    #[test]
    fn test_null_and_empty_list_are_equivalent() {
        let a = process(&Value::Null, &SearchQuery::from("x"), WEB);
        let b = process(&json!([]), &SearchQuery::from("x"), WEB);
        assert_eq!(a, b);

        let r = a.into_single().unwrap();
        assert!(r.success);
        assert_eq!(r.query, "x");
        assert_eq!(r.total_results, "0");
        assert_eq!(r.search_time, "0");
        assert_eq!(r.credits_used, 0);
        assert!(r.results.is_empty());
    }

    #[test]
    fn test_single_object_payload() {
        let out = process(&organic_item("rust lang"), &SearchQuery::from("rust"), WEB);
        let r = out.into_single().unwrap();
        // Backend echo wins over the input query
        assert_eq!(r.query, "rust lang");
        assert_eq!(r.total_results, "About 1,000");
        assert_eq!(r.credits_used, 1);
        let organic = r.results.organic().unwrap();
        assert_eq!(organic[0].link, "https://rust-lang.org");
        assert_eq!(organic[0].position, 1);
    }

    #[test]
    fn test_single_query_takes_first_item_of_array() {
        let raw = json!([organic_item("first"), organic_item("second")]);
        let r = process(&raw, &SearchQuery::from("first"), WEB).into_single().unwrap();
        assert_eq!(r.query, "first");
    }

    #[test]
    fn test_batch_is_padded_in_order() {
        let raw = json!([organic_item("a")]);
        let out = process(&raw, &SearchQuery::from(["a", "b", "c"]), WEB);
        let batch = out.into_batch().unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].query, "a");
        assert_eq!(batch[0].credits_used, 1);
        assert_eq!(batch[1], SearchResponse::empty("b", WEB));
        assert_eq!(batch[2], SearchResponse::empty("c", WEB));
    }

    #[test]
    fn test_batch_with_empty_payload() {
        for raw in [Value::Null, json!([])] {
            let batch = process(&raw, &SearchQuery::from(["a", "b"]), WEB).into_batch().unwrap();
            assert_eq!(
                batch,
                vec![SearchResponse::empty("a", WEB), SearchResponse::empty("b", WEB)]
            );
        }
    }

    #[test]
    fn test_batch_drops_surplus_items() {
        let raw = json!([organic_item("a"), organic_item("b"), organic_item("c")]);
        let batch = process(&raw, &SearchQuery::from(vec!["a", "b"]), WEB).into_batch().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].query, "b");
    }

    #[test]
    fn test_missing_echo_falls_back_to_input_query() {
        let raw = json!([{"results": [], "credits": 2}, null]);
        let batch = process(&raw, &SearchQuery::from(["one", "two"]), WEB).into_batch().unwrap();
        assert_eq!(batch[0].query, "one");
        assert_eq!(batch[0].credits_used, 2);
        assert_eq!(batch[1], SearchResponse::empty("two", WEB));
    }

    #[test]
    fn test_image_fields_are_remapped() {
        let item = json!({
            "search_info": {"total_results": 12, "search_time": 0.3},
            "results": [{
                "title": "Puppy",
                "imageUrl": "https://img.example.com/puppy.jpg",
                "thumbnailUrl": "https://img.example.com/puppy_t.jpg",
                "source": "example.com",
                "link": "https://example.com/puppies",
                "imageWidth": 800,
                "imageHeight": 600,
                "position": 1
            }, {
                "title": "Sparse"
            }],
            "search_params": {"type": "image", "q": "puppy"},
            "credits": 2
        });
        let r = parse_one(Some(&item), "fallback", WEB);
        assert_eq!(r.total_results, "12");
        assert_eq!(r.search_time, "0.3");
        let images = r.results.images().unwrap();
        assert_eq!(images[0].link, "https://img.example.com/puppy.jpg");
        assert_eq!(images[0].source_link, "https://example.com/puppies");
        assert_eq!(images[0].thumbnail, "https://img.example.com/puppy_t.jpg");
        assert_eq!((images[0].width, images[0].height), (800, 600));
        assert_eq!(images[1].link, "");
        assert_eq!(images[1].width, 0);
        assert!(r.results.organic().is_none());
    }

    #[test]
    fn test_malformed_item_yields_empty_response() {
        let r = parse_one(Some(&json!("garbage")), "q", WEB);
        assert_eq!(r, SearchResponse::empty("q", WEB));

        let r = parse_one(Some(&json!({"results": "not-a-list"})), "q", WEB);
        assert!(r.results.is_empty());
        assert_eq!(r.query, "q");
    }

    #[test]
    fn test_image_padding_stays_image_shaped() {
        let item = json!({
            "search_params": {"type": "image", "q": "a"},
            "results": [{"title": "A", "imageUrl": "https://img/a.png"}],
            "credits": 2
        });
        let batch = process_batch(&json!([item]), &["a".to_string(), "b".to_string()], IMAGE);
        assert_eq!(batch[0].results.images().map(<[_]>::len), Some(1));
        assert_eq!(batch[1].results.images().map(<[_]>::len), Some(0));
        assert_eq!(batch[1], SearchResponse::empty("b", IMAGE));

        for raw in [Value::Null, json!([])] {
            let r = process_single(&raw, "x", IMAGE);
            assert!(r.results.images().is_some());
            assert!(r.results.organic().is_none());
        }
    }

    #[test]
    fn test_missing_type_echo_uses_requested_kind() {
        let item = json!({"results": [{"imageUrl": "https://img/1.png", "link": "https://page"}]});
        let r = parse_one(Some(&item), "q", IMAGE);
        let images = r.results.images().unwrap();
        assert_eq!(images[0].link, "https://img/1.png");
        assert_eq!(images[0].source_link, "https://page");

        // an explicit echo wins over the requested kind
        let item = json!({"search_params": {"type": "search"}, "results": []});
        assert!(parse_one(Some(&item), "q", IMAGE).results.organic().is_some());
    }

    #[test]
    fn test_credits_accept_strings_and_floats() {
        for (credits, expected) in [
            (json!(3), 3),
            (json!("2"), 2),
            (json!(2.0), 2),
            (json!(" 4 "), 4),
            (json!("1.0"), 1),
            (json!(-1), 0),
            (json!("n/a"), 0),
            (Value::Null, 0),
        ] {
            let item = json!({"results": [], "credits": credits});
            assert_eq!(parse_one(Some(&item), "q", WEB).credits_used, expected, "{credits}");
        }
    }
}
