// extract.rs
//
// Locates the JSON state embedded in a search-results page and normalizes
// the raw listing objects found inside it. Nothing in here returns an
// error: a page whose state is missing, unparseable, or shaped wrong
// degrades to an empty record list with a warning, because one bad page
// must never abort a multi-city batch.

use std::collections::HashSet;

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};

use crate::scraper::models::PropertyListing;

/// Start-of-candidate marker for the fallback text scan.
const STATE_MARKER: &str = "{\"props\"";

// Candidate lookup paths per output field, evaluated in order; the first
// path resolving to a non-null value wins. This table is the precedence
// contract, so changes here change which source field ends up exported.
const ZPID: &[&[&str]] = &[&["zpid"], &["hdpData", "homeInfo", "zpid"]];
const PROVIDER_LISTING_ID: &[&[&str]] = &[
    &["providerListingId"],
    &["hdpData", "homeInfo", "providerListingId"],
];
const STATUS_TYPE: &[&[&str]] = &[&["statusType"], &["hdpData", "homeInfo", "homeStatus"]];
const STATUS_TEXT: &[&[&str]] = &[&["statusText"], &["statusType"]];
const DETAIL_URL: &[&[&str]] = &[
    &["detailUrl"],
    &["detailUrlPath"],
    &["hdpData", "homeInfo", "detailUrl"],
];
const LATITUDE: &[&[&str]] = &[&["latLong", "latitude"], &["hdpData", "homeInfo", "latitude"]];
const LONGITUDE: &[&[&str]] = &[
    &["latLong", "longitude"],
    &["hdpData", "homeInfo", "longitude"],
];
const BUILDING_NAME: &[&[&str]] = &[
    &["buildingName"],
    &["hdpData", "homeInfo", "buildingName"],
    &["name"],
];
const CONTACT_PHONE_NUMBER: &[&[&str]] = &[&["contactPhoneNumber"]];
const MIN_PRICE: &[&[&str]] = &[
    &["unformattedPrice"],
    &["price"],
    &["hdpData", "homeInfo", "price"],
];
// maxPrice intentionally does not fall back to `price`: that would
// duplicate minPrice's chain and make the two bounds collapse into one.
const MAX_PRICE: &[&[&str]] = &[&["priceReduction"]];
const UNIT_TYPES: &[&[&str]] = &[&["unitTypes"], &["bedsBaths"], &["beds"]];
const TOTAL_UNITS: &[&[&str]] = &[&["totalUnits"], &["hdpData", "homeInfo", "totalUnits"]];
const BADGE_TEXT: &[&[&str]] = &[&["badgeText"], &["variableData", "text"]];

/// Parse one search-results page into normalized records.
///
/// Always returns a list; every degradation path is observable only
/// through the logs.
pub fn parse_search_results(html: &str) -> Vec<PropertyListing> {
    let Some(state) = extract_json_state(html) else {
        warn!("no JSON state found, returning empty result set");
        return Vec::new();
    };

    let Some(raws) = list_results(&state) else {
        warn!("unexpected JSON structure while extracting results");
        return Vec::new();
    };

    let results: Vec<PropertyListing> = raws.iter().map(normalize_listing).collect();
    debug!(count = results.len(), "parsed listings from HTML");
    results
}

/// Locate the page's JSON state. First match wins: the well-known script
/// element, then a balanced-object scan of the flattened document text.
fn extract_json_state(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);

    // Common pattern: <script id="__NEXT_DATA__" type="application/json">
    let selector = Selector::parse(r#"script[id="__NEXT_DATA__"][type="application/json"]"#).ok()?;
    if let Some(script) = document.select(&selector).next() {
        let json_text: String = script.text().collect();
        match serde_json::from_str(&json_text) {
            Ok(state) => return Some(state),
            Err(e) => debug!("failed to decode __NEXT_DATA__: {e}"),
        }
    }

    // Fallback: the state sometimes ships in an unlabeled script, so scan
    // the flattened text for a results-shaped object.
    let text: String = document.root_element().text().collect::<Vec<_>>().join(" ");
    find_embedded_state(&text)
}

/// Scan `text` for `{"props"` candidates. A candidate is accepted when its
/// balanced top-level object mentions the results payload and parses as
/// JSON; the first such candidate wins.
fn find_embedded_state(text: &str) -> Option<Value> {
    for (start, _) in text.match_indices(STATE_MARKER) {
        let candidate = &text[start..];
        let Some(end) = balanced_object_end(candidate) else {
            continue;
        };
        let bounded = &candidate[..end];
        if !bounded.contains("\"searchResults\"") {
            continue;
        }
        match serde_json::from_str(bounded) {
            Ok(state) => return Some(state),
            Err(e) => debug!("fallback JSON decode failed: {e}"),
        }
    }
    None
}

/// Byte index one past the `}` closing the object that opens at index 0.
///
/// Regex matching cannot guarantee balanced braces, and a bare `{`/`}`
/// counter miscounts braces inside quoted JSON strings, so this is a
/// small scanner: depth counter plus in-string and escape-pending flags.
fn balanced_object_end(s: &str) -> Option<usize> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escape_pending = false;

    for (i, ch) in s.char_indices() {
        if in_string {
            if escape_pending {
                escape_pending = false;
            } else if ch == '\\' {
                escape_pending = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Walk the fixed result path:
/// props → pageProps → (searchPageState | searchState) → cat1
/// → searchResults → listResults.
///
/// A missing `listResults` key is an empty page, not a shape error.
fn list_results(state: &Value) -> Option<&[Value]> {
    let props = state.get("props")?.get("pageProps")?;
    let search_state = props
        .get("searchPageState")
        .filter(|v| !v.is_null())
        .or_else(|| props.get("searchState"))?;
    let search_results = search_state.get("cat1")?.get("searchResults")?;

    Some(
        search_results
            .get("listResults")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
    )
}

fn normalize_listing(raw: &Value) -> PropertyListing {
    let addr = resolve_address(raw);

    PropertyListing {
        zpid: first_string(raw, ZPID),
        provider_listing_id: first_string(raw, PROVIDER_LISTING_ID),
        status_type: first_string(raw, STATUS_TYPE),
        status_text: first_string(raw, STATUS_TEXT),
        image_source: value_at(raw, &["imgSrc"]).and_then(coerce_string),
        detail_url: first_string(raw, DETAIL_URL),

        address: addr.composite,
        address_street: addr.street,
        address_city: addr.city,
        address_state: addr.state,
        address_zipcode: addr.zipcode,

        latitude: first_f64(raw, LATITUDE),
        longitude: first_f64(raw, LONGITUDE),

        building_name: first_string(raw, BUILDING_NAME),
        contact_phone_number: first_string(raw, CONTACT_PHONE_NUMBER),

        min_price: first_string(raw, MIN_PRICE),
        max_price: first_string(raw, MAX_PRICE),
        unit_types: first_string(raw, UNIT_TYPES),
        total_units: first_i64(raw, TOTAL_UNITS),

        photo_urls: extract_photos(raw),
        is_featured_listing: truthy(raw.get("isFeaturedListing")),
        badge_text: first_string(raw, BADGE_TEXT),
    }
}

struct ResolvedAddress {
    composite: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zipcode: Option<String>,
}

/// The structured `address` object wins over the flat top-level fields.
/// The composite joins only the components that resolved, in
/// street → city → state → zip order; all-null stays null.
fn resolve_address(raw: &Value) -> ResolvedAddress {
    let component = |nested: &str, flat: &str| {
        value_at(raw, &["address", nested])
            .or_else(|| value_at(raw, &[flat]))
            .and_then(coerce_string)
    };

    let street = component("streetAddress", "addressStreet");
    let city = component("city", "addressCity");
    let state = component("state", "addressState");
    let zipcode = component("zipcode", "addressZipcode");

    let parts: Vec<&str> = [&street, &city, &state, &zipcode]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .collect();
    let composite = if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    };

    ResolvedAddress {
        composite,
        street,
        city,
        state,
        zipcode,
    }
}

/// Merge photo URLs from every known location, `imgSrc` first, then the
/// top-level list, then the homeInfo list, then the homeInfo photo
/// objects. Deduplicated keeping first-seen order; non-string entries are
/// dropped silently.
fn extract_photos(raw: &Value) -> Vec<String> {
    let mut photos: Vec<String> = Vec::new();

    if let Some(img_src) = value_at(raw, &["imgSrc"]).and_then(Value::as_str) {
        photos.push(img_src.to_string());
    }

    push_string_items(&mut photos, value_at(raw, &["photoUrls"]));
    push_string_items(&mut photos, value_at(raw, &["hdpData", "homeInfo", "photoUrls"]));

    if let Some(photo_objects) =
        value_at(raw, &["hdpData", "homeInfo", "photos"]).and_then(Value::as_array)
    {
        for photo in photo_objects {
            if let Some(url) = photo.get("url").and_then(Value::as_str) {
                photos.push(url.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    photos.retain(|url| seen.insert(url.clone()));
    photos
}

fn push_string_items(photos: &mut Vec<String>, list: Option<&Value>) {
    if let Some(items) = list.and_then(Value::as_array) {
        photos.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
    }
}

/// Resolve a nested key path, treating JSON null the same as absent.
fn value_at<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = raw;
    for key in path {
        current = current.get(key)?;
    }
    (!current.is_null()).then_some(current)
}

fn first_value<'a>(raw: &'a Value, candidates: &[&[&str]]) -> Option<&'a Value> {
    candidates.iter().find_map(|path| value_at(raw, path))
}

/// Scalars only; source fields flip between strings and numbers across
/// site versions, so numbers and bools coerce to their display form.
fn coerce_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn first_string(raw: &Value, candidates: &[&[&str]]) -> Option<String> {
    first_value(raw, candidates).and_then(coerce_string)
}

fn first_f64(raw: &Value, candidates: &[&[&str]]) -> Option<f64> {
    first_value(raw, candidates).and_then(Value::as_f64)
}

fn first_i64(raw: &Value, candidates: &[&[&str]]) -> Option<i64> {
    first_value(raw, candidates).and_then(Value::as_i64)
}

/// Loose truthiness of the raw flag value; absence is false.
fn truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
