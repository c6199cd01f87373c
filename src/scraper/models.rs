use serde::Serialize;

// raw listing (embedded state)
//  ├── zpid
//  ├── statusType / statusText
//  ├── imgSrc
//  ├── detailUrl / detailUrlPath
//  ├── address
//  │    ├── streetAddress
//  │    ├── city
//  │    ├── state
//  │    └── zipcode
//  ├── latLong
//  │    ├── latitude
//  │    └── longitude
//  ├── variableData
//  │    └── text
//  └── hdpData
//       └── homeInfo
//            ├── zpid, homeStatus, price
//            ├── latitude, longitude
//            └── photoUrls / photos[].url
//
// Top-level keys and the hdpData.homeInfo mirror drift between site
// versions; every output field is therefore independently optional.

/// One normalized search-result listing. Field names match the export
/// schema, so the declaration order here is also the CSV column order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub zpid: Option<String>,
    pub provider_listing_id: Option<String>,
    pub status_type: Option<String>,
    pub status_text: Option<String>,
    pub image_source: Option<String>,
    pub detail_url: Option<String>,

    pub address: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zipcode: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub building_name: Option<String>,
    pub contact_phone_number: Option<String>,

    // Source pricing mixes numbers and display strings ("$1,200+/mo"),
    // so both bounds stay loosely typed. Not usable for comparison.
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub unit_types: Option<String>,
    pub total_units: Option<i64>,

    pub photo_urls: Vec<String>,
    pub is_featured_listing: bool,
    pub badge_text: Option<String>,
}
