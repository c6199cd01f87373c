use serde_json::{json, Value};

use crate::scraper::{PageFetcher, ScraperError};

/// Serves the same canned HTML for every request.
pub struct FixtureFetcher {
    pub html: String,
}

impl PageFetcher for FixtureFetcher {
    fn fetch_page(&self, _url: &str, _language: &str) -> Result<String, ScraperError> {
        Ok(self.html.clone())
    }
}

/// Always fails, for exercising the log-and-continue path.
pub struct FailingFetcher;

impl PageFetcher for FailingFetcher {
    fn fetch_page(&self, url: &str, _language: &str) -> Result<String, ScraperError> {
        Err(ScraperError::Status {
            status: 403,
            url: url.to_string(),
        })
    }
}

/// Wrap raw listing objects in the full nested state shape the extractor
/// walks: props → pageProps → searchPageState → cat1 → searchResults →
/// listResults.
pub fn search_state(listings: Value) -> Value {
    json!({
        "props": {
            "pageProps": {
                "searchPageState": {
                    "cat1": {
                        "searchResults": {
                            "listResults": listings
                        }
                    }
                }
            }
        }
    })
}

/// A page carrying the state in the well-known script element.
pub fn next_data_page(state: &Value) -> String {
    format!(
        "<html><head>\
         <script id=\"__NEXT_DATA__\" type=\"application/json\">{state}</script>\
         </head><body><div>Search results</div></body></html>"
    )
}

/// A page with the state in an anonymous script, so only the flattened
/// text scan can find it.
pub fn anonymous_script_page(state: &Value) -> String {
    format!(
        "<html><head><script>{state}</script></head>\
         <body><div>Search results</div></body></html>"
    )
}

/// Three listings covering the common field locations.
pub fn sample_listings() -> Value {
    json!([
        {
            "zpid": 11111,
            "statusType": "FOR_RENT",
            "statusText": "Apartment for rent",
            "imgSrc": "https://photos.example.com/11111-main.jpg",
            "detailUrl": "https://www.zillow.com/apartments/austin-tx/one/",
            "address": {
                "streetAddress": "101 Congress Ave",
                "city": "Austin",
                "state": "TX",
                "zipcode": "78701"
            },
            "latLong": { "latitude": 30.2672, "longitude": -97.7431 },
            "units": [],
            "unformattedPrice": 1850,
            "unitTypes": "1 bd apartment",
            "isFeaturedListing": true,
            "badgeText": "New"
        },
        {
            "zpid": "22222",
            "statusType": "FOR_RENT",
            "detailUrlPath": "/apartments/austin-tx/two/",
            "addressStreet": "202 Rainey St",
            "addressCity": "Austin",
            "addressState": "TX",
            "addressZipcode": "78701",
            "hdpData": {
                "homeInfo": {
                    "latitude": 30.259,
                    "longitude": -97.738,
                    "price": 2400
                }
            },
            "unitTypes": "2 bd apartment"
        },
        {
            "hdpData": {
                "homeInfo": {
                    "zpid": 33333,
                    "homeStatus": "FOR_RENT",
                    "detailUrl": "/homedetails/three/",
                    "buildingName": "The Grove"
                }
            },
            "bedsBaths": "3 bd | 2 ba"
        }
    ])
}
