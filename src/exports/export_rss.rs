use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::exports::export_xml::escape_xml;
use crate::exports::RunMetadata;
use crate::scraper::PropertyListing;

const CHANNEL_LINK: &str = "https://www.zillow.com";

/// RSS 2.0 feed, one `<item>` per listing. The build date is the run's
/// generation timestamp rendered in RFC-822 form; every interpolated
/// value is escaped even inside the CDATA description.
pub fn export_rss(records: &[PropertyListing], metadata: &RunMetadata) -> Vec<u8> {
    let pub_date = rfc822(&metadata.generated_at);
    let title = escape_xml(&format!(
        "Zillow Listings Export ({} results)",
        metadata.record_count
    ));

    let mut items = String::new();
    for record in records {
        let detail_url = escape_xml(record.detail_url.as_deref().unwrap_or(""));
        let status = escape_xml(
            record
                .status_text
                .as_deref()
                .or(record.status_type.as_deref())
                .unwrap_or("Listing"),
        );
        let address = escape_xml(record.address.as_deref().unwrap_or(""));
        let guid = match record.zpid.as_deref() {
            Some(zpid) => escape_xml(zpid),
            None => detail_url.clone(),
        };
        let price = escape_xml(record.min_price.as_deref().unwrap_or(""));

        let _ = write!(
            items,
            r#"    <item>
      <title>{status} - {address}</title>
      <link>{detail_url}</link>
      <guid isPermaLink="false">{guid}</guid>
      <pubDate>{pub_date}</pubDate>
      <description><![CDATA[Status: {status}<br/>Address: {address}<br/>Price: {price}]]></description>
    </item>
"#
        );
    }

    let feed = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>{title}</title>
    <description>Zillow search results export.</description>
    <link>{CHANNEL_LINK}</link>
    <lastBuildDate>{pub_date}</lastBuildDate>
{items}  </channel>
</rss>
"#
    );

    feed.into_bytes()
}

/// RFC-822 form of the metadata timestamp; falls back to the current
/// time if the stored value does not parse.
fn rfc822(generated_at: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(generated_at)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    parsed.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}
