use opml::{Outline, OPML};

use crate::errors::{AggregatorError, AggregatorResult};

/// Read feed URLs from OPML content, flattening nested outlines.
///
/// Repeated URLs are kept once, in first-seen order.
pub fn import_opml(content: &str) -> AggregatorResult<Vec<String>> {
    let opml = OPML::from_str(content).map_err(|e| AggregatorError::OpmlParse(e.to_string()))?;

    let mut urls: Vec<String> = Vec::new();
    for url in extract_feed_urls(&opml.body.outlines) {
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    Ok(urls)
}

/// Recursively extract feed URLs from OPML outlines
fn extract_feed_urls(outlines: &[Outline]) -> Vec<String> {
    let mut urls = Vec::new();

    for outline in outlines {
        if let Some(url) = &outline.xml_url {
            let url = url.trim();
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }

        urls.extend(extract_feed_urls(&outline.outlines));
    }

    urls
}

/// Export the source list to OPML format
pub fn export_opml(sources: &[String]) -> AggregatorResult<String> {
    let mut opml = OPML::default();
    opml.head = Some(opml::Head {
        title: Some("Aggregator Sources".to_string()),
        ..Default::default()
    });

    for source in sources {
        let outline = Outline {
            text: source.clone(),
            r#type: Some("rss".to_string()),
            xml_url: Some(source.clone()),
            ..Default::default()
        };
        opml.body.outlines.push(outline);
    }

    opml.to_string()
        .map_err(|e| AggregatorError::OpmlParse(e.to_string()))
}
