use std::fmt::Display;
use std::io::{Cursor, Write};

use chrono::{DateTime, TimeZone};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::domain::{FeedDocument, NormalizedEntry};
use crate::errors::{AggregatorError, AggregatorResult};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// RFC 822 style timestamp as used by `pubDate` and `lastBuildDate`.
pub const RSS_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

pub fn format_rss_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format(RSS_DATE_FORMAT).to_string()
}

/// Render the document as indented RSS 2.0 XML.
pub fn render(document: &FeedDocument) -> AggregatorResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    rss.push_attribute(("xmlns:dc", DC_NS));
    write(&mut writer, Event::Start(rss))?;
    write(&mut writer, Event::Start(BytesStart::new("channel")))?;

    let channel = &document.channel;
    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    write_text_element(&mut writer, "language", &channel.language)?;
    write_text_element(
        &mut writer,
        "lastBuildDate",
        &format_rss_date(&document.built_at),
    )?;
    write_text_element(&mut writer, "generator", &channel.generator)?;

    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", channel.self_link.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", "application/rss+xml"));
    write(&mut writer, Event::Empty(self_link))?;

    for entry in &document.items {
        write_item(&mut writer, entry)?;
    }

    write(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write(&mut writer, Event::End(BytesEnd::new("rss")))?;

    let mut out = writer.into_inner().into_inner();
    out.push(b'\n');
    Ok(out)
}

fn write_item<W: Write>(writer: &mut Writer<W>, entry: &NormalizedEntry) -> AggregatorResult<()> {
    write(writer, Event::Start(BytesStart::new("item")))?;

    write_text_element(writer, "title", &entry.title)?;
    write_text_element(writer, "link", &entry.link)?;
    write_text_element(writer, "description", &entry.description)?;
    write_text_element(writer, "pubDate", &format_rss_date(&entry.date))?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    write_element(writer, guid, &entry.link)?;

    if !entry.author.is_empty() {
        write_text_element(writer, "dc:creator", &entry.author)?;
    }

    if !entry.source.is_empty() {
        let mut source = BytesStart::new("source");
        source.push_attribute(("url", entry.source.as_str()));
        write_element(writer, source, &entry.source_name)?;
    }

    for category in &entry.categories {
        write_text_element(writer, "category", category)?;
    }

    write(writer, Event::End(BytesEnd::new("item")))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> AggregatorResult<()> {
    write_element(writer, BytesStart::new(name), text)
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> AggregatorResult<()> {
    let end = start.to_end().into_owned();
    write(writer, Event::Start(start))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(end))
}

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> AggregatorResult<()> {
    writer
        .write_event(event)
        .map_err(|e| AggregatorError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelMetadata;
    use crate::normalize::sanitize;
    use crate::sources::dates::extract_entry_dates;
    use chrono::{FixedOffset, Utc};

    fn entry(title: &str, date: DateTime<FixedOffset>) -> NormalizedEntry {
        NormalizedEntry {
            title: title.to_string(),
            link: format!("https://news.example/{}", title.to_lowercase().replace(' ', "-")),
            description: format!("About {}", title),
            date,
            author: String::new(),
            source: "https://news.example/feed".to_string(),
            source_name: "Example News".to_string(),
            categories: Vec::new(),
        }
    }

    fn document(items: Vec<NormalizedEntry>) -> FeedDocument {
        FeedDocument::new(ChannelMetadata::default(), items)
            .with_built_at(Utc.with_ymd_and_hms(2024, 2, 1, 6, 30, 0).unwrap())
    }

    fn render_string(items: Vec<NormalizedEntry>) -> String {
        String::from_utf8(render(&document(items)).unwrap()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().fixed_offset()
    }

    #[test]
    fn test_format_rss_date_uses_entry_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = offset.with_ymd_and_hms(2023, 12, 28, 10, 30, 0).unwrap();

        assert_eq!(format_rss_date(&date), "Thu, 28 Dec 2023 10:30:00 +0200");
    }

    #[test]
    fn test_channel_metadata_written() {
        let xml = render_string(Vec::new());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains(
            r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:dc="http://purl.org/dc/elements/1.1/">"#
        ));
        assert!(xml.contains("<language>de</language>"));
        assert!(xml.contains("<lastBuildDate>Thu, 01 Feb 2024 06:30:00 +0000</lastBuildDate>"));
        assert!(xml.contains("<generator>RSS-Aggregator Script</generator>"));
        assert!(xml.contains(r#"rel="self""#));
        assert!(xml.contains(r#"type="application/rss+xml""#));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_output_indented_two_spaces() {
        let xml = render_string(vec![entry("Indented", date(2024, 1, 1, 0))]);

        assert!(xml.contains("\n  <channel>"));
        assert!(xml.contains("\n    <title>"));
        assert!(xml.contains("\n      <title>Indented</title>"));
    }

    #[test]
    fn test_item_fields_written() {
        let mut item = entry("Ransomware Wave", date(2024, 1, 9, 22));
        item.categories = vec!["Malware".to_string(), "Ransomware".to_string()];
        let xml = render_string(vec![item]);

        assert!(xml.contains("<title>Ransomware Wave</title>"));
        assert!(xml.contains("<link>https://news.example/ransomware-wave</link>"));
        assert!(xml.contains("<pubDate>Tue, 09 Jan 2024 22:00:00 +0000</pubDate>"));
        assert!(xml.contains(
            r#"<guid isPermaLink="true">https://news.example/ransomware-wave</guid>"#
        ));
        assert!(xml.contains(
            r#"<source url="https://news.example/feed">Example News</source>"#
        ));
        assert!(xml.contains("<category>Malware</category>"));
        assert!(xml.contains("<category>Ransomware</category>"));
    }

    #[test]
    fn test_creator_only_when_author_present() {
        let anonymous = entry("Anonymous", date(2024, 1, 2, 0));
        let mut signed = entry("Signed", date(2024, 1, 1, 0));
        signed.author = "Jane Doe".to_string();

        let xml = render_string(vec![anonymous]);
        assert_eq!(xml.matches("<dc:creator>").count(), 0);

        let xml = render_string(vec![signed]);
        assert_eq!(xml.matches("<dc:creator>Jane Doe</dc:creator>").count(), 1);
    }

    #[test]
    fn test_source_omitted_without_url() {
        let mut item = entry("Orphan", date(2024, 1, 1, 0));
        item.source = String::new();

        let xml = render_string(vec![item]);

        assert!(!xml.contains("<source"));
    }

    #[test]
    fn test_sanitized_text_escaped_again_on_write() {
        let item = entry("Q&amp;A", date(2024, 1, 1, 0));

        let xml = render_string(vec![item]);

        assert!(xml.contains("<title>Q&amp;amp;A</title>"));
    }

    #[test]
    fn test_round_trip_through_feed_parser() {
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let mut special = entry("special", date(2024, 3, 2, 18));
        special.title = sanitize(Some(r#"AT&T <b>"x"</b> isn't"#));
        special.link = "https://news.example/at-t?a=1&b=2".to_string();

        let items = vec![
            entry("Zero Day Exploited", date(2024, 3, 3, 12)),
            special,
            entry("Privacy Fine Issued", plus_one.with_ymd_and_hms(2024, 3, 2, 9, 15, 0).unwrap()),
            entry("Policy Update", date(2024, 3, 1, 0)),
        ];

        let bytes = render(&document(items.clone())).unwrap();
        let parsed = feed_rs::parser::parse(&bytes[..]).unwrap();
        let pub_dates = extract_entry_dates(&bytes);

        assert_eq!(parsed.entries.len(), items.len());
        assert_eq!(pub_dates.len(), items.len());
        for ((item, dates), original) in parsed.entries.iter().zip(&pub_dates).zip(&items) {
            assert_eq!(item.title.as_ref().map(|t| t.content.as_str()), Some(original.title.as_str()));
            assert_eq!(item.links.first().map(|l| l.href.as_str()), Some(original.link.as_str()));
            assert_eq!(item.published, Some(original.date.with_timezone(&Utc)));
            assert_eq!(dates.published, Some(format_rss_date(&original.date)));
        }

        assert_eq!(
            parsed.entries[1].title.as_ref().map(|t| t.content.as_str()),
            Some("AT&amp;T &lt;b&gt;&quot;x&quot;&lt;/b&gt; isn&apos;t")
        );
        assert_eq!(
            pub_dates[2].published.as_deref(),
            Some("Sat, 02 Mar 2024 09:15:00 +0100")
        );
    }
}
