use quick_xml::events::Event;
use quick_xml::Reader;

/// Date text of one item or entry, exactly as published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDates {
    pub published: Option<String>,
    pub updated: Option<String>,
    pub created: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateKind {
    Published,
    Updated,
    Created,
}

impl DateKind {
    /// Classify a child element of an item/entry by its local name.
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"pubDate" | b"published" | b"issued" => Some(DateKind::Published),
            // dc:date and dcterms:modified describe the last change
            b"updated" | b"modified" | b"date" => Some(DateKind::Updated),
            b"created" => Some(DateKind::Created),
            _ => None,
        }
    }
}

impl RawDates {
    fn set(&mut self, kind: DateKind, value: String) {
        let slot = match kind {
            DateKind::Published => &mut self.published,
            DateKind::Updated => &mut self.updated,
            DateKind::Created => &mut self.created,
        };
        // First occurrence wins
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

/// Collect the raw date fields of every RSS `<item>` / Atom `<entry>` in
/// document order.
///
/// Only direct children of an item are read, so dates nested in elements
/// such as an Atom `<source>` are ignored. Extraction stops at the first
/// XML error; callers compare the count with their own entry list.
pub fn extract_entry_dates(bytes: &[u8]) -> Vec<RawDates> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut depth: usize = 0;
    let mut entry_depth: Option<usize> = None;
    let mut current = RawDates::default();
    let mut capture: Option<DateKind> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                let local = e.local_name();
                match entry_depth {
                    None if is_entry(local.as_ref()) => {
                        entry_depth = Some(depth);
                        current = RawDates::default();
                    }
                    Some(d) if depth == d + 1 => {
                        capture = DateKind::from_local_name(local.as_ref());
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                if entry_depth.is_none() && is_entry(e.local_name().as_ref()) {
                    entries.push(RawDates::default());
                }
            }
            Ok(Event::Text(e)) if capture.is_some() => {
                let value = e
                    .unescape()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                text.push_str(&value);
            }
            Ok(Event::CData(e)) if capture.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::End(_)) => {
                if let Some(d) = entry_depth {
                    if depth == d + 1 {
                        if let Some(kind) = capture.take() {
                            let value = text.trim();
                            if !value.is_empty() {
                                current.set(kind, value.to_string());
                            }
                        }
                    } else if depth == d {
                        entries.push(std::mem::take(&mut current));
                        entry_depth = None;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Stopped reading raw entry dates");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    entries
}

fn is_entry(local_name: &[u8]) -> bool {
    matches!(local_name, b"item" | b"entry")
}
