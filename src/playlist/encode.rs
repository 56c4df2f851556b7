//! EXTINF entry encoding
//!
//! Turns one channel record into the metadata/URL line pair for the
//! selected output dialect.

use crate::portal::ChannelRecord;

/// Supported playlist output variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Bare `.m3u`: header plus name-only entries
    Plain,
    /// `.m3u8`: entries carry tvg-id/tvg-logo/group-title attributes
    Extended,
    /// `.m3u8_plus`: same attribute set, distinct file extension
    ExtendedPlus,
}

impl Dialect {
    /// File extension for generated playlists
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::Plain => ".m3u",
            Dialect::Extended => ".m3u8",
            Dialect::ExtendedPlus => ".m3u8_plus",
        }
    }

    /// Upper-case tag for log lines
    pub fn label(&self) -> &'static str {
        match self {
            Dialect::Plain => "M3U",
            Dialect::Extended => "M3U8",
            Dialect::ExtendedPlus => "M3U8_PLUS",
        }
    }

    /// Whether a `#EXTM3U` header line opens the file
    pub fn emits_header(&self) -> bool {
        true
    }

    /// Whether per-entry tvg attributes are attached
    pub fn extended_attributes(&self) -> bool {
        !matches!(self, Dialect::Plain)
    }
}

/// A single playlist entry: metadata line plus stream URL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEntry {
    pub meta_line: String,
    pub url_line: String,
}

/// Encode one record, or `None` when it has no stream identifier.
///
/// `display_name` is the already-normalized name used for
/// deduplication; the ` [Catch-up]` suffix is attached here so it never
/// influences the dedup key. Attribute values are inserted verbatim —
/// the portal's own quoting is passed through unmodified.
pub fn encode_entry(
    record: &ChannelRecord,
    dialect: Dialect,
    playlist_base_url: &str,
    display_name: &str,
) -> Option<EmittedEntry> {
    let stream_id = record.stream_id?;

    let mut label = display_name.to_string();
    if record.tv_archive {
        label.push_str(" [Catch-up]");
    }

    let mut attributes = Vec::new();
    if dialect.extended_attributes() {
        attributes.push(format!("tvg-id=\"{}\"", stream_id));
        attributes.push(format!("tvg-logo=\"{}\"", record.stream_icon));
        attributes.push(format!("group-title=\"{}\"", record.category_name));
    }

    Some(EmittedEntry {
        meta_line: format!("#EXTINF:-1 {},{}", attributes.join(" "), label),
        url_line: format!("{}/{}", playlist_base_url, stream_id),
    })
}
