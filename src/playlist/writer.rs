//! Playlist rendering and persistence
//!
//! Renders the full playlist in one in-order pass over the channel
//! list, then persists it as a separate step so a storage failure on
//! one server never affects another server's run.

use std::path::Path;

use crate::error::{Result, XtreamError};
use crate::playlist::encode::{encode_entry, Dialect};
use crate::playlist::name::{DedupFilter, NameNormalizer};
use crate::portal::ChannelRecord;

/// Finished playlist content plus the number of written entries
#[derive(Debug)]
pub struct RenderedPlaylist {
    pub content: String,
    /// Two-line entries actually written, not names merely accepted
    pub entries: usize,
}

/// Render the playlist for one server's channel list.
///
/// Input order is preserved; the first record carrying a given cleaned
/// name wins. A name accepted for a record without a stream identifier
/// stays marked seen, so a later record under the same name cannot
/// reintroduce it with a different id.
pub fn render_playlist(
    records: &[ChannelRecord],
    dialect: Dialect,
    playlist_base_url: &str,
    clean_names: bool,
) -> RenderedPlaylist {
    let normalizer = NameNormalizer::new();
    let mut filter = DedupFilter::new();
    let mut content = String::new();
    let mut entries = 0;

    if dialect.emits_header() {
        content.push_str("#EXTM3U\n");
    }

    for record in records {
        let name = normalizer.normalize(&record.name, clean_names);
        if !filter.accept(&name) {
            continue;
        }
        if let Some(entry) = encode_entry(record, dialect, playlist_base_url, &name) {
            content.push_str(&entry.meta_line);
            content.push('\n');
            content.push_str(&entry.url_line);
            content.push('\n');
            entries += 1;
        }
    }

    RenderedPlaylist { content, entries }
}

/// Write the rendered playlist to `path`
pub fn persist_playlist(path: &Path, rendered: &RenderedPlaylist) -> Result<()> {
    std::fs::write(path, &rendered.content).map_err(|source| XtreamError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Widen the playlist's access mode to 0o777
#[cfg(unix)]
pub fn relax_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o777)).map_err(|source| {
        XtreamError::File {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
pub fn relax_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, stream_id: Option<u64>, archive: bool) -> ChannelRecord {
        ChannelRecord {
            name: name.to_string(),
            stream_id,
            tv_archive: archive,
            stream_icon: "http://x/logo.png".to_string(),
            category_name: "News".to_string(),
        }
    }

    #[test]
    fn test_duplicate_name_first_wins() {
        let records = vec![record("CNN", Some(1), false), record("CNN", Some(2), false)];
        let rendered = render_playlist(&records, Dialect::Plain, "http://h/u/p", false);

        assert_eq!(rendered.entries, 1);
        assert_eq!(
            rendered.content,
            "#EXTM3U\n#EXTINF:-1 ,CNN\nhttp://h/u/p/1\n"
        );
    }

    #[test]
    fn test_cleaned_catchup_extended() {
        let records = vec![record("^intl|007 Sports", Some(5), true)];
        let rendered = render_playlist(&records, Dialect::Extended, "http://h/u/p", true);

        assert_eq!(rendered.entries, 1);
        assert_eq!(
            rendered.content,
            "#EXTM3U\n\
             #EXTINF:-1 tvg-id=\"5\" tvg-logo=\"http://x/logo.png\" group-title=\"News\",Sports [Catch-up]\n\
             http://h/u/p/5\n"
        );
    }

    #[test]
    fn test_missing_stream_id_burns_the_name() {
        let records = vec![record("CNN", None, false), record("CNN", Some(9), false)];
        let rendered = render_playlist(&records, Dialect::Plain, "http://h/u/p", false);

        // First record is accepted but unplayable; the second is a duplicate.
        assert_eq!(rendered.entries, 0);
        assert_eq!(rendered.content, "#EXTM3U\n");
    }

    #[test]
    fn test_header_written_once() {
        let records = vec![record("A", Some(1), false), record("B", Some(2), false)];
        let rendered = render_playlist(&records, Dialect::Plain, "http://h/u/p", false);
        assert_eq!(rendered.content.matches("#EXTM3U").count(), 1);
        assert!(rendered.content.starts_with("#EXTM3U\n"));
    }

    #[test]
    fn test_placeholders_and_empties_dropped() {
        let records = vec![
            record("####", Some(1), false),
            record("-", Some(2), false),
            record("", Some(3), false),
            record("Real", Some(4), false),
        ];
        let rendered = render_playlist(&records, Dialect::Plain, "http://h/u/p", false);
        assert_eq!(rendered.entries, 1);
        assert!(rendered.content.contains(",Real\n"));
    }

    #[test]
    fn test_entry_count_bound() {
        let records = vec![
            record("A", Some(1), false),
            record("A", Some(2), false),
            record("B", None, false),
            record("C", Some(3), false),
        ];
        let rendered = render_playlist(&records, Dialect::Extended, "http://h/u/p", false);
        let playable_distinct = 2; // A (first) and C
        assert!(rendered.entries <= playable_distinct);
        assert_eq!(rendered.entries, 2);
    }

    #[test]
    fn test_persist_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlist_01.m3u");
        let rendered = render_playlist(
            &[record("CNN", Some(1), false)],
            Dialect::Plain,
            "http://h/u/p",
            false,
        );

        persist_playlist(&path, &rendered).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, rendered.content);
    }

    #[test]
    fn test_persist_to_bad_path_fails() {
        let rendered = RenderedPlaylist {
            content: "#EXTM3U\n".to_string(),
            entries: 0,
        };
        assert!(persist_playlist(Path::new("/nonexistent/dir/p.m3u"), &rendered).is_err());
    }
}
