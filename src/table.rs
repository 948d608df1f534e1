use crate::error::{StorageError, StorageResult};
use crate::models::Word;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tempfile::NamedTempFile;

/// Header names of the front and back columns of a word table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    pub front: String,
    pub back: String,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            front: "Urdu".to_string(),
            back: "English".to_string(),
        }
    }
}

pub fn load_words(path: &Path, columns: &TableColumns) -> StorageResult<Vec<Word>> {
    let file = fs::File::open(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_words(file, path, columns)
}

/// Parses a word table. Columns are matched by header name, so extra columns
/// and any column order are accepted. Rows with a blank front or back are skipped.
pub fn parse_words<R: Read>(
    reader: R,
    path: &Path,
    columns: &TableColumns,
) -> StorageResult<Vec<Word>> {
    let read_err = |source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(read_err)?.clone();
    let front_idx = column_index(&headers, &columns.front).ok_or_else(|| {
        StorageError::MissingColumn {
            path: path.to_path_buf(),
            column: columns.front.clone(),
        }
    })?;
    let back_idx = column_index(&headers, &columns.back).ok_or_else(|| {
        StorageError::MissingColumn {
            path: path.to_path_buf(),
            column: columns.back.clone(),
        }
    })?;

    let mut words = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let (Some(front), Some(back)) = (record.get(front_idx), record.get(back_idx)) else {
            return Err(StorageError::MalformedRow {
                path: path.to_path_buf(),
                line,
            });
        };

        let (front, back) = (front.trim(), back.trim());
        if front.is_empty() || back.is_empty() {
            tracing::warn!(path = %path.display(), line, "skipping row with a blank field");
            continue;
        }
        words.push(Word::new(front, back));
    }

    Ok(words)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}').trim() == name)
}

/// Writes the table through a temp file in the same directory, then renames
/// it over `path`, so a failed write never truncates the previous table.
pub fn save_words(path: &Path, columns: &TableColumns, words: &[Word]) -> StorageResult<()> {
    let io_err = |source: io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err)?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(io_err)?;
    {
        let mut writer = WriterBuilder::new().from_writer(temp_file.as_file_mut());
        writer
            .write_record([columns.front.as_str(), columns.back.as_str()])
            .map_err(write_err)?;
        for word in words {
            writer
                .write_record([word.front.as_str(), word.back.as_str()])
                .map_err(write_err)?;
        }
        writer.flush().map_err(io_err)?;
    }

    temp_file.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(content: &str) -> StorageResult<Vec<Word>> {
        parse_words(
            content.as_bytes(),
            &PathBuf::from("words.csv"),
            &TableColumns::default(),
        )
    }

    #[test]
    fn test_parse_simple_table() {
        let words = parse("Urdu,English\nسلام,Hello\nپانی,Water\n").unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], Word::new("سلام", "Hello"));
        assert_eq!(words[1], Word::new("پانی", "Water"));
    }

    #[test]
    fn test_parse_columns_by_name() {
        let words = parse("English,Notes,Urdu\nThank you,polite,شکریہ\n").unwrap();
        assert_eq!(words, vec![Word::new("شکریہ", "Thank you")]);
    }

    #[test]
    fn test_parse_quoted_fields_with_commas() {
        let words = parse("Urdu,English\n\"کتاب\",\"Book, volume\"\n").unwrap();
        assert_eq!(words[0].back, "Book, volume");
    }

    #[test]
    fn test_parse_escaped_quotes() {
        let words = parse("Urdu,English\nہاں,\"\"\"yes\"\"\"\n").unwrap();
        assert_eq!(words[0].back, "\"yes\"");
    }

    #[test]
    fn test_parse_header_with_bom() {
        let words = parse("\u{feff}Urdu,English\nدل,Heart\n").unwrap();
        assert_eq!(words, vec![Word::new("دل", "Heart")]);
    }

    #[test]
    fn test_parse_skips_blank_fields() {
        let words = parse("Urdu,English\nدل,Heart\n,Water\nپانی,  \n").unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].front, "دل");
    }

    #[test]
    fn test_parse_missing_column() {
        let err = parse("Front,Back\na,b\n").unwrap_err();
        match err {
            StorageError::MissingColumn { column, .. } => assert_eq!(column, "Urdu"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_short_row_is_malformed() {
        let err = parse("Urdu,English\nدل,Heart\nپانی\n").unwrap_err();
        match err {
            StorageError::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_empty_input_has_no_columns() {
        assert!(matches!(
            parse(""),
            Err(StorageError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_parse_custom_columns() {
        let columns = TableColumns {
            front: "word".to_string(),
            back: "meaning".to_string(),
        };
        let words = parse_words(
            "word,meaning\nچاند,Moon\n".as_bytes(),
            &PathBuf::from("custom.csv"),
            &columns,
        )
        .unwrap();
        assert_eq!(words, vec![Word::new("چاند", "Moon")]);
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("words_to_learn.csv");
        let columns = TableColumns::default();
        let words = vec![Word::new("سلام", "Hello"), Word::new("کتاب", "Book, volume")];

        save_words(&path, &columns, &words).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Urdu,English\n"));
        assert_eq!(load_words(&path, &columns).unwrap(), words);
    }

    #[test]
    fn test_save_empty_deck_writes_header_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("words_to_learn.csv");

        save_words(&path, &TableColumns::default(), &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Urdu,English\n");
        assert!(load_words(&path, &TableColumns::default()).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_words(&temp_dir.path().join("absent.csv"), &TableColumns::default())
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
