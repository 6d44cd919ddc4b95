//! SQLite article index: one row per article, written inside a long-running
//! transaction that the caller commits at its own cadence.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::dump::LineSource;
use crate::error::Result;
use crate::extractor::Extractor;

/// The fields an article contributes to the index, all lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDoc {
    /// Title with `_` between words, used as identifier.
    pub title: String,
    /// Title with spaces between words.
    pub tokenized_title: String,
    pub categories: String,
    pub links: String,
    /// Cleaned abstract.
    pub contents: String,
}

impl ArticleDoc {
    /// Build the document for the current page. The title is extracted once
    /// and rendered twice from the cache; the caller's title separator is
    /// restored afterwards.
    pub fn from_extractor<S: LineSource>(ex: &mut Extractor<S>) -> Self {
        let saved = ex.separators().title.clone();

        ex.set_title_separator("_");
        let title = ex.title().to_lowercase();
        ex.set_title_separator(" ");
        let tokenized_title = ex.cached_title().to_lowercase();
        ex.set_title_separator(saved);

        ArticleDoc {
            title,
            tokenized_title,
            categories: ex.categories().to_lowercase(),
            links: ex.links().to_lowercase(),
            contents: ex.abstract_text().to_lowercase(),
        }
    }
}

pub struct IndexWriter {
    conn: Connection,
    added: i64,
}

impl IndexWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        init_schema(&conn)?;
        conn.execute_batch("BEGIN")?;
        Ok(IndexWriter { conn, added: 0 })
    }

    /// Store `doc` under the next sequence id (1, 2, ...) and return the id.
    /// Ids restart at 1 for every writer, so reindexing into the same file
    /// replaces rows in place.
    pub fn add_document(&mut self, doc: &ArticleDoc) -> Result<i64> {
        let id = self.added + 1;
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR REPLACE INTO articles (id, title, tokenized_title, categories, links, contents)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        stmt.execute(rusqlite::params![
            id,
            doc.title,
            doc.tokenized_title,
            doc.categories,
            doc.links,
            doc.contents,
        ])?;
        self.added = id;
        Ok(id)
    }

    pub fn added(&self) -> i64 {
        self.added
    }

    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT; BEGIN")?;
        debug!(added = self.added, "index committed");
        Ok(())
    }

    /// Commit the tail and hand back the connection for reading.
    pub fn close(self) -> Result<Connection> {
        self.conn.execute_batch("COMMIT")?;
        Ok(self.conn)
    }
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS articles (
            id              INTEGER PRIMARY KEY,
            title           TEXT NOT NULL,
            tokenized_title TEXT NOT NULL,
            categories      TEXT,
            links           TEXT,
            contents        TEXT,
            indexed_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_articles_title ON articles(title);
        ",
    )?;
    Ok(())
}

pub fn count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?)
}

pub fn find_by_title(conn: &Connection, title: &str) -> Result<Option<(i64, ArticleDoc)>> {
    let row = conn
        .query_row(
            "SELECT id, title, tokenized_title, categories, links, contents
             FROM articles WHERE title = ?1 ORDER BY id LIMIT 1",
            [title],
            |row| {
                Ok((
                    row.get(0)?,
                    ArticleDoc {
                        title: row.get(1)?,
                        tokenized_title: row.get(2)?,
                        categories: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        links: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        contents: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    },
                ))
            },
        )
        .optional()?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn doc(title: &str) -> ArticleDoc {
        ArticleDoc {
            title: title.to_string(),
            tokenized_title: title.replace('_', " "),
            categories: "poets".into(),
            links: "paris".into(),
            contents: "some words".into(),
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut w = IndexWriter::open_in_memory().unwrap();
        assert_eq!(w.add_document(&doc("a")).unwrap(), 1);
        assert_eq!(w.add_document(&doc("b")).unwrap(), 2);
        w.commit().unwrap();
        assert_eq!(w.add_document(&doc("c")).unwrap(), 3);
        let conn = w.close().unwrap();
        assert_eq!(count(&conn).unwrap(), 3);
    }

    #[test]
    fn lookup_by_title() {
        let mut w = IndexWriter::open_in_memory().unwrap();
        w.add_document(&doc("victor_hugo")).unwrap();
        let conn = w.close().unwrap();
        let (id, found) = find_by_title(&conn, "victor_hugo").unwrap().unwrap();
        assert_eq!(id, 1);
        assert_eq!(found.tokenized_title, "victor hugo");
        assert!(find_by_title(&conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn doc_from_extractor() {
        let dump = "<page>\n<title>Victor Hugo</title>\n<text xml:space=\"preserve\">'''Victor Hugo''' was a [[France|French]] [[Poet|poet]]. == Life ==</text>\n[[Category:French poets]]\n</page>\n";
        let mut ex = Extractor::from_reader(Cursor::new(dump.as_bytes()));
        assert!(ex.advance());
        ex.set_title_separator("-");
        let d = ArticleDoc::from_extractor(&mut ex);
        assert_eq!(d.title, "victor_hugo");
        assert_eq!(d.tokenized_title, "victor hugo");
        assert_eq!(d.categories, "french_poets");
        assert_eq!(d.links, "france poet");
        assert_eq!(d.contents.split_whitespace().collect::<Vec<_>>(), ["victor", "hugo", "was", "a", "french", "poet"]);
        assert_eq!(ex.separators().title, "-");
    }
}
