//! Knowledge store for resort rooms and packages
//!
//! Read side feeds the prompt: every chat turn re-queries both collections
//! and renders them into plain-text blocks. Nothing is cached.

mod schema;

pub use schema::*;

use rusqlite::{params, Connection};
use std::fmt::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to read seed file: {0}")]
    SeedIo(#[from] std::io::Error),
    #[error("Invalid seed file: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Thread-safe knowledge store handle
#[derive(Clone)]
pub struct KnowledgeStore {
    conn: Arc<Mutex<Connection>>,
}

impl KnowledgeStore {
    /// Open or create the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> KnowledgeResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory store
    pub fn open_in_memory() -> KnowledgeResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> KnowledgeResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Reads ====================

    /// All rooms in storage order
    pub fn list_rooms(&self) -> KnowledgeResult<Vec<RoomRecord>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(r#"SELECT "type", description, price FROM rooms ORDER BY id"#)?;
        let rows = stmt.query_map([], |row| {
            Ok(RoomRecord {
                kind: row.get(0)?,
                description: row.get(1)?,
                price: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(KnowledgeError::from)
    }

    /// All packages in storage order
    pub fn list_packages(&self) -> KnowledgeResult<Vec<PackageRecord>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT name, details, price FROM packages ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(PackageRecord {
                name: row.get(0)?,
                details: row.get(1)?,
                price: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(KnowledgeError::from)
    }

    // ==================== Writes ====================

    #[allow(dead_code)] // Used in tests
    pub fn insert_room(&self, room: &RoomRecord) -> KnowledgeResult<()> {
        let conn = self.lock();
        conn.execute(
            r#"INSERT INTO rooms ("type", description, price) VALUES (?1, ?2, ?3)"#,
            params![room.kind, room.description, room.price],
        )?;
        Ok(())
    }

    #[allow(dead_code)] // Used in tests
    pub fn insert_package(&self, package: &PackageRecord) -> KnowledgeResult<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO packages (name, details, price) VALUES (?1, ?2, ?3)",
            params![package.name, package.details, package.price],
        )?;
        Ok(())
    }

    /// Load a JSON seed file into an empty store.
    ///
    /// A store that already holds any room or package is left untouched, so
    /// restarting with the same seed does not duplicate records. Returns the
    /// number of records inserted.
    pub fn seed_from_file<P: AsRef<Path>>(&self, path: P) -> KnowledgeResult<usize> {
        let raw = std::fs::read_to_string(path)?;
        let seed: KnowledgeSeed = serde_json::from_str(&raw)?;
        self.seed(&seed)
    }

    pub fn seed(&self, seed: &KnowledgeSeed) -> KnowledgeResult<usize> {
        let mut conn = self.lock();
        let existing: i64 = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM rooms) + (SELECT COUNT(*) FROM packages)",
            [],
            |row| row.get(0),
        )?;
        if existing > 0 {
            return Ok(0);
        }

        let tx = conn.transaction()?;
        for room in &seed.rooms {
            tx.execute(
                r#"INSERT INTO rooms ("type", description, price) VALUES (?1, ?2, ?3)"#,
                params![room.kind, room.description, room.price],
            )?;
        }
        for package in &seed.packages {
            tx.execute(
                "INSERT INTO packages (name, details, price) VALUES (?1, ?2, ?3)",
                params![package.name, package.details, package.price],
            )?;
        }
        tx.commit()?;

        Ok(seed.rooms.len() + seed.packages.len())
    }
}

// ==================== Rendering ====================

/// One line per room: `<type> - <description> for <currency><price>/night`
pub fn render_rooms(rooms: &[RoomRecord], currency: &str) -> String {
    let mut out = String::new();
    for (i, room) in rooms.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{} - {} for {currency}{}/night",
            room.kind, room.description, room.price
        );
    }
    out
}

/// One line per package: `<name>: <details> (<currency><price>)`
pub fn render_packages(packages: &[PackageRecord], currency: &str) -> String {
    let mut out = String::new();
    for (i, package) in packages.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{}: {} ({currency}{})",
            package.name, package.details, package.price
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_store_renders_empty_blocks() {
        let store = KnowledgeStore::open_in_memory().unwrap();
        assert!(store.list_rooms().unwrap().is_empty());
        assert!(store.list_packages().unwrap().is_empty());
        assert_eq!(render_rooms(&store.list_rooms().unwrap(), "₹"), "");
        assert_eq!(render_packages(&store.list_packages().unwrap(), "₹"), "");
    }

    #[test]
    fn test_rooms_keep_insertion_order() {
        let store = KnowledgeStore::open_in_memory().unwrap();
        store
            .insert_room(&RoomRecord::new("Suite", "Private pool", 12000.0))
            .unwrap();
        store
            .insert_room(&RoomRecord::new("Deluxe", "Sea view", 5000.0))
            .unwrap();

        let rooms = store.list_rooms().unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].kind, "Suite");
        assert_eq!(rooms[1].kind, "Deluxe");
        assert_eq!(
            render_rooms(&rooms, "₹"),
            "Suite - Private pool for ₹12000/night\nDeluxe - Sea view for ₹5000/night"
        );
    }

    #[test]
    fn test_render_packages() {
        let packages = vec![
            PackageRecord::new("Honeymoon", "2 nights with candlelight dinner", 15000.0),
            PackageRecord::new("Day Out", "Pool and lunch", 1499.5),
        ];
        assert_eq!(
            render_packages(&packages, "₹"),
            "Honeymoon: 2 nights with candlelight dinner (₹15000)\nDay Out: Pool and lunch (₹1499.5)"
        );
    }

    #[test]
    fn test_consecutive_reads_are_identical() {
        let store = KnowledgeStore::open_in_memory().unwrap();
        store
            .insert_room(&RoomRecord::new("Cottage", "Garden facing", 3500.0))
            .unwrap();
        store
            .insert_package(&PackageRecord::new("Weekend", "Two nights", 8000.0))
            .unwrap();

        assert_eq!(store.list_rooms().unwrap(), store.list_rooms().unwrap());
        assert_eq!(store.list_packages().unwrap(), store.list_packages().unwrap());
    }

    #[test]
    fn test_seed_only_fills_empty_store() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "rooms": [{{"type": "Deluxe", "description": "Sea view", "price": 5000}}],
                "packages": [{{"name": "Spa", "details": "Full body massage", "price": 2500}}]
            }}"#
        )
        .unwrap();

        let store = KnowledgeStore::open_in_memory().unwrap();
        assert_eq!(store.seed_from_file(file.path()).unwrap(), 2);
        assert_eq!(store.seed_from_file(file.path()).unwrap(), 0);

        assert_eq!(
            store.list_rooms().unwrap(),
            vec![RoomRecord::new("Deluxe", "Sea view", 5000.0)]
        );
        assert_eq!(
            store.list_packages().unwrap(),
            vec![PackageRecord::new("Spa", "Full body massage", 2500.0)]
        );
    }

    #[test]
    fn test_seed_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let store = KnowledgeStore::open_in_memory().unwrap();
        let err = store.seed_from_file(file.path()).unwrap_err();
        assert!(matches!(err, KnowledgeError::SeedFormat(_)));
    }

    #[test]
    fn test_seed_missing_file() {
        let store = KnowledgeStore::open_in_memory().unwrap();
        let err = store.seed_from_file("/nonexistent/seed.json").unwrap_err();
        assert!(matches!(err, KnowledgeError::SeedIo(_)));
    }

    #[test]
    fn test_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.db");

        {
            let store = KnowledgeStore::open(&path).unwrap();
            store
                .insert_package(&PackageRecord::new("Trek", "Guided sunrise trek", 900.0))
                .unwrap();
        }

        let store = KnowledgeStore::open(&path).unwrap();
        assert_eq!(store.list_packages().unwrap().len(), 1);
    }

    fn arb_room() -> impl Strategy<Value = RoomRecord> {
        ("[A-Za-z]{1,12}", "[A-Za-z ]{1,30}", 0u32..100_000)
            .prop_map(|(kind, description, price)| {
                RoomRecord::new(kind, description, f64::from(price))
            })
    }

    proptest! {
        #[test]
        fn prop_render_rooms_one_line_per_record(rooms in prop::collection::vec(arb_room(), 0..10)) {
            let rendered = render_rooms(&rooms, "₹");
            if rooms.is_empty() {
                prop_assert_eq!(rendered, "");
            } else {
                let lines: Vec<&str> = rendered.split('\n').collect();
                prop_assert_eq!(lines.len(), rooms.len());
                for (line, room) in lines.iter().zip(&rooms) {
                    let expected = format!(
                        "{} - {} for ₹{}/night",
                        room.kind, room.description, room.price
                    );
                    prop_assert_eq!(*line, expected.as_str());
                }
            }
        }
    }
}
