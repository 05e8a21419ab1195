pub const SCHEMA_VERSION: i32 = 1;

/// V1: contacts with ordered phones, and notes with JSON-encoded tags.
///
/// Row ids double as insertion order; a save rewrites every row, so ids
/// are always 1..=n.
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    birthday TEXT,
    email TEXT,
    address TEXT
);

CREATE TABLE IF NOT EXISTS phones (
    contact_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    number TEXT NOT NULL,
    PRIMARY KEY (contact_id, position),
    FOREIGN KEY (contact_id) REFERENCES contacts(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY,
    text TEXT NOT NULL,
    tags TEXT NOT NULL DEFAULT '[]',
    title TEXT
);
"#;
