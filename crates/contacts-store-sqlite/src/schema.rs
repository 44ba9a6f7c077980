//! SQL schema for the contacts SQLite store.

/// Creates the tables if they are missing. Safe to run on every startup.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS names (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT NOT NULL DEFAULT '',
    last_name   TEXT NOT NULL DEFAULT ''
);

-- A contact owns exactly one name. Removing the name removes the contact.
CREATE TABLE IF NOT EXISTS contacts (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name_id        INTEGER NOT NULL UNIQUE
                   REFERENCES names(id) ON DELETE CASCADE ON UPDATE CASCADE,
    social_number  TEXT NOT NULL DEFAULT '',
    email          TEXT NOT NULL DEFAULT ''
);
";

/// Drops both tables. Run before [`SCHEMA`] for a destructive reset.
pub const DROP_SCHEMA: &str = "
PRAGMA foreign_keys = ON;

DROP TABLE IF EXISTS contacts;
DROP TABLE IF EXISTS names;
";
