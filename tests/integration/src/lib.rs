//! Integration tests for the plan-to-query pipeline.
//!
//! Each test decodes a policy-engine query plan, compiles it into a
//! select statement, runs that statement against an in-memory SQLite
//! database seeded with a small user/resource fixture, and checks which
//! rows survive the generated `WHERE` clause. No external services are
//! required.
//!
//! Run them with:
//! ```text
//! cargo test -p rowfence-integration
//! ```

use std::sync::Once;

use rowfence_seaquery::{AttributeMap, TableColumn};
use rusqlite::Connection;
use sea_query::{SelectStatement, SqliteQueryBuilder};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Two users own three resources between them. `aOptionalString` is the
/// only nullable column.
const FIXTURE_SQL: &str = r#"
CREATE TABLE "user" (
    "id" text PRIMARY KEY,
    "role" text NOT NULL,
    "department" text NOT NULL
);
CREATE TABLE "resource" (
    "id" text PRIMARY KEY,
    "name" text NOT NULL,
    "aBool" boolean NOT NULL,
    "aString" text NOT NULL,
    "aNumber" integer NOT NULL,
    "aOptionalString" text,
    "ownedBy" text NOT NULL REFERENCES "user" ("id"),
    "createdBy" text NOT NULL REFERENCES "user" ("id")
);
INSERT INTO "user" ("id", "role", "department") VALUES
    ('1', 'admin', 'engineering'),
    ('2', 'user', 'marketing');
INSERT INTO "resource"
    ("id", "name", "aBool", "aString", "aNumber", "aOptionalString", "ownedBy", "createdBy")
VALUES
    ('1', 'resource1', TRUE, 'string', 1, 'optional', '1', '1'),
    ('2', 'resource2', FALSE, 'amIAString?', 2, NULL, '1', '2'),
    ('3', 'resource3', TRUE, 'anotherString', 3, NULL, '2', '2');
"#;

/// Open an in-memory database seeded with the test fixture.
#[must_use]
pub fn seeded_connection() -> Connection {
    init_tracing();

    let conn = Connection::open_in_memory()
        .unwrap_or_else(|e| panic!("failed to open in-memory database: {e}"));
    conn.execute_batch(FIXTURE_SQL)
        .unwrap_or_else(|e| panic!("failed to seed fixture: {e}"));
    tracing::debug!("seeded fixture database");
    conn
}

/// Attribute map covering the `resource` table's own columns.
#[must_use]
pub fn resource_attrs() -> AttributeMap {
    AttributeMap::new()
        .with("request.resource.id", TableColumn::new("resource", "id"))
        .with("request.resource.attr.aBool", TableColumn::new("resource", "aBool"))
        .with("request.resource.attr.aString", TableColumn::new("resource", "aString"))
        .with("request.resource.attr.aNumber", TableColumn::new("resource", "aNumber"))
        .with(
            "request.resource.attr.aOptionalString",
            TableColumn::new("resource", "aOptionalString"),
        )
        .with("request.resource.attr.ownedBy", TableColumn::new("resource", "ownedBy"))
        .with("request.resource.attr.createdBy", TableColumn::new("resource", "createdBy"))
}

/// Runs the select against the fixture and returns the admitted resource
/// names, sorted.
#[must_use]
pub fn admitted_names(conn: &Connection, query: &SelectStatement) -> Vec<String> {
    let sql = query.to_string(SqliteQueryBuilder);
    tracing::debug!(%sql, "executing compiled select");

    let mut stmt = conn
        .prepare(&sql)
        .unwrap_or_else(|e| panic!("failed to prepare `{sql}`: {e}"));
    let mut names = stmt
        .query_map([], |row| row.get::<_, String>("name"))
        .unwrap_or_else(|e| panic!("failed to run `{sql}`: {e}"))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("failed to read rows: {e}"));
    names.sort();
    names
}

mod test_joins;
