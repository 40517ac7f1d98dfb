//! Database schema and migrations for Boards.
//!
//! Migrations are applied in order when the database is opened. The
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: accounts
    r#"
CREATE TABLE users (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    username     TEXT NOT NULL UNIQUE COLLATE NOCASE,
    email        TEXT NOT NULL DEFAULT '',
    password     TEXT NOT NULL,           -- Argon2 hash
    is_active    INTEGER NOT NULL DEFAULT 1,
    date_joined  TEXT NOT NULL DEFAULT (datetime('now')),
    last_login   TEXT
);
"#,
    // v2: boards, topics and posts
    r#"
CREATE TABLE boards (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL UNIQUE,
    description  TEXT NOT NULL,
    created_at   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE topics (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    subject       TEXT NOT NULL,
    board_id      INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
    starter_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at    TEXT NOT NULL DEFAULT (datetime('now')),
    last_updated  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_topics_board_id ON topics(board_id);
CREATE INDEX idx_topics_last_updated ON topics(last_updated);

CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    message     TEXT NOT NULL,
    topic_id    INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    created_by  INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT,
    updated_by  INTEGER REFERENCES users(id) ON DELETE SET NULL
);

CREATE INDEX idx_posts_topic_id ON posts(topic_id);
"#,
    // v3: sign-in sessions
    r#"
CREATE TABLE sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    token       TEXT NOT NULL UNIQUE,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    expires_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_user_id ON sessions(user_id);
"#,
];
