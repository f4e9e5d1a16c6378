/// Tables and indexes, applied on every start.
///
/// Foreign keys carry no `ON DELETE` actions: deleting a professor or a
/// module cascades through explicit statements in `professors::delete` and
/// `modules::delete`.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS professors (
    professor_id TEXT PRIMARY KEY NOT NULL CHECK (length(professor_id) BETWEEN 1 AND 10),
    name         TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS professors_name ON professors (name);

CREATE TABLE IF NOT EXISTS modules (
    code TEXT PRIMARY KEY NOT NULL CHECK (length(code) BETWEEN 1 AND 10),
    name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS modules_name ON modules (name);

CREATE TABLE IF NOT EXISTS module_instances (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    module_code TEXT NOT NULL REFERENCES modules (code),
    year        INTEGER NOT NULL,
    semester    INTEGER NOT NULL,
    UNIQUE (module_code, year, semester)
);
CREATE INDEX IF NOT EXISTS module_instances_year ON module_instances (year);

CREATE TABLE IF NOT EXISTS module_instance_professors (
    module_instance_id INTEGER NOT NULL REFERENCES module_instances (id),
    professor_id       TEXT NOT NULL REFERENCES professors (professor_id),
    PRIMARY KEY (module_instance_id, professor_id)
);
CREATE INDEX IF NOT EXISTS module_instance_professors_professor
    ON module_instance_professors (professor_id);

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    date_joined   INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER))
);

CREATE TABLE IF NOT EXISTS tokens (
    key     TEXT PRIMARY KEY NOT NULL,
    user_id INTEGER NOT NULL UNIQUE REFERENCES users (id),
    created INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER))
);

CREATE TABLE IF NOT EXISTS ratings (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id            INTEGER NOT NULL REFERENCES users (id),
    professor_id       TEXT NOT NULL REFERENCES professors (professor_id),
    module_instance_id INTEGER NOT NULL REFERENCES module_instances (id),
    rating             INTEGER NOT NULL CONSTRAINT valid_rating_range CHECK (rating BETWEEN 1 AND 5),
    UNIQUE (user_id, professor_id, module_instance_id)
);
CREATE INDEX IF NOT EXISTS ratings_professor ON ratings (professor_id);
CREATE INDEX IF NOT EXISTS ratings_module_instance ON ratings (module_instance_id);
"#;
