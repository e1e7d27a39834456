use anyhow::Result;
use rusqlite::{params, Connection, ErrorCode};
use uuid::Uuid;

/// The four registration categories. Exactly one is active in the form at a
/// time; each owns its own table and its own delete identifier (RA for the
/// academic pair, email for the rest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Student,
    Visitor,
    Lecturer,
    Exhibitor,
}

impl Category {
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "student" => Some(Category::Student),
            "visitor" => Some(Category::Visitor),
            "lecturer" => Some(Category::Lecturer),
            "exhibitor" => Some(Category::Exhibitor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Student => "student",
            Category::Visitor => "visitor",
            Category::Lecturer => "lecturer",
            Category::Exhibitor => "exhibitor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Student => "Student",
            Category::Visitor => "Visitor",
            Category::Lecturer => "Lecturer",
            Category::Exhibitor => "Exhibitor",
        }
    }

    pub fn label_plural(&self) -> &'static str {
        match self {
            Category::Student => "students",
            Category::Visitor => "visitors",
            Category::Lecturer => "lecturers",
            Category::Exhibitor => "exhibitors",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Category::Student => "students",
            Category::Visitor => "visitors",
            Category::Lecturer => "lecturers",
            Category::Exhibitor => "exhibitors",
        }
    }

    /// Students and lecturers carry RA + course unit and are deleted by RA.
    pub fn is_academic(&self) -> bool {
        matches!(self, Category::Student | Category::Lecturer)
    }
}

/// Validated form values ready to insert. `ra`/`course_unit` are set only
/// for academic categories; the form controller never fills them otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub ra: Option<i64>,
    pub course_unit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub ra: Option<i64>,
    pub course_unit: Option<String>,
}

/// User-facing outcome of a mutation. Constraint violations and not-found
/// deletes land here as ok=false with a message; unexpected storage errors
/// propagate as `Err` instead and are mapped at the IPC boundary.
#[derive(Debug, Clone)]
pub struct OpReport {
    pub ok: bool,
    pub message: String,
}

impl OpReport {
    fn success(message: String) -> OpReport {
        OpReport { ok: true, message }
    }

    fn failure(message: String) -> OpReport {
        OpReport { ok: false, message }
    }
}

pub fn add_record(conn: &Connection, category: Category, draft: &RecordDraft) -> Result<OpReport> {
    let id = Uuid::new_v4().to_string();

    let inserted = if category.is_academic() {
        let ra = draft
            .ra
            .ok_or_else(|| anyhow::anyhow!("academic draft without RA"))?;
        conn.execute(
            &format!(
                "INSERT INTO {}(id, name, email, password, ra, course_unit) VALUES (?, ?, ?, ?, ?, ?)",
                category.table()
            ),
            params![id, draft.name, draft.email, draft.password, ra, draft.course_unit],
        )
    } else {
        conn.execute(
            &format!(
                "INSERT INTO {}(id, name, email, password) VALUES (?, ?, ?, ?)",
                category.table()
            ),
            params![id, draft.name, draft.email, draft.password],
        )
    };

    match inserted {
        Ok(_) => Ok(OpReport::success(format!(
            "{} registered.",
            category.label()
        ))),
        Err(e) if is_constraint_violation(&e) => {
            let key = if category.is_academic() { "RA" } else { "email" };
            Ok(OpReport::failure(format!(
                "A {} with this {} is already registered.",
                category.label().to_lowercase(),
                key
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Rows in insert order. An empty table is an empty Vec, never an error.
pub fn list_records(conn: &Connection, category: Category) -> Result<Vec<RecordRow>> {
    let rows = if category.is_academic() {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, email, ra, course_unit FROM {} ORDER BY rowid",
            category.table()
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RecordRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    ra: Some(row.get(3)?),
                    course_unit: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows
    } else {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, email FROM {} ORDER BY rowid",
            category.table()
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RecordRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    ra: None,
                    course_unit: None,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows
    };
    Ok(rows)
}

pub fn delete_record(conn: &Connection, category: Category, identifier: &str) -> Result<OpReport> {
    let affected = if category.is_academic() {
        let Ok(ra) = identifier.parse::<i64>() else {
            return Ok(OpReport::failure(format!(
                "RA must be numeric to delete a {}.",
                category.label().to_lowercase()
            )));
        };
        conn.execute(
            &format!("DELETE FROM {} WHERE ra = ?", category.table()),
            [ra],
        )?
    } else {
        conn.execute(
            &format!("DELETE FROM {} WHERE email = ?", category.table()),
            [identifier],
        )?
    };

    if affected == 0 {
        let key = if category.is_academic() { "RA" } else { "email" };
        Ok(OpReport::failure(format!(
            "No {} found with {} {}.",
            category.label().to_lowercase(),
            key,
            identifier
        )))
    } else {
        Ok(OpReport::success(format!("{} removed.", category.label())))
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        db::create_schema(&conn).expect("create schema");
        conn
    }

    fn student_draft(ra: i64) -> RecordDraft {
        RecordDraft {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "p1".into(),
            ra: Some(ra),
            course_unit: Some("CS101".into()),
        }
    }

    #[test]
    fn add_then_list_returns_matching_fields() {
        let conn = test_conn();
        let report = add_record(&conn, Category::Student, &student_draft(123)).expect("add");
        assert!(report.ok, "{}", report.message);

        let rows = list_records(&conn, Category::Student).expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ana");
        assert_eq!(rows[0].email, "ana@x.com");
        assert_eq!(rows[0].ra, Some(123));
        assert_eq!(rows[0].course_unit.as_deref(), Some("CS101"));
    }

    #[test]
    fn duplicate_ra_is_reported_not_raised() {
        let conn = test_conn();
        assert!(add_record(&conn, Category::Student, &student_draft(123))
            .expect("first add")
            .ok);

        let mut second = student_draft(123);
        second.email = "other@x.com".into();
        let report = add_record(&conn, Category::Student, &second).expect("second add");
        assert!(!report.ok);
        assert!(report.message.contains("RA"), "{}", report.message);

        // The failed insert leaves the table unchanged.
        assert_eq!(list_records(&conn, Category::Student).expect("list").len(), 1);
    }

    #[test]
    fn duplicate_visitor_email_is_reported() {
        let conn = test_conn();
        let draft = RecordDraft {
            name: "Bia".into(),
            email: "bia@x.com".into(),
            password: "p2".into(),
            ra: None,
            course_unit: None,
        };
        assert!(add_record(&conn, Category::Visitor, &draft).expect("add").ok);
        let report = add_record(&conn, Category::Visitor, &draft).expect("re-add");
        assert!(!report.ok);
        assert!(report.message.contains("email"), "{}", report.message);
    }

    #[test]
    fn delete_by_ra_and_not_found() {
        let conn = test_conn();
        assert!(add_record(&conn, Category::Student, &student_draft(123))
            .expect("add")
            .ok);

        let missing = delete_record(&conn, Category::Student, "999").expect("delete missing");
        assert!(!missing.ok);
        assert_eq!(list_records(&conn, Category::Student).expect("list").len(), 1);

        let hit = delete_record(&conn, Category::Student, "123").expect("delete hit");
        assert!(hit.ok);
        assert!(list_records(&conn, Category::Student).expect("list").is_empty());
    }

    #[test]
    fn delete_academic_with_non_numeric_identifier_is_rejected() {
        let conn = test_conn();
        let report = delete_record(&conn, Category::Lecturer, "abc").expect("delete");
        assert!(!report.ok);
        assert!(report.message.contains("numeric"), "{}", report.message);
    }

    #[test]
    fn categories_do_not_share_tables() {
        let conn = test_conn();
        assert!(add_record(&conn, Category::Student, &student_draft(123))
            .expect("add student")
            .ok);
        let visitor = RecordDraft {
            name: "Cid".into(),
            email: "cid@x.com".into(),
            password: "p3".into(),
            ra: None,
            course_unit: None,
        };
        assert!(add_record(&conn, Category::Visitor, &visitor)
            .expect("add visitor")
            .ok);

        assert_eq!(list_records(&conn, Category::Student).expect("list").len(), 1);
        assert_eq!(list_records(&conn, Category::Visitor).expect("list").len(), 1);
        assert!(list_records(&conn, Category::Lecturer).expect("list").is_empty());
        assert!(list_records(&conn, Category::Exhibitor).expect("list").is_empty());
    }
}
