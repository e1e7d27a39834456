use crate::store::{Category, RecordDraft};

/// The transient form fields the shell can write into. Values live here
/// only until a successful submit clears them; nothing is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
    Ra,
    CourseUnit,
    DeleteIdentifier,
}

impl FormField {
    pub fn parse(s: &str) -> Option<FormField> {
        match s {
            "name" => Some(FormField::Name),
            "email" => Some(FormField::Email),
            "password" => Some(FormField::Password),
            "ra" => Some(FormField::Ra),
            "courseUnit" => Some(FormField::CourseUnit),
            "deleteIdentifier" => Some(FormField::DeleteIdentifier),
            _ => None,
        }
    }
}

/// What the shell should show for the active category: which fields exist,
/// how the delete field is labelled, and the results-table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub ra_visible: bool,
    pub course_unit_visible: bool,
    pub delete_label: &'static str,
    pub columns: &'static [&'static str],
}

const ACADEMIC_COLUMNS: &[&str] = &["ID", "Name", "Email", "RA", "Course Unit"];
const BASIC_COLUMNS: &[&str] = &["ID", "Name", "Email"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequired,
    NonNumericRa,
    MissingIdentifier,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingRequired => "Fill in all required fields.",
            ValidationError::NonNumericRa => "Fill in the RA with a numeric value.",
            ValidationError::MissingIdentifier => "Enter an RA or email to delete.",
        }
    }
}

#[derive(Debug, Default, Clone)]
struct FieldValues {
    name: String,
    email: String,
    password: String,
    ra: String,
    course_unit: String,
    delete_identifier: String,
}

/// Single-state controller: one active category plus the current field
/// values. Every user action runs to completion against it before the
/// next is processed.
pub struct FormController {
    category: Category,
    fields: FieldValues,
}

impl FormController {
    pub fn new() -> FormController {
        FormController {
            // The original form opens on the student category.
            category: Category::Student,
            fields: FieldValues::default(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn select_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.fields.name = value,
            FormField::Email => self.fields.email = value,
            FormField::Password => self.fields.password = value,
            FormField::Ra => self.fields.ra = value,
            FormField::CourseUnit => self.fields.course_unit = value,
            FormField::DeleteIdentifier => self.fields.delete_identifier = value,
        }
    }

    pub fn layout(&self) -> Layout {
        let academic = self.category.is_academic();
        Layout {
            ra_visible: academic,
            course_unit_visible: academic,
            delete_label: if academic { "RA" } else { "Email" },
            columns: if academic {
                ACADEMIC_COLUMNS
            } else {
                BASIC_COLUMNS
            },
        }
    }

    /// Validates the held fields in order: required fields first, then the
    /// RA format for academic categories. Only a fully valid form produces
    /// a draft; the store is never reached otherwise.
    pub fn prepare_submission(&self) -> Result<RecordDraft, ValidationError> {
        let name = self.fields.name.trim();
        let email = self.fields.email.trim();
        let password = self.fields.password.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingRequired);
        }

        let (ra, course_unit) = if self.category.is_academic() {
            let ra = self.fields.ra.trim();
            if ra.is_empty() || !ra.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::NonNumericRa);
            }
            let ra: i64 = ra.parse().map_err(|_| ValidationError::NonNumericRa)?;
            let unit = self.fields.course_unit.trim();
            let unit = if unit.is_empty() {
                None
            } else {
                Some(unit.to_string())
            };
            (Some(ra), unit)
        } else {
            // Non-academic categories ignore RA/course unit even when the
            // shell left stale text in those fields.
            (None, None)
        };

        Ok(RecordDraft {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            ra,
            course_unit,
        })
    }

    pub fn delete_identifier(&self) -> Result<String, ValidationError> {
        let id = self.fields.delete_identifier.trim();
        if id.is_empty() {
            return Err(ValidationError::MissingIdentifier);
        }
        Ok(id.to_string())
    }

    /// A successful add clears the entry fields; the delete identifier is a
    /// separate flow and survives.
    pub fn clear_after_submit(&mut self) {
        self.fields.name.clear();
        self.fields.email.clear();
        self.fields.password.clear();
        self.fields.ra.clear();
        self.fields.course_unit.clear();
    }

    pub fn clear_delete_identifier(&mut self) {
        self.fields.delete_identifier.clear();
    }
}
