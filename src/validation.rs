//! Input validation for allocation runs.
//!
//! Checks structural integrity of the input snapshot before allocating.
//! Detects:
//! - Duplicate course codes
//! - Duplicate lecturer IDs
//! - Duplicate module IDs (across all courses)
//! - Modules attached to unknown courses
//!
//! Role declarations that point at unknown courses are *not* structural
//! errors; the role resolver reports them as data issues and skips them.

use crate::models::AllocationInput;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Modules are attached to a course code that doesn't exist.
    UnknownCourse,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an allocation input snapshot.
///
/// Checks:
/// 1. No duplicate course codes
/// 2. No duplicate lecturer IDs
/// 3. No duplicate module IDs (across all courses)
/// 4. Every module list belongs to an existing course
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &AllocationInput) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_codes = HashSet::new();
    for course in &input.courses {
        if !course_codes.insert(course.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course code: {}", course.code),
            ));
        }
    }

    let mut lecturer_ids = HashSet::new();
    for lecturer in &input.lecturers {
        if !lecturer_ids.insert(lecturer.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate lecturer ID: {}", lecturer.id),
            ));
        }
    }

    let mut module_ids = HashSet::new();
    for (code, modules) in &input.modules {
        if !course_codes.contains(code.as_str()) && !modules.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!(
                    "{} module(s) attached to unknown course '{}'",
                    modules.len(),
                    code
                ),
            ));
        }
        for module in modules {
            if !module_ids.insert(module.id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate module ID: {} (course '{}')", module.id, code),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Lecturer, Module};

    fn sample_input() -> AllocationInput {
        AllocationInput::new()
            .with_course(Course::new("C1", 1), vec![Module::new(1, 1), Module::new(2, 2)])
            .with_course(Course::new("C2", 3), vec![Module::new(3, 1)])
            .with_lecturer(Lecturer::new(1))
            .with_lecturer(Lecturer::new(2))
            .with_groups(1, ["A"])
            .with_groups(3, ["A"])
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_input()).is_ok());
    }

    #[test]
    fn test_duplicate_course_code() {
        let mut input = sample_input();
        input.courses.push(Course::new("C1", 5));

        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("course")));
    }

    #[test]
    fn test_duplicate_lecturer_id() {
        let input = sample_input().with_lecturer(Lecturer::new(2));

        let errors = validate_input(&input).unwrap_err();
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::DuplicateId && e.message.contains("lecturer")
        }));
    }

    #[test]
    fn test_duplicate_module_across_courses() {
        let input = sample_input().with_course(Course::new("C3", 5), vec![Module::new(3, 1)]);

        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("module")));
    }

    #[test]
    fn test_modules_of_unknown_course() {
        let mut input = sample_input();
        input
            .modules
            .insert("GHOST".into(), vec![Module::new(99, 1)]);

        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownCourse));
    }

    #[test]
    fn test_empty_module_list_for_unknown_course_is_fine() {
        let mut input = sample_input();
        input.modules.insert("GHOST".into(), Vec::new());
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let mut input = sample_input().with_lecturer(Lecturer::new(1));
        input.modules.insert("GHOST".into(), vec![Module::new(1, 1)]);

        let errors = validate_input(&input).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
