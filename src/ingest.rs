//! Ingestion boundary.
//!
//! Upstream records are loose: expertise arrives either as a JSON array
//! or as one comma-joined string, and roles arrive as a flat table of
//! `(lecturer, term, course, label)` rows with free-text labels. This
//! module normalizes all of that into a frozen [`AllocationInput`] so the
//! allocator core only ever sees `Vec<String>` tags and typed roles.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{
    AllocationInput, Course, CurriculumRole, DataIssue, DataIssueKind, Lecturer, LecturerId,
    Module, RoleAssignment, SmallGroup, TermId,
};

/// A tag field that is either a list or a comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    /// `["Anatomy", "Histology"]`
    List(Vec<String>),
    /// `"Anatomy, Histology"`
    Joined(String),
}

impl Default for TagField {
    fn default() -> Self {
        TagField::List(Vec::new())
    }
}

/// Splits, trims and drops blank tags. Duplicates are kept.
///
/// # Example
/// ```
/// use u_allocate::ingest::{normalize_tags, TagField};
///
/// let tags = normalize_tags(&TagField::Joined("Anatomy, ,histology ".into()));
/// assert_eq!(tags, vec!["Anatomy", "histology"]);
/// ```
pub fn normalize_tags(field: &TagField) -> Vec<String> {
    let raw: Vec<&str> = match field {
        TagField::List(items) => items.iter().map(String::as_str).collect(),
        TagField::Joined(s) => vec![s.as_str()],
    };
    raw.into_iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a free-text role label.
pub fn parse_role(label: &str) -> Option<CurriculumRole> {
    let normalized: String = label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    match normalized.as_str() {
        "coordinator" => Some(CurriculumRole::Coordinator),
        "team_member" | "team" => Some(CurriculumRole::TeamMember),
        _ => None,
    }
}

/// A course as delivered upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCourse {
    /// Course code.
    pub code: String,
    /// Term number.
    pub term: TermId,
    /// Required expertise, list or comma-joined.
    #[serde(default)]
    pub required_expertise: TagField,
    /// Blok number.
    #[serde(default)]
    pub blok: u32,
}

/// A lecturer as delivered upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLecturer {
    /// Lecturer identifier.
    pub id: LecturerId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Expertise, list or comma-joined.
    #[serde(default)]
    pub expertise: TagField,
}

/// One row of the role table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRow {
    /// Lecturer holding the role.
    pub lecturer_id: LecturerId,
    /// Term of the role.
    pub term: TermId,
    /// Course of the role.
    pub course_code: String,
    /// Free-text role label.
    pub role: String,
}

/// Raw input bundle as fetched from the persistence collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInput {
    /// Courses.
    pub courses: Vec<RawCourse>,
    /// Modules per course code.
    pub modules: BTreeMap<String, Vec<Module>>,
    /// Lecturers.
    pub lecturers: Vec<RawLecturer>,
    /// Flat role table.
    pub role_rows: Vec<RoleRow>,
    /// Small groups.
    pub small_groups: Vec<SmallGroup>,
    /// External load per lecturer.
    pub historical_assignment_count: BTreeMap<LecturerId, u64>,
}

impl RawInput {
    /// Normalizes into a frozen allocation input.
    ///
    /// Role rows naming an unknown lecturer or carrying an unknown label
    /// are dropped and recorded in `ingest_issues`.
    pub fn normalize(self) -> AllocationInput {
        let mut issues = Vec::new();

        let courses = self
            .courses
            .into_iter()
            .map(|c| Course {
                required_expertise: normalize_tags(&c.required_expertise),
                code: c.code,
                term: c.term,
                blok: c.blok,
            })
            .collect();

        let mut lecturers: Vec<Lecturer> = self
            .lecturers
            .into_iter()
            .map(|l| Lecturer {
                id: l.id,
                name: l.name,
                expertise: normalize_tags(&l.expertise),
                role_assignments: Vec::new(),
            })
            .collect();
        let index: HashMap<LecturerId, usize> = lecturers
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id, i))
            .collect();

        for row in self.role_rows {
            let Some(&slot) = index.get(&row.lecturer_id) else {
                issues.push(DataIssue::new(
                    DataIssueKind::UnknownLecturer,
                    Some(row.lecturer_id),
                    format!(
                        "role '{}' for course '{}' names unknown lecturer {}",
                        row.role, row.course_code, row.lecturer_id
                    ),
                ));
                continue;
            };
            let Some(role) = parse_role(&row.role) else {
                issues.push(DataIssue::new(
                    DataIssueKind::UnknownRole,
                    Some(row.lecturer_id),
                    format!(
                        "unknown role label '{}' for lecturer {}",
                        row.role, row.lecturer_id
                    ),
                ));
                continue;
            };
            lecturers[slot]
                .role_assignments
                .push(RoleAssignment::new(row.term, row.course_code, role));
        }

        for issue in &issues {
            warn!(kind = ?issue.kind, "{}", issue.message);
        }

        AllocationInput {
            courses,
            modules: self.modules,
            lecturers,
            small_groups: self.small_groups,
            historical_assignment_count: self.historical_assignment_count,
            ingest_issues: issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_field_accepts_both_shapes() {
        let list: TagField = serde_json::from_str(r#"["Anatomy", "Histology"]"#).unwrap();
        let joined: TagField = serde_json::from_str(r#""Anatomy,Histology""#).unwrap();
        assert_eq!(normalize_tags(&list), normalize_tags(&joined));
    }

    #[test]
    fn test_list_entries_with_commas_are_split() {
        let field = TagField::List(vec!["Anatomy, Physiology".into(), "Anatomy".into()]);
        assert_eq!(normalize_tags(&field), vec!["Anatomy", "Physiology", "Anatomy"]);
    }

    #[test]
    fn test_parse_role_labels() {
        assert_eq!(parse_role("Coordinator"), Some(CurriculumRole::Coordinator));
        assert_eq!(parse_role("team_member"), Some(CurriculumRole::TeamMember));
        assert_eq!(parse_role(" Team Member "), Some(CurriculumRole::TeamMember));
        assert_eq!(parse_role("team-member"), Some(CurriculumRole::TeamMember));
        assert_eq!(parse_role("lecturer"), None);
    }

    #[test]
    fn test_normalize_attaches_roles_and_reports_issues() {
        let json = r#"{
            "courses": [
                {"code": "C1", "term": 1, "required_expertise": "Anatomy, Physiology", "blok": 2}
            ],
            "modules": {"C1": [{"id": 1, "ordinal": 1}]},
            "lecturers": [
                {"id": 1, "name": "A", "expertise": "anatomy"},
                {"id": 2, "name": "B", "expertise": ["physiology"]}
            ],
            "role_rows": [
                {"lecturer_id": 1, "term": 1, "course_code": "C1", "role": "coordinator"},
                {"lecturer_id": 9, "term": 1, "course_code": "C1", "role": "team member"},
                {"lecturer_id": 2, "term": 1, "course_code": "C1", "role": "dean"}
            ],
            "small_groups": [{"term": 1, "group_name": "G1"}],
            "historical_assignment_count": {"2": 4}
        }"#;
        let raw: RawInput = serde_json::from_str(json).unwrap();
        let input = raw.normalize();

        assert_eq!(input.courses[0].required_expertise, vec!["Anatomy", "Physiology"]);
        assert_eq!(input.lecturers[0].expertise, vec!["anatomy"]);
        assert_eq!(input.lecturers[0].role_assignments.len(), 1);
        assert!(input.lecturers[1].role_assignments.is_empty());
        assert_eq!(input.historical_assignment_count[&2], 4);

        let kinds: Vec<DataIssueKind> = input.ingest_issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![DataIssueKind::UnknownLecturer, DataIssueKind::UnknownRole]);
    }

    #[test]
    fn test_missing_optional_fields() {
        let raw: RawInput = serde_json::from_str(r#"{"lecturers": [{"id": 3}]}"#).unwrap();
        let input = raw.normalize();
        assert!(input.lecturers[0].expertise.is_empty());
        assert!(input.courses.is_empty());
    }
}
