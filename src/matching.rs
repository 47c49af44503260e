//! Expertise matching.
//!
//! Tags are free text typed by different offices ("Anatomy",
//! "anatomy lab", "Clinical anatomy"), so two tags match when, ignoring
//! case and surrounding whitespace, either one contains the other. Blank
//! tags never match.
//!
//! The matcher only filters. Ordering candidates is the load tracker's job.

use crate::demand::TermDemand;
use crate::models::{AllocationInput, Lecturer, LecturerId};

/// Whether two expertise tags match (symmetric, case-insensitive substring).
///
/// # Example
/// ```
/// use u_allocate::matching::tags_match;
///
/// assert!(tags_match("Anatomy", "anatomy lab"));
/// assert!(tags_match("anatomy lab", "ANATOMY"));
/// assert!(!tags_match("Anatomy", "Biochemistry"));
/// assert!(!tags_match("", "Anatomy"));
/// ```
pub fn tags_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// The required-expertise set of one term.
///
/// Union of its courses' required tags, de-duplicated case-insensitively.
/// The first spelling seen is kept for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpertiseProfile {
    tags: Vec<String>,
}

/// An expertise-matched pool lecturer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Lecturer identifier.
    pub lecturer_id: LecturerId,
    /// Number of required tags the lecturer matches.
    pub score: usize,
}

impl ExpertiseProfile {
    /// Builds a profile from raw tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut profile = Self::default();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                continue;
            }
            let lowered = tag.to_lowercase();
            if !profile.tags.iter().any(|t| t.to_lowercase() == lowered) {
                profile.tags.push(tag.to_string());
            }
        }
        profile
    }

    /// The profile of a term: every required tag of its courses.
    pub fn for_term(input: &AllocationInput, demand: &TermDemand) -> Self {
        Self::new(
            demand
                .course_codes
                .iter()
                .filter_map(|code| input.course(code))
                .flat_map(|c| c.required_expertise.iter()),
        )
    }

    /// Required tags, first spelling kept.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether the term requires no expertise at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of required tags matched by any of `expertise`.
    pub fn match_score(&self, expertise: &[String]) -> usize {
        self.tags
            .iter()
            .filter(|req| expertise.iter().any(|e| tags_match(req, e)))
            .count()
    }

    /// Required tags that none of `lecturers` covers.
    pub fn unmatched_by<'a, I>(&self, lecturers: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Lecturer>,
    {
        let lecturers: Vec<&Lecturer> = lecturers.into_iter().collect();
        self.tags
            .iter()
            .filter(|req| {
                !lecturers
                    .iter()
                    .any(|l| l.expertise.iter().any(|e| tags_match(req, e)))
            })
            .cloned()
            .collect()
    }
}

/// Filters `pool` down to lecturers matching `profile`.
///
/// Pool order is preserved.
pub fn match_candidates<'a, I>(profile: &ExpertiseProfile, pool: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = &'a Lecturer>,
{
    pool.into_iter()
        .filter_map(|l| {
            let score = profile.match_score(&l.expertise);
            (score > 0).then_some(Candidate {
                lecturer_id: l.id,
                score,
            })
        })
        .collect()
}
