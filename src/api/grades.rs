//! Current grades client and models.
//!
//! Wraps the grades API, `GET /api/grades/v1/courses/{course_id}/`:
//!
//! - per-user query (`?username=...`) for a single student's grade
//! - per-course listing, paginated by following the absolute `next` URL
//! - enrolled-course fan-out building a per-user grade set, with the same
//!   4xx-skip / 5xx-abort policy as the certificates client
//!
//! The collection wrappers enforce their identity invariants at
//! construction: [`CurrentGradesByUser`] holds grades of a single user
//! across courses, [`CurrentGradesByCourse`] grades of a single course
//! across users. Mixed collections are rejected with a validation error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::enrollments::CourseEnrollments;
use crate::api::errors::{ApiError, ValidationError};
use crate::api::pagination::PaginatedResults;
use crate::clients::HttpClient;

/// A user's current grade in one course run.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CurrentGrade {
    /// Course the grade belongs to.
    #[serde(default, rename = "course_key", alias = "course_id")]
    pub course_id: Option<String>,
    /// Username of the graded user.
    #[serde(default)]
    pub username: Option<String>,
    /// Whether the user has passed the course.
    #[serde(default)]
    pub passed: bool,
    /// Decimal representation between 0 and 1 of the student grade.
    #[serde(default)]
    pub percent: Option<f64>,
    /// Letter grade as defined in the course grading policy (e.g. `A`),
    /// or `None` when no letter grade was reached.
    #[serde(default)]
    pub letter_grade: Option<String>,
}

/// Current grades of a single user across courses, keyed by course id.
#[derive(Clone, Debug, Default)]
pub struct CurrentGradesByUser {
    username: Option<String>,
    grades: BTreeMap<String, CurrentGrade>,
}

impl CurrentGradesByUser {
    /// Builds the collection, validating that every grade belongs to the
    /// same user.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MixedUsers`] if the collection mixes
    /// records of different users.
    pub fn new(grades: Vec<CurrentGrade>) -> Result<Self, ValidationError> {
        let mut username: Option<String> = None;
        let mut initialized = false;
        let mut map = BTreeMap::new();

        for grade in grades {
            if initialized {
                if username.is_some() && grade.username != username {
                    return Err(ValidationError::MixedUsers {
                        expected: username.unwrap_or_default(),
                        found: grade.username.unwrap_or_default(),
                    });
                }
            } else {
                username = grade.username.clone();
                initialized = true;
            }
            if let Some(course_id) = grade.course_id.clone() {
                map.insert(course_id, grade);
            }
        }

        Ok(Self {
            username,
            grades: map,
        })
    }

    /// Returns the username the grades belong to.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the course ids of all grades.
    pub fn all_course_ids(&self) -> impl Iterator<Item = &str> {
        self.grades.keys().map(String::as_str)
    }

    /// Returns all the grade records.
    pub fn all_current_grades(&self) -> impl Iterator<Item = &CurrentGrade> {
        self.grades.values()
    }

    /// Returns the current grade for the given course id.
    #[must_use]
    pub fn current_grade_for_course(&self, course_id: &str) -> Option<&CurrentGrade> {
        self.grades.get(course_id)
    }

    /// Returns the number of grade records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grades.len()
    }

    /// Returns `true` if there are no grade records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }
}

/// Current grades of a single course across users, keyed by username.
#[derive(Clone, Debug, Default)]
pub struct CurrentGradesByCourse {
    course_id: Option<String>,
    grades: BTreeMap<String, CurrentGrade>,
}

impl CurrentGradesByCourse {
    /// Builds the collection, validating that every grade belongs to the
    /// same course.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MixedCourses`] if the collection mixes
    /// records of different courses.
    pub fn new(grades: Vec<CurrentGrade>) -> Result<Self, ValidationError> {
        let mut course_id: Option<String> = None;
        let mut initialized = false;
        let mut map = BTreeMap::new();

        for grade in grades {
            if initialized {
                if course_id.is_some() && grade.course_id != course_id {
                    return Err(ValidationError::MixedCourses {
                        expected: course_id.unwrap_or_default(),
                        found: grade.course_id.unwrap_or_default(),
                    });
                }
            } else {
                course_id = grade.course_id.clone();
                initialized = true;
            }
            if let Some(username) = grade.username.clone() {
                map.insert(username, grade);
            }
        }

        Ok(Self {
            course_id,
            grades: map,
        })
    }

    /// Returns the course id the grades belong to.
    #[must_use]
    pub fn course_id(&self) -> Option<&str> {
        self.course_id.as_deref()
    }

    /// Returns the usernames of all graded users.
    pub fn all_usernames(&self) -> impl Iterator<Item = &str> {
        self.grades.keys().map(String::as_str)
    }

    /// Returns all the grade records.
    pub fn all_current_grades(&self) -> impl Iterator<Item = &CurrentGrade> {
        self.grades.values()
    }

    /// Returns the current grade for the given username.
    #[must_use]
    pub fn current_grade_for_user(&self, username: &str) -> Option<&CurrentGrade> {
        self.grades.get(username)
    }

    /// Returns the number of grade records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grades.len()
    }

    /// Returns `true` if there are no grade records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }
}

/// Current grades client.
#[derive(Clone, Copy, Debug)]
pub struct UserCurrentGrades<'a> {
    client: &'a HttpClient,
}

impl<'a> UserCurrentGrades<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    fn course_grades_path(course_id: &str) -> String {
        format!("/api/grades/v1/courses/{course_id}/")
    }

    /// Returns the current grade of one user in one course.
    ///
    /// Both the paginated envelope and the bare-array response shapes used
    /// across Open edX releases are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response, or
    /// [`ApiError::UnexpectedPayload`] if the server answers with no grade
    /// entries.
    pub async fn get_student_current_grade(
        &self,
        username: &str,
        course_id: &str,
    ) -> Result<CurrentGrade, ApiError> {
        let mut query = std::collections::HashMap::new();
        query.insert("username".to_string(), username.to_string());

        let response = self
            .client
            .get(&Self::course_grades_path(course_id), Some(query))
            .await?
            .error_for_status()?;

        let page = PaginatedResults::from_body(response.body);
        let first = page
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::UnexpectedPayload {
                context: format!(
                    "no grade entries returned for user '{username}' in course '{course_id}'"
                ),
            })?;

        Ok(serde_json::from_value(first)?)
    }

    /// Returns the user's current grades for the given courses, or for all
    /// enrolled courses when `course_ids` is `None`.
    ///
    /// Courses answering 4xx are silently omitted from the result set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the enrollment lookup fails, if any
    /// per-course response has status ≥ 500, or on transport failure;
    /// [`ApiError::Validation`] if the server returns records of another
    /// user.
    pub async fn get_student_current_grades(
        &self,
        username: &str,
        course_ids: Option<Vec<String>>,
    ) -> Result<CurrentGradesByUser, ApiError> {
        let course_ids = match course_ids {
            Some(ids) => ids,
            None => {
                let enrollments = CourseEnrollments::new(self.client)
                    .get_student_enrollments()
                    .await?;
                enrollments.enrolled_course_ids(None)
            }
        };

        let mut grades = Vec::new();
        for course_id in course_ids {
            match self.get_student_current_grade(username, &course_id).await {
                Ok(grade) => grades.push(grade),
                Err(error) => match error.status() {
                    Some(code) if code < 500 => {}
                    _ => return Err(error),
                },
            }
        }

        Ok(CurrentGradesByUser::new(grades)?)
    }

    /// Returns the current grades of every user in a course, following the
    /// absolute `next` URL of each page until it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response,
    /// [`ApiError::Payload`] if a record cannot be parsed, or
    /// [`ApiError::Validation`] if the server mixes courses.
    pub async fn get_course_current_grades(
        &self,
        course_id: &str,
    ) -> Result<CurrentGradesByCourse, ApiError> {
        let mut grades: Vec<CurrentGrade> = Vec::new();

        let mut response = self
            .client
            .get(&Self::course_grades_path(course_id), None)
            .await?
            .error_for_status()?;

        loop {
            let page = PaginatedResults::from_body(response.body);
            for record in page.results {
                grades.push(serde_json::from_value(record)?);
            }
            match page.next {
                Some(next_url) => {
                    response = self
                        .client
                        .get_absolute(&next_url)
                        .await?
                        .error_for_status()?;
                }
                None => break,
            }
        }

        Ok(CurrentGradesByCourse::new(grades)?)
    }
}
