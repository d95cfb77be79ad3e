//! Integration tests for the enrollments client.
//!
//! These tests verify the cursor pagination protocol, the student
//! enrollment fetch, and the enrollment creation payloads against a mocked
//! Open edX instance.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use openedx_api::api::enrollments::{CreateEnrollmentParams, EnrollmentListParams};
use openedx_api::{AccessToken, EdxApi, EdxConfig};

const DEMO_COURSE: &str = "course-v1:edX+DemoX+Demo_Course";
const OTHER_COURSE: &str = "course-v1:edX+Other+Run";

/// Matches requests that do NOT carry the given query parameter.
struct NoQueryParam(&'static str);

impl Match for NoQueryParam {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(key, _)| key == self.0)
    }
}

fn test_api(server: &MockServer) -> EdxApi {
    let config = EdxConfig::builder()
        .access_token(AccessToken::new("opensesame").unwrap())
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap();
    EdxApi::new(&config)
}

fn listing_record(course_id: &str, user: &str) -> serde_json::Value {
    json!({
        "course_id": course_id,
        "user": user,
        "mode": "audit",
        "is_active": true,
        "created": "2017-02-01T10:00:00Z",
    })
}

// ============================================================================
// Cursor Pagination
// ============================================================================

#[tokio::test]
async fn test_two_page_cursor_listing_yields_union_in_two_requests() {
    let server = MockServer::start().await;

    // Page 2: requested with the cursor extracted from page 1's next URL.
    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollments"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "previous": format!("{}/api/enrollment/v1/enrollments", server.uri()),
            "results": [listing_record(OTHER_COURSE, "verified")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Page 1: no cursor parameter yet.
    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollments"))
        .and(NoQueryParam("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!(
                "{}/api/enrollment/v1/enrollments?cursor=abc",
                server.uri()
            ),
            "previous": null,
            "results": [
                listing_record(DEMO_COURSE, "staff"),
                listing_record(DEMO_COURSE, "honor"),
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let enrollments = api
        .enrollments()
        .get_enrollments(EnrollmentListParams::default())
        .await
        .unwrap();

    // The union of both pages, in URL order.
    assert_eq!(enrollments.len(), 3);
    assert_eq!(enrollments[0].user.as_deref(), Some("staff"));
    assert_eq!(enrollments[1].user.as_deref(), Some("honor"));
    assert_eq!(enrollments[2].user.as_deref(), Some("verified"));
}

#[tokio::test]
async fn test_single_page_listing_stops_without_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "previous": null,
            "results": [listing_record(DEMO_COURSE, "staff")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let mut pages = api.enrollments().list(EnrollmentListParams::default());

    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), 1);
    assert!(pages.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_listing_filters_are_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollments"))
        .and(query_param("course_id", DEMO_COURSE))
        .and(query_param("username", "staff,verified"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "results": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let enrollments = api
        .enrollments()
        .get_enrollments(EnrollmentListParams {
            course_id: Some(DEMO_COURSE.to_string()),
            usernames: vec!["staff".to_string(), "verified".to_string()],
        })
        .await
        .unwrap();

    assert!(enrollments.is_empty());
}

#[tokio::test]
async fn test_listing_try_next_is_lazy_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollments"))
        .and(query_param("cursor", "xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "results": [listing_record(OTHER_COURSE, "verified")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollments"))
        .and(NoQueryParam("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{}/api/enrollment/v1/enrollments?cursor=xyz", server.uri()),
            "results": [listing_record(DEMO_COURSE, "staff")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let mut pages = api.enrollments().list(EnrollmentListParams::default());

    let mut users = Vec::new();
    while let Some(enrollment) = pages.try_next().await.unwrap() {
        users.push(enrollment.user.unwrap());
    }
    assert_eq!(users, vec!["staff", "verified"]);
}

// ============================================================================
// Student Enrollments & Creation
// ============================================================================

#[tokio::test]
async fn test_get_student_enrollments_builds_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "course_details": {"course_id": DEMO_COURSE},
                "user": "staff",
                "mode": "verified",
                "is_active": true,
            },
            {
                "course_details": {"course_id": OTHER_COURSE},
                "user": "staff",
                "mode": "audit",
                "is_active": true,
            },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let enrollments = api.enrollments().get_student_enrollments().await.unwrap();

    assert_eq!(enrollments.len(), 2);
    assert!(enrollments.is_enrolled_in(DEMO_COURSE));
    assert!(enrollments
        .enrollment_for_course(DEMO_COURSE)
        .unwrap()
        .is_verified());
}

#[tokio::test]
async fn test_create_student_enrollment_posts_expected_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enrollment/v1/enrollment"))
        .and(body_json(json!({
            "mode": "verified",
            "course_details": {"course_id": DEMO_COURSE},
            "user": "staff",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "course_details": {"course_id": DEMO_COURSE},
            "user": "staff",
            "mode": "verified",
            "is_active": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let enrollment = api
        .enrollments()
        .create_student_enrollment(
            DEMO_COURSE,
            CreateEnrollmentParams {
                mode: Some("verified".to_string()),
                username: Some("staff".to_string()),
                enrollment_attributes: Vec::new(),
            },
        )
        .await
        .unwrap();

    assert_eq!(enrollment.course_id(), Some(DEMO_COURSE));
    assert!(enrollment.is_verified());
}

#[tokio::test]
async fn test_create_audit_enrollment_defaults_mode() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enrollment/v1/enrollment"))
        .and(body_json(json!({
            "mode": "audit",
            "course_details": {"course_id": DEMO_COURSE},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "course_details": {"course_id": DEMO_COURSE},
            "mode": "audit",
            "is_active": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let enrollment = api
        .enrollments()
        .create_audit_student_enrollment(DEMO_COURSE, None)
        .await
        .unwrap();

    assert_eq!(enrollment.mode.as_deref(), Some("audit"));
}

#[tokio::test]
async fn test_deactivate_enrollment_posts_inactive_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enrollment/v1/enrollment"))
        .and(body_json(json!({
            "course_details": {"course_id": DEMO_COURSE},
            "is_active": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "course_details": {"course_id": DEMO_COURSE},
            "mode": "audit",
            "is_active": false,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let enrollment = api
        .enrollments()
        .deactivate_enrollment(DEMO_COURSE)
        .await
        .unwrap();

    assert!(!enrollment.is_active);
}

#[tokio::test]
async fn test_listing_error_propagates_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/enrollment/v1/enrollments"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "Authentication credentials were not provided.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let error = api
        .enrollments()
        .get_enrollments(EnrollmentListParams::default())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(403));
}
