//! Integration tests for the remaining resource clients: course detail,
//! course modes, course structure, course runs, CCX, and email settings.

use chrono::TimeZone;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openedx_api::api::course_runs::{CreateCourseRunParams, UpdateCourseRunParams};
use openedx_api::{AccessToken, ApiError, EdxApi, EdxConfig, ValidationError};

const DEMO_COURSE: &str = "course-v1:edX+DemoX+Demo_Course";

fn test_api(server: &MockServer) -> EdxApi {
    let config = EdxConfig::builder()
        .access_token(AccessToken::new("opensesame").unwrap())
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap();
    EdxApi::new(&config)
}

// ============================================================================
// Course Detail
// ============================================================================

#[tokio::test]
async fn test_course_detail_with_username_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/courses/v1/courses/{DEMO_COURSE}/")))
        .and(query_param("username", "staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": DEMO_COURSE,
            "name": "Demonstration Course",
            "org": "edX",
            "pacing": "self",
            "media": {"course_image": {"uri": "/images/course.jpg"}},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let detail = api
        .course_details()
        .get_detail(DEMO_COURSE, Some("staff"))
        .await
        .unwrap();

    assert_eq!(detail.course_id.as_deref(), Some(DEMO_COURSE));
    assert!(detail.is_self_paced());
    assert_eq!(detail.media_uri("course_image"), Some("/images/course.jpg"));
}

// ============================================================================
// Course Modes
// ============================================================================

#[tokio::test]
async fn test_course_modes_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/course_modes/v1/courses/{DEMO_COURSE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"course_id": DEMO_COURSE, "mode_slug": "audit", "min_price": 0, "currency": "usd"},
            {"course_id": DEMO_COURSE, "mode_slug": "verified", "min_price": 49, "currency": "usd"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let modes = api.course_modes().get_course_modes(DEMO_COURSE).await.unwrap();

    assert_eq!(modes.len(), 2);
    assert_eq!(modes[1].mode_slug.as_deref(), Some("verified"));
    assert_eq!(modes[1].min_price, Some(49.0));
}

#[tokio::test]
async fn test_single_course_mode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/api/course_modes/v1/courses/{DEMO_COURSE}/verified"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "course_id": DEMO_COURSE,
            "mode_slug": "verified",
            "mode_display_name": "Verified Certificate",
            "min_price": 49,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let mode = api
        .course_modes()
        .get_mode(DEMO_COURSE, "verified")
        .await
        .unwrap();

    assert_eq!(mode.mode_display_name.as_deref(), Some("Verified Certificate"));
}

// ============================================================================
// Course Structure
// ============================================================================

#[tokio::test]
async fn test_course_blocks_requests_full_depth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/v1/blocks/"))
        .and(query_param("depth", "all"))
        .and(query_param("course_id", DEMO_COURSE))
        .and(query_param("username", "staff"))
        .and(query_param(
            "requested_fields",
            "children,display_name,id,type,visible_to_staff_only",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "root": "block-v1:edX+DemoX+Demo_Course+type@course+block@course",
            "blocks": {
                "block-v1:edX+DemoX+Demo_Course+type@course+block@course": {
                    "display_name": "Demonstration Course",
                    "type": "course",
                    "children": [],
                },
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let structure = api
        .course_structure()
        .course_blocks(DEMO_COURSE, "staff")
        .await
        .unwrap();

    let root = structure.root().unwrap();
    assert_eq!(root.display_name.as_deref(), Some("Demonstration Course"));
    assert!(root.visible());
}

// ============================================================================
// Course Runs
// ============================================================================

#[tokio::test]
async fn test_get_course_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/course_runs/{DEMO_COURSE}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": DEMO_COURSE,
            "title": "Demonstration Course",
            "pacing_type": "instructor_paced",
            "schedule": {"start": "2021-06-01T00:00:00Z", "end": "2021-12-01T00:00:00Z"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let run = api.course_runs().get_course_run(DEMO_COURSE).await.unwrap();

    assert_eq!(run.title.as_deref(), Some("Demonstration Course"));
    assert!(run.start().is_some());
}

#[tokio::test]
async fn test_create_course_run_builds_schedule_payload() {
    let server = MockServer::start().await;
    let start = chrono::Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
    let end = chrono::Utc.with_ymd_and_hms(2021, 12, 1, 0, 0, 0).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/course_runs/"))
        .and(body_json(json!({
            "org": "edX",
            "number": "DemoX",
            "run": "2T2021",
            "title": "Demonstration Course",
            "pacing_type": "self_paced",
            "schedule": {
                "start": "2021-06-01T00:00:00+00:00",
                "end": "2021-12-01T00:00:00+00:00",
            },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "course-v1:edX+DemoX+2T2021",
            "title": "Demonstration Course",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let run = api
        .course_runs()
        .create_course_run(CreateCourseRunParams {
            org: "edX".to_string(),
            number: "DemoX".to_string(),
            run: "2T2021".to_string(),
            title: "Demonstration Course".to_string(),
            pacing_type: Some("self_paced".to_string()),
            start: Some(start),
            end: Some(end),
            enrollment_start: None,
            enrollment_end: None,
        })
        .await
        .unwrap();

    assert_eq!(run.course_id.as_deref(), Some("course-v1:edX+DemoX+2T2021"));
}

#[tokio::test]
async fn test_update_course_run_rejects_incomplete_schedule_without_request() {
    let server = MockServer::start().await;
    // No mock mounted: the validation error must fire before any request.

    let api = test_api(&server);
    let error = api
        .course_runs()
        .update_course_run(
            DEMO_COURSE,
            UpdateCourseRunParams {
                start: Some(chrono::Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ApiError::Validation(ValidationError::IncompleteSchedule)
    ));
}

#[tokio::test]
async fn test_clone_course_run() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/course_runs/clone/"))
        .and(body_json(json!({
            "source_course_id": DEMO_COURSE,
            "destination_course_id": "course-v1:edX+DemoX+2T2022",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    tokio_test::assert_ok!(
        api.course_runs()
            .clone_course_run(DEMO_COURSE, "course-v1:edX+DemoX+2T2022")
            .await
    );
}

#[tokio::test]
async fn test_course_runs_list_follows_explicit_page_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/course_runs/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "previous": format!("{}/api/v1/course_runs/", server.uri()),
            "count": 3,
            "num_pages": 2,
            "current_page": 2,
            "results": [{"id": DEMO_COURSE}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let page_url = format!("{}/api/v1/course_runs/?page=2", server.uri());
    let list = api
        .course_runs()
        .get_course_runs_list(Some(&page_url))
        .await
        .unwrap();

    assert_eq!(list.count, 3);
    assert_eq!(list.current_page, 2);
    assert_eq!(list.results.len(), 1);
    assert!(list.next.is_none());
}

// ============================================================================
// CCX
// ============================================================================

#[tokio::test]
async fn test_ccx_create_returns_new_course_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ccx/v0/ccx/"))
        .and(body_json(json!({
            "master_course_id": DEMO_COURSE,
            "coach_email": "coach@example.com",
            "max_students_allowed": 200,
            "display_name": "Custom Demo",
            "course_modules": ["block-v1:edX+DemoX+Demo_Course+type@chapter+block@intro"],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ccx_course_id": "ccx-v1:edX+DemoX+Demo_Course+ccx@1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let ccx_id = api
        .ccx()
        .create(
            DEMO_COURSE,
            "coach@example.com",
            200,
            "Custom Demo",
            Some(&["block-v1:edX+DemoX+Demo_Course+type@chapter+block@intro".to_string()]),
        )
        .await
        .unwrap();

    assert_eq!(ccx_id, "ccx-v1:edX+DemoX+Demo_Course+ccx@1");
}

#[tokio::test]
async fn test_ccx_create_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ccx/v0/ccx/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "coach_email": "Coach does not exist.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let error = api
        .ccx()
        .create(DEMO_COURSE, "ghost@example.com", 10, "Custom Demo", None)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(400));
}

// ============================================================================
// Email Settings
// ============================================================================

#[tokio::test]
async fn test_email_subscribe_posts_form_with_receive_emails_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/change_email_settings"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("receive_emails=on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    assert!(api.email_settings().subscribe(DEMO_COURSE).await.unwrap());
}

#[tokio::test]
async fn test_email_unsubscribe_omits_receive_emails_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/change_email_settings"))
        .and(body_string_contains("course_id="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    assert!(api.email_settings().unsubscribe(DEMO_COURSE).await.unwrap());
}

#[tokio::test]
async fn test_email_settings_failure_degrades_to_false() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/change_email_settings"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "Not enrolled.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    assert!(!api.email_settings().subscribe(DEMO_COURSE).await.unwrap());
}

// ============================================================================
// User Accounts
// ============================================================================

#[tokio::test]
async fn test_get_account_by_username() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/v1/accounts/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "staff",
            "email": "staff@example.com",
            "is_active": true,
            "country": "US",
            "date_joined": "2016-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let account = api.user_info().get_account("staff").await.unwrap();

    assert!(account.is_active);
    assert!(account.date_joined.is_some());
}
