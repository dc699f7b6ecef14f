pub mod error;
pub mod middleware;
pub mod health;
pub mod bookings;
pub mod invoices;
pub mod workspaces;
pub mod members;
pub mod inquiries;
pub mod day_passes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppState;

pub use bookings::booking_routes;
pub use day_passes::day_pass_routes;
pub use health::health_routes;
pub use inquiries::inquiry_routes;
pub use invoices::invoice_routes;
pub use members::member_routes;
pub use workspaces::workspace_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(booking_routes())
        .merge(invoice_routes())
        .merge(workspace_routes())
        .merge(member_routes())
        .merge(inquiry_routes())
        .merge(day_pass_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::UserRole;
    use crate::test_support::{caller, caller_for, token_for, TestStore};

    async fn send(store: &TestStore, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = create_router(store.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    fn booking_body(workspace_id: &str, method: &str) -> Value {
        json!({
            "fullName": "Amit Sharma",
            "email": "amit@startup.co",
            "contactNumber": "+91 98765 43210",
            "firmName": "Startup Co",
            "duration": "1 month",
            "startDate": crate::test_support::today(),
            "workspaceId": workspace_id,
            "workspaceName": "Private Suite",
            "paymentMethod": method
        })
    }

    #[tokio::test]
    async fn test_health() {
        let store = TestStore::new();
        let (status, body) = send(&store, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_pay_now_booking_over_http() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        let member = store.member("amit@startup.co", UserRole::Member).await;
        let token = token_for(&caller_for(&member));

        let (status, body) = send(
            &store,
            Method::POST,
            "/api/bookings",
            Some(&token),
            Some(booking_body(&workspace.id.to_string(), "Pay Now")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["booking"]["status"], "Confirmed");
        assert_eq!(body["booking"]["paymentStatus"], "Paid");
        assert_eq!(body["booking"]["totalAmount"], 10_000);
        assert_eq!(body["invoice"]["status"], "Paid");
        assert_eq!(body["invoice"]["userId"], member.id().to_string());
        assert!(body["invoice"]["dueDate"].is_null());

        let (status, mine) = send(&store, Method::GET, "/api/workspaces/my-workspace", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["id"], workspace.id.to_string());
        assert_eq!(mine["allotment"]["allottedTo"]["id"], member.id().to_string());
        assert_eq!(mine["allotment"]["allottedTo"]["email"], "amit@startup.co");
    }

    #[tokio::test]
    async fn test_second_pay_now_booking_conflicts() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        store.member("amit@startup.co", UserRole::Member).await;
        let body = booking_body(&workspace.id.to_string(), "Pay Now");

        let (first, _) = send(&store, Method::POST, "/api/bookings", None, Some(body.clone())).await;
        let (second, error) = send(&store, Method::POST, "/api/bookings", None, Some(body)).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert!(error["message"].as_str().unwrap().contains("already allotted"));
    }

    #[tokio::test]
    async fn test_booking_validation_and_missing_workspace() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;

        let mut body = booking_body(&workspace.id.to_string(), "Pay Later");
        body.as_object_mut().unwrap().remove("contactNumber");
        let (status, error) = send(&store, Method::POST, "/api/bookings", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Contact number is required");

        let ghost = crate::domain::WorkspaceId::new().to_string();
        let (status, error) = send(&store, Method::POST, "/api/bookings", None, Some(booking_body(&ghost, "Pay Later"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["message"], "Workspace not found");

        let admin = token_for(&caller("admin@cohort.com", UserRole::Admin));
        let (_, bookings) = send(&store, Method::GET, "/api/bookings", Some(&admin), None).await;
        assert_eq!(bookings.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_body_gets_a_json_error() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;

        let mut body = booking_body(&workspace.id.to_string(), "Pay Now");
        body["contactNumber"] = json!(9876543210u64);
        let (status, error) = send(&store, Method::POST, "/api/bookings", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["message"].as_str().unwrap().starts_with("Invalid request body"));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/bookings")
            .body(Body::from("{\"fullName\": "))
            .unwrap();
        let response = create_router(store.state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(error["message"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_token_on_public_booking_route_is_401() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;

        let (status, error) = send(
            &store,
            Method::POST,
            "/api/bookings",
            Some("not-a-jwt"),
            Some(booking_body(&workspace.id.to_string(), "Pay Later")),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error["message"], "Not authorized, token failed");
    }

    #[tokio::test]
    async fn test_listing_requires_a_token_and_is_scoped() {
        let store = TestStore::new();
        let workspace = store.workspace("Open Workstation", 5_999.0).await;
        send(&store, Method::POST, "/api/bookings", None, Some(booking_body(&workspace.id.to_string(), "Pay Later"))).await;

        let (status, error) = send(&store, Method::GET, "/api/invoices", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error["message"], "Not authorized, no token");

        let stranger = token_for(&caller("sneha@designhub.in", UserRole::Member));
        let (_, invoices) = send(&store, Method::GET, "/api/invoices", Some(&stranger), None).await;
        assert!(invoices.as_array().unwrap().is_empty());

        let owner = token_for(&caller("amit@startup.co", UserRole::Member));
        let (_, invoices) = send(&store, Method::GET, "/api/invoices", Some(&owner), None).await;
        assert_eq!(invoices.as_array().unwrap().len(), 1);
        assert_eq!(invoices[0]["status"], "Pending");
        assert!(invoices[0]["booking"]["id"].is_string());
    }

    #[tokio::test]
    async fn test_status_update_is_admin_only_and_checked() {
        let store = TestStore::new();
        let workspace = store.workspace("Open Workstation", 5_999.0).await;
        let (_, created) = send(&store, Method::POST, "/api/bookings", None, Some(booking_body(&workspace.id.to_string(), "Pay Later"))).await;
        let uri = format!("/api/bookings/{}/status", created["booking"]["id"].as_str().unwrap());

        let member = token_for(&caller("amit@startup.co", UserRole::Member));
        let (status, error) = send(&store, Method::PUT, &uri, Some(&member), Some(json!({"status": "Confirmed"}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error["message"], "Not authorized as an admin");

        let admin = token_for(&caller("admin@cohort.com", UserRole::Admin));
        let (status, body) = send(&store, Method::PUT, &uri, Some(&admin), Some(json!({"status": "Completed"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Cannot change booking status from Awaiting Payment to Completed");

        let (status, body) = send(&store, Method::PUT, &uri, Some(&admin), Some(json!({"status": "Confirmed"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Confirmed");
    }

    #[tokio::test]
    async fn test_day_pass_flow_over_http() {
        let store = TestStore::new();
        let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let (status, pass) = send(
            &store,
            Method::POST,
            "/api/daypass",
            None,
            Some(json!({
                "name": "Sneha Reddy",
                "email": "sneha@designhub.in",
                "contact": "9876543210",
                "purpose": "Client meeting",
                "visitDate": today
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/daypass/verify/{}", pass["passCode"].as_str().unwrap());

        let member = token_for(&caller("amit@startup.co", UserRole::Member));
        let (status, _) = send(&store, Method::GET, &uri, Some(&member), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let desk = token_for(&caller("desk@cohort.com", UserRole::Authenticator));
        let (status, verified) = send(&store, Method::GET, &uri, Some(&desk), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(verified["status"], "Used");

        let (status, error) = send(&store, Method::GET, &uri, Some(&desk), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "This pass has already been used");
    }

    #[tokio::test]
    async fn test_workspace_catalogue_over_http() {
        let store = TestStore::new();
        let admin = token_for(&caller("admin@cohort.com", UserRole::Admin));

        let (status, created) = send(
            &store,
            Method::POST,
            "/api/workspaces",
            Some(&admin),
            Some(json!({
                "name": "Executive Meeting Room",
                "location": "Whitefields, Kondapur",
                "type": "Meeting Room",
                "capacity": "12 people",
                "basePrice": 1500,
                "features": {"hasConferenceHall": true}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["type"], "Meeting Room");
        assert_eq!(created["features"]["hasConferenceHall"], true);

        let (status, listed) = send(&store, Method::GET, "/api/workspaces", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let uri = format!("/api/workspaces/{}", created["id"].as_str().unwrap());
        let (status, removed) = send(&store, Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["message"], "Workspace removed");

        let (status, _) = send(&store, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profile_over_http() {
        let store = TestStore::new();
        let amit = store.member("amit@startup.co", UserRole::Member).await;
        let token = token_for(&caller_for(&amit));

        let (status, _) = send(&store, Method::GET, "/api/users/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, me) = send(&store, Method::GET, "/api/users/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "amit@startup.co");

        let (status, me) = send(
            &store,
            Method::PUT,
            "/api/users/profile",
            Some(&token),
            Some(json!({"organization": "Startup Co", "role": "Admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["organization"], "Startup Co");
        assert_eq!(me["role"], "Member");
    }

    #[tokio::test]
    async fn test_stats_over_http() {
        let store = TestStore::new();
        store.member("amit@startup.co", UserRole::Member).await;
        send(
            &store,
            Method::POST,
            "/api/requests/contact",
            None,
            Some(json!({"name": "Priya", "email": "priya@example.com", "subject": "Hi", "message": "Hello"})),
        )
        .await;

        let admin = token_for(&caller("admin@cohort.com", UserRole::Admin));
        let (status, stats) = send(&store, Method::GET, "/api/requests/stats", Some(&admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["totalUsers"], 1);
        assert_eq!(stats["activeAllotments"], 0);
    }
}
