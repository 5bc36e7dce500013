mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{employee_fields, TestApp, TestFile};

#[tokio::test]
async fn create_and_fetch_employee() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;

    let res = app
        .multipart(
            Method::POST,
            "/api/v1/employees",
            &employee_fields("asha@corp.com"),
            Some(TestFile::png()),
            &token,
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "Employee created successfully");

    let created = &res.body["data"];
    assert_eq!(created["email"], "asha@corp.com");
    assert_eq!(created["designation"], "manager");
    assert_eq!(created["image"]["public_id"], "assignment/img1");

    let id = created["id"].as_str().unwrap_or_default();
    let res = app.get(&format!("/api/v1/employees/{}", id), Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Employee retrieved successfully");
    assert_eq!(res.body["data"]["id"], created["id"]);
    Ok(())
}

#[tokio::test]
async fn create_names_the_missing_field() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;

    let fields: Vec<_> = employee_fields("asha@corp.com")
        .into_iter()
        .filter(|(name, _)| *name != "mobile")
        .collect();
    let res = app
        .multipart(Method::POST, "/api/v1/employees", &fields, Some(TestFile::png()), &token)
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Mobile number is required!");
    assert_eq!(res.body["field"], "mobile");
    assert!(app.employees.is_empty().await);
    assert!(app.images.uploaded().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_checks_the_image() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let fields = employee_fields("asha@corp.com");

    let res = app
        .multipart(Method::POST, "/api/v1/employees", &fields, None, &token)
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Image file is required!");

    let res = app
        .multipart(Method::POST, "/api/v1/employees", &fields, Some(TestFile::gif()), &token)
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Only JPEG or PNG formats are allowed.");

    let oversized = TestFile {
        file_name: "photo.jpg",
        content_type: "image/jpeg",
        bytes: vec![0; 5 * 1024 * 1024 + 1],
    };
    let res = app
        .multipart(Method::POST, "/api/v1/employees", &fields, Some(oversized), &token)
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Image size must not exceed 5MB.");

    assert!(app.employees.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    app.create_employee(&token, "a@b.com").await?;

    let res = app
        .multipart(
            Method::POST,
            "/api/v1/employees",
            &employee_fields("a@b.com"),
            Some(TestFile::png()),
            &token,
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Employee already exists");
    assert_eq!(res.body["code"], "DUPLICATE");
    assert_eq!(app.employees.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    app.create_employee(&token, "first@corp.com").await?;
    app.create_employee(&token, "second@corp.com").await?;

    let res = app.get("/api/v1/employees", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Employees retrieved successfully");
    let data = res.body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["email"], "second@corp.com");
    assert_eq!(data[1]["email"], "first@corp.com");
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;

    let uri = format!("/api/v1/employees/{}", uuid::Uuid::new_v4());
    let res = app.get(&uri, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Employee not found");

    let res = app.get("/api/v1/employees/not-a-uuid", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .json(Method::PUT, &uri, json!({ "name": "Someone" }), Some(&token))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn json_update_changes_only_given_fields() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());

    let res = app
        .json(
            Method::PUT,
            &uri,
            json!({ "course": "bsc", "mobile": "+1 5550001111", "unknown": true }),
            Some(&token),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Employee updated successfully");
    assert_eq!(res.body["data"]["course"], "bsc");
    assert_eq!(res.body["data"]["mobile"], "+1 5550001111");
    assert_eq!(res.body["data"]["name"], employee["name"]);
    assert_eq!(res.body["data"]["image"], employee["image"]);
    Ok(())
}

#[tokio::test]
async fn update_requires_a_field() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());

    let res = app.json(Method::PUT, &uri, json!({}), Some(&token)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "At least one field must be provided for update!");

    let res = app
        .json(Method::PUT, &uri, json!({ "designation": "ceo" }), Some(&token))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["error"],
        "Designation must be one of 'hr', 'manager', or 'sales'!"
    );
    Ok(())
}

#[tokio::test]
async fn update_rejects_taken_email_even_its_own() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());

    let res = app
        .json(Method::PUT, &uri, json!({ "email": "a@b.com" }), Some(&token))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Employee email already exists");
    Ok(())
}

#[tokio::test]
async fn image_replacement_deletes_the_old_asset() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());
    let p1 = employee["image"]["public_id"].as_str().unwrap_or_default().to_string();

    let res = app
        .multipart(
            Method::PUT,
            &uri,
            &[("public_id", p1.as_str())],
            Some(TestFile::png()),
            &token,
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["image"]["public_id"], "assignment/img2");
    assert_eq!(app.images.deleted().await, vec![p1]);
    Ok(())
}

#[tokio::test]
async fn untouched_file_input_counts_as_no_image() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());
    let p1 = employee["image"]["public_id"].as_str().unwrap_or_default().to_string();

    let res = app
        .multipart(
            Method::PUT,
            &uri,
            &[("public_id", p1.as_str()), ("name", "Changed Name")],
            Some(TestFile::untouched_input()),
            &token,
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["name"], "Changed Name");
    assert_eq!(res.body["data"]["image"], employee["image"]);
    assert_eq!(app.images.uploaded().await.len(), 1);
    assert!(app.images.deleted().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_upload_leaves_record_unchanged() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());
    let p1 = employee["image"]["public_id"].as_str().unwrap_or_default().to_string();

    app.images.fail_uploads(true);
    let res = app
        .multipart(
            Method::PUT,
            &uri,
            &[("public_id", p1.as_str()), ("name", "Changed Name")],
            Some(TestFile::png()),
            &token,
        )
        .await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.images.deleted().await.is_empty());

    let res = app.get(&uri, Some(&token)).await?;
    assert_eq!(res.body["data"]["name"], employee["name"]);
    assert_eq!(res.body["data"]["image"], employee["image"]);
    Ok(())
}

#[tokio::test]
async fn delete_needs_public_id() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());

    let res = app.json(Method::DELETE, &uri, json!({}), Some(&token)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "public_id is required");
    assert_eq!(app.employees.len().await, 1);
    assert!(app.images.deleted().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_removes_record_then_image() -> Result<()> {
    let app = TestApp::new();
    let token = app.access_token().await?;
    let employee = app.create_employee(&token, "a@b.com").await?;
    let uri = format!("/api/v1/employees/{}", employee["id"].as_str().unwrap_or_default());
    let public_id = employee["image"]["public_id"].clone();

    let res = app
        .json(Method::DELETE, &uri, json!({ "public_id": public_id }), Some(&token))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Employee deleted successfully");
    assert!(app.employees.is_empty().await);
    assert_eq!(app.images.deleted().await, vec!["assignment/img1".to_string()]);

    let res = app
        .json(Method::DELETE, &uri, json!({ "public_id": public_id }), Some(&token))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
