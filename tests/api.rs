use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use siswa::{
    api::{ApiClient, ApiConfig, ApiError},
    features::{
        auth::{self, LoginInput},
        hobby::{self, HobbyInput},
        profile,
        siswa::{self as students, StudentInput},
        users::{self, UserInput},
    },
    session::TokenStore,
    views::dashboard,
};
use std::{net::TcpListener, time::Duration};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "1|plain-text-token";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client(server: &MockServer) -> Result<ApiClient> {
    let config = ApiConfig::new(&format!("{}/api", server.uri()), Duration::from_secs(5))?;
    Ok(ApiClient::new(config)?)
}

fn token() -> SecretString {
    SecretString::from(TOKEN.to_string())
}

fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

fn student_input() -> StudentInput {
    StudentInput {
        name: "Budi Santoso".to_string(),
        phone: "081234567890".to_string(),
        nisns: "0051234567".to_string(),
        hobbies: vec![1],
    }
}

#[tokio::test]
async fn students_list_sends_bearer_and_decodes_success_envelope() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/siswa"))
        .and(header("authorization", bearer().as_str()))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Data siswa",
            "data": [{
                "id": 1,
                "name": "Budi",
                "phone": [{"id": 1, "number_phone": 81234567890_u64}],
                "nisns": [{"id": 1, "nisns": "0051234567"}],
                "hobbies": [{"id": 1, "name": "Futsal"}]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = students::list(&client(&server)?, &token()).await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].first_phone(), Some("81234567890"));
    assert_eq!(list[0].hobby_names(), "Futsal");
    Ok(())
}

#[tokio::test]
async fn unsuccessful_envelope_becomes_rejection() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/hobby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Hobi tidak tersedia"
        })))
        .mount(&server)
        .await;

    let err = hobby::list(&client(&server)?, &token())
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;
    assert!(matches!(err, ApiError::Rejected { .. }));
    assert_eq!(err.to_string(), "Hobi tidak tersedia");
    Ok(())
}

#[tokio::test]
async fn student_conflict_names_the_taken_phone() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/siswa"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "The given data was invalid.",
            "errors": {"phone": ["The phone has already been taken."]}
        })))
        .mount(&server)
        .await;

    let err = students::create(&client(&server)?, &token(), &student_input())
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;
    assert_eq!(
        err.to_string(),
        "Failed to create student: Phone number \"081234567890\" is already taken by another student"
    );
    assert!(err.field_errors().is_some_and(|errors| errors.contains_key("phone")));
    Ok(())
}

#[tokio::test]
async fn invalid_student_never_reaches_the_server() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let input = StudentInput {
        phone: "12".to_string(),
        ..student_input()
    };
    let result = students::create(&client(&server)?, &token(), &input).await;
    assert!(matches!(result, Err(ApiError::Rejected { .. })));
    Ok(())
}

#[tokio::test]
async fn hobby_conflict_keeps_server_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/hobby"))
        .and(body_json(json!({"name": "Futsal"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "The name has already been taken.",
            "errors": {"name": ["The name has already been taken."]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = hobby::create(&client(&server)?, &token(), &HobbyInput::new(" Futsal "))
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "The name has already been taken.");
    assert!(err.field_errors().is_some_and(|errors| errors.contains_key("name")));
    Ok(())
}

#[tokio::test]
async fn user_conflict_keeps_status_envelope_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": "error",
            "message": "The email has already been taken."
        })))
        .mount(&server)
        .await;

    let input = UserInput {
        name: "Siti Aminah".to_string(),
        email: "siti@sekolah.id".to_string(),
        password: Some(SecretString::from("Rahasia123".to_string())),
        password_confirmation: Some(SecretString::from("Rahasia123".to_string())),
    };
    let err = users::create(&client(&server)?, &token(), &input)
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;
    assert_eq!(err.status(), Some(422));
    assert_eq!(
        err.to_string(),
        "Request failed (422): The email has already been taken."
    );
    Ok(())
}

#[tokio::test]
async fn html_server_error_uses_fixed_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/phone"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("<html><body>Whoops</body></html>"),
        )
        .mount(&server)
        .await;

    let err = siswa::features::phone::list(&client(&server)?, &token())
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "Server error. Please try again later.");
    Ok(())
}

#[tokio::test]
async fn users_search_sends_query_and_page() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/search"))
        .and(query_param("query", "budi & co"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "current_page": 2,
                "data": [{"id": 11, "name": "Budi", "email": "budi@sekolah.id"}],
                "per_page": 10,
                "total": 11
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = users::search(&client(&server)?, &token(), " budi & co ", 2).await?;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.pagination.last_page(), 2);
    assert!(!page.pagination.has_next());
    Ok(())
}

#[tokio::test]
async fn unauthorized_status_uses_fixed_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthenticated."
        })))
        .mount(&server)
        .await;

    let err = users::list(&client(&server)?, &token(), 1)
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "Unauthorized access. Please login again.");
    Ok(())
}

#[tokio::test]
async fn profile_delete_sends_password_in_body() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/profile"))
        .and(body_json(json!({"password": "Rahasia123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Account deleted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let password = SecretString::from("Rahasia123".to_string());
    let message = profile::delete_account(&client(&server)?, &token(), &password).await?;
    assert_eq!(message.as_deref(), Some("Account deleted successfully"));
    Ok(())
}

#[tokio::test]
async fn profile_flattens_nested_details() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "id": 1,
                "name": "Admin",
                "email": "admin@sekolah.id",
                "profile": {"alamat": "Jl. Merdeka 1", "kota": null}
            }
        })))
        .mount(&server)
        .await;

    let profile = profile::get(&client(&server)?, &token()).await?;
    assert_eq!(profile.alamat, "Jl. Merdeka 1");
    assert_eq!(profile.kota, "");
    Ok(())
}

#[tokio::test]
async fn login_stores_token() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("token"));

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({
            "email": "Admin@Sekolah.ID",
            "password": "Rahasia123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "token": TOKEN,
                "user": {"id": 1, "name": "Admin", "email": "admin@sekolah.id"}
            }
        })))
        .mount(&server)
        .await;

    let input = LoginInput {
        email: " Admin@Sekolah.ID ".to_string(),
        password: SecretString::from("Rahasia123".to_string()),
    };
    let user = auth::login(&client(&server)?, &store, &input).await?;
    assert_eq!(user.map(|user| user.name), Some("Admin".to_string()));

    let stored = store.get()?.ok_or_else(|| anyhow!("token not stored"))?;
    assert_eq!(stored.expose_secret(), TOKEN);
    Ok(())
}

#[tokio::test]
async fn logout_forgets_token_even_when_server_fails() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("token"));
    store.set(&token())?;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = auth::logout(&client(&server)?, &store).await;
    assert!(result.is_err());
    assert!(store.get()?.is_none());
    Ok(())
}

#[tokio::test]
async fn session_check_drops_rejected_token() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("token"));
    store.set(&token())?;

    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let user = auth::check_session(&client(&server)?, &store).await?;
    assert!(user.is_none());
    assert!(store.get()?.is_none());
    Ok(())
}

#[tokio::test]
async fn session_check_keeps_token_on_server_error() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("token"));
    store.set(&token())?;

    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(auth::check_session(&client(&server)?, &store).await.is_err());
    assert!(store.get()?.is_some());
    Ok(())
}

#[tokio::test]
async fn dashboard_counts_zero_for_failed_sections() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/siswa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 1, "name": "Budi"},
                {"id": 2, "name": "Siti"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hobby"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"current_page": 1, "data": [], "per_page": 10, "total": 0}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"name": "Admin", "email": "admin@sekolah.id"}
        })))
        .mount(&server)
        .await;

    let stats = dashboard::load(&client(&server)?, &token()).await;
    assert_eq!(stats.total_students, 2);
    assert_eq!(stats.total_hobbies, 0);
    assert_eq!(stats.total_users, 0);
    assert_eq!(dashboard::greeting(&stats), "Welcome back, Admin!");
    Ok(())
}
