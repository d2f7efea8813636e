use claims::{assert_err, assert_ok};
use facefinder::AppError;
use facefinder::app::App;
use facefinder::cli::{CollectionAction, Command, ResourceAction, SearchAction};
use facefinder::config::{ConfigLoadResult, load_config};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod flow_helpers {
    use super::*;

    pub struct Workspace {
        pub dir: TempDir,
        pub server: MockServer,
    }

    impl Workspace {
        pub async fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
                server: MockServer::start().await,
            }
        }

        pub fn credentials_file(&self) -> PathBuf {
            self.dir.path().join("auth.json")
        }

        /// Writes a config file pointing at the mock server and builds the app from it.
        pub fn app(&self) -> App {
            let config_path = self.dir.path().join("config.toml");
            std::fs::write(
                &config_path,
                format!(
                    r#"
                    locale = "en"

                    [api]
                    base_url = "{}"
                    timeout_secs = 5

                    [auth]
                    credentials_file = "{}"
                    "#,
                    self.server.uri(),
                    self.credentials_file().display()
                ),
            )
            .unwrap();

            let ConfigLoadResult::Success(config) = load_config(Some(&config_path)) else {
                panic!("test config should load");
            };
            assert_ok!(config.validate());
            App::new(&config).unwrap()
        }

        pub async fn mount_login(&self) {
            Mock::given(method("POST"))
                .and(path("/api/auth/login"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "token": "session-token",
                    "expires_at": "2099-12-31T23:59:59Z"
                })))
                .mount(&self.server)
                .await;
        }
    }

    pub fn login_command() -> Command {
        Command::Login {
            email: "ana@example.com".to_string(),
            password: "segredo1".to_string(),
        }
    }
}

use flow_helpers::*;

mod sessions {
    use super::*;

    #[tokio::test]
    async fn test_login_persists_session_for_next_run() {
        let ws = Workspace::new().await;
        ws.mount_login().await;

        let first = ws.app();
        assert_ok!(first.run(login_command()).await);
        assert!(ws.credentials_file().exists());

        // A fresh process restores the session from disk
        let second = ws.app();
        assert!(second.auth().is_authenticated().await);
        assert_eq!(
            second.auth().user().await.and_then(|u| u.email).as_deref(),
            Some("ana@example.com")
        );
    }

    #[tokio::test]
    async fn test_invalid_login_never_reaches_backend() {
        let ws = Workspace::new().await;
        let app = ws.app();

        let err = assert_err!(
            app.run(Command::Login {
                email: "ana".to_string(),
                password: "123".to_string(),
            })
            .await
        );
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(ws.server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_logout_removes_persisted_session() {
        let ws = Workspace::new().await;
        ws.mount_login().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("authorization", "Bearer session-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Logout realizado com sucesso"})),
            )
            .expect(1)
            .mount(&ws.server)
            .await;

        let app = ws.app();
        assert_ok!(app.run(login_command()).await);
        assert_ok!(app.run(Command::Logout).await);
        assert!(!ws.credentials_file().exists());
    }
}

mod resources {
    use super::*;

    #[tokio::test]
    async fn test_rejected_session_redirects_to_login() {
        let ws = Workspace::new().await;
        ws.mount_login().await;
        Mock::given(method("GET"))
            .and(path("/api/collections/list"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "Token inválido"
            })))
            .mount(&ws.server)
            .await;

        let app = ws.app();
        assert_ok!(app.run(login_command()).await);

        let err = assert_err!(
            app.run(Command::Collections {
                action: CollectionAction::Record(ResourceAction::List),
            })
            .await
        );
        assert!(err.is_unauthorized());
        assert!(app.navigation().take_login_redirect());
        assert_eq!(app.navigation().current().as_deref(), Some("/login"));
        assert!(!ws.credentials_file().exists());
    }

    #[tokio::test]
    async fn test_delete_refused_while_processing() {
        let ws = Workspace::new().await;
        ws.mount_login().await;
        Mock::given(method("GET"))
            .and(path("/api/collections/show/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "Casamento",
                "status": 1,
                "photo_quantity": 300
            })))
            .mount(&ws.server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/collections/delete/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&ws.server)
            .await;

        let app = ws.app();
        assert_ok!(app.run(login_command()).await);

        let err = assert_err!(
            app.run(Command::Collections {
                action: CollectionAction::Record(ResourceAction::Delete { id: 5 }),
            })
            .await
        );
        assert!(matches!(err, AppError::NotAllowed(_)));
    }

    #[tokio::test]
    async fn test_delete_allowed_when_completed() {
        let ws = Workspace::new().await;
        ws.mount_login().await;
        Mock::given(method("GET"))
            .and(path("/api/searches/show/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2,
                "name": "Procurando Ana",
                "tolerance_level": 60,
                "collections": [5],
                "status": 2
            })))
            .mount(&ws.server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/searches/delete/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&ws.server)
            .await;

        let app = ws.app();
        assert_ok!(app.run(login_command()).await);
        assert_ok!(
            app.run(Command::Searches {
                action: SearchAction::Record(ResourceAction::Delete { id: 2 }),
            })
            .await
        );
    }
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn test_create_collection() {
        let ws = Workspace::new().await;
        ws.mount_login().await;
        Mock::given(method("POST"))
            .and(path("/api/collections/create"))
            .and(body_json(json!({"name": "Casamento"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9,
                "name": "Casamento",
                "status": 0,
                "photo_quantity": 0
            })))
            .expect(1)
            .mount(&ws.server)
            .await;

        let app = ws.app();
        assert_ok!(app.run(login_command()).await);
        assert_ok!(
            app.run(Command::Collections {
                action: CollectionAction::Create {
                    name: "  Casamento ".to_string(),
                },
            })
            .await
        );
    }

    #[tokio::test]
    async fn test_create_search_uploads_photo() {
        let ws = Workspace::new().await;
        ws.mount_login().await;
        Mock::given(method("POST"))
            .and(path("/api/searches/create"))
            .and(header("authorization", "Bearer session-token"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4,
                "name": "Procurando Ana",
                "tolerance_level": 70,
                "collections": [9],
                "status": 0
            })))
            .expect(1)
            .mount(&ws.server)
            .await;

        let photo = ws.dir.path().join("ana.png");
        std::fs::write(&photo, b"\x89PNG fake").unwrap();

        let app = ws.app();
        assert_ok!(app.run(login_command()).await);
        assert_ok!(
            app.run(Command::Searches {
                action: SearchAction::Create {
                    name: "Procurando Ana".to_string(),
                    photo,
                    tolerance: 70,
                    collections: vec![9],
                },
            })
            .await
        );
    }

    #[tokio::test]
    async fn test_missing_photo_never_reaches_backend() {
        let ws = Workspace::new().await;
        ws.mount_login().await;

        let app = ws.app();
        assert_ok!(app.run(login_command()).await);

        let err = assert_err!(
            app.run(Command::Searches {
                action: SearchAction::Create {
                    name: "Procurando Ana".to_string(),
                    photo: ws.dir.path().join("missing.jpg"),
                    tolerance: 70,
                    collections: vec![9],
                },
            })
            .await
        );
        assert!(matches!(err, AppError::Api(_)));
        assert!(err.user_message().contains("missing.jpg"));

        let received = ws.server.received_requests().await.unwrap();
        assert!(received.iter().all(|r| r.url.path() != "/api/searches/create"));
    }
}
