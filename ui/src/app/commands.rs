use super::{App, output};
use crate::cli::{CollectionAction, Command, ResourceAction, SearchAction};
use crate::error::{AppError, AppResult};
use crate::forms::{CollectionForm, LoginForm, RegisterForm, SearchForm};
use crate::router::RouteMatch;
use client::http::PhotoUpload;
use client::model::{Collection, ResourceKind, Search};
use client::model::status::status_display;
use client::validation::{ValidationRecord, ValidationReport, ValidationSchema, Validator};
use std::process::ExitCode;

impl App {
    /// Executes one command, printing its result to stdout.
    ///
    /// `validate` exits with failure when the record is rejected; every
    /// other command fails only through its error.
    pub async fn run(&self, command: Command) -> AppResult<ExitCode> {
        match command {
            Command::Login { email, password } => {
                self.sessions.login(LoginForm { email, password }).await?;
                println!("{}", output::session(&self.sessions.status().await));
            }
            Command::Register {
                username,
                email,
                password,
                password_confirmation,
            } => {
                let form = RegisterForm {
                    username,
                    email,
                    password,
                    password_confirmation,
                };
                self.sessions.register(form).await?;
                println!("{}", output::session(&self.sessions.status().await));
            }
            Command::Logout => {
                self.sessions.logout().await?;
                println!("Signed out.");
            }
            Command::Status => {
                println!("{}", output::session(&self.sessions.status().await));
            }
            Command::Collections {
                action: CollectionAction::Record(action),
            } => {
                self.run_resource(ResourceKind::Collections, action).await?;
            }
            Command::Collections {
                action: CollectionAction::Create { name },
            } => {
                let collection = self.create_collection(CollectionForm { name }).await?;
                println!("{}", serde_json::to_string_pretty(&collection)?);
            }
            Command::Searches {
                action: SearchAction::Record(action),
            } => {
                self.run_resource(ResourceKind::Searches, action).await?;
            }
            Command::Searches {
                action:
                    SearchAction::Create {
                        name,
                        photo,
                        tolerance,
                        collections,
                    },
            } => {
                let form = SearchForm {
                    name,
                    photo,
                    tolerance_level: tolerance,
                    collections,
                };
                let search = self.create_search(form).await?;
                println!("{}", serde_json::to_string_pretty(&search)?);
            }
            Command::Validate { schema, record } => {
                let report = self.validate_documents(&schema, &record)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
                if !report.status {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Routes => {
                print!("{}", output::routes(&self.routes));
            }
            Command::Route { path } => {
                println!("{}", output::route_match(&self.resolve_route(&path)?));
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    /// Fails with [`AppError::SignedOut`] and moves to the login route when
    /// there is no valid session.
    async fn require_session(&self) -> AppResult<()> {
        if self.auth.is_authenticated().await {
            return Ok(());
        }
        self.navigation.redirect_to_login();
        Err(AppError::SignedOut)
    }

    async fn run_resource(&self, kind: ResourceKind, action: ResourceAction) -> AppResult<()> {
        self.require_session().await?;

        match (kind, action) {
            (ResourceKind::Collections, ResourceAction::List) => {
                print!("{}", output::collections(&self.api.list_collections().await?));
            }
            (ResourceKind::Searches, ResourceAction::List) => {
                print!("{}", output::searches(&self.api.list_searches().await?));
            }
            (ResourceKind::Collections, ResourceAction::Show { id }) => {
                let collection = self.api.show_collection(id).await?;
                let display = status_display(kind, collection.status);
                println!("{}", serde_json::to_string_pretty(&collection)?);
                println!("{}: {}", display.title, display.description);
            }
            (ResourceKind::Searches, ResourceAction::Show { id }) => {
                let search = self.api.show_search(id).await?;
                println!("{}", serde_json::to_string_pretty(&search)?);
                if let Some(status) = search.status {
                    let display = status_display(kind, status);
                    println!("{}: {}", display.title, display.description);
                }
            }
            (kind, ResourceAction::Delete { id }) => {
                self.ensure_deletable(kind, id).await?;
                self.api.delete_record(kind, id).await?;
                println!("Deleted {kind} {id}.");
            }
        }
        Ok(())
    }

    pub async fn create_collection(&self, form: CollectionForm) -> AppResult<Collection> {
        self.require_session().await?;
        let report = form.validate(self.locale)?;
        if !report.status {
            return Err(AppError::InvalidInput(report));
        }
        Ok(self.api.create_collection(&form.into_request()).await?)
    }

    /// Validates the form, reads the photo and starts the search.
    pub async fn create_search(&self, form: SearchForm) -> AppResult<Search> {
        self.require_session().await?;
        let report = form.validate(self.locale)?;
        if !report.status {
            return Err(AppError::InvalidInput(report));
        }
        let (request, photo) = form.into_request();
        let photo = PhotoUpload::read(&photo).await?;
        Ok(self.api.create_search(&request, photo).await?)
    }

    /// Deletion is only offered for statuses whose display allows it.
    async fn ensure_deletable(&self, kind: ResourceKind, id: i64) -> AppResult<()> {
        let status = match kind {
            ResourceKind::Collections => self.api.show_collection(id).await?.status,
            ResourceKind::Searches => self.api.show_search(id).await?.status.unwrap_or_default(),
        };
        let display = status_display(kind, status);
        if display.show_delete {
            Ok(())
        } else {
            Err(AppError::NotAllowed(format!(
                "{kind} {id} cannot be deleted while '{}'.",
                display.title
            )))
        }
    }

    /// Compiles `schema` and checks `record` against it.
    ///
    /// Both arguments are JSON text, or `@path` to read the JSON from a file.
    pub fn validate_documents(&self, schema: &str, record: &str) -> AppResult<ValidationReport> {
        let schema = ValidationSchema::from_json(&read_document(schema)?)?;
        let record: ValidationRecord = serde_json::from_str(&read_document(record)?)?;
        Ok(Validator::new(record, schema)
            .with_locale(self.locale)
            .validate())
    }

    pub fn resolve_route(&self, path: &str) -> AppResult<RouteMatch> {
        self.routes
            .resolve(path)
            .ok_or_else(|| AppError::Route(path.to_string()))
    }
}

fn read_document(argument: &str) -> AppResult<String> {
    match argument.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {path}: {e}"))),
        None => Ok(argument.to_string()),
    }
}
