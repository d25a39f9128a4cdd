//! Wires configuration, data sources and pages to subcommands.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ventures_lib::BackendClient;
use ventures_lib::api::{ObjectStore, content_type_for};
use ventures_lib::notify::{Notification, Notifier};
use ventures_table::render_text;

use crate::cli::Commands;
use crate::config::Config;
use crate::dashboard::{DashboardPage, funding};
use crate::demo;
use crate::error::CliError;
use crate::pages::{ApplicationsPage, EngagementsPage, EventsPage, InquiriesPage, Page, Services};
use crate::pages::inquiries::SetInquiryStatus;
use crate::ui;

pub struct App {
    services: Services,
    now: DateTime<Utc>,
}

impl App {
    pub fn new(services: Services, now: DateTime<Utc>) -> Self {
        Self { services, now }
    }

    /// Connects to the configured backend, or to the demo data when no
    /// backend is configured or `demo` is set.
    pub fn connect(config: &Config, demo: bool) -> Result<Self, CliError> {
        let now = Utc::now();
        let services = match &config.remote {
            Some(remote) if !demo => {
                let client = BackendClient::builder()
                    .url(remote.url.as_str())
                    .api_key(remote.api_key.as_str())
                    .timeout(config.timeout)
                    .connect_timeout(config.timeout)
                    .build()?;
                log::info!("Using backend at {}", client.base_url());
                let store = client.bucket(remote.bucket.as_str());
                Services {
                    source: Arc::new(client),
                    store: Arc::new(store),
                    notifier: Notifier::new(),
                }
            }
            _ => {
                log::info!("Using demo data");
                Services {
                    source: Arc::new(demo::source(now)?),
                    store: Arc::new(demo::store()),
                    notifier: Notifier::new(),
                }
            }
        };
        Ok(Self::new(services, now))
    }

    /// Runs one subcommand, then prints any notifications it raised.
    pub async fn run<W: Write>(&self, command: Commands, out: &mut W) -> Result<(), CliError> {
        log::debug!("Running {:?}", command);
        let result = match command {
            Commands::Dashboard => self.dashboard(out).await,
            Commands::Events => self.page(&EventsPage::new()?, out).await,
            Commands::Inquiries => self.page(&InquiriesPage::new()?, out).await,
            Commands::Applications => self.page(&ApplicationsPage::new()?, out).await,
            Commands::Engagements => self.page(&EngagementsPage::new()?, out).await,
            Commands::SetStatus { id, status } => {
                self.set_status(SetInquiryStatus { id, status }, out).await
            }
            Commands::Upload {
                file,
                path,
                application,
            } => self.upload(&file, path, application, out).await,
        };

        ui::notifications(out, &self.services.notifier.drain())?;
        result
    }

    /// Loads and prints a page. A failed load prints the empty page and
    /// raises a notification.
    async fn page<P: Page, W: Write>(&self, page: &P, out: &mut W) -> Result<(), CliError> {
        if let Err(e) = page.load(self.services.source.as_ref()).await {
            self.services
                .notifier
                .push(Notification::error(format!("Could not load {}: {}", page.title(), e)));
        }
        ui::title(out, page.title())?;
        ui::grid(out, &page.render())?;
        Ok(())
    }

    async fn dashboard<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let source = self.services.source.as_ref();
        let dashboard = DashboardPage::new();
        let events = EventsPage::new()?;
        let applications = ApplicationsPage::new()?;

        let (summary, _, _) = futures::join!(
            dashboard.load(source),
            events.load(source),
            applications.load(source),
        );
        if let Err(e) = summary {
            self.services
                .notifier
                .push(Notification::error(format!("Could not load dashboard: {}", e)));
        }

        ui::title(out, "Dashboard")?;
        ui::kpis(out, &dashboard.kpis(self.now))?;

        let heat_map = dashboard.heat_map();
        ui::title(out, "Engagements by stage and month")?;
        ui::grid(out, &render_text(&heat_map.table()?.render(&heat_map.rows)))?;

        ui::title(out, "Funding")?;
        ui::grid(out, &render_text(&funding::table()?.render(&dashboard.funding())))?;

        ui::title(out, events.title())?;
        ui::grid(out, &events.render())?;

        ui::title(out, applications.title())?;
        ui::grid(out, &applications.render())?;
        Ok(())
    }

    async fn set_status<W: Write>(&self, change: SetInquiryStatus, out: &mut W) -> Result<(), CliError> {
        let page = InquiriesPage::new()?;
        page.set_status(self.services.source.as_ref(), &self.services.notifier, change)
            .await?;
        ui::title(out, page.title())?;
        ui::grid(out, &page.render())?;
        Ok(())
    }

    async fn upload<W: Write>(
        &self,
        file: &Path,
        path: Option<String>,
        application: Option<i64>,
        out: &mut W,
    ) -> Result<(), CliError> {
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CliError::Usage(format!("{} is not a file", file.display())))?
            .to_string();
        let bytes = tokio::fs::read(file).await.map_err(|source| CliError::ReadFile {
            path: file.to_path_buf(),
            source,
        })?;
        log::info!("Uploading {} ({} bytes)", file.display(), bytes.len());

        let url = match application {
            Some(id) => {
                let page = ApplicationsPage::new()?;
                page.upload_pitch_deck(
                    self.services.source.as_ref(),
                    self.services.store.as_ref(),
                    &self.services.notifier,
                    id,
                    &file_name,
                    bytes,
                )
                .await?
            }
            None => {
                let path = path.unwrap_or(file_name);
                match self
                    .services
                    .store
                    .upload(&path, bytes, content_type_for(&path))
                    .await
                {
                    Ok(url) => url,
                    Err(e) => {
                        self.services.notifier.push(Notification::upload_failed(&e));
                        return Err(ventures_lib::Error::from(e).into());
                    }
                }
            }
        };

        writeln!(out, "{}", url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use simplelog::LevelFilter;
    use ventures_lib::error::StorageError;
    use ventures_lib::memory::MemoryStore;

    use super::*;
    use crate::config::Remote;
    use crate::model::INQUIRIES;
    use crate::model::InquiryStatus;
    use crate::pages::testing;

    fn app() -> (App, Arc<ventures_lib::memory::MemorySource>, Arc<MemoryStore>) {
        let source = testing::demo_source();
        let store = Arc::new(demo::store());
        let services = testing::services(Arc::clone(&source), Arc::clone(&store));
        (App::new(services, testing::now()), source, store)
    }

    async fn output(app: &App, command: Commands) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let result = app.run(command, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_prints_every_widget() {
        let (app, _, _) = app();
        let (result, text) = output(&app, Commands::Dashboard).await;

        result.unwrap();
        for heading in ["Dashboard", "Engagements by stage and month", "Funding", "Events", "Vendor applications"] {
            assert!(text.contains(heading), "missing {}", heading);
        }
        assert!(text.contains("Committed funding"));
        assert!(text.contains("Demo Day"));
    }

    #[tokio::test]
    async fn test_failed_page_load_prints_placeholder_and_notifies() {
        let (app, source, _) = app();
        source.fail(INQUIRIES, "permission denied");

        let (result, text) = output(&app, Commands::Inquiries).await;

        result.unwrap();
        assert!(text.contains("No vendor inquiries"));
        assert!(text.contains("Could not load Vendor inquiries"));
    }

    #[tokio::test]
    async fn test_set_status_prints_updated_page() {
        let (app, _, _) = app();
        let (result, text) = output(
            &app,
            Commands::SetStatus {
                id: 1,
                status: InquiryStatus::Accepted,
            },
        )
        .await;

        result.unwrap();
        assert!(text.contains("Mark inquiry 1 as accepted"));
        assert!(text.contains("Acme Robotics"));
    }

    #[tokio::test]
    async fn test_upload_to_explicit_path() {
        let dir = std::env::temp_dir().join(format!("ventures-upload-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("notes.txt");
        std::fs::write(&file, b"hello").unwrap();

        let (app, _, store) = app();
        let (result, text) = output(
            &app,
            Commands::Upload {
                file,
                path: Some("shared/notes.txt".into()),
                application: None,
            },
        )
        .await;

        result.unwrap();
        assert_eq!(text.trim(), format!("{}/shared/notes.txt", demo::PUBLIC_BASE));
        assert_eq!(store.object("shared/notes.txt").unwrap().0, "text/plain");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_rejected_upload_reports_storage_message() {
        let dir = std::env::temp_dir().join(format!("ventures-reject-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("deck.pdf");
        std::fs::write(&file, b"%PDF").unwrap();

        let (app, _, store) = app();
        store.reject_next(StorageError::Rejected {
            status: 400,
            message: Some("Bucket not found".into()),
        });
        let (result, text) = output(
            &app,
            Commands::Upload {
                file,
                path: None,
                application: None,
            },
        )
        .await;

        assert!(matches!(result, Err(CliError::Source(ventures_lib::Error::Storage(_)))));
        assert!(text.contains("Bucket not found"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let (app, _, _) = app();
        let (result, _) = output(
            &app,
            Commands::Upload {
                file: "/nonexistent/ventures/deck.pdf".into(),
                path: None,
                application: None,
            },
        )
        .await;

        assert!(matches!(result, Err(CliError::ReadFile { .. })));
    }

    #[test]
    fn test_bad_backend_url_fails_to_connect() {
        let config = Config {
            remote: Some(Remote {
                url: "not a url".into(),
                api_key: "key".into(),
                bucket: "uploads".into(),
            }),
            timeout: Duration::from_secs(5),
            log_level: LevelFilter::Info,
        };

        assert!(matches!(App::connect(&config, false), Err(CliError::Connect(_))));
        assert!(App::connect(&config, true).is_ok());
    }
}
