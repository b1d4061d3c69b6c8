//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{ClientHandle, PopularClient, Settings};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let client = match PopularClient::connect(&settings).await {
                Ok(client) => client,
                Err(err) => {
                    error!("backend worker startup failure: {err:#}");
                    let _ = ui_tx.send(UiEvent::Error(UiError::from_error(
                        UiErrorContext::BackendStartup,
                        &err,
                    )));
                    return;
                }
            };
            if settings.api_key.is_none() {
                warn!("no catalog API key configured; catalog requests will fail");
                let _ = ui_tx.send(UiEvent::Info(
                    "No catalog API key configured; set TMDB_API_KEY or pass --api-key".to_string(),
                ));
            }
            info!("backend worker ready");

            serve(&client, &cmd_rx, &ui_tx).await;
            info!("backend worker stopped");
        });
    })
}

/// Processes commands one at a time, in queue order, until either side hangs up.
pub async fn serve(
    client: &dyn ClientHandle,
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let event = handle_command(client, cmd).await;
        if ui_tx.send(event).is_err() {
            break;
        }
    }
}

pub async fn handle_command(client: &dyn ClientHandle, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchPopularMovies { request, page } => {
            match client.popular_movies(page).await {
                Ok(response) => UiEvent::MoviesLoaded {
                    request,
                    movies: response.results,
                },
                Err(err) => {
                    warn!(request = request.0, "catalog fetch failed: {err:#}");
                    UiEvent::MoviesFailed {
                        request,
                        error: UiError::from_error(UiErrorContext::LoadCatalog, &err),
                    }
                }
            }
        }
        BackendCommand::LoadProfile { request } => match client.load_profile().await {
            Ok(profile) => UiEvent::ProfileLoaded { request, profile },
            Err(err) => {
                warn!(request = request.0, "profile read failed: {err:#}");
                UiEvent::ProfileFailed {
                    request,
                    error: UiError::from_error(UiErrorContext::LoadProfile, &err),
                }
            }
        },
        BackendCommand::SaveProfile { request, profile } => {
            match client.save_profile(&profile).await {
                Ok(()) => UiEvent::ProfileSaved { request, profile },
                Err(err) => {
                    warn!(request = request.0, "profile save failed: {err:#}");
                    UiEvent::ProfileSaveFailed {
                        request,
                        error: UiError::from_error(UiErrorContext::SaveProfile, &err),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use client_core::{CatalogError, MovieCatalog};
    use crossbeam_channel::bounded;
    use shared::domain::{Movie, MovieId, MovieResponse, UserProfile};
    use storage::MemoryStore;

    use crate::backend_bridge::commands::RequestId;
    use crate::controller::events::UiErrorCategory;
    use crate::controller::navigation::Route;
    use crate::controller::reducer::AppModel;

    struct StaticCatalog(Vec<Movie>);

    #[async_trait]
    impl MovieCatalog for StaticCatalog {
        async fn get_popular_movies(
            &self,
            _api_key: &str,
            _page: u32,
        ) -> Result<MovieResponse, CatalogError> {
            Ok(MovieResponse {
                results: self.0.clone(),
            })
        }
    }

    fn client(api_key: Option<&str>, movies: Vec<Movie>) -> PopularClient {
        PopularClient::new(
            Arc::new(StaticCatalog(movies)),
            Arc::new(MemoryStore::new()),
            api_key.map(str::to_string),
        )
    }

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id: MovieId(id),
            title: title.to_string(),
            overview: String::new(),
        }
    }

    #[tokio::test]
    async fn fetch_command_yields_movies() {
        let client = client(Some("k"), vec![movie(1, "A"), movie(2, "B")]);
        let event = handle_command(
            &client,
            BackendCommand::FetchPopularMovies {
                request: RequestId(1),
                page: 1,
            },
        )
        .await;
        match event {
            UiEvent::MoviesLoaded { request, movies } => {
                assert_eq!(request, RequestId(1));
                assert_eq!(movies.len(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_key_yields_configuration_failure() {
        let client = client(None, Vec::new());
        let event = handle_command(
            &client,
            BackendCommand::FetchPopularMovies {
                request: RequestId(5),
                page: 1,
            },
        )
        .await;
        match event {
            UiEvent::MoviesFailed { request, error } => {
                assert_eq!(request, RequestId(5));
                assert_eq!(error.category(), UiErrorCategory::Configuration);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    /// Drives the model through catalog -> profile -> edit -> save -> profile
    /// against a worker-equivalent FIFO loop.
    #[tokio::test]
    async fn save_flow_shows_saved_values_on_profile() {
        let client = client(Some("k"), vec![movie(10, "Ten")]);
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(16);
        let mut model = AppModel::new(1);

        let mut queue = model.start();
        queue.extend(model.navigate(Route::Profile));
        queue.extend(model.navigate(Route::EditProfile));
        model.edit_form.name = "Dorothy".to_string();
        model.edit_form.email = "dorothy@example.com".to_string();
        model.edit_form.phone = "555-0123".to_string();
        queue.extend(model.submit_profile());

        for cmd in queue {
            cmd_tx.send(cmd).expect("queue");
        }
        drop(cmd_tx);
        serve(&client, &cmd_rx, &ui_tx).await;
        drop(ui_tx);

        for event in ui_rx.iter() {
            model.apply(event);
        }

        assert_eq!(model.current_route(), Route::Profile);
        assert_eq!(
            model.displayed_profile(),
            Some(UserProfile::singleton(
                "Dorothy",
                "dorothy@example.com",
                "555-0123"
            ))
        );
        assert_eq!(model.catalog_items().len(), 1);
    }
}
