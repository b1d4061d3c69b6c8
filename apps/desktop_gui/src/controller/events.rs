//! UI/backend events and error modeling for the desktop controller.

use client_core::CatalogError;
use shared::domain::{Movie, UserProfile};

use crate::backend_bridge::commands::RequestId;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    MoviesLoaded {
        request: RequestId,
        movies: Vec<Movie>,
    },
    MoviesFailed {
        request: RequestId,
        error: UiError,
    },
    ProfileLoaded {
        request: RequestId,
        profile: Option<UserProfile>,
    },
    ProfileFailed {
        request: RequestId,
        error: UiError,
    },
    ProfileSaved {
        request: RequestId,
        profile: UserProfile,
    },
    ProfileSaveFailed {
        request: RequestId,
        error: UiError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Service,
    Storage,
    Decode,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadCatalog,
    LoadProfile,
    SaveProfile,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    /// Classifies by the catalog error if one is in the chain, otherwise by context.
    pub fn from_error(context: UiErrorContext, err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        let category = match err.chain().find_map(|e| e.downcast_ref::<CatalogError>()) {
            Some(catalog) => catalog_category(catalog),
            None => match context {
                UiErrorContext::LoadProfile | UiErrorContext::SaveProfile => {
                    UiErrorCategory::Storage
                }
                UiErrorContext::BackendStartup => classify_message(&message)
                    .unwrap_or(UiErrorCategory::Storage),
                _ => classify_message(&message).unwrap_or(UiErrorCategory::Unknown),
            },
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let category = classify_message(&message).unwrap_or(UiErrorCategory::Unknown);
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line explanation shown above the raw message.
    pub fn headline(&self) -> &'static str {
        match (self.category, self.context) {
            (UiErrorCategory::Configuration, _) => {
                "Catalog is not configured; set TMDB_API_KEY or pass --api-key."
            }
            (UiErrorCategory::Auth, _) => "The catalog service rejected the API key.",
            (UiErrorCategory::Service, _) => "The catalog service returned an error; retry later.",
            (UiErrorCategory::Transport, UiErrorContext::LoadCatalog) => {
                "Catalog unreachable; check the network and retry."
            }
            (UiErrorCategory::Transport, UiErrorContext::BackendStartup) => {
                "Backend worker failed to start."
            }
            (UiErrorCategory::Transport, _) => {
                "The background worker did not take the request; retry or restart the app."
            }
            (UiErrorCategory::Decode, _) => "The catalog sent a response that could not be read.",
            (_, UiErrorContext::BackendStartup) => "Backend worker failed to start.",
            (UiErrorCategory::Storage, UiErrorContext::SaveProfile) => "Saving the profile failed.",
            (UiErrorCategory::Storage, _) => "Reading the local profile failed.",
            (UiErrorCategory::Unknown, _) => "Something went wrong.",
        }
    }
}

fn catalog_category(err: &CatalogError) -> UiErrorCategory {
    match err {
        CatalogError::MissingApiKey | CatalogError::InvalidBaseUrl { .. } => {
            UiErrorCategory::Configuration
        }
        CatalogError::Service { .. } if err.is_auth_failure() => UiErrorCategory::Auth,
        CatalogError::Service { .. } => UiErrorCategory::Service,
        CatalogError::Transport(_) => UiErrorCategory::Transport,
        CatalogError::Decode(_) => UiErrorCategory::Decode,
    }
}

fn classify_message(message: &str) -> Option<UiErrorCategory> {
    let lower = message.to_ascii_lowercase();
    if lower.contains("sqlite") || lower.contains("database") || lower.contains("migration") {
        Some(UiErrorCategory::Storage)
    } else if lower.contains("queue")
        || lower.contains("disconnect")
        || lower.contains("connection")
        || lower.contains("timed out")
    {
        Some(UiErrorCategory::Transport)
    } else {
        None
    }
}
