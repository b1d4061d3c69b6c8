//! Backend commands queued from UI to backend worker.

use shared::domain::UserProfile;

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Tags a command so its result can be matched to the screen mount that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone)]
pub enum BackendCommand {
    FetchPopularMovies {
        request: RequestId,
        page: u32,
    },
    LoadProfile {
        request: RequestId,
    },
    SaveProfile {
        request: RequestId,
        profile: UserProfile,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchPopularMovies { .. } => "fetch_popular_movies",
            Self::LoadProfile { .. } => "load_profile",
            Self::SaveProfile { .. } => "save_profile",
        }
    }

    pub fn request(&self) -> RequestId {
        match self {
            Self::FetchPopularMovies { request, .. }
            | Self::LoadProfile { request }
            | Self::SaveProfile { request, .. } => *request,
        }
    }

    pub fn context(&self) -> UiErrorContext {
        match self {
            Self::FetchPopularMovies { .. } => UiErrorContext::LoadCatalog,
            Self::LoadProfile { .. } => UiErrorContext::LoadProfile,
            Self::SaveProfile { .. } => UiErrorContext::SaveProfile,
        }
    }

    /// The event reporting that this command never produced a result.
    pub fn into_failure(self, error: UiError) -> UiEvent {
        match self {
            Self::FetchPopularMovies { request, .. } => UiEvent::MoviesFailed { request, error },
            Self::LoadProfile { request } => UiEvent::ProfileFailed { request, error },
            Self::SaveProfile { request, .. } => UiEvent::ProfileSaveFailed { request, error },
        }
    }
}
