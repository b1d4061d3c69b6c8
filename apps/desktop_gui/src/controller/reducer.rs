//! Screen state machine: mounting a route issues that screen's one backend
//! request, and results are folded back in only if they answer the latest mount.

use shared::domain::{Movie, UserProfile};
use tracing::debug;

use crate::backend_bridge::commands::{BackendCommand, RequestId};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::navigation::{Navigator, Route};

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Pending,
    Ready(T),
    Failed(UiError),
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&UiError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileForm {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile::singleton(&self.name, &self.email, &self.phone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusSeverity,
    pub message: String,
}

/// User intents collected while drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Navigate(Route),
    Back,
    Retry,
    SubmitProfile,
    DismissStatus,
}

pub struct AppModel {
    navigator: Navigator,
    catalog: LoadState<Vec<Movie>>,
    profile: LoadState<Option<UserProfile>>,
    pub edit_form: ProfileForm,
    page: u32,
    next_request: u64,
    catalog_request: Option<RequestId>,
    profile_request: Option<RequestId>,
    save_request: Option<RequestId>,
    status: Option<StatusBanner>,
}

impl AppModel {
    pub fn new(page: u32) -> Self {
        Self {
            navigator: Navigator::default(),
            catalog: LoadState::Pending,
            profile: LoadState::Pending,
            edit_form: ProfileForm::default(),
            page,
            next_request: 0,
            catalog_request: None,
            profile_request: None,
            save_request: None,
            status: None,
        }
    }

    /// Mounts the initial route.
    pub fn start(&mut self) -> Vec<BackendCommand> {
        self.mount(self.navigator.current())
    }

    pub fn handle(&mut self, action: UiAction) -> Vec<BackendCommand> {
        match action {
            UiAction::Navigate(route) => self.navigate(route),
            UiAction::Back => self.back(),
            UiAction::Retry => self.mount(self.navigator.current()),
            UiAction::SubmitProfile => self.submit_profile(),
            UiAction::DismissStatus => {
                self.status = None;
                Vec::new()
            }
        }
    }

    pub fn navigate(&mut self, route: Route) -> Vec<BackendCommand> {
        self.navigator.navigate(route);
        self.mount(route)
    }

    pub fn back(&mut self) -> Vec<BackendCommand> {
        match self.navigator.back() {
            Some(route) => self.mount(route),
            None => Vec::new(),
        }
    }

    /// Writes the form as the singleton profile, then shows the profile screen.
    /// The save is queued ahead of the profile read, so the read sees it.
    pub fn submit_profile(&mut self) -> Vec<BackendCommand> {
        let request = self.next_request_id();
        self.save_request = Some(request);
        let mut commands = vec![BackendCommand::SaveProfile {
            request,
            profile: self.edit_form.to_profile(),
        }];
        commands.extend(self.navigate(Route::Profile));
        commands
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.set_status(StatusSeverity::Info, message),
            UiEvent::Error(error) => {
                self.set_status(StatusSeverity::Error, error_status(&error));
                if error.context() == UiErrorContext::BackendStartup {
                    self.fail_outstanding(error);
                }
            }
            UiEvent::MoviesLoaded { request, movies } => {
                if self.take_if_current(Slot::Catalog, request) {
                    self.catalog = LoadState::Ready(movies);
                }
            }
            UiEvent::MoviesFailed { request, error } => {
                if self.take_if_current(Slot::Catalog, request) {
                    self.catalog = LoadState::Failed(error);
                }
            }
            UiEvent::ProfileLoaded { request, profile } => {
                if self.take_if_current(Slot::Profile, request) {
                    self.profile = LoadState::Ready(profile);
                }
            }
            UiEvent::ProfileFailed { request, error } => {
                if self.take_if_current(Slot::Profile, request) {
                    self.profile = LoadState::Failed(error);
                }
            }
            UiEvent::ProfileSaved { request, profile } => {
                if self.take_if_current(Slot::Save, request) {
                    self.set_status(
                        StatusSeverity::Info,
                        format!("Saved profile for {}", display_name(&profile)),
                    );
                }
            }
            UiEvent::ProfileSaveFailed { request, error } => {
                if self.take_if_current(Slot::Save, request) {
                    self.set_status(StatusSeverity::Error, error_status(&error));
                }
            }
        }
    }

    /// Folds in the failure for a command the worker never received and
    /// raises it on the status line, since no result will follow.
    pub fn apply_dispatch_failure(&mut self, failure: UiEvent) {
        if let UiEvent::MoviesFailed { error, .. }
        | UiEvent::ProfileFailed { error, .. }
        | UiEvent::ProfileSaveFailed { error, .. } = &failure
        {
            self.set_status(StatusSeverity::Error, error_status(error));
        }
        self.apply(failure);
    }

    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.navigator.can_go_back()
    }

    /// Whether a bottom-nav entry should be drawn as selected.
    pub fn is_selected(&self, route: Route) -> bool {
        self.navigator.current() == route
    }

    pub fn catalog(&self) -> &LoadState<Vec<Movie>> {
        &self.catalog
    }

    /// Movies to list, in response order. Empty unless the fetch completed.
    pub fn catalog_items(&self) -> &[Movie] {
        self.catalog.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn profile(&self) -> &LoadState<Option<UserProfile>> {
        &self.profile
    }

    /// Stored profile, or the placeholder when nothing was saved. `None` while
    /// loading or after a failed read.
    pub fn displayed_profile(&self) -> Option<UserProfile> {
        self.profile
            .ready()
            .map(|stored| stored.clone().unwrap_or_else(UserProfile::placeholder))
    }

    pub fn status(&self) -> Option<&StatusBanner> {
        self.status.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    fn mount(&mut self, route: Route) -> Vec<BackendCommand> {
        debug!(route = route.as_str(), "mount");
        match route {
            Route::Home => {
                let request = self.next_request_id();
                self.catalog = LoadState::Pending;
                self.catalog_request = Some(request);
                vec![BackendCommand::FetchPopularMovies {
                    request,
                    page: self.page,
                }]
            }
            Route::Profile => {
                let request = self.next_request_id();
                self.profile = LoadState::Pending;
                self.profile_request = Some(request);
                vec![BackendCommand::LoadProfile { request }]
            }
            Route::EditProfile => {
                self.edit_form = ProfileForm::default();
                Vec::new()
            }
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn take_if_current(&mut self, slot: Slot, request: RequestId) -> bool {
        let pending = match slot {
            Slot::Catalog => &mut self.catalog_request,
            Slot::Profile => &mut self.profile_request,
            Slot::Save => &mut self.save_request,
        };
        if *pending == Some(request) {
            *pending = None;
            true
        } else {
            debug!(?slot, request = request.0, "ignoring stale result");
            false
        }
    }

    fn fail_outstanding(&mut self, error: UiError) {
        if self.catalog_request.take().is_some() {
            self.catalog = LoadState::Failed(error.clone());
        }
        if self.profile_request.take().is_some() {
            self.profile = LoadState::Failed(error);
        }
        self.save_request = None;
    }

    fn set_status(&mut self, severity: StatusSeverity, message: String) {
        self.status = Some(StatusBanner { severity, message });
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Catalog,
    Profile,
    Save,
}

fn error_status(error: &UiError) -> String {
    format!("{} ({})", error.headline(), error.message())
}

fn display_name(profile: &UserProfile) -> &str {
    if profile.name.trim().is_empty() {
        "(unnamed)"
    } else {
        &profile.name
    }
}
