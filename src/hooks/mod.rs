//! Application state container and the store access hooks.
//!
//! `AppState` is built once and handed to whatever needs the stores. A store
//! that was never provided cannot be used: its hook fails with
//! [`AppError::MissingProvider`], which is a programming error, not something
//! to show a user.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::auth::AuthSignal;
use crate::client::HttpClient;
use crate::config::Config;
use crate::contacts::ContactService;
use crate::errors::AppError;
use crate::models::{Booking, Feedback, Patient, Schedule};
use crate::store::{CrudStore, PatientLogStore};
use crate::upload::PhotoUploader;

pub type PatientStore = CrudStore<Patient>;
pub type ScheduleStore = CrudStore<Schedule>;
pub type BookingStore = CrudStore<Booking>;
pub type FeedbackStore = CrudStore<Feedback>;

/// Everything the console shares: the API client, the auth signal and the
/// provided stores.
#[derive(Clone)]
pub struct AppState {
    pub client: HttpClient,
    pub auth: AuthSignal,
    patients: Option<Arc<PatientStore>>,
    schedules: Option<Arc<ScheduleStore>>,
    bookings: Option<Arc<BookingStore>>,
    patient_logs: Option<Arc<PatientLogStore>>,
    feedback: Option<Arc<FeedbackStore>>,
    /// Shared by clones so the load tasks start at most once.
    started: Arc<AtomicBool>,
}

impl AppState {
    /// Build the client from configuration and provide every store.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = HttpClient::new(config)?;
        Ok(Self::bare(client, AuthSignal::new())
            .with_patients()
            .with_schedules()
            .with_bookings()
            .with_patient_logs()
            .with_feedback())
    }

    /// State with no stores provided.
    pub fn bare(client: HttpClient, auth: AuthSignal) -> Self {
        Self {
            client,
            auth,
            patients: None,
            schedules: None,
            bookings: None,
            patient_logs: None,
            feedback: None,
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_patients(mut self) -> Self {
        self.patients = Some(Arc::new(CrudStore::new(self.client.clone(), "patients")));
        self
    }

    pub fn with_schedules(mut self) -> Self {
        self.schedules = Some(Arc::new(CrudStore::new(self.client.clone(), "schedules")));
        self
    }

    pub fn with_bookings(mut self) -> Self {
        self.bookings = Some(Arc::new(CrudStore::new(self.client.clone(), "bookings")));
        self
    }

    pub fn with_patient_logs(mut self) -> Self {
        self.patient_logs = Some(Arc::new(PatientLogStore::new(self.client.clone())));
        self
    }

    pub fn with_feedback(mut self) -> Self {
        self.feedback = Some(Arc::new(CrudStore::new(self.client.clone(), "feedback")));
        self
    }

    /// Start the initial-load tasks of every provided auth-gated store.
    ///
    /// Each store watches the auth signal on its own; none triggers another.
    /// Only the first call (across clones) spawns anything; later calls
    /// return no handles.
    pub fn start(&self) -> Vec<JoinHandle<()>> {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::warn!("Initial-load tasks already started");
            return Vec::new();
        }
        let mut tasks = Vec::new();
        if let Some(store) = &self.patients {
            tasks.push(store.load_on_sign_in(&self.auth));
        }
        if let Some(store) = &self.schedules {
            tasks.push(store.load_on_sign_in(&self.auth));
        }
        if let Some(store) = &self.bookings {
            tasks.push(store.load_on_sign_in(&self.auth));
        }
        if let Some(store) = &self.feedback {
            tasks.push(store.load_on_sign_in(&self.auth));
        }
        tracing::debug!("Started {} initial-load tasks", tasks.len());
        tasks
    }

    /// Contact messages are not store-backed; always available.
    pub fn contacts(&self) -> ContactService {
        ContactService::new(self.client.clone())
    }
}

pub fn use_patients(state: &AppState) -> Result<Arc<PatientStore>, AppError> {
    state
        .patients
        .clone()
        .ok_or(AppError::MissingProvider(
            "use_patients must be used within a PatientProvider",
        ))
}

pub fn use_schedules(state: &AppState) -> Result<Arc<ScheduleStore>, AppError> {
    state
        .schedules
        .clone()
        .ok_or(AppError::MissingProvider(
            "use_schedules must be used within a ScheduleProvider",
        ))
}

pub fn use_bookings(state: &AppState) -> Result<Arc<BookingStore>, AppError> {
    state
        .bookings
        .clone()
        .ok_or(AppError::MissingProvider(
            "use_bookings must be used within a BookingProvider",
        ))
}

pub fn use_patient_logs(state: &AppState) -> Result<Arc<PatientLogStore>, AppError> {
    state
        .patient_logs
        .clone()
        .ok_or(AppError::MissingProvider(
            "use_patient_logs must be used within a PatientLogProvider",
        ))
}

pub fn use_feedback(state: &AppState) -> Result<Arc<FeedbackStore>, AppError> {
    state
        .feedback
        .clone()
        .ok_or(AppError::MissingProvider(
            "use_feedback must be used within a FeedbackProvider",
        ))
}

/// The photo uploader needs the log store to register what it uploads.
pub fn use_photo_uploader(state: &AppState) -> Result<PhotoUploader, AppError> {
    let logs = use_patient_logs(state)?;
    Ok(PhotoUploader::new(state.client.clone(), logs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpClient {
        HttpClient::new(&Config::with_base_url("http://localhost:8080/api")).unwrap()
    }

    #[test]
    fn test_full_state_provides_every_store() {
        let state = AppState::new(&Config::with_base_url("http://localhost:8080/api")).unwrap();
        assert!(use_patients(&state).is_ok());
        assert!(use_schedules(&state).is_ok());
        assert!(use_bookings(&state).is_ok());
        assert!(use_patient_logs(&state).is_ok());
        assert!(use_feedback(&state).is_ok());
        assert!(use_photo_uploader(&state).is_ok());
    }

    #[test]
    fn test_missing_provider_fails_fast() {
        let state = AppState::bare(client(), AuthSignal::new()).with_patients();
        assert!(use_patients(&state).is_ok());

        let err = use_schedules(&state).err().unwrap();
        assert!(matches!(err, AppError::MissingProvider(_)));
        assert!(err.to_string().contains("ScheduleProvider"));

        assert!(matches!(
            use_photo_uploader(&state).err().unwrap(),
            AppError::MissingProvider(_)
        ));
    }

    #[tokio::test]
    async fn test_start_spawns_load_tasks_once() {
        let state = AppState::bare(client(), AuthSignal::new())
            .with_patients()
            .with_feedback();

        assert_eq!(state.start().len(), 2);
        assert!(state.start().is_empty());
        assert!(state.clone().start().is_empty());
    }

    #[test]
    fn test_hooks_share_one_store() {
        let state = AppState::bare(client(), AuthSignal::new()).with_bookings();
        let a = use_bookings(&state).unwrap();
        let b = use_bookings(&state.clone()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
