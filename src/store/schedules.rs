//! Schedule-specific store operations.

use super::{Action, CrudStore};
use crate::client::segment;
use crate::errors::AppError;
use crate::models::{Schedule, ScheduleChange, ScheduleStatus, SelectSchedule};

impl CrudStore<Schedule> {
    /// Upcoming bookable schedules for the booking form. Does not touch the store.
    pub async fn available_schedules(&self) -> Result<Vec<SelectSchedule>, AppError> {
        self.client.get("/schedules/getSevenCustom").await
    }

    /// Ask the API for a status transition and adopt its copy of the schedule.
    pub async fn update_status(
        &self,
        id: &str,
        status: ScheduleStatus,
    ) -> Result<Schedule, AppError> {
        let path = format!(
            "/schedules/updateStatus/{}?status={}",
            segment(id)?,
            status.as_str()
        );
        let schedule: Schedule = self.client.put_empty(&path).await?;
        self.store.dispatch(Action::Change {
            key: id.to_string(),
            change: ScheduleChange::StatusUpdated(schedule.clone()),
        });
        Ok(schedule)
    }
}
