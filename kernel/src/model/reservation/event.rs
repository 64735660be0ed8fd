use super::TimeSlot;
use crate::model::id::{RoomId, UserId};
use chrono::NaiveDate;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateReservation {
    pub room_id: RoomId,
    pub reserved_by: UserId,
    pub reserved_on: NaiveDate,
    pub slot: TimeSlot,
}
