use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::Reservation,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub room_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub user_id: UserId,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_by,
            user_name,
            reserved_on,
            slot,
            created_at,
            room,
        } = value;
        Self {
            id: reservation_id,
            room_id: room.room_id,
            room_name: room.room_name,
            date: reserved_on,
            start_time: slot.start_time(),
            end_time: slot.end_time(),
            user_id: reserved_by,
            user_name,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::reservation::{ReservationRoom, TimeSlot};

    #[test]
    fn create_request_deserializes_date_and_times() {
        let req: CreateReservationRequest = serde_json::from_str(
            r#"{"date":"2026-08-10","startTime":"09:00:00","endTime":"10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2026, 8, 10).unwrap());
        assert_eq!(req.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(req.end_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn response_flattens_slot_and_room() {
        let reservation = Reservation {
            reservation_id: ReservationId::new(),
            reserved_by: UserId::new(),
            user_name: "Test User".into(),
            reserved_on: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            slot: TimeSlot::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            )
            .unwrap(),
            created_at: Utc::now(),
            room: ReservationRoom {
                room_id: RoomId::new(),
                room_name: "Room A".into(),
            },
        };

        let res = ReservationResponse::from(reservation);
        let body = serde_json::to_value(&res).unwrap();
        assert_eq!(body["roomName"], "Room A");
        assert_eq!(body["startTime"], "09:00:00");
        assert_eq!(body["endTime"], "10:00:00");
        assert_eq!(body["date"], "2026-08-10");
    }
}
