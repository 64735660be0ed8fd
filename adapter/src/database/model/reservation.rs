use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{Reservation, ReservationRoom, TimeSlot},
};
use shared::error::AppError;

// 予約一覧を取得する際に使う型
// users・rooms テーブルと INNER JOIN した結果を受け取る
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub user_name: String,
    pub room_name: String,
    pub reserved_on: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            room_id,
            user_id,
            user_name,
            room_name,
            reserved_on,
            start_time,
            end_time,
            created_at,
        } = value;
        // スキーマの CHECK 制約により start_time < end_time は保証されているが、
        // 変換としては失敗しうるものとして扱う
        let slot = TimeSlot::new(start_time, end_time)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Reservation {
            reservation_id,
            reserved_by: user_id,
            user_name,
            reserved_on,
            slot,
            created_at,
            room: ReservationRoom { room_id, room_name },
        })
    }
}

// 空き確認で時間帯だけを読むための型
#[derive(sqlx::FromRow)]
pub struct ReservedSlotRow {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TryFrom<ReservedSlotRow> for TimeSlot {
    type Error = AppError;

    fn try_from(value: ReservedSlotRow) -> Result<Self, Self::Error> {
        TimeSlot::new(value.start_time, value.end_time)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_row_converts_into_domain_model() {
        let row = ReservationRow {
            reservation_id: ReservationId::new(),
            room_id: RoomId::new(),
            user_id: UserId::new(),
            user_name: "Test User".into(),
            room_name: "Room A".into(),
            reserved_on: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            created_at: Utc::now(),
        };

        let reservation = Reservation::try_from(row).unwrap();
        assert_eq!(reservation.user_name, "Test User");
        assert_eq!(reservation.room.room_name, "Room A");
        assert_eq!(
            reservation.slot.start_time(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn inverted_slot_row_is_a_conversion_error() {
        let row = ReservedSlotRow {
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        };
        assert!(matches!(
            TimeSlot::try_from(row),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
