use crate::model::id::{ReservationId, RoomId, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use shared::error::{AppError, AppResult};

pub mod event;

#[derive(Debug)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub user_name: String,
    pub reserved_on: NaiveDate,
    pub slot: TimeSlot,
    pub created_at: DateTime<Utc>,
    pub room: ReservationRoom,
}

#[derive(Debug)]
pub struct ReservationRoom {
    pub room_id: RoomId,
    pub room_name: String,
}

// 予約時間帯。[start_time, end_time) の半開区間として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl TimeSlot {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> AppResult<Self> {
        if end_time <= start_time {
            return Err(AppError::InvalidTimeSlot(
                "終了時刻は開始時刻より後である必要があります。".into(),
            ));
        }
        Ok(Self {
            start_time,
            end_time,
        })
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    // 重複条件：
    //     self.start < other.end AND other.start < self.end
    // 端点が一致するだけ（9:00-10:00 と 10:00-11:00 など）の場合は重複ではない
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn slot(start: (u32, u32), end: (u32, u32)) -> TimeSlot {
        TimeSlot::new(t(start.0, start.1), t(end.0, end.1)).unwrap()
    }

    #[test]
    fn end_must_be_after_start() {
        assert!(matches!(
            TimeSlot::new(t(10, 0), t(9, 0)),
            Err(AppError::InvalidTimeSlot(_))
        ));
        assert!(matches!(
            TimeSlot::new(t(10, 0), t(10, 0)),
            Err(AppError::InvalidTimeSlot(_))
        ));
    }

    #[rstest]
    // 端点が接するだけなら予約可能
    #[case(slot((9, 0), (10, 0)), slot((10, 0), (11, 0)), false)]
    #[case(slot((10, 0), (11, 0)), slot((9, 0), (10, 0)), false)]
    // 一部でも重なれば衝突
    #[case(slot((9, 0), (10, 0)), slot((9, 30), (10, 30)), true)]
    #[case(slot((9, 30), (10, 30)), slot((9, 0), (10, 0)), true)]
    // 包含・一致も衝突
    #[case(slot((9, 0), (12, 0)), slot((10, 0), (11, 0)), true)]
    #[case(slot((9, 0), (10, 0)), slot((9, 0), (10, 0)), true)]
    // 離れていれば衝突しない
    #[case(slot((9, 0), (10, 0)), slot((13, 0), (14, 0)), false)]
    fn overlap_is_half_open_and_symmetric(
        #[case] a: TimeSlot,
        #[case] b: TimeSlot,
        #[case] expected: bool,
    ) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }
}
