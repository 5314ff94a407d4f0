//! Domain data: the static dashboard datasets and the chat model.

pub mod chat;
pub mod dashboard;

pub use chat::{
    find_room, format_timestamp, resolve_room, ChatMessage, ChatRoom, MessageLog, RoomId,
    CHAT_ROOMS, DEFAULT_TIME_FORMAT,
};
pub use dashboard::{
    PendingTaskBucket, PerformanceSample, Priority, ProjectOutcome, WorkloadRow, PENDING_TASKS,
    PERFORMANCE, PROJECT_OUTCOMES, WEEKDAYS, WORKLOAD,
};

/// Display name used when no user is configured
pub const DEFAULT_USER_NAME: &str = "Swaathi";

/// Static value of the notification badge in the header
pub const NOTIFICATION_COUNT: u32 = 8;
