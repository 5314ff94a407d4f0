//! Static datasets behind the dashboard cards

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn title(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingTaskBucket {
    pub priority: Priority,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceSample {
    pub month: &'static str,
    /// 0..=100
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkloadRow {
    pub team: &'static str,
    /// Monday through Friday
    pub days: [u32; 5],
}

/// Success and failure are pre-normalized percentages. They are expected to
/// add up to 100 but nothing checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectOutcome {
    pub name: &'static str,
    pub success: u8,
    pub failure: u8,
}

pub const WEEKDAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

pub const PENDING_TASKS: [PendingTaskBucket; 3] = [
    PendingTaskBucket {
        priority: Priority::High,
        count: 12,
    },
    PendingTaskBucket {
        priority: Priority::Medium,
        count: 24,
    },
    PendingTaskBucket {
        priority: Priority::Low,
        count: 8,
    },
];

pub const PERFORMANCE: [PerformanceSample; 5] = [
    PerformanceSample { month: "Jan", score: 76 },
    PerformanceSample { month: "Feb", score: 82 },
    PerformanceSample { month: "Mar", score: 78 },
    PerformanceSample { month: "Apr", score: 84 },
    PerformanceSample { month: "May", score: 90 },
];

pub const WORKLOAD: [WorkloadRow; 4] = [
    WorkloadRow {
        team: "Engineering",
        days: [8, 9, 10, 7, 6],
    },
    WorkloadRow {
        team: "Design",
        days: [6, 8, 5, 9, 7],
    },
    WorkloadRow {
        team: "Marketing",
        days: [5, 4, 7, 8, 9],
    },
    WorkloadRow {
        team: "Product",
        days: [9, 7, 6, 5, 8],
    },
];

pub const PROJECT_OUTCOMES: [ProjectOutcome; 4] = [
    ProjectOutcome {
        name: "Alpha",
        success: 85,
        failure: 15,
    },
    ProjectOutcome {
        name: "Beta",
        success: 65,
        failure: 35,
    },
    ProjectOutcome {
        name: "Gamma",
        success: 92,
        failure: 8,
    },
    ProjectOutcome {
        name: "Delta",
        success: 78,
        failure: 22,
    },
];
