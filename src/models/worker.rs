use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolStatus {
    #[default]
    Operational,
    InUse,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Operational => "Operational",
            ToolStatus::InUse => "In Use",
        }
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub status: ToolStatus,
}

impl Tool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ToolStatus::Operational,
        }
    }

    pub fn use_tool(&mut self) {
        self.status = ToolStatus::InUse;
    }

    pub fn repair(&mut self) {
        self.status = ToolStatus::Operational;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub date: NaiveDate,
    pub tool: Tool,
    pub completed: bool,
}

impl Task {
    pub fn new(description: impl Into<String>, date: NaiveDate, tool: Tool) -> Self {
        Self {
            description: description.into(),
            date,
            tool,
            completed: false,
        }
    }

    pub fn complete(&mut self) {
        self.completed = true;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalClearance {
    pub issued_on: NaiveDate,
    pub valid_until: NaiveDate,
    pub notes: String,
}

impl MedicalClearance {
    pub fn new(issued_on: NaiveDate, valid_until: NaiveDate, notes: impl Into<String>) -> Self {
        Self {
            issued_on,
            valid_until,
            notes: notes.into(),
        }
    }

    /// Validity is inclusive of the expiry day.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        date <= self.valid_until
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub name: String,
    pub dni: String,
    pub age: u32,
    pub medical_clearance: Option<MedicalClearance>,
    pub tasks: Vec<Task>,
}

impl Worker {
    pub fn new(name: impl Into<String>, dni: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            dni: dni.into(),
            age,
            medical_clearance: None,
            tasks: Vec::new(),
        }
    }

    pub fn assign_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn assign_medical_clearance(&mut self, clearance: MedicalClearance) {
        self.medical_clearance = Some(clearance);
    }

    pub fn is_fit_for_work(&self, date: NaiveDate) -> bool {
        self.medical_clearance
            .as_ref()
            .is_some_and(|c| c.is_valid_on(date))
    }

    pub fn pending_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }
}
