use serde::{Deserialize, Serialize};

use circuitbg_core::{BBox, Pass};

/// Type of clearance violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A gutter primitive reaches into the content column.
    ContentIntrusion,
    /// A primitive lies entirely off-screen.
    OutOfViewport,
    /// A wide layout that does not finish with the hero fade.
    UnmaskedHeroBand,
}

impl ViolationType {
    pub fn severity(&self) -> Severity {
        match self {
            ViolationType::ContentIntrusion => Severity::Error,
            ViolationType::OutOfViewport | ViolationType::UnmaskedHeroBand => Severity::Warning,
        }
    }
}

/// Severity level of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// A single violation with location and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearanceViolation {
    pub violation_type: ViolationType,
    pub severity: Severity,
    pub message: String,
    /// Pass that emitted the offending primitive, if the violation has one.
    pub pass: Option<Pass>,
    /// Region of the violation.
    pub bbox: BBox,
    /// Indices of the plan items involved.
    pub plan_indices: Vec<usize>,
}

impl ClearanceViolation {
    pub fn new(violation_type: ViolationType, message: impl Into<String>, bbox: BBox) -> Self {
        Self {
            violation_type,
            severity: violation_type.severity(),
            message: message.into(),
            pass: None,
            bbox,
            plan_indices: Vec::new(),
        }
    }

    pub fn at_item(mut self, plan_index: usize, pass: Pass) -> Self {
        self.plan_indices.push(plan_index);
        self.pass = Some(pass);
        self
    }
}

/// Result of checking one plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrcReport {
    pub violations: Vec<ClearanceViolation>,
}

impl DrcReport {
    pub fn errors(&self) -> impl Iterator<Item = &ClearanceViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ClearanceViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count(&self, violation_type: ViolationType) -> usize {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .count()
    }
}
