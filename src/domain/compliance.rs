use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::detection::Detection;

pub const PERSON: &str = "Person";
pub const HELMET: &str = "helmet";
pub const VEST: &str = "vest";
pub const GOGGLES: &str = "goggles";
pub const NO_HELMET: &str = "no-helmet";
pub const NO_VEST: &str = "no-vest";
pub const NO_GOGGLES: &str = "no-goggles";

pub const NO_DETECTIONS_MESSAGE: &str =
    "Sorry! Model could not detect any object. Please try some other image.";

/// Conteo por etiqueta. Ordenado para que resúmenes y JSON sean deterministas.
pub type ClassCounts = BTreeMap<String, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PpeFinding {
    MissingVest,
    MissingHelmet,
    MissingGoggles,
    WorkersMissingPpe,
}

impl PpeFinding {
    pub fn message(&self) -> &'static str {
        match self {
            PpeFinding::MissingVest => "Missing safety vest.",
            PpeFinding::MissingHelmet => "Missing safety helmet.",
            PpeFinding::MissingGoggles => "Missing safety goggle.",
            PpeFinding::WorkersMissingPpe => "One or more workers are missing PPEs",
        }
    }
}

impl fmt::Display for PpeFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// `None` cuando no hubo ninguna detección.
    pub counts: Option<ClassCounts>,
    pub findings: Vec<PpeFinding>,
    pub message: String,
}

impl ComplianceResult {
    pub fn is_compliant(&self) -> bool {
        self.counts.is_some() && self.findings.is_empty()
    }
}

pub fn count_classes(detections: &[Detection]) -> ClassCounts {
    let mut counts = ClassCounts::new();
    for det in detections {
        *counts.entry(det.class_label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Evalúa el estado de EPP de los trabajadores detectados.
///
/// Las reglas solo se aplican si hay al menos una persona: equipo suelto
/// sin persona no genera avisos.
pub fn evaluate(detections: &[Detection]) -> ComplianceResult {
    if detections.is_empty() {
        return ComplianceResult {
            counts: None,
            findings: Vec::new(),
            message: NO_DETECTIONS_MESSAGE.to_string(),
        };
    }

    let counts = count_classes(detections);
    let count = |label: &str| counts.get(label).copied().unwrap_or(0);

    let mut findings = Vec::new();
    if counts.contains_key(PERSON) {
        let persons = count(PERSON);
        if count(NO_VEST) > 0 {
            findings.push(PpeFinding::MissingVest);
        }
        if count(NO_HELMET) > 0 {
            findings.push(PpeFinding::MissingHelmet);
        }
        if count(NO_GOGGLES) > 0 {
            findings.push(PpeFinding::MissingGoggles);
        }
        if count(HELMET) < persons || count(VEST) < persons || count(GOGGLES) < persons {
            findings.push(PpeFinding::WorkersMissingPpe);
        }
    }

    let message = findings
        .iter()
        .map(PpeFinding::message)
        .collect::<Vec<_>>()
        .join("\n");

    ComplianceResult { counts: Some(counts), findings, message }
}

pub fn summarize(counts: &ClassCounts) -> String {
    counts
        .iter()
        .map(|(label, count)| format!("{} {}", count, label))
        .collect::<Vec<_>>()
        .join(", ")
}
