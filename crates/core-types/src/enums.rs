use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Revenue class of a product within the analysed dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl AbcClass {
    pub const ALL: [AbcClass; 3] = [AbcClass::A, AbcClass::B, AbcClass::C];

    /// Classifies a cumulative revenue share against the A and B upper bounds.
    ///
    /// Both bounds are inclusive on the lower class, so a share of exactly
    /// `a_upper` is still `A`. An undefined share (zero total revenue) is `C`.
    pub fn from_share(share: Option<Decimal>, a_upper: Decimal, b_upper: Decimal) -> Self {
        match share {
            Some(s) if s <= a_upper => AbcClass::A,
            Some(s) if s <= b_upper => AbcClass::B,
            _ => AbcClass::C,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        }
    }
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbcClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(AbcClass::A),
            "B" | "b" => Ok(AbcClass::B),
            "C" | "c" => Ok(AbcClass::C),
            other => Err(CoreError::UnknownLabel("ABC class", other.to_string())),
        }
    }
}

/// Turnover versus margin quadrant, relative to the dataset medians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategicStatus {
    /// High turnover, high margin.
    Estrela,
    /// High turnover, low margin.
    BoiLeiteiro,
    /// Low turnover, high margin.
    Problema,
    /// Low turnover, low margin.
    Mico,
}

impl StrategicStatus {
    pub fn from_quadrant(high_turnover: bool, high_margin: bool) -> Self {
        match (high_turnover, high_margin) {
            (true, true) => StrategicStatus::Estrela,
            (true, false) => StrategicStatus::BoiLeiteiro,
            (false, true) => StrategicStatus::Problema,
            (false, false) => StrategicStatus::Mico,
        }
    }

    /// Short label, used in exported files.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategicStatus::Estrela => "Estrela",
            StrategicStatus::BoiLeiteiro => "BoiLeiteiro",
            StrategicStatus::Problema => "Problema",
            StrategicStatus::Mico => "Mico",
        }
    }

    /// Human-readable label shown in reports.
    pub fn description(&self) -> &'static str {
        match self {
            StrategicStatus::Estrela => "Estrela (Alto Giro/Alta Margem)",
            StrategicStatus::BoiLeiteiro => "Boi Leiteiro (Alto Giro/Baixa Margem)",
            StrategicStatus::Problema => "Problema (Baixo Giro/Alta Margem)",
            StrategicStatus::Mico => "Mico (Baixo Giro/Baixa Margem)",
        }
    }
}

impl fmt::Display for StrategicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategicStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Estrela" => Ok(StrategicStatus::Estrela),
            "BoiLeiteiro" | "Boi Leiteiro" => Ok(StrategicStatus::BoiLeiteiro),
            "Problema" => Ok(StrategicStatus::Problema),
            "Mico" => Ok(StrategicStatus::Mico),
            other => Err(CoreError::UnknownLabel("strategic status", other.to_string())),
        }
    }
}
