//! Taxonomy enums for classified corridor observations.
//!
//! Labels match the wire/storage form exactly ("RPI", "Enforced", "UK", ...):
//! serde and SQLite both round-trip through `label()`/`parse()`, so a value
//! written by one layer is always readable by the others.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// One of the three independently tracked signal indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    /// Regulatory Pressure Index.
    #[serde(rename = "RPI")]
    Rpi,
    /// Logistics Stress Index.
    #[serde(rename = "LSI")]
    Lsi,
    /// Cost Pressure Index.
    #[serde(rename = "CPI")]
    Cpi,
}

impl IndexKind {
    /// All indexes, in roll-up order.
    pub const ALL: [IndexKind; 3] = [IndexKind::Rpi, IndexKind::Lsi, IndexKind::Cpi];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rpi => "RPI",
            Self::Lsi => "LSI",
            Self::Cpi => "CPI",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RPI" => Some(Self::Rpi),
            "LSI" => Some(Self::Lsi),
            "CPI" => Some(Self::Cpi),
            _ => None,
        }
    }
}

/// Provenance layer of the source that produced an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTier {
    Primary,
    Logistics,
    Market,
    Industry,
}

impl SourceTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Logistics => "Logistics",
            Self::Market => "Market",
            Self::Industry => "Industry",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Primary" => Some(Self::Primary),
            "Logistics" => Some(Self::Logistics),
            "Market" => Some(Self::Market),
            "Industry" => Some(Self::Industry),
            _ => None,
        }
    }
}

/// Lifecycle stage of the event behind an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Draft,
    Announced,
    Enforced,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Announced => "Announced",
            Self::Enforced => "Enforced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Draft" => Some(Self::Draft),
            "Announced" => Some(Self::Announced),
            "Enforced" => Some(Self::Enforced),
            _ => None,
        }
    }
}

/// Analyst confidence in the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Jurisdiction an observation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "UK")]
    Uk,
    India,
    Vietnam,
    Egypt,
    Bilateral,
}

impl Jurisdiction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uk => "UK",
            Self::India => "India",
            Self::Vietnam => "Vietnam",
            Self::Egypt => "Egypt",
            Self::Bilateral => "Bilateral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UK" => Some(Self::Uk),
            "India" => Some(Self::India),
            "Vietnam" => Some(Self::Vietnam),
            "Egypt" => Some(Self::Egypt),
            "Bilateral" => Some(Self::Bilateral),
            _ => None,
        }
    }
}

/// Coarse three-level corridor health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "STABLE")]
    Stable,
    #[serde(rename = "WATCH")]
    Watch,
    #[serde(rename = "ACTIVE")]
    Active,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Watch => "WATCH",
            Self::Active => "ACTIVE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STABLE" => Some(Self::Stable),
            "WATCH" => Some(Self::Watch),
            "ACTIVE" => Some(Self::Active),
            _ => None,
        }
    }
}

// ─── SQLite TEXT round-trip via label()/parse() ─────────────────────────────

macro_rules! impl_text_sql {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl ToSql for $ty {
                fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                    Ok(ToSqlOutput::from(self.label()))
                }
            }

            impl FromSql for $ty {
                fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                    let s = value.as_str()?;
                    $ty::parse(s).ok_or_else(|| {
                        FromSqlError::Other(
                            format!(concat!("unknown ", stringify!($ty), " label: {}"), s).into(),
                        )
                    })
                }
            }
        )+
    };
}

impl_text_sql!(IndexKind, SourceTier, EventStatus, Confidence, Jurisdiction, HealthStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parse() {
        for idx in IndexKind::ALL {
            assert_eq!(IndexKind::parse(idx.label()), Some(idx));
        }
        for tier in [
            SourceTier::Primary,
            SourceTier::Logistics,
            SourceTier::Market,
            SourceTier::Industry,
        ] {
            assert_eq!(SourceTier::parse(tier.label()), Some(tier));
        }
        for status in [HealthStatus::Stable, HealthStatus::Watch, HealthStatus::Active] {
            assert_eq!(HealthStatus::parse(status.label()), Some(status));
        }
    }

    #[test]
    fn unknown_labels_parse_to_none() {
        assert_eq!(IndexKind::parse("GDP"), None);
        assert_eq!(EventStatus::parse(""), None);
        assert_eq!(Jurisdiction::parse("uk"), None);
    }
}
