//! # Rate Query Module
//!
//! ## Aim
//! Builds the concentration+temperature snapshot body posted to the rates and
//! plots endpoints, decodes the numeric reply against the active session and
//! renders it as text. Decoding is positional: progress rates are indexed like
//! the session equation list, reaction rates like the species list, exactly in
//! the order returned at session creation.
//!
//! ## Main Data Structures
//! - `build_rate_body` / `parse_temperature`: request construction and validation
//! - `RateSnapshot`: decoded reply tagged with the session it was issued for
//! - `RateReport`: per-reaction and per-species text lines plus pretty tables

use super::kinetics_service_api::{RatesWire, ServiceError};
use super::mechanism_session::MechanismSession;
use prettytable::{Cell, Row, Table};
use serde_json::{Map, Value, json};

/// key under which the temperature rides in the same JSON object as the
/// concentrations; species names coming from a mechanism never start with '_'
pub const TEMPERATURE_KEY: &str = "_temp";

/// temperature is absolute, so anything non-numeric or not strictly positive
/// is rejected before the network is touched
pub fn parse_temperature(raw: &str) -> Result<f64, ServiceError> {
    match raw.trim().parse::<f64>() {
        Ok(t) if t.is_finite() && t > 0.0 => Ok(t),
        _ => Err(ServiceError::InvalidTemperature),
    }
}

/// Snapshot body shared by the rates and plots endpoints: one key per species
/// plus the `_temp` key, so exactly `species.len() + 1` keys total.
pub fn build_rate_body(concentrations: &[(String, f64)], temperature: f64) -> Value {
    let mut map = Map::new();
    for (name, value) in concentrations {
        map.insert(name.clone(), json!(*value));
    }
    map.insert(TEMPERATURE_KEY.to_string(), json!(temperature));
    Value::Object(map)
}

/// One decoded rates reply. Carries the id of the session it was decoded
/// against so a reply that outlives its session can be recognized and dropped.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub session_id: String,
    /// rate of advancement per reaction, indexed like the equation list
    pub progress_rates: Vec<f64>,
    /// net production/consumption per species, indexed like the species list
    pub reaction_rates: Vec<f64>,
    /// rate constants per reaction, when the server sends them
    pub ks: Option<Vec<f64>>,
}

impl RateSnapshot {
    /// Positional decoding against the session lists. A length disagreement
    /// (or an echoed species list in a different order) means the reply cannot
    /// be attributed to this session, so nothing of it is rendered.
    pub fn decode(wire: RatesWire, session: &MechanismSession) -> Result<Self, ServiceError> {
        if wire.progress_rates.len() != session.equations.len() {
            return Err(ServiceError::BadReply(format!(
                "got {} progress rates for {} reactions",
                wire.progress_rates.len(),
                session.equations.len()
            )));
        }
        if wire.reaction_rates.len() != session.species.len() {
            return Err(ServiceError::BadReply(format!(
                "got {} reaction rates for {} species",
                wire.reaction_rates.len(),
                session.species.len()
            )));
        }
        if let Some(echoed) = &wire.species {
            if echoed != &session.species {
                return Err(ServiceError::BadReply(
                    "species list in reply differs from the session".to_string(),
                ));
            }
        }
        if let Some(ks) = &wire.ks {
            if ks.len() != session.equations.len() {
                return Err(ServiceError::BadReply(format!(
                    "got {} rate constants for {} reactions",
                    ks.len(),
                    session.equations.len()
                )));
            }
        }
        Ok(Self {
            session_id: session.id.clone(),
            progress_rates: wire.progress_rates,
            reaction_rates: wire.reaction_rates,
            ks: wire.ks,
        })
    }
}

/// Human-readable rendering of one snapshot: a line per reaction pairing its
/// progress rate with the equation text, a line per species pairing its
/// reaction rate with the name.
#[derive(Debug, Clone)]
pub struct RateReport {
    progress: Vec<(String, f64)>,
    reaction: Vec<(String, f64)>,
    ks: Option<Vec<(String, f64)>>,
}

impl RateReport {
    pub fn new(session: &MechanismSession, snapshot: &RateSnapshot) -> Self {
        let progress = session
            .equations
            .iter()
            .cloned()
            .zip(snapshot.progress_rates.iter().copied())
            .collect();
        let reaction = session
            .species
            .iter()
            .cloned()
            .zip(snapshot.reaction_rates.iter().copied())
            .collect();
        let ks = snapshot.ks.as_ref().map(|ks| {
            session
                .equations
                .iter()
                .cloned()
                .zip(ks.iter().copied())
                .collect()
        });
        Self {
            progress,
            reaction,
            ks,
        }
    }

    pub fn progress_lines(&self) -> Vec<String> {
        self.progress
            .iter()
            .enumerate()
            .map(|(i, (equation, rate))| format!("Reaction {}: {} / {}", i, rate, equation))
            .collect()
    }

    pub fn reaction_lines(&self) -> Vec<String> {
        self.reaction
            .iter()
            .map(|(species, rate)| format!("{}: {}", species, rate))
            .collect()
    }

    pub fn pretty_print(&self) {
        let mut progress_table = Table::new();
        let mut header = vec![
            Cell::new("#"),
            Cell::new("equation"),
            Cell::new("progress rate"),
        ];
        if self.ks.is_some() {
            header.push(Cell::new("k"));
        }
        progress_table.add_row(Row::new(header));
        for (i, (equation, rate)) in self.progress.iter().enumerate() {
            let mut row = vec![
                Cell::new(&i.to_string()),
                Cell::new(equation),
                Cell::new(&rate.to_string()),
            ];
            if let Some(ks) = &self.ks {
                row.push(Cell::new(&ks[i].1.to_string()));
            }
            progress_table.add_row(Row::new(row));
        }
        progress_table.printstd();

        let mut reaction_table = Table::new();
        reaction_table.add_row(Row::new(vec![
            Cell::new("species"),
            Cell::new("reaction rate"),
        ]));
        for (species, rate) in &self.reaction {
            reaction_table.add_row(Row::new(vec![
                Cell::new(species),
                Cell::new(&rate.to_string()),
            ]));
        }
        reaction_table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demo_session() -> MechanismSession {
        MechanismSession {
            id: "abc123".to_string(),
            species: vec!["OH".to_string(), "H2O".to_string()],
            equations: vec!["OH+H2 -> H2O+H".to_string()],
        }
    }

    #[test]
    fn test_parse_temperature() {
        assert_relative_eq!(parse_temperature("1000").unwrap(), 1000.0);
        assert_relative_eq!(parse_temperature(" 298.15 ").unwrap(), 298.15);
        assert!(matches!(
            parse_temperature("-5"),
            Err(ServiceError::InvalidTemperature)
        ));
        assert!(matches!(
            parse_temperature("0"),
            Err(ServiceError::InvalidTemperature)
        ));
        assert!(matches!(
            parse_temperature("warm"),
            Err(ServiceError::InvalidTemperature)
        ));
    }

    #[test]
    fn test_body_has_one_key_per_species_plus_temp() {
        let concentrations = vec![
            ("OH".to_string(), 10.0),
            ("H2O".to_string(), 5.0),
            ("O2".to_string(), 0.0),
        ];
        let body = build_rate_body(&concentrations, 1000.0);
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), concentrations.len() + 1);
        assert_relative_eq!(object["OH"].as_f64().unwrap(), 10.0);
        assert_relative_eq!(object[TEMPERATURE_KEY].as_f64().unwrap(), 1000.0);
    }

    #[test]
    fn test_decode_checks_lengths() {
        let session = demo_session();
        let wire = RatesWire {
            progress_rates: vec![2.5, 1.0],
            reaction_rates: vec![-2.5, 2.5],
            ks: None,
            species: None,
        };
        assert!(matches!(
            RateSnapshot::decode(wire, &session),
            Err(ServiceError::BadReply(_))
        ));
    }

    #[test]
    fn test_decode_rejects_reordered_species_echo() {
        let session = demo_session();
        let wire = RatesWire {
            progress_rates: vec![2.5],
            reaction_rates: vec![-2.5, 2.5],
            ks: None,
            species: Some(vec!["H2O".to_string(), "OH".to_string()]),
        };
        assert!(matches!(
            RateSnapshot::decode(wire, &session),
            Err(ServiceError::BadReply(_))
        ));
    }

    #[test]
    fn test_report_lines_preserve_order() {
        let session = demo_session();
        let wire = RatesWire {
            progress_rates: vec![2.5],
            reaction_rates: vec![-2.5, 2.5],
            ks: None,
            species: Some(session.species.clone()),
        };
        let snapshot = RateSnapshot::decode(wire, &session).unwrap();
        assert_eq!(snapshot.session_id, "abc123");
        let report = RateReport::new(&session, &snapshot);
        assert_eq!(
            report.progress_lines(),
            vec!["Reaction 0: 2.5 / OH+H2 -> H2O+H"]
        );
        assert_eq!(report.reaction_lines(), vec!["OH: -2.5", "H2O: 2.5"]);
    }

    #[test]
    fn test_rate_constants_are_decoded_when_present() {
        let session = demo_session();
        let wire = RatesWire {
            progress_rates: vec![2.5],
            reaction_rates: vec![-2.5, 2.5],
            ks: Some(vec![7.0e3]),
            species: None,
        };
        let snapshot = RateSnapshot::decode(wire, &session).unwrap();
        assert_relative_eq!(snapshot.ks.unwrap()[0], 7.0e3);
    }
}
