//! # Mechanism Session Module
//!
//! ## Aim
//! One uploaded mechanism becomes one server-side session, identified by an
//! opaque id and carrying the derived species and equation lists. Those two
//! lists are the only valid keys and indices for every later rate or plot
//! request while the session lives. This module owns that lifecycle:
//! `SessionController` is the single owner of the active session, replaces it
//! atomically on a new upload and threads it explicitly into every query, so
//! "which session is active" is a parameter rather than ambient global state.
//!
//! ## Main Data Structures
//! - `MechanismSession`: the session entity
//! - `SessionController<C>`: owning context wiring form, queries and display
//!
//! ## Usage
//! ```rust, ignore
//! let mut controller = SessionController::new()?;
//! controller.upload_mechanism(&raw_xml)?;
//! let snapshot = controller.get_rates("1500")?;
//! if let Some(report) = controller.report_for(&snapshot) {
//!     report.pretty_print();
//! }
//! ```

use super::concentration_form::ConcentrationForm;
use super::kinetics_service_api::{HttpClient, KineticsServiceClient, ServiceError, SessionWire};
use super::plot_query::{PlotDisplay, PlotImage, PlotKind, parse_temperature_range};
use super::rate_query::{RateReport, RateSnapshot, build_rate_body, parse_temperature};
use log::{info, warn};
use prettytable::{Cell, Row, Table};
use reqwest::blocking::Client;
use std::path::PathBuf;

/// One uploaded mechanism as the server sees it. The species and equation
/// lists keep the order returned at creation; all later replies are decoded
/// positionally against that order.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanismSession {
    pub id: String,
    pub species: Vec<String>,
    pub equations: Vec<String>,
}

impl MechanismSession {
    fn from_wire(wire: SessionWire) -> Self {
        Self {
            id: wire.id,
            species: wire.species,
            equations: wire.equations,
        }
    }

    pub fn pretty_print(&self) {
        let mut species_table = Table::new();
        species_table.add_row(Row::new(vec![Cell::new("#"), Cell::new("species")]));
        for (i, name) in self.species.iter().enumerate() {
            species_table.add_row(Row::new(vec![Cell::new(&i.to_string()), Cell::new(name)]));
        }
        species_table.printstd();

        let mut equation_table = Table::new();
        equation_table.add_row(Row::new(vec![Cell::new("#"), Cell::new("equation")]));
        for (i, equation) in self.equations.iter().enumerate() {
            equation_table.add_row(Row::new(vec![
                Cell::new(&i.to_string()),
                Cell::new(equation),
            ]));
        }
        equation_table.printstd();
    }
}

/// The owning context for the session protocol. Holds at most one active
/// session; a new upload replaces it wholesale together with the concentration
/// form, and a failed upload leaves both untouched.
pub struct SessionController<C: HttpClient> {
    service: KineticsServiceClient<C>,
    active: Option<MechanismSession>,
    form: ConcentrationForm,
    display: PlotDisplay,
    plot_kind: Option<PlotKind>,
}

impl SessionController<Client> {
    /// controller against the configured service URL
    pub fn new() -> Result<Self, ServiceError> {
        Ok(Self::with_service(KineticsServiceClient::new()?))
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ServiceError> {
        Ok(Self::with_service(KineticsServiceClient::with_base_url(
            base_url,
        )?))
    }
}

impl<C: HttpClient> SessionController<C> {
    pub fn with_service(service: KineticsServiceClient<C>) -> Self {
        Self {
            service,
            active: None,
            form: ConcentrationForm::empty(),
            display: PlotDisplay::new(),
            plot_kind: None,
        }
    }

    /// swap the plot output target, mainly for tests and headless use
    pub fn use_display(&mut self, display: PlotDisplay) {
        self.display = display;
    }

    pub fn active_session(&self) -> Option<&MechanismSession> {
        self.active.as_ref()
    }

    pub fn form(&self) -> &ConcentrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ConcentrationForm {
        &mut self.form
    }

    pub fn display(&self) -> &PlotDisplay {
        &self.display
    }

    /// which plot action the user last invoked; queries re-validate it
    pub fn plot_kind(&self) -> Option<PlotKind> {
        self.plot_kind
    }

    pub fn set_plot_kind(&mut self, kind: PlotKind) {
        self.plot_kind = Some(kind);
    }

    fn require_session(&self) -> Result<&MechanismSession, ServiceError> {
        self.active.as_ref().ok_or(ServiceError::NoActiveSession)
    }

    /// Uploads the raw mechanism text and makes the returned session the
    /// active one, rebuilding the concentration form from its species list.
    /// On any failure the previously active session and form stay as they were.
    pub fn upload_mechanism(
        &mut self,
        raw_document: &str,
    ) -> Result<&MechanismSession, ServiceError> {
        let wire = self.service.create_session(raw_document)?;
        let session = MechanismSession::from_wire(wire);
        if let Some(old) = &self.active {
            info!("session {} replaced by {}", old.id, session.id);
        }
        self.form = ConcentrationForm::for_species(&session.species);
        self.plot_kind = None;
        Ok(self.active.insert(session))
    }

    /// One rate snapshot at the form's concentrations and the given
    /// temperature. All validation happens before the request is dispatched;
    /// a validation failure means zero network traffic.
    pub fn get_rates(&self, temperature: &str) -> Result<RateSnapshot, ServiceError> {
        let session = self.require_session()?;
        let concentrations = self.form.collect_concentrations()?;
        let temperature = parse_temperature(temperature)?;
        let body = build_rate_body(&concentrations, temperature);
        let wire = self.service.get_rates(&session.id, &body)?;
        RateSnapshot::decode(wire, session)
    }

    /// Stale-response guard: a snapshot renders only while the session it was
    /// taken from is still the active one.
    pub fn report_for(&self, snapshot: &RateSnapshot) -> Option<RateReport> {
        let session = self.active.as_ref()?;
        if snapshot.session_id != session.id {
            warn!(
                "discarding rate snapshot taken for replaced session {}",
                snapshot.session_id
            );
            return None;
        }
        Some(RateReport::new(session, snapshot))
    }

    /// One plot of the currently selected kind over `[t_low, t_high]`. The
    /// body mirrors the rate query; the range rides in the request path.
    pub fn get_plot(
        &self,
        temperature: &str,
        t_low: &str,
        t_high: &str,
    ) -> Result<PlotImage, ServiceError> {
        let session = self.require_session()?;
        let kind = self.plot_kind.ok_or(ServiceError::InvalidMode)?;
        let concentrations = self.form.collect_concentrations()?;
        let temperature = parse_temperature(temperature)?;
        let (t_low, t_high) = parse_temperature_range(t_low, t_high)?;
        let body = build_rate_body(&concentrations, temperature);
        let wire = self.service.get_plots(&session.id, t_low, t_high, &body)?;
        PlotImage::decode(wire, kind, &session.id)
    }

    /// Shows the image unless its session has been replaced in the meantime,
    /// in which case it is dropped and `None` comes back.
    pub fn show_plot(&mut self, image: &PlotImage) -> Result<Option<PathBuf>, ServiceError> {
        match &self.active {
            Some(session) if session.id == image.session_id => {
                let path = self.display.show(image)?;
                Ok(Some(path))
            }
            _ => {
                warn!(
                    "discarding {} rate plot taken for replaced session {}",
                    image.kind.as_str(),
                    image.session_id
                );
                Ok(None)
            }
        }
    }
}
