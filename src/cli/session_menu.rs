use super::cli_main::{alert, prompt};
use crate::Protocol::kinetics_service_api::HttpClient;
use crate::Protocol::mechanism_session::SessionController;
use crate::Protocol::plot_query::PlotKind;
use crate::Utils::load_mechanism::load_mechanism_document;
use crate::service_config::{with_service_config, with_service_config_mut};

pub fn upload_menu<C: HttpClient>(controller: &mut SessionController<C>) {
    let path = prompt("Path to mechanism document: ");
    let raw_document = match load_mechanism_document(path.trim()) {
        Ok(text) => text,
        Err(e) => {
            alert(&e);
            return;
        }
    };

    match controller.upload_mechanism(&raw_document) {
        Ok(session) => {
            println!(
                "\x1b[32mSession {} created: {} species, {} reactions\x1b[0m",
                session.id,
                session.species.len(),
                session.equations.len()
            );
            session.pretty_print();
        }
        Err(e) => alert(&format!("Upload failed: {}", e)),
    }
}

pub fn show_session<C: HttpClient>(controller: &SessionController<C>) {
    match controller.active_session() {
        Some(session) => {
            println!("Active session: {}", session.id);
            session.pretty_print();
        }
        None => alert("No active session. Upload a mechanism first."),
    }
}

/// walks the species of the active session, an empty answer keeps the current
/// value; finishes with the temperature
pub fn concentrations_menu<C: HttpClient>(
    controller: &mut SessionController<C>,
    temperature: &mut String,
) {
    if controller.form().is_empty() {
        alert("No active session. Upload a mechanism first.");
        return;
    }

    let names: Vec<String> = controller
        .form()
        .fields()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    for name in names {
        let current = controller
            .form()
            .value_of(&name)
            .unwrap_or_default()
            .to_string();
        let answer = prompt(&format!("Concentration of {} [{}]: ", name, current));
        if !answer.trim().is_empty() {
            controller.form_mut().set_value(&name, answer.trim());
        }
    }

    let answer = prompt(&format!("Temperature, K [{}]: ", temperature));
    if !answer.trim().is_empty() {
        *temperature = answer.trim().to_string();
    }
}

pub fn rates_action<C: HttpClient>(controller: &SessionController<C>, temperature: &str) {
    match controller.get_rates(temperature) {
        Ok(snapshot) => match controller.report_for(&snapshot) {
            Some(report) => report.pretty_print(),
            None => alert("Session changed while the request was in flight."),
        },
        Err(e) => alert(&format!("Rate query failed: {}", e)),
    }
}

pub fn plot_action<C: HttpClient>(
    controller: &mut SessionController<C>,
    temperature: &str,
    kind: PlotKind,
) {
    controller.set_plot_kind(kind);
    let t_low = prompt("Lower temperature bound, K: ");
    let t_high = prompt("Upper temperature bound, K: ");

    match controller.get_plot(temperature, t_low.trim(), t_high.trim()) {
        Ok(image) => match controller.show_plot(&image) {
            Ok(Some(path)) => println!("Plot written to {}", path.display()),
            Ok(None) => alert("Session changed while the request was in flight."),
            Err(e) => alert(&format!("Could not display plot: {}", e)),
        },
        Err(e) => alert(&format!("Plot query failed: {}", e)),
    }
}

/// returns true when the endpoint was changed
pub fn settings_menu() -> bool {
    let current = with_service_config(|cfg| cfg.base_url().to_string());
    println!("Current service URL: {}", current);
    let answer = prompt("New service URL (empty keeps current): ");
    if answer.trim().is_empty() {
        return false;
    }

    match with_service_config_mut(|cfg| cfg.set_base_url(answer.trim()).map_err(|e| e.to_string()))
    {
        Ok(()) => {
            println!("Service URL updated.");
            true
        }
        Err(e) => {
            alert(&format!("Rejected: {}", e));
            false
        }
    }
}
