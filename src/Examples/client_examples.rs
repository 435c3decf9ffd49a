use crate::Protocol::concentration_form::ConcentrationForm;
use crate::Protocol::kinetics_service_api::RatesWire;
use crate::Protocol::mechanism_session::{MechanismSession, SessionController};
use crate::Protocol::rate_query::{RateReport, RateSnapshot, build_rate_body, parse_temperature};

/// small hydrogen-combustion mechanism in the document format the server-side
/// parser understands; handy for poking a locally running calculator
pub const DEMO_MECHANISM: &str = r#"<?xml version="1.0"?>
<ctml>
  <phase>
    <speciesArray> H O OH H2 H2O O2 </speciesArray>
  </phase>
  <reactionData id="demo_mechanism">
    <reaction reversible="no" type="Elementary" id="reaction01">
      <equation>H + O2 =] OH + O</equation>
      <rateCoeff>
        <Arrhenius>
          <A>3.52e+10</A>
          <b>-0.7</b>
          <E>7.14e+04</E>
        </Arrhenius>
      </rateCoeff>
      <reactants>H:1 O2:1</reactants>
      <products>OH:1 O:1</products>
    </reaction>
    <reaction reversible="no" type="Elementary" id="reaction02">
      <equation>H2 + O =] OH + H</equation>
      <rateCoeff>
        <Arrhenius>
          <A>5.06e-2</A>
          <b>2.7</b>
          <E>2.63e+04</E>
        </Arrhenius>
      </rateCoeff>
      <reactants>H2:1 O:1</reactants>
      <products>OH:1 H:1</products>
    </reaction>
  </reactionData>
</ctml>
"#;

pub fn client_examples(task: usize) {
    match task {
        0 => {
            // FORM AND SNAPSHOT BODY, NO NETWORK
            let species: Vec<String> = ["OH", "H2O"].iter().map(|s| s.to_string()).collect();
            let mut form = ConcentrationForm::for_species(&species);
            form.set_value("OH", "10");
            form.set_value("H2O", "5");
            let concentrations = form.collect_concentrations().unwrap();
            let temperature = parse_temperature("1000").unwrap();
            let body = build_rate_body(&concentrations, temperature);
            // one key per species plus _temp
            assert_eq!(body.as_object().unwrap().len(), 3);
            println!("snapshot body: {}", body);
        }
        1 => {
            // REPORT RENDERING FROM A CANNED REPLY
            let session = MechanismSession {
                id: "abc123".to_string(),
                species: vec!["OH".to_string(), "H2O".to_string()],
                equations: vec!["OH+H2 -> H2O+H".to_string()],
            };
            let wire = RatesWire {
                progress_rates: vec![2.5],
                reaction_rates: vec![-2.5, 2.5],
                ks: Some(vec![7.1e3]),
                species: None,
            };
            let snapshot = RateSnapshot::decode(wire, &session).unwrap();
            let report = RateReport::new(&session, &snapshot);
            for line in report.progress_lines() {
                println!("{}", line);
            }
            for line in report.reaction_lines() {
                println!("{}", line);
            }
            report.pretty_print();
        }
        2 => {
            // FULL ROUND TRIP AGAINST THE CONFIGURED SERVICE
            // requires a running calculator, see service_config.json
            let mut controller = SessionController::new().expect("client construction failed");
            match controller.upload_mechanism(DEMO_MECHANISM) {
                Ok(session) => session.pretty_print(),
                Err(e) => {
                    println!("upload failed: {}", e);
                    return;
                }
            }
            match controller.get_rates("1500") {
                Ok(snapshot) => {
                    if let Some(report) = controller.report_for(&snapshot) {
                        report.pretty_print();
                    }
                }
                Err(e) => println!("rate query failed: {}", e),
            }
        }
        _ => println!("no such example"),
    }
}
