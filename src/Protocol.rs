/// HTTP layer of the client: endpoint construction, the `HttpClient` trait for
/// dependency injection, reply classification (transport / non-200 / explicit
/// failure marker) and the serde images of the three reply shapes. All actual
/// numerics live on the server side behind these endpoints.
pub mod kinetics_service_api;
/// The session entity produced by uploading a mechanism document, and the
/// controller that owns the single active session, replaces it atomically on
/// new uploads and threads it explicitly through every query.
pub mod mechanism_session;
/// Building and validating the concentration+temperature snapshot, decoding
/// the numeric reply positionally against the session lists and rendering the
/// per-reaction / per-species reports.
///
///  # Examples
/// ```
/// use KinWeb::Protocol::rate_query::{build_rate_body, parse_temperature};
/// let concentrations = vec![("OH".to_string(), 10.0), ("H2O".to_string(), 5.0)];
/// let temperature = parse_temperature("1000").unwrap();
/// let body = build_rate_body(&concentrations, temperature);
/// assert_eq!(body.as_object().unwrap().len(), 3);
/// ```
pub mod rate_query;
/// Temperature-swept rate plots: range validation, base64 image decoding and
/// the one-visible-plot-at-a-time display.
pub mod plot_query;
/// One numeric input per species of the active session; the sole authority on
/// which species names are legal request keys.
pub mod concentration_form;
