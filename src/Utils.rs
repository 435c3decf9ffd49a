/// reading mechanism documents from disk before upload
pub mod load_mechanism;
/// opening plot images with the platform viewer
pub mod show_plot;
