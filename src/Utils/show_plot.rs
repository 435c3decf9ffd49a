use std::path::Path;
use std::process::Command;

/// Hands the file to whatever the OS considers its default image viewer. The
/// viewer runs detached; this never blocks on it.
pub fn open_with_default_viewer(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_os = "windows")]
    {
        let path_str = path.to_str().ok_or("non-UTF8 image path")?;
        Command::new("cmd").args(["/C", "start", "", path_str]).spawn()?;
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn()?;
    }

    Ok(())
}
