use log::info;
use std::fs;
use std::path::Path;

/// Reads a mechanism document for upload. The document format belongs to the
/// server-side parser, so nothing beyond "the file exists and holds some text"
/// is checked here.
pub fn load_mechanism_document(file_name: &str) -> Result<String, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => return Err(format!("Failed to read file '{}': {}", file_name, e)),
    };

    if text.trim().is_empty() {
        return Err(format!("File '{}' contains no mechanism text", file_name));
    }

    info!(
        "loaded mechanism document '{}' ({} bytes)",
        file_name,
        text.len()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_mechanism_document() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "<?xml version=\"1.0\"?>").unwrap();
        writeln!(temp_file, "<ctml><reactionData/></ctml>").unwrap();

        let result = load_mechanism_document(temp_file.path().to_str().unwrap());
        assert!(result.is_ok());
        assert!(result.unwrap().contains("<reactionData/>"));
    }

    #[test]
    fn test_load_mechanism_document_missing_file() {
        let result = load_mechanism_document("no_such_mechanism.xml");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_load_mechanism_document_empty_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "   ").unwrap();

        let result = load_mechanism_document(temp_file.path().to_str().unwrap());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("no mechanism text"));
    }
}
