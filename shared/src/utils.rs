use std::path::{Path, PathBuf};

pub fn is_pdf_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    ext.eq_ignore_ascii_case("pdf")
}

/// Plain-text sibling of a staged PDF.
///
/// `plan.pdf` maps to `plan.txt`. Any other name keeps its full file name and
/// gains `.txt` (`plan.PDF` maps to `plan.PDF.txt`), so two distinct uploads
/// never share a text file and an upload is never its own text file.
pub fn text_path_for(pdf_path: &Path) -> PathBuf {
    if pdf_path.extension().and_then(|e| e.to_str()) == Some("pdf") {
        return pdf_path.with_extension("txt");
    }
    let mut name = pdf_path.as_os_str().to_os_string();
    name.push(".txt");
    PathBuf::from(name)
}

/// Split a newline-delimited text area into trimmed, non-empty lines.
pub fn non_empty_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
