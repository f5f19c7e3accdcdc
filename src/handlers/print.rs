//! Printable HTML export of table rows.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use handlebars::Handlebars;
use log::info;
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::utils::format::format_date_str;

/// Synthetic column key rendering the 1-based row number.
pub const SERIAL_NUMBER_KEY: &str = "serialNumber";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintColumn {
    pub key: String,
    pub label: String,
    pub is_date: bool,
}

impl PrintColumn {
    pub fn new(key: &str, label: &str) -> Self {
        PrintColumn {
            key: key.to_string(),
            label: label.to_string(),
            is_date: false,
        }
    }

    pub fn date(key: &str, label: &str) -> Self {
        PrintColumn {
            is_date: true,
            ..PrintColumn::new(key, label)
        }
    }
}

/// Destination of a rendered print document.
pub trait PrintSink {
    fn print(&mut self, title: &str, document: &str) -> AppResult<()>;
}

/// Writes each document to `<dir>/<title-slug>-<timestamp>.html`.
#[derive(Debug)]
pub struct FilePrintSink {
    dir: PathBuf,
}

impl FilePrintSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FilePrintSink {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

fn slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "print".to_string()
    } else {
        slug.to_string()
    }
}

impl PrintSink for FilePrintSink {
    fn print(&mut self, title: &str, document: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|err| AppError::Print(format!("failed to create {}: {}", self.dir.display(), err)))?;
        let file_name = format!("{}-{}.html", slug(title), Utc::now().format("%Y%m%d%H%M%S%3f"));
        let path = self.dir.join(file_name);
        fs::write(&path, document)
            .map_err(|err| AppError::Print(format!("failed to write {}: {}", path.display(), err)))?;
        info!("Print document written to {}", path.display());
        Ok(())
    }
}

/// Keeps rendered documents in memory.
#[derive(Debug, Default)]
pub struct MemoryPrintSink {
    pub documents: Vec<(String, String)>,
}

impl PrintSink for MemoryPrintSink {
    fn print(&mut self, title: &str, document: &str) -> AppResult<()> {
        self.documents.push((title.to_string(), document.to_string()));
        Ok(())
    }
}

/// Renders a cell; null, `false`, `0` and empty strings print as nothing.
fn cell_text(value: Option<&Value>, is_date: bool) -> String {
    let text = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if is_date && !text.is_empty() {
        format_date_str(&text)
    } else {
        text
    }
}

const PRINT_STYLE: &str = "
      @media print {
        @page {
          margin: 1cm;
        }
      }
      body {
        font-family: Arial, sans-serif;
        margin: 20px;
      }
      h1 {
        text-align: center;
        margin-bottom: 20px;
      }
      table {
        width: 100%;
        border-collapse: collapse;
        margin-top: 20px;
      }
      th, td {
        border: 1px solid #ddd;
        padding: 12px;
        text-align: left;
      }
      th {
        background-color: #4A5BD9;
        color: white;
        font-weight: bold;
      }
      tr:nth-child(even) {
        background-color: #f9f9f9;
      }
      tr:hover {
        background-color: #f5f5f5;
      }
";

// `{{ }}` escapes HTML; only the fixed stylesheet is inserted raw.
const PRINT_TEMPLATE: &str = "<!DOCTYPE html>
<html>
  <head>
    <title>{{title}}</title>
    <style>{{{style}}}    </style>
  </head>
  <body>
    <h1>{{title}}</h1>
    <table>
      <thead>
        <tr>{{#each headers}}<th>{{this}}</th>{{/each}}</tr>
      </thead>
      <tbody>
{{#each rows}}<tr>{{#each this}}<td>{{this}}</td>{{/each}}</tr>
{{/each}}      </tbody>
    </table>
  </body>
</html>
";

/// Builds a standalone HTML document with one row per item.
///
/// Items are looked up by their serialized field names, so `columns` use the
/// same keys the JSON form of `T` carries.
pub fn render_print_document<T: Serialize>(
    rows: &[T],
    columns: &[PrintColumn],
    title: &str,
) -> AppResult<String> {
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let value = serde_json::to_value(row)
            .map_err(|err| AppError::Print(format!("failed to serialize row: {}", err)))?;
        let line = columns
            .iter()
            .map(|column| {
                if column.key == SERIAL_NUMBER_KEY {
                    (index + 1).to_string()
                } else {
                    cell_text(value.get(&column.key), column.is_date)
                }
            })
            .collect();
        cells.push(line);
    }

    let headers: Vec<&str> = columns.iter().map(|column| column.label.as_str()).collect();
    let data = json!({
        "title": title,
        "style": PRINT_STYLE,
        "headers": headers,
        "rows": cells,
    });
    Handlebars::new()
        .render_template(PRINT_TEMPLATE, &data)
        .map_err(|err| AppError::Print(format!("failed to render print document: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_serial_numbers_and_dates() {
        let rows = vec![
            json!({"name": "Asha", "dob": "1990-01-05"}),
            json!({"name": "Ben", "dob": "1985-12-25"}),
        ];
        let columns = vec![
            PrintColumn::new(SERIAL_NUMBER_KEY, "#"),
            PrintColumn::new("name", "Name"),
            PrintColumn::date("dob", "Born"),
        ];
        let html = render_print_document(&rows, &columns, "Staff").unwrap();
        assert!(html.contains("<title>Staff</title>"));
        assert!(html.contains("<th>#</th><th>Name</th><th>Born</th>"));
        assert!(html.contains("<tr><td>1</td><td>Asha</td><td>Jan 5, 1990</td></tr>"));
        assert!(html.contains("<tr><td>2</td><td>Ben</td><td>Dec 25, 1985</td></tr>"));
    }

    #[test]
    fn falsy_and_missing_values_are_blank() {
        let rows = vec![json!({"a": null, "b": 0, "c": "", "d": false})];
        let columns: Vec<PrintColumn> = ["a", "b", "c", "d", "missing"]
            .iter()
            .map(|key| PrintColumn::new(key, key))
            .collect();
        let html = render_print_document(&rows, &columns, "Blank").unwrap();
        assert!(html.contains("<tr><td></td><td></td><td></td><td></td><td></td></tr>"));
    }

    #[test]
    fn cell_text_and_title_are_escaped() {
        let rows = vec![json!({"name": "<script>x</script>"})];
        let columns = [PrintColumn::new("name", "Name & Title")];
        let html = render_print_document(&rows, &columns, "<b>Staff</b>").unwrap();
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("<th>Name &amp; Title</th>"));
        assert!(html.contains("<h1>&lt;b&gt;Staff&lt;/b&gt;</h1>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("border-collapse: collapse;"));
    }

    #[test]
    fn file_sink_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FilePrintSink::new(dir.path());
        sink.print("Employees List", "<html></html>").unwrap();
        let written: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(written.len(), 1);
        let path = &written[0];
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("employees-list-"));
        assert!(path.extension().is_some_and(|ext| ext == "html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
